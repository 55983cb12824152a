use std::io::Write;
use std::path::Path;

use clap::value_parser;
use clap::{Arg, ArgAction, Command};
use tracing::{debug, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use zeekfmt::formatting::{self, Options};
use zeekfmt::syntax;

fn main() {
    const VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("zeekfmt=warn"));
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(filter)
        .init();

    let matches = Command::new("zeekfmt")
        .version(VERSION)
        .propagate_version(true)
        .about("A code formatter for Zeek scripts.")
        .disable_help_subcommand(true)
        .subcommand(
            Command::new("format")
                .about("Format the script described by the given syntax tree")
                .arg(
                    Arg::new("width")
                        .long("width")
                        .value_parser(value_parser!(usize))
                        .default_value("80")
                        .help("Column beyond which lines are wrapped."),
                )
                .arg(
                    Arg::new("filename")
                        .required(true)
                        .help("The file containing the concrete syntax tree, as JSON. Use - for standard input."),
                ),
        )
        .subcommand(
            Command::new("parse")
                .about("Show the syntax tree the formatter works from")
                .arg(
                    Arg::new("concrete")
                        .long("concrete")
                        .action(ArgAction::SetTrue)
                        .help("Include comments and newlines in the output."),
                )
                .arg(
                    Arg::new("filename")
                        .required(true)
                        .help("The file containing the concrete syntax tree, as JSON. Use - for standard input."),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("format", submatches)) => {
            let filename = match submatches.get_one::<String>("filename") {
                Some(filename) => filename,
                None => return,
            };
            let width = submatches
                .get_one::<usize>("width")
                .copied()
                .unwrap_or(Options::default().width);

            debug!(?filename, width);

            let tree = load(Path::new(filename));
            if let Some(problem) = tree.first_error() {
                warn!("{}", problem);
            }

            let options = Options {
                width,
                ..Options::default()
            };

            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            if let Err(error) = formatting::format(&tree, &mut out, &options) {
                eprintln!("error: {}", error);
                std::process::exit(1);
            }
        }
        Some(("parse", submatches)) => {
            let filename = match submatches.get_one::<String>("filename") {
                Some(filename) => filename,
                None => return,
            };
            let concrete = submatches.get_flag("concrete");

            debug!(?filename, concrete);

            let tree = load(Path::new(filename));

            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            let result = tree
                .write_tree(&mut out, concrete)
                .and_then(|_| out.flush());
            if let Err(error) = result {
                eprintln!("error: {}", error);
                std::process::exit(1);
            }
        }
        Some(_) => {
            println!("No valid subcommand was used")
        }
        None => {
            println!("usage: zeekfmt [COMMAND] ...");
            println!("Try '--help' for more information.");
        }
    }
}

fn load(filename: &Path) -> syntax::SyntaxTree {
    match syntax::load(filename) {
        Ok(tree) => tree,
        Err(error) => {
            eprintln!("error: {}", error);
            std::process::exit(1);
        }
    }
}
