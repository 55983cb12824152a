//! Breaking one logical line into physical lines
//!
//! This is the second stage of output: the dispatcher has already produced
//! the chunks of a logical line, each tagged with hints, and here we decide
//! where (if anywhere) to insert line breaks so the result fits the width
//! budget. Nothing in here knows about syntax trees.

use tracing::trace;

use crate::formatting::{Hints, Options};

pub const NL: &str = "\n";

/// A piece of formatted text and the hints it was written with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chunk {
    pub text: String,
    pub hints: Hints,
}

impl Chunk {
    pub fn new(text: &str, hints: Hints) -> Chunk {
        Chunk {
            text: text.to_string(),
            hints,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.text
            .trim()
            .is_empty()
    }

    /// Columns this chunk counts for when budgeting the line.
    pub fn width(&self, options: &Options) -> usize {
        if self
            .hints
            .contains(Hints::ZERO_WIDTH)
        {
            0
        } else {
            display_width(&self.text, options.tab_width)
        }
    }
}

/// Display columns taken up by text, with tabs counted at a fixed width.
pub fn display_width(text: &str, tab_width: usize) -> usize {
    text.chars()
        .map(|c| match c {
            '\t' => tab_width,
            '\n' | '\r' => 0,
            _ => 1,
        })
        .sum()
}

/// One logical line, up to and including its terminator.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Line {
    pub chunks: Vec<Chunk>,
    /// Tab depth the line was started at; continuation lines get the same.
    pub indent: usize,
    /// Whether automatic breaking is allowed at all.
    pub wrapping: bool,
}

/// Lay out a logical line. Chunks are written in order; the only thing
/// ever added is a break followed by continuation indentation, and the
/// only thing ever dropped is whitespace at the end of a physical line or
/// at the start of a continuation.
pub fn wrap(line: &Line, options: &Options) -> String {
    let mut wrapper = Wrapper {
        options,
        indent: line.indent,
        output: String::new(),
        flushed: 0,
        pending: Vec::new(),
        pending_width: 0,
        has_content: false,
    };

    if !line.wrapping {
        for chunk in &line.chunks {
            push_text(&mut wrapper.output, &chunk.text);
        }
        return wrapper.output;
    }

    let items = line
        .chunks
        .iter()
        .filter(|chunk| !chunk.is_blank())
        .count();
    let total: usize = line
        .chunks
        .iter()
        .map(|chunk| chunk.width(options))
        .sum();

    // Once an advisory break has been taken we rely on those alone for the
    // rest of the line; mixing in width-triggered breaks looks ragged.
    let mut advisory = false;

    for (i, chunk) in line
        .chunks
        .iter()
        .enumerate()
    {
        wrapper
            .pending
            .push(chunk);
        wrapper.pending_width += chunk.width(options);

        // Whitespace waits in the pending group, so that a break after it
        // can discard it instead of leaving it dangling. Comments wait too:
        // they never cause a break, and one must not come between a
        // comment and the line it ends.
        if chunk.is_blank()
            || chunk
                .hints
                .contains(Hints::ZERO_WIDTH)
        {
            continue;
        }

        if chunk
            .hints
            .contains(Hints::NO_BREAK_AFTER)
        {
            continue;
        }

        let next = line.chunks[i + 1..]
            .iter()
            .find(|chunk| !chunk.is_blank());
        if next.is_some_and(|next| {
            next.hints
                .contains(Hints::NO_BREAK_BEFORE)
        }) {
            continue;
        }

        if wrapper.has_content {
            if chunk
                .hints
                .contains(Hints::PREFER_BREAK)
                && total > options.width
            {
                trace!("advisory break before {:?}", chunk.text);
                wrapper.break_line();
                advisory = true;
            } else if !advisory
                && wrapper.flushed + wrapper.pending_width > options.width
                && items >= options.min_items
            {
                trace!("width break before {:?}", chunk.text);
                wrapper.break_line();
            }
        }

        wrapper.commit();
    }

    wrapper.commit();
    wrapper.output
}

struct Wrapper<'l> {
    options: &'l Options,
    indent: usize,
    output: String,
    /// Column reached by what has been committed to output.
    flushed: usize,
    pending: Vec<&'l Chunk>,
    pending_width: usize,
    /// Whether the current physical line holds anything but whitespace.
    has_content: bool,
}

impl<'l> Wrapper<'l> {
    fn break_line(&mut self) {
        strip_trailing(&mut self.output);
        self.output
            .push_str(NL);
        for _ in 0..self.indent {
            self.output
                .push('\t');
        }
        for _ in 0..self
            .options
            .continuation
        {
            self.output
                .push(' ');
        }

        self.flushed = self.indent
            * self
                .options
                .tab_width
            + self
                .options
                .continuation;
        self.has_content = false;

        while let Some(first) = self
            .pending
            .first()
        {
            if !first.is_blank() {
                break;
            }
            self.pending_width -= first.width(self.options);
            self.pending
                .remove(0);
        }
    }

    fn commit(&mut self) {
        for chunk in self
            .pending
            .drain(..)
        {
            push_text(&mut self.output, &chunk.text);
            self.flushed += chunk.width(self.options);
            if !chunk.is_blank() {
                self.has_content = true;
            }
        }
        self.pending_width = 0;
    }
}

fn push_text(output: &mut String, text: &str) {
    match text.strip_suffix(NL) {
        Some(body) => {
            output.push_str(body);
            strip_trailing(output);
            output.push_str(NL);
        }
        None => output.push_str(text),
    }
}

fn strip_trailing(output: &mut String) {
    let keep = output
        .trim_end_matches([' ', '\t'])
        .len();
    output.truncate(keep);
}

#[cfg(test)]
mod check {
    use super::*;

    fn line(chunks: Vec<Chunk>) -> Line {
        Line {
            chunks,
            indent: 0,
            wrapping: true,
        }
    }

    fn plain(text: &str) -> Chunk {
        Chunk::new(text, Hints::empty())
    }

    /// Ten nine-character words separated by spaces, then the terminator.
    fn words(hinted: Option<(usize, Hints)>) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        for i in 1..=10 {
            if i > 1 {
                chunks.push(plain(" "));
            }
            let hints = match hinted {
                Some((which, hints)) if which == i => hints,
                _ => Hints::empty(),
            };
            chunks.push(Chunk::new(&format!("word_{:04}", i), hints));
        }
        chunks.push(plain(NL));
        chunks
    }

    #[test]
    fn short_line_is_untouched() {
        let result = wrap(
            &line(vec![plain("x"), plain(" "), plain("="), plain(" "), plain("1;"), plain(NL)]),
            &Options::default(),
        );
        assert_eq!(result, "x = 1;\n");
    }

    #[test]
    fn trailing_whitespace_is_stripped() {
        let result = wrap(
            &line(vec![plain("\t"), plain("foo"), plain(" "), plain(" "), plain(NL)]),
            &Options::default(),
        );
        assert_eq!(result, "\tfoo\n");

        let result = wrap(&line(vec![plain("\t\t"), plain(NL)]), &Options::default());
        assert_eq!(result, "\n");
    }

    #[test]
    fn long_line_breaks_at_width() {
        let result = wrap(&line(words(None)), &Options::default());
        assert_eq!(
            result,
            "word_0001 word_0002 word_0003 word_0004 word_0005 word_0006 word_0007 word_0008\n    word_0009 word_0010\n"
        );
        for physical in result.lines() {
            assert!(physical.len() <= 80);
        }
    }

    #[test]
    fn continuation_is_indented_by_tabs_and_spaces() {
        let mut input = line(words(None));
        input
            .chunks
            .insert(0, plain("\t"));
        input.indent = 1;

        let result = wrap(&input, &Options::default());
        let lines: Vec<&str> = result
            .lines()
            .collect();
        assert!(lines[0].starts_with("\tword_0001"));
        assert!(lines[1].starts_with("\t    word_"));
        assert!(display_width(lines[0], 8) <= 80);
    }

    #[test]
    fn few_items_never_break() {
        let long = "x".repeat(40);
        let result = wrap(
            &line(vec![plain(&long), plain(" "), plain(&long), plain(" "), plain(&long), plain(NL)]),
            &Options::default(),
        );
        assert_eq!(result, format!("{} {} {}\n", long, long, long));
    }

    #[test]
    fn no_break_before_glues_to_previous() {
        let result = wrap(
            &line(words(Some((9, Hints::NO_BREAK_BEFORE)))),
            &Options::default(),
        );
        assert_eq!(
            result,
            "word_0001 word_0002 word_0003 word_0004 word_0005 word_0006 word_0007\n    word_0008 word_0009 word_0010\n"
        );
    }

    #[test]
    fn no_break_after_glues_to_next() {
        let result = wrap(
            &line(words(Some((8, Hints::NO_BREAK_AFTER)))),
            &Options::default(),
        );
        assert_eq!(
            result,
            "word_0001 word_0002 word_0003 word_0004 word_0005 word_0006 word_0007\n    word_0008 word_0009 word_0010\n"
        );
    }

    fn chain(operands: usize) -> Vec<Chunk> {
        let mut chunks = vec![plain("return"), plain(" ")];
        for i in 1..=operands {
            if i > 1 {
                chunks.push(plain(" "));
                chunks.push(Chunk::new("&&", Hints::PREFER_BREAK));
                chunks.push(plain(" "));
            }
            chunks.push(plain(&format!("operand_{:02}", i)));
        }
        chunks.push(Chunk::new(";", Hints::NO_BREAK_BEFORE));
        chunks.push(plain(NL));
        chunks
    }

    #[test]
    fn advisory_breaks_only_when_too_long() {
        let result = wrap(&line(chain(3)), &Options::default());
        assert_eq!(result, "return operand_01 && operand_02 && operand_03;\n");
    }

    #[test]
    fn advisory_breaks_take_over_the_line() {
        let result = wrap(&line(chain(10)), &Options::default());
        let mut expected = String::from("return operand_01\n");
        for i in 2..=10 {
            expected.push_str(&format!("    && operand_{:02}", i));
            expected.push_str(if i == 10 { ";\n" } else { "\n" });
        }
        assert_eq!(result, expected);
    }

    #[test]
    fn zero_width_chunks_do_not_cause_breaks() {
        let body = "y".repeat(70);
        let result = wrap(
            &line(vec![
                plain("x"),
                plain(" "),
                plain("="),
                plain(" "),
                plain(&body),
                plain(";"),
                Chunk::new(" ", Hints::ZERO_WIDTH),
                Chunk::new("# a comment that runs well past the budget", Hints::ZERO_WIDTH),
                plain(NL),
            ]),
            &Options::default(),
        );
        assert_eq!(
            result,
            format!("x = {}; # a comment that runs well past the budget\n", body)
        );
    }

    #[test]
    fn comment_stays_on_an_overlong_line() {
        // The string alone is past the budget, so the line has to break
        // somewhere; the comment stays with the code it follows.
        let text = format!("\"{}\"", "s".repeat(88));
        let mut input = line(vec![
            plain("\t"),
            plain("local"),
            plain(" "),
            plain("s"),
            plain(" "),
            plain("="),
            plain(" "),
            plain(&text),
            Chunk::new(";", Hints::NO_BREAK_BEFORE),
            Chunk::new(" ", Hints::ZERO_WIDTH),
            Chunk::new("# note", Hints::ZERO_WIDTH),
            plain(NL),
        ]);
        input.indent = 1;

        let result = wrap(&input, &Options::default());
        assert_eq!(result, format!("\tlocal s =\n\t    {}; # note\n", text));
    }

    #[test]
    fn wrapping_can_be_disabled() {
        let mut input = line(words(None));
        input.wrapping = false;
        let result = wrap(&input, &Options::default());
        assert_eq!(
            result
                .lines()
                .count(),
            1
        );
    }
}
