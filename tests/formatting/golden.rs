#[cfg(test)]
mod examples {
    use std::fs;
    use std::path::Path;

    use zeekfmt::formatting::*;
    use zeekfmt::syntax;

    /// Golden test for the format command
    ///
    /// Each .json file in tests/golden/ holds the concrete syntax tree of a
    /// script; the .zeek file next to it is what the formatter must produce
    /// from that tree. If one fails, either the formatter is wrong or the
    /// expected output predates a deliberate style change.

    /// Simple diff function to show line-by-line differences
    fn show_diff(expected: &str, formatted: &str, file_path: &Path) {
        let expected_lines: Vec<&str> = expected
            .lines()
            .collect();
        let formatted_lines: Vec<&str> = formatted
            .lines()
            .collect();

        let max_lines = expected_lines
            .len()
            .max(formatted_lines.len());

        println!("\nDifferences found in file: {:?}", file_path);
        println!("--- Expected");
        println!("+++ Formatted");

        for i in 0..max_lines {
            let expected_line = expected_lines
                .get(i)
                .unwrap_or(&"");
            let formatted_line = formatted_lines
                .get(i)
                .unwrap_or(&"");

            if expected_line != formatted_line {
                println!("@@ Line {} @@", i + 1);
                println!("- {:?}", expected_line);
                println!("+ {:?}", formatted_line);
            }
        }
    }

    #[test]
    fn ensure_expected_output() {
        let dir = Path::new("tests/golden");
        assert!(dir.exists(), "golden directory missing");

        let entries = fs::read_dir(dir).expect("Failed to read golden directory");

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.expect("Failed to read directory entry");
            let path = entry.path();

            if path
                .extension()
                .and_then(|s| s.to_str())
                == Some("json")
            {
                files.push(path);
            }
        }
        files.sort();

        assert!(!files.is_empty(), "No .json files found in golden directory");

        let mut failures = 0;

        for file in &files {
            let tree = syntax::load(file)
                .unwrap_or_else(|e| panic!("Failed to load file {:?}: {:?}", file, e));
            assert!(tree
                .first_error()
                .is_none());

            let expected_path = file.with_extension("zeek");
            let expected = fs::read_to_string(&expected_path)
                .unwrap_or_else(|e| panic!("Failed to read {:?}: {:?}", expected_path, e));

            let result = format_to_string(&tree, &Options::default())
                .unwrap_or_else(|e| panic!("Failed to format {:?}: {:?}", file, e));

            if result != expected {
                show_diff(&expected, &result, file);
                failures += 1;
            }

            // Formatting again must not change anything.
            let again = format_to_string(&tree, &Options::default()).unwrap();
            assert_eq!(again, result);
        }

        if failures > 0 {
            panic!("{} of {} golden files differ", failures, files.len());
        }
    }
}
