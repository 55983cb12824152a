//! Checks that hold for any tree, run over a handful of samples.

#[cfg(test)]
mod verify {
    use pretty_assertions::assert_eq;

    use zeekfmt::formatting::*;
    use zeekfmt::syntax::*;

    use crate::trees::*;

    fn render(tree: &SyntaxTree) -> String {
        format_to_string(tree, &Options::default()).unwrap()
    }

    fn squeeze(text: &str) -> String {
        text.chars()
            .filter(|c| !c.is_whitespace())
            .collect()
    }

    /// The same tree without any of its newline extras, except those ending
    /// a comment.
    fn without_newlines(node: ConcreteNode) -> ConcreteNode {
        let mut children = Vec::new();
        let mut after_comment = false;
        for child in node.children {
            let is_nl = child.kind == "nl";
            if !is_nl || after_comment {
                after_comment = child
                    .kind
                    .ends_with("comment");
                children.push(without_newlines(child));
            }
        }
        ConcreteNode { children, ..node }
    }

    #[test]
    fn output_is_deterministic() {
        for sample in samples() {
            let tree = SyntaxTree::from_concrete(sample);
            assert_eq!(render(&tree), render(&tree));
        }
    }

    #[test]
    fn tokens_and_comments_are_preserved() {
        for sample in samples() {
            let tree = SyntaxTree::from_concrete(sample);

            let mut expected = String::new();
            for (id, _) in tree.traverse(true) {
                if tree
                    .children(id)
                    .is_empty()
                {
                    expected.push_str(tree.text(id));
                }
            }

            assert_eq!(squeeze(&render(&tree)), squeeze(&expected));
        }
    }

    #[test]
    fn no_trailing_whitespace() {
        for sample in samples() {
            let tree = SyntaxTree::from_concrete(sample);
            let result = render(&tree);
            for line in result.lines() {
                assert!(
                    !line.ends_with(' ') && !line.ends_with('\t'),
                    "trailing whitespace in {:?}",
                    line
                );
            }
        }
    }

    #[test]
    fn lines_fit_the_width() {
        let options = Options::default();
        for sample in samples() {
            let tree = SyntaxTree::from_concrete(sample);
            let result = render(&tree);
            for line in result.lines() {
                // Comments don't count toward the width; the code before
                // them does.
                let code = match line.find('#') {
                    Some(start) => line[..start].trim_end(),
                    None => line,
                };
                assert!(
                    display_width(code, options.tab_width) <= options.width,
                    "line too wide: {:?}",
                    line
                );
            }
        }
    }

    #[test]
    fn at_most_one_blank_line() {
        for sample in samples() {
            let tree = SyntaxTree::from_concrete(sample);
            let result = render(&tree);
            assert!(!result.contains("\n\n\n"), "{:?}", result);
            assert!(!result.starts_with('\n'), "{:?}", result);
            assert!(!result.contains("{\n\n"), "{:?}", result);
        }
    }

    #[test]
    fn layout_of_the_input_does_not_matter() {
        // Samples without blank lines, whose only newlines are layout.
        for sample in samples()
            .into_iter()
            .take(3)
        {
            let laid_out = SyntaxTree::from_concrete(sample.clone());
            let squashed = SyntaxTree::from_concrete(without_newlines(sample));
            assert_eq!(render(&squashed), render(&laid_out));
        }
    }
}
