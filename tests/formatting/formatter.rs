#[cfg(test)]
mod verify {
    use pretty_assertions::assert_eq;

    use zeekfmt::formatting::*;
    use zeekfmt::syntax::*;

    use crate::trees::*;

    fn render(root: ConcreteNode) -> String {
        let tree = SyntaxTree::from_concrete(root);
        format_to_string(&tree, &Options::default()).unwrap()
    }

    #[test]
    fn global_declaration() {
        // global  x:   count  =  5  ;
        let result = render(source(vec![global_count(), nl()]));
        assert_eq!(result, "global x: count = 5;\n");
    }

    #[test]
    fn if_with_block_keeps_brace_on_condition_line() {
        // if(x)
        // {
        // foo();
        // }
        let result = render(source(vec![
            stmt(vec![
                token("if"),
                token("("),
                var("x"),
                token(")"),
                nl(),
                block(vec![expr_stmt(call("foo", vec![])), nl()]),
            ]),
            nl(),
        ]));
        assert_eq!(result, "if ( x ) {\n\tfoo();\n}\n");
    }

    #[test]
    fn else_if_chains_on_one_line() {
        // if(x) foo(); else if (y) bar();
        let result = render(source(vec![stmt(vec![
            token("if"),
            token("("),
            var("x"),
            token(")"),
            expr_stmt(call("foo", vec![])),
            token("else"),
            stmt(vec![
                token("if"),
                token("("),
                var("y"),
                token(")"),
                expr_stmt(call("bar", vec![])),
            ]),
        ])]));
        assert_eq!(result, "if ( x )\n\tfoo();\nelse if ( y )\n\tbar();\n");
    }

    #[test]
    fn long_boolean_chain_breaks_before_each_operator() {
        let operands: Vec<String> = (1..=10)
            .map(|i| format!("operand_{:02}", i))
            .collect();
        let operands: Vec<&str> = operands
            .iter()
            .map(String::as_str)
            .collect();

        let result = render(source(vec![handler(
            "check",
            vec![stmt(vec![token("return"), chain("&&", &operands), token(";")])],
        )]));

        let mut expected = String::from("event check()\n{\n\treturn operand_01\n");
        for i in 2..=10 {
            expected.push_str(&format!("\t    && operand_{:02}", i));
            expected.push_str(if i == 10 { ";\n" } else { "\n" });
        }
        expected.push_str("}\n");

        assert_eq!(result, expected);
    }

    #[test]
    fn blank_lines_between_declarations_collapse() {
        // three blank lines in the input
        let result = render(source(vec![
            global_count(),
            nl(),
            nl(),
            nl(),
            nl(),
            global_count(),
            nl(),
        ]));
        assert_eq!(result, "global x: count = 5;\n\nglobal x: count = 5;\n");
    }

    #[test]
    fn trailing_comment_is_not_counted_against_width() {
        let assignment = binary(
            var("some_rather_long_variable_name"),
            "=",
            call("another_fairly_long_function_name", vec![var("arg")]),
        );
        let comment = "# keeps its place next to the code";

        let result = render(node(
            "stmt_list",
            vec![stmt(vec![
                assignment,
                token(";"),
                ConcreteNode::comment("minor_comment", comment),
                nl(),
            ])],
        ));

        let code = "some_rather_long_variable_name = another_fairly_long_function_name(arg);";
        assert!(code.len() <= 80);
        assert!(code.len() + 1 + comment.len() > 80);
        assert_eq!(result, format!("{} {}\n", code, comment));
    }

    #[test]
    fn narrower_width_wraps_sooner() {
        let arguments = ["first", "second", "third", "fourth", "fifth", "sixth"]
            .iter()
            .map(|name| var(name))
            .collect();
        let tree = SyntaxTree::from_concrete(expr_stmt(call("report", arguments)));

        let wide = format_to_string(&tree, &Options::default()).unwrap();
        assert_eq!(wide, "report(first, second, third, fourth, fifth, sixth);\n");

        let options = Options {
            width: 30,
            ..Options::default()
        };
        let narrow = format_to_string(&tree, &options).unwrap();
        assert_eq!(narrow, "report(first, second, third,\n    fourth, fifth, sixth);\n");
    }

    #[test]
    fn custom_registry_overrides_conventions() {
        let tree = SyntaxTree::from_concrete(source(vec![global_count(), nl()]));

        let mut registry = Registry::new();
        registry.register("global_decl", Rule::Null);

        let mut out = Vec::new();
        format_with_registry(&tree, registry, &mut out, &Options::default()).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "");
    }

    #[test]
    fn writes_to_any_sink() {
        let tree = SyntaxTree::from_concrete(source(vec![global_count(), nl()]));

        let mut out = Vec::new();
        format(&tree, &mut out, &Options::default()).unwrap();
        assert_eq!(out, b"global x: count = 5;\n");
    }
}
