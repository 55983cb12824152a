//! Building the trees an external Zeek parser would hand us.

use zeekfmt::syntax::ConcreteNode;

pub fn token(text: &str) -> ConcreteNode {
    ConcreteNode::token(text)
}

pub fn nl() -> ConcreteNode {
    ConcreteNode::newline()
}

pub fn node(kind: &str, children: Vec<ConcreteNode>) -> ConcreteNode {
    ConcreteNode::named(kind, children)
}

pub fn id(name: &str) -> ConcreteNode {
    ConcreteNode::leaf("id", name)
}

/// An expression that is just an identifier.
pub fn var(name: &str) -> ConcreteNode {
    node("expr", vec![id(name)])
}

pub fn constant(value: &str) -> ConcreteNode {
    node("expr", vec![ConcreteNode::leaf("constant", value)])
}

pub fn binary(left: ConcreteNode, operator: &str, right: ConcreteNode) -> ConcreteNode {
    node("expr", vec![left, token(operator), right])
}

pub fn call(function: &str, arguments: Vec<ConcreteNode>) -> ConcreteNode {
    let mut list = Vec::new();
    for (i, argument) in arguments
        .into_iter()
        .enumerate()
    {
        if i > 0 {
            list.push(token(","));
        }
        list.push(argument);
    }
    node(
        "expr",
        vec![var(function), token("("), node("expr_list", list), token(")")],
    )
}

pub fn stmt(children: Vec<ConcreteNode>) -> ConcreteNode {
    node("stmt", children)
}

/// `<expr>;`
pub fn expr_stmt(value: ConcreteNode) -> ConcreteNode {
    stmt(vec![value, token(";")])
}

pub fn block(statements: Vec<ConcreteNode>) -> ConcreteNode {
    stmt(vec![token("{"), nl(), node("stmt_list", statements), token("}")])
}

/// `event <name>() { ... }` with the body's statements.
pub fn handler(name: &str, statements: Vec<ConcreteNode>) -> ConcreteNode {
    node(
        "decl",
        vec![node(
            "func_decl",
            vec![
                node(
                    "func_hdr",
                    vec![node(
                        "event",
                        vec![
                            token("event"),
                            id(name),
                            node("func_params", vec![token("("), token(")")]),
                        ],
                    )],
                ),
                nl(),
                node(
                    "func_body",
                    vec![token("{"), nl(), node("stmt_list", statements), token("}")],
                ),
            ],
        )],
    )
}

pub fn source(children: Vec<ConcreteNode>) -> ConcreteNode {
    node("source_file", children)
}

/// `a && b && ...` over the given operands, nested to the left as the
/// grammar nests them.
pub fn chain(operator: &str, operands: &[&str]) -> ConcreteNode {
    let mut operands = operands.iter();
    let mut result = match operands.next() {
        Some(first) => var(first),
        None => return node("expr", vec![]),
    };
    for operand in operands {
        result = binary(result, operator, var(operand));
    }
    result
}

/// Every tree the property checks run over.
pub fn samples() -> Vec<ConcreteNode> {
    let operands: Vec<String> = (1..=10)
        .map(|i| format!("operand_{:02}", i))
        .collect();
    let operands: Vec<&str> = operands
        .iter()
        .map(String::as_str)
        .collect();

    vec![
        global_count(),
        source(vec![
            stmt(vec![
                token("if"),
                token("("),
                var("x"),
                token(")"),
                nl(),
                block(vec![expr_stmt(call("foo", vec![])), nl()]),
            ]),
            nl(),
        ]),
        source(vec![
            handler(
                "check",
                vec![
                    stmt(vec![token("return"), chain("&&", &operands), token(";")]),
                    nl(),
                ],
            ),
            nl(),
        ]),
        source(vec![
            global_count(),
            nl(),
            nl(),
            nl(),
            nl(),
            handler(
                "zeek_init",
                vec![
                    expr_stmt(call("report", vec![var("x")])),
                    ConcreteNode::comment("minor_comment", "# note"),
                    nl(),
                    nl(),
                    nl(),
                    expr_stmt(binary(var("y"), "=", chain("+", &["a", "b", "c"]))),
                    nl(),
                ],
            ),
            nl(),
        ]),
        source(vec![
            handler(
                "watch",
                vec![
                    stmt(vec![
                        token("return"),
                        chain(
                            "||",
                            &[
                                "orig_is_local_host",
                                "resp_is_local_host",
                                "orig_in_watch_list",
                                "resp_in_watch_list",
                                "service_is_interesting",
                            ],
                        ),
                        token(";"),
                    ]),
                    nl(),
                ],
            ),
            nl(),
        ]),
        source(vec![
            stmt(vec![
                token("print"),
                node("expr_list", vec![concatenation(8)]),
                token(";"),
            ]),
            nl(),
        ]),
        source(vec![documented_record(), nl()]),
        node(
            "stmt_list",
            vec![
                stmt(vec![
                    node(
                        "expr",
                        vec![
                            var("x"),
                            token("="),
                            ConcreteNode::comment("minor_comment", "# why"),
                            nl(),
                            constant("1"),
                        ],
                    ),
                    token(";"),
                ]),
                nl(),
            ],
        ),
    ]
}

/// `"part 1 of the message" + "part 2 of the message" + ...`
pub fn concatenation(parts: usize) -> ConcreteNode {
    let mut result = constant("\"part 1 of the message\"");
    for i in 2..=parts {
        result = binary(result, "+", constant(&format!("\"part {} of the message\"", i)));
    }
    result
}

/// A record whose fields are documented by runs of `##<` comments.
pub fn documented_record() -> ConcreteNode {
    let field = |name: &str, docs: &[&str]| {
        let mut children = vec![
            id(name),
            token(":"),
            node("type", vec![token("count")]),
            token(";"),
        ];
        for doc in docs {
            children.push(ConcreteNode::comment("zeekygen_prev_comment", doc));
            children.push(nl());
        }
        node("type_spec", children)
    };

    node(
        "decl",
        vec![node(
            "type_decl",
            vec![
                token("type"),
                id("Stats"),
                token(":"),
                node(
                    "type",
                    vec![
                        token("record"),
                        token("{"),
                        nl(),
                        field("seen", &["##< Connections seen.", "##< Includes partial ones."]),
                        field("dropped_by_the_filter", &["##< Connections the filter dropped."]),
                        token("}"),
                    ],
                ),
                token(";"),
            ],
        )],
    )
}

/// `global x: count = 5;`
pub fn global_count() -> ConcreteNode {
    node(
        "decl",
        vec![node(
            "global_decl",
            vec![
                token("global"),
                id("x"),
                token(":"),
                node("type", vec![token("count")]),
                node(
                    "initializer",
                    vec![node("init_class", vec![token("=")]), node("init", vec![constant("5")])],
                ),
                token(";"),
            ],
        )],
    )
}
