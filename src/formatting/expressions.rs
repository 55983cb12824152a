//! Layout of expressions

use crate::formatting::formatter::{Context, Formatter, Outcome};
use crate::formatting::{Hints, Rule};
use crate::syntax::*;

/// An `<expr> && <expr>` or `<expr> || <expr>`.
fn is_binary_boolean(tree: &SyntaxTree, node: NodeId) -> bool {
    let children = tree.children(node);
    children.len() == 3 && matches!(tree.token(children[1]), Some("&&") | Some("||"))
}

/// An `<expr> + <expr>`.
fn is_binary_addition(tree: &SyntaxTree, node: NodeId) -> bool {
    let children = tree.children(node);
    children.len() == 3 && tree.kind(children[1]) == "+"
}

impl<'a> Formatter<'a> {
    /// Does the predicate hold for this expression and every enclosing
    /// expression, up to the first thing that isn't one?
    fn is_chain_of(&mut self, node: NodeId, predicate: fn(&SyntaxTree, NodeId) -> bool) -> bool {
        let tree = self.tree;
        let mut current = Some(node);

        while let Some(node) = current {
            if !self.is_expr(node) || !predicate(tree, node) {
                break;
            }
            current = tree.parent(node);
        }

        match current {
            Some(node) => !self.is_expr(node),
            None => false,
        }
    }

    fn is_expr(&mut self, node: NodeId) -> bool {
        let tree = self.tree;
        match tree.name(node) {
            Some(kind) => {
                self.registry
                    .resolve(kind)
                    == Rule::Expr
            }
            None => false,
        }
    }

    /// `<expr> <operator> <expr>`, where the operator is a preferred break
    /// point if this is part of a run of the same kind of operation.
    fn binary(&mut self, cx: &mut Context, predicate: fn(&SyntaxTree, NodeId) -> bool) -> Outcome {
        let hints = if self.is_chain_of(cx.node, predicate) {
            Hints::PREFER_BREAK
        } else {
            Hints::empty()
        };

        self.child(cx)?;
        self.space(cx)?;
        self.child_with(cx, hints)?; // operator
        self.space(cx)?;
        self.child(cx)
    }

    /// Expressions aren't broken down by the grammar either; the layout
    /// depends on the shape of the first few children.
    pub(super) fn expr(&mut self, cx: &mut Context) -> Outcome {
        let [n1, n2, _] = [0, 1, 2].map(|offset| self.peek_name(cx, offset));
        let [t1, t2, t3] = [0, 1, 2].map(|offset| self.peek_token(cx, offset));
        let tree = self.tree;

        match (n1, n2, t1, t2, t3) {
            (Some("expr"), _, _, Some("["), _) => {
                self.child(cx)?;
                self.child_with(cx, Hints::NO_BREAK_BEFORE | Hints::NO_BREAK_AFTER)?; // '['
                self.child(cx)?; // <expr_list>
                self.child_with(cx, Hints::NO_BREAK_BEFORE) // ']'
            }
            (Some("expr"), _, _, Some("$"), _) => {
                self.child(cx)?;
                self.child_with(cx, Hints::NO_BREAK_BEFORE | Hints::NO_BREAK_AFTER)?; // '$'
                self.rest(cx)
            }
            (Some("expr"), Some("index_slice"), _, _, _) => self.rest(cx),
            (_, _, Some("!"), _, _) => {
                // negation reads better spaced apart
                self.child_with(cx, Hints::NO_BREAK_AFTER)?;
                self.space(cx)?;
                self.child(cx)
            }
            (_, _, Some("|" | "++" | "--" | "~" | "-" | "+"), _, _) => {
                // unary operators and |x| hug their operand
                self.child_with(cx, Hints::NO_BREAK_AFTER)?;
                self.rest(cx)
            }
            (Some("expr"), _, _, Some("!"), Some("in")) => {
                self.child(cx)?;
                self.space(cx)?;
                self.child_with(cx, Hints::NO_BREAK_AFTER)?; // '!'
                self.child(cx)?; // 'in'
                self.space(cx)?;
                self.child(cx)
            }
            (_, _, Some("["), _, _) => {
                self.child_with(cx, Hints::NO_BREAK_BEFORE)?;
                if self.peek_name(cx, 0) == Some("expr_list") {
                    self.child(cx)?;
                } else {
                    self.space(cx)?;
                }
                self.child_with(cx, Hints::NO_BREAK_BEFORE) // ']'
            }
            (_, _, Some("$"), _, Some("=")) => {
                // $field=<expr>
                self.child_range(cx, 4, Hints::empty(), Hints::PREFER_BREAK)
            }
            (_, _, Some("$"), _, _) => {
                // $field(args) = <func_body>, possibly with captures
                self.child_range(cx, 2, Hints::empty(), Hints::PREFER_BREAK)?;
                self.space(cx)?;
                self.child_with(cx, Hints::NO_BREAK_BEFORE | Hints::NO_BREAK_AFTER)?; // <begin_lambda>
                self.space(cx)?;
                self.child_with(cx, Hints::NO_BREAK_BEFORE)?; // '='
                self.space(cx)?;
                self.child(cx) // <func_body>
            }
            (_, _, Some("("), _, _) => {
                self.child_with(cx, Hints::NO_BREAK_BEFORE)?;
                self.space(cx)?;
                self.child_with(cx, Hints::NO_BREAK_AFTER)?; // <expr>
                self.space(cx)?;
                self.child(cx) // ')'
            }
            (_, _, Some("copy"), _, _) => {
                self.child(cx)?;
                self.child_with(cx, Hints::NO_BREAK_BEFORE)?; // '('
                self.child_range(cx, 2, Hints::empty(), Hints::empty()) // <expr> ')'
            }
            (_, _, _, Some("?$"), _) => self.child_range(cx, 3, Hints::empty(), Hints::empty()),
            (_, _, Some("function"), _, _) => {
                self.child_range(cx, 2, Hints::empty(), Hints::empty())?; // 'function' <begin_lambda>
                self.space(cx)?;
                self.child(cx) // <func_body>
            }
            (_, _, _, Some("("), _) => {
                // calls, and constructors such as table(...)
                self.child(cx)?;
                self.child_with(cx, Hints::NO_BREAK_BEFORE)?;
                if self.peek_name(cx, 0) == Some("expr_list") {
                    self.child(cx)?;
                }
                self.child_with(cx, Hints::NO_BREAK_BEFORE)?; // ')'
                if self.peek_name(cx, 0) == Some("attr_list") {
                    self.space(cx)?;
                    self.child(cx)?;
                }
                Ok(())
            }
            // A run of &&/|| up to the enclosing statement breaks before
            // each operator, once it has to break at all. Same for long
            // string concatenations.
            _ if is_binary_boolean(tree, cx.node) => self.binary(cx, is_binary_boolean),
            _ if is_binary_addition(tree, cx.node) => self.binary(cx, is_binary_addition),
            _ => self.space_separated(cx),
        }
    }

    /// The remaining children, back to back.
    fn rest(&mut self, cx: &mut Context) -> Outcome {
        while self.remaining(cx) > 0 {
            self.child(cx)?;
        }
        Ok(())
    }

    pub(super) fn attr(&mut self, cx: &mut Context) -> Outcome {
        if self.peek_token(cx, 1) == Some("=") {
            // &default = <expr> stays together
            self.child_range(cx, 3, Hints::empty(), Hints::empty())
        } else {
            self.child(cx)
        }
    }
}
