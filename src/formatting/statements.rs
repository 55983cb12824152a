//! Layout of statements and the lists found inside them

use tracing::debug;

use crate::formatting::formatter::{Context, Formatter, Outcome};
use crate::formatting::{FormatError, Hints};
use crate::syntax::leads_with;

impl<'a> Formatter<'a> {
    /// Is the upcoming child a `{ ... }` block? That decides whether a
    /// controlled statement goes on the same line or an indented one.
    fn next_is_block(&self, cx: &Context) -> bool {
        match self.peek(cx, 0) {
            Some(child) => self
                .tree
                .has_property(child, leads_with("{")),
            None => false,
        }
    }

    /// A statement controlled by if, for, while, and so on: a block stays
    /// on the same line, anything else goes on its own indented line.
    /// Returns whether it was a block.
    fn controlled(&mut self, cx: &mut Context) -> Result<bool, FormatError> {
        let curly = self.next_is_block(cx);
        if curly {
            self.space(cx)?;
        } else {
            self.newline(cx)?;
        }
        self.format_child(cx, !curly, Hints::empty())?;
        Ok(curly)
    }

    /// `( <expr> )`, spaced inside the parentheses.
    fn condition(&mut self, cx: &mut Context) -> Outcome {
        self.child_with(cx, Hints::NO_BREAK_BEFORE)?; // '('
        self.space(cx)?;
        self.child(cx)?; // <expr>
        self.space(cx)?;
        self.child_with(cx, Hints::NO_BREAK_BEFORE) // ')'
    }

    fn block(&mut self, cx: &mut Context) -> Outcome {
        if self.controlled(cx)? {
            self.newline(cx)?;
        }
        Ok(())
    }

    fn when(&mut self, cx: &mut Context) -> Outcome {
        self.child(cx)?; // 'when'
        self.space(cx)?;
        if self.peek_name(cx, 0) == Some("capture_list") {
            self.child(cx)?;
            self.space(cx)?;
        }
        self.condition(cx)?;

        let curly = self.controlled(cx)?;

        if self.peek_token(cx, 0) == Some("timeout") {
            if curly {
                self.space(cx)?;
            }
            self.child(cx)?; // 'timeout'
            self.space(cx)?;
            self.child(cx)?; // <expr>
            self.space(cx)?;
            self.child_with(cx, Hints::NO_BREAK_BEFORE)?; // '{'
            self.newline(cx)?;
            if self.peek_name(cx, 0) == Some("stmt_list") {
                self.child_indented(cx)?;
            }
            self.child(cx)?; // '}'
            self.newline(cx)
        } else if curly {
            self.newline(cx)
        } else {
            Ok(())
        }
    }

    fn if_(&mut self, cx: &mut Context) -> Outcome {
        self.child(cx)?; // 'if'
        self.space(cx)?;
        self.condition(cx)?;

        let curly = self.controlled(cx)?;

        if self.peek_token(cx, 0) != Some("else") {
            if curly {
                self.newline(cx)?;
            }
            return Ok(());
        }

        if curly {
            self.space(cx)?;
        }
        self.child(cx)?; // 'else'

        // "else if" stays on the else line, so that a cascade doesn't
        // march off to the right.
        let chained = match self.peek(cx, 0) {
            Some(child) => self
                .tree
                .has_property(child, leads_with("if")),
            None => false,
        };

        if chained {
            self.space(cx)?;
            self.child(cx)
        } else {
            self.block(cx)
        }
    }

    fn for_(&mut self, cx: &mut Context) -> Outcome {
        self.child(cx)?; // 'for'
        self.space(cx)?;
        self.child_with(cx, Hints::NO_BREAK_BEFORE)?; // '('
        self.space(cx)?;

        if self.peek_token(cx, 0) == Some("[") {
            self.child_with(cx, Hints::NO_BREAK_BEFORE)?;
            while self.remaining(cx) > 0 && self.peek_token(cx, 0) != Some("]") {
                self.child(cx)?; // <id>
                if self.peek_token(cx, 0) == Some(",") {
                    self.child_with(cx, Hints::NO_BREAK_BEFORE)?;
                    self.space(cx)?;
                }
            }
            self.child_with(cx, Hints::NO_BREAK_BEFORE)?; // ']'
        } else {
            self.child(cx)?; // <id>
        }

        while self.peek_token(cx, 0) == Some(",") {
            self.child_with(cx, Hints::NO_BREAK_BEFORE)?;
            self.space(cx)?;
            self.child(cx)?; // <id>
        }

        self.space(cx)?;
        self.child(cx)?; // 'in'
        self.space(cx)?;
        self.child(cx)?; // <expr>
        self.space(cx)?;
        self.child_with(cx, Hints::NO_BREAK_BEFORE)?; // ')'
        self.block(cx)
    }

    /// Statements aren't broken down further by the grammar, so the rule
    /// goes by what they start with.
    pub(super) fn stmt(&mut self, cx: &mut Context) -> Outcome {
        let name = self.peek_name(cx, 0);
        let token = self.peek_token(cx, 0);

        match (token, name) {
            (Some("{"), _) => {
                self.block_body(cx)?;
                // A block standing on its own ends its line; one controlled
                // by if and friends leaves that to them.
                let tree = self.tree;
                match tree.parent(cx.node) {
                    Some(parent) if tree.kind(parent) == "stmt_list" => self.newline(cx),
                    _ => Ok(()),
                }
            }
            (Some("print") | Some("event"), _) => {
                self.child(cx)?;
                self.space(cx)?;
                self.child_range(cx, 2, Hints::empty(), Hints::empty())?; // <expr_list>/<event_hdr> ';'
                self.newline(cx)
            }
            (Some("if"), _) => self.if_(cx),
            (Some("switch"), _) => {
                self.child(cx)?;
                self.space(cx)?;
                self.child(cx)?; // <expr>
                self.space(cx)?;
                self.child_with(cx, Hints::NO_BREAK_BEFORE)?; // '{'
                if self.peek_name(cx, 0) == Some("case_list") {
                    self.newline(cx)?;
                    self.child_indented(cx)?;
                } else {
                    self.space(cx)?;
                }
                self.child(cx)?; // '}'
                self.newline(cx)
            }
            (Some("for"), _) => self.for_(cx),
            (Some("while"), _) => {
                self.child(cx)?;
                self.space(cx)?;
                self.condition(cx)?;
                self.block(cx)
            }
            (Some("next") | Some("break") | Some("fallthrough"), _) => {
                self.child_range(cx, 2, Hints::empty(), Hints::empty())?;
                self.newline(cx)
            }
            (Some("return"), _) => {
                self.child(cx)?;
                if self.peek_token(cx, 0) == Some("when") {
                    self.space(cx)?;
                    return self.when(cx);
                }
                if self.peek_name(cx, 0) == Some("expr") {
                    self.space(cx)?;
                    self.child(cx)?;
                }
                self.child_with(cx, Hints::NO_BREAK_BEFORE)?; // ';'
                self.newline(cx)
            }
            (Some("add") | Some("delete"), _) => {
                self.child(cx)?;
                self.space(cx)?;
                self.child_range(cx, 2, Hints::empty(), Hints::empty())?; // <expr> ';'
                self.newline(cx)
            }
            (Some("local") | Some("const"), _) => {
                self.child(cx)?;
                self.space(cx)?;
                self.child(cx)?; // <id>
                self.typed_initializer(cx)?;
                self.child_with(cx, Hints::NO_BREAK_BEFORE)?; // ';'
                self.newline(cx)
            }
            (Some("when"), _) => self.when(cx),
            (_, Some("index_slice")) => {
                self.child(cx)?;
                self.space(cx)?;
                self.child(cx)?; // '='
                self.space(cx)?;
                self.child_range(cx, 2, Hints::empty(), Hints::empty())?; // <expr> ';'
                self.newline(cx)
            }
            (_, Some("expr")) => {
                self.child_range(cx, 2, Hints::empty(), Hints::empty())?; // <expr> ';'
                self.newline(cx)
            }
            (_, Some("preproc_directive")) => {
                self.child(cx)?;
                self.newline(cx)
            }
            (Some(";"), _) => {
                self.child(cx)?;
                self.newline(cx)
            }
            _ => {
                // Keep the tokens of anything unrecognized rather than
                // losing them.
                debug!(
                    "statement starting with {:?} formatted as plain tokens",
                    token.or(name)
                );
                self.space_separated(cx)?;
                self.newline(cx)
            }
        }
    }

    pub(super) fn expr_list(&mut self, cx: &mut Context) -> Outcome {
        while self.peek_name(cx, 0) == Some("expr") {
            self.child(cx)?;
            if self.remaining(cx) > 0 {
                self.child_with(cx, Hints::NO_BREAK_BEFORE)?; // ','
                self.space(cx)?;
            }
        }
        Ok(())
    }

    pub(super) fn case_list(&mut self, cx: &mut Context) -> Outcome {
        while self.remaining(cx) > 0 {
            if self.peek_token(cx, 0) == Some("case") {
                self.child(cx)?;
                self.space(cx)?;
                self.child_range(cx, 2, Hints::empty(), Hints::empty())?; // <expr_list>/<case_type_list> ':'
            } else {
                self.child_range(cx, 2, Hints::empty(), Hints::empty())?; // 'default' ':'
            }
            self.newline(cx)?;
            if self.peek_name(cx, 0) == Some("stmt_list") {
                self.child_indented(cx)?;
            }
        }
        Ok(())
    }

    pub(super) fn case_type_list(&mut self, cx: &mut Context) -> Outcome {
        while self.peek_token(cx, 0) == Some("type") {
            self.child(cx)?;
            self.space(cx)?;
            self.child(cx)?; // <type>
            if self.peek_token(cx, 0) == Some("as") {
                self.space(cx)?;
                self.child(cx)?;
                self.space(cx)?;
                self.child(cx)?; // <id>
            }
            if self.peek_token(cx, 0) == Some(",") {
                self.child_with(cx, Hints::NO_BREAK_BEFORE)?;
                self.space(cx)?;
            }
        }
        Ok(())
    }

    pub(super) fn event_hdr(&mut self, cx: &mut Context) -> Outcome {
        self.child(cx)?; // <id>
        self.child_with(cx, Hints::NO_BREAK_BEFORE)?; // '('
        if self.peek_name(cx, 0) == Some("expr_list") {
            self.child(cx)?;
        }
        self.child_with(cx, Hints::NO_BREAK_BEFORE) // ')'
    }
}
