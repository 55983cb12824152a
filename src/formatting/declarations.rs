//! Layout of declarations, types, and function headers

use crate::formatting::formatter::{Context, Formatter, Outcome};
use crate::formatting::Hints;

impl<'a> Formatter<'a> {
    pub(super) fn module_decl(&mut self, cx: &mut Context) -> Outcome {
        self.child(cx)?; // 'module'
        self.space(cx)?;
        self.child_range(cx, 2, Hints::empty(), Hints::empty())?; // <id> ';'
        self.newline(cx)
    }

    pub(super) fn export_decl(&mut self, cx: &mut Context) -> Outcome {
        self.child(cx)?; // 'export'
        self.space(cx)?;
        self.child_with(cx, Hints::NO_BREAK_BEFORE)?; // '{'
        self.newline(cx)?;
        while self.peek_name(cx, 0) == Some("decl") {
            self.child_indented(cx)?;
        }
        self.child(cx)?; // '}'
        self.newline(cx)
    }

    /// The optional `: <type>`, initializer, and attributes shared by
    /// globals and locals.
    pub(super) fn typed_initializer(&mut self, cx: &mut Context) -> Outcome {
        if self.peek_token(cx, 0) == Some(":") {
            self.child_with(cx, Hints::NO_BREAK_AFTER)?;
            self.space(cx)?;
            self.child(cx)?; // <type>
        }

        if self.peek_name(cx, 0) == Some("initializer") {
            self.space(cx)?;
            self.child(cx)?;
        }

        if self.peek_name(cx, 0) == Some("attr_list") {
            self.space(cx)?;
            self.child(cx)?;
        }
        Ok(())
    }

    /// Globals, options, constants, and simple redefs all look alike.
    pub(super) fn global_decl(&mut self, cx: &mut Context) -> Outcome {
        self.child(cx)?; // 'global', 'option', ...
        self.space(cx)?;
        self.child(cx)?; // <id>
        self.typed_initializer(cx)?;
        self.child_with(cx, Hints::NO_BREAK_BEFORE)?; // ';'
        self.newline(cx)
    }

    pub(super) fn initializer(&mut self, cx: &mut Context) -> Outcome {
        if self.peek_name(cx, 0) == Some("init_class") {
            self.child(cx)?; // '=', '+=', ...
            self.space(cx)?;
        }
        self.child(cx) // <init>
    }

    pub(super) fn init(&mut self, cx: &mut Context) -> Outcome {
        if self.peek_token(cx, 0) != Some("{") {
            return self.child(cx); // <expr>
        }

        self.child_with(cx, Hints::NO_BREAK_BEFORE)?; // '{'
        if self.peek_name(cx, 0) == Some("expr") {
            self.newline(cx)?;
            while self.peek_name(cx, 0) == Some("expr") {
                self.child_indented(cx)?;
                if self.peek_token(cx, 0) == Some(",") {
                    self.child_with(cx, Hints::NO_BREAK_BEFORE)?;
                }
                self.newline(cx)?;
            }
        } else {
            self.space(cx)?;
        }
        self.child(cx) // '}'
    }

    pub(super) fn redef_enum_decl(&mut self, cx: &mut Context) -> Outcome {
        // 'redef' 'enum' <id> '+=' '{'
        for _ in 0..5 {
            self.child(cx)?;
            self.space(cx)?;
        }
        self.newline(cx)?;
        self.child_indented(cx)?; // <enum_body>
        self.child_range(cx, 2, Hints::empty(), Hints::empty())?; // '}' ';'
        self.newline(cx)
    }

    pub(super) fn redef_record_decl(&mut self, cx: &mut Context) -> Outcome {
        // 'redef' 'record' <id> '+=' '{'
        for _ in 0..5 {
            self.child(cx)?;
            self.space(cx)?;
        }
        self.newline(cx)?;
        while self.peek_name(cx, 0) == Some("type_spec") {
            self.child_indented(cx)?;
        }
        self.child(cx)?; // '}'
        if self.peek_name(cx, 0) == Some("attr_list") {
            self.space(cx)?;
            self.child(cx)?;
        }
        self.child_with(cx, Hints::NO_BREAK_BEFORE)?; // ';'
        self.newline(cx)
    }

    pub(super) fn type_decl(&mut self, cx: &mut Context) -> Outcome {
        self.child(cx)?; // 'type'
        self.space(cx)?;
        self.child_range(cx, 2, Hints::empty(), Hints::empty())?; // <id> ':'
        self.space(cx)?;
        self.child(cx)?; // <type>
        if self.peek_name(cx, 0) == Some("attr_list") {
            self.space(cx)?;
            self.child(cx)?;
        }
        self.child_with(cx, Hints::NO_BREAK_BEFORE)?; // ';'
        self.newline(cx)
    }

    pub(super) fn type_(&mut self, cx: &mut Context) -> Outcome {
        match self.peek_token(cx, 0) {
            Some("set") => {
                self.child(cx)?;
                self.type_list(cx)
            }
            Some("table") => {
                self.child(cx)?;
                self.type_list(cx)?;
                self.space(cx)?;
                self.child(cx)?; // 'of'
                self.space(cx)?;
                self.child(cx) // <type>
            }
            Some("record") => {
                self.child(cx)?;
                self.space(cx)?;
                self.child(cx)?; // '{'
                if self.peek_name(cx, 0) == Some("type_spec") {
                    self.newline(cx)?;
                    while self.peek_name(cx, 0) == Some("type_spec") {
                        self.child_indented(cx)?;
                    }
                } else {
                    // empty record stays on one line
                    self.space(cx)?;
                }
                self.child(cx) // '}'
            }
            Some("enum") => {
                self.child(cx)?;
                self.space(cx)?;
                self.child(cx)?; // '{'
                self.newline(cx)?;
                self.child_indented(cx)?; // <enum_body>
                self.child(cx) // '}'
            }
            Some("function") => {
                self.child_range(cx, 2, Hints::empty(), Hints::empty()) // 'function' <func_params>
            }
            Some("event") | Some("hook") => {
                self.child(cx)?;
                self.child_with(cx, Hints::NO_BREAK_BEFORE)?; // '('
                if self.peek_name(cx, 0) == Some("formal_args") {
                    self.child(cx)?;
                }
                self.child_with(cx, Hints::NO_BREAK_BEFORE) // ')'
            }
            _ => self.space_separated(cx), // "vector of count" and the like
        }
    }

    /// `[type, type, ...]` after set and table.
    fn type_list(&mut self, cx: &mut Context) -> Outcome {
        self.child_with(cx, Hints::NO_BREAK_BEFORE)?; // '['
        while self.peek_name(cx, 0) == Some("type") {
            self.child(cx)?;
            if self.peek_token(cx, 0) == Some(",") {
                self.child_with(cx, Hints::NO_BREAK_BEFORE)?;
                self.space(cx)?;
            }
        }
        self.child_with(cx, Hints::NO_BREAK_BEFORE) // ']'
    }

    pub(super) fn type_spec(&mut self, cx: &mut Context) -> Outcome {
        self.child_with(cx, Hints::NO_BREAK_AFTER)?; // <id>
        self.child_with(cx, Hints::NO_BREAK_AFTER)?; // ':'
        self.space(cx)?;
        self.child(cx)?; // <type>
        if self.peek_name(cx, 0) == Some("attr_list") {
            self.space(cx)?;
            self.child(cx)?;
        }
        self.child_with(cx, Hints::NO_BREAK_BEFORE)?; // ';'
        self.newline(cx)
    }

    pub(super) fn enum_body(&mut self, cx: &mut Context) -> Outcome {
        while self.remaining(cx) > 0 {
            self.child(cx)?; // <enum_body_elem>
            if self.remaining(cx) > 0 {
                // the comma is optional after the last element
                self.child_with(cx, Hints::NO_BREAK_BEFORE)?;
            }
            self.newline(cx)?;
        }
        Ok(())
    }

    pub(super) fn func_decl(&mut self, cx: &mut Context) -> Outcome {
        self.child(cx)?; // <func_hdr>
        if self.peek_name(cx, 0) == Some("preproc_directive") {
            self.newline(cx)?;
            while self.peek_name(cx, 0) == Some("preproc_directive") {
                self.child(cx)?;
                self.newline(cx)?;
            }
        }
        // Opening brace on a line of its own.
        self.newline(cx)?;
        self.child(cx)?; // <func_body>
        self.newline(cx)
    }

    pub(super) fn func_hdr(&mut self, cx: &mut Context) -> Outcome {
        self.child(cx) // <func>, <hook>, or <event>
    }

    pub(super) fn func_hdr_variant(&mut self, cx: &mut Context) -> Outcome {
        if self.peek_token(cx, 0) == Some("redef") {
            self.child(cx)?;
            self.space(cx)?;
        }
        self.child(cx)?; // 'function', 'hook', or 'event'
        self.space(cx)?;
        self.child(cx)?; // <id>
        self.child(cx)?; // <func_params>
        if self.peek_name(cx, 0) == Some("attr_list") {
            self.space(cx)?;
            self.child(cx)?;
        }
        Ok(())
    }

    pub(super) fn func_params(&mut self, cx: &mut Context) -> Outcome {
        self.child_with(cx, Hints::NO_BREAK_BEFORE)?; // '('
        if self.peek_name(cx, 0) == Some("formal_args") {
            self.child(cx)?;
        }
        self.child_with(cx, Hints::NO_BREAK_BEFORE)?; // ')'
        if self.peek_token(cx, 0) == Some(":") {
            self.child_with(cx, Hints::NO_BREAK_AFTER)?;
            self.space(cx)?;
            self.child(cx)?; // <type>
        }
        Ok(())
    }

    pub(super) fn func_body(&mut self, cx: &mut Context) -> Outcome {
        self.block_body(cx)
    }

    /// `{`, then either an indented statement list on lines of its own or a
    /// single space, then `}`.
    pub(super) fn block_body(&mut self, cx: &mut Context) -> Outcome {
        self.child_with(cx, Hints::NO_BREAK_BEFORE)?; // '{'
        if self.peek_name(cx, 0) == Some("stmt_list") {
            self.newline(cx)?;
            self.child_indented(cx)?;
        } else {
            self.space(cx)?;
        }
        self.child(cx) // '}'
    }

    pub(super) fn formal_args(&mut self, cx: &mut Context) -> Outcome {
        while self.peek_name(cx, 0) == Some("formal_arg") {
            self.child(cx)?;
            if self.remaining(cx) > 0 {
                self.child_with(cx, Hints::NO_BREAK_BEFORE)?; // ',' or ';'
                self.space(cx)?;
            }
        }
        Ok(())
    }

    pub(super) fn formal_arg(&mut self, cx: &mut Context) -> Outcome {
        self.child_with(cx, Hints::NO_BREAK_AFTER)?; // <id>
        self.child_with(cx, Hints::NO_BREAK_AFTER)?; // ':'
        self.space(cx)?;
        self.child(cx)?; // <type>
        if self.peek_name(cx, 0) == Some("attr_list") {
            self.space(cx)?;
            self.child(cx)?;
        }
        Ok(())
    }

    pub(super) fn capture_list(&mut self, cx: &mut Context) -> Outcome {
        self.child_with(cx, Hints::NO_BREAK_BEFORE)?; // '['
        while self.peek_name(cx, 0) == Some("capture") {
            self.child(cx)?;
            if self.peek_token(cx, 0) == Some(",") {
                self.child_with(cx, Hints::NO_BREAK_BEFORE)?;
                self.space(cx)?;
            }
        }
        self.child_with(cx, Hints::NO_BREAK_BEFORE) // ']'
    }
}
