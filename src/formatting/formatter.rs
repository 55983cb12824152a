//! Code formatter for Zeek scripts

use std::collections::HashMap;
use std::io::Write;

use tracing::{debug, trace};

use crate::formatting::*;
use crate::syntax::*;

pub(super) type Outcome = Result<(), FormatError>;

/// Format a syntax tree to the given output, using the standard rule
/// mappings.
pub fn format(tree: &SyntaxTree, out: &mut dyn Write, options: &Options) -> Result<(), FormatError> {
    format_with_registry(tree, Registry::new(), out, options)
}

/// Format a syntax tree, with a caller-supplied set of rule mappings.
pub fn format_with_registry(
    tree: &SyntaxTree,
    registry: Registry,
    out: &mut dyn Write,
    options: &Options,
) -> Result<(), FormatError> {
    debug!("Formatting tree of {} nodes", tree.len());

    let mut formatter = Formatter {
        tree,
        registry,
        output: LineEngine::new(out, options.clone()),
        columns: HashMap::new(),
    };

    formatter.visit(tree.root(), 0, Hints::empty())?;
    formatter
        .output
        .finish()?;
    Ok(())
}

/// Format a syntax tree into a String.
pub fn format_to_string(tree: &SyntaxTree, options: &Options) -> Result<String, FormatError> {
    let mut buffer = Vec::new();
    format(tree, &mut buffer, options)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Walks the tree, applying to each node the rule registered for its kind.
pub(super) struct Formatter<'a> {
    pub(super) tree: &'a SyntaxTree,
    pub(super) registry: Registry,
    pub(super) output: LineEngine<'a>,
    /// Start columns of `##<` comments already written, for aligning the
    /// ones that follow.
    pub(super) columns: HashMap<NodeId, usize>,
}

/// The state of one rule application: which node, how far through its
/// grammar children we are, and the indentation and hints it was given.
pub(super) struct Context {
    pub(super) node: NodeId,
    pub(super) cursor: usize,
    pub(super) indent: usize,
    pub(super) hints: Hints,
}

impl<'a> Formatter<'a> {
    fn lookup(&mut self, node: NodeId) -> Rule {
        let tree = self.tree;
        // Token nodes never get a construct rule; a variable called `decl`
        // is not a declaration.
        match tree.name(node) {
            Some(kind) => self
                .registry
                .resolve(kind),
            None => Rule::Default,
        }
    }

    pub(super) fn visit(&mut self, node: NodeId, indent: usize, hints: Hints) -> Outcome {
        let rule = self.lookup(node);

        let mut cx = Context {
            node,
            cursor: 0,
            indent,
            hints,
        };
        if rule.is_comment() {
            cx.hints |= Hints::ZERO_WIDTH;
        }

        trace!(
            "{} {} as {:?} at indent {}",
            node,
            self.tree
                .kind(node),
            rule,
            indent
        );

        match rule {
            Rule::Default => self.default(&mut cx),
            Rule::Null => Ok(()),
            Rule::Line => self.line(&mut cx),
            Rule::SpaceSeparated => self.space_separated(&mut cx),
            Rule::PreprocDirective => self.preproc_directive(&mut cx),
            Rule::ModuleDecl => self.module_decl(&mut cx),
            Rule::ExportDecl => self.export_decl(&mut cx),
            Rule::GlobalDecl => self.global_decl(&mut cx),
            Rule::Initializer => self.initializer(&mut cx),
            Rule::Init => self.init(&mut cx),
            Rule::RedefEnumDecl => self.redef_enum_decl(&mut cx),
            Rule::RedefRecordDecl => self.redef_record_decl(&mut cx),
            Rule::TypeDecl => self.type_decl(&mut cx),
            Rule::Type => self.type_(&mut cx),
            Rule::TypeSpec => self.type_spec(&mut cx),
            Rule::EnumBody => self.enum_body(&mut cx),
            Rule::FuncDecl => self.func_decl(&mut cx),
            Rule::FuncHdr => self.func_hdr(&mut cx),
            Rule::FuncHdrVariant => self.func_hdr_variant(&mut cx),
            Rule::FuncParams => self.func_params(&mut cx),
            Rule::FuncBody => self.func_body(&mut cx),
            Rule::FormalArgs => self.formal_args(&mut cx),
            Rule::FormalArg => self.formal_arg(&mut cx),
            Rule::CaptureList => self.capture_list(&mut cx),
            Rule::Stmt => self.stmt(&mut cx),
            Rule::ExprList => self.expr_list(&mut cx),
            Rule::CaseList => self.case_list(&mut cx),
            Rule::CaseTypeList => self.case_type_list(&mut cx),
            Rule::EventHdr => self.event_hdr(&mut cx),
            Rule::Expr => self.expr(&mut cx),
            Rule::Nl => self.nl(&mut cx),
            Rule::Attr => self.attr(&mut cx),
            Rule::MinorComment => self.minor_comment(&mut cx),
            Rule::ZeekygenComment => self.zeekygen_comment(&mut cx),
            Rule::ZeekygenPrevComment => self.zeekygen_prev_comment(&mut cx),
        }
    }

    // Looking at children without consuming them

    pub(super) fn remaining(&self, cx: &Context) -> usize {
        self.tree
            .children(cx.node)
            .len()
            .saturating_sub(cx.cursor)
    }

    pub(super) fn peek(&self, cx: &Context, offset: usize) -> Option<NodeId> {
        self.tree
            .children(cx.node)
            .get(cx.cursor + offset)
            .copied()
    }

    /// Kind of the upcoming child, if it is a named node.
    pub(super) fn peek_name(&self, cx: &Context, offset: usize) -> Option<&'a str> {
        let tree: &'a SyntaxTree = self.tree;
        self.peek(cx, offset)
            .and_then(|child| tree.name(child))
    }

    /// Literal of the upcoming child, if it is a token.
    pub(super) fn peek_token(&self, cx: &Context, offset: usize) -> Option<&'a str> {
        let tree: &'a SyntaxTree = self.tree;
        self.peek(cx, offset)
            .and_then(|child| tree.token(child))
    }

    // Formatting children

    /// Format the next grammar child together with the extras riding along
    /// with it. Hints apply to the child itself, never to its extras. Does
    /// nothing once the children are used up.
    pub(super) fn format_child(&mut self, cx: &mut Context, indent: bool, hints: Hints) -> Outcome {
        let child = match self.peek(cx, 0) {
            Some(child) => child,
            None => return Ok(()),
        };
        cx.cursor += 1;

        let tree = self.tree;
        let level = cx.indent + usize::from(indent);

        for &extra in tree.prev_extras(child) {
            self.visit(extra, level, Hints::empty())?;
        }
        self.visit(child, level, hints)?;
        for &extra in tree.next_extras(child) {
            self.visit(extra, level, Hints::empty())?;
        }
        Ok(())
    }

    pub(super) fn child(&mut self, cx: &mut Context) -> Outcome {
        self.format_child(cx, false, Hints::empty())
    }

    pub(super) fn child_with(&mut self, cx: &mut Context, hints: Hints) -> Outcome {
        self.format_child(cx, false, hints)
    }

    pub(super) fn child_indented(&mut self, cx: &mut Context) -> Outcome {
        self.format_child(cx, true, Hints::empty())
    }

    /// Format a run of children with no line break allowed anywhere
    /// inside it. `first` is added to the first child's hints only.
    pub(super) fn child_range(&mut self, cx: &mut Context, count: usize, hints: Hints, first: Hints) -> Outcome {
        match count {
            0 => Ok(()),
            1 => self.child_with(cx, hints | first),
            _ => {
                self.child_with(cx, hints | first | Hints::NO_BREAK_AFTER)?;
                for _ in 0..count - 2 {
                    self.child_with(cx, hints | Hints::NO_BREAK_AFTER)?;
                }
                self.child_with(cx, hints)
            }
        }
    }

    /// Format all remaining children, with an optional separator between
    /// them. The node's own hints go to the first child.
    pub(super) fn children(&mut self, cx: &mut Context, separator: Option<&str>) -> Outcome {
        if self.remaining(cx) > 0 {
            let hints = cx.hints;
            self.child_with(cx, hints)?;
        }
        while self.remaining(cx) > 0 {
            if let Some(separator) = separator {
                self.write(cx, separator)?;
            }
            self.child(cx)?;
        }
        Ok(())
    }

    // Writing output

    /// Write text with the hints of the current rule. At the start of a
    /// line this indents first and drops any leading whitespace.
    pub(super) fn write(&mut self, cx: &Context, text: &str) -> Outcome {
        let mut text = text;
        if !text.starts_with(NL) && self.write_indent(cx)? {
            text = text.trim_start();
        }
        if !text.is_empty() {
            self.output
                .write(text, cx.hints)?;
        }
        Ok(())
    }

    pub(super) fn write_indent(&mut self, cx: &Context) -> Result<bool, FormatError> {
        Ok(self
            .output
            .write_indent(cx.indent, cx.hints)?)
    }

    pub(super) fn space(&mut self, cx: &Context) -> Outcome {
        self.write(cx, " ")
    }

    pub(super) fn spaces(&mut self, cx: &Context, count: usize) -> Outcome {
        self.write(cx, &" ".repeat(count))
    }

    pub(super) fn newline(&mut self, cx: &Context) -> Outcome {
        self.line_break(cx, false, false)
    }

    /// End the current line. Unless forced, a line holding nothing yet is
    /// left alone, so that consecutive requests collapse into one break.
    /// Either way the request sets whether the next line continues an
    /// interrupted one.
    pub(super) fn line_break(&mut self, cx: &Context, force: bool, midline: bool) -> Outcome {
        if !force
            && self
                .output
                .is_blank()
        {
            self.output
                .discard();
        } else {
            self.write(cx, NL)?;
        }
        self.output
            .set_space_align(midline);
        Ok(())
    }

    /// Write the node's own text.
    pub(super) fn token(&mut self, cx: &Context) -> Outcome {
        let tree = self.tree;
        self.write(cx, tree.text(cx.node))
    }

    // Generic rules

    fn default(&mut self, cx: &mut Context) -> Outcome {
        if self.remaining(cx) > 0 {
            self.children(cx, Some(" "))
        } else {
            self.token(cx)
        }
    }

    pub(super) fn space_separated(&mut self, cx: &mut Context) -> Outcome {
        self.default(cx)
    }

    fn line(&mut self, cx: &mut Context) -> Outcome {
        if self.remaining(cx) > 0 {
            self.children(cx, Some(" "))?;
            self.newline(cx)
        } else {
            self.token(cx)
        }
    }

    /// `@if` and friends stay at the left margin and are never wrapped.
    fn preproc_directive(&mut self, cx: &mut Context) -> Outcome {
        self.output
            .set_tab_indent(false);
        self.output
            .set_linebreaks(false);
        let result = self.line(cx);
        self.output
            .set_tab_indent(true);
        self.output
            .set_linebreaks(true);
        result
    }
}
