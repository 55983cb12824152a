//! Newlines and comments

use crate::formatting::formatter::{Context, Formatter, Outcome};

impl<'a> Formatter<'a> {
    /// Newlines in the input never end lines by themselves; the rules do
    /// that. What survives of them is blank lines: a run of two or more
    /// becomes a single blank line, except at the start or end of a
    /// sequence of siblings.
    pub(super) fn nl(&mut self, cx: &mut Context) -> Outcome {
        let tree = self.tree;
        let node = cx.node;

        // Only the last newline of a run acts, and not at the end.
        match tree.next_cst(node) {
            Some(next) if tree.is_nl(next) || tree.token(next) == Some("}") => return Ok(()),
            Some(_) => {}
            None => return Ok(()),
        }

        let mut start = node;
        while let Some(prev) = tree.prev_cst(start) {
            if !tree.is_nl(prev) {
                break;
            }
            start = prev;
        }

        if start == node {
            return Ok(());
        }

        match tree.prev_cst(start) {
            Some(before) if tree.token(before) != Some("{") => self.line_break(cx, true, false),
            _ => Ok(()),
        }
    }

    pub(super) fn minor_comment(&mut self, cx: &mut Context) -> Outcome {
        let tree = self.tree;

        // A comment owns its line when nothing precedes it on that line.
        let owns_line = match tree.prev_cst(cx.node) {
            Some(prev) => tree.is_nl(prev),
            None => true,
        };

        if !owns_line {
            self.space(cx)?;
        }
        self.token(cx)?;
        self.line_break(cx, false, !owns_line)
    }

    pub(super) fn zeekygen_comment(&mut self, cx: &mut Context) -> Outcome {
        self.token(cx)?;
        self.newline(cx)
    }

    /// `##<` comments document what comes before them. Consecutive ones
    /// start in the same column.
    pub(super) fn zeekygen_prev_comment(&mut self, cx: &mut Context) -> Outcome {
        let tree = self.tree;

        // Nothing else may come first on the line to trigger indentation.
        self.write_indent(cx)?;

        let previous = tree
            .find_prev_cst(cx.node, |tree, node| !tree.is_nl(node))
            .filter(|&node| tree.is_zeekygen_prev_comment(node))
            .and_then(|node| {
                self.columns
                    .get(&node)
                    .copied()
            });

        let column = self
            .output
            .column();
        match previous {
            Some(target) if target > column => self.spaces(cx, target - column)?,
            _ => self.space(cx)?,
        }

        let column = self
            .output
            .column();
        self.columns
            .insert(cx.node, column);

        self.token(cx)?;

        let continues = tree
            .next_cst(cx.node)
            .filter(|&next| tree.is_nl(next))
            .and_then(|next| tree.next_cst(next))
            .is_some_and(|next| tree.is_zeekygen_prev_comment(next));
        if continues {
            self.newline(cx)?;
        }
        Ok(())
    }
}
