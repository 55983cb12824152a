//! Walking and printing syntax trees

use std::io::{self, Write};

use crate::syntax::tree::*;

/// Depth-first, left-to-right walk yielding each node with its nesting
/// level. When extras are included they appear immediately around the node
/// they are attached to, at the same level.
pub struct Traverse<'t> {
    tree: &'t SyntaxTree,
    include_cst: bool,
    stack: Vec<(NodeId, usize, bool)>,
}

impl<'t> Iterator for Traverse<'t> {
    type Item = (NodeId, usize);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (id, nesting, expand) = self
                .stack
                .pop()?;

            if !expand {
                return Some((id, nesting));
            }

            // Pushed in reverse: leading extras, the node, trailing extras,
            // then the children.
            for &child in self
                .tree
                .children(id)
                .iter()
                .rev()
            {
                self.stack
                    .push((child, nesting + 1, true));
            }

            if self.include_cst {
                for &extra in self
                    .tree
                    .next_extras(id)
                    .iter()
                    .rev()
                {
                    self.stack
                        .push((extra, nesting, false));
                }
            }

            self.stack
                .push((id, nesting, false));

            if self.include_cst {
                for &extra in self
                    .tree
                    .prev_extras(id)
                    .iter()
                    .rev()
                {
                    self.stack
                        .push((extra, nesting, false));
                }
            }
        }
    }
}

impl SyntaxTree {
    pub fn traverse(&self, include_cst: bool) -> Traverse<'_> {
        Traverse {
            tree: self,
            include_cst,
            stack: vec![(self.root, 0, true)],
        }
    }

    /// Render one node of the tree dump.
    pub fn describe(&self, id: NodeId, nesting: usize) -> String {
        let marker = match self.role(id) {
            Role::Grammar => "",
            Role::Leading => "v ",
            Role::Trailing => "^ ",
        };

        let mut line = format!(
            "{}{}{} ({},{})",
            " ".repeat(4 * nesting),
            marker,
            self.kind(id),
            self.start_point(id),
            self.end_point(id)
        );

        if self.is_named(id) {
            let text = self.text(id);
            let mut end = text
                .len()
                .min(100);
            while !text.is_char_boundary(end) {
                end -= 1;
            }
            line.push(' ');
            line.push_str(&format!("{:?}", &text[..end]));
        }

        line
    }

    /// Write the tree out, one node per line, indented by depth.
    pub fn write_tree(&self, out: &mut dyn Write, include_cst: bool) -> io::Result<()> {
        for (id, nesting) in self.traverse(include_cst) {
            writeln!(out, "{}", self.describe(id, nesting))?;
        }
        Ok(())
    }
}
