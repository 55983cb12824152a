//! Arena holding a parsed Zeek script as the formatter sees it

use std::fmt;

/// Index of a node within its SyntaxTree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Zero-based row and column of a byte offset in the source.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Point {
    pub row: usize,
    pub column: usize,
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.row, self.column)
    }
}

/// How a node hangs off its parent: as a member of the grammar, or as an
/// "extra" (comment, newline) riding along before or after one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Grammar,
    Leading,
    Trailing,
}

#[derive(Debug)]
pub struct Node {
    pub kind: String,
    pub is_named: bool,
    pub is_missing: bool,
    pub start_byte: usize,
    pub end_byte: usize,
    pub(crate) role: Role,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) prev_extras: Vec<NodeId>,
    pub(crate) next_extras: Vec<NodeId>,
    pub(crate) prev_cst: Option<NodeId>,
    pub(crate) next_cst: Option<NodeId>,
}

impl Node {
    pub(crate) fn new(kind: &str, is_named: bool) -> Node {
        Node {
            kind: kind.to_string(),
            is_named,
            is_missing: false,
            start_byte: 0,
            end_byte: 0,
            role: Role::Grammar,
            parent: None,
            children: Vec::new(),
            prev_extras: Vec::new(),
            next_extras: Vec::new(),
            prev_cst: None,
            next_cst: None,
        }
    }
}

/// A read-only syntax tree plus the source text its spans point into.
/// Grammar children and extras are kept apart: `children()` only ever
/// returns members of the grammar, while comments and newlines hang off
/// those members via `prev_extras()` and `next_extras()`.
#[derive(Debug)]
pub struct SyntaxTree {
    pub(crate) source: String,
    pub(crate) nodes: Vec<Node>,
    pub(crate) root: NodeId,
}

impl SyntaxTree {
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.nodes
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes
            .is_empty()
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn kind(&self, id: NodeId) -> &str {
        &self
            .node(id)
            .kind
    }

    pub fn is_named(&self, id: NodeId) -> bool {
        self.node(id)
            .is_named
    }

    pub fn role(&self, id: NodeId) -> Role {
        self.node(id)
            .role
    }

    /// The source text covered by this node.
    pub fn text(&self, id: NodeId) -> &str {
        let node = self.node(id);
        &self.source[node.start_byte..node.end_byte]
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self
            .node(id)
            .children
    }

    pub fn prev_extras(&self, id: NodeId) -> &[NodeId] {
        &self
            .node(id)
            .prev_extras
    }

    pub fn next_extras(&self, id: NodeId) -> &[NodeId] {
        &self
            .node(id)
            .next_extras
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id)
            .parent
    }

    /// Preceding sibling in the concrete view, where comments and
    /// newlines count as siblings too.
    pub fn prev_cst(&self, id: NodeId) -> Option<NodeId> {
        self.node(id)
            .prev_cst
    }

    pub fn next_cst(&self, id: NodeId) -> Option<NodeId> {
        self.node(id)
            .next_cst
    }

    /// Walk backwards through concrete siblings until one satisfies the
    /// predicate.
    pub fn find_prev_cst(
        &self,
        id: NodeId,
        predicate: impl Fn(&SyntaxTree, NodeId) -> bool,
    ) -> Option<NodeId> {
        let mut current = self.prev_cst(id);
        while let Some(node) = current {
            if predicate(self, node) {
                return Some(node);
            }
            current = self.prev_cst(node);
        }
        None
    }

    /// The kind of a named node, or None for literal tokens.
    pub fn name(&self, id: NodeId) -> Option<&str> {
        let node = self.node(id);
        if node.is_named {
            Some(&node.kind)
        } else {
            None
        }
    }

    /// The literal of a token node, or None for named nodes.
    pub fn token(&self, id: NodeId) -> Option<&str> {
        let node = self.node(id);
        if node.is_named {
            None
        } else {
            Some(&node.kind)
        }
    }

    pub fn is_nl(&self, id: NodeId) -> bool {
        is_nl_kind(self.kind(id))
    }

    pub fn is_comment(&self, id: NodeId) -> bool {
        is_comment_kind(self.kind(id))
    }

    pub fn is_minor_comment(&self, id: NodeId) -> bool {
        self.kind(id) == "minor_comment"
    }

    /// Documentation comments of the `##<` flavour, which describe the
    /// item before them.
    pub fn is_zeekygen_prev_comment(&self, id: NodeId) -> bool {
        self.kind(id) == "zeekygen_prev_comment"
    }

    pub fn is_extra(&self, id: NodeId) -> bool {
        is_extra_kind(self.kind(id))
    }

    /// Does the node, or one of its leading descendants (first child, its
    /// first child, and so on), satisfy the predicate? Lookahead such as
    /// "is this statement a {}-block" asks this of the next child.
    pub fn has_property(
        &self,
        id: NodeId,
        predicate: impl Fn(&SyntaxTree, NodeId) -> bool,
    ) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if predicate(self, node) {
                return true;
            }
            current = self
                .children(node)
                .first()
                .copied();
        }
        false
    }

    /// Row and column of a byte offset into the source.
    pub fn point(&self, offset: usize) -> Point {
        let before = &self.source[..offset.min(self.source.len())];
        let row = before
            .matches('\n')
            .count();
        let column = match before.rfind('\n') {
            Some(newline) => before.len() - newline - 1,
            None => before.len(),
        };
        Point { row, column }
    }

    pub fn start_point(&self, id: NodeId) -> Point {
        self.point(
            self.node(id)
                .start_byte,
        )
    }

    pub fn end_point(&self, id: NodeId) -> Point {
        self.point(
            self.node(id)
                .end_byte,
        )
    }
}

/// A predicate for has_property(): the node's first grammar child is the
/// given literal token.
pub fn leads_with(token: &str) -> impl Fn(&SyntaxTree, NodeId) -> bool + '_ {
    move |tree, node| {
        tree.children(node)
            .first()
            .and_then(|&child| tree.token(child))
            == Some(token)
    }
}

pub(crate) fn is_nl_kind(kind: &str) -> bool {
    kind == "nl"
}

pub(crate) fn is_comment_kind(kind: &str) -> bool {
    kind.ends_with("_comment")
}

pub(crate) fn is_extra_kind(kind: &str) -> bool {
    is_nl_kind(kind) || is_comment_kind(kind)
}
