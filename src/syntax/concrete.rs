//! Ingesting a concrete syntax tree as produced by an external parser

use serde::Deserialize;
use tracing::debug;

use crate::syntax::tree::*;

/// One node of a concrete tree, before comments and newlines have been
/// separated from the grammar. Leaves carry their text; tokens (unnamed
/// nodes) default to their kind as text.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct ConcreteNode {
    pub kind: String,
    #[serde(default = "named_by_default")]
    pub named: bool,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub missing: bool,
    #[serde(default)]
    pub children: Vec<ConcreteNode>,
}

fn named_by_default() -> bool {
    true
}

impl ConcreteNode {
    /// A named node with children.
    pub fn named(kind: &str, children: Vec<ConcreteNode>) -> ConcreteNode {
        ConcreteNode {
            kind: kind.to_string(),
            named: true,
            text: None,
            missing: false,
            children,
        }
    }

    /// A named node without children, such as an identifier or constant.
    pub fn leaf(kind: &str, text: &str) -> ConcreteNode {
        ConcreteNode {
            kind: kind.to_string(),
            named: true,
            text: Some(text.to_string()),
            missing: false,
            children: Vec::new(),
        }
    }

    /// A literal token, whose kind is its own text.
    pub fn token(text: &str) -> ConcreteNode {
        ConcreteNode {
            kind: text.to_string(),
            named: false,
            text: None,
            missing: false,
            children: Vec::new(),
        }
    }

    pub fn newline() -> ConcreteNode {
        ConcreteNode::leaf("nl", "\n")
    }

    pub fn comment(kind: &str, text: &str) -> ConcreteNode {
        ConcreteNode::leaf(kind, text)
    }

    fn content(&self) -> &str {
        match &self.text {
            Some(text) => text,
            None if self.named => "",
            None => &self.kind,
        }
    }
}

impl SyntaxTree {
    /// Build the formatter's view of a concrete tree. The source text is
    /// reassembled from the leaves, separated by single spaces except next
    /// to newlines, so that every node's span points at its own text.
    pub fn from_concrete(root: ConcreteNode) -> SyntaxTree {
        let mut builder = Builder {
            source: String::new(),
            nodes: Vec::new(),
        };

        let root = builder.build(root, None);

        let mut tree = SyntaxTree {
            source: builder.source,
            nodes: builder.nodes,
            root,
        };
        tree.hoist_extras();

        debug!(
            "Built tree of {} node{} from {} bytes of source",
            tree.len(),
            if tree.len() == 1 { "" } else { "s" },
            tree.source
                .len()
        );

        tree
    }

    /// Trailing extras of an interior node really belong to the last thing
    /// written inside it, so push them down onto its last grammar child.
    /// Repeating this in preorder moves them all the way down to a token.
    fn hoist_extras(&mut self) {
        let order: Vec<NodeId> = self
            .traverse(false)
            .map(|(id, _)| id)
            .collect();

        for id in order {
            let last = match self.nodes[id.0]
                .children
                .last()
            {
                Some(&last) => last,
                None => continue,
            };

            if self.nodes[id.0]
                .next_extras
                .is_empty()
            {
                continue;
            }

            let moved = std::mem::take(&mut self.nodes[id.0].next_extras);
            self.nodes[id.0].next_cst = None;

            if let Some(&tail) = self.nodes[last.0]
                .next_extras
                .last()
            {
                self.nodes[tail.0].next_cst = Some(moved[0]);
                self.nodes[moved[0].0].prev_cst = Some(tail);
            }

            self.nodes[last.0]
                .next_extras
                .extend(moved);
        }
    }
}

struct Builder {
    source: String,
    nodes: Vec<Node>,
}

impl Builder {
    fn allocate(&mut self, node: Node) -> NodeId {
        self.nodes
            .push(node);
        NodeId(
            self.nodes
                .len()
                - 1,
        )
    }

    fn append_text(&mut self, text: &str) -> (usize, usize) {
        let newline = text.starts_with('\n');
        if !newline
            && !self
                .source
                .is_empty()
            && !self
                .source
                .ends_with('\n')
        {
            self.source
                .push(' ');
        }
        let start = self
            .source
            .len();
        self.source
            .push_str(text);
        (
            start,
            self.source
                .len(),
        )
    }

    fn build(&mut self, concrete: ConcreteNode, parent: Option<NodeId>) -> NodeId {
        let mut node = Node::new(&concrete.kind, concrete.named);
        node.is_missing = concrete.missing;
        node.parent = parent;

        if concrete
            .children
            .is_empty()
        {
            let (start, end) = self.append_text(concrete.content());
            node.start_byte = start;
            node.end_byte = end;
            return self.allocate(node);
        }

        let id = self.allocate(node);

        let mut all: Vec<NodeId> = Vec::new();
        let mut grammar: Vec<NodeId> = Vec::new();

        for child in concrete.children {
            let child = self.build(child, Some(id));

            if let Some(&previous) = all.last() {
                self.nodes[previous.0].next_cst = Some(child);
                self.nodes[child.0].prev_cst = Some(previous);
            }
            all.push(child);

            if !is_extra_kind(&self.nodes[child.0].kind) {
                grammar.push(child);
            }
        }

        let start = self.nodes[all[0].0].start_byte;
        let end = self.nodes[all[all.len() - 1].0].end_byte;

        // Only extras inside: house them under a placeholder that formats
        // to nothing, so they still get visited.
        if grammar.is_empty() {
            let mut null = Node::new("nullnode", true);
            null.parent = Some(id);
            null.start_byte = end;
            null.end_byte = end;
            let null = self.allocate(null);
            grammar.push(null);
            all.push(null);
        }

        self.attach_extras(&all, grammar.len());

        let node = &mut self.nodes[id.0];
        node.start_byte = start;
        node.end_byte = end;
        node.children = grammar;
        id
    }

    /// Decide, for each extra among a node's concrete children, which
    /// grammar child it travels with. Directly trailing comments (and the
    /// newline ending them) stay with the grammar child they follow, as
    /// does any run of `##<` comments; everything else leads into the next
    /// grammar child. Extras after the last grammar child all trail it.
    fn attach_extras(&mut self, all: &[NodeId], grammar: usize) {
        let mut remaining = grammar;
        let mut anchor: Option<NodeId> = None;
        let mut pending: Vec<NodeId> = Vec::new();
        let mut last: Option<NodeId> = None;

        for &child in all {
            let kind = self.nodes[child.0]
                .kind
                .clone();
            let extra = is_extra_kind(&kind);

            match anchor {
                Some(owner) if remaining == 0 => self.trail(owner, child),
                _ if !extra => {
                    remaining -= 1;
                    self.nodes[child.0].prev_extras = std::mem::take(&mut pending);
                    anchor = Some(child);
                }
                None => {
                    self.nodes[child.0].role = Role::Leading;
                    pending.push(child);
                }
                Some(owner) => {
                    let follows_grammar = last.is_some_and(|l| {
                        !is_extra_kind(&self.nodes[l.0].kind)
                    });
                    let follows_comment = last.is_some_and(|l| {
                        is_comment_kind(&self.nodes[l.0].kind)
                    });

                    if kind == "zeekygen_prev_comment"
                        || (kind == "minor_comment" && follows_grammar)
                        || (is_nl_kind(&kind) && follows_comment)
                    {
                        self.trail(owner, child);
                    } else {
                        anchor = None;
                        self.nodes[child.0].role = Role::Leading;
                        pending = vec![child];
                    }
                }
            }

            last = Some(child);
        }
    }

    fn trail(&mut self, owner: NodeId, extra: NodeId) {
        self.nodes[extra.0].role = Role::Trailing;
        self.nodes[owner.0]
            .next_extras
            .push(extra);
    }
}
