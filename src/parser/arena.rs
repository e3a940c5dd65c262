//! Node arena
//!
//! Every node built during one parse is allocated here and addressed by
//! [`NodeId`]. Children always exist before their parent, so links only ever
//! point to lower ids.
//!
//! The arena decides how nodes are released:
//! - on success, [`NodeArena::into_tree`] moves the nodes into an owned
//!   [`ParseTreeNode`] whose links own the children;
//! - on failure, [`NodeArena::release`] drops the pool as a flat list without
//!   following any link, since a half-built tree may not be consistent.

use tracing::trace;

use super::ast::ParseTreeNode;
use super::lexer::{Token, TokenKind};

const INITIAL_CAPACITY: usize = 100;

/// Index of a node in a [`NodeArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeId(usize);

#[derive(Debug)]
struct ArenaNode {
    op: TokenKind,
    text: Option<String>,
    left: Option<NodeId>,
    right: Option<NodeId>,
    depth: usize,
}

#[derive(Debug)]
pub struct NodeArena {
    nodes: Vec<ArenaNode>,
}

impl Default for NodeArena {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeArena {
    pub fn new() -> Self {
        Self {
            nodes: Vec::with_capacity(INITIAL_CAPACITY),
        }
    }

    fn alloc(&mut self, node: ArenaNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    pub fn make_node(&mut self, op: TokenKind, left: Option<NodeId>, right: Option<NodeId>) -> NodeId {
        let depth = 1 + self.child_depth(left).max(self.child_depth(right));
        self.alloc(ArenaNode {
            op,
            text: None,
            left,
            right,
            depth,
        })
    }

    /// Leaf node taking the token's kind and text.
    pub fn make_terminal(&mut self, token: Token) -> NodeId {
        self.alloc(ArenaNode {
            op: token.kind,
            text: token.text,
            left: None,
            right: None,
            depth: 1,
        })
    }

    pub fn set_text(&mut self, id: NodeId, text: String) {
        self.nodes[id.0].text = Some(text);
    }

    /// Height of the subtree rooted at `id`.
    pub fn depth(&self, id: NodeId) -> usize {
        self.nodes[id.0].depth
    }

    fn child_depth(&self, child: Option<NodeId>) -> usize {
        child.map_or(0, |id| self.depth(id))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Hand the subtree rooted at `root` over to an owned tree.
    ///
    /// Nodes are visited in allocation order, which is children-first, so no
    /// recursion is needed. Nodes not reachable from `root` are dropped with the
    /// arena. Returns the tree and the number of such unreachable nodes.
    pub fn into_tree(self, root: NodeId) -> (ParseTreeNode, usize) {
        let mut built: Vec<Option<ParseTreeNode>> = Vec::with_capacity(self.nodes.len());

        for node in self.nodes {
            let left = node.left.and_then(|id| built[id.0].take()).map(Box::new);
            let right = node.right.and_then(|id| built[id.0].take()).map(Box::new);
            built.push(Some(ParseTreeNode {
                op: node.op,
                text: node.text,
                left,
                right,
            }));
        }

        let tree = built[root.0]
            .take()
            .expect("parse tree root was linked under another node");
        let unreachable = built.iter().filter(|slot| slot.is_some()).count();
        if unreachable > 0 {
            trace!(unreachable, "released nodes outside the parse tree");
        }
        (tree, unreachable)
    }

    /// Drop every node without following links. Returns how many were freed.
    pub fn release(self) -> usize {
        let freed = self.nodes.len();
        trace!(freed, "released node arena");
        freed
    }
}
