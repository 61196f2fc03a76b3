//! Core data structures for the link graph

use serde::Serialize;

/// Index of a node in the graph arena. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(pub u32);

/// Index of a link in the graph arena. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct LinkId(pub u32);

/// One markdown file, keyed by its canonical root-relative path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub path: String,
    /// Links this file makes, in scan order.
    pub outbound: Vec<LinkId>,
    /// Links other files make to this one, in scan order.
    pub inbound: Vec<LinkId>,
    /// False for orphans: nodes that exist only because something links to them.
    pub scanned: bool,
}

impl Node {
    pub fn new(path: impl Into<String>) -> Self {
        Node {
            path: path.into(),
            outbound: Vec::new(),
            inbound: Vec::new(),
            scanned: false,
        }
    }

    pub fn is_orphan(&self) -> bool {
        !self.scanned
    }
}

/// One directed mention: `source` links to `target` at `row`/`column`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub source: NodeId,
    pub target: NodeId,
    /// 0-based line index in the source file.
    pub row: usize,
    /// 0-based character offset of the opening `[`.
    pub column: usize,
    /// Display text between the brackets.
    pub text: String,
    /// Raw lines around the mention.
    pub context: Vec<String>,
}
