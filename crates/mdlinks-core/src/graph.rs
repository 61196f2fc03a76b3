//! Graph store: path registry over a petgraph::StableDiGraph arena

use crate::error::{LinkGraphError, Result};
use crate::model::*;
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableDiGraph};
use std::collections::BTreeMap;

/// The mentions graph. Node weights are [`Node`]s, edge weights are [`Link`]s.
///
/// Nodes are created lazily and never removed, so every `NodeId`/`LinkId`
/// handed out stays valid for the life of the graph. The registry is a
/// `BTreeMap` so iteration is sorted by path.
pub struct Graph {
    inner: StableDiGraph<Node, Link>,
    registry: BTreeMap<String, NodeId>,
}

impl std::fmt::Debug for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Graph")
            .field("node_count", &self.inner.node_count())
            .field("link_count", &self.inner.edge_count())
            .finish()
    }
}

impl Graph {
    pub fn new() -> Self {
        Graph {
            inner: StableDiGraph::new(),
            registry: BTreeMap::new(),
        }
    }

    /// Return the node for `path`, creating an empty one on first reference.
    pub fn get_or_create(&mut self, path: &str) -> NodeId {
        if let Some(&id) = self.registry.get(path) {
            return id;
        }
        let idx = self.inner.add_node(Node::new(path));
        let id = NodeId(idx.index() as u32);
        self.registry.insert(path.to_string(), id);
        tracing::trace!("created node {} for {}", id.0, path);
        id
    }

    /// Flag a node as a file the builder actually read.
    pub fn mark_scanned(&mut self, id: NodeId) {
        if let Some(node) = self.inner.node_weight_mut(node_index(id)) {
            node.scanned = true;
        }
    }

    /// Store a link and register it on both endpoints.
    pub fn record_link(
        &mut self,
        from: NodeId,
        to: NodeId,
        row: usize,
        column: usize,
        text: String,
        context: Vec<String>,
    ) -> Result<LinkId> {
        for id in [from, to] {
            if !self.inner.contains_node(node_index(id)) {
                return Err(LinkGraphError::InternalInvariant(format!(
                    "link endpoint {} is not in the graph",
                    id.0
                )));
            }
        }

        let link = Link {
            source: from,
            target: to,
            row,
            column,
            text,
            context,
        };
        let idx = self.inner.add_edge(node_index(from), node_index(to), link);
        let link_id = LinkId(idx.index() as u32);

        if let Some(node) = self.inner.node_weight_mut(node_index(from)) {
            node.outbound.push(link_id);
        }
        if let Some(node) = self.inner.node_weight_mut(node_index(to)) {
            node.inbound.push(link_id);
        }
        Ok(link_id)
    }

    /// Get a node by ID.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.inner.node_weight(node_index(id))
    }

    /// Get a link by ID.
    pub fn link(&self, id: LinkId) -> Option<&Link> {
        self.inner.edge_weight(EdgeIndex::new(id.0 as usize))
    }

    /// Look up a node by canonical path.
    pub fn find(&self, path: &str) -> Option<NodeId> {
        self.registry.get(path).copied()
    }

    /// Total number of nodes, orphans included.
    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    /// Total number of links.
    pub fn link_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Registry entries as `(key, id)`, sorted by key.
    pub fn entries(&self) -> impl Iterator<Item = (&str, NodeId)> {
        self.registry.iter().map(|(path, &id)| (path.as_str(), id))
    }

    /// All nodes, sorted by path.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.registry
            .values()
            .filter_map(move |&id| self.node(id).map(|node| (id, node)))
    }

    /// All links, in creation order.
    pub fn links(&self) -> impl Iterator<Item = (LinkId, &Link)> {
        self.inner
            .edge_indices()
            .filter_map(move |idx| {
                self.inner
                    .edge_weight(idx)
                    .map(|link| (LinkId(idx.index() as u32), link))
            })
    }

    /// Links pointing at `id`, in the order they were recorded.
    pub fn inbound(&self, id: NodeId) -> impl Iterator<Item = &Link> {
        self.node(id)
            .into_iter()
            .flat_map(|node| node.inbound.iter())
            .filter_map(move |&link_id| self.link(link_id))
    }

    /// Links leaving `id`, in the order they were recorded.
    pub fn outbound(&self, id: NodeId) -> impl Iterator<Item = &Link> {
        self.node(id)
            .into_iter()
            .flat_map(|node| node.outbound.iter())
            .filter_map(move |&link_id| self.link(link_id))
    }

    /// Nodes that were never scanned as source files, sorted by path.
    pub fn orphans(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes().filter(|(_, node)| node.is_orphan())
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

fn node_index(id: NodeId) -> NodeIndex {
    NodeIndex::new(id.0 as usize)
}
