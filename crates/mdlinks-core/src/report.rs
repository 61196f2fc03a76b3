//! Inbound-link reports over a built graph

use crate::graph::Graph;
use crate::model::NodeId;
use serde::Serialize;
use std::io::{self, Write};

/// Serializable view of one node's inbound links.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeReport {
    pub path: String,
    pub mentions: Vec<Mention>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mention {
    pub source: String,
    pub row: usize,
    pub column: usize,
    pub text: String,
    pub context: Vec<ContextLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContextLine {
    pub line: usize,
    pub text: String,
}

/// Build the report for `id`. Returns `None` if the node does not exist.
pub fn inbound_report(graph: &Graph, id: NodeId) -> Option<NodeReport> {
    let node = graph.node(id)?;
    let mentions = graph
        .inbound(id)
        .map(|link| Mention {
            source: graph
                .node(link.source)
                .map(|n| n.path.clone())
                .unwrap_or_default(),
            row: link.row,
            column: link.column,
            text: link.text.clone(),
            context: link
                .context
                .iter()
                .enumerate()
                .map(|(i, text)| ContextLine {
                    line: link.row + i,
                    text: text.clone(),
                })
                .collect(),
        })
        .collect();
    Some(NodeReport {
        path: node.path.clone(),
        mentions,
    })
}

/// Reports for every node with at least one inbound link, sorted by path.
pub fn all_reports(graph: &Graph) -> Vec<NodeReport> {
    graph
        .nodes()
        .filter(|(_, node)| !node.inbound.is_empty())
        .filter_map(|(id, _)| inbound_report(graph, id))
        .collect()
}

/// Write the text report for `id`.
///
/// Fails with [`io::ErrorKind::NotFound`] if `id` is not in the graph.
pub fn describe_inbound<W: Write>(graph: &Graph, id: NodeId, out: &mut W) -> io::Result<()> {
    let report = inbound_report(graph, id).ok_or_else(|| {
        io::Error::new(io::ErrorKind::NotFound, format!("unknown node id {}", id.0))
    })?;
    write_report(&report, out)
}

/// Write text reports for every node with inbound links.
pub fn describe_all<W: Write>(graph: &Graph, out: &mut W) -> io::Result<()> {
    for report in all_reports(graph) {
        write_report(&report, out)?;
    }
    Ok(())
}

/// List nodes that were linked to but never scanned.
pub fn describe_orphans<W: Write>(graph: &Graph, out: &mut W) -> io::Result<()> {
    for (_, node) in graph.orphans() {
        writeln!(
            out,
            "{} (referenced by {} link(s), not scanned)",
            node.path,
            node.inbound.len()
        )?;
    }
    Ok(())
}

fn write_report<W: Write>(report: &NodeReport, out: &mut W) -> io::Result<()> {
    writeln!(out, "{} is mentioned in", report.path)?;
    for mention in &report.mentions {
        writeln!(out, "  {}", mention.source)?;
        for line in &mention.context {
            writeln!(out, "    {}: {}", line.line, line.text)?;
        }
    }
    Ok(())
}
