//! mdlinks core — link graph model, path resolution and reports

pub mod context;
pub mod error;
pub mod extract;
pub mod graph;
pub mod model;
pub mod paths;
pub mod report;


pub use context::{context_lines, window};
pub use error::{LinkGraphError, Result};
pub use extract::{extract_links, RawLink};
pub use graph::Graph;
pub use model::{Link, LinkId, Node, NodeId};
pub use paths::{canonical_query, canonical_source, relative_path, resolve};
pub use report::{all_reports, describe_all, describe_inbound, describe_orphans, inbound_report, NodeReport};
