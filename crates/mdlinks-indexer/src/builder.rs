//! Walks a directory tree and builds the mentions graph

use crate::config::WalkConfig;
use ignore::WalkBuilder;
use mdlinks_core::{
    canonical_source, context_lines, extract_links, resolve, Graph, LinkGraphError, Result,
};
use std::path::Path;
use tracing::{debug, info, warn};

/// Result of a build: the graph and how many markdown files were read.
///
/// `graph.node_count() >= files_scanned`; the difference is the orphan count.
#[derive(Debug)]
pub struct BuildOutput {
    pub graph: Graph,
    pub files_scanned: usize,
}

impl BuildOutput {
    pub fn orphan_count(&self) -> usize {
        self.graph.orphans().count()
    }
}

pub struct GraphBuilder {
    config: WalkConfig,
}

impl GraphBuilder {
    pub fn new(config: WalkConfig) -> Self {
        GraphBuilder { config }
    }

    /// Scan every `*.md` file under `root` and record its links.
    ///
    /// The first walk, read or decode error aborts the build.
    pub fn build(&self, root: &Path) -> Result<BuildOutput> {
        let mut graph = Graph::new();
        let mut files_scanned = 0usize;

        let mut walker = WalkBuilder::new(root);
        walker
            .standard_filters(false)
            .follow_links(self.config.follow_links)
            .max_depth(self.config.max_depth)
            .sort_by_file_name(|a, b| a.cmp(b));

        for entry in walker.build() {
            let entry = entry.map_err(|e| walk_error(root, e))?;
            if entry.file_type().is_none_or(|ft| ft.is_dir()) {
                continue;
            }
            if !is_markdown(entry.path()) {
                continue;
            }

            files_scanned += 1;
            self.scan_file(root, entry.path(), &mut graph)?;
        }

        let output = BuildOutput {
            graph,
            files_scanned,
        };
        debug!(
            "{} node(s) were linked to but never scanned",
            output.orphan_count()
        );
        info!(
            "Scanned {} markdown files: {} nodes, {} links",
            output.files_scanned,
            output.graph.node_count(),
            output.graph.link_count()
        );
        Ok(output)
    }

    fn scan_file(&self, root: &Path, path: &Path, graph: &mut Graph) -> Result<()> {
        let bytes = std::fs::read(path).map_err(|source| LinkGraphError::Walk {
            path: path.to_path_buf(),
            source,
        })?;
        let content = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => {
                warn!("{} is not valid UTF-8, decoding lossily", path.display());
                String::from_utf8_lossy(e.as_bytes()).into_owned()
            }
        };

        let source_key = canonical_source(root, path)?;
        debug!("Scanning {}", source_key);
        let source = graph.get_or_create(&source_key);
        graph.mark_scanned(source);

        let lines: Vec<&str> = content.split('\n').collect();
        for (row, line) in lines.iter().enumerate() {
            for raw in extract_links(line)? {
                let target_key = resolve(root, path, &raw.target)?;
                let target = graph.get_or_create(&target_key);
                debug!(
                    "{}:{}:{} -> {}",
                    source_key, row, raw.column, target_key
                );
                graph.record_link(
                    source,
                    target,
                    row,
                    raw.column,
                    raw.text,
                    context_lines(&lines, row),
                )?;
            }
        }
        Ok(())
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new(WalkConfig::default())
    }
}

/// Case-sensitive `.md` suffix check on the file name.
pub fn is_markdown(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().ends_with(".md"))
}

fn walk_error(root: &Path, err: ignore::Error) -> LinkGraphError {
    let path = error_path(&err).unwrap_or(root).to_path_buf();
    let message = err.to_string();
    let source = err
        .into_io_error()
        .unwrap_or_else(|| std::io::Error::other(message));
    LinkGraphError::Walk { path, source }
}

fn error_path(err: &ignore::Error) -> Option<&Path> {
    match err {
        ignore::Error::WithPath { path, .. } => Some(path.as_path()),
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => {
            error_path(err)
        }
        ignore::Error::Loop { child, .. } => Some(child.as_path()),
        _ => None,
    }
}
