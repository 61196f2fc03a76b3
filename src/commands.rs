//! CLI command implementations

use crate::Format;
use anyhow::{bail, Context};
use mdlinks_core::paths::clean;
use mdlinks_core::{
    all_reports, canonical_query, describe_all, describe_inbound, describe_orphans,
    inbound_report, relative_path, LinkGraphError, NodeId, NodeReport,
};
use mdlinks_indexer::{BuildOutput, GraphBuilder, WalkConfig};
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

pub struct ReportOptions {
    pub root: PathBuf,
    pub link_to: Option<PathBuf>,
    pub format: Format,
    pub orphans: bool,
    pub config: Option<PathBuf>,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    files_scanned: usize,
    node_count: usize,
    reports: Vec<NodeReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    orphans: Option<Vec<&'a str>>,
}

#[derive(Serialize)]
struct JsonError {
    error: String,
}

/// Build the graph under `root` and print inbound-link reports.
pub fn report(opts: ReportOptions) -> anyhow::Result<ExitCode> {
    let cwd = std::env::current_dir().context("cannot read current directory")?;
    let root = clean(&cwd.join(&opts.root));
    tracing::info!("Scanning {}", root.display());

    let config = match &opts.config {
        Some(path) => WalkConfig::load(&cwd.join(path))?,
        None => WalkConfig::discover(&root)?,
    };
    let output = GraphBuilder::new(config)
        .build(&root)
        .context("Error while walking")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let target = match &opts.link_to {
        Some(link_to) => {
            let key = canonical_query(&root, &cwd, link_to)
                .with_context(|| format!("Failed to normalize link-to: {}", link_to.display()))?;
            match output.graph.find(&key) {
                Some(id) => Some(id),
                None => {
                    let message = LinkGraphError::NotFound(key).to_string();
                    match opts.format {
                        Format::Text => writeln!(out, "{message}")?,
                        Format::Json => {
                            let body = JsonError { error: message };
                            serde_json::to_writer_pretty(&mut out, &body)?;
                            writeln!(out)?;
                        }
                    }
                    out.flush()?;
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        None => None,
    };

    match opts.format {
        Format::Text => write_text(&output, target, opts.orphans, &mut out)?,
        Format::Json => write_json(&output, target, opts.orphans, &mut out)?,
    }
    out.flush()?;
    Ok(ExitCode::SUCCESS)
}

fn write_text<W: Write>(
    output: &BuildOutput,
    target: Option<NodeId>,
    orphans: bool,
    out: &mut W,
) -> anyhow::Result<()> {
    let graph = &output.graph;
    match target {
        Some(id) => describe_inbound(graph, id, out)?,
        None => describe_all(graph, out)?,
    }
    if orphans {
        describe_orphans(graph, out)?;
    }
    Ok(())
}

fn write_json<W: Write>(
    output: &BuildOutput,
    target: Option<NodeId>,
    orphans: bool,
    out: &mut W,
) -> anyhow::Result<()> {
    let graph = &output.graph;
    let reports = match target {
        Some(id) => inbound_report(graph, id).into_iter().collect(),
        None => all_reports(graph),
    };
    let json = JsonOutput {
        files_scanned: output.files_scanned,
        node_count: graph.node_count(),
        reports,
        orphans: orphans.then(|| {
            graph
                .orphans()
                .map(|(_, node)| node.path.as_str())
                .collect()
        }),
    };
    serde_json::to_writer_pretty(&mut *out, &json)?;
    writeln!(out)?;
    Ok(())
}

/// Print `target` relative to `base`; with a single path, `base` is the current directory.
pub fn rel(paths: &[PathBuf]) -> anyhow::Result<ExitCode> {
    let cwd = std::env::current_dir().context("cannot read current directory")?;
    let (base, target) = match paths {
        [target] => (cwd.clone(), cwd.join(target)),
        [base, target] => (base.clone(), target.clone()),
        _ => bail!("usage: mdlinks rel [BASE] TARGET"),
    };
    let relative = relative_path(&base, &target)?;
    println!("{}", relative.display());
    Ok(ExitCode::SUCCESS)
}
