//! mdlinks CLI entry point

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "mdlinks")]
#[command(about = "Find which markdown files mention which", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Root directory to scan (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    root: PathBuf,

    /// Only report files that link to this file (relative to the current directory)
    #[arg(short, long)]
    link_to: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Also list link targets that were never scanned
    #[arg(long)]
    orphans: bool,

    /// Walk configuration file (defaults to mdlinks.toml in the root)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print TARGET relative to BASE (BASE defaults to the current directory)
    Rel {
        /// [BASE] TARGET
        #[arg(required = true, num_args = 1..=2)]
        paths: Vec<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries the report
    let filter = if cli.verbose {
        EnvFilter::new("mdlinks=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mdlinks=info"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!("mdlinks v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Some(Commands::Rel { paths }) => commands::rel(&paths),
        None => commands::report(commands::ReportOptions {
            root: cli.root,
            link_to: cli.link_to.filter(|p| !p.as_os_str().is_empty()),
            format: cli.format,
            orphans: cli.orphans,
            config: cli.config,
        }),
    }
}
