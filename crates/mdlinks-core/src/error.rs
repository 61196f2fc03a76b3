//! Error type shared by the core and indexer crates

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, LinkGraphError>;

#[derive(Error, Debug)]
pub enum LinkGraphError {
    /// Directory enumeration or file read failed.
    #[error("error while walking {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A link target is not valid percent-encoded text.
    #[error("cannot decode link target {target:?}: {reason}")]
    Decode { target: String, reason: String },

    /// The extractor produced a match that its pattern cannot produce.
    #[error("internal invariant violated: {0}")]
    InternalInvariant(String),

    #[error("No file found: {0}")]
    NotFound(String),

    /// Two paths have no relative path between them.
    #[error("can't make {} relative to {}", target.display(), base.display())]
    Unrelated { base: PathBuf, target: PathBuf },

    #[error("invalid config {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },
}

impl LinkGraphError {
    /// `NotFound` is the only kind the CLI reports without treating it as a failure of the run.
    pub fn is_not_found(&self) -> bool {
        matches!(self, LinkGraphError::NotFound(_))
    }
}
