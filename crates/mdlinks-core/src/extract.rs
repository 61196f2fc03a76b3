//! Inline markdown link extraction

use crate::error::{LinkGraphError, Result};
use regex::Regex;
use std::sync::LazyLock;

/// `[text](target.md)`: text without `[`, target without `(` ending in `.md`.
static LINK_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([^\[]*)\]\(([^\(]*\.md)\)").expect("link pattern is a valid regex")
});

/// A link as it appears on a line, before resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLink {
    /// Display text between the brackets.
    pub text: String,
    /// Target between the parentheses, still percent-encoded.
    pub target: String,
    /// Character offset of the opening `[`.
    pub column: usize,
}

/// Find every markdown link on `line`, left to right.
pub fn extract_links(line: &str) -> Result<Vec<RawLink>> {
    let mut links = Vec::new();
    for caps in LINK_PATTERN.captures_iter(line) {
        let (whole, text, target) = match (caps.get(0), caps.get(1), caps.get(2)) {
            (Some(whole), Some(text), Some(target)) => (whole, text, target),
            _ => {
                return Err(LinkGraphError::InternalInvariant(format!(
                    "link match without both capture groups on line {line:?}"
                )))
            }
        };
        let column = line[..whole.start()].chars().count();
        links.push(RawLink {
            text: text.as_str().to_string(),
            target: target.as_str().to_string(),
            column,
        });
    }
    Ok(links)
}
