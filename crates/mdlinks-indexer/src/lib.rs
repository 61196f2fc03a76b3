//! Directory walking and graph building for markdown trees

pub mod builder;
pub mod config;


#[cfg(test)]
pub mod test_utils;

pub use builder::{is_markdown, BuildOutput, GraphBuilder};
pub use config::{WalkConfig, CONFIG_FILE};
