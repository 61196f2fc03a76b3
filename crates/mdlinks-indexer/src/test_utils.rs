//! Test utilities for building markdown fixture trees

use std::fs;
use tempfile::TempDir;

/// Create a small documentation tree with cross links, a broken link and a
/// link that leaves the tree.
pub fn create_docs_repo() -> TempDir {
    create_repo_with_structure(&[
        (
            "README.md",
            "# Project\n\nStart with [the guide](docs/guide.md).\nAlso [faq](docs/faq.md)\n",
        ),
        (
            "docs/guide.md",
            "# Guide\nBack to [readme](../README.md)\n\nSee [api](api/index.md) and [gone](missing.md).\n",
        ),
        ("docs/faq.md", "# FAQ\nNothing linked here.\n"),
        (
            "docs/api/index.md",
            "[guide](../guide.md)\n[outside](../../../elsewhere.md)\n",
        ),
        ("notes.txt", "[not scanned](README.md)\n"),
    ])
}

/// Create a repository with a specific file structure
pub fn create_repo_with_structure(structure: &[(&str, &str)]) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    for (path, content) in structure {
        let full_path = root.join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }

        fs::write(&full_path, content).unwrap();
    }

    temp_dir
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_docs_repo() {
        let temp_dir = create_docs_repo();
        let root = temp_dir.path();

        assert!(root.join("README.md").exists());
        assert!(root.join("docs/guide.md").exists());
        assert!(root.join("docs/api/index.md").exists());
        assert!(root.join("notes.txt").exists());
    }
}
