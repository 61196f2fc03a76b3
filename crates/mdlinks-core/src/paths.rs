//! Link target resolution and root-relative path canonicalization
//!
//! Everything here is lexical: no function touches the filesystem, so a link
//! to a file that does not exist resolves exactly like one that does.

use crate::error::{LinkGraphError, Result};
use std::path::{Component, Path, PathBuf};

/// Resolve `raw_target`, found inside `source_file`, to a canonical path relative to `root`.
///
/// The target is percent-decoded, appended to the directory holding
/// `source_file` and expressed relative to `root` with `/` separators.
/// Targets that climb out of `root` keep their leading `..` segments.
pub fn resolve(root: &Path, source_file: &Path, raw_target: &str) -> Result<String> {
    let decoded = percent_decode(raw_target)?;
    let base_dir = source_file.parent().unwrap_or_else(|| Path::new(""));
    let joined = clean(&join_segments(base_dir, Path::new(&decoded)));
    let relative = relative_path(root, &joined)?;
    Ok(to_slash(&relative))
}

/// Canonical key for a file found while walking `root`.
pub fn canonical_source(root: &Path, file: &Path) -> Result<String> {
    Ok(to_slash(&relative_path(root, file)?))
}

/// Canonical key for a path given on the command line, relative to `cwd`.
pub fn canonical_query(root: &Path, cwd: &Path, link_to: &Path) -> Result<String> {
    let absolute = clean(&cwd.join(link_to));
    Ok(to_slash(&relative_path(root, &absolute)?))
}

/// Decode `%XX` escapes. Malformed escapes and non UTF-8 results are errors.
///
/// `+` is kept literally; link targets are paths, not query strings.
pub fn percent_decode(raw: &str) -> Result<String> {
    let bytes = raw.as_bytes();
    let mut out: Vec<u8> = Vec::with_capacity(bytes.len());
    let mut i = 0usize;
    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                let escape = bytes.get(i + 1..i + 3).ok_or_else(|| {
                    decode_error(raw, format!("truncated escape at byte {i}"))
                })?;
                match (hex_value(escape[0]), hex_value(escape[1])) {
                    (Some(hi), Some(lo)) => out.push((hi << 4) | lo),
                    _ => {
                        return Err(decode_error(
                            raw,
                            format!("invalid escape {:?}", String::from_utf8_lossy(escape)),
                        ))
                    }
                }
                i += 3;
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8(out).map_err(|e| decode_error(raw, e.to_string()))
}

fn hex_value(b: u8) -> Option<u8> {
    (b as char).to_digit(16).map(|d| d as u8)
}

fn decode_error(raw: &str, reason: String) -> LinkGraphError {
    LinkGraphError::Decode {
        target: raw.to_string(),
        reason,
    }
}

/// Append `tail` to `base` segment by segment. A leading `/` in `tail` does not
/// reset to the filesystem root.
fn join_segments(base: &Path, tail: &Path) -> PathBuf {
    let mut joined = base.to_path_buf();
    for component in tail.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => {}
            other => joined.push(other),
        }
    }
    joined
}

/// Lexically normalize a path: drop `.`, fold `name/..`, drop `..` directly
/// under a root and keep leading `..` on relative paths. Empty results become `.`.
pub fn clean(path: &Path) -> PathBuf {
    let mut out: Vec<Component> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    if out.is_empty() {
        return PathBuf::from(".");
    }
    out.iter().collect()
}

/// Express `target` relative to `base`.
///
/// Both are cleaned first. Fails with [`LinkGraphError::Unrelated`] when one is
/// absolute and the other is not, when their prefixes differ, or when `base`
/// has `..` segments that `target` does not share.
pub fn relative_path(base: &Path, target: &Path) -> Result<PathBuf> {
    let base_clean = clean(base);
    let target_clean = clean(target);
    let unrelated = || LinkGraphError::Unrelated {
        base: base.to_path_buf(),
        target: target.to_path_buf(),
    };

    if base_clean.is_absolute() != target_clean.is_absolute() {
        return Err(unrelated());
    }

    let base_parts: Vec<Component> = base_clean
        .components()
        .filter(|c| *c != Component::CurDir)
        .collect();
    let target_parts: Vec<Component> = target_clean
        .components()
        .filter(|c| *c != Component::CurDir)
        .collect();

    let prefix_of = |parts: &[Component]| match parts.first() {
        Some(Component::Prefix(p)) => Some(p.as_os_str().to_os_string()),
        _ => None,
    };
    if prefix_of(&base_parts) != prefix_of(&target_parts) {
        return Err(unrelated());
    }

    let common = base_parts
        .iter()
        .zip(target_parts.iter())
        .take_while(|(b, t)| b == t)
        .count();

    let base_rest = &base_parts[common..];
    if base_rest.contains(&Component::ParentDir) {
        return Err(unrelated());
    }

    let mut relative = PathBuf::new();
    for _ in base_rest {
        relative.push("..");
    }
    for component in &target_parts[common..] {
        relative.push(component);
    }
    if relative.as_os_str().is_empty() {
        relative.push(".");
    }
    Ok(relative)
}

/// Render a path with `/` separators regardless of platform.
pub fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| match c {
            Component::RootDir => String::new(),
            _ => c.as_os_str().to_string_lossy().into_owned(),
        })
        .collect::<Vec<_>>()
        .join("/")
}
