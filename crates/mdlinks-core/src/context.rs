//! Context window around a reported link

use std::ops::Range;

/// Lines shown before the link line.
pub const LINES_BEFORE: usize = 1;
/// Lines shown after the link line.
pub const LINES_AFTER: usize = 2;

/// Line indices `[row - 1, row + 3)` clamped to `[0, total_lines)`.
pub fn window(row: usize, total_lines: usize) -> Range<usize> {
    let start = row.saturating_sub(LINES_BEFORE).min(total_lines);
    let end = (row + LINES_AFTER + 1).min(total_lines);
    start..end.max(start)
}

/// The lines of `window(row, lines.len())`, copied.
pub fn context_lines(lines: &[&str], row: usize) -> Vec<String> {
    lines[window(row, lines.len())]
        .iter()
        .map(|line| line.to_string())
        .collect()
}
