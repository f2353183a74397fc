/*!
 * Utility functions for repo-export
 */

use std::path::Path;

use crate::types::Segments;

/// Directory names that are never descended into or listed
pub const EXCLUDED_DIRS: &[&str] = &[
    // Dependencies
    "node_modules",
    // Build output
    "dist",
    // Framework cache
    ".next",
    // Version control
    ".git",
];

/// Whether a single path segment names an excluded directory
pub fn is_excluded_name(name: &str) -> bool {
    EXCLUDED_DIRS.contains(&name)
}

/// Split a path relative to the root into its segments
pub fn segments(rel_path: &Path) -> Segments {
    rel_path
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect()
}

/// Render a relative path with forward slashes on every platform
pub fn to_slash_path(rel_path: &Path) -> String {
    segments(rel_path).join("/")
}

/// Format a human-readable count
pub fn format_number(num: usize) -> String {
    if num >= 1_000_000 {
        format!("{:.1}M", num as f64 / 1_000_000.0)
    } else if num >= 1_000 {
        format!("{:.1}K", num as f64 / 1_000.0)
    } else {
        num.to_string()
    }
}
