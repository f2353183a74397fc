/*!
 * Parent-to-children index and ASCII tree rendering
 */

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::types::{EntryKind, Segments};
use crate::utils::segments;

/// Mapping from a parent (as path segments, empty for the root) to the
/// names of its children, in first-seen order and without duplicates
#[derive(Debug, Clone, Default)]
pub struct ChildIndex {
    root: PathBuf,
    children: HashMap<Segments, Vec<String>>,
}

impl ChildIndex {
    /// Build the index for `files`, all of which live under `root`
    pub fn build(root: &Path, files: &[PathBuf]) -> Self {
        let mut index = Self {
            root: root.to_path_buf(),
            children: HashMap::new(),
        };

        for file in files {
            match file.strip_prefix(root) {
                Ok(rel) => index.insert(&segments(rel)),
                Err(_) => log::warn!(
                    "{} is outside {}, leaving it out of the tree",
                    file.display(),
                    root.display()
                ),
            }
        }

        index
    }

    /// Register every prefix of `parts` so each segment becomes a child of
    /// the segments before it
    pub fn insert(&mut self, parts: &[String]) {
        for i in 0..parts.len() {
            let siblings = self.children.entry(parts[..i].to_vec()).or_default();
            if !siblings.contains(&parts[i]) {
                siblings.push(parts[i].clone());
            }
        }
    }

    /// Root the index was built for
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Children of `parent` in insertion order
    pub fn children(&self, parent: &[String]) -> &[String] {
        self.children
            .get(parent)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Only directories have children of their own
    pub fn kind(&self, path: &[String]) -> EntryKind {
        if self.children.contains_key(path) {
            EntryKind::Directory
        } else {
            EntryKind::File
        }
    }

    /// Children of `parent`, directories first, then by case-insensitive name
    pub fn sorted_children(&self, parent: &[String]) -> Vec<(&str, EntryKind)> {
        let mut path = parent.to_vec();
        let mut entries: Vec<(&str, EntryKind, String)> = self
            .children(parent)
            .iter()
            .map(|name| {
                path.push(name.clone());
                let kind = self.kind(&path);
                path.pop();
                (name.as_str(), kind, name.to_lowercase())
            })
            .collect();

        entries.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.2.cmp(&b.2)));

        entries
            .into_iter()
            .map(|(name, kind, _)| (name, kind))
            .collect()
    }

    /// Number of parents with at least one child
    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

/// Connector strings used when drawing the tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeGlyphs {
    /// Connector for a sibling that has more siblings after it
    pub branch: String,
    /// Connector for the last sibling
    pub last: String,
    /// Indent under a non-last directory
    pub pipe: String,
    /// Indent under the last directory
    pub blank: String,
}

impl Default for TreeGlyphs {
    fn default() -> Self {
        Self {
            branch: "├── ".to_string(),
            last: "└── ".to_string(),
            pipe: "│   ".to_string(),
            blank: "    ".to_string(),
        }
    }
}

/// Renders a [`ChildIndex`] as lines of an ASCII tree
#[derive(Debug, Clone, Default)]
pub struct TreeRenderer {
    glyphs: TreeGlyphs,
}

impl TreeRenderer {
    /// Create a renderer with custom glyphs
    pub fn new(glyphs: TreeGlyphs) -> Self {
        Self { glyphs }
    }

    /// Render the tree; the first line is the root path itself
    pub fn render(&self, index: &ChildIndex) -> Vec<String> {
        let mut lines = vec![index.root().display().to_string()];
        let mut parent = Segments::new();
        self.render_children(index, &mut parent, "", &mut lines);
        lines
    }

    fn render_children(
        &self,
        index: &ChildIndex,
        parent: &mut Segments,
        prefix: &str,
        lines: &mut Vec<String>,
    ) {
        let entries = index.sorted_children(parent);
        let count = entries.len();

        for (i, (name, kind)) in entries.into_iter().enumerate() {
            let is_last = i + 1 == count;
            let connector = if is_last {
                &self.glyphs.last
            } else {
                &self.glyphs.branch
            };
            lines.push(format!("{}{}{}", prefix, connector, name));

            if kind == EntryKind::Directory {
                let extension = if is_last {
                    &self.glyphs.blank
                } else {
                    &self.glyphs.pipe
                };
                parent.push(name.to_string());
                self.render_children(index, parent, &format!("{}{}", prefix, extension), lines);
                parent.pop();
            }
        }
    }
}
