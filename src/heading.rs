//! Heading records rebuilt from a flat sequence of depth-marked lines.
//!
//! An outline document never stores its tree: each heading line only carries its depth as a run
//! of marker characters (`#`, `##`, ...). We reconstruct the implicit tree in one top-to-bottom
//! pass, keeping the nodes in an arena ordered by line and linking each node to its parent by
//! arena index. Child lists are derived once per pass so descendant walks stay cheap.

use crate::error::{Error, Result};
use regex::Regex;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// A single heading line and its place in the outline.
pub struct HeadingNode {
    /// Zero-based line where the heading text occurs.
    pub line: usize,
    /// Nesting depth in the outline (1 for top-level).
    pub level: usize,
    /// Arena index of the closest preceding heading with a smaller level.
    pub parent: Option<usize>,
}

#[derive(Clone, Debug)]
/// Matches heading lines: one or more marker characters followed by whitespace.
pub struct HeadingPattern {
    regex: Regex,
    marker: char,
}

impl HeadingPattern {
    /// Compiles the line pattern for `marker`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Marker`] if the marker is whitespace.
    pub fn new(marker: char) -> Result<Self> {
        if marker.is_whitespace() {
            return Err(Error::Marker(marker.to_string()));
        }
        let escaped = regex::escape(&marker.to_string());
        let regex = Regex::new(&format!(r"^(?:{escaped})+\s"))?;
        Ok(Self { regex, marker })
    }

    #[must_use]
    /// The character whose repetition marks depth.
    pub fn marker(&self) -> char {
        self.marker
    }

    #[must_use]
    /// Returns the heading level of `line`, or `None` if it is not a heading.
    pub fn level(&self, line: &str) -> Option<usize> {
        let found = self.regex.find(line)?;
        Some(
            found
                .as_str()
                .chars()
                .take_while(|&c| c == self.marker)
                .count(),
        )
    }
}

#[derive(Clone, Debug, Default)]
/// Arena of headings in document order, with parent links and derived child lists.
///
/// Built fresh for every command and discarded afterwards; nothing here survives an edit.
pub struct Outline {
    nodes: Vec<HeadingNode>,
    children: Vec<Vec<usize>>,
}

impl Outline {
    #[must_use]
    /// Scans `lines` top to bottom and reconstructs the heading tree.
    ///
    /// Keeps a stack of open headings, one per level still in scope. A new heading closes every
    /// open heading at its own level or deeper, and whatever remains on top is its parent. A
    /// heading from a closed subtree is never picked as a parent.
    pub fn parse<'a, I>(lines: I, pattern: &HeadingPattern) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut nodes: Vec<HeadingNode> = Vec::new();
        let mut open: Vec<usize> = Vec::new();

        for (line, text) in lines.into_iter().enumerate() {
            let Some(level) = pattern.level(text) else {
                continue;
            };
            while open.last().is_some_and(|&i| nodes[i].level >= level) {
                open.pop();
            }
            let parent = open.last().copied();
            open.push(nodes.len());
            nodes.push(HeadingNode {
                line,
                level,
                parent,
            });
        }

        let mut children = vec![Vec::new(); nodes.len()];
        for (index, node) in nodes.iter().enumerate() {
            if let Some(parent) = node.parent {
                children[parent].push(index);
            }
        }

        Self { nodes, children }
    }

    #[must_use]
    /// Parses a whole document held in one string.
    pub fn from_text(text: &str, pattern: &HeadingPattern) -> Self {
        Self::parse(text.lines(), pattern)
    }

    #[must_use]
    /// All headings, ordered by line.
    pub fn nodes(&self) -> &[HeadingNode] {
        &self.nodes
    }

    #[must_use]
    /// Heading at arena position `index`.
    pub fn get(&self, index: usize) -> Option<&HeadingNode> {
        self.nodes.get(index)
    }

    #[must_use]
    /// Arena indices of the direct children of `index`, in document order.
    pub fn children(&self, index: usize) -> &[usize] {
        self.children
            .get(index)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    #[must_use]
    /// Number of headings in the document.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    /// True when the document has no headings at all.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
#[path = "tests/heading.rs"]
mod tests;
