//! Moving around the outline: which heading owns the cursor, and which heading is its sibling.
//!
//! Both lookups work on arena indices into an [`Outline`], so the results can be fed straight
//! into the planner without cloning nodes.

use crate::heading::{HeadingNode, Outline};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Scan direction for sibling navigation.
pub enum Direction {
    /// Towards the end of the document.
    Next,
    /// Towards the start of the document.
    Previous,
}

impl Outline {
    #[must_use]
    /// Finds the heading that contains `cursor_line`.
    ///
    /// A cursor belongs to the nearest heading at or above it. Returns `None` when the cursor
    /// sits in preamble text before the first heading.
    pub fn locate(&self, cursor_line: usize) -> Option<usize> {
        self.nodes()
            .partition_point(|node| node.line <= cursor_line)
            .checked_sub(1)
    }

    #[must_use]
    /// Finds the nearest sibling of `index` in `direction`.
    ///
    /// Deeper headings are skipped. The scan stops at the first heading whose level is at or
    /// above the current one; that heading is the answer only if it shares both level and
    /// parent, so navigation never leaves the current parent's subtree.
    pub fn sibling(&self, index: usize, direction: Direction) -> Option<usize> {
        let nodes = self.nodes();
        let current = nodes.get(index)?;
        let stops = |node: &HeadingNode| node.level <= current.level;

        let candidate = match direction {
            Direction::Next => {
                let after = index + 1;
                nodes.get(after..)?.iter().position(stops).map(|i| after + i)
            }
            Direction::Previous => nodes[..index].iter().rposition(stops),
        }?;

        let found = &nodes[candidate];
        (found.level == current.level && found.parent == current.parent).then_some(candidate)
    }

    /// Walks parent links from `index` up to its root, excluding `index` itself.
    pub fn ancestors(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        std::iter::successors(self.get(index).and_then(|node| node.parent), |&i| {
            self.get(i).and_then(|node| node.parent)
        })
    }

    #[must_use]
    /// Collects every heading nested under `index` at any depth, in document order.
    pub fn descendants(&self, index: usize) -> Vec<usize> {
        let mut found = Vec::new();
        let mut pending: Vec<usize> = self.children(index).iter().rev().copied().collect();
        while let Some(next) = pending.pop() {
            found.push(next);
            pending.extend(self.children(next).iter().rev());
        }
        found
    }
}

#[cfg(test)]
#[path = "tests/navigate.rs"]
mod tests;
