//! The visibility planner decides, for every heading, whether it stays open or gets folded.
//!
//! All three commands share one pipeline: parse the text, locate the heading under the cursor,
//! optionally step to a sibling, then plan. Only the focus resolution step differs, so it is a
//! small enum rather than three copies of the flow. Planning is pure; applying the result to a
//! live surface is the job of [`crate::surface`].

use crate::heading::{HeadingPattern, Outline};
use crate::navigate::Direction;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
/// How a command picks the heading to focus on.
pub enum Focus {
    /// The heading containing the cursor.
    Current,
    /// The next sibling of the heading containing the cursor.
    #[value(name = "next")]
    NextSibling,
    /// The previous sibling of the heading containing the cursor.
    #[value(name = "previous")]
    PreviousSibling,
}

impl Focus {
    #[must_use]
    /// Resolves the focus heading for a cursor on `cursor_line`.
    pub fn resolve(self, outline: &Outline, cursor_line: usize) -> Option<usize> {
        let current = outline.locate(cursor_line)?;
        match self {
            Self::Current => Some(current),
            Self::NextSibling => outline.sibling(current, Direction::Next),
            Self::PreviousSibling => outline.sibling(current, Direction::Previous),
        }
    }

    #[must_use]
    /// Whether the cursor follows the focus after the plan is applied.
    pub fn moves_cursor(self) -> bool {
        !matches!(self, Self::Current)
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
/// Visibility verdict for one heading.
pub struct Decision {
    /// Line of the heading this decision applies to.
    pub line: usize,
    /// Level of that heading, kept for reporting.
    pub level: usize,
    /// True to unfold the heading's range, false to fold it.
    pub visible: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
/// Per-heading visibility decisions for one command invocation.
pub struct FoldPlan {
    /// Command that produced this plan.
    pub focus: Focus,
    /// Line of the focus heading.
    pub focus_line: usize,
    /// Whether the cursor should be moved to `focus_line`.
    pub move_cursor: bool,
    /// One decision per heading, in document order.
    pub decisions: Vec<Decision>,
}

impl FoldPlan {
    #[must_use]
    /// Builds the plan centred on the heading at arena index `target`.
    ///
    /// Returns `None` if `target` is not in the outline.
    pub fn build(outline: &Outline, target: usize, focus: Focus) -> Option<Self> {
        let focus_line = outline.get(target)?.line;
        let visible = visible_lines(outline, target);
        let decisions = outline
            .nodes()
            .iter()
            .map(|node| Decision {
                line: node.line,
                level: node.level,
                visible: visible.contains(&node.line),
            })
            .collect();

        Some(Self {
            focus,
            focus_line,
            move_cursor: focus.moves_cursor(),
            decisions,
        })
    }

    #[must_use]
    /// Lines of the headings left open by this plan.
    pub fn visible_lines(&self) -> BTreeSet<usize> {
        self.decisions
            .iter()
            .filter(|d| d.visible)
            .map(|d| d.line)
            .collect()
    }

    #[must_use]
    /// Lines of the headings this plan folds.
    pub fn folded_lines(&self) -> BTreeSet<usize> {
        self.decisions
            .iter()
            .filter(|d| !d.visible)
            .map(|d| d.line)
            .collect()
    }
}

#[must_use]
/// Lines of every heading that must stay open when `target` has focus.
///
/// That is the ancestor chain, the target itself, and every heading nested under it. Ancestors
/// only contribute their own line: their other children are not forced open.
pub fn visible_lines(outline: &Outline, target: usize) -> BTreeSet<usize> {
    let line_of = |i: usize| outline.nodes()[i].line;
    let Some(node) = outline.get(target) else {
        return BTreeSet::new();
    };

    let mut visible = BTreeSet::from([node.line]);
    visible.extend(outline.ancestors(target).map(line_of));
    visible.extend(outline.descendants(target).into_iter().map(line_of));
    visible
}

#[must_use]
/// Runs the pure half of a command: parse, locate, navigate, plan.
///
/// Returns `None` when the cursor precedes every heading or no sibling exists in the requested
/// direction; the caller should then leave the document untouched.
pub fn plan(
    text: &str,
    cursor_line: usize,
    focus: Focus,
    pattern: &HeadingPattern,
) -> Option<FoldPlan> {
    let outline = Outline::from_text(text, pattern);
    let target = focus.resolve(&outline, cursor_line)?;
    FoldPlan::build(&outline, target, focus)
}

#[cfg(test)]
#[path = "tests/plan.rs"]
mod tests;
