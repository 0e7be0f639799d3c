//! The fold applicator turns a plan into a batch of fold instructions against a live surface.
//!
//! fovea never owns rendering state. Whatever displays the document (the terminal viewer, an
//! editor plugin, a test double) implements [`Surface`], and a command is one pass over it:
//! read text and cursor, plan, collect instructions, apply them as a single batch, scroll, and
//! for sibling navigation move the cursor.

use crate::error::Result;
use crate::heading::HeadingPattern;
use crate::plan::{self, Focus, FoldPlan};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Cursor position on a surface.
pub struct Cursor {
    /// Zero-based line.
    pub line: usize,
    /// Zero-based column. Ignored by the planner.
    pub column: usize,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
/// Inclusive span of lines that a single fold collapses.
pub struct LineRange {
    /// First line of the range; stays visible when folded.
    pub start: usize,
    /// Last line of the range (inclusive).
    pub end: usize,
}

impl LineRange {
    #[must_use]
    /// True if folding this range would hide `line`.
    pub fn hides(&self, line: usize) -> bool {
        self.start < line && line <= self.end
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
/// Whether an instruction collapses or expands its range.
pub enum FoldAction {
    /// Collapse the range.
    Fold,
    /// Expand the range.
    Unfold,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
/// One entry in a fold batch.
pub struct FoldInstruction {
    /// What to do with the range.
    pub action: FoldAction,
    /// Range to act on, as reported by the surface.
    pub range: LineRange,
}

/// Host-side capabilities a command needs from whatever renders the document.
pub trait Surface {
    /// Full document text.
    fn text(&self) -> Cow<'_, str>;
    /// Current cursor position.
    fn cursor(&self) -> Cursor;
    /// Range that a fold starting at `line` would collapse, if any.
    fn foldable_range(&self, line: usize) -> Option<LineRange>;
    /// Applies every instruction in `batch` as one update.
    fn apply_folds(&mut self, batch: &[FoldInstruction]);
    /// Brings `line` into view.
    fn scroll_to(&mut self, line: usize);
    /// Moves the cursor.
    fn set_cursor(&mut self, cursor: Cursor);
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
/// A plan together with the batch it produced on a particular surface.
pub struct AppliedPlan {
    /// Visibility decisions.
    pub plan: FoldPlan,
    /// Instructions issued, in heading order. Headings without a foldable range are absent.
    pub instructions: Vec<FoldInstruction>,
}

#[must_use]
/// Translates per-heading decisions into instructions for `surface`.
///
/// Headings for which the surface reports no foldable range are skipped without affecting the
/// rest of the batch.
pub fn instructions<S: Surface + ?Sized>(plan: &FoldPlan, surface: &S) -> Vec<FoldInstruction> {
    plan.decisions
        .iter()
        .filter_map(|decision| {
            let range = surface.foldable_range(decision.line)?;
            let action = if decision.visible {
                FoldAction::Unfold
            } else {
                FoldAction::Fold
            };
            Some(FoldInstruction { action, range })
        })
        .collect()
}

/// Applies `plan` to `surface` and returns the batch that was issued.
pub fn apply<S: Surface + ?Sized>(plan: FoldPlan, surface: &mut S) -> AppliedPlan {
    let batch = instructions(&plan, surface);
    tracing::debug!(
        focus_line = plan.focus_line,
        instructions = batch.len(),
        "applying fold batch"
    );
    surface.apply_folds(&batch);
    surface.scroll_to(plan.focus_line);
    if plan.move_cursor {
        surface.set_cursor(Cursor {
            line: plan.focus_line,
            column: 0,
        });
    }
    AppliedPlan {
        plan,
        instructions: batch,
    }
}

/// Executes one focus command against `surface`.
///
/// Returns `None`, leaving the surface untouched, if there is no heading at or above the cursor
/// or no sibling in the requested direction.
pub fn run<S: Surface + ?Sized>(
    surface: &mut S,
    focus: Focus,
    pattern: &HeadingPattern,
) -> Option<AppliedPlan> {
    let cursor = surface.cursor();
    let Some(plan) = plan::plan(&surface.text(), cursor.line, focus, pattern) else {
        tracing::debug!(?focus, line = cursor.line, "no focus heading, nothing to do");
        return None;
    };
    Some(apply(plan, surface))
}

/// Executes one focus command and renders the outcome as pretty-printed JSON.
///
/// A command with no target renders as `null`.
///
/// # Errors
///
/// Returns [`Error::Json`](crate::error::Error::Json) if the outcome cannot be serialized.
pub fn run_report<S: Surface + ?Sized>(
    surface: &mut S,
    focus: Focus,
    pattern: &HeadingPattern,
) -> Result<String> {
    let applied = run(surface, focus, pattern);
    Ok(serde_json::to_string_pretty(&applied)?)
}

#[cfg(test)]
#[path = "tests/surface.rs"]
mod tests;
