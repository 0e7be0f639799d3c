//! An in-memory rendering surface: document lines plus fold, cursor and scroll state.
//!
//! The terminal viewer draws from a [`FoldBuffer`], and the headless runner uses one to report
//! which instructions a command would issue. Folds are keyed by their start line, so folding a
//! heading twice is a no-op and unfolding removes exactly that heading's fold.
//!
//! Foldable ranges follow markdown folding: a heading folds everything up to the next heading at
//! the same or a shallower level, minus trailing blank lines.

use crate::error::{Error, Result};
use crate::heading::HeadingPattern;
use crate::surface::{Cursor, FoldAction, FoldInstruction, LineRange, Surface};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Clone, Debug)]
/// Document text with collapsible heading ranges.
pub struct FoldBuffer {
    lines: Vec<String>,
    levels: Vec<Option<usize>>,
    folds: BTreeMap<usize, usize>,
    cursor: Cursor,
    top_row: usize,
    viewport_height: usize,
    scroll_padding: usize,
}

impl FoldBuffer {
    #[must_use]
    /// Creates a buffer over `text` with nothing folded and the cursor at the top.
    pub fn from_text(text: &str, pattern: &HeadingPattern) -> Self {
        let lines: Vec<String> = text.lines().map(str::to_string).collect();
        let levels = lines.iter().map(|line| pattern.level(line)).collect();
        Self {
            lines,
            levels,
            folds: BTreeMap::new(),
            cursor: Cursor::default(),
            top_row: 0,
            viewport_height: usize::MAX,
            scroll_padding: 0,
        }
    }

    /// Reads `path` into a fresh buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Read`] if the file cannot be read.
    pub fn open(path: &Path, pattern: &HeadingPattern) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_text(&text, pattern))
    }

    #[must_use]
    /// Sets how many rows of context `scroll_to` keeps around its target.
    pub fn with_scroll_padding(mut self, padding: usize) -> Self {
        self.scroll_padding = padding;
        self
    }

    /// Tells the buffer how many rows the view can show; used when scrolling.
    ///
    /// Leaves the scroll position alone unless it would run past the last row.
    pub fn set_viewport_height(&mut self, height: usize) {
        self.viewport_height = height.max(1);
        let last_top = self
            .visible_lines()
            .len()
            .saturating_sub(self.viewport_height);
        self.top_row = self.top_row.min(last_top);
    }

    #[must_use]
    /// All document lines.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    #[must_use]
    /// Heading level of `line`, if it is a heading.
    pub fn level(&self, line: usize) -> Option<usize> {
        self.levels.get(line).copied().flatten()
    }

    #[must_use]
    /// True if a fold currently starts at `line`.
    pub fn is_folded(&self, line: usize) -> bool {
        self.folds.contains_key(&line)
    }

    #[must_use]
    /// Start lines of every active fold.
    pub fn folded_starts(&self) -> Vec<usize> {
        self.folds.keys().copied().collect()
    }

    /// The fold that hides `line`, if any. The outermost one wins so its start is visible.
    fn hiding_fold(&self, line: usize) -> Option<LineRange> {
        self.folds
            .range(..line)
            .map(|(&start, &end)| LineRange { start, end })
            .find(|range| range.hides(line))
    }

    #[must_use]
    /// True if some active fold collapses `line`.
    pub fn is_hidden(&self, line: usize) -> bool {
        self.hiding_fold(line).is_some()
    }

    #[must_use]
    /// Lines that would be drawn, top to bottom.
    pub fn visible_lines(&self) -> Vec<usize> {
        let mut visible = Vec::new();
        let mut line = 0;
        while line < self.lines.len() {
            visible.push(line);
            line = match self.folds.get(&line) {
                Some(&end) => end.max(line) + 1,
                None => line + 1,
            };
        }
        visible
    }

    #[must_use]
    /// First visible row in the viewport.
    pub fn top_row(&self) -> usize {
        self.top_row
    }

    /// Moves the cursor to the previous (negative `delta`) or next visible line.
    pub fn move_cursor(&mut self, delta: isize) {
        let visible = self.visible_lines();
        if visible.is_empty() {
            return;
        }
        let row = row_of(&visible, self.cursor.line);
        let target = row.saturating_add_signed(delta).min(visible.len() - 1);
        self.set_cursor(Cursor {
            line: visible[target],
            column: 0,
        });
        self.scroll_to(visible[target]);
    }

    /// Moves the cursor to the first or last visible line.
    pub fn jump_cursor(&mut self, to_end: bool) {
        let visible = self.visible_lines();
        let line = if to_end { visible.last() } else { visible.first() };
        if let Some(&line) = line {
            self.set_cursor(Cursor { line, column: 0 });
            self.scroll_to(line);
        }
    }

    /// Folds the heading at `line` if it is open, unfolds it otherwise.
    ///
    /// Returns false when there is nothing foldable there.
    pub fn toggle_fold(&mut self, line: usize) -> bool {
        let Some(range) = self.foldable_range(line) else {
            return false;
        };
        let action = if self.is_folded(line) {
            FoldAction::Unfold
        } else {
            FoldAction::Fold
        };
        self.apply_folds(&[FoldInstruction { action, range }]);
        true
    }

    /// Expands every fold.
    pub fn unfold_all(&mut self) {
        self.folds.clear();
    }
}

/// Row of `line` among `visible`, or of the nearest visible line above it.
fn row_of(visible: &[usize], line: usize) -> usize {
    visible.partition_point(|&l| l <= line).saturating_sub(1)
}

impl Surface for FoldBuffer {
    fn text(&self) -> Cow<'_, str> {
        Cow::Owned(self.lines.join("\n"))
    }

    fn cursor(&self) -> Cursor {
        self.cursor
    }

    fn foldable_range(&self, line: usize) -> Option<LineRange> {
        let level = self.level(line)?;
        let section_end = self.levels[line + 1..]
            .iter()
            .position(|next| next.is_some_and(|l| l <= level))
            .map_or(self.lines.len(), |offset| line + 1 + offset);
        let end = (line + 1..section_end)
            .rev()
            .find(|&i| !self.lines[i].trim().is_empty())?;
        Some(LineRange { start: line, end })
    }

    fn apply_folds(&mut self, batch: &[FoldInstruction]) {
        for instruction in batch {
            let LineRange { start, end } = instruction.range;
            match instruction.action {
                FoldAction::Fold => {
                    self.folds.insert(start, end);
                }
                FoldAction::Unfold => {
                    self.folds.remove(&start);
                }
            }
        }
        if let Some(fold) = self.hiding_fold(self.cursor.line) {
            self.cursor = Cursor {
                line: fold.start,
                column: 0,
            };
        }
    }

    fn scroll_to(&mut self, line: usize) {
        let visible = self.visible_lines();
        let row = row_of(&visible, line);
        let padding = self
            .scroll_padding
            .min(self.viewport_height.saturating_sub(1) / 2);
        if row < self.top_row + padding {
            self.top_row = row.saturating_sub(padding);
        } else if row + padding >= self.top_row.saturating_add(self.viewport_height) {
            self.top_row = (row + padding + 1).saturating_sub(self.viewport_height);
        }
        let last_top = visible.len().saturating_sub(self.viewport_height);
        self.top_row = self.top_row.min(last_top);
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        let last = self.lines.len().saturating_sub(1);
        self.cursor = Cursor {
            line: cursor.line.min(last),
            column: cursor.column,
        };
    }
}

#[cfg(test)]
#[path = "tests/buffer.rs"]
mod tests;
