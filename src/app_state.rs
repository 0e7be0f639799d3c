//! The session state bridging a document on disk and the focus commands.
//!
//! A TUI needs a single source of truth that can be interrogated and mutated as the user moves
//! around. Here that is a [`FoldBuffer`] holding the text and fold state, plus the compiled
//! heading pattern. Every focus command re-reads the buffer text and rebuilds the outline from
//! scratch, so nothing about the heading tree is kept between key presses.

use crate::buffer::FoldBuffer;
use crate::error::Result;
use crate::heading::{HeadingPattern, Outline};
use crate::plan::Focus;
use crate::surface::{self, AppliedPlan, Surface};
use std::path::PathBuf;

/// Viewer state for one open document.
pub struct AppState {
    /// Document being viewed.
    pub path: PathBuf,
    /// Text, folds, cursor and scroll position.
    pub buffer: FoldBuffer,
    /// Heading recogniser used by every command.
    pub pattern: HeadingPattern,
    /// Status feedback displayed in the help bar.
    pub message: Option<String>,
    scroll_padding: usize,
}

impl AppState {
    /// Opens `path` with nothing folded.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn open(path: PathBuf, pattern: HeadingPattern, scroll_padding: usize) -> Result<Self> {
        let buffer = FoldBuffer::open(&path, &pattern)?.with_scroll_padding(scroll_padding);
        Ok(Self {
            path,
            buffer,
            pattern,
            message: None,
            scroll_padding,
        })
    }

    #[must_use]
    /// Wraps an already loaded buffer, e.g. one built from text in memory.
    pub fn with_buffer(path: PathBuf, buffer: FoldBuffer, pattern: HeadingPattern) -> Self {
        Self {
            path,
            buffer,
            pattern,
            message: None,
            scroll_padding: 0,
        }
    }

    /// Runs one of the three focus commands against the buffer.
    ///
    /// A command with no target leaves the view exactly as it was.
    pub fn focus(&mut self, focus: Focus) -> Option<AppliedPlan> {
        self.message = None;
        surface::run(&mut self.buffer, focus, &self.pattern)
    }

    /// Folds or unfolds the heading under the cursor.
    pub fn toggle_fold(&mut self) {
        let line = self.buffer.cursor().line;
        self.message = None;
        if !self.buffer.toggle_fold(line) {
            self.message = Some("Nothing to fold here".to_string());
        }
        self.buffer.scroll_to(line);
    }

    /// Expands every fold in the document.
    pub fn unfold_all(&mut self) {
        self.buffer.unfold_all();
        let line = self.buffer.cursor().line;
        self.buffer.scroll_to(line);
        self.message = None;
    }

    /// Re-reads the document from disk, dropping fold state but keeping the cursor line.
    ///
    /// # Errors
    ///
    /// Returns an error if the file can no longer be read; the current buffer is kept.
    pub fn reload(&mut self) -> Result<()> {
        let cursor = self.buffer.cursor();
        let mut buffer =
            FoldBuffer::open(&self.path, &self.pattern)?.with_scroll_padding(self.scroll_padding);
        buffer.set_cursor(cursor);
        buffer.scroll_to(buffer.cursor().line);
        self.buffer = buffer;
        self.message = Some("Reloaded".to_string());
        Ok(())
    }

    #[must_use]
    /// Titles of the heading containing the cursor and its ancestors, outermost first.
    pub fn breadcrumb(&self) -> Vec<String> {
        let lines = self.buffer.lines();
        let outline = Outline::parse(lines.iter().map(String::as_str), &self.pattern);
        let Some(current) = outline.locate(self.buffer.cursor().line) else {
            return Vec::new();
        };

        let mut chain: Vec<usize> = outline.ancestors(current).collect();
        chain.reverse();
        chain.push(current);
        chain
            .into_iter()
            .map(|i| self.title(outline.nodes()[i].line))
            .collect()
    }

    #[must_use]
    /// Heading text of `line` without its marker run.
    pub fn title(&self, line: usize) -> String {
        let marker = self.pattern.marker();
        self.buffer.lines().get(line).map_or_else(String::new, |text| {
            text.trim_start_matches(marker).trim().to_string()
        })
    }
}

#[cfg(test)]
#[path = "tests/app_state.rs"]
mod tests;
