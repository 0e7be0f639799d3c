use super::AppState;
use crate::buffer::FoldBuffer;
use crate::heading::HeadingPattern;
use crate::plan::Focus;
use crate::surface::{Cursor, Surface};
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

const DOC: &str = "# Guide\n\nIntro\n\n## Install\n\nSteps\n\n### Linux\n\napt\n\n## Usage\n\nRun it\n";

fn in_memory(text: &str, cursor_line: usize) -> AppState {
    let pattern = HeadingPattern::new('#').unwrap();
    let mut buffer = FoldBuffer::from_text(text, &pattern);
    buffer.set_cursor(Cursor {
        line: cursor_line,
        column: 0,
    });
    AppState::with_buffer(PathBuf::from("guide.md"), buffer, pattern)
}

#[test]
fn test_breadcrumb_follows_ancestor_chain() {
    let app = in_memory(DOC, 10);

    assert_eq!(app.breadcrumb(), vec!["Guide", "Install", "Linux"]);
}

#[test]
fn test_breadcrumb_empty_in_preamble() {
    let app = in_memory("front matter\n# Title", 0);

    assert!(app.breadcrumb().is_empty());
}

#[test]
fn test_focus_commands_walk_siblings() {
    let mut app = in_memory(DOC, 6);

    let applied = app.focus(Focus::NextSibling).unwrap();
    assert_eq!(applied.plan.focus_line, 12);
    assert_eq!(app.buffer.cursor().line, 12);
    assert!(app.buffer.is_folded(4));

    assert!(app.focus(Focus::NextSibling).is_none());
    assert_eq!(app.buffer.cursor().line, 12);

    app.focus(Focus::PreviousSibling).unwrap();
    assert_eq!(app.buffer.cursor().line, 4);
    assert!(!app.buffer.is_folded(4));
    assert!(!app.buffer.is_folded(8));
    assert!(app.buffer.is_folded(12));
}

#[test]
fn test_toggle_reports_nothing_to_fold() {
    let mut app = in_memory("# A\n# B\nbody", 0);

    app.toggle_fold();
    assert!(app.message.is_some());

    app.buffer.set_cursor(Cursor { line: 1, column: 0 });
    app.toggle_fold();
    assert!(app.message.is_none());
    assert!(app.buffer.is_folded(1));

    app.unfold_all();
    assert!(!app.buffer.is_folded(1));
}

#[test]
fn test_title_strips_marker_run() {
    let app = in_memory("###   Spaced out  \nbody", 0);

    assert_eq!(app.title(0), "Spaced out");
    assert_eq!(app.title(9), "");
}

#[test]
fn test_reload_picks_up_edits_and_keeps_cursor() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{DOC}").unwrap();
    let path = file.path().to_path_buf();
    let pattern = HeadingPattern::new('#').unwrap();

    let mut app = AppState::open(path.clone(), pattern, 2).unwrap();
    app.buffer.set_cursor(Cursor { line: 6, column: 0 });
    app.focus(Focus::Current).unwrap();
    assert!(!app.buffer.folded_starts().is_empty());

    fs::write(&path, format!("{DOC}\n## Extra\n\nMore\n")).unwrap();
    app.reload().unwrap();

    assert!(app.buffer.folded_starts().is_empty());
    assert_eq!(app.buffer.cursor().line, 6);
    assert_eq!(app.message.as_deref(), Some("Reloaded"));

    app.buffer.set_cursor(Cursor { line: 12, column: 0 });
    let applied = app.focus(Focus::NextSibling).unwrap();
    assert_eq!(applied.plan.focus_line, 16);
}

#[test]
fn test_focus_scroll_survives_redraw() {
    let body: String = (1..=20).map(|i| format!("line {i}\n")).collect();
    let mut app = in_memory(&format!("# Long\n{body}"), 18);
    app.buffer.set_viewport_height(5);
    app.buffer.scroll_to(18);
    assert_eq!(app.buffer.top_row(), 14);

    app.focus(Focus::Current).unwrap();
    // Each frame re-reports the viewport height before drawing
    app.buffer.set_viewport_height(5);

    assert_eq!(app.buffer.top_row(), 0);
    assert_eq!(app.buffer.cursor().line, 18);
}
