use super::{
    apply, instructions, run, run_report, Cursor, FoldAction, FoldInstruction, LineRange,
    Surface,
};
use crate::heading::HeadingPattern;
use crate::plan::{self, Focus};
use serde_json::Value;
use std::borrow::Cow;
use std::collections::HashMap;

#[derive(Debug, PartialEq)]
enum Call {
    Apply(Vec<FoldInstruction>),
    Scroll(usize),
    SetCursor(Cursor),
}

/// Surface double with fixed foldable ranges that records every mutation.
struct Recorder {
    text: String,
    cursor: Cursor,
    ranges: HashMap<usize, usize>,
    calls: Vec<Call>,
}

impl Recorder {
    fn new(text: &str, cursor_line: usize, ranges: &[(usize, usize)]) -> Self {
        Self {
            text: text.to_string(),
            cursor: Cursor {
                line: cursor_line,
                column: 3,
            },
            ranges: ranges.iter().copied().collect(),
            calls: Vec::new(),
        }
    }
}

impl Surface for Recorder {
    fn text(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.text)
    }

    fn cursor(&self) -> Cursor {
        self.cursor
    }

    fn foldable_range(&self, line: usize) -> Option<LineRange> {
        self.ranges
            .get(&line)
            .map(|&end| LineRange { start: line, end })
    }

    fn apply_folds(&mut self, batch: &[FoldInstruction]) {
        self.calls.push(Call::Apply(batch.to_vec()));
    }

    fn scroll_to(&mut self, line: usize) {
        self.calls.push(Call::Scroll(line));
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = cursor;
        self.calls.push(Call::SetCursor(cursor));
    }
}

const DOC: &str = "# A\n## B\n## C\n### D\n## E";
// Only A and C have bodies to fold
const RANGES: &[(usize, usize)] = &[(0, 4), (2, 3)];

fn pattern() -> HeadingPattern {
    HeadingPattern::new('#').unwrap()
}

fn fold(start: usize, end: usize) -> FoldInstruction {
    FoldInstruction {
        action: FoldAction::Fold,
        range: LineRange { start, end },
    }
}

fn unfold(start: usize, end: usize) -> FoldInstruction {
    FoldInstruction {
        action: FoldAction::Unfold,
        range: LineRange { start, end },
    }
}

#[test]
fn test_focus_current_batches_then_scrolls_without_moving_cursor() {
    let mut surface = Recorder::new(DOC, 1, RANGES);

    let applied = run(&mut surface, Focus::Current, &pattern()).unwrap();

    assert_eq!(applied.instructions, vec![unfold(0, 4), fold(2, 3)]);
    assert_eq!(
        surface.calls,
        vec![Call::Apply(vec![unfold(0, 4), fold(2, 3)]), Call::Scroll(1)]
    );
    assert_eq!(surface.cursor, Cursor { line: 1, column: 3 });
}

#[test]
fn test_next_sibling_moves_cursor_to_column_zero() {
    let mut surface = Recorder::new(DOC, 2, RANGES);

    run(&mut surface, Focus::NextSibling, &pattern()).unwrap();

    assert_eq!(
        surface.calls,
        vec![
            Call::Apply(vec![unfold(0, 4), fold(2, 3)]),
            Call::Scroll(4),
            Call::SetCursor(Cursor { line: 4, column: 0 }),
        ]
    );
}

#[test]
fn test_previous_sibling_unfolds_its_subtree() {
    let mut surface = Recorder::new(DOC, 4, RANGES);

    let applied = run(&mut surface, Focus::PreviousSibling, &pattern()).unwrap();

    assert_eq!(applied.instructions, vec![unfold(0, 4), unfold(2, 3)]);
    assert_eq!(surface.cursor.line, 2);
}

#[test]
fn test_no_target_leaves_surface_untouched() {
    let mut surface = Recorder::new("preface\n# A\n## B", 0, &[(1, 2)]);
    assert!(run(&mut surface, Focus::Current, &pattern()).is_none());

    let mut surface2 = Recorder::new(DOC, 4, RANGES);
    assert!(run(&mut surface2, Focus::NextSibling, &pattern()).is_none());

    assert!(surface.calls.is_empty());
    assert!(surface2.calls.is_empty());
}

#[test]
fn test_headings_without_range_are_skipped() {
    let surface = Recorder::new(DOC, 0, &[]);
    let plan = plan::plan(DOC, 0, Focus::Current, &pattern()).unwrap();

    assert!(instructions(&plan, &surface).is_empty());
}

#[test]
fn test_empty_batch_is_still_applied_once() {
    let mut surface = Recorder::new(DOC, 3, &[]);
    let plan = plan::plan(DOC, 3, Focus::Current, &pattern()).unwrap();

    let applied = apply(plan, &mut surface);

    assert!(applied.instructions.is_empty());
    assert_eq!(surface.calls, vec![Call::Apply(Vec::new()), Call::Scroll(3)]);
}

#[test]
fn test_line_range_hides_body_not_heading() {
    let range = LineRange { start: 2, end: 5 };

    assert!(!range.hides(2));
    assert!(range.hides(3));
    assert!(range.hides(5));
    assert!(!range.hides(6));
}

#[test]
fn test_report_is_null_without_target() {
    let mut surface = Recorder::new("preface\n# A\n## B", 0, &[(1, 2)]);
    assert_eq!(run_report(&mut surface, Focus::Current, &pattern()).unwrap(), "null");

    let mut surface = Recorder::new(DOC, 4, RANGES);
    assert_eq!(run_report(&mut surface, Focus::NextSibling, &pattern()).unwrap(), "null");
    assert!(surface.calls.is_empty());
}

#[test]
fn test_report_describes_plan_and_batch() {
    let mut surface = Recorder::new(DOC, 2, RANGES);

    let report = run_report(&mut surface, Focus::NextSibling, &pattern()).unwrap();
    let json: Value = serde_json::from_str(&report).unwrap();

    assert_eq!(json["plan"]["focus"], "next_sibling");
    assert_eq!(json["plan"]["focus_line"], 4);
    assert_eq!(json["plan"]["move_cursor"], true);
    assert_eq!(json["plan"]["decisions"].as_array().unwrap().len(), 5);
    assert_eq!(
        json["instructions"],
        serde_json::json!([
            {"action": "unfold", "range": {"start": 0, "end": 4}},
            {"action": "fold", "range": {"start": 2, "end": 3}},
        ])
    );
    assert_eq!(surface.cursor, Cursor { line: 4, column: 0 });
}
