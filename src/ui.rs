//! The UI renders the application state into something visible and navigable.
//!
//! The screen is a breadcrumb for the heading under the cursor, the document body with folded
//! sections collapsed to their heading line, and a help bar.

use crate::app_state::AppState;
use crate::surface::Surface;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const HELP: &str =
    "f: Focus | n/p: Next/Prev Header | ↑/↓: Move | z: Toggle Fold | u: Unfold All | r: Reload | q: Quit";

/// Renders the viewer.
pub fn draw(f: &mut Frame, app: &mut AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Breadcrumb
            Constraint::Min(0),    // Document
            Constraint::Length(3), // Help
        ])
        .split(f.area());

    let breadcrumb = app.breadcrumb().join(" > ");
    let breadcrumb_widget =
        Paragraph::new(breadcrumb).block(Block::default().borders(Borders::ALL).title("Outline"));
    f.render_widget(breadcrumb_widget, chunks[0]);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(app.path.display().to_string());
    let inner = block.inner(chunks[1]);
    f.render_widget(block, chunks[1]);
    draw_document(f, app, inner);

    let help_text = app.message.clone().unwrap_or_else(|| HELP.to_string());
    let help = Paragraph::new(help_text).block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[2]);
}

fn draw_document(f: &mut Frame, app: &mut AppState, area: Rect) {
    let height = usize::from(area.height);
    app.buffer.set_viewport_height(height);
    let cursor_line = app.buffer.cursor().line;

    let buffer = &app.buffer;
    let rows: Vec<Line> = buffer
        .visible_lines()
        .into_iter()
        .skip(buffer.top_row())
        .take(height)
        .map(|line| {
            let text = buffer.lines()[line].clone();
            let mut spans = match buffer.level(line) {
                Some(level) => vec![Span::styled(text, heading_style(level))],
                None => vec![Span::raw(text)],
            };
            if buffer.is_folded(line) {
                spans.push(Span::styled(" …", Style::default().fg(Color::DarkGray)));
            }
            let row = Line::from(spans);
            if line == cursor_line {
                row.style(Style::default().add_modifier(Modifier::REVERSED))
            } else {
                row
            }
        })
        .collect();

    f.render_widget(Paragraph::new(rows), area);
}

fn heading_style(level: usize) -> Style {
    let color = match level {
        1 => Color::Magenta,
        2 => Color::Cyan,
        3 => Color::Green,
        4 => Color::Yellow,
        _ => Color::Blue,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}
