//! fovea: Focus folding for outlined documents.
#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use fovea::error::Result;
use fovea::surface::{Cursor, Surface};
use fovea::{app_state, buffer, config, heading, logging, plan, surface, ui};
use ratatui::crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "fovea")]
#[command(about = "Focus folding for outlined documents", long_about = None)]
struct Args {
    /// Document to view
    #[arg(value_name = "FILE")]
    path: PathBuf,

    /// Run a single focus command and print the resulting fold plan as JSON
    #[arg(long, value_enum)]
    focus: Option<plan::Focus>,

    /// Zero-based cursor line for --focus
    #[arg(long, default_value_t = 0)]
    line: usize,

    /// Heading marker character
    #[arg(long, short = 'm', value_name = "CHAR")]
    marker: Option<String>,

    /// Write logs to this file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut cfg = config::Config::load()?;

    // Override config with command line args
    if let Some(marker) = args.marker {
        cfg.marker = marker;
    }

    let headless = args.focus.is_some();
    logging::init(&cfg.log_level, args.log_file.as_deref(), headless)?;

    let pattern = heading::HeadingPattern::new(cfg.marker_char()?)?;

    if let Some(focus) = args.focus {
        return run_headless(&args.path, &pattern, focus, args.line);
    }

    let state = app_state::AppState::open(args.path, pattern, cfg.scroll_padding)?;
    run_tui(state)
}

fn run_headless(
    path: &Path,
    pattern: &heading::HeadingPattern,
    focus: plan::Focus,
    line: usize,
) -> Result<()> {
    let mut buffer = buffer::FoldBuffer::open(path, pattern)?;
    buffer.set_cursor(Cursor { line, column: 0 });
    let report = surface::run_report(&mut buffer, focus, pattern)?;
    println!("{report}");
    Ok(())
}

fn run_tui(mut app: app_state::AppState) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut app_state::AppState,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        let page = isize::try_from(terminal.size()?.height)
            .unwrap_or(isize::MAX)
            .saturating_sub(8)
            .max(1);

        if let Some(focus) = focus_command(key) {
            app.focus(focus);
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match (key.code, ctrl) {
            (KeyCode::Char('q') | KeyCode::Esc, _) | (KeyCode::Char('c'), true) => return Ok(()),
            (KeyCode::Down | KeyCode::Char('j'), false) => app.buffer.move_cursor(1),
            (KeyCode::Up | KeyCode::Char('k'), false) => app.buffer.move_cursor(-1),
            (KeyCode::PageDown, _) => app.buffer.move_cursor(page),
            (KeyCode::PageUp, _) => app.buffer.move_cursor(-page),
            (KeyCode::Home | KeyCode::Char('g'), _) => app.buffer.jump_cursor(false),
            (KeyCode::End | KeyCode::Char('G'), _) => app.buffer.jump_cursor(true),
            (KeyCode::Char('z'), _) => app.toggle_fold(),
            (KeyCode::Char('u'), _) => app.unfold_all(),
            (KeyCode::Char('r'), _) => {
                if let Err(e) = app.reload() {
                    app.message = Some(format!("Error reloading: {e}"));
                }
            }
            _ => {}
        }
    }
}

/// Maps a key press to one of the three focus commands.
fn focus_command(key: KeyEvent) -> Option<plan::Focus> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match (key.code, ctrl) {
        (KeyCode::Char('f') | KeyCode::Enter, _) => Some(plan::Focus::Current),
        (KeyCode::Char('n' | ']'), _) | (KeyCode::Down, true) => Some(plan::Focus::NextSibling),
        (KeyCode::Char('p' | '['), _) | (KeyCode::Up, true) => Some(plan::Focus::PreviousSibling),
        _ => None,
    }
}
