//! Interactive full-screen player.
//!
//! Runs the engine on the terminal's event loop: input is polled with a short
//! timeout, queued narration/clock events are applied after every poll, and
//! the screen is redrawn whenever the snapshot or the view changes.

use std::io::{self, BufWriter, Write};
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    cursor::{Hide, Show},
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};

use crate::lesson::Lesson;
use crate::player::input::handle_event;
use crate::player::markers::collect_markers;
use crate::player::render::render_screen;
use crate::player::session::{build_engine, PlayOptions, PlaybackOutcome};
use crate::player::state::{InputResult, ViewState};

/// How long to wait for input before checking engine events.
const INPUT_POLL: Duration = Duration::from_millis(33);

/// Raw mode + alternate screen for the lifetime of the guard.
struct TerminalGuard {
    mouse: bool,
}

impl TerminalGuard {
    fn enter(out: &mut impl Write, mouse: bool) -> Result<Self> {
        terminal::enable_raw_mode()?;
        let guard = Self { mouse };
        execute!(out, EnterAlternateScreen, Hide)?;
        if mouse {
            execute!(out, EnableMouseCapture)?;
        }
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut out = io::stdout();
        if self.mouse {
            let _ = execute!(out, DisableMouseCapture);
        }
        let _ = execute!(out, Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Play `lesson` in the full-screen player until the user quits.
#[cfg(not(tarpaulin_include))]
pub fn play_interactive(lesson: Lesson, options: &PlayOptions) -> Result<PlaybackOutcome> {
    let markers = collect_markers(&lesson);
    let mut engine = build_engine(lesson, options)?;

    let (cols, rows) = terminal::size()?;
    let mut state = ViewState::new(cols, rows);
    let mut stdout = io::stdout();
    let _guard = TerminalGuard::enter(&mut stdout, options.mouse)?;

    if options.autoplay {
        engine.play();
    }

    let mut last = engine.snapshot();
    let mut completed = false;

    let outcome = loop {
        if event::poll(INPUT_POLL)? {
            let input = event::read()?;
            if handle_event(input, &mut state, &mut engine) == InputResult::Quit {
                break PlaybackOutcome::Quit {
                    slide: engine.current_frame(),
                };
            }
        }

        engine.process_pending();
        completed |= engine.is_complete();

        let snapshot = engine.snapshot();
        if snapshot != last {
            last = snapshot;
            state.needs_render = true;
        }

        if state.needs_render {
            let mut out = BufWriter::new(stdout.lock());
            render_screen(&mut out, &options.theme, &mut state, &engine, &markers)?;
            state.needs_render = false;
        }
    };

    tracing::debug!(?outcome, completed, "player closed");
    Ok(if completed {
        PlaybackOutcome::Completed
    } else {
        outcome
    })
}
