//! Interactive display loop
//!
//! One cooperative loop on the main thread stands in for the host's frame
//! callback: every pass drains input, samples the microphone, offers the
//! pending tick to the scheduler, and paints when it gets a frame.

pub mod selector;

use crate::audio::AudioAdapter;
use crate::colors::ThemeState;
use crate::config::DisplayConfig;
use crate::grid::Grid;
use crate::help;
use crate::patterns::Registry;
use crate::render::{Renderer, Surface};
use crate::scheduler::{Scheduler, Tick, TickHandle};
use crate::terminal::{Input, Terminal};
use crossterm::event::{KeyCode, KeyModifiers};
use rand::prelude::*;
use selector::PatternSelector;
use std::io;
use std::time::{Duration, Instant};

/// Host callback cadence, about 60 Hz
const HOST_INTERVAL: Duration = Duration::from_millis(16);

/// How long the status line stays up after a change
const STATUS_MS: f64 = 2500.0;

/// What a key press asks the display to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    TogglePause,
    Next,
    Prev,
    TogglePicker,
    ClosePicker,
    CursorUp,
    CursorDown,
    Confirm,
    Microphone,
    None,
}

/// Map a key to an action. The picker captures arrows, Enter and Esc while
/// it is open.
pub fn action_for(code: KeyCode, modifiers: KeyModifiers, picker_open: bool) -> Action {
    if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
        return Action::Quit;
    }
    match code {
        KeyCode::Esc if picker_open => Action::ClosePicker,
        KeyCode::Up | KeyCode::Char('k') if picker_open => Action::CursorUp,
        KeyCode::Down | KeyCode::Char('j') if picker_open => Action::CursorDown,
        KeyCode::Enter if picker_open => Action::Confirm,
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char(' ') => Action::TogglePause,
        KeyCode::Right | KeyCode::Char('n') => Action::Next,
        KeyCode::Left | KeyCode::Char('p') => Action::Prev,
        KeyCode::Tab | KeyCode::Char('?') => Action::TogglePicker,
        KeyCode::Char('m') => Action::Microphone,
        _ => Action::None,
    }
}

/// Runtime state for the display
struct Display {
    registry: Registry,
    selector: PatternSelector,
    themes: ThemeState,
    scheduler: Scheduler,
    audio: AudioAdapter,
    renderer: Renderer,
    rng: StdRng,
    cycle_ms: Option<f64>,
    shuffle: bool,
    handle: Option<TickHandle>,
    last_grid: Grid,
    last_switch_ms: f64,
    status_until_ms: f64,
    /// User switched the microphone off with `m`
    muted: bool,
    dirty: bool,
}

impl Display {
    fn new(config: &DisplayConfig, registry: Registry) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let selector = PatternSelector::new(registry.len(), registry.resolve_index(config.pattern));
        Self {
            selector,
            registry,
            themes: ThemeState::new(config.theme),
            scheduler: Scheduler::new(config.fps),
            audio: AudioAdapter::system(config.audio),
            renderer: Renderer::new(config.theme, config.cell.width, config.cell.height),
            rng,
            cycle_ms: config.cycle.filter(|s| *s > 0.0).map(|s| s * 1000.0),
            shuffle: config.shuffle,
            handle: None,
            last_grid: Grid::empty(),
            last_switch_ms: 0.0,
            status_until_ms: STATUS_MS,
            muted: false,
            dirty: false,
        }
    }

    fn pattern_name(&self) -> &'static str {
        self.registry.resolve(self.selector.index()).map(|p| p.name).unwrap_or("")
    }

    /// Acquire the microphone on audio-reactive patterns, release it elsewhere
    fn sync_audio(&mut self) {
        if self.on_audio_pattern() && !self.muted {
            self.audio.acquire();
        } else {
            self.audio.release();
        }
    }

    fn pattern_changed(&mut self, now_ms: f64) {
        tracing::info!(index = self.selector.index(), pattern = self.pattern_name(), "pattern selected");
        self.last_switch_ms = now_ms;
        self.status_until_ms = now_ms + STATUS_MS;
        self.sync_audio();
        self.dirty = true;
    }

    fn resize(&mut self, term: &mut Terminal, cols: u16, rows: u16) {
        term.resize(cols, rows);
        self.handle = self.scheduler.resize(term.viewport());
        tracing::debug!(cols, rows, running = self.handle.is_some(), "resize");
    }

    /// Returns false when the user asked to quit
    fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers, now_ms: f64) -> bool {
        if self.themes.handle_key(code) {
            self.renderer.theme = self.themes.theme;
            tracing::info!(theme = self.themes.name(), "theme selected");
            self.dirty = true;
            return true;
        }

        let changed = match action_for(code, modifiers, self.selector.picker_open()) {
            Action::Quit => return false,
            Action::TogglePause => {
                let paused = self.scheduler.toggle_pause();
                tracing::debug!(paused, "pause toggled");
                self.status_until_ms = now_ms + STATUS_MS;
                self.dirty = true;
                false
            }
            Action::Next => self.selector.next(),
            Action::Prev => self.selector.prev(),
            Action::TogglePicker => {
                self.selector.toggle_picker();
                self.dirty = true;
                false
            }
            Action::ClosePicker => {
                self.selector.close_picker();
                self.dirty = true;
                false
            }
            Action::CursorUp => {
                self.selector.cursor_up();
                self.dirty = true;
                false
            }
            Action::CursorDown => {
                self.selector.cursor_down();
                self.dirty = true;
                false
            }
            Action::Confirm => {
                self.dirty = true;
                self.selector.confirm()
            }
            Action::Microphone => {
                self.toggle_microphone();
                self.status_until_ms = now_ms + STATUS_MS;
                self.dirty = true;
                false
            }
            Action::None => false,
        };

        if changed {
            self.pattern_changed(now_ms);
        }
        true
    }

    fn on_audio_pattern(&self) -> bool {
        self.registry
            .resolve(self.selector.index())
            .is_some_and(|p| p.audio_reactive)
    }

    /// `m`: retry after a failure, otherwise flip between listening and muted
    fn toggle_microphone(&mut self) {
        if self.audio.is_capturing() {
            self.muted = true;
            self.audio.release();
        } else {
            self.muted = false;
            if self.on_audio_pattern() {
                self.audio.retry();
            }
        }
    }

    fn cycle(&mut self, now_ms: f64) {
        let Some(cycle_ms) = self.cycle_ms else {
            return;
        };
        if self.scheduler.is_paused() || self.selector.picker_open() || now_ms - self.last_switch_ms < cycle_ms {
            return;
        }
        let changed = if self.shuffle {
            self.selector.shuffle(&mut self.rng)
        } else {
            self.selector.next()
        };
        if changed {
            self.pattern_changed(now_ms);
        } else {
            self.last_switch_ms = now_ms;
        }
    }

    fn status_line(&self) -> String {
        let mut parts = vec![
            format!("{} / {}", self.selector.index(), self.pattern_name()),
            format!("theme {}", self.themes.name()),
            self.audio.status().label(),
        ];
        if self.scheduler.is_paused() {
            parts.push("paused".to_string());
        }
        if self.selector.picker_open() {
            parts.push(help::KEYS.to_string());
        }
        parts.join(" · ")
    }

    fn draw(&mut self, term: &mut Terminal, frame: f64, now_ms: f64) -> io::Result<()> {
        self.renderer.paint(&self.last_grid, frame, term);

        let theme = self.themes.theme;
        if self.selector.picker_open() {
            help::render_picker(term, &theme, &self.registry, self.selector.cursor(), self.selector.index());
        }
        if self.selector.picker_open() || now_ms < self.status_until_ms {
            let line = self.status_line();
            help::render_status(term, &theme, &line);
        }
        self.dirty = false;
        term.present()
    }

    /// Offer the pending tick to the scheduler and paint if it is time
    fn tick(&mut self, term: &mut Terminal, now_ms: f64) -> io::Result<()> {
        let Some(handle) = self.handle else {
            return Ok(());
        };
        match self.scheduler.on_tick(handle, now_ms) {
            Tick::Stale => self.handle = None,
            Tick::Throttled(next) => {
                self.handle = Some(next);
                if self.dirty {
                    self.draw(term, self.scheduler.frame(), now_ms)?;
                }
            }
            Tick::Frame { context, next } => {
                self.handle = Some(next);
                // a muted snapshot is silent but still carries the Voice clock
                self.last_grid = self.registry.generate(
                    self.selector.index(),
                    context.cols,
                    context.rows,
                    context.frame,
                    Some(self.audio.snapshot()),
                );
                self.draw(term, context.frame, now_ms)?;
            }
        }
        Ok(())
    }

    fn teardown(&mut self) {
        self.scheduler.teardown();
        self.handle = None;
        self.audio.release();
    }
}

/// Run the display until the user quits
pub fn run(config: DisplayConfig, registry: Registry) -> io::Result<()> {
    let mut term = Terminal::new(true, config.cell.width, config.cell.height)?;
    let mut state = Display::new(&config, registry);
    let start = Instant::now();

    tracing::info!(
        pattern = state.pattern_name(),
        fps = config.fps,
        cell = %config.cell,
        "display started"
    );

    let (cols, rows) = term.size();
    state.resize(&mut term, cols, rows);
    state.sync_audio();

    let result = (|| -> io::Result<()> {
        loop {
            let now_ms = start.elapsed().as_secs_f64() * 1000.0;

            while let Some(input) = term.poll_input(0)? {
                match input {
                    Input::Key(code, modifiers) => {
                        if !state.handle_key(code, modifiers, now_ms) {
                            return Ok(());
                        }
                    }
                    Input::Resize(cols, rows) => state.resize(&mut term, cols, rows),
                }
            }

            state.audio.poll(now_ms);
            state.cycle(now_ms);
            state.tick(&mut term, now_ms)?;

            std::thread::sleep(HOST_INTERVAL);
        }
    })();

    state.teardown();
    tracing::info!(frame = state.scheduler.frame(), "display stopped");
    result
}
