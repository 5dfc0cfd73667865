//! Frame clock driven by the host callback
//!
//! The display loop calls [`Scheduler::on_tick`] roughly every 16 ms with the
//! handle it got back last time. Ticks closer together than the paint
//! interval are throttled; a painting tick advances the virtual frame by the
//! elapsed time in 16.67 ms units, clamped so a long stall never jumps the
//! animation ahead by more than two frames.
//!
//! Every tick hands out a fresh [`TickHandle`]. Only the most recent handle
//! is honoured: resizing or tearing down bumps the generation, which turns
//! any handle still in flight into a no-op.

/// Milliseconds per frame unit
pub const FRAME_MS: f64 = 16.67;

/// Largest frame advance applied in one painting tick
pub const MAX_DELTA: f64 = 2.0;

pub const DEFAULT_FPS: u32 = 30;

/// Surface size in pixels plus the cell size used to lay out the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub cell_width: u32,
    pub cell_height: u32,
}

impl Viewport {
    pub fn cols(&self) -> usize {
        self.width.checked_div(self.cell_width).unwrap_or(0) as usize
    }

    pub fn rows(&self) -> usize {
        self.height.checked_div(self.cell_height).unwrap_or(0) as usize
    }

    /// All four dimensions positive and at least one whole cell
    pub fn is_drawable(&self) -> bool {
        self.width > 0 && self.height > 0 && self.cols() > 0 && self.rows() > 0
    }
}

/// Permission to run one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickHandle {
    generation: u64,
    serial: u64,
}

/// Everything a generator run needs for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameContext {
    pub cols: usize,
    pub rows: usize,
    pub frame: f64,
    pub delta: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tick {
    /// Handle was cancelled or superseded; do nothing
    Stale,
    /// Too soon to paint; call again with the new handle
    Throttled(TickHandle),
    /// Paint this frame, then call again with `next`
    Frame { context: FrameContext, next: TickHandle },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Running { cols: usize, rows: usize },
}

pub struct Scheduler {
    interval_ms: f64,
    frame: f64,
    state: SchedulerState,
    generation: u64,
    serial: u64,
    pending: Option<TickHandle>,
    last_paint_ms: Option<f64>,
    paused: bool,
}

impl Scheduler {
    pub fn new(fps: u32) -> Self {
        Self {
            interval_ms: 1000.0 / fps.max(1) as f64,
            frame: 0.0,
            state: SchedulerState::Idle,
            generation: 0,
            serial: 0,
            pending: None,
            last_paint_ms: None,
            paused: false,
        }
    }

    fn issue(&mut self) -> TickHandle {
        self.serial += 1;
        let handle = TickHandle {
            generation: self.generation,
            serial: self.serial,
        };
        self.pending = Some(handle);
        handle
    }

    /// Apply a new surface size. Enters (or stays in) Running when the
    /// viewport is drawable and returns the handle for the next tick;
    /// otherwise tears down and returns `None`.
    pub fn resize(&mut self, viewport: Viewport) -> Option<TickHandle> {
        if !viewport.is_drawable() {
            self.teardown();
            return None;
        }

        let (cols, rows) = (viewport.cols(), viewport.rows());
        if self.state == SchedulerState::Idle {
            self.last_paint_ms = None;
        }
        tracing::debug!(cols, rows, frame = self.frame, "scheduler running");

        self.state = SchedulerState::Running { cols, rows };
        self.generation += 1;
        Some(self.issue())
    }

    /// Cancel the pending tick and go idle. The frame counter is kept.
    pub fn teardown(&mut self) {
        if self.state == SchedulerState::Idle && self.pending.is_none() {
            return;
        }
        tracing::debug!(frame = self.frame, "scheduler teardown");
        self.state = SchedulerState::Idle;
        self.pending = None;
        self.generation += 1;
    }

    pub fn on_tick(&mut self, handle: TickHandle, now_ms: f64) -> Tick {
        let SchedulerState::Running { cols, rows } = self.state else {
            return Tick::Stale;
        };
        if self.pending != Some(handle) {
            return Tick::Stale;
        }

        let next = self.issue();
        if self.paused {
            return Tick::Throttled(next);
        }

        let delta = match self.last_paint_ms {
            None => 0.0,
            Some(last) => {
                let elapsed = now_ms - last;
                if !(elapsed >= self.interval_ms) {
                    return Tick::Throttled(next);
                }
                (elapsed / FRAME_MS).min(MAX_DELTA)
            }
        };

        self.last_paint_ms = Some(now_ms);
        self.frame += delta;
        Tick::Frame {
            context: FrameContext {
                cols,
                rows,
                frame: self.frame,
                delta,
            },
            next,
        }
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn frame(&self) -> f64 {
        self.frame
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    /// Handle the next tick must present, if any
    pub fn pending(&self) -> Option<TickHandle> {
        self.pending
    }
}
