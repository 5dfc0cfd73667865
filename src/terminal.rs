use crate::render::{GlyphStyle, Rgb, Rgba, Surface};
use crate::scheduler::Viewport;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{poll, read, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{disable_raw_mode, enable_raw_mode, size, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::fmt::Write as _;
use std::io::{self, stdout, Write};
use std::time::Duration;

/// Terminal surface. Each character cell stands for a `cell_width` ×
/// `cell_height` block of the pixel space the renderer draws in.
pub struct Terminal {
    width: u16,
    height: u16,
    cell_width: u32,
    cell_height: u32,
    background: Rgb,
    buffer: Vec<Vec<Cell>>,
    alternate_screen: bool,
    attached: bool,
}

/// A single cell in the terminal buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
}

impl Cell {
    fn blank(bg: Rgb) -> Self {
        Self {
            ch: ' ',
            fg: bg,
            bg,
            bold: false,
        }
    }
}

/// Input the display loop cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Key(KeyCode, KeyModifiers),
    Resize(u16, u16),
}

impl Input {
    /// The part of a terminal event the display reacts to, if any
    fn from_event(event: Event) -> Option<Self> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => Some(Input::Key(key.code, key.modifiers)),
            Event::Resize(cols, rows) => Some(Input::Resize(cols, rows)),
            _ => None,
        }
    }
}

fn color(c: Rgb) -> Color {
    Color::Rgb { r: c.r, g: c.g, b: c.b }
}

impl Terminal {
    /// Take over the real terminal for drawing
    pub fn new(alternate_screen: bool, cell_width: u32, cell_height: u32) -> io::Result<Self> {
        let (width, height) = size()?;

        if alternate_screen {
            enable_raw_mode()?;
            execute!(stdout(), EnterAlternateScreen, Hide, Clear(ClearType::All))?;
        }

        let mut term = Self::offscreen(width, height, cell_width, cell_height);
        term.alternate_screen = alternate_screen;
        term.attached = true;
        Ok(term)
    }

    /// Buffer-only terminal that never touches stdout
    pub fn offscreen(cols: u16, rows: u16, cell_width: u32, cell_height: u32) -> Self {
        let background = Rgb::new(0, 0, 0);
        Self {
            width: cols,
            height: rows,
            cell_width,
            cell_height,
            background,
            buffer: vec![vec![Cell::blank(background); cols as usize]; rows as usize],
            alternate_screen: false,
            attached: false,
        }
    }

    /// Terminal dimensions in character cells
    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Pixel space covered by the terminal
    pub fn viewport(&self) -> Viewport {
        Viewport {
            width: self.width as u32 * self.cell_width,
            height: self.height as u32 * self.cell_height,
            cell_width: self.cell_width,
            cell_height: self.cell_height,
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.width = cols;
        self.height = rows;
        self.buffer = vec![vec![Cell::blank(self.background); cols as usize]; rows as usize];
        if self.attached {
            let _ = execute!(stdout(), Clear(ClearType::All));
        }
    }

    pub fn cell(&self, x: u16, y: u16) -> Option<&Cell> {
        self.buffer.get(y as usize).and_then(|row| row.get(x as usize))
    }

    fn cell_at(&self, px: f64, py: f64) -> Option<(usize, usize)> {
        if self.cell_width == 0 || self.cell_height == 0 || px < 0.0 || py < 0.0 {
            return None;
        }
        let x = (px / self.cell_width as f64).floor() as usize;
        let y = (py / self.cell_height as f64).floor() as usize;
        (x < self.width as usize && y < self.height as usize).then_some((x, y))
    }

    /// Write overlay text directly into cells, clipped to the screen
    pub fn set_text(&mut self, x: u16, y: u16, s: &str, fg: Rgb, bg: Rgb, bold: bool) {
        let Some(row) = self.buffer.get_mut(y as usize) else {
            return;
        };
        for (i, ch) in s.chars().enumerate() {
            if let Some(cell) = row.get_mut(x as usize + i) {
                *cell = Cell { ch, fg, bg, bold };
            }
        }
    }

    /// Render the entire buffer to screen
    pub fn render(&self) -> io::Result<()> {
        if !self.attached {
            return Ok(());
        }
        let mut out = stdout().lock();
        let mut last: Option<(Rgb, Rgb, bool)> = None;

        for (y, row) in self.buffer.iter().enumerate() {
            queue!(out, MoveTo(0, y as u16))?;
            for cell in row {
                let style = (cell.fg, cell.bg, cell.bold);
                if last != Some(style) {
                    queue!(
                        out,
                        SetAttribute(if cell.bold { Attribute::Bold } else { Attribute::NormalIntensity }),
                        SetForegroundColor(color(cell.fg)),
                        SetBackgroundColor(color(cell.bg))
                    )?;
                    last = Some(style);
                }
                queue!(out, Print(cell.ch))?;
            }
        }

        queue!(out, SetAttribute(Attribute::Reset), ResetColor)?;
        out.flush()
    }

    /// Next key press or resize, waiting at most `timeout_ms`. Mouse, focus
    /// and paste events are skipped so they never end a drain of the queue.
    pub fn poll_input(&self, timeout_ms: u64) -> io::Result<Option<Input>> {
        let mut timeout = Duration::from_millis(timeout_ms);
        while poll(timeout)? {
            if let Some(input) = Input::from_event(read()?) {
                return Ok(Some(input));
            }
            timeout = Duration::ZERO;
        }
        Ok(None)
    }

    /// Buffer as text. With `color`, every run of cells carries 24-bit ANSI
    /// foreground and background codes.
    pub fn to_ansi(&self, color: bool) -> String {
        let mut out = String::new();
        for row in &self.buffer {
            let mut last: Option<(Rgb, Rgb, bool)> = None;
            for cell in row {
                if color {
                    let style = (cell.fg, cell.bg, cell.bold);
                    if last != Some(style) {
                        out.push_str("\x1b[0m");
                        if cell.bold {
                            out.push_str("\x1b[1m");
                        }
                        let _ = write!(
                            out,
                            "\x1b[38;2;{};{};{}m\x1b[48;2;{};{};{}m",
                            cell.fg.r, cell.fg.g, cell.fg.b, cell.bg.r, cell.bg.g, cell.bg.b
                        );
                        last = Some(style);
                    }
                }
                out.push(cell.ch);
            }
            if color {
                out.push_str("\x1b[0m");
            }
            out.push('\n');
        }
        out
    }

    /// Print buffer to stdout (for print mode)
    pub fn print_to_stdout(&self, color: bool) -> io::Result<()> {
        let mut out = stdout().lock();
        out.write_all(self.to_ansi(color).as_bytes())?;
        out.flush()
    }
}

impl Surface for Terminal {
    fn fill_background(&mut self, color: Rgb) {
        self.background = color;
        for row in &mut self.buffer {
            row.fill(Cell::blank(color));
        }
    }

    fn draw_glyph(&mut self, x: f64, y: f64, ch: char, style: &GlyphStyle) {
        let Some((cx, cy)) = self.cell_at(x, y) else {
            return;
        };
        let cell = &mut self.buffer[cy][cx];
        *cell = Cell {
            ch,
            fg: style.color.over(cell.bg, style.alpha),
            bg: cell.bg,
            bold: style.glow.is_some(),
        };
    }

    /// Tints every cell the rectangle touches. A terminal cannot draw a
    /// 1-px line, so the tint covers whole cells.
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgba) {
        if self.cell_width == 0 || self.cell_height == 0 || width <= 0.0 || height <= 0.0 {
            return;
        }
        let cw = self.cell_width as f64;
        let ch = self.cell_height as f64;
        let x0 = (x / cw).floor().max(0.0) as usize;
        let y0 = (y / ch).floor().max(0.0) as usize;
        let x1 = (((x + width) / cw).ceil() as usize).min(self.width as usize);
        let y1 = (((y + height) / ch).ceil() as usize).min(self.height as usize);

        for row in self.buffer.iter_mut().take(y1).skip(y0) {
            for cell in row.iter_mut().take(x1).skip(x0) {
                cell.bg = color.rgb.over(cell.bg, color.alpha);
                if cell.ch == ' ' {
                    cell.fg = cell.bg;
                }
            }
        }
    }

    fn present(&mut self) -> io::Result<()> {
        self.render()
    }

    fn width(&self) -> Option<f64> {
        Some(self.width as f64 * self.cell_width as f64)
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        if self.alternate_screen {
            let _ = execute!(stdout(), ResetColor, Show, LeaveAlternateScreen);
            let _ = disable_raw_mode();
        }
    }
}
