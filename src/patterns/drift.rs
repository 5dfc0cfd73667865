//! Upward drifting hashed particles, plain and with the logo mask

use super::letter_mask::letter_mask;
use super::FLOW_CHARS;
use crate::audio::AudioSignal;
use crate::grid::Grid;
use crate::noise::{floor_i, hash2, pick};

/// Text spelled out by the Logo pattern unless configured otherwise
pub const DEFAULT_LOGO_TEXT: &str = "HEALTHCODE360";

const DENSITY: f64 = 0.3;
const CELL_SIZE: f64 = 2.5;

const LIGHT_CHARS: [char; 14] = ['·', '*', '+', '-', '=', '×', '÷', '±', '•', '○', '●', '░', '▄', '▀'];
const MEDIUM_CHARS: [char; 9] = ['░', '▒', '▄', '▀', '*', '+', '=', '×', '±'];
const THICK_CHARS: [char; 8] = ['▒', '▓', '▄', '▀', '*', '+', '=', '×'];
const VERY_THICK_CHARS: [char; 6] = ['▓', '█', '▄', '▀', '*', '+'];

/// Row position scrolled upward and wrapped into `[0, rows * CELL_SIZE)`
fn wrapped_row(row: usize, rows: usize, frame: f64) -> f64 {
    let height = rows as f64 * CELL_SIZE;
    let up = row as f64 - frame * 0.14;
    ((up % height) + height) % height
}

/// Hash of a column against the wrapped row bucketed at `scale` cells
fn drift_hash(col: usize, mult: i64, wrapped: f64, scale: f64, row_mult: i64) -> i64 {
    hash2(col as i64, mult, floor_i(wrapped / (CELL_SIZE * scale)), row_mult, 0, 100)
}

fn drift_intensity(col: usize, wrapped: f64) -> f64 {
    let h1 = drift_hash(col, 113, wrapped, 1.0, 157) as f64 / 100.0;
    let h2 = drift_hash(col, 197, wrapped, 1.3, 211) as f64 / 100.0;
    (h1 + h2) / 2.0
}

/// Light Drift: sparse particles rising and wrapping around
pub fn light_drift(cols: usize, rows: usize, frame: f64, _audio: Option<&AudioSignal>) -> Grid {
    let mut grid = Grid::new(cols, rows);

    for row in 0..grid.rows() {
        let wrapped = wrapped_row(row, rows, frame);
        for col in 0..grid.cols() {
            let combined = drift_intensity(col, wrapped);
            if combined > DENSITY {
                let index = ((combined - DENSITY) / (1.0 - DENSITY) * 6.0).floor();
                grid.set(col, row, pick(&FLOW_CHARS, index, ' '));
            }
        }
    }
    grid
}

/// Light Drift where particles inside the letters of `text` switch to
/// heavier glyphs, so the words emerge out of the drift
pub fn logo_with_text(cols: usize, rows: usize, frame: f64, text: &str) -> Grid {
    let mut grid = Grid::new(cols, rows);

    for row in 0..grid.rows() {
        let wrapped = wrapped_row(row, rows, frame);
        for col in 0..grid.cols() {
            if drift_intensity(col, wrapped) <= DENSITY {
                continue;
            }

            let char_hash = drift_hash(col, 271, wrapped, 0.7, 307) as f64 / 100.0;
            let choose = |palette: &[char], fallback| {
                pick(palette, (char_hash * palette.len() as f64).floor(), fallback)
            };

            let mask = letter_mask(col, row, cols, rows, text);
            let ch = if mask > 0.75 {
                choose(&VERY_THICK_CHARS[..], '▓')
            } else if mask > 0.6 {
                choose(&THICK_CHARS[..], '▒')
            } else if mask > 0.45 {
                choose(&MEDIUM_CHARS[..], '░')
            } else {
                choose(&LIGHT_CHARS[..], '·')
            };
            grid.set(col, row, ch);
        }
    }
    grid
}
