//! Column cascades: vertical code rain in two-cell columns

use super::CODE_CHARS;
use crate::audio::AudioSignal;
use crate::grid::Grid;
use crate::noise::{breath, hash_unit, pick, unit_sin};
use std::f64::consts::PI;

const COLUMN_SPACING: usize = 2;

/// Two slow breaths of different period blended together
fn double_breath(frame: f64) -> f64 {
    let b1 = breath(frame, 0.012, 0.0, 0.08, 0.92);
    let b2 = breath(frame, 0.008, PI / 3.0, 0.06, 0.94);
    (b1 + b2) / 2.0
}

/// Per-column identity shared by the cascades
pub(super) struct Column {
    pub(super) hash: f64,
    /// 1 on the column centre line, fading to 0 across the gap
    pub(super) fade: f64,
}

impl Column {
    pub(super) fn of(col: usize) -> Self {
        let id = (col / COLUMN_SPACING) as i64;
        let center = (id as usize * COLUMN_SPACING) as f64 + COLUMN_SPACING as f64 / 2.0;
        let width = COLUMN_SPACING as f64 * 0.6;
        Self {
            hash: hash_unit(id, 137, 1000),
            fade: (1.0 - (col as f64 - center).abs() / width).max(0.0),
        }
    }
}

/// HealthCode360: three bottom-up cascade layers per column over a noise
/// floor, so every cell shows at least a dot
pub fn code_cascade(cols: usize, rows: usize, frame: f64, _audio: Option<&AudioSignal>) -> Grid {
    let mut grid = Grid::new(cols, rows);
    let breath = double_breath(frame);
    let vertical_speed = frame * 0.08;
    let span = rows as f64 * 2.0;
    let frame_step = (frame * 0.5).floor() as i64;

    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            let column = Column::of(col);

            let cell_id = (row * cols + col) as i64;
            let h1 = hash_unit(cell_id, 137, 1000);
            let h2 = hash_unit(cell_id, 211, 1000);
            let h3 = hash_unit(cell_id, 307, 1000);

            let speed_variation = 0.6 + column.hash * 0.8;
            let cell_speed_variation = 0.9 + h1 * 0.2;
            let column_speed = vertical_speed * speed_variation * cell_speed_variation;

            let bottom_up = (rows - row) as f64;
            let c1 = (bottom_up - column_speed + column.hash * span) % span;
            let c2 = (bottom_up - column_speed * 0.7 + h2 * span) % span;
            let c3 = (bottom_up - column_speed * 1.3 + h3 * span) % span;

            let cascade = (unit_sin(c1 * 0.15) * column.fade)
                .max(unit_sin(c2 * 0.15) * column.fade * 0.7)
                .max(unit_sin(c3 * 0.15) * column.fade * 0.5);

            let n1 = unit_sin(h1 * PI * 2.0 + frame * 0.01);
            let n2 = unit_sin(h2 * PI * 2.0 + frame * 0.008);
            let n3 = unit_sin(h3 * PI * 2.0 + frame * 0.006);
            let noise = n1 * 0.4 + n2 * 0.3 + n3 * 0.3;

            let base = cascade * 0.75 + noise * 0.25;
            let value = (base * breath).max(0.25);

            let char_hash = (cell_id.wrapping_mul(157).wrapping_add(frame_step) % 1000) as f64 / 1000.0;

            let ch = if value > 0.65 {
                let smooth = (value - 0.65) / 0.35;
                if smooth > 0.85 && cascade > 0.7 {
                    '*'
                } else if smooth > 0.7 {
                    '○'
                } else if smooth > 0.5 {
                    '◦'
                } else {
                    '+'
                }
            } else if value > 0.45 {
                let smooth = (value - 0.45) / 0.2;
                if smooth > 0.7 && cascade > 0.5 {
                    if char_hash > 0.7 {
                        '*'
                    } else {
                        '─'
                    }
                } else if smooth > 0.5 {
                    '◦'
                } else {
                    '•'
                }
            } else if value > 0.25 {
                let smooth = (value - 0.25) / 0.2;
                if smooth > 0.6 {
                    '─'
                } else if smooth > 0.3 {
                    '•'
                } else {
                    '·'
                }
            } else if value > 0.12 {
                '·'
            } else {
                continue;
            };
            grid.set(col, row, ch);
        }
    }
    grid
}

/// Digital Fog 3: falling code with a bright head and a fading tail; hex
/// digits appear on the brightest heads
pub fn digital_fog3(cols: usize, rows: usize, frame: f64, _audio: Option<&AudioSignal>) -> Grid {
    let mut grid = Grid::new(cols, rows);
    let breath = double_breath(frame);
    let vertical_speed = frame * 0.08;
    let span = rows as f64 * 2.0;
    let frame_step = (frame * 0.5).floor() as i64;

    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            let column = Column::of(col);

            let column_speed = vertical_speed * (0.7 + column.hash * 0.6);
            let vertical_pos = (row as f64 - column_speed + column.hash * rows as f64) % span;

            let head = unit_sin(vertical_pos * 0.15);
            let tail = (1.0 - (vertical_pos / rows as f64) * 0.7).max(0.0);
            let cascade = head * tail * column.fade;

            let n1 = unit_sin(col as f64 * 0.05 + frame * 0.01);
            let n2 = unit_sin(col as f64 * 0.08 + row as f64 * 0.03 + frame * 0.008);
            let noise = n1 * 0.6 + n2 * 0.4;

            let value = (cascade * 0.7 + noise * 0.3) * breath;

            let char_hash = ((col as i64 * 113 + row as i64 * 197).wrapping_add(frame_step) % 1000) as f64 / 1000.0;
            let code = pick(&CODE_CHARS, (char_hash * CODE_CHARS.len() as f64).floor(), '0');

            let ch = if value > 0.65 {
                let smooth = (value - 0.65) / 0.35;
                if smooth > 0.85 && cascade > 0.7 {
                    code
                } else if smooth > 0.6 {
                    '○'
                } else if smooth > 0.4 {
                    '●'
                } else {
                    '◦'
                }
            } else if value > 0.45 {
                let smooth = (value - 0.45) / 0.2;
                if smooth > 0.7 && cascade > 0.5 && char_hash > 0.7 {
                    code
                } else if smooth > 0.7 {
                    '◦'
                } else if smooth > 0.4 {
                    '•'
                } else {
                    '◦'
                }
            } else if value > 0.25 {
                if (value - 0.25) / 0.2 > 0.5 {
                    '•'
                } else {
                    '·'
                }
            } else if value > 0.12 {
                '·'
            } else {
                continue;
            };
            grid.set(col, row, ch);
        }
    }
    grid
}
