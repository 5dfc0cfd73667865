//! Wave fields where darker regions use larger, heavier glyphs

use crate::audio::AudioSignal;
use crate::grid::Grid;
use crate::noise::{hash2, pick, unit_sin};

const LIGHT: [char; 4] = [' ', '·', '•', '○'];
const MEDIUM: [char; 4] = ['░', '▒', '▄', '▀'];
const DARK: [char; 4] = ['▓', '█', '▄', '▀'];

const RADIAL_LIGHT: [char; 3] = [' ', '·', '•'];
const RADIAL_MEDIUM: [char; 3] = ['░', '▒', '▄'];
const RADIAL_DARK: [char; 3] = ['▓', '█', '▀'];

fn sparse_hash(col: usize, row: usize) -> i64 {
    hash2(col as i64, 137, row as i64, 193, 0, 100)
}

/// Step through a band `[low, low + width)` of a palette
fn band(palette: &[char], value: f64, low: f64, width: f64, fallback: char) -> char {
    pick(palette, ((value - low) / width * palette.len() as f64).floor(), fallback)
}

/// Shared light/medium/dark mapping used by Wave Depth and Interference
/// Waves. The lightest band shows sparse hashed specks above `speck_cut`.
fn depth_glyph(value: f64, col: usize, row: usize, speck_cut: i64, speck_div: f64) -> Option<char> {
    if value < 0.2 {
        let hash = sparse_hash(col, row);
        (hash > speck_cut).then(|| pick(&LIGHT, (hash as f64 / speck_div).floor(), ' '))
    } else if value < 0.45 {
        Some(band(&LIGHT, value, 0.2, 0.25, '·'))
    } else if value < 0.7 {
        Some(band(&MEDIUM, value, 0.45, 0.25, '░'))
    } else {
        Some(band(&DARK, value, 0.7, 0.3, '▓'))
    }
}

/// Wave Depth: three overlapping waves
pub fn wave_depth(cols: usize, rows: usize, frame: f64, _audio: Option<&AudioSignal>) -> Grid {
    let mut grid = Grid::new(cols, rows);
    let speed = frame * 0.05;
    let freq = 0.1;

    for row in 0..grid.rows() {
        let r = row as f64;
        for col in 0..grid.cols() {
            let c = col as f64;
            let w1 = unit_sin(c * freq + speed);
            let w2 = unit_sin(c * freq * 1.3 + r * 0.05 + speed * 0.7);
            let w3 = unit_sin(r * freq * 0.8 + speed * 1.2);
            let combined = (w1 + w2 + w3) / 3.0;

            if let Some(ch) = depth_glyph(combined, col, row, 80, 20.0) {
                grid.set(col, row, ch);
            }
        }
    }
    grid
}

/// Radial Wave Field: rings from the centre modulated by a three-lobed
/// angular wave, heavier toward the middle
pub fn radial_wave_field(cols: usize, rows: usize, frame: f64, _audio: Option<&AudioSignal>) -> Grid {
    let mut grid = Grid::new(cols, rows);
    let center_x = cols as f64 / 2.0;
    let center_y = rows as f64 / 2.0;
    let max_dist = (center_x * center_x + center_y * center_y).sqrt();
    let speed = frame * 0.08;
    let freq = 0.15;

    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            let dx = col as f64 - center_x;
            let dy = row as f64 - center_y;
            let dist = (dx * dx + dy * dy).sqrt();

            let radial = unit_sin(dist * freq + speed);
            let angular = (dy.atan2(dx) * 3.0 + speed * 0.5).sin() * 0.3 + 0.7;
            let value = radial * angular * (1.0 - (dist / max_dist) * 0.3);

            let ch = if value < 0.25 {
                // the sparse band draws the palette's leading blank
                if sparse_hash(col, row) > 85 {
                    RADIAL_LIGHT[0]
                } else {
                    continue;
                }
            } else if value < 0.5 {
                band(&RADIAL_LIGHT, value, 0.25, 0.25, '·')
            } else if value < 0.75 {
                band(&RADIAL_MEDIUM, value, 0.5, 0.25, '░')
            } else {
                band(&RADIAL_DARK, value, 0.75, 0.25, '▓')
            };
            grid.set(col, row, ch);
        }
    }
    grid
}

/// Interference Waves: four crossing plane waves
pub fn interference_waves(cols: usize, rows: usize, frame: f64, _audio: Option<&AudioSignal>) -> Grid {
    let mut grid = Grid::new(cols, rows);
    let speed = frame * 0.06;

    for row in 0..grid.rows() {
        let r = row as f64;
        for col in 0..grid.cols() {
            let c = col as f64;
            let w1 = (c * 0.08 + r * 0.06 + speed).sin();
            let w2 = (c * 0.12 - r * 0.09 + speed * 0.8).sin();
            let w3 = (c * 0.15 + r * 0.12 + speed * 1.2).sin();
            let w4 = (c * 0.11 + r * 0.14 + speed * 0.6).sin();
            let value = ((w1 + w2 + w3 + w4) / 4.0 + 1.0) / 2.0;

            if let Some(ch) = depth_glyph(value, col, row, 75, 25.0) {
                grid.set(col, row, ch);
            }
        }
    }
    grid
}
