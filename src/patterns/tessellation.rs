//! Dot fields and fogs built on square or hexagonal cell tessellations
//!
//! Each cell of the tessellation gets a stable hashed intensity; a fade from
//! the cell centre turns cells into soft clusters, and traveling "formation"
//! waves over the cell ids make the clusters swell and recede.

use super::TESSELLATION_CHARS;
use crate::audio::AudioSignal;
use crate::grid::Grid;
use crate::noise::{breath, floor_i, hash2, hash_mod, hash_triple, hash_unit, pick, round_half_up, unit_sin};

/// Cube-rounded hexagon cell in axial `(q, r, s)` coordinates
struct HexCell {
    q: f64,
    r: f64,
    s: f64,
    /// Distance from the cell centre, 0 at the centre, ~0.5 at the border
    dist: f64,
}

impl HexCell {
    fn at(x: f64, y: f64) -> Self {
        let q = 2.0 / 3.0 * x;
        let r = -1.0 / 3.0 * x + 3f64.sqrt() / 3.0 * y;
        let s = -q - r;

        let qr = round_half_up(q);
        let rr = round_half_up(r);
        let sr = round_half_up(s);

        let dist = (qr - q).abs().max((rr - r).abs()).max((sr - s).abs());
        Self { q: qr, r: rr, s: sr, dist }
    }

    fn id(&self) -> i64 {
        (self.q * 1000.0 + self.r * 100.0 + self.s) as i64
    }

    /// Three traveling waves across cell ids, averaged into `[0, 1]`
    fn formation(&self, speed: f64) -> f64 {
        let f1 = unit_sin((self.q + self.r) * 0.3 + speed);
        let f2 = unit_sin((self.q - self.s) * 0.25 + speed * 0.7);
        let f3 = unit_sin((self.r + self.s) * 0.2 + speed * 1.2);
        (f1 + f2 + f3) / 3.0
    }
}

/// Density-relative glyph: how far above the threshold, in six steps
fn above_density(intensity: f64, density: f64) -> char {
    let normalized = (intensity - density) / (1.0 - density);
    pick(&TESSELLATION_CHARS, (normalized * 6.0).floor(), ' ')
}

/// Dot Field: hashed square clusters with a fast shallow breath
pub fn dot_field(cols: usize, rows: usize, frame: f64, _audio: Option<&AudioSignal>) -> Grid {
    let mut grid = Grid::new(cols, rows);
    let density = 0.05 * breath(frame, 4.0, 0.0, 0.15, 0.85);
    let cell_size = 3.5;
    let vertical_pulse = (frame * 0.05).sin() * 0.2;

    for row in 0..grid.rows() {
        let shifted_row = row as f64 + vertical_pulse;
        let cell_row = floor_i(shifted_row / cell_size);
        let local_row = (shifted_row % cell_size) / cell_size;

        for col in 0..grid.cols() {
            let cell_col = floor_i(col as f64 / cell_size);

            let h1 = hash2(cell_col, 137, cell_row, 193, 0, 100) as f64 / 100.0;
            let h2 = hash2(cell_col, 211, cell_row, 157, 0, 100) as f64 / 100.0;
            let h3 = hash2(cell_col, 307, cell_row, 271, 0, 100) as f64 / 100.0;

            let local_col = (col as f64 % cell_size) / cell_size;
            let dist = ((local_row - 0.5).powi(2) + (local_col - 0.5).powi(2)).sqrt();
            let fade = 1.0 - dist * 1.4;

            let intensity = (h1 + h2 + h3) / 3.0 * fade.max(0.0);
            if intensity > density {
                grid.set(col, row, above_density(intensity, density));
            }
        }
    }
    grid
}

/// Dot Field 2: slowly rotating hex tessellation with a radial fade
pub fn dot_field2(cols: usize, rows: usize, frame: f64, _audio: Option<&AudioSignal>) -> Grid {
    let mut grid = Grid::new(cols, rows);
    let density = 0.18 * breath(frame, 0.02, 0.0, 0.1, 0.9);
    let tile_size = 5.0;
    let center_x = cols as f64 / 2.0;
    let center_y = rows as f64 / 2.0;
    let max_dist = (center_x * center_x + center_y * center_y).sqrt();

    let rotation = frame * 0.01;
    let (rot_sin, rot_cos) = rotation.sin_cos();
    let formation_speed = frame * 0.04;

    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            let dx = col as f64 - center_x;
            let dy = row as f64 - center_y;

            let rotated_x = dx * rot_cos - dy * rot_sin;
            let rotated_y = dx * rot_sin + dy * rot_cos;
            let hex = HexCell::at(rotated_x / tile_size, rotated_y / tile_size);

            let hex_intensity = hash_triple(hex.id(), 1000);
            let formation = hex.formation(formation_speed);
            let radial_fade = 1.0 - ((dx * dx + dy * dy).sqrt() / max_dist) * 0.3;
            let hex_fade = (1.0 - hex.dist * 1.5).max(0.0);

            let intensity = hex_intensity * hex_fade * formation * radial_fade;
            if intensity > density {
                grid.set(col, row, above_density(intensity, density));
            }
        }
    }
    grid
}

/// Digital Fog: fine fixed hex tessellation covering the whole screen, with
/// faint ambient dots in the cells that miss the threshold
pub fn digital_fog(cols: usize, rows: usize, frame: f64, _audio: Option<&AudioSignal>) -> Grid {
    let mut grid = Grid::new(cols, rows);
    let density = 0.08 * breath(frame, 0.02, 0.0, 0.1, 0.9);
    let tile_size = 2.5;
    let formation_speed = frame * 0.04;

    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            let hex = HexCell::at(col as f64 / tile_size, row as f64 / tile_size);

            let hex_intensity = hash_triple(hex.id(), 1000);
            let formation = hex.formation(formation_speed);
            let hex_fade = (1.0 - hex.dist * 1.5).max(0.0);

            let intensity = hex_intensity * hex_fade * formation;
            if intensity > density {
                grid.set(col, row, above_density(intensity, density));
            } else if hex_intensity * 0.4 > density * 0.3 {
                grid.set(col, row, '·');
            }
        }
    }
    grid
}

/// Digital Fog 2: electrons drifting over a circuit board; mostly small dots
/// with rare larger symbols picked per 3×3 block
pub fn digital_fog2(cols: usize, rows: usize, frame: f64, _audio: Option<&AudioSignal>) -> Grid {
    let mut grid = Grid::new(cols, rows);
    let flow_speed = frame * 0.02;
    let cell_size = 3;

    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            let cell_id = (row / cell_size) as i64 * 1000 + (col / cell_size) as i64;

            let wave = unit_sin(col as f64 * 0.05 + row as f64 * 0.03 + flow_speed);
            let intensity = hash_triple(cell_id, 1000) * wave;
            let rarity = hash_unit(cell_id, 149, 1000);

            let ch = if intensity > 0.4 && rarity > 0.92 {
                if hash_mod(cell_id, 173, 100) as f64 / 100.0 > 0.5 {
                    '○'
                } else {
                    '+'
                }
            } else if intensity > 0.3 && rarity > 0.85 {
                if hash_mod(cell_id, 191, 100) as f64 / 100.0 > 0.5 {
                    '•'
                } else {
                    '◦'
                }
            } else if intensity > 0.15 {
                '·'
            } else {
                continue;
            };
            grid.set(col, row, ch);
        }
    }
    grid
}
