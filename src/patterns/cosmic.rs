//! Sparse space scenes: stars, quasars, nebulae, dust, nurseries

use crate::audio::AudioSignal;
use crate::grid::Grid;
use crate::noise::{floor_i, hash2, pick, unit_sin};
use std::f64::consts::PI;

fn sparse_hash(col: usize, row: usize) -> i64 {
    hash2(col as i64, 137, row as i64, 193, 0, 100)
}

/// Strongest pulse over `count` point sources laid out in a zig-zag across
/// the screen. Each source fades linearly to zero at `reach`.
fn strongest_source(
    col: usize,
    row: usize,
    cols: usize,
    rows: usize,
    count: usize,
    reach: f64,
    pulse: impl Fn(f64) -> f64,
) -> f64 {
    let mut strongest = 0.0_f64;
    for i in 0..count {
        let sx = cols as f64 / count as f64 * (i as f64 + 0.5);
        let sy = rows as f64 / count as f64 * ((i % 2) as f64 + 0.5);
        let dx = col as f64 - sx;
        let dy = row as f64 - sy;
        let dist = (dx * dx + dy * dy).sqrt();
        strongest = strongest.max(pulse(dist) * (1.0 - dist / reach));
    }
    strongest
}

/// Starry Night: about 8% of cells hold a star; the field shifts as the
/// drift crosses whole cells
pub fn starry_night(cols: usize, rows: usize, frame: f64, _audio: Option<&AudioSignal>) -> Grid {
    const STARS: [char; 5] = ['·', '•', '○', '*', '+'];
    const BRIGHT: [char; 3] = ['*', '+', '×'];

    let mut grid = Grid::new(cols, rows);
    let drift = frame * 0.08;
    let drift_step = floor_i(drift);

    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            let hash = hash2(col as i64, 137, row as i64, 193, drift_step, 100);
            if hash as f64 / 100.0 >= 0.08 {
                continue;
            }
            let drift_pos = (col as f64 * 0.3 + row as f64 * 0.5 + drift) % 100.0;
            let brightness = unit_sin(drift_pos / 100.0 * PI * 2.0);

            let ch = if brightness > 0.7 {
                pick(&BRIGHT, (hash % 3) as f64, '*')
            } else {
                pick(&STARS, (hash % 5) as f64, '·')
            };
            grid.set(col, row, ch);
        }
    }
    grid
}

/// Quasar Field: eight pulsing sources with cores, halos and faint specks
pub fn quasar_field(cols: usize, rows: usize, frame: f64, _audio: Option<&AudioSignal>) -> Grid {
    const CORE: [char; 3] = ['●', '○', '◉'];
    const HALO: [char; 3] = ['·', '•', '○'];
    const FAINT: [char; 2] = ['·', ' '];

    let mut grid = Grid::new(cols, rows);
    let pulse_speed = frame * 0.05;
    let reach = cols.min(rows) as f64 / 4.0;

    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            let strongest = strongest_source(col, row, cols, rows, 8, reach, |d| {
                (d * 0.1 + pulse_speed * 2.0).sin() * 0.3 + 0.7
            });

            let ch = if strongest > 0.5 {
                pick(&CORE, (strongest * 3.0).floor(), '●')
            } else if strongest > 0.25 {
                pick(&HALO, (strongest * 3.0).floor(), '•')
            } else if strongest > 0.1 {
                let hash = sparse_hash(col, row);
                if hash > 85 {
                    pick(&FAINT, (hash % 2) as f64, '·')
                } else {
                    continue;
                }
            } else {
                continue;
            };
            grid.set(col, row, ch);
        }
    }
    grid
}

/// Nebula Drift: three waves set the placement probability and the glyph
pub fn nebula_drift(cols: usize, rows: usize, frame: f64, _audio: Option<&AudioSignal>) -> Grid {
    const BRIGHT: [char; 3] = ['•', '○', '●'];
    const MEDIUM: [char; 2] = ['·', '•'];
    const FAINT: [char; 2] = ['·', ' '];
    const DENSITY: f64 = 0.12;

    let mut grid = Grid::new(cols, rows);
    let drift = frame * 0.07;

    for row in 0..grid.rows() {
        let r = row as f64;
        for col in 0..grid.cols() {
            let c = col as f64;
            let w1 = (c * 0.05 + r * 0.03 + drift).sin();
            let w2 = (c * 0.08 - r * 0.06 + drift * 1.2).sin();
            let w3 = (c * 0.03 + r * 0.08 + drift * 0.8).sin();
            let value = ((w1 + w2 + w3) / 3.0 + 1.0) / 2.0;

            let hash = sparse_hash(col, row);
            if hash as f64 / 100.0 >= value * DENSITY {
                continue;
            }

            let ch = if value > 0.6 {
                pick(&BRIGHT, ((value - 0.6) / 0.4 * 3.0).floor(), '•')
            } else if value > 0.4 {
                pick(&MEDIUM, (hash % 2) as f64, '·')
            } else {
                pick(&FAINT, (hash % 2) as f64, '·')
            };
            grid.set(col, row, ch);
        }
    }
    grid
}

/// Glyph for a dust particle's glow level. The faintest glyph is skipped
/// and the top of the range folds back to `*`.
fn dust_glyph(glow: f64) -> char {
    const GLOW: [char; 7] = ['·', '•', '○', '●', '*', '+', '×'];
    let index = if glow < 0.4 {
        1
    } else if glow < 0.6 {
        2
    } else if glow < 0.7 {
        3
    } else if glow < 0.8 {
        4
    } else if glow < 0.85 {
        5
    } else {
        4
    };
    GLOW[index]
}

/// Cosmic Dust: slow dust where every particle runs its own glow cycle
pub fn cosmic_dust(cols: usize, rows: usize, frame: f64, _audio: Option<&AudioSignal>) -> Grid {
    const DENSITY: f64 = 0.35;

    let mut grid = Grid::new(cols, rows);
    let drift = frame * 0.02;

    for row in 0..grid.rows() {
        let r = row as f64;
        for col in 0..grid.cols() {
            let c = col as f64;
            let dx = (c * 0.015 + drift * 0.5) % 1000.0;
            let dy = (r * 0.012 + drift * 0.7) % 1000.0;
            let drift_pos = (dx * dx + dy * dy).sqrt();

            let w1 = unit_sin(dx / 1000.0 * PI * 2.0);
            let w2 = unit_sin(dy / 1000.0 * PI * 2.0);
            let w3 = (drift_pos / 1500.0 * PI * 2.0 + drift).sin() * 0.3 + 0.7;
            let organic = (w1 + w2 + w3) / 3.0;

            let hash = hash2(col as i64, 137, row as i64, 193, floor_i(drift * 10.0), 100);
            if hash as f64 / 100.0 >= DENSITY * organic {
                continue;
            }

            let offset = hash2(col as i64, 211, row as i64, 307, 0, 1000) as f64;
            let phase = (drift_pos + offset) % 2000.0;
            let glow = (phase / 1200.0 * PI * 3.0 + drift * 2.0).sin() * 0.2 + 0.7;

            let r1 = hash2(col as i64, 401, row as i64, 503, floor_i(drift * 3.0), 100);
            let r2 = hash2(col as i64, 617, row as i64, 719, floor_i(drift * 7.0), 100);
            let variation = (r1 + r2) as f64 / 200.0 * 0.3;

            grid.set(col, row, dust_glyph(organic * glow + variation - 0.15));
        }
    }
    grid
}

/// Stellar Nursery: six pulsing regions spawning proto-stars
pub fn stellar_nursery(cols: usize, rows: usize, frame: f64, _audio: Option<&AudioSignal>) -> Grid {
    const PROTO: [char; 3] = ['○', '●', '◉'];
    const CLOUD: [char; 2] = ['·', '•'];
    const EMPTY_SPACE: [char; 2] = ['·', ' '];

    let mut grid = Grid::new(cols, rows);
    let formation_speed = frame * 0.04;
    let reach = cols.min(rows) as f64 / 3.0;

    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            let strongest = strongest_source(col, row, cols, rows, 6, reach, |d| {
                (d * 0.08 + formation_speed * 3.0).sin() * 0.4 + 0.6
            });
            let hash = sparse_hash(col, row);

            let ch = if strongest > 0.4 {
                if (hash as f64 / 100.0) < strongest * 0.3 {
                    pick(&PROTO, (strongest * 3.0).floor(), '●')
                } else {
                    continue;
                }
            } else if strongest > 0.2 {
                if hash > 94 {
                    pick(&CLOUD, (hash % 2) as f64, '·')
                } else {
                    continue;
                }
            } else if hash > 99 {
                // never true for a mod-100 hash, so open space stays dark
                pick(&EMPTY_SPACE, (hash % 2) as f64, '·')
            } else {
                continue;
            };
            grid.set(col, row, ch);
        }
    }
    grid
}
