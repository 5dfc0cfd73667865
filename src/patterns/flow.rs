//! Soft flowing patterns: wave lines, ripples, clouds, mist, streams

use super::FLOW_CHARS;
use crate::audio::AudioSignal;
use crate::grid::Grid;
use crate::noise::{pick, unit_sin};
use std::f64::consts::PI;

/// Six-step glyph for an intensity, `·` past the end of the palette
fn flow_glyph(intensity: f64) -> char {
    pick(&FLOW_CHARS, (intensity * 6.0).floor(), '·')
}

/// Vertical offset of the Soft Waves line at a column, before the pulse
pub fn soft_wave_offset(col: usize) -> f64 {
    let frequency = 0.08;
    let amplitude = 2.0;
    let w1 = (col as f64 * frequency).sin();
    let w2 = (col as f64 * frequency * 1.5 + PI / 3.0).sin();
    (w1 + w2) / 2.0 * amplitude
}

/// Vertical breathing of the Soft Waves line
pub fn soft_wave_pulse(frame: f64) -> f64 {
    (frame * 0.02).sin() * 0.5
}

/// Soft Waves: a static two-harmonic line that only breathes up and down
pub fn soft_waves(cols: usize, rows: usize, frame: f64, _audio: Option<&AudioSignal>) -> Grid {
    let mut grid = Grid::new(cols, rows);
    let pulse = soft_wave_pulse(frame);
    let half = rows as f64 / 2.0;

    for col in 0..grid.cols() {
        let line = half + soft_wave_offset(col) + pulse;
        for row in 0..grid.rows() {
            let dist = (row as f64 - line).abs();
            if dist >= 1.5 {
                continue;
            }
            let intensity = 1.0 - dist / 1.5;
            if intensity > 0.25 {
                grid.set(col, row, flow_glyph(intensity));
            }
        }
    }
    grid
}

/// Gentle Ripple: two concentric wave trains fading with distance
pub fn gentle_ripple(cols: usize, rows: usize, frame: f64, _audio: Option<&AudioSignal>) -> Grid {
    let mut grid = Grid::new(cols, rows);
    let center_x = cols as f64 / 2.0;
    let center_y = rows as f64 / 2.0;
    let reach = cols.max(rows) as f64;

    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            let dx = col as f64 - center_x;
            let dy = row as f64 - center_y;
            let dist = (dx * dx + dy * dy).sqrt();

            let r1 = (dist * 0.2 - frame * 0.05).sin();
            let r2 = (dist * 0.15 - frame * 0.04 + PI / 4.0).sin();
            let intensity = ((r1 + r2) / 2.0 + 1.0) / 2.0;
            if intensity <= 0.35 {
                continue;
            }

            let fade = (1.0 - dist / reach).max(0.0);
            let faded = intensity * fade;
            if faded > 0.45 {
                grid.set(col, row, flow_glyph(faded));
            }
        }
    }
    grid
}

/// Light Cloud: three-sine noise scrolling upward; only the band around the
/// midpoint is drawn, brightest at its edges
pub fn light_cloud(cols: usize, rows: usize, frame: f64, _audio: Option<&AudioSignal>) -> Grid {
    let mut grid = Grid::new(cols, rows);
    let vertical_speed = frame * 0.1;

    for row in 0..grid.rows() {
        let up = row as f64 - vertical_speed;
        for col in 0..grid.cols() {
            let c = col as f64;
            let n1 = (c * 0.15 + up * 0.12 + frame * 0.02).sin();
            let n2 = (c * 0.23 + up * 0.18 + frame * 0.03).sin();
            let n3 = (c * 0.31 + up * 0.25 + frame * 0.025).sin();
            let intensity = ((n1 + n2 + n3) / 3.0 + 1.0) / 2.0;

            if intensity > 0.3 && intensity < 0.7 {
                let fade = (intensity - 0.5).abs() * 2.0;
                if fade > 0.25 {
                    grid.set(col, row, flow_glyph(fade));
                }
            }
        }
    }
    grid
}

/// Gentle Mist: a sine and a cosine layer drifting upward, narrow band
pub fn gentle_mist(cols: usize, rows: usize, frame: f64, _audio: Option<&AudioSignal>) -> Grid {
    let mut grid = Grid::new(cols, rows);
    let vertical_speed = frame * 0.12;

    for row in 0..grid.rows() {
        let up = row as f64 - vertical_speed;
        for col in 0..grid.cols() {
            let c = col as f64;
            let m1 = (c * 0.12 + up * 0.08 + frame * 0.015).sin();
            let m2 = (c * 0.18 + up * 0.14 + frame * 0.02).cos();
            let intensity = ((m1 + m2) / 2.0 + 1.0) / 2.0;

            if intensity > 0.35 && intensity < 0.65 {
                let fade = (intensity - 0.5).abs() * 2.0;
                if fade > 0.2 {
                    grid.set(col, row, flow_glyph(fade));
                }
            }
        }
    }
    grid
}

/// Subtle Stream: three curved vertical streams with a faint ambient wave
pub fn subtle_stream(cols: usize, rows: usize, frame: f64, _audio: Option<&AudioSignal>) -> Grid {
    const STREAMS: usize = 3;

    let mut grid = Grid::new(cols, rows);
    let flow_speed = frame * 0.02;
    let stream_width = cols as f64 * 0.25;
    let half_width = stream_width / 2.0;
    let spacing = cols as f64 / (STREAMS + 1) as f64;

    for row in 0..grid.rows() {
        let r = row as f64;
        for col in 0..grid.cols() {
            let c = col as f64;
            let mut strongest = 0.0_f64;

            for i in 0..STREAMS {
                let fi = i as f64;
                let curve = (r * 0.05 + flow_speed * 0.3 + fi * PI / 3.0).sin() * (stream_width * 0.25);
                let center = spacing * (fi + 1.0) + curve;
                let dist = (c - center).abs();

                let flow = (r * 0.08 - flow_speed * 1.2 + fi * 0.5).sin() * 0.25 + 0.75;
                let fade = 1.0 - dist / half_width;
                if fade > 0.0 && dist < half_width {
                    strongest = strongest.max(flow * fade);
                }
            }

            let ambient = unit_sin(c * 0.04 + r * 0.03 + flow_speed * 0.5) * 0.1;
            let total = strongest.max(ambient);
            if total > 0.35 {
                grid.set(col, row, flow_glyph(total));
            }
        }
    }
    grid
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn soft_waves_never_scrolls_sideways() {
        // only the pulse changes between frames, so a frame with the same
        // pulse draws the same picture
        let period = 2.0 * PI / 0.02;
        assert_eq!(soft_waves(50, 20, 3.0, None), soft_waves(50, 20, 3.0 + period, None));
    }

    #[test]
    fn ripple_is_symmetric_about_the_centre() {
        let grid = gentle_ripple(40, 21, 10.0, None);
        for row in 0..21 {
            for dc in 1..20 {
                assert_eq!(grid.get(20 - dc, row), grid.get(20 + dc, row), "row {} dc {}", row, dc);
            }
        }
    }

    #[test]
    fn mist_band_leaves_gaps() {
        let grid = gentle_mist(80, 40, 50.0, None);
        let occupied = grid.count_occupied();
        assert!(occupied > 0);
        assert!(occupied < 80 * 40 / 2);
    }

    #[test]
    fn stream_tracks_three_columns() {
        let grid = subtle_stream(80, 10, 0.0, None);
        let row: Vec<char> = (0..80).map(|c| grid.get(c, 0).unwrap_or(' ')).collect();
        // stream centres sit near cols / 4 * (i + 1) plus a bounded curve
        for center in [20usize, 40, 60] {
            let near = (center - 6..center + 6).any(|c| row[c] != ' ');
            assert!(near, "no stream near column {}", center);
        }
    }
}
