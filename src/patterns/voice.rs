//! Audio-reactive patterns
//!
//! Speed comes from [`AudioSignal::motion`], the integral of the ratcheted
//! peak, added on top of the plain frame clock, so a loud moment pushes the
//! animation ahead and it never runs backwards as the peak decays. Size and
//! brightness follow the instantaneous volume and the spectrum. With no
//! signal both patterns are ordinary ambient patterns.

use super::cascade::Column;
use super::CODE_CHARS;
use crate::audio::AudioSignal;
use crate::grid::Grid;
use crate::noise::{floor_i, hash2, pick, unit_sin};
use std::f64::consts::PI;

/// Frame units of extra travel per unit of accumulated motion
const MOTION_GAIN: f64 = 0.6;

/// Map a linear position to a log-frequency position, so the low bins where
/// voices live spread over most of the width
fn spectrum_position(t: f64) -> f64 {
    (t.clamp(0.0, 1.0) * 9.0 + 1.0).log10()
}

/// Voice Ripple: rings expanding from the centre. Louder input makes them
/// travel faster and reach further; spectrum bins push out angular spikes.
pub fn voice_ripple(cols: usize, rows: usize, frame: f64, audio: Option<&AudioSignal>) -> Grid {
    const RINGS: [char; 6] = ['·', '•', '◦', '○', '●', '▒'];

    let mut grid = Grid::new(cols, rows);
    let signal = AudioSignal::or_silence(audio);
    let volume = signal.volume as f64;
    let phase = frame * 0.05 + signal.motion * MOTION_GAIN * 0.05;

    let half_w = cols as f64 / 2.0;
    let half_h = rows as f64 / 2.0;
    let center_x = half_w + (frame * 0.013).sin() * cols as f64 * 0.04 * volume;
    let max_r = (half_w * half_w + half_h * half_h).sqrt();
    let base_reach = max_r * 0.45;

    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            let dx = col as f64 - center_x;
            let dy = row as f64 - half_h;
            let dist = (dx * dx + dy * dy).sqrt();

            // mirrored around the vertical axis, low frequencies at the top
            let around = (dy.atan2(dx) / PI).abs();
            let spike = signal.bin_at(spectrum_position(around)) as f64;

            let reach = base_reach + max_r * 0.4 * volume + max_r * 0.25 * spike;
            let envelope = (1.0 - dist / reach).max(0.0);
            let ring = unit_sin(dist * 0.35 - phase * 2.0);

            let intensity = ring * envelope * (0.7 + 0.3 * volume);
            if intensity > 0.12 {
                let index = ((intensity - 0.12) / 0.88 * RINGS.len() as f64).floor();
                grid.set(col, row, pick(&RINGS, index, '▒'));
            }
        }
    }
    grid
}

/// Voice Cascade: falling code whose columns rise from the bottom with the
/// spectrum, falling faster when it is loud
pub fn voice_cascade(cols: usize, rows: usize, frame: f64, audio: Option<&AudioSignal>) -> Grid {
    let mut grid = Grid::new(cols, rows);
    let signal = AudioSignal::or_silence(audio);
    let volume = signal.volume as f64;
    let phase = frame * 0.06 + signal.motion * MOTION_GAIN * 0.06;
    let span = rows as f64 * 2.0;
    let frame_step = floor_i(frame * 0.5);
    let last_col = cols.saturating_sub(1).max(1) as f64;

    for col in 0..grid.cols() {
        let column = Column::of(col);
        let level = signal.bin_at(spectrum_position(col as f64 / last_col)) as f64;
        let speed = phase * (0.7 + column.hash * 0.6);

        for row in 0..grid.rows() {
            let pos = (row as f64 - speed + column.hash * rows as f64).rem_euclid(span);
            let head = unit_sin(pos * 0.15);
            let tail = (1.0 - pos / rows as f64 * 0.7).max(0.0);
            let cascade = head * tail * column.fade;

            let height = (rows - row) as f64 / rows as f64;
            let lift = if height <= level { 0.35 * level } else { 0.0 };

            let intensity = cascade * (0.8 + 0.2 * volume) + lift;
            let char_hash = hash2(col as i64, 113, row as i64, 197, frame_step, 1000) as f64 / 1000.0;

            let ch = if cascade > 0.6 && char_hash > 0.6 {
                pick(&CODE_CHARS, (char_hash * CODE_CHARS.len() as f64).floor(), '0')
            } else if intensity > 0.5 {
                '●'
            } else if intensity > 0.36 {
                '○'
            } else if intensity > 0.22 {
                '•'
            } else if intensity > 0.1 {
                '·'
            } else {
                continue;
            };
            grid.set(col, row, ch);
        }
    }
    grid
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loud() -> AudioSignal {
        AudioSignal {
            volume: 0.9,
            peak_volume: 1.0,
            frequency_bins: vec![0.8; 128],
            motion: 400.0,
        }
    }

    #[test]
    fn spectrum_position_is_logarithmic() {
        assert_eq!(spectrum_position(0.0), 0.0);
        assert!((spectrum_position(1.0) - 1.0).abs() < 1e-12);
        assert!(spectrum_position(0.1) > 0.2);
    }

    #[test]
    fn silence_matches_no_audio() {
        let silence = AudioSignal::default();
        for frame in [0.0, 17.5, 300.0] {
            assert_eq!(voice_ripple(50, 20, frame, None), voice_ripple(50, 20, frame, Some(&silence)));
            assert_eq!(voice_cascade(50, 20, frame, None), voice_cascade(50, 20, frame, Some(&silence)));
        }
    }

    #[test]
    fn loud_ripple_reaches_further() {
        let quiet = voice_ripple(80, 30, 10.0, None);
        let sig = loud();
        let noisy = voice_ripple(80, 30, 10.0, Some(&sig));
        assert!(noisy.count_occupied() > quiet.count_occupied());
    }

    #[test]
    fn spectrum_lifts_cascade_columns() {
        let sig = AudioSignal {
            frequency_bins: vec![1.0; 128],
            ..Default::default()
        };
        let grid = voice_cascade(40, 20, 0.0, Some(&sig));
        // with every bin full each column is lit down to the bottom row
        assert!((0..40).all(|c| grid.get(c, 19).is_some_and(|ch| ch != ' ')));
    }

    #[test]
    fn garbage_signal_is_treated_as_silence() {
        let sig = AudioSignal {
            volume: f32::NAN,
            peak_volume: f32::INFINITY,
            frequency_bins: vec![f32::NAN; 4],
            motion: f64::NAN,
        };
        assert_eq!(voice_ripple(30, 12, 4.0, Some(&sig)).rows(), 12);
        assert_eq!(voice_cascade(30, 12, 4.0, Some(&sig)), voice_cascade(30, 12, 4.0, None));
    }
}
