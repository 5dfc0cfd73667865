//! Properties every registered generator must hold

use glyphfield::audio::AudioSignal;
use glyphfield::patterns::{flow, in_alphabet, Registry};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;

fn sample_sizes(rng: &mut StdRng, n: usize) -> Vec<(usize, usize, f64)> {
    (0..n)
        .map(|_| (rng.gen_range(1..=120), rng.gen_range(1..=50), rng.gen_range(0.0..20_000.0)))
        .collect()
}

#[test]
fn every_generator_is_deterministic() {
    let registry = Registry::standard();
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for (cols, rows, frame) in sample_sizes(&mut rng, 8) {
        for p in registry.iter() {
            assert_eq!(
                p.generate(cols, rows, frame, None),
                p.generate(cols, rows, frame, None),
                "{} at {}x{} frame {}",
                p.name,
                cols,
                rows,
                frame
            );
        }
    }
}

#[test]
fn every_generator_respects_the_requested_shape() {
    let registry = Registry::standard();
    for p in registry.iter() {
        for &(cols, rows) in &[(1, 1), (2, 1), (1, 3), (80, 24), (7, 31)] {
            let grid = p.generate(cols, rows, 42.0, None);
            assert_eq!((grid.cols(), grid.rows()), (cols, rows), "{}", p.name);
            assert!(grid.rows_iter().all(|r| r.len() == cols));
        }
        assert!(p.generate(0, 5, 1.0, None).is_empty(), "{}", p.name);
        assert!(p.generate(5, 0, 1.0, None).is_empty(), "{}", p.name);
        assert!(p.generate(0, 0, 1.0, None).is_empty(), "{}", p.name);
    }
}

#[test]
fn glyphs_stay_inside_each_palette() {
    let registry = Registry::standard();
    let mut rng = StdRng::seed_from_u64(20);
    for (cols, rows, frame) in sample_sizes(&mut rng, 12) {
        for p in registry.iter() {
            let grid = p.generate(cols, rows, frame, None);
            for (col, row, ch) in grid.occupied() {
                assert!(in_alphabet(ch), "{} produced '{}' outside the alphabet", p.name, ch);
                assert!(
                    p.palette.contains(ch),
                    "{} produced '{}' at ({}, {}) frame {} outside its palette",
                    p.name,
                    ch,
                    col,
                    row,
                    frame
                );
            }
        }
    }
}

#[test]
fn voice_glyphs_stay_inside_palette_under_load() {
    let registry = Registry::standard();
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..20 {
        let signal = AudioSignal {
            volume: rng.gen_range(0.0..1.0),
            peak_volume: rng.gen_range(0.0..1.0),
            frequency_bins: (0..128).map(|_| rng.gen_range(0.0..1.0)).collect(),
            motion: rng.gen_range(0.0..10_000.0),
        };
        let frame = rng.gen_range(0.0..5_000.0);
        for p in registry.iter().filter(|p| p.audio_reactive) {
            let grid = p.generate(60, 25, frame, Some(&signal));
            assert!(grid.occupied().all(|(_, _, ch)| p.palette.contains(ch)), "{}", p.name);
        }
    }
}

#[test]
fn ambient_generators_ignore_audio() {
    let registry = Registry::standard();
    let loud = AudioSignal {
        volume: 1.0,
        peak_volume: 1.0,
        frequency_bins: vec![1.0; 64],
        motion: 900.0,
    };
    for p in registry.iter().filter(|p| !p.audio_reactive) {
        assert_eq!(p.generate(30, 12, 77.0, Some(&loud)), p.generate(30, 12, 77.0, None), "{}", p.name);
    }
}

#[test]
fn voice_generators_treat_silence_as_absence() {
    let registry = Registry::standard();
    let silence = AudioSignal::default();
    for p in registry.iter().filter(|p| p.audio_reactive) {
        for frame in [0.0, 12.5, 4000.0] {
            assert_eq!(p.generate(50, 20, frame, Some(&silence)), p.generate(50, 20, frame, None), "{}", p.name);
        }
    }
}

#[test]
fn soft_waves_stay_near_the_centre_line() {
    let grid = flow::soft_waves(40, 20, 0.0, None);
    assert!(grid.count_occupied() > 0);
    for (col, row, _) in grid.occupied() {
        let y = 10.0 + flow::soft_wave_offset(col);
        assert!((row as f64 - y).abs() < 1.5, "({}, {}) is off the wave", col, row);
    }
}

#[test]
fn soft_waves_move_with_the_frame() {
    let start = flow::soft_waves(40, 20, 0.0, None);
    let quarter = flow::soft_waves(40, 20, 2.0 * PI / 0.08, None);
    assert_ne!(start, quarter);
}

#[test]
fn out_of_range_index_uses_the_default_pattern() {
    let registry = Registry::standard();
    let fallback = registry.generate(registry.len() + 5, 30, 10, 9.0, None);
    assert_eq!(fallback, registry.generate(0, 30, 10, 9.0, None));
}

#[test]
fn custom_logo_text_changes_the_logo() {
    let default = Registry::standard();
    let custom = Registry::new("WELCOME");
    let logo = default.find("logo").unwrap();
    assert_eq!(custom.validate(), Ok(()));
    assert_ne!(
        default.generate(logo, 120, 40, 10.0, None),
        custom.generate(logo, 120, 40, 10.0, None)
    );
}

#[test]
fn long_sessions_stay_inside_each_palette() {
    let registry = Registry::standard();
    let loud = AudioSignal {
        volume: 1.0,
        peak_volume: 1.0,
        frequency_bins: vec![1.0; 128],
        motion: 4.0e6,
    };
    // one hour, about a day, and far beyond
    for frame in [216_000.0, 216_000.5, 5.0e6, 1.0e9, 1.0e9 + 0.25] {
        for p in registry.iter() {
            for audio in [None, Some(&loud)] {
                let grid = p.generate(64, 24, frame, audio);
                assert_eq!((grid.cols(), grid.rows()), (64, 24), "{}", p.name);
                assert!(
                    grid.occupied().all(|(_, _, ch)| p.palette.contains(ch)),
                    "{} left its palette at frame {}",
                    p.name,
                    frame
                );
            }
        }
    }
}
