//! Loudness and spectrum analysis of captured samples

use spectrum_analyzer::scaling::divide_by_N;
use spectrum_analyzer::windows::hann_window;
use spectrum_analyzer::{samples_fft_to_spectrum, FrequencyLimit};

/// Analysis window length. Must be a power of two for the FFT.
pub const FFT_SIZE: usize = 256;

/// RMS is amplified by this before clamping to `[0, 1]`
pub const VOLUME_GAIN: f32 = 3.0;

/// Weight of the previous magnitude when smoothing the spectrum
pub const SMOOTHING: f32 = 0.8;

/// Magnitudes at or below this level map to 0
pub const MIN_DB: f32 = -100.0;
/// Magnitudes at or above this level map to 1
pub const MAX_DB: f32 = -30.0;

/// Root mean square of a block of samples; non-finite samples count as 0
pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum: f32 = samples
        .iter()
        .map(|&s| if s.is_finite() { s * s } else { 0.0 })
        .sum();
    (sum / samples.len() as f32).sqrt()
}

/// Amplified, clamped loudness in `[0, 1]`
pub fn volume_from_rms(rms: f32) -> f32 {
    if !rms.is_finite() {
        return 0.0;
    }
    (rms * VOLUME_GAIN).clamp(0.0, 1.0)
}

/// Map a linear magnitude into `[0, 1]` across the `MIN_DB..MAX_DB` window
pub fn magnitude_to_unit(magnitude: f32) -> f32 {
    if magnitude <= 0.0 || !magnitude.is_finite() {
        return 0.0;
    }
    let db = 20.0 * magnitude.log10();
    ((db - MIN_DB) / (MAX_DB - MIN_DB)).clamp(0.0, 1.0)
}

/// Smoothed magnitude spectrum producing `FFT_SIZE / 2` unit bins
pub struct SpectrumAnalyzer {
    sample_rate: u32,
    smoothed: Vec<f32>,
    block: Vec<f32>,
}

impl SpectrumAnalyzer {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate: sample_rate.max(1),
            smoothed: vec![0.0; FFT_SIZE / 2],
            block: vec![0.0; FFT_SIZE],
        }
    }

    /// Analyse the newest `FFT_SIZE` samples (zero-padded if fewer) and return
    /// the normalized bins. A failed transform leaves the smoothing state as is.
    pub fn analyze(&mut self, samples: &[f32]) -> Vec<f32> {
        let start = samples.len().saturating_sub(FFT_SIZE);
        let tail = &samples[start..];
        self.block.fill(0.0);
        for (dst, &src) in self.block.iter_mut().zip(tail) {
            *dst = if src.is_finite() { src } else { 0.0 };
        }

        let windowed = hann_window(&self.block);
        if let Ok(spectrum) = samples_fft_to_spectrum(
            &windowed,
            self.sample_rate,
            FrequencyLimit::All,
            Some(&divide_by_N),
        ) {
            for (smoothed, (_, value)) in self.smoothed.iter_mut().zip(spectrum.data().iter()) {
                *smoothed = *smoothed * SMOOTHING + value.val() * (1.0 - SMOOTHING);
            }
        }

        self.smoothed.iter().map(|&m| magnitude_to_unit(m)).collect()
    }
}
