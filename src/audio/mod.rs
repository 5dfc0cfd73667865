//! Microphone signal source for the audio-reactive patterns
//!
//! The adapter publishes an [`AudioSignal`] snapshot once per host callback.
//! Generators only ever see that snapshot; capture failures never reach them
//! and surface as an [`AudioStatus`] for the status line instead.
//!
//! # Peak ratchet
//! `peak_volume` jumps up to the current volume immediately and otherwise
//! decays by [`PEAK_DECAY`] per sample tick. Speed-like terms are driven by the
//! peak (through [`AudioSignal::motion`]) so a pattern that was sped up by a
//! loud sound never runs backwards; size-like terms use the instantaneous
//! volume and may shrink right away.

pub mod analysis;
pub mod capture;

use analysis::{rms, volume_from_rms, SpectrumAnalyzer, FFT_SIZE};
use thiserror::Error;

/// Per-tick multiplicative decay of the peak when the volume is below it
pub const PEAK_DECAY: f32 = 0.998;

/// One scheduler frame unit in milliseconds
const FRAME_MS: f64 = 16.67;

/// Largest frame delta folded into `motion` per sample tick
const MAX_MOTION_STEP: f64 = 2.0;

/// Latest audio snapshot handed to generators.
///
/// `AudioSignal::default()` is silence, and generators treat an absent signal
/// exactly like silence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AudioSignal {
    /// Instantaneous loudness, `[0, 1]`
    pub volume: f32,
    /// Ratcheted loudness, `[0, 1]`
    pub peak_volume: f32,
    /// Normalized spectrum magnitudes, each `[0, 1]`, low to high frequency
    pub frequency_bins: Vec<f32>,
    /// Integral of `peak_volume` over frame time. Never decreases.
    pub motion: f64,
}

fn unit(v: f32) -> f32 {
    if v.is_finite() {
        v.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

impl AudioSignal {
    /// Copy with every field forced into range; non-finite values become zero
    pub fn sanitized(&self) -> Self {
        Self {
            volume: unit(self.volume),
            peak_volume: unit(self.peak_volume),
            frequency_bins: self.frequency_bins.iter().map(|&b| unit(b)).collect(),
            motion: if self.motion.is_finite() { self.motion.max(0.0) } else { 0.0 },
        }
    }

    /// Sanitized signal for an optional snapshot; `None` is silence
    pub fn or_silence(audio: Option<&AudioSignal>) -> Self {
        audio.map(AudioSignal::sanitized).unwrap_or_default()
    }

    /// Bin value at a position in `[0, 1]` across the spectrum, 0 when empty
    pub fn bin_at(&self, pos: f64) -> f32 {
        if self.frequency_bins.is_empty() {
            return 0.0;
        }
        let last = self.frequency_bins.len() - 1;
        let idx = (pos.clamp(0.0, 1.0) * last as f64).round() as usize;
        self.frequency_bins[idx.min(last)]
    }
}

/// Peak volume ratchet: immediate attack, slow geometric release
#[derive(Debug, Clone, Copy, Default)]
pub struct PeakTracker {
    peak: f32,
}

impl PeakTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one volume sample, returning the new peak
    pub fn update(&mut self, volume: f32) -> f32 {
        let volume = unit(volume);
        if volume > self.peak {
            self.peak = volume;
        } else {
            self.peak *= PEAK_DECAY;
        }
        self.peak
    }

    pub fn peak(&self) -> f32 {
        self.peak
    }

    pub fn reset(&mut self) {
        self.peak = 0.0;
    }
}

/// Capture-side failures. These are shown to the user and never propagated
/// into pattern generation.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AudioError {
    #[error("no audio input device found")]
    NoDevice,

    #[error("no supported input config: {0}")]
    Config(String),

    #[error("audio device reported 0 channels")]
    NoChannels,

    #[error("unsupported sample format: {0}")]
    UnsupportedFormat(String),

    #[error("audio stream error: {0}")]
    Stream(String),

    #[error("failed to start audio: {0}")]
    Play(String),
}

/// Out-of-band capture state, consumed only by the UI
#[derive(Debug, Clone, PartialEq)]
pub enum AudioStatus {
    /// Capture disabled by configuration
    Disabled,
    /// Not capturing
    Off,
    /// Capturing from the named device
    Listening(String),
    /// Last acquisition failed; cleared by [`AudioAdapter::retry`]
    Failed(AudioError),
}

impl AudioStatus {
    /// Short label for the status line
    pub fn label(&self) -> String {
        match self {
            AudioStatus::Disabled => "mic disabled".to_string(),
            AudioStatus::Off => "mic off".to_string(),
            AudioStatus::Listening(name) => format!("mic: {}", name),
            AudioStatus::Failed(err) => format!("mic error: {} (m to retry)", err),
        }
    }
}

/// Something that can hand out the most recent mono samples
pub trait SampleSource {
    fn sample_rate(&self) -> u32;

    /// Fill `out` with the newest `out.len()` samples, oldest first
    fn copy_latest(&self, out: &mut [f32]);

    /// Human-readable device name
    fn name(&self) -> String;
}

/// Opens a sample source on demand
pub type SourceOpener = Box<dyn Fn() -> Result<Box<dyn SampleSource>, AudioError>>;

/// Owns the capture resource and the published snapshot.
///
/// Capture is acquired when an audio-reactive pattern is entered and released
/// when it is left; both calls are idempotent.
pub struct AudioAdapter {
    opener: SourceOpener,
    source: Option<Box<dyn SampleSource>>,
    analyzer: Option<SpectrumAnalyzer>,
    status: AudioStatus,
    peak: PeakTracker,
    snapshot: AudioSignal,
    scratch: Vec<f32>,
    last_sample_ms: Option<f64>,
}

impl AudioAdapter {
    /// Adapter backed by the default system input device
    pub fn system(enabled: bool) -> Self {
        let opener: SourceOpener = Box::new(|| {
            capture::AudioCapture::open().map(|c| Box::new(c) as Box<dyn SampleSource>)
        });
        let mut adapter = Self::with_opener(opener);
        if !enabled {
            adapter.status = AudioStatus::Disabled;
        }
        adapter
    }

    /// Adapter with a custom source factory
    pub fn with_opener(opener: SourceOpener) -> Self {
        Self {
            opener,
            source: None,
            analyzer: None,
            status: AudioStatus::Off,
            peak: PeakTracker::new(),
            snapshot: AudioSignal::default(),
            scratch: vec![0.0; FFT_SIZE],
            last_sample_ms: None,
        }
    }

    /// Start capturing. No-op when already capturing, disabled, or after a
    /// failure that has not been retried.
    pub fn acquire(&mut self) {
        match self.status {
            AudioStatus::Disabled | AudioStatus::Failed(_) => return,
            AudioStatus::Listening(_) if self.source.is_some() => return,
            _ => {}
        }

        match (self.opener)() {
            Ok(source) => {
                let name = source.name();
                tracing::info!(device = %name, rate = source.sample_rate(), "microphone acquired");
                self.analyzer = Some(SpectrumAnalyzer::new(source.sample_rate()));
                self.source = Some(source);
                self.status = AudioStatus::Listening(name);
                self.last_sample_ms = None;
            }
            Err(err) => {
                tracing::warn!(error = %err, "microphone unavailable");
                self.source = None;
                self.analyzer = None;
                self.status = AudioStatus::Failed(err);
                self.clear_signal();
            }
        }
    }

    /// Stop capturing and reset the signal to silence, keeping the accumulated
    /// `motion`. Safe to call repeatedly.
    pub fn release(&mut self) {
        if self.source.take().is_some() {
            tracing::info!("microphone released");
        }
        self.analyzer = None;
        if matches!(self.status, AudioStatus::Listening(_)) {
            self.status = AudioStatus::Off;
        }
        self.clear_signal();
    }

    /// Clear a previous failure and try again
    pub fn retry(&mut self) {
        if matches!(self.status, AudioStatus::Failed(_)) {
            self.status = AudioStatus::Off;
        }
        self.acquire();
    }

    /// Sample the source and publish a fresh snapshot. Does nothing while not
    /// capturing, so the snapshot stays at silence.
    pub fn poll(&mut self, now_ms: f64) {
        let Some(source) = self.source.as_ref() else {
            return;
        };
        source.copy_latest(&mut self.scratch);

        let frames = match self.last_sample_ms {
            Some(last) => ((now_ms - last) / FRAME_MS).clamp(0.0, MAX_MOTION_STEP),
            None => 0.0,
        };
        self.last_sample_ms = Some(now_ms);

        let volume = volume_from_rms(rms(&self.scratch));
        let bins = match self.analyzer.as_mut() {
            Some(analyzer) => analyzer.analyze(&self.scratch),
            None => Vec::new(),
        };
        self.ingest(volume, bins, frames);
    }

    /// Fold one analysed sample into the snapshot
    fn ingest(&mut self, volume: f32, bins: Vec<f32>, frames: f64) {
        let volume = unit(volume);
        let peak = self.peak.update(volume);
        self.snapshot = AudioSignal {
            volume,
            peak_volume: peak,
            frequency_bins: bins,
            motion: self.snapshot.motion + peak as f64 * frames,
        };
    }

    /// Back to silence. `motion` is carried over so a Voice pattern's clock
    /// holds still across a mute instead of snapping back to zero.
    fn clear_signal(&mut self) {
        self.peak.reset();
        self.snapshot = AudioSignal {
            motion: self.snapshot.motion,
            ..AudioSignal::default()
        };
        self.last_sample_ms = None;
    }

    pub fn snapshot(&self) -> &AudioSignal {
        &self.snapshot
    }

    pub fn status(&self) -> &AudioStatus {
        &self.status
    }

    pub fn is_capturing(&self) -> bool {
        self.source.is_some()
    }
}
