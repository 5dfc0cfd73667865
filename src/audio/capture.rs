//! Microphone capture through cpal
//!
//! The input callback runs on cpal's thread and only mixes incoming frames to
//! mono and writes them into a shared ring. Analysis happens on the display
//! loop, which copies the newest window out of the ring once per host tick.

use super::{AudioError, SampleSource};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample, SizedSample};
use std::fs::File;
use std::os::unix::io::AsRawFd;
use std::sync::{Arc, Mutex};

/// Ring capacity in mono samples. Must hold at least one analysis window.
pub const RING_SIZE: usize = 2048;

/// RAII guard to suppress stderr during ALSA device enumeration.
/// Restores stderr when dropped.
struct StderrSuppressor {
    saved_fd: i32,
    dev_null: File,
}

impl StderrSuppressor {
    fn new() -> Option<Self> {
        let dev_null = File::open("/dev/null").ok()?;

        let saved_fd = unsafe { libc::dup(2) };
        if saved_fd < 0 {
            return None;
        }

        let dup2_result = unsafe { libc::dup2(dev_null.as_raw_fd(), 2) };
        if dup2_result < 0 {
            unsafe {
                libc::close(saved_fd);
            }
            return None;
        }

        Some(Self { saved_fd, dev_null })
    }
}

impl Drop for StderrSuppressor {
    fn drop(&mut self) {
        unsafe {
            libc::dup2(self.saved_fd, 2);
            libc::close(self.saved_fd);
        }
        let _ = &self.dev_null;
    }
}

/// Mono sample ring shared between the capture callback and the display loop
pub struct SampleRing {
    samples: Vec<f32>,
    write_pos: usize,
}

impl SampleRing {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: vec![0.0; capacity.max(1)],
            write_pos: 0,
        }
    }

    pub fn push(&mut self, sample: f32) {
        self.samples[self.write_pos] = if sample.is_finite() { sample } else { 0.0 };
        self.write_pos = (self.write_pos + 1) % self.samples.len();
    }

    /// Copy the newest `out.len()` samples, oldest first
    pub fn copy_latest(&self, out: &mut [f32]) {
        let cap = self.samples.len();
        let n = out.len().min(cap);
        let start = (self.write_pos + cap - n) % cap;
        for (i, dst) in out.iter_mut().take(n).enumerate() {
            *dst = self.samples[(start + i) % cap];
        }
        for dst in out.iter_mut().skip(n) {
            *dst = 0.0;
        }
    }
}

/// Live input stream from the default input device. Dropping it stops the
/// stream and releases the device.
pub struct AudioCapture {
    _stream: cpal::Stream,
    ring: Arc<Mutex<SampleRing>>,
    sample_rate: u32,
    device_name: String,
}

impl AudioCapture {
    /// Open the default input device and start streaming
    pub fn open() -> Result<Self, AudioError> {
        // ALSA prints enumeration noise straight onto the terminal otherwise
        let stderr_guard = StderrSuppressor::new();

        let host = cpal::default_host();
        tracing::debug!(host = ?host.id(), "opening default input device");

        let device = host.default_input_device().ok_or(AudioError::NoDevice)?;
        let device_name = device.name().unwrap_or_else(|_| "Unknown".to_string());

        let supported = device
            .default_input_config()
            .map_err(|e| AudioError::Config(e.to_string()))?;

        let sample_rate = supported.sample_rate().0;
        let channels = supported.channels();
        if channels == 0 {
            return Err(AudioError::NoChannels);
        }
        tracing::debug!(device = %device_name, sample_rate, channels, format = ?supported.sample_format(), "input config");

        let config = cpal::StreamConfig {
            channels,
            sample_rate: cpal::SampleRate(sample_rate),
            buffer_size: cpal::BufferSize::Default,
        };

        let ring = Arc::new(Mutex::new(SampleRing::new(RING_SIZE)));
        let stream = match supported.sample_format() {
            cpal::SampleFormat::F32 => build_stream::<f32>(&device, &config, channels, &ring),
            cpal::SampleFormat::I16 => build_stream::<i16>(&device, &config, channels, &ring),
            cpal::SampleFormat::U16 => build_stream::<u16>(&device, &config, channels, &ring),
            cpal::SampleFormat::I32 => build_stream::<i32>(&device, &config, channels, &ring),
            other => return Err(AudioError::UnsupportedFormat(format!("{:?}", other))),
        }
        .map_err(|e| AudioError::Stream(e.to_string()))?;

        stream.play().map_err(|e| AudioError::Play(e.to_string()))?;
        drop(stderr_guard);

        Ok(Self {
            _stream: stream,
            ring,
            sample_rate,
            device_name,
        })
    }
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    channels: u16,
    ring: &Arc<Mutex<SampleRing>>,
) -> Result<cpal::Stream, cpal::BuildStreamError>
where
    T: SizedSample,
    f32: FromSample<T>,
{
    let ring = Arc::clone(ring);
    let channels = channels as usize;
    device.build_input_stream(
        config,
        move |data: &[T], _: &cpal::InputCallbackInfo| {
            if let Ok(mut ring) = ring.lock() {
                for frame in data.chunks(channels) {
                    let sum: f32 = frame.iter().map(|&s| f32::from_sample(s)).sum();
                    ring.push(sum / frame.len() as f32);
                }
            }
        },
        |err| tracing::warn!(error = %err, "audio stream error"),
        None,
    )
}

impl SampleSource for AudioCapture {
    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn copy_latest(&self, out: &mut [f32]) {
        match self.ring.lock() {
            Ok(ring) => ring.copy_latest(out),
            Err(_) => out.fill(0.0),
        }
    }

    fn name(&self) -> String {
        self.device_name.clone()
    }
}
