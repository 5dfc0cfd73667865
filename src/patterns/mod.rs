//! Pattern generators
//!
//! Every generator is a pure function `(cols, rows, frame, audio) -> Grid`:
//! blank grid, per-cell intensity, threshold bands, glyph. The same inputs
//! always produce the same grid, and a zero dimension produces an empty one.
//! Only the Voice patterns read the audio argument.

pub mod cascade;
pub mod cosmic;
pub mod depth;
pub mod drift;
pub mod flow;
pub mod letter_mask;
pub mod registry;
pub mod tessellation;
pub mod voice;

pub use drift::DEFAULT_LOGO_TEXT;
pub use registry::{PatternInfo, Registry, RegistryError, DEFAULT_PATTERN};

use crate::audio::AudioSignal;
use crate::grid::Grid;

/// Plain generator function
pub type Generator = fn(usize, usize, f64, Option<&AudioSignal>) -> Grid;

/// Every glyph a pattern may emit, space included
pub const ALPHABET: &str = " ·•◦○●◉*+×÷±=-─│┼░▒▓█▄▀0123456789ABCDEF";

/// Soft dot gradient used by the wave, cloud and drift patterns
pub(crate) const FLOW_CHARS: [char; 6] = ['·', '•', '◦', '○', '●', '░'];

/// Gradient used by the dot fields and fogs
pub(crate) const TESSELLATION_CHARS: [char; 6] = ['·', '•', '◦', '-', '○', '░'];

/// Hex digits shown on cascade heads
pub(crate) const CODE_CHARS: [char; 16] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F',
];

pub fn in_alphabet(ch: char) -> bool {
    ALPHABET.contains(ch)
}
