//! Table of available patterns, indexed by position
//!
//! The selector stores an index into this table and the display loop looks
//! the generator up on every tick. An index past the end falls back to
//! [`DEFAULT_PATTERN`].

use super::letter_mask;
use super::{cascade, cosmic, depth, drift, flow, tessellation, voice};
use super::{in_alphabet, Generator};
use crate::audio::AudioSignal;
use crate::grid::Grid;
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

/// Index of the pattern shown at startup and used for unknown indices
pub const DEFAULT_PATTERN: usize = 0;

type BoxedGenerator = Box<dyn Fn(usize, usize, f64, Option<&AudioSignal>) -> Grid>;

/// One registry row
pub struct PatternInfo {
    pub name: &'static str,
    pub slug: &'static str,
    /// Every glyph the generator can emit, including the blank
    pub palette: &'static str,
    pub audio_reactive: bool,
    generator: BoxedGenerator,
}

impl PatternInfo {
    pub fn new(
        name: &'static str,
        slug: &'static str,
        palette: &'static str,
        audio_reactive: bool,
        generator: Generator,
    ) -> Self {
        Self {
            name,
            slug,
            palette,
            audio_reactive,
            generator: Box::new(generator),
        }
    }

    pub fn generate(&self, cols: usize, rows: usize, frame: f64, audio: Option<&AudioSignal>) -> Grid {
        (self.generator)(cols, rows, frame, audio)
    }
}

impl fmt::Debug for PatternInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatternInfo")
            .field("name", &self.name)
            .field("slug", &self.slug)
            .field("audio_reactive", &self.audio_reactive)
            .finish()
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum RegistryError {
    #[error("pattern registry is empty")]
    Empty,

    #[error("default pattern {0} is out of range")]
    DefaultOutOfRange(usize),

    #[error("duplicate pattern slug '{0}'")]
    DuplicateSlug(&'static str),

    #[error("pattern '{0}' palette has no blank")]
    NoBlank(&'static str),

    #[error("pattern '{slug}' palette has glyph '{glyph}' outside the alphabet")]
    ForeignGlyph { slug: &'static str, glyph: char },

    #[error("logo text character '{0}' has no glyph in the block font")]
    LogoGlyph(char),
}

#[derive(Debug)]
pub struct Registry {
    patterns: Vec<PatternInfo>,
    logo_text: String,
}

fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

impl Registry {
    /// Registry with every built-in pattern; Logo spells `logo_text`
    pub fn new(logo_text: &str) -> Self {
        use PatternInfo as P;

        const FLOW: &str = " ·•◦○●░";
        const TESSELLATION: &str = " ·•◦-○░";
        const DEPTH: &str = " ·•○░▒▄▀▓█";

        let text = logo_text.to_string();
        let logo = PatternInfo {
            name: "Logo",
            slug: "logo",
            palette: " ·*+-=×÷±•○●░▄▀▒▓█",
            audio_reactive: false,
            generator: Box::new(move |cols, rows, frame, _audio: Option<&AudioSignal>| {
                drift::logo_with_text(cols, rows, frame, &text)
            }),
        };

        let patterns = vec![
            P::new("HealthCode360", "healthcode360", " ·•◦○*+─", false, cascade::code_cascade),
            P::new("Dot Field", "dot-field", TESSELLATION, false, tessellation::dot_field),
            P::new("Dot Field 2", "dot-field-2", TESSELLATION, false, tessellation::dot_field2),
            P::new("Digital Fog", "digital-fog", TESSELLATION, false, tessellation::digital_fog),
            P::new("Digital Fog 2", "digital-fog-2", " ·•◦○+", false, tessellation::digital_fog2),
            P::new("Digital Fog 3", "digital-fog-3", " ·•◦○●0123456789ABCDEF", false, cascade::digital_fog3),
            P::new("Soft Waves", "soft-waves", FLOW, false, flow::soft_waves),
            P::new("Gentle Ripple", "gentle-ripple", FLOW, false, flow::gentle_ripple),
            P::new("Light Cloud", "light-cloud", FLOW, false, flow::light_cloud),
            P::new("Gentle Mist", "gentle-mist", FLOW, false, flow::gentle_mist),
            P::new("Subtle Stream", "subtle-stream", FLOW, false, flow::subtle_stream),
            P::new("Light Drift", "light-drift", FLOW, false, drift::light_drift),
            logo,
            P::new("Wave Depth", "wave-depth", DEPTH, false, depth::wave_depth),
            P::new("Radial Wave Field", "radial-wave-field", " ·•░▒▄▓█▀", false, depth::radial_wave_field),
            P::new("Interference Waves", "interference-waves", DEPTH, false, depth::interference_waves),
            P::new("Starry Night", "starry-night", " ·•○*+×", false, cosmic::starry_night),
            P::new("Quasar Field", "quasar-field", " ●○◉·•", false, cosmic::quasar_field),
            P::new("Nebula Drift", "nebula-drift", " •○●·", false, cosmic::nebula_drift),
            P::new("Cosmic Dust", "cosmic-dust", " ·•○●*+×", false, cosmic::cosmic_dust),
            P::new("Stellar Nursery", "stellar-nursery", " ○●◉·•", false, cosmic::stellar_nursery),
            P::new("Voice Ripple", "voice-ripple", " ·•◦○●▒", true, voice::voice_ripple),
            P::new("Voice Cascade", "voice-cascade", " ·•○●0123456789ABCDEF", true, voice::voice_cascade),
        ];

        Self::from_patterns(patterns, logo_text)
    }

    /// Registry with the default logo text
    pub fn standard() -> Self {
        Self::new(drift::DEFAULT_LOGO_TEXT)
    }

    pub fn from_patterns(patterns: Vec<PatternInfo>, logo_text: &str) -> Self {
        Self {
            patterns,
            logo_text: logo_text.to_string(),
        }
    }

    /// Check the table once at startup
    pub fn validate(&self) -> Result<(), RegistryError> {
        if self.patterns.is_empty() {
            return Err(RegistryError::Empty);
        }
        if DEFAULT_PATTERN >= self.patterns.len() {
            return Err(RegistryError::DefaultOutOfRange(DEFAULT_PATTERN));
        }

        let mut slugs = HashSet::new();
        for p in &self.patterns {
            if !slugs.insert(p.slug) {
                return Err(RegistryError::DuplicateSlug(p.slug));
            }
            if !p.palette.contains(' ') {
                return Err(RegistryError::NoBlank(p.slug));
            }
            if let Some(glyph) = p.palette.chars().find(|&c| !in_alphabet(c)) {
                return Err(RegistryError::ForeignGlyph { slug: p.slug, glyph });
            }
        }

        if let Some(c) = self
            .logo_text
            .chars()
            .find(|&c| c != ' ' && !letter_mask::is_supported(c))
        {
            return Err(RegistryError::LogoGlyph(c));
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PatternInfo> {
        self.patterns.get(index)
    }

    /// Index clamped to the table: unknown indices map to the default
    pub fn resolve_index(&self, index: usize) -> usize {
        if index < self.patterns.len() {
            index
        } else {
            DEFAULT_PATTERN
        }
    }

    /// Pattern at `index`, or the default pattern when out of range
    pub fn resolve(&self, index: usize) -> Option<&PatternInfo> {
        self.patterns.get(self.resolve_index(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &PatternInfo> {
        self.patterns.iter()
    }

    /// Look up a pattern by index, slug, or display name. Names and slugs
    /// match ignoring case, spaces and dashes.
    pub fn find(&self, query: &str) -> Option<usize> {
        let query = query.trim();
        if let Ok(index) = query.parse::<usize>() {
            return (index < self.patterns.len()).then_some(index);
        }
        let wanted = normalize(query);
        if wanted.is_empty() {
            return None;
        }
        self.patterns
            .iter()
            .position(|p| normalize(p.slug) == wanted || normalize(p.name) == wanted)
    }

    /// Run the generator at `index` (default pattern when out of range)
    pub fn generate(&self, index: usize, cols: usize, rows: usize, frame: f64, audio: Option<&AudioSignal>) -> Grid {
        match self.resolve(index) {
            Some(pattern) => pattern.generate(cols, rows, frame, audio),
            None => Grid::empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_registry_is_valid() {
        let registry = Registry::standard();
        assert_eq!(registry.validate(), Ok(()));
        assert_eq!(registry.len(), 23);
        assert_eq!(registry.get(0).map(|p| p.name), Some("HealthCode360"));
        assert_eq!(registry.get(12).map(|p| p.name), Some("Logo"));
        assert_eq!(registry.get(20).map(|p| p.name), Some("Stellar Nursery"));
    }

    #[test]
    fn only_voice_patterns_react_to_audio() {
        let registry = Registry::standard();
        for p in registry.iter() {
            assert_eq!(p.audio_reactive, p.name.starts_with("Voice"), "{}", p.name);
        }
    }

    #[test]
    fn out_of_range_falls_back_to_default() {
        let registry = Registry::standard();
        assert_eq!(registry.resolve_index(99), DEFAULT_PATTERN);
        assert_eq!(registry.resolve(99).map(|p| p.slug), Some("healthcode360"));
        assert_eq!(
            registry.generate(99, 20, 10, 3.0, None),
            registry.generate(DEFAULT_PATTERN, 20, 10, 3.0, None)
        );
    }

    #[test]
    fn find_accepts_index_slug_and_name() {
        let registry = Registry::standard();
        assert_eq!(registry.find("6"), Some(6));
        assert_eq!(registry.find("soft-waves"), Some(6));
        assert_eq!(registry.find("Soft Waves"), Some(6));
        assert_eq!(registry.find("  softwaves "), Some(6));
        assert_eq!(registry.find("99"), None);
        assert_eq!(registry.find("nope"), None);
        assert_eq!(registry.find("--"), None);
    }

    #[test]
    fn logo_text_is_checked() {
        assert_eq!(Registry::new("HELLO WORLD").validate(), Ok(()));
        assert_eq!(Registry::new("HI!").validate(), Err(RegistryError::LogoGlyph('!')));
    }

    #[test]
    fn broken_tables_are_rejected() {
        let empty = Registry::from_patterns(Vec::new(), "");
        assert_eq!(empty.validate(), Err(RegistryError::Empty));

        let dup = Registry::from_patterns(
            vec![
                PatternInfo::new("A", "a", " ·", false, flow::soft_waves),
                PatternInfo::new("B", "a", " ·", false, flow::soft_waves),
            ],
            "",
        );
        assert_eq!(dup.validate(), Err(RegistryError::DuplicateSlug("a")));

        let no_blank = Registry::from_patterns(vec![PatternInfo::new("A", "a", "·", false, flow::soft_waves)], "");
        assert_eq!(no_blank.validate(), Err(RegistryError::NoBlank("a")));

        let foreign = Registry::from_patterns(vec![PatternInfo::new("A", "a", " x", false, flow::soft_waves)], "");
        assert_eq!(
            foreign.validate(),
            Err(RegistryError::ForeignGlyph { slug: "a", glyph: 'x' })
        );
    }
}
