use crate::colors::ThemeOverride;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// `~/.config/glyphfield/config.toml`. Every field is optional; command-line
/// flags win over anything set here.
#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct Settings {
    pub pattern: Option<String>,
    pub fps: Option<u32>,
    pub cell_width: Option<u32>,
    pub cell_height: Option<u32>,
    pub theme: Option<String>,
    pub cycle_seconds: Option<f64>,
    pub shuffle: Option<bool>,
    pub logo_text: Option<String>,
    pub audio: Option<bool>,
    #[serde(default)]
    pub theme_custom: ThemeCustom,
}

#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct ThemeCustom {
    pub background: Option<[u8; 3]>,
    pub glyph: Option<[u8; 3]>,
    pub scanline: Option<[u8; 3]>,
    pub scanline_alpha: Option<f64>,
}

impl ThemeCustom {
    pub fn to_override(&self) -> ThemeOverride {
        ThemeOverride {
            background: self.background,
            glyph: self.glyph,
            scanline: self.scanline,
            scanline_alpha: self.scanline_alpha,
        }
    }
}

impl Settings {
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => Self::parse(&content),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "cannot read settings");
                Self::default()
            }
        }
    }

    /// Parse settings text; anything malformed yields defaults
    pub fn parse(content: &str) -> Self {
        toml::from_str(content).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "ignoring malformed settings");
            Self::default()
        })
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("glyphfield")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_file_parses() {
        let settings = Settings::parse(
            r#"
            pattern = "soft-waves"
            fps = 24
            cell_width = 8
            cell_height = 16
            theme = "night"
            cycle_seconds = 90.0
            shuffle = true
            logo_text = "HELLO"
            audio = false

            [theme_custom]
            glyph = [200, 100, 50]
            scanline_alpha = 0.2
            "#,
        );
        assert_eq!(settings.pattern.as_deref(), Some("soft-waves"));
        assert_eq!(settings.fps, Some(24));
        assert_eq!(settings.cycle_seconds, Some(90.0));
        assert_eq!(settings.audio, Some(false));
        assert_eq!(settings.theme_custom.glyph, Some([200, 100, 50]));
        assert_eq!(settings.theme_custom.background, None);
    }

    #[test]
    fn malformed_file_gives_defaults() {
        assert_eq!(Settings::parse("fps = \"fast\""), Settings::default());
        assert_eq!(Settings::parse("not toml at all ["), Settings::default());
        assert_eq!(Settings::parse(""), Settings::default());
    }

    #[test]
    fn missing_file_gives_defaults() {
        let path = Path::new("/nonexistent/glyphfield/config.toml");
        assert_eq!(Settings::load_from(path), Settings::default());
    }
}
