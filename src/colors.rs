use crate::render::{Rgb, Rgba, Theme};
use crossterm::event::KeyCode;

/// Built-in themes, indexed by the Shift+digit that selects them
pub const PRESETS: [(&str, Theme); 10] = [
    ("lobby", theme(rgb(255, 255, 255), rgb(95, 179, 179), 0.1)),
    ("night", theme(rgb(12, 20, 24), rgb(95, 179, 179), 0.08)),
    ("matrix", theme(rgb(0, 0, 0), rgb(0, 200, 70), 0.08)),
    ("ice", theme(rgb(236, 246, 252), rgb(60, 130, 190), 0.1)),
    ("amber", theme(rgb(20, 14, 4), rgb(230, 160, 40), 0.08)),
    ("rose", theme(rgb(252, 240, 244), rgb(200, 90, 130), 0.1)),
    ("mono", theme(rgb(0, 0, 0), rgb(210, 210, 210), 0.06)),
    ("paper", theme(rgb(245, 240, 228), rgb(70, 70, 70), 0.08)),
    ("neon", theme(rgb(10, 0, 24), rgb(220, 60, 240), 0.1)),
    ("ember", theme(rgb(16, 4, 0), rgb(240, 90, 40), 0.08)),
];

const fn rgb(r: u8, g: u8, b: u8) -> Rgb {
    Rgb::new(r, g, b)
}

/// Scan lines use the glyph colour at a low alpha
const fn theme(background: Rgb, glyph: Rgb, scan_alpha: f64) -> Theme {
    Theme {
        background,
        glyph,
        scanline: Rgba { rgb: glyph, alpha: scan_alpha },
    }
}

/// Preset by name, case-insensitive
pub fn theme_by_name(name: &str) -> Option<Theme> {
    preset_index(name).map(|i| PRESETS[i].1)
}

pub fn preset_index(name: &str) -> Option<usize> {
    let name = name.trim();
    PRESETS.iter().position(|(n, _)| n.eq_ignore_ascii_case(name))
}

pub fn preset_names() -> impl Iterator<Item = &'static str> {
    PRESETS.iter().map(|(n, _)| *n)
}

/// Partial theme from the settings file; set fields replace the base theme's
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ThemeOverride {
    pub background: Option<[u8; 3]>,
    pub glyph: Option<[u8; 3]>,
    pub scanline: Option<[u8; 3]>,
    pub scanline_alpha: Option<f64>,
}

impl ThemeOverride {
    pub fn apply(&self, base: Theme) -> Theme {
        let to_rgb = |[r, g, b]: [u8; 3]| Rgb::new(r, g, b);
        let glyph = self.glyph.map(to_rgb).unwrap_or(base.glyph);
        let scan_rgb = match (self.scanline, self.glyph) {
            (Some(c), _) => to_rgb(c),
            // a new glyph colour drags the default scan line along with it
            (None, Some(_)) => glyph,
            (None, None) => base.scanline.rgb,
        };
        Theme {
            background: self.background.map(to_rgb).unwrap_or(base.background),
            glyph,
            scanline: Rgba {
                rgb: scan_rgb,
                alpha: self.scanline_alpha.map(|a| a.clamp(0.0, 1.0)).unwrap_or(base.scanline.alpha),
            },
        }
    }
}

/// Current theme, switchable at runtime
#[derive(Clone, Copy)]
pub struct ThemeState {
    pub theme: Theme,
    pub preset: Option<usize>,
}

impl ThemeState {
    pub fn new(theme: Theme) -> Self {
        let preset = PRESETS.iter().position(|(_, t)| *t == theme);
        Self { theme, preset }
    }

    pub fn name(&self) -> &'static str {
        self.preset.map(|i| PRESETS[i].0).unwrap_or("custom")
    }

    /// Handle theme key input. Returns true if key was handled.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        let index = match code {
            KeyCode::Char(')') => 0, // Shift+0: lobby
            KeyCode::Char('!') => 1, // Shift+1: night
            KeyCode::Char('@') => 2, // Shift+2: matrix
            KeyCode::Char('#') => 3, // Shift+3: ice
            KeyCode::Char('$') => 4, // Shift+4: amber
            KeyCode::Char('%') => 5, // Shift+5: rose
            KeyCode::Char('^') => 6, // Shift+6: mono
            KeyCode::Char('&') => 7, // Shift+7: paper
            KeyCode::Char('*') => 8, // Shift+8: neon
            KeyCode::Char('(') => 9, // Shift+9: ember
            _ => return false,
        };
        self.theme = PRESETS[index].1;
        self.preset = Some(index);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_preset_matches_default_theme() {
        assert_eq!(PRESETS[0].1, Theme::default());
        assert_eq!(ThemeState::new(Theme::default()).name(), "lobby");
    }

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(theme_by_name("Matrix"), Some(PRESETS[2].1));
        assert_eq!(theme_by_name("nope"), None);
    }

    #[test]
    fn shifted_digits_select_presets() {
        let mut state = ThemeState::new(Theme::default());
        assert!(state.handle_key(KeyCode::Char('$')));
        assert_eq!(state.name(), "amber");
        assert!(state.handle_key(KeyCode::Char(')')));
        assert_eq!(state.theme, Theme::default());
        assert!(!state.handle_key(KeyCode::Char('4')));
    }

    #[test]
    fn override_replaces_only_set_fields() {
        let custom = ThemeOverride {
            glyph: Some([10, 20, 30]),
            ..Default::default()
        };
        let theme = custom.apply(Theme::default());
        assert_eq!(theme.background, Rgb::new(255, 255, 255));
        assert_eq!(theme.glyph, Rgb::new(10, 20, 30));
        assert_eq!(theme.scanline.rgb, Rgb::new(10, 20, 30));
        assert_eq!(theme.scanline.alpha, 0.1);
        assert_eq!(ThemeState::new(theme).name(), "custom");
    }
}
