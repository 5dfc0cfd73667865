//! Grid painter
//!
//! Walks a [`Grid`] and draws it onto any [`Surface`]: solid background,
//! every non-space glyph at a brightness derived from its character and a
//! slow breathing pulse, a soft glow on the bright ones, then a pair of
//! translucent scan lines composited on top. Painting is stateless; the same
//! grid and frame always produce the same draw calls.

pub mod record;

use crate::grid::Grid;
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Linear blend of `self` over `under` at `alpha`
    pub fn over(self, under: Rgb, alpha: f64) -> Rgb {
        let a = alpha.clamp(0.0, 1.0);
        let mix = |top: u8, bottom: u8| (top as f64 * a + bottom as f64 * (1.0 - a)).round() as u8;
        Rgb::new(mix(self.r, under.r), mix(self.g, under.g), mix(self.b, under.b))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub rgb: Rgb,
    pub alpha: f64,
}

/// Colours used by the painter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub background: Rgb,
    pub glyph: Rgb,
    pub scanline: Rgba,
}

impl Default for Theme {
    fn default() -> Self {
        let teal = Rgb::new(95, 179, 179);
        Self {
            background: Rgb::new(255, 255, 255),
            glyph: teal,
            scanline: Rgba { rgb: teal, alpha: 0.1 },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    pub blur: f64,
    pub alpha: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphStyle {
    pub color: Rgb,
    pub alpha: f64,
    pub glow: Option<Glow>,
}

/// Something a frame can be drawn on. Coordinates are in pixels; glyphs are
/// positioned by their centre.
pub trait Surface {
    fn fill_background(&mut self, color: Rgb);
    fn draw_glyph(&mut self, x: f64, y: f64, ch: char, style: &GlyphStyle);
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgba);
    fn present(&mut self) -> io::Result<()>;

    /// Drawable width in pixels, when the surface knows it
    fn width(&self) -> Option<f64> {
        None
    }
}

/// Base brightness for a glyph before the pulse is applied
pub fn brightness(ch: char) -> f64 {
    match ch {
        '█' => 0.75,
        '▓' => 0.70,
        '▒' => 0.65,
        '░' => 0.55,
        '·' => 0.45,
        '•' => 0.52,
        '○' => 0.58,
        '●' => 0.65,
        '*' => 0.72,
        '+' => 0.75,
        '×' => 0.78,
        _ => 0.58,
    }
}

/// Global breathing multiplier
pub fn pulse(frame: f64) -> f64 {
    0.85 + (frame * 0.01).sin() * 0.15
}

/// Colour, alpha and glow for a glyph under the given pulse
pub fn glyph_style(theme: &Theme, ch: char, pulse: f64) -> GlyphStyle {
    let b = (brightness(ch) * pulse).max(0.4);
    let glow = if b > 0.6 {
        Some(Glow { blur: (b * 3.0).max(1.0), alpha: b * 0.5 })
    } else if b > 0.5 {
        Some(Glow { blur: b * 2.0, alpha: b * 0.3 })
    } else {
        None
    };
    GlyphStyle {
        color: theme.glyph,
        alpha: b,
        glow,
    }
}

/// Row of the upper scan line within its cell band
pub fn scanline_offset(frame: f64, cell_height: u32) -> f64 {
    if cell_height == 0 {
        return 0.0;
    }
    (frame * 2.0).rem_euclid(cell_height as f64).floor()
}

#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    pub theme: Theme,
    pub cell_width: u32,
    pub cell_height: u32,
}

impl Renderer {
    pub fn new(theme: Theme, cell_width: u32, cell_height: u32) -> Self {
        Self {
            theme,
            cell_width,
            cell_height,
        }
    }

    /// Draw one frame. Does not present; the caller decides when to flush.
    pub fn paint<S: Surface>(&self, grid: &Grid, frame: f64, surface: &mut S) {
        surface.fill_background(self.theme.background);

        let w = self.cell_width as f64;
        let h = self.cell_height as f64;
        let pulse = pulse(frame);

        for (col, row, ch) in grid.occupied() {
            let style = glyph_style(&self.theme, ch, pulse);
            let x = col as f64 * w + w / 2.0;
            let y = row as f64 * h + h / 2.0;
            surface.draw_glyph(x, y, ch, &style);
        }

        // scan lines span the whole surface, which may be wider than the grid
        let width = surface.width().unwrap_or(grid.cols() as f64 * w);
        let y = scanline_offset(frame, self.cell_height);
        surface.fill_rect(0.0, y, width, 1.0, self.theme.scanline);
        surface.fill_rect(0.0, y + h, width, 1.0, self.theme.scanline);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pulse_stays_in_band() {
        for i in 0..2000 {
            let p = pulse(i as f64 * 0.7);
            assert!((0.7..=1.0).contains(&p));
        }
        assert_eq!(pulse(0.0), 0.85);
    }

    #[test]
    fn dim_glyphs_have_no_glow() {
        let theme = Theme::default();
        let style = glyph_style(&theme, '·', 1.0);
        assert_eq!(style.alpha, 0.45);
        assert_eq!(style.glow, None);
    }

    #[test]
    fn brightness_floor_applies() {
        let style = glyph_style(&Theme::default(), '·', 0.7);
        assert_eq!(style.alpha, 0.4);
    }

    #[test]
    fn glow_tiers() {
        let theme = Theme::default();
        let soft = glyph_style(&theme, '•', 1.0);
        assert_eq!(soft.glow, Some(Glow { blur: 1.04, alpha: 0.52 * 0.3 }));

        let strong = glyph_style(&theme, '×', 1.0);
        let glow = strong.glow.unwrap();
        assert!((glow.blur - 2.34).abs() < 1e-9);
        assert!((glow.alpha - 0.39).abs() < 1e-9);
    }

    #[test]
    fn scanline_wraps_within_cell() {
        assert_eq!(scanline_offset(0.0, 10), 0.0);
        assert_eq!(scanline_offset(2.6, 10), 5.0);
        assert_eq!(scanline_offset(7.0, 10), 4.0);
        assert_eq!(scanline_offset(3.0, 0), 0.0);
    }

    #[test]
    fn blend_over_background() {
        let white = Rgb::new(255, 255, 255);
        let teal = Rgb::new(95, 179, 179);
        assert_eq!(teal.over(white, 1.0), teal);
        assert_eq!(teal.over(white, 0.0), white);
        assert_eq!(teal.over(white, 0.5), Rgb::new(175, 217, 217));
    }
}
