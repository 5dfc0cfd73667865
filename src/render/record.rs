//! In-memory surface that records draw calls

use super::{GlyphStyle, Rgb, Rgba, Surface};
use std::io;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Background(Rgb),
    Glyph { x: f64, y: f64, ch: char, style: GlyphStyle },
    Rect { x: f64, y: f64, width: f64, height: f64, color: Rgba },
    Present,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    pub ops: Vec<DrawOp>,
    /// Reported surface width; `None` leaves the renderer to use the grid's
    pub width: Option<f64>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_width(width: f64) -> Self {
        Self {
            ops: Vec::new(),
            width: Some(width),
        }
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }

    pub fn glyphs(&self) -> impl Iterator<Item = (f64, f64, char, &GlyphStyle)> + '_ {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Glyph { x, y, ch, style } => Some((*x, *y, *ch, style)),
            _ => None,
        })
    }

    pub fn rects(&self) -> impl Iterator<Item = (f64, f64, f64, f64)> + '_ {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Rect { x, y, width, height, .. } => Some((*x, *y, *width, *height)),
            _ => None,
        })
    }
}

impl Surface for DrawList {
    fn fill_background(&mut self, color: Rgb) {
        self.ops.push(DrawOp::Background(color));
    }

    fn draw_glyph(&mut self, x: f64, y: f64, ch: char, style: &GlyphStyle) {
        self.ops.push(DrawOp::Glyph { x, y, ch, style: *style });
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgba) {
        self.ops.push(DrawOp::Rect { x, y, width, height, color });
    }

    fn present(&mut self) -> io::Result<()> {
        self.ops.push(DrawOp::Present);
        Ok(())
    }

    fn width(&self) -> Option<f64> {
        self.width
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;
    use crate::render::{Renderer, Theme};

    fn sample_grid() -> Grid {
        let mut grid = Grid::new(4, 3);
        grid.set(0, 0, '·');
        grid.set(3, 2, '█');
        grid
    }

    #[test]
    fn compositing_order() {
        let renderer = Renderer::new(Theme::default(), 6, 10);
        let mut list = DrawList::new();
        renderer.paint(&sample_grid(), 0.0, &mut list);

        assert_eq!(list.ops.len(), 5);
        assert!(matches!(list.ops[0], DrawOp::Background(_)));
        assert!(matches!(list.ops[3], DrawOp::Rect { .. }));
        assert!(matches!(list.ops[4], DrawOp::Rect { .. }));
    }

    #[test]
    fn glyphs_are_centred_in_cells() {
        let renderer = Renderer::new(Theme::default(), 6, 10);
        let mut list = DrawList::new();
        renderer.paint(&sample_grid(), 0.0, &mut list);

        let glyphs: Vec<_> = list.glyphs().map(|(x, y, ch, _)| (x, y, ch)).collect();
        assert_eq!(glyphs, vec![(3.0, 5.0, '·'), (21.0, 25.0, '█')]);
    }

    #[test]
    fn scanlines_span_the_grid_one_cell_apart() {
        let renderer = Renderer::new(Theme::default(), 6, 10);
        let mut list = DrawList::new();
        renderer.paint(&sample_grid(), 3.0, &mut list);

        let rects: Vec<_> = list.rects().collect();
        assert_eq!(rects, vec![(0.0, 6.0, 24.0, 1.0), (0.0, 16.0, 24.0, 1.0)]);
    }

    #[test]
    fn scanlines_span_a_surface_wider_than_the_grid() {
        let renderer = Renderer::new(Theme::default(), 6, 10);
        // 1000 px does not divide into 6 px cells
        let mut list = DrawList::with_width(1000.0);
        renderer.paint(&sample_grid(), 3.0, &mut list);

        assert!(list.rects().all(|(x, _, width, _)| x == 0.0 && width == 1000.0));
    }

    #[test]
    fn painting_twice_gives_the_same_calls() {
        let renderer = Renderer::new(Theme::default(), 6, 10);
        let grid = sample_grid();
        let mut a = DrawList::new();
        let mut b = DrawList::new();
        renderer.paint(&grid, 42.5, &mut a);
        renderer.paint(&grid, 42.5, &mut b);
        assert_eq!(a, b);
        assert!(!a.ops.contains(&DrawOp::Present));
    }
}
