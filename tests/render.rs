use glyphfield::colors::theme_by_name;
use glyphfield::patterns::Registry;
use glyphfield::render::record::{DrawList, DrawOp};
use glyphfield::render::{Renderer, Theme};
use glyphfield::terminal::Terminal;

#[test]
fn painting_is_idempotent_on_both_surfaces() {
    let registry = Registry::standard();
    let renderer = Renderer::new(Theme::default(), 6, 10);

    for (i, _) in registry.iter().enumerate() {
        let grid = registry.generate(i, 48, 16, 250.0, None);

        let mut a = DrawList::new();
        let mut b = DrawList::new();
        renderer.paint(&grid, 250.0, &mut a);
        renderer.paint(&grid, 250.0, &mut b);
        assert_eq!(a, b);

        let mut term = Terminal::offscreen(48, 16, 6, 10);
        renderer.paint(&grid, 250.0, &mut term);
        let first = term.to_ansi(true);
        renderer.paint(&grid, 250.0, &mut term);
        assert_eq!(first, term.to_ansi(true));
    }
}

#[test]
fn one_glyph_call_per_occupied_cell_then_scanlines() {
    let registry = Registry::standard();
    let renderer = Renderer::new(Theme::default(), 6, 10);
    let grid = registry.generate(0, 40, 12, 10.0, None);

    let mut list = DrawList::new();
    renderer.paint(&grid, 10.0, &mut list);

    assert_eq!(list.glyphs().count(), grid.count_occupied());
    assert!(matches!(list.ops.first(), Some(DrawOp::Background(_))));
    let tail: Vec<_> = list.ops.iter().rev().take(2).collect();
    assert!(tail.iter().all(|op| matches!(op, DrawOp::Rect { .. })));
}

#[test]
fn glyph_alpha_stays_in_range() {
    let registry = Registry::standard();
    let renderer = Renderer::new(Theme::default(), 6, 10);
    for frame in [0.0, 157.0, 314.0, 471.0] {
        let grid = registry.generate(13, 60, 20, frame, None);
        let mut list = DrawList::new();
        renderer.paint(&grid, frame, &mut list);
        for (_, _, _, style) in list.glyphs() {
            assert!((0.4..=1.0).contains(&style.alpha));
            if let Some(glow) = style.glow {
                assert!(style.alpha > 0.5);
                assert!(glow.blur > 0.0);
            }
        }
    }
}

#[test]
fn text_surface_matches_the_grid() {
    let registry = Registry::standard();
    let theme = theme_by_name("night").unwrap();
    let renderer = Renderer::new(theme, 6, 10);
    let grid = registry.generate(16, 50, 18, 900.0, None);

    let mut term = Terminal::offscreen(50, 18, 6, 10);
    renderer.paint(&grid, 900.0, &mut term);
    assert_eq!(term.to_ansi(false), grid.to_text());
}
