use crate::patterns::Registry;
use crate::render::{Rgb, Theme};
use crate::terminal::Terminal;

/// Key reference shown under the pattern list
pub const KEYS: &str = "←/→ n/p switch · ↑/↓ Enter pick · Space pause · m mic · Shift+0-9 theme · q quit";

/// Overlay colours derived from the theme: the box is drawn in the glyph
/// colour on the background, the selected row inverted.
fn overlay_colors(theme: &Theme) -> (Rgb, Rgb) {
    (theme.glyph, theme.background)
}

/// Lines of the picker, one per pattern, with the cursor row marked
pub fn picker_lines(registry: &Registry, cursor: usize, current: usize) -> Vec<String> {
    registry
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let marker = if i == cursor { '▶' } else { ' ' };
            let active = if i == current { '●' } else { ' ' };
            let mic = if p.audio_reactive { " ♪" } else { "" };
            format!("{}{} {:2} {}{}", marker, active, i, p.name, mic)
        })
        .collect()
}

/// Render a centered box with the provided lines. `highlight` is inverted.
pub fn render_box(term: &mut Terminal, theme: &Theme, title: &str, lines: &[String], highlight: Option<usize>) {
    if lines.is_empty() {
        return;
    }
    let (fg, bg) = overlay_colors(theme);
    let (width, height) = term.size();

    let max_width = lines
        .iter()
        .map(|l| l.chars().count())
        .chain(std::iter::once(title.chars().count() + 2))
        .max()
        .unwrap_or(0);
    let box_width = max_width + 4; // 2 chars padding each side
    let box_height = lines.len() + 2; // border rows

    // Center the box
    let start_x = (width as usize).saturating_sub(box_width) / 2;
    let start_y = (height as usize).saturating_sub(box_height) / 2;
    let (x, y) = (start_x as u16, start_y as u16);

    // Top border with the title set into it: ┌─ Title ─┐
    let label = format!(" {} ", title);
    let fill = (box_width - 2).saturating_sub(label.chars().count() + 1);
    let top = format!("┌─{}{}┐", label, "─".repeat(fill));
    term.set_text(x, y, &top, fg, bg, true);

    for (i, line) in lines.iter().enumerate() {
        let row = y + 1 + i as u16;
        let padding = max_width.saturating_sub(line.chars().count());
        let padded = format!(" {}{} ", line, " ".repeat(padding));

        term.set_text(x, row, "│", fg, bg, false);
        if highlight == Some(i) {
            term.set_text(x + 1, row, &padded, bg, fg, true);
        } else {
            term.set_text(x + 1, row, &padded, fg, bg, false);
        }
        term.set_text(x + box_width as u16 - 1, row, "│", fg, bg, false);
    }

    let bottom = format!("└{}┘", "─".repeat(box_width - 2));
    term.set_text(x, y + box_height as u16 - 1, &bottom, fg, bg, true);
}

/// Pattern picker overlay
pub fn render_picker(term: &mut Terminal, theme: &Theme, registry: &Registry, cursor: usize, current: usize) {
    let lines = picker_lines(registry, cursor, current);
    render_box(term, theme, "Patterns", &lines, Some(cursor));
}

/// One-line status bar along the bottom edge
pub fn render_status(term: &mut Terminal, theme: &Theme, text: &str) {
    let (width, height) = term.size();
    if height == 0 {
        return;
    }
    let (fg, bg) = overlay_colors(theme);
    let mut line: String = format!(" {}", text).chars().take(width as usize).collect();
    let pad = (width as usize).saturating_sub(line.chars().count());
    line.push_str(&" ".repeat(pad));
    term.set_text(0, height - 1, &line, bg, fg, false);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picker_marks_cursor_and_current() {
        let registry = Registry::standard();
        let lines = picker_lines(&registry, 3, 0);
        assert_eq!(lines.len(), registry.len());
        assert!(lines[3].starts_with('▶'));
        assert!(lines[0].starts_with(" ●"));
        assert!(lines[21].ends_with('♪'));
    }

    #[test]
    fn picker_box_is_centered_and_bordered() {
        let registry = Registry::standard();
        let mut term = Terminal::offscreen(80, 30, 6, 10);
        render_picker(&mut term, &Theme::default(), &registry, 0, 0);
        let text = term.to_ansi(false);
        assert!(text.contains("┌─ Patterns ─"));
        assert!(text.contains("HealthCode360"));
        assert!(text.contains("Voice Cascade"));
        assert!(text.contains('┘'));
    }

    #[test]
    fn status_fills_bottom_row() {
        let mut term = Terminal::offscreen(20, 4, 6, 10);
        render_status(&mut term, &Theme::default(), "Soft Waves · mic off");
        let text = term.to_ansi(false);
        let last = text.lines().last().unwrap();
        assert_eq!(last.chars().count(), 20);
        assert!(last.starts_with(" Soft Waves"));
    }
}
