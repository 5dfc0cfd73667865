//! Block-letter mask for the Logo pattern
//!
//! Text is laid out in a 5×7 bitmap font scaled 2×, centred on the grid, with
//! one scaled column of spacing after each letter. [`letter_mask`] reports how
//! strongly a cell sits inside a letter stroke.

pub const LETTER_WIDTH: usize = 5;
pub const LETTER_HEIGHT: usize = 7;
pub const LETTER_SPACING: usize = 1;
pub const SCALE: usize = 2;

/// Rows of a glyph, top to bottom; bit 4 is the leftmost pixel
type Bitmap = [u8; LETTER_HEIGHT];

fn bitmap(ch: char) -> Option<Bitmap> {
    let rows = match ch.to_ascii_uppercase() {
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110],
        'C' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' => [0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110],
        'E' => [0b11111, 0b10000, 0b10000, 0b11111, 0b10000, 0b10000, 0b11111],
        'F' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
        'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111],
        'H' => [0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001, 0b10001],
        'I' => [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'J' => [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100],
        'K' => [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' => [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
        'N' => [0b10001, 0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'Q' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        'W' => [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010],
        'X' => [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
        'Y' => [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100],
        'Z' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],
        '0' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11111, 0b00001, 0b00001, 0b11111, 0b00001, 0b00001, 0b11111],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b01110, 0b10000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00001, 0b01110],
        _ => return None,
    };
    Some(rows)
}

/// Whether the font has a glyph for `ch` (case-insensitive)
pub fn is_supported(ch: char) -> bool {
    bitmap(ch).is_some()
}

fn pixel(bitmap: &Bitmap, x: usize, y: usize) -> bool {
    bitmap[y] & (1 << (LETTER_WIDTH - 1 - x)) != 0
}

/// Mask strength at a cell: 0 outside any letter pixel, otherwise
/// `max(0.5, 1 - dist_from_edge / 2)` where the distance is measured in font
/// pixels to the nearest edge of the glyph box.
///
/// Characters without a glyph (spaces included) take up a letter slot and
/// leave a gap.
pub fn letter_mask(col: usize, row: usize, cols: usize, rows: usize, text: &str) -> f64 {
    let letters: Vec<char> = text.chars().collect();
    if letters.is_empty() {
        return 0.0;
    }

    let slot_width = ((LETTER_WIDTH + LETTER_SPACING) * SCALE) as f64;
    let text_height = (LETTER_HEIGHT * SCALE) as f64;
    let total_width = letters.len() as f64 * slot_width;

    let start_x = (cols as f64 - total_width) / 2.0;
    let start_y = (rows as f64 - text_height) / 2.0;
    let rel_x = col as f64 - start_x;
    let rel_y = row as f64 - start_y;

    let y = (rel_y / SCALE as f64).floor();
    if y < 0.0 || y >= LETTER_HEIGHT as f64 {
        return 0.0;
    }

    let slot = (rel_x / slot_width).floor();
    if slot < 0.0 || slot >= letters.len() as f64 {
        return 0.0;
    }
    let Some(glyph) = bitmap(letters[slot as usize]) else {
        return 0.0;
    };

    let x = ((rel_x - slot * slot_width) / SCALE as f64).floor();
    if x < 0.0 || x >= LETTER_WIDTH as f64 {
        return 0.0;
    }

    let (x, y) = (x as usize, y as usize);
    if !pixel(&glyph, x, y) {
        return 0.0;
    }

    let edge_x = x.min(LETTER_WIDTH - 1 - x);
    let edge_y = y.min(LETTER_HEIGHT - 1 - y);
    let dist = edge_x.min(edge_y) as f64;
    (1.0 - dist / 2.0).max(0.5)
}

#[cfg(test)]
mod tests {
    use super::*;

    // "H" alone on a 12×14 grid starts at (0, 0) exactly
    const COLS: usize = 12;
    const ROWS: usize = 14;

    #[test]
    fn h_top_left_is_full_strength() {
        assert_eq!(letter_mask(0, 0, COLS, ROWS, "H"), 1.0);
        assert_eq!(letter_mask(1, 1, COLS, ROWS, "H"), 1.0);
    }

    #[test]
    fn h_gap_is_empty() {
        // font pixel (1, 0) is off in "H"
        assert_eq!(letter_mask(2, 0, COLS, ROWS, "H"), 0.0);
        assert_eq!(letter_mask(3, 1, COLS, ROWS, "H"), 0.0);
    }

    #[test]
    fn crossbar_interior_is_half_strength() {
        // font pixel (2, 2) sits two pixels from the vertical edges and two
        // from the top: 1 - 2/2 = 0, clamped to 0.5
        assert_eq!(letter_mask(4, 4, COLS, ROWS, "H"), 0.5);
        // font pixel (1, 2): one pixel from the left edge
        assert_eq!(letter_mask(2, 4, COLS, ROWS, "H"), 0.5);
    }

    #[test]
    fn spacing_column_is_empty() {
        // font x = 5 falls in the spacing after the glyph
        assert_eq!(letter_mask(10, 4, COLS, ROWS, "H"), 0.0);
        assert_eq!(letter_mask(11, 4, COLS, ROWS, "H"), 0.0);
    }

    #[test]
    fn outside_bounds_and_unknown_letters() {
        assert_eq!(letter_mask(0, 0, 100, 100, "H"), 0.0);
        assert_eq!(letter_mask(0, 0, COLS, ROWS, ""), 0.0);
        assert_eq!(letter_mask(0, 0, COLS, ROWS, "#"), 0.0);
        assert_eq!(letter_mask(0, 0, COLS, ROWS, " "), 0.0);
    }

    #[test]
    fn lowercase_uses_uppercase_glyphs() {
        assert_eq!(letter_mask(0, 0, COLS, ROWS, "h"), letter_mask(0, 0, COLS, ROWS, "H"));
        assert!(is_supported('q'));
        assert!(!is_supported('!'));
    }

    #[test]
    fn text_is_centred() {
        // two letters on a 48-wide grid start at column 12
        let cols = 48;
        assert_eq!(letter_mask(11, 0, cols, ROWS, "HH"), 0.0);
        assert_eq!(letter_mask(12, 0, cols, ROWS, "HH"), 1.0);
        assert_eq!(letter_mask(24, 0, cols, ROWS, "HH"), 1.0);
    }
}
