//! Character grid produced by every pattern generator

use std::fmt;

/// The character that marks an empty cell
pub const EMPTY: char = ' ';

/// Row-major grid of single display characters.
///
/// A grid is built fresh for each frame and handed to the renderer by value;
/// nothing keeps a reference to it across ticks.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    cols: usize,
    rows: usize,
    cells: Vec<char>,
}

impl Grid {
    /// Blank grid (all cells empty). A zero dimension yields an empty grid.
    pub fn new(cols: usize, rows: usize) -> Self {
        if cols == 0 || rows == 0 {
            return Self::empty();
        }
        Self {
            cols,
            rows,
            cells: vec![EMPTY; cols * rows],
        }
    }

    /// Grid with no rows and no columns
    pub fn empty() -> Self {
        Self {
            cols: 0,
            rows: 0,
            cells: Vec::new(),
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, col: usize, row: usize) -> Option<char> {
        if col < self.cols && row < self.rows {
            Some(self.cells[row * self.cols + col])
        } else {
            None
        }
    }

    /// Set a cell. Out-of-bounds writes are ignored.
    pub fn set(&mut self, col: usize, row: usize, ch: char) {
        if col < self.cols && row < self.rows {
            self.cells[row * self.cols + col] = ch;
        }
    }

    /// Iterate rows as slices
    pub fn rows_iter(&self) -> impl Iterator<Item = &[char]> {
        // chunks(0) panics, and an empty grid has no rows anyway
        self.cells.chunks(self.cols.max(1))
    }

    /// Iterate `(col, row, ch)` over every non-empty cell
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize, char)> + '_ {
        let cols = self.cols.max(1);
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &ch)| ch != EMPTY)
            .map(move |(i, &ch)| (i % cols, i / cols, ch))
    }

    /// Number of non-empty cells
    pub fn count_occupied(&self) -> usize {
        self.cells.iter().filter(|&&ch| ch != EMPTY).count()
    }

    /// Render as plain text, one line per row
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(self.cells.len() * 3 + self.rows);
        for row in self.rows_iter() {
            out.extend(row.iter());
            out.push('\n');
        }
        out
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Grid {}x{}", self.cols, self.rows)?;
        for row in self.rows_iter() {
            let line: String = row.iter().collect();
            writeln!(f, "|{}|", line)?;
        }
        Ok(())
    }
}
