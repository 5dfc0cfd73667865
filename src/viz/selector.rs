//! Which pattern is on screen, plus the picker overlay state

use rand::Rng;

#[derive(Debug, Clone)]
pub struct PatternSelector {
    index: usize,
    count: usize,
    picker_open: bool,
    cursor: usize,
}

impl PatternSelector {
    /// `initial` past the end starts on the first pattern
    pub fn new(count: usize, initial: usize) -> Self {
        let index = if initial < count { initial } else { 0 };
        Self {
            index,
            count,
            picker_open: false,
            cursor: index,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Select `index`; returns true when the selection changed. Out of range
    /// is ignored.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.count || index == self.index {
            return false;
        }
        self.index = index;
        self.cursor = index;
        true
    }

    pub fn next(&mut self) -> bool {
        if self.count == 0 {
            return false;
        }
        self.select((self.index + 1) % self.count)
    }

    pub fn prev(&mut self) -> bool {
        if self.count == 0 {
            return false;
        }
        self.select((self.index + self.count - 1) % self.count)
    }

    /// Jump to a random pattern other than the current one
    pub fn shuffle<R: Rng>(&mut self, rng: &mut R) -> bool {
        if self.count < 2 {
            return false;
        }
        let offset = rng.gen_range(1..self.count);
        self.select((self.index + offset) % self.count)
    }

    pub fn picker_open(&self) -> bool {
        self.picker_open
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn toggle_picker(&mut self) {
        self.picker_open = !self.picker_open;
        self.cursor = self.index;
    }

    pub fn close_picker(&mut self) {
        self.picker_open = false;
    }

    pub fn cursor_up(&mut self) {
        if self.count > 0 {
            self.cursor = (self.cursor + self.count - 1) % self.count;
        }
    }

    pub fn cursor_down(&mut self) {
        if self.count > 0 {
            self.cursor = (self.cursor + 1) % self.count;
        }
    }

    /// Select the row under the cursor and close the picker
    pub fn confirm(&mut self) -> bool {
        self.picker_open = false;
        self.select(self.cursor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn out_of_range_start_falls_back() {
        assert_eq!(PatternSelector::new(5, 9).index(), 0);
        assert_eq!(PatternSelector::new(5, 4).index(), 4);
    }

    #[test]
    fn next_and_prev_wrap() {
        let mut sel = PatternSelector::new(3, 2);
        assert!(sel.next());
        assert_eq!(sel.index(), 0);
        assert!(sel.prev());
        assert_eq!(sel.index(), 2);
    }

    #[test]
    fn select_ignores_out_of_range() {
        let mut sel = PatternSelector::new(3, 0);
        assert!(!sel.select(3));
        assert!(!sel.select(0));
        assert_eq!(sel.index(), 0);
    }

    #[test]
    fn picker_cursor_confirms() {
        let mut sel = PatternSelector::new(4, 1);
        sel.toggle_picker();
        assert!(sel.picker_open());
        sel.cursor_down();
        sel.cursor_down();
        assert!(sel.confirm());
        assert_eq!(sel.index(), 3);
        assert!(!sel.picker_open());
    }

    #[test]
    fn picker_cursor_wraps_upward() {
        let mut sel = PatternSelector::new(4, 0);
        sel.toggle_picker();
        sel.cursor_up();
        assert_eq!(sel.cursor(), 3);
    }

    #[test]
    fn shuffle_always_moves() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut sel = PatternSelector::new(23, 0);
        for _ in 0..100 {
            let before = sel.index();
            assert!(sel.shuffle(&mut rng));
            assert_ne!(sel.index(), before);
        }
        let mut single = PatternSelector::new(1, 0);
        assert!(!single.shuffle(&mut rng));
    }
}
