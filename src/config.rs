use crate::render::Theme;
use crate::scheduler::DEFAULT_FPS;
use std::fmt;
use std::str::FromStr;

/// Pixel size of one character cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellSize {
    pub width: u32,
    pub height: u32,
}

impl Default for CellSize {
    fn default() -> Self {
        Self { width: 6, height: 10 }
    }
}

impl FromStr for CellSize {
    type Err = String;

    /// Parses `WxH`, e.g. `6x10`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .trim()
            .split_once(['x', 'X'])
            .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{}'", s))?;
        let width: u32 = w.trim().parse().map_err(|_| format!("bad cell width '{}'", w))?;
        let height: u32 = h.trim().parse().map_err(|_| format!("bad cell height '{}'", h))?;
        if width == 0 || height == 0 {
            return Err("cell size must be positive".to_string());
        }
        Ok(Self { width, height })
    }
}

impl fmt::Display for CellSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Configuration for the interactive display
#[derive(Debug, Clone)]
pub struct DisplayConfig {
    pub pattern: usize,
    pub fps: u32,
    pub cell: CellSize,
    pub theme: Theme,
    /// Seconds between automatic pattern changes
    pub cycle: Option<f64>,
    pub shuffle: bool,
    pub seed: Option<u64>,
    pub audio: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            pattern: 0,
            fps: DEFAULT_FPS,
            cell: CellSize::default(),
            theme: Theme::default(),
            cycle: None,
            shuffle: false,
            seed: None,
            audio: true,
        }
    }
}

/// Configuration for printing a single frame
#[derive(Debug, Clone)]
pub struct PrintConfig {
    pub pattern: usize,
    pub frame: f64,
    pub cols: u16,
    pub rows: u16,
    pub cell: CellSize,
    pub theme: Theme,
    pub color: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_size_parses() {
        assert_eq!("6x10".parse(), Ok(CellSize { width: 6, height: 10 }));
        assert_eq!(" 8X16 ".parse(), Ok(CellSize { width: 8, height: 16 }));
        assert!("6".parse::<CellSize>().is_err());
        assert!("0x10".parse::<CellSize>().is_err());
        assert!("ax10".parse::<CellSize>().is_err());
        assert_eq!(CellSize::default().to_string(), "6x10");
    }
}
