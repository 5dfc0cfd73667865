//! Ambient full-screen character patterns
//!
//! Pure pattern generators turn a grid size and a continuous frame value into
//! a [`grid::Grid`]; a throttled scheduler decides when to run them and the
//! renderer paints the result onto a terminal.

pub mod audio;
pub mod colors;
pub mod config;
pub mod grid;
pub mod help;
pub mod logging;
pub mod noise;
pub mod patterns;
pub mod render;
pub mod scheduler;
pub mod settings;
pub mod terminal;
pub mod viz;
