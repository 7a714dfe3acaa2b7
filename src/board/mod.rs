//! Board topology.
//!
//! Static description of the two paths over the 3x8 grid: which cell each
//! path index maps to, which indices are rosettes, and which indices form
//! the shared lane where captures can happen. The rules engine only asks
//! index questions; the view asks cell questions. Both are answered from
//! the same `BoardLayout` data.

pub mod layout;

pub use layout::{BoardLayout, Coord, LayoutError, LayoutSpec, BOARD_COLS, BOARD_ROWS, TRADITIONAL_ROSETTES};
