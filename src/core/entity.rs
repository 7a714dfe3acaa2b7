//! Piece identity and square indices.
//!
//! ## Square layout
//!
//! A piece's position is an index along its owner's path:
//! - `-1` (`OFF_BOARD`): not yet entered
//! - `0..14`: on the board
//! - `14` (`SCORED`): borne off, terminal
//!
//! ```
//! use royal_ur::core::{is_on_board, OFF_BOARD, SCORED};
//!
//! assert!(!is_on_board(OFF_BOARD));
//! assert!(is_on_board(0));
//! assert!(is_on_board(13));
//! assert!(!is_on_board(SCORED));
//! ```

use serde::{Deserialize, Serialize};

/// Position along a path, in `[-1, 14]`.
pub type SquareIndex = i8;

/// Index of a piece that has not entered the board.
pub const OFF_BOARD: SquareIndex = -1;

/// Index of a piece that has been borne off.
pub const SCORED: SquareIndex = 14;

/// Number of on-board squares in each path.
pub const PATH_LEN: usize = 14;

/// Pieces per color; fixed for the lifetime of a match.
pub const PIECES_PER_COLOR: usize = 7;

/// True for indices `0..14`.
#[must_use]
pub const fn is_on_board(index: SquareIndex) -> bool {
    index >= 0 && index < SCORED
}

/// True for indices a piece may legally hold.
#[must_use]
pub const fn is_valid_index(index: SquareIndex) -> bool {
    index >= OFF_BOARD && index <= SCORED
}

/// Identity of a piece within its color, in creation order (0..7).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PieceId(pub u8);

impl PieceId {
    /// Create a piece ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Raw index in creation order.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// All piece IDs of one color, in creation order.
    pub fn all() -> impl Iterator<Item = PieceId> {
        (0..PIECES_PER_COLOR as u8).map(PieceId)
    }
}

impl std::fmt::Display for PieceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0 + 1)
    }
}
