//! Moves and history events.
//!
//! A `Move` is the only kind of action a player chooses; rolling is a
//! command without arguments. Moves are plain values so the view can hold
//! on to the legal set and hand one back unchanged.
//!
//! `HistoryEvent` renders the human-readable lines appended to the match
//! history.

use serde::{Deserialize, Serialize};

use super::entity::{SquareIndex, OFF_BOARD, SCORED};
use super::player::Color;

/// A candidate transition of one piece along its owner's path.
///
/// ```
/// use royal_ur::core::{Color, Move};
///
/// let enter = Move::new(Color::Light, -1, 2);
/// assert!(enter.is_entry());
/// assert_eq!(enter.distance(), 3);
///
/// let score = Move::new(Color::Dark, 12, 14);
/// assert!(score.is_scoring());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// Owner of the moving piece.
    pub color: Color,
    /// Current index of the moving piece (`-1` to enter).
    pub from: SquareIndex,
    /// Destination index (`14` scores).
    pub to: SquareIndex,
}

impl Move {
    /// Create a move.
    #[must_use]
    pub const fn new(color: Color, from: SquareIndex, to: SquareIndex) -> Self {
        Self { color, from, to }
    }

    /// True if the piece enters the board.
    #[must_use]
    pub const fn is_entry(&self) -> bool {
        self.from == OFF_BOARD
    }

    /// True if the piece is borne off.
    #[must_use]
    pub const fn is_scoring(&self) -> bool {
        self.to == SCORED
    }

    /// Number of squares travelled, equal to the roll that produced it.
    #[must_use]
    pub const fn distance(&self) -> u8 {
        (self.to - self.from) as u8
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let from = if self.is_entry() {
            "start".to_string()
        } else {
            self.from.to_string()
        };
        let to = if self.is_scoring() {
            "home".to_string()
        } else {
            self.to.to_string()
        };
        write!(f, "{} {} -> {}", self.color, from, to)
    }
}

/// A line of match history.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HistoryEvent {
    /// A roll that left at least one legal move.
    Rolled { color: Color, value: u8 },
    /// A roll with no legal move; the turn is handed over.
    Passed { color: Color, value: u8 },
    /// A piece moved.
    Moved {
        mv: Move,
        captured: bool,
        rosette: bool,
    },
    /// The mover bore off its last piece.
    Won { color: Color },
}

impl std::fmt::Display for HistoryEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HistoryEvent::Rolled { color, value } => write!(f, "{color} rolled {value}"),
            HistoryEvent::Passed { color, value } => {
                write!(f, "{color} rolled {value}: no legal moves, turn passes")
            }
            HistoryEvent::Moved {
                mv,
                captured,
                rosette,
            } => {
                let color = mv.color;
                if mv.is_scoring() {
                    write!(f, "{color} scored a piece from square {}", mv.from)?;
                } else if mv.is_entry() {
                    write!(f, "{color} entered a piece onto square {}", mv.to)?;
                } else {
                    write!(f, "{color} moved a piece from square {} to {}", mv.from, mv.to)?;
                }
                if *captured {
                    write!(f, " and captured a {} piece", color.opponent())?;
                }
                if *rosette {
                    write!(f, " (rosette, roll again)")?;
                }
                Ok(())
            }
            HistoryEvent::Won { color } => write!(f, "{color} wins the match"),
        }
    }
}
