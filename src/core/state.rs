//! Match state: pieces, turn, phase, roll, winner and history.
//!
//! `GameState` is a plain value. The rules engine produces new values from
//! old ones; only the session decides which value is current. History uses
//! `im::Vector` so snapshots handed to subscribers clone in O(1).

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::action::HistoryEvent;
use super::entity::{PieceId, SquareIndex, OFF_BOARD, PIECES_PER_COLOR, SCORED};
use super::player::{Color, ColorMap};

/// One playing piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    /// Identity within its color.
    pub id: PieceId,
    /// Owner.
    pub color: Color,
    /// Position along the owner's path.
    pub index: SquareIndex,
}

impl Piece {
    /// A piece waiting off the board.
    #[must_use]
    pub const fn new(id: PieceId, color: Color) -> Self {
        Self {
            id,
            color,
            index: OFF_BOARD,
        }
    }

    /// True once the piece has been borne off.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.index == SCORED
    }

    /// True while the piece waits to enter.
    #[must_use]
    pub const fn is_waiting(&self) -> bool {
        self.index == OFF_BOARD
    }
}

/// The seven pieces of one color.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    color: Color,
    pieces: SmallVec<[Piece; PIECES_PER_COLOR]>,
}

impl PlayerState {
    /// All pieces off the board.
    #[must_use]
    pub fn new(color: Color) -> Self {
        Self {
            color,
            pieces: PieceId::all().map(|id| Piece::new(id, color)).collect(),
        }
    }

    /// Owner of these pieces.
    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Pieces in creation order.
    #[must_use]
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Number of pieces borne off.
    #[must_use]
    pub fn finished_count(&self) -> usize {
        self.pieces.iter().filter(|p| p.is_finished()).count()
    }

    /// Number of pieces not yet entered.
    #[must_use]
    pub fn waiting_count(&self) -> usize {
        self.pieces.iter().filter(|p| p.is_waiting()).count()
    }

    /// First piece (in creation order) at `index`.
    #[must_use]
    pub fn piece_at(&self, index: SquareIndex) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.index == index)
    }

    /// True if some piece holds `index`.
    #[must_use]
    pub fn occupies(&self, index: SquareIndex) -> bool {
        self.piece_at(index).is_some()
    }

    /// Relocate the first piece at `from`. Returns the piece moved.
    pub(crate) fn relocate(&mut self, from: SquareIndex, to: SquareIndex) -> Option<PieceId> {
        let piece = self.pieces.iter_mut().find(|p| p.index == from)?;
        piece.index = to;
        Some(piece.id)
    }
}

/// What the current player must do next.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Awaiting a roll.
    Rolling,
    /// Awaiting a move chosen from the legal set.
    Moving,
}

/// Complete state of one match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    players: ColorMap<PlayerState>,
    /// Color to act.
    pub current_turn: Color,
    /// Rolling or moving.
    pub phase: Phase,
    /// Last roll still relevant to the turn (cleared after a move).
    pub roll_value: Option<u8>,
    /// Set once a color bears off all seven pieces.
    pub winner: Option<Color>,
    history: Vector<String>,
}

impl GameState {
    /// Fresh match: all pieces off the board, light to roll.
    #[must_use]
    pub fn new() -> Self {
        Self {
            players: ColorMap::new(PlayerState::new),
            current_turn: Color::Light,
            phase: Phase::Rolling,
            roll_value: None,
            winner: None,
            history: Vector::new(),
        }
    }

    /// Pieces of one color.
    #[must_use]
    pub fn player(&self, color: Color) -> &PlayerState {
        &self.players[color]
    }

    pub(crate) fn player_mut(&mut self, color: Color) -> &mut PlayerState {
        &mut self.players[color]
    }

    /// Light pieces.
    #[must_use]
    pub fn light(&self) -> &PlayerState {
        self.player(Color::Light)
    }

    /// Dark pieces.
    #[must_use]
    pub fn dark(&self) -> &PlayerState {
        self.player(Color::Dark)
    }

    /// True once a winner is set; no further commands are accepted.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.winner.is_some()
    }

    /// History lines, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<String> {
        &self.history
    }

    /// Append a history line.
    pub(crate) fn record(&mut self, event: HistoryEvent) {
        self.history.push_back(event.to_string());
    }

    /// Place pieces directly, bypassing the rules.
    ///
    /// Intended for tests and puzzles: `positions` lists the index of each
    /// piece in creation order; missing entries stay off the board. The
    /// caller is responsible for producing a reachable position.
    #[must_use]
    pub fn with_positions(mut self, color: Color, positions: &[SquareIndex]) -> Self {
        for (piece, &index) in self.players[color].pieces.iter_mut().zip(positions) {
            piece.index = index;
        }
        self
    }

    /// Set the color to act, bypassing the rules.
    #[must_use]
    pub fn with_turn(mut self, color: Color) -> Self {
        self.current_turn = color;
        self
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
