//! Legal-move generation and move application.
//!
//! Both operations are pure: they read a `GameState` and either list
//! candidate moves or return a new state. Turn handover is left to the
//! turn machine; `apply_move` only reports whether the move earned a bonus
//! turn.

use tracing::trace;

use crate::board::BoardLayout;
use crate::core::{
    is_valid_index, Color, GameState, HistoryEvent, Move, Phase, PieceId, SquareIndex, OFF_BOARD,
    PIECES_PER_COLOR, SCORED,
};
use crate::dice::MAX_ROLL;

/// Result of applying one move.
#[derive(Clone, Debug)]
pub struct MoveOutcome {
    /// State after the move. Turn and phase are unchanged.
    pub state: GameState,
    /// The piece that moved.
    pub piece: PieceId,
    /// Opponent piece sent back to the start, if any.
    pub captured: Option<PieceId>,
    /// True if the piece was borne off.
    pub scored: bool,
    /// True if the piece landed on a rosette: the mover rolls again.
    pub bonus_turn: bool,
    /// Set if this move bore off the mover's last piece.
    pub winner: Option<Color>,
}

/// The rules of the game over a board layout.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Rules {
    layout: BoardLayout,
}

impl Rules {
    /// Rules over the given layout.
    #[must_use]
    pub fn new(layout: BoardLayout) -> Self {
        Self { layout }
    }

    /// Rules over the traditional layout.
    #[must_use]
    pub fn traditional() -> Self {
        Self::new(BoardLayout::traditional())
    }

    /// The board layout.
    #[must_use]
    pub fn layout(&self) -> &BoardLayout {
        &self.layout
    }

    // === Queries ===

    /// Color and piece standing on the cell of `color`'s path at `index`.
    #[must_use]
    pub fn occupant(&self, state: &GameState, color: Color, index: SquareIndex) -> Option<(Color, PieceId)> {
        if let Some(piece) = state.player(color).piece_at(index) {
            if self.layout.coord_at(color, index).is_some() {
                return Some((color, piece.id));
            }
        }
        let other = color.opponent();
        let other_index = self.layout.opponent_index(color, index)?;
        state
            .player(other)
            .piece_at(other_index)
            .map(|piece| (other, piece.id))
    }

    /// True if `mv` would land on an opponent piece.
    #[must_use]
    pub fn is_capture(&self, state: &GameState, mv: &Move) -> bool {
        matches!(self.occupant(state, mv.color, mv.to), Some((c, _)) if c != mv.color)
    }

    /// True if `mv` ends on a rosette.
    #[must_use]
    pub fn is_rosette_landing(&self, mv: &Move) -> bool {
        self.layout.is_rosette(mv.to)
    }

    /// All moves the current player may make with `roll`.
    ///
    /// Moves are unique and ordered by the creation order of the first
    /// piece that can make them. A roll of 0, a roll above `MAX_ROLL` and
    /// a finished match all yield no moves.
    #[must_use]
    pub fn legal_moves(&self, state: &GameState, roll: u8) -> Vec<Move> {
        if roll == 0 || roll > MAX_ROLL || state.is_terminal() {
            return Vec::new();
        }

        let color = state.current_turn;
        let mine = state.player(color);
        let mut moves = Vec::with_capacity(PIECES_PER_COLOR);

        for piece in mine.pieces().iter().filter(|p| !p.is_finished()) {
            let to = piece.index + roll as SquareIndex;
            if to > SCORED {
                continue;
            }
            if to < SCORED {
                match self.occupant(state, color, to) {
                    Some((owner, _)) if owner == color => continue,
                    Some(_) if self.layout.is_rosette(to) => continue,
                    _ => {}
                }
            }

            let mv = Move::new(color, piece.index, to);
            if !moves.contains(&mv) {
                moves.push(mv);
            }
        }

        trace!(%color, roll, count = moves.len(), "generated legal moves");
        moves
    }

    // === Transitions ===

    /// Apply `mv` to a copy of `state`.
    ///
    /// `mv` must come from `legal_moves` for this state; anything else is a
    /// programming error and panics.
    #[must_use]
    pub fn apply_move(&self, state: &GameState, mv: &Move) -> MoveOutcome {
        assert!(!state.is_terminal(), "move {mv} applied to a finished match");
        assert_eq!(mv.color, state.current_turn, "move {mv} out of turn");

        let color = mv.color;
        let mut next = state.clone();

        let captured = match self.occupant(state, color, mv.to) {
            Some((owner, _)) if owner == color => panic!("move {mv} stacks on a friendly piece"),
            Some((owner, id)) => {
                assert!(!self.layout.is_rosette(mv.to), "move {mv} captures on a rosette");
                if let Some(index) = self.layout.opponent_index(color, mv.to) {
                    next.player_mut(owner).relocate(index, OFF_BOARD);
                }
                Some(id)
            }
            None => None,
        };

        let piece = match next.player_mut(color).relocate(mv.from, mv.to) {
            Some(piece) => piece,
            None => panic!("move {mv} has no {color} piece at {}", mv.from),
        };

        let scored = mv.is_scoring();
        let bonus_turn = self.layout.is_rosette(mv.to);
        let winner = (next.player(color).finished_count() == PIECES_PER_COLOR).then_some(color);

        next.record(HistoryEvent::Moved {
            mv: *mv,
            captured: captured.is_some(),
            rosette: bonus_turn,
        });
        if let Some(winner) = winner {
            next.winner = Some(winner);
            next.record(HistoryEvent::Won { color: winner });
        }

        MoveOutcome {
            state: next,
            piece,
            captured,
            scored,
            bonus_turn,
            winner,
        }
    }

    // === Invariants ===

    /// Panic if `state` is not a state the engine can produce.
    ///
    /// Checks piece counts and identities, index ranges, single occupancy
    /// of every cell, winner consistency, and phase/roll consistency.
    pub fn assert_invariants(&self, state: &GameState) {
        let mut cells = Vec::with_capacity(2 * PIECES_PER_COLOR);

        for color in Color::ALL {
            let player = state.player(color);
            assert_eq!(player.color(), color);
            assert_eq!(
                player.pieces().len(),
                PIECES_PER_COLOR,
                "{color} has {} pieces",
                player.pieces().len()
            );

            for (i, piece) in player.pieces().iter().enumerate() {
                assert_eq!(piece.id.index(), i, "{color} pieces out of creation order");
                assert_eq!(piece.color, color, "{color} holds a {} piece", piece.color);
                assert!(is_valid_index(piece.index), "{color} piece at index {}", piece.index);
                if let Some(coord) = self.layout.coord_at(color, piece.index) {
                    assert!(!cells.contains(&coord), "two pieces on {coord}");
                    cells.push(coord);
                }
            }

            let complete = player.finished_count() == PIECES_PER_COLOR;
            assert_eq!(
                complete,
                state.winner == Some(color),
                "{color} finished {} but winner is {:?}",
                player.finished_count(),
                state.winner
            );
        }

        if state.phase == Phase::Moving {
            assert!(state.roll_value.is_some_and(|r| r > 0), "moving without a roll");
            assert!(!state.is_terminal(), "moving after the match ended");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> Rules {
        Rules::traditional()
    }

    #[test]
    fn test_zero_roll_has_no_moves() {
        assert!(rules().legal_moves(&GameState::new(), 0).is_empty());
    }

    #[test]
    fn test_out_of_range_roll_has_no_moves() {
        let state = GameState::new().with_positions(Color::Light, &[2]);
        assert!(rules().legal_moves(&state, MAX_ROLL + 1).is_empty());
        assert!(rules().legal_moves(&state, 200).is_empty());
    }

    #[test]
    fn test_fresh_state_single_entry_move() {
        let moves = rules().legal_moves(&GameState::new(), 1);
        assert_eq!(moves, vec![Move::new(Color::Light, OFF_BOARD, 0)]);
    }

    #[test]
    fn test_no_stacking_on_friendly_piece() {
        let state = GameState::new().with_positions(Color::Light, &[2, 0]);
        let moves = rules().legal_moves(&state, 2);

        assert!(!moves.contains(&Move::new(Color::Light, 0, 2)));
        assert!(moves.contains(&Move::new(Color::Light, 2, 4)));
        assert!(moves.contains(&Move::new(Color::Light, OFF_BOARD, 1)));
    }

    #[test]
    fn test_overshoot_excluded_exact_score_included() {
        let state = GameState::new().with_positions(Color::Light, &[11, 10]);
        let moves = rules().legal_moves(&state, 4);

        assert!(!moves.iter().any(|m| m.from == 11));
        let score = Move::new(Color::Light, 10, SCORED);
        assert!(moves.contains(&score));
        assert!(score.is_scoring());
    }

    #[test]
    fn test_multiple_pieces_may_score() {
        let state = GameState::new().with_positions(Color::Light, &[14, 13]);
        let moves = rules().legal_moves(&state, 1);
        assert!(moves.contains(&Move::new(Color::Light, 13, SCORED)));
    }

    #[test]
    fn test_capture_in_shared_lane() {
        let state = GameState::new()
            .with_positions(Color::Light, &[4])
            .with_positions(Color::Dark, &[6]);
        let rules = rules();
        let mv = Move::new(Color::Light, 4, 6);

        assert!(rules.legal_moves(&state, 2).contains(&mv));
        assert!(rules.is_capture(&state, &mv));

        let outcome = rules.apply_move(&state, &mv);
        assert_eq!(outcome.captured, Some(PieceId::new(0)));
        assert_eq!(outcome.state.dark().pieces()[0].index, OFF_BOARD);
        assert_eq!(outcome.state.light().pieces()[0].index, 6);
        assert!(outcome.state.history().back().unwrap().contains("captured"));
        rules.assert_invariants(&outcome.state);
    }

    #[test]
    fn test_rosette_protects_occupant() {
        let state = GameState::new()
            .with_positions(Color::Light, &[5])
            .with_positions(Color::Dark, &[7]);
        let moves = rules().legal_moves(&state, 2);
        assert!(!moves.contains(&Move::new(Color::Light, 5, 7)));
    }

    #[test]
    fn test_private_squares_never_capture() {
        // Dark on its own index 2 does not block light's index 2.
        let state = GameState::new()
            .with_positions(Color::Light, &[0])
            .with_positions(Color::Dark, &[2]);
        let rules = rules();
        let mv = Move::new(Color::Light, 0, 2);

        assert!(rules.legal_moves(&state, 2).contains(&mv));
        assert!(!rules.is_capture(&state, &mv));
        let outcome = rules.apply_move(&state, &mv);
        assert_eq!(outcome.captured, None);
        assert_eq!(outcome.state.dark().pieces()[0].index, 2);
    }

    #[test]
    fn test_rosette_landing_grants_bonus() {
        let state = GameState::new();
        let outcome = rules().apply_move(&state, &Move::new(Color::Light, OFF_BOARD, 3));
        assert!(outcome.bonus_turn);
        assert!(!outcome.scored);

        let outcome = rules().apply_move(&state, &Move::new(Color::Light, OFF_BOARD, 2));
        assert!(!outcome.bonus_turn);
    }

    #[test]
    fn test_apply_does_not_mutate_input() {
        let state = GameState::new();
        let before = state.clone();
        let _ = rules().apply_move(&state, &Move::new(Color::Light, OFF_BOARD, 1));
        assert_eq!(state, before);
    }

    #[test]
    fn test_final_score_sets_winner() {
        let state = GameState::new().with_positions(Color::Light, &[14, 14, 14, 14, 14, 14, 12]);
        let rules = rules();
        let mv = Move::new(Color::Light, 12, SCORED);

        let outcome = rules.apply_move(&state, &mv);
        assert!(outcome.scored);
        assert_eq!(outcome.winner, Some(Color::Light));
        assert_eq!(outcome.state.winner, Some(Color::Light));
        assert_eq!(outcome.state.light().finished_count(), 7);
        assert!(rules.legal_moves(&outcome.state, 2).is_empty());
        rules.assert_invariants(&outcome.state);
    }

    #[test]
    fn test_duplicate_entry_moves_collapse() {
        let moves = rules().legal_moves(&GameState::new(), 3);
        assert_eq!(moves.len(), 1);
    }

    #[test]
    fn test_dark_moves_on_dark_turn() {
        let state = GameState::new().with_turn(Color::Dark);
        let moves = rules().legal_moves(&state, 2);
        assert_eq!(moves, vec![Move::new(Color::Dark, OFF_BOARD, 1)]);
    }

    #[test]
    #[should_panic(expected = "two pieces on")]
    fn test_invariants_catch_double_occupancy() {
        let state = GameState::new()
            .with_positions(Color::Light, &[5])
            .with_positions(Color::Dark, &[5]);
        rules().assert_invariants(&state);
    }

    #[test]
    #[should_panic(expected = "index")]
    fn test_invariants_catch_bad_index() {
        let state = GameState::new().with_positions(Color::Light, &[15]);
        rules().assert_invariants(&state);
    }
}
