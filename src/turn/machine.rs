//! Phase sequencing: awaiting-roll, awaiting-move, terminal.

use serde::{Deserialize, Serialize};

use crate::core::{Color, GameState, HistoryEvent, Move, Phase, PieceId};
use crate::rules::Rules;

/// Where a match stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    /// `color` must roll.
    AwaitingRoll(Color),
    /// `color` rolled `roll` and must pick a legal move.
    AwaitingMove(Color, u8),
    /// `color` won; nothing more is accepted.
    Terminal(Color),
}

impl TurnPhase {
    /// Phase of a state.
    #[must_use]
    pub fn of(state: &GameState) -> Self {
        if let Some(winner) = state.winner {
            return TurnPhase::Terminal(winner);
        }
        match (state.phase, state.roll_value) {
            (Phase::Moving, Some(roll)) => TurnPhase::AwaitingMove(state.current_turn, roll),
            _ => TurnPhase::AwaitingRoll(state.current_turn),
        }
    }

    /// Color to act, or the winner once terminal.
    #[must_use]
    pub fn color(self) -> Color {
        match self {
            TurnPhase::AwaitingRoll(c) | TurnPhase::AwaitingMove(c, _) | TurnPhase::Terminal(c) => c,
        }
    }

    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, TurnPhase::Terminal(_))
    }
}

/// What a transition did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TurnEvent {
    /// `color` rolled and now has `moves` options.
    Rolled { color: Color, value: u8, moves: usize },
    /// `color` rolled with no legal move; the other color is up.
    Passed { color: Color, value: u8 },
    /// A move was applied.
    Moved {
        mv: Move,
        captured: Option<PieceId>,
        bonus_turn: bool,
    },
    /// A move ended the match.
    Won { mv: Move, color: Color },
}

/// New state produced by an accepted command.
#[derive(Clone, Debug)]
pub struct Transition {
    /// The state to publish.
    pub state: GameState,
    /// Moves `play` will accept next. Empty unless awaiting a move.
    pub legal_moves: Vec<Move>,
    /// Summary for logging.
    pub event: TurnEvent,
}

/// Roll `value` for the color to act.
///
/// Returns `None` (command ignored) unless the match awaits a roll. A roll
/// with no legal move hands the turn over at once; the roll value stays
/// visible until the next roll.
#[must_use]
pub fn roll(rules: &Rules, state: &GameState, value: u8) -> Option<Transition> {
    let TurnPhase::AwaitingRoll(color) = TurnPhase::of(state) else {
        return None;
    };

    let mut next = state.clone();
    next.roll_value = Some(value);
    let legal_moves = rules.legal_moves(&next, value);

    let event = if legal_moves.is_empty() {
        next.record(HistoryEvent::Passed { color, value });
        next.current_turn = color.opponent();
        next.phase = Phase::Rolling;
        TurnEvent::Passed { color, value }
    } else {
        next.record(HistoryEvent::Rolled { color, value });
        next.phase = Phase::Moving;
        TurnEvent::Rolled {
            color,
            value,
            moves: legal_moves.len(),
        }
    };

    Some(Transition {
        state: next,
        legal_moves,
        event,
    })
}

/// Play `mv`, which must be a member of `legal`, the set produced by the
/// roll that opened this move phase.
///
/// Returns `None` (command ignored) unless the match awaits a move and `mv`
/// is in `legal`.
#[must_use]
pub fn play(rules: &Rules, state: &GameState, legal: &[Move], mv: &Move) -> Option<Transition> {
    if !matches!(TurnPhase::of(state), TurnPhase::AwaitingMove(..)) || !legal.contains(mv) {
        return None;
    }

    let outcome = rules.apply_move(state, mv);
    let mut next = outcome.state;
    next.roll_value = None;
    next.phase = Phase::Rolling;

    let event = match outcome.winner {
        Some(color) => TurnEvent::Won { mv: *mv, color },
        None => {
            if !outcome.bonus_turn {
                next.current_turn = mv.color.opponent();
            }
            TurnEvent::Moved {
                mv: *mv,
                captured: outcome.captured,
                bonus_turn: outcome.bonus_turn,
            }
        }
    };

    Some(Transition {
        state: next,
        legal_moves: Vec::new(),
        event,
    })
}
