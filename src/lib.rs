//! # royal-ur
//!
//! Engine for the Royal Game of Ur: board topology, rules, turn sequencing,
//! dice, a single-match state container and a scheduled bot opponent.
//!
//! ## Design Principles
//!
//! 1. **Pure rules**: `Rules::legal_moves` and `Rules::apply_move` never
//!    mutate their input. Same state and roll, same answer.
//!
//! 2. **One mutable place**: a `Session` owns the current `GameState`.
//!    Commands are atomic; illegal or out-of-phase commands are ignored.
//!
//! 3. **Layout as data**: paths, rosettes and the shared lane come from a
//!    validated `BoardLayout`, not from branches in the rules.
//!
//! ## Architecture
//!
//! - **Snapshots**: the session publishes a `Snapshot` on a tokio `watch`
//!   channel after each transition. History is an `im::Vector`, so
//!   snapshots clone in O(1).
//!
//! - **Bot task**: `BotController::spawn` ticks on a tokio interval, takes
//!   one action per tick under the session lock, and exits on match end,
//!   reset, or `BotHandle::stop`.
//!
//! ```
//! use royal_ur::{Session, TurnPhase};
//!
//! let mut session = Session::seeded(3);
//! let value = session.roll().unwrap();
//! if let Some(mv) = session.legal_moves().first().copied() {
//!     assert!(session.make_move(&mv));
//! }
//! assert!(value <= 4);
//! assert!(matches!(session.phase(), TurnPhase::AwaitingRoll(_)));
//! assert_ne!(session.state().history().len(), 0);
//! ```
//!
//! ## Modules
//!
//! - `core`: colors, pieces, moves, state, RNG, configuration
//! - `board`: path topology and coordinate lookups
//! - `dice`: the four binary dice
//! - `rules`: legal moves and move application
//! - `turn`: roll/move phase sequencing
//! - `session`: the match state container
//! - `bot`: move policies and the scheduled bot task
//! - `selfplay`: bot-versus-bot batches

pub mod core;
pub mod board;
pub mod dice;
pub mod rules;
pub mod turn;
pub mod session;
pub mod bot;
pub mod selfplay;

// Re-export commonly used types
pub use crate::core::{
    Color, ColorMap,
    PieceId, SquareIndex, OFF_BOARD, SCORED, PATH_LEN, PIECES_PER_COLOR,
    GameRng,
    BotConfig, ConfigError, MatchConfig, PolicyKind,
    HistoryEvent, Move,
    GameState, Phase, Piece, PlayerState,
};

pub use crate::board::{BoardLayout, Coord, LayoutError};

pub use crate::dice::{Dice, ScriptedDice, TetrahedralDice};

pub use crate::rules::{MoveOutcome, Rules};

pub use crate::turn::{Transition, TurnEvent, TurnPhase};

pub use crate::session::{Session, SharedSession, Snapshot};

pub use crate::bot::{
    BotController, BotExit, BotHandle, BotStep,
    MovePolicy, PriorityPolicy, RandomPolicy,
};

pub use crate::selfplay::{GameRecord, SelfPlayConfig, SelfPlayRunner, SelfPlayStats};
