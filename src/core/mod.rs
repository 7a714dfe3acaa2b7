//! Core engine types: colors, pieces, moves, state, RNG, configuration.

pub mod entity;
pub mod player;
pub mod rng;
pub mod config;
pub mod action;
pub mod state;

pub use entity::{is_on_board, is_valid_index, PieceId, SquareIndex, OFF_BOARD, PATH_LEN, PIECES_PER_COLOR, SCORED};
pub use player::{Color, ColorMap};
pub use rng::GameRng;
pub use config::{BotConfig, ConfigError, MatchConfig, PolicyKind};
pub use action::{HistoryEvent, Move};
pub use state::{GameState, Phase, Piece, PlayerState};
