//! The rules of the game.
//!
//! `Rules` turns a state and a roll into the set of legal moves, and a
//! state and a move into a new state. Neither operation mutates its input:
//! the session decides which state is current.
//!
//! - Moves land exactly; overshooting 14 is illegal.
//! - No two friendly pieces share a square.
//! - Landing on an opponent in the shared lane captures it, except on a
//!   rosette, which protects its occupant.
//! - Landing on a rosette earns another roll.
//! - Bearing off the seventh piece wins.

pub mod engine;

pub use engine::{MoveOutcome, Rules};
