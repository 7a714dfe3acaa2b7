//! The autonomous opponent.
//!
//! A `MovePolicy` decides which legal move to play; a `BotController`
//! decides when. Spawned controllers run on tokio, take one action per
//! tick under the session lock, and stop on match end, reset, or request.

pub mod controller;
pub mod policy;

pub use controller::{BotController, BotExit, BotHandle, BotStep, DEFAULT_TICK};
pub use policy::{build_policy, MovePolicy, PriorityPolicy, RandomPolicy};
