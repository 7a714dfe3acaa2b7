//! Match state container.
//!
//! `Session` owns the one mutable `GameState` of a match, applies turn
//! transitions atomically and publishes a `Snapshot` to subscribers after
//! each one. `SharedSession` puts it behind a mutex so the view and the bot
//! task can both command it.

pub mod container;

pub use container::{Session, SharedSession, Snapshot};
