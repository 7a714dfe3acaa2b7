//! Self-play: complete bot-versus-bot matches without a clock.
//!
//! Each game drives a real `Session` with two `BotController`s stepping in
//! turn, so everything the live loop relies on is exercised end to end.

pub mod runner;

pub use runner::{GameRecord, SelfPlayConfig, SelfPlayRunner, SelfPlayStats};
