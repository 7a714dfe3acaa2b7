//! Turn state machine.
//!
//! ```text
//!   AwaitingRoll(c) --roll, no moves--> AwaitingRoll(!c)
//!   AwaitingRoll(c) --roll v---------> AwaitingMove(c, v)
//!   AwaitingMove(c) --move, rosette--> AwaitingRoll(c)
//!   AwaitingMove(c) --move-----------> AwaitingRoll(!c)
//!   AwaitingMove(c) --last piece-----> Terminal(c)
//! ```
//!
//! Both commands are pure functions of the current state; an out-of-phase
//! command returns `None` and the caller keeps its state.

pub mod machine;

pub use machine::{play, roll, Transition, TurnEvent, TurnPhase};
