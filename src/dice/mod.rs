//! Dice: four tetrahedral dice, each showing a marked tip or not.
//!
//! The roll is the number of marked tips, so values follow
//! binomial(4, 1/2):
//!
//! | value | 0    | 1    | 2    | 3    | 4    |
//! |-------|------|------|------|------|------|
//! | p     | 1/16 | 4/16 | 6/16 | 4/16 | 1/16 |
//!
//! The `Dice` trait is the seam the session draws rolls through, so tests
//! and replays can substitute a fixed sequence.

pub mod roller;

pub use roller::{probability, Dice, ScriptedDice, TetrahedralDice, DICE_COUNT, MAX_ROLL};
