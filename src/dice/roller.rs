//! Dice implementations.

use std::collections::VecDeque;

use crate::core::GameRng;

/// Number of binary dice thrown per roll.
pub const DICE_COUNT: u8 = 4;

/// Largest possible roll.
pub const MAX_ROLL: u8 = DICE_COUNT;

/// Source of roll values in `0..=MAX_ROLL`.
pub trait Dice: Send {
    /// Throw the dice. The value is returned, never stored.
    fn roll(&mut self) -> u8;
}

/// Exact probability of a roll value.
///
/// ```
/// use royal_ur::dice::probability;
///
/// assert_eq!(probability(2), 6.0 / 16.0);
/// assert_eq!(probability(5), 0.0);
/// let total: f64 = (0..=4).map(probability).sum();
/// assert!((total - 1.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn probability(value: u8) -> f64 {
    const WAYS: [u32; 5] = [1, 4, 6, 4, 1];
    WAYS.get(value as usize)
        .map_or(0.0, |&ways| f64::from(ways) / 16.0)
}

/// Four fair coin flips drawn from a `GameRng`.
#[derive(Clone, Debug)]
pub struct TetrahedralDice {
    rng: GameRng,
}

impl TetrahedralDice {
    /// Dice drawing from the given RNG.
    #[must_use]
    pub fn new(rng: GameRng) -> Self {
        Self { rng }
    }

    /// Deterministic dice for a seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(GameRng::new(seed).for_context("dice"))
    }

    /// Dice seeded from the process entropy source.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(GameRng::from_entropy())
    }
}

impl Dice for TetrahedralDice {
    fn roll(&mut self) -> u8 {
        (0..DICE_COUNT).filter(|_| self.rng.coin_flip()).count() as u8
    }
}

/// Replays a fixed sequence of rolls, then repeats the last one.
///
/// ```
/// use royal_ur::dice::{Dice, ScriptedDice};
///
/// let mut dice = ScriptedDice::new([2, 0]);
/// assert_eq!(dice.roll(), 2);
/// assert_eq!(dice.roll(), 0);
/// assert_eq!(dice.roll(), 0);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ScriptedDice {
    queue: VecDeque<u8>,
    last: u8,
}

impl ScriptedDice {
    /// Dice that return `rolls` in order. Values above `MAX_ROLL` are
    /// clamped; an empty script rolls 0.
    pub fn new(rolls: impl IntoIterator<Item = u8>) -> Self {
        Self {
            queue: rolls.into_iter().map(|r| r.min(MAX_ROLL)).collect(),
            last: 0,
        }
    }

    /// Append more rolls.
    pub fn push(&mut self, roll: u8) {
        self.queue.push_back(roll.min(MAX_ROLL));
    }

    /// Rolls not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl Dice for ScriptedDice {
    fn roll(&mut self) -> u8 {
        if let Some(next) = self.queue.pop_front() {
            self.last = next;
        }
        self.last
    }
}
