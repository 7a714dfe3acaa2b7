//! Move-selection policies.

use crate::core::{GameRng, GameState, Move, PolicyKind, SquareIndex};
use crate::rules::Rules;

/// Picks one move from a legal set.
///
/// Implementations must return a member of `legal`, or `None` only when
/// `legal` is empty.
pub trait MovePolicy: Send {
    /// Choose a move for the color to act in `state`.
    fn choose(&mut self, rules: &Rules, state: &GameState, legal: &[Move]) -> Option<Move>;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}

/// Greedy heuristic: capture, then score, then rosette, then the most
/// advanced piece. Within the first three tiers ties go to the earliest
/// move in the legal set, i.e. piece creation order.
#[derive(Clone, Copy, Debug, Default)]
pub struct PriorityPolicy;

impl PriorityPolicy {
    pub fn new() -> Self {
        Self
    }

    /// Ranking key; larger is better. Advancement only counts for moves
    /// in none of the first three tiers.
    #[must_use]
    pub fn rank(rules: &Rules, state: &GameState, mv: &Move) -> (bool, bool, bool, SquareIndex) {
        let capture = rules.is_capture(state, mv);
        let scoring = mv.is_scoring();
        let rosette = rules.is_rosette_landing(mv);
        let advance = if capture || scoring || rosette {
            SquareIndex::MIN
        } else {
            mv.from
        };
        (capture, scoring, rosette, advance)
    }
}

impl MovePolicy for PriorityPolicy {
    fn choose(&mut self, rules: &Rules, state: &GameState, legal: &[Move]) -> Option<Move> {
        let mut best: Option<(Move, (bool, bool, bool, SquareIndex))> = None;
        for mv in legal {
            let rank = Self::rank(rules, state, mv);
            // Strictly better only, so the earliest move keeps a tie.
            if best.map_or(true, |(_, top)| rank > top) {
                best = Some((*mv, rank));
            }
        }
        best.map(|(mv, _)| mv)
    }

    fn name(&self) -> &'static str {
        "priority"
    }
}

/// Uniform choice over the legal set.
#[derive(Clone, Debug)]
pub struct RandomPolicy {
    rng: GameRng,
}

impl RandomPolicy {
    pub fn new(rng: GameRng) -> Self {
        Self { rng }
    }

    /// Deterministic policy for a seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(GameRng::new(seed).for_context("policy"))
    }

    pub fn from_entropy() -> Self {
        Self::new(GameRng::from_entropy())
    }
}

impl MovePolicy for RandomPolicy {
    fn choose(&mut self, _rules: &Rules, _state: &GameState, legal: &[Move]) -> Option<Move> {
        self.rng.choose(legal).copied()
    }

    fn name(&self) -> &'static str {
        "random"
    }
}

/// Build a boxed policy. `seed` only affects randomized policies; `None`
/// draws from process entropy.
pub fn build_policy(kind: PolicyKind, seed: Option<u64>) -> Box<dyn MovePolicy> {
    match kind {
        PolicyKind::Priority => Box::new(PriorityPolicy),
        PolicyKind::Random => match seed {
            Some(seed) => Box::new(RandomPolicy::seeded(seed)),
            None => Box::new(RandomPolicy::from_entropy()),
        },
    }
}
