//! The match state container.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::watch;
use tracing::{debug, info, trace, warn};

use crate::core::{GameState, MatchConfig, Move, Phase};
use crate::dice::{Dice, TetrahedralDice, MAX_ROLL};
use crate::rules::Rules;
use crate::turn::{self, Transition, TurnEvent, TurnPhase};

/// Immutable view of a session, published after every accepted command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    /// Current match state.
    pub state: GameState,
    /// Moves `make_move` accepts right now.
    pub legal_moves: Vec<Move>,
    /// Bumped on every reset.
    pub generation: u64,
}

impl Snapshot {
    /// Phase of the snapshotted state.
    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        TurnPhase::of(&self.state)
    }
}

/// Single source of truth for one match.
///
/// Commands are synchronous and atomic: each either produces a complete new
/// state or leaves everything untouched. Out-of-phase and illegal commands
/// are ignored.
pub struct Session {
    rules: Rules,
    dice: Box<dyn Dice>,
    state: GameState,
    legal_moves: Vec<Move>,
    generation: u64,
    updates: watch::Sender<Snapshot>,
}

impl Session {
    /// A fresh match over `rules`, rolling with `dice`.
    pub fn new(rules: Rules, dice: impl Dice + 'static) -> Self {
        let state = GameState::new();
        let (updates, _) = watch::channel(Snapshot {
            state: state.clone(),
            legal_moves: Vec::new(),
            generation: 0,
        });
        Self {
            rules,
            dice: Box::new(dice),
            state,
            legal_moves: Vec::new(),
            generation: 0,
            updates,
        }
    }

    /// Traditional rules with seeded dice.
    pub fn seeded(seed: u64) -> Self {
        Self::new(Rules::traditional(), TetrahedralDice::seeded(seed))
    }

    /// Build from configuration. An unset seed draws from process entropy.
    pub fn from_config(config: &MatchConfig) -> Self {
        let dice = match config.seed {
            Some(seed) => TetrahedralDice::seeded(seed),
            None => TetrahedralDice::from_entropy(),
        };
        Self::new(Rules::new(config.layout.clone()), dice)
    }

    /// Start from `state` instead of a fresh match, e.g. to set up a
    /// puzzle. `reset` still returns to a fresh match.
    ///
    /// A state awaiting a move whose roll has no legal move is settled the
    /// way a live roll would be: the turn passes and the pass is logged.
    ///
    /// # Panics
    ///
    /// If the settled state breaks `Rules::assert_invariants`.
    #[must_use]
    pub fn with_state(mut self, mut state: GameState) -> Self {
        let mut legal_moves = Vec::new();
        if let TurnPhase::AwaitingMove(color, roll) = TurnPhase::of(&state) {
            legal_moves = self.rules.legal_moves(&state, roll);
            if legal_moves.is_empty() {
                state.phase = Phase::Rolling;
                if let Some(transition) = turn::roll(&self.rules, &state, roll) {
                    debug!(%color, roll, "loaded state had no legal move");
                    state = transition.state;
                    legal_moves = transition.legal_moves;
                }
            }
        }
        self.rules.assert_invariants(&state);

        self.state = state;
        self.legal_moves = legal_moves;
        self.publish();
        self
    }

    // === Read surface ===

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Moves `make_move` accepts right now. Empty unless awaiting a move.
    #[must_use]
    pub fn legal_moves(&self) -> &[Move] {
        &self.legal_moves
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        TurnPhase::of(&self.state)
    }

    /// Copy of the current state, legal set and generation.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            state: self.state.clone(),
            legal_moves: self.legal_moves.clone(),
            generation: self.generation,
        }
    }

    /// Receiver of snapshots. The current snapshot is marked as seen.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.updates.subscribe()
    }

    // === Commands ===

    /// Roll for the color to act. Returns the value, or `None` if the
    /// session is not awaiting a roll.
    pub fn roll(&mut self) -> Option<u8> {
        if !matches!(self.phase(), TurnPhase::AwaitingRoll(_)) {
            trace!(phase = ?self.phase(), "roll ignored");
            return None;
        }
        let mut value = self.dice.roll();
        if value > MAX_ROLL {
            warn!(value, "dice returned an out-of-range roll, clamping");
            value = MAX_ROLL;
        }
        let transition = turn::roll(&self.rules, &self.state, value)?;
        self.commit(transition);
        Some(value)
    }

    /// Play `mv` if it is in the current legal set. Returns whether the
    /// move was applied.
    pub fn make_move(&mut self, mv: &Move) -> bool {
        match turn::play(&self.rules, &self.state, &self.legal_moves, mv) {
            Some(transition) => {
                self.commit(transition);
                true
            }
            None => {
                trace!(%mv, "move ignored");
                false
            }
        }
    }

    /// Start a new match. Anything acting on the old one sees the
    /// generation change.
    pub fn reset(&mut self) {
        self.state = GameState::new();
        self.legal_moves.clear();
        self.generation += 1;
        info!(generation = self.generation, "match reset");
        self.publish();
    }

    fn commit(&mut self, transition: Transition) {
        if cfg!(debug_assertions) {
            self.rules.assert_invariants(&transition.state);
        }

        match &transition.event {
            TurnEvent::Rolled { color, value, moves } => {
                debug!(%color, value, moves, "rolled");
            }
            TurnEvent::Passed { color, value } => {
                info!(%color, value, "no legal moves, turn passes");
            }
            TurnEvent::Moved {
                mv,
                captured: Some(piece),
                ..
            } => {
                info!(%mv, captured = %piece, "capture");
            }
            TurnEvent::Moved { mv, bonus_turn, .. } => {
                debug!(%mv, bonus_turn, "moved");
            }
            TurnEvent::Won { mv, color } => {
                info!(%mv, winner = %color, "match over");
            }
        }

        self.state = transition.state;
        self.legal_moves = transition.legal_moves;
        self.publish();
    }

    fn publish(&self) {
        self.updates.send_replace(self.snapshot());
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.state)
            .field("legal_moves", &self.legal_moves)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

/// Cloneable handle to a session shared by the view and the bot.
#[derive(Clone, Debug)]
pub struct SharedSession {
    inner: Arc<Mutex<Session>>,
}

impl SharedSession {
    pub fn new(session: Session) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    /// Run `f` with exclusive access to the session.
    pub fn with<R>(&self, f: impl FnOnce(&mut Session) -> R) -> R {
        let mut session = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut session)
    }

    pub fn roll(&self) -> Option<u8> {
        self.with(Session::roll)
    }

    pub fn make_move(&self, mv: &Move) -> bool {
        self.with(|s| s.make_move(mv))
    }

    pub fn reset(&self) {
        self.with(Session::reset);
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.with(|s| s.snapshot())
    }

    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.with(|s| s.subscribe())
    }
}

impl From<Session> for SharedSession {
    fn from(session: Session) -> Self {
        Self::new(session)
    }
}
