//! Bot scheduling: one action per tick on the shared session.

use std::fmt;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, instrument};

use super::policy::{build_policy, MovePolicy};
use crate::core::{BotConfig, Color, Move};
use crate::session::{Session, SharedSession};
use crate::turn::TurnPhase;

/// Default delay between bot actions.
pub const DEFAULT_TICK: Duration = Duration::from_millis(600);

/// Result of one `BotController::step`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BotStep {
    /// Not the bot's turn; nothing done.
    Waiting,
    /// The bot rolled this value.
    Rolled(u8),
    /// The bot played this move.
    Moved(Move),
    /// The match has a winner.
    MatchOver,
    /// The session was reset since the bot started.
    Superseded,
}

/// Why a spawned bot task ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BotExit {
    MatchOver,
    Superseded,
    Stopped,
}

/// Acts for one color: rolls when it is up, then plays the move its policy
/// picks.
pub struct BotController {
    color: Color,
    policy: Box<dyn MovePolicy>,
    tick: Duration,
}

impl BotController {
    pub fn new(color: Color, policy: impl MovePolicy + 'static) -> Self {
        Self::with_boxed(color, Box::new(policy))
    }

    pub fn with_boxed(color: Color, policy: Box<dyn MovePolicy>) -> Self {
        Self {
            color,
            policy,
            tick: DEFAULT_TICK,
        }
    }

    pub fn from_config(config: &BotConfig) -> Self {
        Self::with_boxed(config.color, build_policy(config.policy, config.seed)).with_tick(config.tick())
    }

    /// Set the delay between actions. Zero is raised to one millisecond.
    #[must_use]
    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick.max(Duration::from_millis(1));
        self
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    #[must_use]
    pub fn tick(&self) -> Duration {
        self.tick
    }

    /// Take at most one action on `session`.
    pub fn step(&mut self, session: &mut Session) -> BotStep {
        match session.phase() {
            TurnPhase::Terminal(_) => BotStep::MatchOver,
            TurnPhase::AwaitingRoll(color) if color == self.color => match session.roll() {
                Some(value) => {
                    debug!(%color, value, "bot rolled");
                    BotStep::Rolled(value)
                }
                None => BotStep::Waiting,
            },
            TurnPhase::AwaitingMove(color, _) if color == self.color => {
                let choice = self
                    .policy
                    .choose(session.rules(), session.state(), session.legal_moves());
                match choice {
                    Some(mv) if session.make_move(&mv) => {
                        debug!(%mv, policy = self.policy.name(), "bot moved");
                        BotStep::Moved(mv)
                    }
                    _ => BotStep::Waiting,
                }
            }
            _ => BotStep::Waiting,
        }
    }

    /// `step`, unless the session moved on to a new match.
    fn step_in(&mut self, session: &mut Session, generation: u64) -> BotStep {
        if session.generation() != generation {
            return BotStep::Superseded;
        }
        self.step(session)
    }

    /// Run the tick loop on the current tokio runtime.
    ///
    /// The task is bound to the session generation at spawn time and ends by
    /// itself when that match finishes or is reset.
    pub fn spawn(self, session: SharedSession) -> BotHandle {
        let generation = session.with(|s| s.generation());
        let (stop_tx, stop_rx) = oneshot::channel();
        let task = tokio::spawn(self.run(session, generation, stop_rx));
        BotHandle {
            stop: Some(stop_tx),
            task: Some(task),
        }
    }

    #[instrument(name = "bot", skip_all, fields(color = %self.color, generation = generation))]
    async fn run(
        mut self,
        session: SharedSession,
        generation: u64,
        mut stop: oneshot::Receiver<()>,
    ) -> BotExit {
        info!(policy = self.policy.name(), tick_ms = self.tick.as_millis() as u64, "bot started");

        let mut ticker = interval_at(Instant::now() + self.tick, self.tick);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let exit = loop {
            tokio::select! {
                biased;
                _ = &mut stop => break BotExit::Stopped,
                _ = ticker.tick() => {}
            }

            match session.with(|s| self.step_in(s, generation)) {
                BotStep::MatchOver => break BotExit::MatchOver,
                BotStep::Superseded => break BotExit::Superseded,
                BotStep::Waiting | BotStep::Rolled(_) | BotStep::Moved(_) => {}
            }
        };

        info!(?exit, "bot exited");
        exit
    }
}

impl fmt::Debug for BotController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotController")
            .field("color", &self.color)
            .field("policy", &self.policy.name())
            .field("tick", &self.tick)
            .finish()
    }
}

/// Handle to a spawned bot task. Dropping it aborts the task.
#[derive(Debug)]
pub struct BotHandle {
    stop: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<BotExit>>,
}

impl BotHandle {
    /// Ask the task to stop before its next action.
    pub fn stop(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Wait for the task to end. A panic inside the bot task is resumed
    /// on the caller.
    pub async fn join(mut self) -> BotExit {
        let Some(task) = self.task.take() else {
            return BotExit::Stopped;
        };
        match task.await {
            Ok(exit) => exit,
            Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
            Err(_) => BotExit::Stopped,
        }
    }
}

impl Drop for BotHandle {
    fn drop(&mut self) {
        if let Some(task) = &self.task {
            task.abort();
        }
    }
}
