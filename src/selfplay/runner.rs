//! Bot-versus-bot matches played synchronously.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::bot::{build_policy, BotController, BotStep};
use crate::core::{Color, ColorMap, GameRng, GameState, PolicyKind};
use crate::dice::TetrahedralDice;
use crate::rules::Rules;
use crate::session::Session;

/// Configuration for self-play.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelfPlayConfig {
    /// Maximum rolls plus moves per game before it is abandoned.
    pub max_actions: usize,

    /// Seed of the first game; game `i` uses `seed_offset + i`.
    pub seed_offset: u64,

    /// Policy for each color.
    pub policies: ColorMap<PolicyKind>,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        Self {
            max_actions: 2_000,
            seed_offset: 0,
            policies: ColorMap::with_value(PolicyKind::Priority),
        }
    }
}

impl SelfPlayConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_actions(mut self, max: usize) -> Self {
        self.max_actions = max;
        self
    }

    pub fn with_seed_offset(mut self, offset: u64) -> Self {
        self.seed_offset = offset;
        self
    }

    /// Set the policy of one color.
    pub fn with_policy(mut self, color: Color, policy: PolicyKind) -> Self {
        self.policies[color] = policy;
        self
    }
}

/// Summary of one finished (or abandoned) game.
#[derive(Clone, Debug, Serialize)]
pub struct GameRecord {
    /// Seed the dice and policies were derived from.
    pub seed: u64,
    /// `None` if the game hit `max_actions`.
    pub winner: Option<Color>,
    /// Rolls plus moves.
    pub actions: usize,
    /// Captures made by each color.
    pub captures: ColorMap<u32>,
    /// Final state, including the history log.
    pub final_state: GameState,
}

/// Aggregate over many games.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SelfPlayStats {
    pub games: usize,
    pub wins: ColorMap<usize>,
    /// Games that hit the action limit.
    pub unfinished: usize,
    pub total_actions: usize,
    pub captures: ColorMap<u64>,
}

impl SelfPlayStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one game into the totals.
    pub fn record(&mut self, game: &GameRecord) {
        self.games += 1;
        self.total_actions += game.actions;
        match game.winner {
            Some(color) => self.wins[color] += 1,
            None => self.unfinished += 1,
        }
        for color in Color::ALL {
            self.captures[color] += u64::from(game.captures[color]);
        }
    }

    #[must_use]
    pub fn avg_actions(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.total_actions as f64 / self.games as f64
        }
    }

    /// Share of all games won by `color`.
    #[must_use]
    pub fn win_rate(&self, color: Color) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.wins[color] as f64 / self.games as f64
        }
    }
}

/// Plays complete matches between two bot controllers on one session.
#[derive(Clone, Debug)]
pub struct SelfPlayRunner {
    rules: Rules,
    config: SelfPlayConfig,
}

impl SelfPlayRunner {
    pub fn new(rules: Rules, config: SelfPlayConfig) -> Self {
        Self { rules, config }
    }

    pub fn config(&self) -> &SelfPlayConfig {
        &self.config
    }

    /// Play one game. The same seed always produces the same game.
    #[instrument(level = "debug", skip(self))]
    pub fn play_game(&self, seed: u64) -> GameRecord {
        let mut session = Session::new(self.rules.clone(), TetrahedralDice::seeded(seed));

        let mut rng = GameRng::new(seed);
        let policy_seeds = ColorMap::new(|_| rng.fork().seed());
        let mut bots = ColorMap::new(|color| {
            BotController::with_boxed(color, build_policy(self.config.policies[color], Some(policy_seeds[color])))
        });

        let mut actions = 0;
        let mut captures = ColorMap::with_value(0u32);

        while actions < self.config.max_actions && !session.state().is_terminal() {
            let color = session.phase().color();
            let opponent_waiting = session.state().player(color.opponent()).waiting_count();

            match bots[color].step(&mut session) {
                BotStep::Rolled(_) => actions += 1,
                BotStep::Moved(_) => {
                    actions += 1;
                    if session.state().player(color.opponent()).waiting_count() > opponent_waiting {
                        captures[color] += 1;
                    }
                }
                BotStep::MatchOver | BotStep::Superseded | BotStep::Waiting => break,
            }
        }

        let final_state = session.state().clone();
        let winner = final_state.winner;
        debug!(?winner, actions, "game finished");

        GameRecord {
            seed,
            winner,
            actions,
            captures,
            final_state,
        }
    }

    /// Play `count` games with consecutive seeds.
    pub fn play_games(&self, count: usize) -> Vec<GameRecord> {
        (0..count)
            .map(|i| self.play_game(self.config.seed_offset.wrapping_add(i as u64)))
            .collect()
    }

    /// Play `count` games and aggregate them.
    pub fn run(&self, count: usize) -> SelfPlayStats {
        let mut stats = SelfPlayStats::new();
        for game in self.play_games(count) {
            stats.record(&game);
        }
        info!(
            games = stats.games,
            light_wins = stats.wins[Color::Light],
            dark_wins = stats.wins[Color::Dark],
            unfinished = stats.unfinished,
            avg_actions = stats.avg_actions(),
            "self-play complete"
        );
        stats
    }
}
