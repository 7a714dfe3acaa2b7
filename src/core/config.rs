//! Match and bot configuration.
//!
//! Configuration is plain data with defaults for every field, so a JSON
//! file only needs to mention what it changes:
//!
//! ```
//! use royal_ur::core::{Color, MatchConfig, PolicyKind};
//!
//! let config = MatchConfig::from_json(r#"{ "seed": 7, "bot": { "policy": "random" } }"#).unwrap();
//! assert_eq!(config.seed, Some(7));
//! assert_eq!(config.human, Color::Light);
//! assert_eq!(config.bot.color, Color::Dark);
//! assert_eq!(config.bot.policy, PolicyKind::Random);
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::player::Color;
use crate::board::{BoardLayout, LayoutError};

/// Errors raised while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config is not valid JSON for `MatchConfig`.
    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),

    /// The board layout is inconsistent.
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// Human and bot were assigned the same color.
    #[error("human and bot cannot both play {0}")]
    SameColor(Color),

    /// The bot tick interval is zero.
    #[error("bot tick interval must be greater than zero")]
    ZeroTick,
}

/// Move-selection policy used by a bot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    /// Capture, then score, then rosette, then most advanced piece.
    #[default]
    Priority,
    /// Uniform over the legal set.
    Random,
}

impl std::str::FromStr for PolicyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "priority" => Ok(PolicyKind::Priority),
            "random" => Ok(PolicyKind::Random),
            other => Err(format!("unknown policy '{other}' (expected priority or random)")),
        }
    }
}

/// Bot controller parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// Color the bot plays.
    pub color: Color,

    /// Delay between bot actions in milliseconds.
    /// Cosmetic: gives the human a perceivable turn cadence.
    pub tick_ms: u64,

    /// How the bot picks among legal moves.
    pub policy: PolicyKind,

    /// Seed for randomized policies. `None` draws from process entropy.
    pub seed: Option<u64>,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            color: Color::Dark,
            tick_ms: 600,
            policy: PolicyKind::Priority,
            seed: None,
        }
    }
}

impl BotConfig {
    /// Create a config for the given color with defaults elsewhere.
    pub fn new(color: Color) -> Self {
        Self {
            color,
            ..Self::default()
        }
    }

    /// Set the tick interval.
    pub fn with_tick_ms(mut self, tick_ms: u64) -> Self {
        self.tick_ms = tick_ms;
        self
    }

    /// Set the policy.
    pub fn with_policy(mut self, policy: PolicyKind) -> Self {
        self.policy = policy;
        self
    }

    /// Set the policy seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Tick interval as a `Duration`.
    #[must_use]
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

/// Configuration for one match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Dice seed. `None` draws from process entropy.
    pub seed: Option<u64>,

    /// Board topology.
    pub layout: BoardLayout,

    /// Color driven by user input.
    pub human: Color,

    /// The autonomous opponent.
    pub bot: BotConfig,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            seed: None,
            layout: BoardLayout::traditional(),
            human: Color::Light,
            bot: BotConfig::default(),
        }
    }
}

impl MatchConfig {
    /// Create a default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the dice seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the board layout.
    pub fn with_layout(mut self, layout: BoardLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Set the bot config; the human takes the other color.
    pub fn with_bot(mut self, bot: BotConfig) -> Self {
        self.human = bot.color.opponent();
        self.bot = bot;
        self
    }

    /// Check cross-field constraints. The layout validates itself on
    /// construction.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.human == self.bot.color {
            return Err(ConfigError::SameColor(self.human));
        }
        if self.bot.tick_ms == 0 {
            return Err(ConfigError::ZeroTick);
        }
        Ok(())
    }

    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MatchConfig::default();
        assert_eq!(config.seed, None);
        assert_eq!(config.human, Color::Light);
        assert_eq!(config.bot.color, Color::Dark);
        assert_eq!(config.bot.tick(), Duration::from_millis(600));
        assert_eq!(config.layout, BoardLayout::traditional());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = MatchConfig::new()
            .with_seed(123)
            .with_bot(BotConfig::new(Color::Light).with_tick_ms(50).with_seed(9));

        assert_eq!(config.seed, Some(123));
        assert_eq!(config.human, Color::Dark);
        assert_eq!(config.bot.tick_ms, 50);
        assert_eq!(config.bot.seed, Some(9));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_same_color_rejected() {
        let mut config = MatchConfig::default();
        config.human = Color::Dark;
        assert!(matches!(config.validate(), Err(ConfigError::SameColor(Color::Dark))));
    }

    #[test]
    fn test_zero_tick_rejected() {
        let err = MatchConfig::from_json(r#"{ "bot": { "tick_ms": 0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroTick));
    }

    #[test]
    fn test_bad_json_rejected() {
        let err = MatchConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = MatchConfig::from_path("/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }

    #[test]
    fn test_round_trip_json() {
        let config = MatchConfig::new().with_seed(5);
        let json = serde_json::to_string(&config).unwrap();
        let back = MatchConfig::from_json(&json).unwrap();
        assert_eq!(config, back);
    }

    #[test]
    fn test_policy_kind_parse() {
        assert_eq!("Random".parse::<PolicyKind>(), Ok(PolicyKind::Random));
        assert!("greedy".parse::<PolicyKind>().is_err());
    }
}
