//! ur-demo: headless front end for the engine.
//!
//! `selfplay` runs a batch of bot-versus-bot games and prints totals.
//! `watch` runs a live match between two timed bots and prints the history
//! as it grows.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

use royal_ur::bot::BotController;
use royal_ur::core::{BotConfig, Color, MatchConfig, PolicyKind};
use royal_ur::rules::Rules;
use royal_ur::selfplay::{SelfPlayConfig, SelfPlayRunner};
use royal_ur::session::{Session, SharedSession};

/// Royal Game of Ur engine demo
#[derive(Parser, Debug)]
#[command(name = "ur-demo")]
#[command(about = "Play the Royal Game of Ur between bots", long_about = None)]
#[command(version)]
struct Cli {
    /// JSON match configuration (seed, layout, bot)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play many games as fast as possible and report results
    Selfplay {
        /// Number of games
        #[arg(short, long, default_value = "100")]
        games: usize,

        /// Seed of the first game
        #[arg(short, long, default_value = "0")]
        seed: u64,

        /// Light policy (priority or random)
        #[arg(long, default_value = "priority")]
        light: PolicyKind,

        /// Dark policy (priority or random)
        #[arg(long, default_value = "priority")]
        dark: PolicyKind,

        /// Print statistics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Watch one live match between two timed bots
    Watch {
        /// Dice seed; overrides the config file
        #[arg(short, long)]
        seed: Option<u64>,

        /// Delay between bot actions in milliseconds; overrides the config file
        #[arg(long)]
        tick_ms: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => MatchConfig::from_path(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => MatchConfig::default(),
    };

    match cli.command {
        Command::Selfplay {
            games,
            seed,
            light,
            dark,
            json,
        } => run_selfplay(&config, games, seed, light, dark, json),
        Command::Watch { seed, tick_ms } => run_watch(config, seed, tick_ms).await,
    }
}

#[instrument(skip(config))]
fn run_selfplay(
    config: &MatchConfig,
    games: usize,
    seed: u64,
    light: PolicyKind,
    dark: PolicyKind,
    json: bool,
) -> Result<()> {
    let selfplay = SelfPlayConfig::new()
        .with_seed_offset(seed)
        .with_policy(Color::Light, light)
        .with_policy(Color::Dark, dark);
    let runner = SelfPlayRunner::new(Rules::new(config.layout.clone()), selfplay);
    let stats = runner.run(games);

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("games:        {}", stats.games);
    for color in Color::ALL {
        println!(
            "{:<13} {} ({:.1}%), {} captures",
            format!("{color} wins:"),
            stats.wins[color],
            100.0 * stats.win_rate(color),
            stats.captures[color]
        );
    }
    println!("unfinished:   {}", stats.unfinished);
    println!("avg actions:  {:.1}", stats.avg_actions());
    Ok(())
}

#[instrument(skip(config))]
async fn run_watch(mut config: MatchConfig, seed: Option<u64>, tick_ms: Option<u64>) -> Result<()> {
    if let Some(seed) = seed {
        config.seed = Some(seed);
    }
    if let Some(tick_ms) = tick_ms {
        config.bot.tick_ms = tick_ms;
    }
    config.validate()?;

    let session = SharedSession::new(Session::from_config(&config));
    let mut updates = session.subscribe();

    // The human seat is played by a second bot with the same cadence.
    let stand_in = BotConfig {
        color: config.human,
        ..config.bot.clone()
    };
    let mut bots = Vec::new();
    for bot in [&config.bot, &stand_in] {
        bots.push(BotController::from_config(bot).spawn(session.clone()));
    }
    info!(seed = ?config.seed, tick_ms = config.bot.tick_ms, "match started");

    let mut printed = 0;
    loop {
        updates.changed().await?;
        let snapshot = updates.borrow_and_update().clone();
        let history = snapshot.state.history();
        for line in history.iter().skip(printed) {
            println!("{line}");
        }
        printed = history.len();

        if snapshot.state.is_terminal() {
            break;
        }
    }

    for bot in bots {
        let exit = bot.join().await;
        info!(?exit, "bot finished");
    }
    Ok(())
}
