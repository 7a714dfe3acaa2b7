//! Bot scheduling tests on a paused tokio clock.

use std::time::Duration;

use royal_ur::bot::{BotController, BotExit, BotStep, MovePolicy, PriorityPolicy, RandomPolicy};
use royal_ur::core::{BotConfig, Color, GameState, Move, PolicyKind, OFF_BOARD};
use royal_ur::dice::ScriptedDice;
use royal_ur::rules::Rules;
use royal_ur::session::{Session, SharedSession};
use royal_ur::turn::TurnPhase;

fn bot(color: Color, tick_ms: u64) -> BotController {
    BotController::new(color, PriorityPolicy).with_tick(Duration::from_millis(tick_ms))
}

// =============================================================================
// Lifecycle
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_two_bots_finish_the_match() {
    let session = SharedSession::new(Session::seeded(42));

    let light = bot(Color::Light, 600).spawn(session.clone());
    let dark = BotController::new(Color::Dark, RandomPolicy::seeded(7))
        .with_tick(Duration::from_millis(600))
        .spawn(session.clone());

    assert_eq!(light.join().await, BotExit::MatchOver);
    assert_eq!(dark.join().await, BotExit::MatchOver);

    let snapshot = session.snapshot();
    assert!(snapshot.state.is_terminal());
    assert!(snapshot
        .state
        .history()
        .back()
        .is_some_and(|line| line.ends_with("wins the match")));
}

#[tokio::test(start_paused = true)]
async fn test_reset_supersedes_running_bot() {
    let session = SharedSession::new(Session::seeded(1));
    let handle = bot(Color::Dark, 100).spawn(session.clone());

    session.reset();
    assert_eq!(handle.join().await, BotExit::Superseded);
    assert_eq!(session.with(|s| s.generation()), 1);
}

#[tokio::test(start_paused = true)]
async fn test_stop_ends_idle_bot() {
    let session = SharedSession::new(Session::seeded(1));
    let mut handle = bot(Color::Dark, 100).spawn(session.clone());

    tokio::time::sleep(Duration::from_millis(350)).await;
    assert!(!handle.is_finished());

    handle.stop();
    assert_eq!(handle.join().await, BotExit::Stopped);
    assert!(session.snapshot().state.history().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_dropping_handle_aborts() {
    let session = SharedSession::new(Session::seeded(1));
    drop(bot(Color::Light, 100).spawn(session.clone()));

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert!(session.snapshot().state.history().is_empty());
}

// =============================================================================
// Cadence
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_one_action_per_tick() {
    let session = SharedSession::new(Session::new(Rules::traditional(), ScriptedDice::new([2])));
    let _handle = bot(Color::Light, 100).spawn(session.clone());

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(session.snapshot().state.history().is_empty());

    tokio::time::sleep(Duration::from_millis(100)).await;
    let snapshot = session.snapshot();
    assert_eq!(snapshot.phase(), TurnPhase::AwaitingMove(Color::Light, 2));

    tokio::time::sleep(Duration::from_millis(100)).await;
    let snapshot = session.snapshot();
    assert_eq!(snapshot.state.light().pieces()[0].index, 1);
    assert_eq!(snapshot.phase(), TurnPhase::AwaitingRoll(Color::Dark));
}

#[tokio::test(start_paused = true)]
async fn test_bot_answers_human_turn() {
    let session = SharedSession::new(Session::new(Rules::traditional(), ScriptedDice::new([1, 2])));
    let config = BotConfig::new(Color::Dark).with_tick_ms(100).with_policy(PolicyKind::Priority);
    let _handle = BotController::from_config(&config).spawn(session.clone());

    // The human plays light through the same handle the view would use.
    assert_eq!(session.roll(), Some(1));
    assert!(session.make_move(&Move::new(Color::Light, OFF_BOARD, 0)));

    tokio::time::sleep(Duration::from_millis(250)).await;
    let snapshot = session.snapshot();
    assert_eq!(snapshot.state.dark().pieces()[0].index, 1);
    assert_eq!(snapshot.phase(), TurnPhase::AwaitingRoll(Color::Light));
    assert_eq!(snapshot.state.history().len(), 4);
}

// =============================================================================
// Choice
// =============================================================================

#[test]
fn test_bot_takes_first_of_two_captures() {
    let position = GameState::new()
        .with_positions(Color::Light, &[4, 8])
        .with_positions(Color::Dark, &[6, 10]);
    let mut session =
        Session::new(Rules::traditional(), ScriptedDice::new([2])).with_state(position);
    let mut light = bot(Color::Light, 100);

    assert_eq!(light.step(&mut session), BotStep::Rolled(2));
    assert_eq!(
        session.legal_moves(),
        &[Move::new(Color::Light, 4, 6), Move::new(Color::Light, 8, 10), Move::new(Color::Light, OFF_BOARD, 1)]
    );
    assert_eq!(light.step(&mut session), BotStep::Moved(Move::new(Color::Light, 4, 6)));
    assert_eq!(session.state().dark().pieces()[0].index, OFF_BOARD);
    assert_eq!(session.state().dark().pieces()[1].index, 10);
}

// =============================================================================
// Failure
// =============================================================================

struct PanickingPolicy;

impl MovePolicy for PanickingPolicy {
    fn choose(&mut self, _rules: &Rules, _state: &GameState, _legal: &[Move]) -> Option<Move> {
        panic!("policy exploded");
    }

    fn name(&self) -> &'static str {
        "panicking"
    }
}

#[tokio::test(start_paused = true)]
#[should_panic(expected = "policy exploded")]
async fn test_join_resumes_bot_panic() {
    let session = SharedSession::new(Session::new(Rules::traditional(), ScriptedDice::new([2])));
    let handle = BotController::new(Color::Light, PanickingPolicy)
        .with_tick(Duration::from_millis(100))
        .spawn(session);

    handle.join().await;
}
