//! Match state container integration tests.

use royal_ur::core::{BotConfig, Color, GameState, MatchConfig, Move, OFF_BOARD};
use royal_ur::dice::ScriptedDice;
use royal_ur::rules::Rules;
use royal_ur::session::{Session, SharedSession};
use royal_ur::turn::TurnPhase;

fn scripted(rolls: impl IntoIterator<Item = u8>) -> Session {
    Session::new(Rules::traditional(), ScriptedDice::new(rolls))
}

// =============================================================================
// Commands
// =============================================================================

#[test]
fn test_zero_roll_passes_and_logs() {
    let mut session = scripted([0, 2]);

    assert_eq!(session.roll(), Some(0));
    assert_eq!(session.phase(), TurnPhase::AwaitingRoll(Color::Dark));
    assert!(session.legal_moves().is_empty());
    assert_eq!(session.state().roll_value, Some(0));
    assert_eq!(
        session.state().history().back().map(String::as_str),
        Some("Light rolled 0: no legal moves, turn passes")
    );

    assert_eq!(session.roll(), Some(2));
    assert_eq!(session.legal_moves(), &[Move::new(Color::Dark, OFF_BOARD, 1)]);
    assert_eq!(session.state().history().back().map(String::as_str), Some("Dark rolled 2"));
}

#[test]
fn test_move_requires_current_legal_set() {
    let mut session = scripted([3, 1]);
    let entry = Move::new(Color::Light, OFF_BOARD, 2);

    // Not yet rolled.
    assert!(!session.make_move(&entry));

    session.roll();
    assert!(session.make_move(&entry));

    // The same move is stale once played.
    assert!(!session.make_move(&entry));
    assert_eq!(session.phase(), TurnPhase::AwaitingRoll(Color::Dark));
}

#[test]
fn test_full_turn_cycle_with_bonus() {
    // Light enters on its first rosette, rolls again, then hands over.
    let mut session = scripted([4, 1, 2]);

    session.roll();
    assert!(session.make_move(&Move::new(Color::Light, OFF_BOARD, 3)));
    assert_eq!(session.phase(), TurnPhase::AwaitingRoll(Color::Light));

    session.roll();
    assert!(session.make_move(&Move::new(Color::Light, 3, 4)));
    assert_eq!(session.phase(), TurnPhase::AwaitingRoll(Color::Dark));

    session.roll();
    assert_eq!(session.phase(), TurnPhase::AwaitingMove(Color::Dark, 2));
    assert_eq!(session.state().history().len(), 5);
}

#[test]
fn test_terminal_session_ignores_commands() {
    let endgame = GameState::new().with_positions(Color::Light, &[14, 14, 14, 14, 14, 14, 13]);
    let mut session = scripted([1, 2]).with_state(endgame);

    assert_eq!(session.roll(), Some(1));
    assert!(session.make_move(&Move::new(Color::Light, 13, 14)));
    assert_eq!(session.phase(), TurnPhase::Terminal(Color::Light));

    let before = session.snapshot();
    assert_eq!(session.roll(), None);
    assert!(!session.make_move(&Move::new(Color::Dark, OFF_BOARD, 1)));
    assert_eq!(session.snapshot(), before);
}

#[test]
fn test_reset_starts_over() {
    let mut session = scripted([2, 2]);
    session.roll();
    session.make_move(&Move::new(Color::Light, OFF_BOARD, 1));

    session.reset();
    assert_eq!(session.state(), &GameState::new());
    assert_eq!(session.generation(), 1);
    assert_eq!(session.phase(), TurnPhase::AwaitingRoll(Color::Light));

    // Dice are not rewound by a reset.
    assert_eq!(session.roll(), Some(2));
}

// =============================================================================
// Snapshots
// =============================================================================

#[test]
fn test_snapshot_matches_read_surface() {
    let mut session = scripted([2]);
    session.roll();

    let snapshot = session.snapshot();
    assert_eq!(&snapshot.state, session.state());
    assert_eq!(snapshot.legal_moves, session.legal_moves());
    assert_eq!(snapshot.generation, 0);
    assert_eq!(snapshot.phase(), session.phase());
}

#[tokio::test]
async fn test_subscriber_wakes_on_transition() {
    let shared = SharedSession::new(scripted([1]));
    let mut updates = shared.subscribe();

    let commander = shared.clone();
    tokio::spawn(async move {
        commander.roll();
    });

    updates.changed().await.unwrap();
    let snapshot = updates.borrow_and_update().clone();
    assert_eq!(snapshot.phase(), TurnPhase::AwaitingMove(Color::Light, 1));
    assert_eq!(snapshot.legal_moves, vec![Move::new(Color::Light, OFF_BOARD, 0)]);
}

#[test]
fn test_reset_publishes_new_generation() {
    let mut session = scripted([1]);
    let mut updates = session.subscribe();

    session.reset();
    assert!(updates.has_changed().unwrap());
    assert_eq!(updates.borrow_and_update().generation, 1);
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn test_from_config_is_deterministic() {
    let config = MatchConfig::new().with_seed(11);
    let mut a = Session::from_config(&config);
    let mut b = Session::from_config(&config);

    for _ in 0..20 {
        let ra = a.roll();
        let rb = b.roll();
        assert_eq!(ra, rb);
        if let Some(mv) = a.legal_moves().first().copied() {
            assert!(a.make_move(&mv));
            assert!(b.make_move(&mv));
        }
    }
    assert_eq!(a.state(), b.state());
}

#[test]
fn test_config_from_json() {
    let config = MatchConfig::from_json(
        r#"{ "seed": 5, "human": "dark", "bot": { "color": "light", "tick_ms": 50 } }"#,
    )
    .unwrap();
    assert_eq!(config.bot, BotConfig::new(Color::Light).with_tick_ms(50));
    assert_eq!(config.human, Color::Dark);

    let err = MatchConfig::from_json(r#"{ "human": "dark" }"#).unwrap_err();
    assert!(err.to_string().contains("cannot both play"));
}
