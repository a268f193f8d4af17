//! Tests for the pure turn derivation.

use gomoku_tui::{GameSnapshot, Move, TurnStatus, determine_turn};

const LOCAL: &str = "android_ab12cd34";

fn snapshot(status: &str, current_turn: Option<&str>, winner: Option<&str>) -> GameSnapshot {
    GameSnapshot {
        game_id: 7,
        status: status.to_string(),
        player_1_id: LOCAL.to_string(),
        player_2_id: Some("opponent".to_string()),
        current_turn_id: current_turn.map(str::to_string),
        winner_id: winner.map(str::to_string),
        moves: vec![],
    }
}

#[test]
fn test_waiting_is_never_my_turn() {
    // Even a bogus current_turn_id pointing at the local player is ignored
    // while the game is waiting.
    let status = determine_turn(&snapshot("waiting", Some(LOCAL), None), LOCAL);
    assert_eq!(status, TurnStatus::WaitingForOpponent);
    assert!(!status.is_my_turn());
    assert!(!status.is_over());
}

#[test]
fn test_finished_won_iff_winner_matches() {
    let won = determine_turn(&snapshot("finished", None, Some(LOCAL)), LOCAL);
    assert_eq!(won, TurnStatus::Won);
    assert!(won.is_over());
    assert!(!won.is_my_turn());

    let lost = determine_turn(&snapshot("finished", None, Some("opponent")), LOCAL);
    assert_eq!(lost, TurnStatus::Lost);
    assert!(lost.is_over());
    assert!(!lost.is_my_turn());
}

#[test]
fn test_finished_without_winner_is_a_draw() {
    let drawn = determine_turn(&snapshot("finished", None, None), LOCAL);
    assert_eq!(drawn, TurnStatus::Drawn);
    assert!(drawn.is_over());
    assert!(!drawn.is_my_turn());
}

#[test]
fn test_active_turn_follows_exact_id_equality() {
    let mine = determine_turn(&snapshot("active", Some(LOCAL), None), LOCAL);
    assert_eq!(mine, TurnStatus::MyTurn);
    assert!(mine.is_my_turn());

    let theirs = determine_turn(&snapshot("active", Some("opponent"), None), LOCAL);
    assert_eq!(theirs, TurnStatus::OpponentTurn);
    assert!(!theirs.is_my_turn());

    // Near misses are not matches: equality is exact, not prefix or trimmed.
    let prefix = determine_turn(&snapshot("active", Some("android_ab12cd34x"), None), LOCAL);
    assert_eq!(prefix, TurnStatus::OpponentTurn);
    let padded = determine_turn(&snapshot("active", Some("android_ab12cd34 "), None), LOCAL);
    assert_eq!(padded, TurnStatus::OpponentTurn);
}

#[test]
fn test_active_with_absent_turn_id_is_opponent_turn() {
    let status = determine_turn(&snapshot("active", None, None), LOCAL);
    assert_eq!(status, TurnStatus::OpponentTurn);
}

#[test]
fn test_unknown_status_falls_back_to_active() {
    // Anything that is not "waiting" or "finished" counts as in progress.
    for status in ["active", "in_progress", "overtime", ""] {
        let derived = determine_turn(&snapshot(status, Some(LOCAL), None), LOCAL);
        assert_eq!(derived, TurnStatus::MyTurn, "status {status:?}");
    }
}

#[test]
fn test_derivation_ignores_moves() {
    let mut with_moves = snapshot("active", Some(LOCAL), None);
    with_moves.moves = vec![
        Move {
            player_id: LOCAL.to_string(),
            x_coord: 7,
            y_coord: 7,
        },
        Move {
            player_id: "opponent".to_string(),
            x_coord: 8,
            y_coord: 8,
        },
    ];
    let without_moves = snapshot("active", Some(LOCAL), None);
    assert_eq!(
        determine_turn(&with_moves, LOCAL),
        determine_turn(&without_moves, LOCAL)
    );
}

#[test]
fn test_derivation_is_referentially_transparent() {
    let s = snapshot("active", Some("opponent"), None);
    assert_eq!(determine_turn(&s, LOCAL), determine_turn(&s, LOCAL));
    // The input is untouched.
    assert_eq!(s, snapshot("active", Some("opponent"), None));
}
