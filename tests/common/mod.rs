//! In-process Gomoku server fixture for integration tests.
//!
//! Serves the three wire endpoints plus a root route for liveness probes.
//! The snapshot and matchmaking assignment are scriptable, every route
//! counts its hits, and request bodies are captured for wire-exactness
//! assertions.

// Not every test binary exercises every helper.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};

/// Scriptable state backing one fixture server.
#[derive(Debug, Default)]
pub struct FixtureState {
    /// Snapshot served by `api_get_state.php`.
    pub snapshot: Mutex<Value>,
    /// Assignment served by `api_find_game.php`.
    pub assignment: Mutex<Value>,
    /// Forced HTTP status for liveness probes (0 = answer 200).
    pub fail_probe_with: AtomicUsize,
    /// Forced HTTP status for matchmaking (0 = succeed).
    pub fail_find_with: AtomicUsize,
    /// Forced HTTP status for state fetches (0 = succeed).
    pub fail_state_with: AtomicUsize,
    /// Hit counters, one per route.
    pub probe_hits: AtomicUsize,
    /// Hits on `api_find_game.php`.
    pub find_hits: AtomicUsize,
    /// Hits on `api_get_state.php`.
    pub state_hits: AtomicUsize,
    /// Hits on `api_place_move.php`.
    pub move_hits: AtomicUsize,
    /// Last body received by `api_find_game.php`.
    pub last_find_body: Mutex<Option<Value>>,
    /// Last body received by `api_place_move.php`.
    pub last_move_body: Mutex<Option<Value>>,
    /// Last query string params received by `api_get_state.php`.
    pub last_state_query: Mutex<Option<HashMap<String, String>>>,
}

impl FixtureState {
    /// Replaces the served snapshot.
    pub fn set_snapshot(&self, snapshot: Value) {
        *self.snapshot.lock().unwrap() = snapshot;
    }

    /// Replaces the served matchmaking assignment.
    pub fn set_assignment(&self, assignment: Value) {
        *self.assignment.lock().unwrap() = assignment;
    }
}

/// One running fixture server.
pub struct Fixture {
    /// Shared scriptable state.
    pub state: Arc<FixtureState>,
    /// Base address, with trailing slash like a real deployment URL.
    pub base_url: String,
}

/// Spawns a fixture server on an ephemeral port.
pub async fn spawn_fixture() -> Fixture {
    let state = Arc::new(FixtureState::default());
    state.set_snapshot(json!({
        "game_id": 1,
        "status": "waiting",
        "player_1_id": "p1",
        "moves": []
    }));
    state.set_assignment(json!({"game_id": 1, "role": "player_1"}));

    let app = Router::new()
        .route("/", get(probe))
        .route("/api_find_game.php", post(find_game))
        .route("/api_get_state.php", get(get_state))
        .route("/api_place_move.php", post(place_move))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    Fixture {
        state,
        base_url: format!("http://{addr}/"),
    }
}

async fn probe(State(s): State<Arc<FixtureState>>) -> Response {
    s.probe_hits.fetch_add(1, Ordering::SeqCst);
    match forced_status(&s.fail_probe_with) {
        Some(code) => code.into_response(),
        None => "ok".into_response(),
    }
}

async fn find_game(State(s): State<Arc<FixtureState>>, Json(body): Json<Value>) -> Response {
    s.find_hits.fetch_add(1, Ordering::SeqCst);
    *s.last_find_body.lock().unwrap() = Some(body);
    match forced_status(&s.fail_find_with) {
        Some(code) => code.into_response(),
        None => Json(s.assignment.lock().unwrap().clone()).into_response(),
    }
}

async fn get_state(
    State(s): State<Arc<FixtureState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    s.state_hits.fetch_add(1, Ordering::SeqCst);
    *s.last_state_query.lock().unwrap() = Some(params);
    match forced_status(&s.fail_state_with) {
        Some(code) => code.into_response(),
        None => Json(s.snapshot.lock().unwrap().clone()).into_response(),
    }
}

async fn place_move(State(s): State<Arc<FixtureState>>, Json(body): Json<Value>) -> Response {
    s.move_hits.fetch_add(1, Ordering::SeqCst);
    *s.last_move_body.lock().unwrap() = Some(body);
    Json(json!({"result": "ok"})).into_response()
}

fn forced_status(slot: &AtomicUsize) -> Option<StatusCode> {
    let code = slot.load(Ordering::SeqCst);
    if code == 0 {
        None
    } else {
        Some(StatusCode::from_u16(code as u16).unwrap())
    }
}

/// Returns an address that refuses connections (bound then dropped).
pub fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}/")
}
