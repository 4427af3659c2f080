#![allow(dead_code)]

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use gameshelf::api::AppState;
use gameshelf::config::{Config, MIN_SECRET_KEY_LEN, Secrets};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub const TEST_API_KEY: &str = "test-api-key";

/// Canned answer served by the stub catalog.
#[derive(Clone)]
pub struct StubReply {
    pub status: StatusCode,
    pub body: String,
}

impl StubReply {
    pub fn games(games: serde_json::Value) -> Self {
        Self {
            status: StatusCode::OK,
            body: serde_json::json!({ "games": games }).to_string(),
        }
    }

    pub fn raw(status: StatusCode, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }
}

/// Query strings the stub has received, oldest first.
pub type Captured = Arc<Mutex<Vec<HashMap<String, String>>>>;

#[derive(Clone)]
struct StubState {
    reply: StubReply,
    captured: Captured,
}

async fn stub_games(
    State(state): State<StubState>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    state.captured.lock().unwrap().push(params);
    (
        state.reply.status,
        [("content-type", "application/json")],
        state.reply.body.clone(),
    )
}

/// Serves `reply` for `GET /v1/games` on an ephemeral port and returns the
/// endpoint URL.
pub async fn spawn_catalog_stub(reply: StubReply) -> (String, Captured) {
    let captured: Captured = Arc::default();
    let app = Router::new()
        .route("/v1/games", get(stub_games))
        .with_state(StubState {
            reply,
            captured: captured.clone(),
        });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}/v1/games"), captured)
}

pub fn test_secrets() -> Secrets {
    Secrets {
        api_key: TEST_API_KEY.to_string(),
        secret_key: "k".repeat(MIN_SECRET_KEY_LEN),
    }
}

pub fn test_config(endpoint: &str) -> Config {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();
    config.catalog.endpoint = endpoint.to_string();
    config.catalog.request_timeout_seconds = 5;
    config
}

pub async fn spawn_app(reply: StubReply) -> (Router, Arc<AppState>) {
    let (endpoint, _) = spawn_catalog_stub(reply).await;

    let state = gameshelf::api::create_app_state(test_config(&endpoint), &test_secrets(), None)
        .await
        .expect("Failed to create app state");

    (gameshelf::api::router(state.clone()), state)
}
