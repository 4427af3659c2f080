use axum::{
    Router, middleware,
    routing::{get, post},
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;
use tower_sessions::cookie::{Key, SameSite};
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;

use crate::clients::mobygames::CatalogClient;
use crate::config::{Config, Secrets};
use crate::db::Store;

mod error;
mod flash;
mod games;
mod observability;
mod search;
pub mod validation;
pub mod views;

pub use error::ApiError;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,

    pub store: Store,

    pub catalog: CatalogClient,

    pub session_key: Key,

    /// Flash-notice sessions, kept in the games database.
    pub session_store: SqliteStore,

    pub prometheus_handle: Option<PrometheusHandle>,
}

pub async fn create_app_state(
    config: Config,
    secrets: &Secrets,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let store = Store::from_config(&config.general).await?;

    let catalog = CatalogClient::new(
        config.catalog.endpoint.clone(),
        secrets.api_key.clone(),
        Duration::from_secs(config.catalog.request_timeout_seconds),
    )?;

    let session_key = Key::try_from(secrets.secret_key.as_bytes())
        .map_err(|e| anyhow::anyhow!("Invalid session secret: {e}"))?;

    let session_store = SqliteStore::new(store.conn.get_sqlite_connection_pool().clone());
    session_store
        .migrate()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create session table: {e}"))?;

    Ok(Arc::new(AppState {
        config,
        store,
        catalog,
        session_key,
        session_store,
        prometheus_handle,
    }))
}

/// Route table for the whole site.
pub fn router(state: Arc<AppState>) -> Router {
    let session_layer = SessionManagerLayer::new(state.session_store.clone())
        .with_secure(state.config.server.secure_cookies)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(60)))
        .with_signed(state.session_key.clone());

    Router::new()
        .route("/", get(games::list_games))
        .route("/add", get(search::add_form).post(search::search_catalog))
        .route("/search", get(games::confirm_add).post(games::confirm_add))
        .route(
            "/search/{title}",
            get(games::confirm_add).post(games::confirm_add),
        )
        .route("/delete/{id}", get(games::delete_game))
        .route("/health", get(observability::health))
        .route("/metrics", get(observability::get_metrics))
        .layer(session_layer)
        .with_state(state)
        .layer(middleware::from_fn(observability::security_headers_middleware))
        .layer(middleware::from_fn(observability::logging_middleware))
        .layer(TraceLayer::new_for_http())
}
