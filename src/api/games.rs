use axum::{
    extract::{Path, Query, State},
    response::{Html, Redirect},
};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;
use tracing::info;

use super::views::{self, IndexPage};
use super::{ApiError, AppState, flash};
use crate::api::validation::validate_confirm_add;

#[derive(Debug, Deserialize)]
pub struct ConfirmAddQuery {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub img: String,
    pub description: Option<String>,
}

/// GET /
pub async fn list_games(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Html<String>, ApiError> {
    let games = state.store.list_all().await?;
    let notice = flash::take(&session).await;

    views::render(&IndexPage {
        games: &games,
        notice,
    })
}

/// GET|POST /search and /search/{title}
///
/// Stores the picked search result. The path segment is accepted for old
/// links and ignored; every call creates a new game.
pub async fn confirm_add(
    State(state): State<Arc<AppState>>,
    session: Session,
    Query(params): Query<ConfirmAddQuery>,
) -> Result<Redirect, ApiError> {
    let input = validate_confirm_add(&params.title, &params.img, params.description.as_deref())?;

    let game = state
        .store
        .add(input.title, Some(input.description), input.image_url)
        .await?;

    info!(
        game_id = game.id,
        title = %game.title,
        image_url = %game.image_url,
        "Game added from confirm-add request"
    );
    metrics::counter!("games_added_total").increment(1);

    flash::set(&session, format!("Added {}", game.title)).await;
    Ok(Redirect::to("/"))
}

/// GET /delete/{id}
pub async fn delete_game(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<Redirect, ApiError> {
    let game = state.store.delete(id).await?;

    metrics::counter!("games_deleted_total").increment(1);

    flash::set(&session, format!("Deleted {}", game.title)).await;
    Ok(Redirect::to("/"))
}
