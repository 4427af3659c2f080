use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;

use super::views::{self, AddPage, SearchResultView, SearchResultsPage};
use super::{ApiError, AppState};
use crate::api::validation::validate_search_query;

#[derive(Debug, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub title: String,
}

/// GET /add
pub async fn add_form() -> Result<Html<String>, ApiError> {
    views::render(&AddPage {
        title: "",
        error: None,
    })
}

/// POST /add
///
/// Read-only: lists catalog matches, each linking to confirm-add.
pub async fn search_catalog(
    State(state): State<Arc<AppState>>,
    Form(form): Form<SearchForm>,
) -> Result<Response, ApiError> {
    let query = match validate_search_query(&form.title) {
        Ok(q) => q,
        Err(ApiError::ValidationError(message)) => {
            let page = views::render(&AddPage {
                title: &form.title,
                error: Some(&message),
            })?;
            return Ok((StatusCode::BAD_REQUEST, page).into_response());
        }
        Err(e) => return Err(e),
    };

    let search = state.catalog.search(query).await?;

    let results: Vec<SearchResultView> = search
        .games
        .iter()
        .map(SearchResultView::from_record)
        .collect();

    let page = views::render(&SearchResultsPage {
        query,
        count: search.count,
        results,
    })?;

    Ok(page.into_response())
}
