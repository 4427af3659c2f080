//! HTML pages rendered with askama templates from `templates/`.

use askama::Template;
use axum::response::Html;
use serde_json::Value;

use super::ApiError;
use super::validation::is_http_url;
use crate::models::game::{DESCRIPTION_MAX_LEN, Game, IMAGE_URL_MAX_LEN, TITLE_MAX_LEN};

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage<'a> {
    pub games: &'a [Game],
    pub notice: Option<String>,
}

#[derive(Template)]
#[template(path = "add.html")]
pub struct AddPage<'a> {
    pub title: &'a str,
    pub error: Option<&'a str>,
}

#[derive(Template)]
#[template(path = "search_results.html")]
pub struct SearchResultsPage<'a> {
    pub query: &'a str,
    pub count: usize,
    pub results: Vec<SearchResultView>,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorPage<'a> {
    pub status: u16,
    pub reason: &'a str,
    pub message: &'a str,
}

pub fn render<T: Template>(page: &T) -> Result<Html<String>, ApiError> {
    page.render().map(Html).map_err(ApiError::from)
}

/// One catalog match as shown on the results page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResultView {
    pub title: String,
    pub image: Option<String>,
    pub description: Option<String>,
    /// Confirm-add link; `None` when the record can't be stored as-is.
    pub confirm_href: Option<String>,
}

impl SearchResultView {
    #[must_use]
    pub fn from_record(record: &Value) -> Self {
        let title = record["title"].as_str().map(str::trim).unwrap_or_default();

        let image = ["image", "thumbnail_image"]
            .iter()
            .find_map(|key| record["sample_cover"][key].as_str())
            .map(str::trim)
            .filter(|s| !s.is_empty());

        let description = record["description"].as_str().and_then(clean_description);

        let confirm_href = image
            .filter(|img| {
                !title.is_empty()
                    && title.chars().count() <= TITLE_MAX_LEN
                    && img.chars().count() <= IMAGE_URL_MAX_LEN
                    && is_http_url(img)
            })
            .map(|img| confirm_href(title, img, description.as_deref()));

        Self {
            title: if title.is_empty() {
                "Untitled".to_string()
            } else {
                title.to_string()
            },
            image: image.map(ToString::to_string),
            description,
            confirm_href,
        }
    }
}

fn confirm_href(title: &str, image: &str, description: Option<&str>) -> String {
    let mut href = format!(
        "/search?title={}&img={}",
        urlencoding::encode(title),
        urlencoding::encode(image)
    );

    if let Some(description) = description {
        href.push_str("&description=");
        href.push_str(&urlencoding::encode(description));
    }

    href
}

/// Turns the catalog's HTML description into a single line of plain text
/// that fits the description column.
#[must_use]
pub fn clean_description(html: &str) -> Option<String> {
    let text = html2text::from_read(html.as_bytes(), 10_000).unwrap_or_else(|_| html.to_string());
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.is_empty() {
        return None;
    }

    if collapsed.chars().count() <= DESCRIPTION_MAX_LEN {
        return Some(collapsed);
    }

    let mut truncated: String = collapsed.chars().take(DESCRIPTION_MAX_LEN - 1).collect();
    truncated.push('…');
    Some(truncated)
}
