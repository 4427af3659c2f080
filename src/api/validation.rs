use super::ApiError;
use crate::models::game::PLACEHOLDER_DESCRIPTION;

pub fn validate_search_query(query: &str) -> Result<&str, ApiError> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation("Search title cannot be empty"));
    }
    Ok(trimmed)
}

/// Absolute `http`/`https` URL with a host.
#[must_use]
pub fn is_http_url(value: &str) -> bool {
    url::Url::parse(value)
        .is_ok_and(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
}

/// Values a confirm-add request may store.
#[derive(Debug, PartialEq, Eq)]
pub struct ConfirmAddInput<'a> {
    pub title: &'a str,
    pub image_url: &'a str,
    pub description: &'a str,
}

/// Checks the caller-supplied confirm-add parameters.
///
/// They are not cross-checked against the catalog, so the cover must at
/// least be an absolute http(s) URL. Field lengths are left to the store.
pub fn validate_confirm_add<'a>(
    title: &'a str,
    image_url: &'a str,
    description: Option<&'a str>,
) -> Result<ConfirmAddInput<'a>, ApiError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ApiError::validation("A title is required"));
    }

    let image_url = image_url.trim();
    if image_url.is_empty() {
        return Err(ApiError::validation("A cover image URL is required"));
    }

    if !is_http_url(image_url) {
        return Err(ApiError::validation(format!(
            "Invalid cover image URL: {image_url}"
        )));
    }

    let description = description
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .unwrap_or(PLACEHOLDER_DESCRIPTION);

    Ok(ConfirmAddInput {
        title,
        image_url,
        description,
    })
}
