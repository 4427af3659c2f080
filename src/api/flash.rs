//! One-shot notices carried across the post/redirect/get hop in the session.

use tower_sessions::Session;
use tracing::warn;

const FLASH_KEY: &str = "flash";

/// Stores a notice for the next page view. Session failures only cost the
/// notice, so they are logged rather than returned.
pub async fn set(session: &Session, message: impl Into<String>) {
    if let Err(e) = session.insert(FLASH_KEY, message.into()).await {
        warn!("Failed to store flash notice: {}", e);
    }
}

/// Removes and returns the pending notice, if any.
pub async fn take(session: &Session) -> Option<String> {
    match session.remove::<String>(FLASH_KEY).await {
        Ok(notice) => notice,
        Err(e) => {
            warn!("Failed to read flash notice: {}", e);
            None
        }
    }
}
