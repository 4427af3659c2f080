/// Stored when confirm-add arrives without a catalog description.
pub const PLACEHOLDER_DESCRIPTION: &str = "placeholder";

pub const TITLE_MAX_LEN: usize = 50;
pub const DESCRIPTION_MAX_LEN: usize = 200;
pub const IMAGE_URL_MAX_LEN: usize = 100;

/// A title saved to the collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub image_url: String,
}

/// Field values for a game that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGame {
    pub title: String,
    pub description: Option<String>,
    pub image_url: String,
}

impl NewGame {
    #[must_use]
    pub fn new(title: &str, description: Option<&str>, image_url: &str) -> Self {
        Self {
            title: title.trim().to_string(),
            description: description
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(ToString::to_string),
            image_url: image_url.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_game_trims_fields_and_drops_blank_description() {
        let game = NewGame::new("  Chrono Trigger ", Some("   "), " http://img/ct.png ");
        assert_eq!(game.title, "Chrono Trigger");
        assert_eq!(game.image_url, "http://img/ct.png");
        assert_eq!(game.description, None);
    }
}
