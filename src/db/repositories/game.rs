use crate::entities::{games, prelude::*};
use crate::models::game::{
    DESCRIPTION_MAX_LEN, Game, IMAGE_URL_MAX_LEN, NewGame, TITLE_MAX_LEN,
};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set, TransactionTrait,
};
use tracing::info;

use crate::db::StoreError;

pub struct GameRepository {
    conn: DatabaseConnection,
}

impl GameRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model_to_game(model: games::Model) -> Game {
        Game {
            id: model.id,
            title: model.title,
            description: model.description,
            image_url: model.image_url,
        }
    }

    pub async fn list_all(&self) -> Result<Vec<Game>, StoreError> {
        let rows = Games::find()
            .order_by_asc(games::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Self::map_model_to_game).collect())
    }

    pub async fn get(&self, id: i32) -> Result<Option<Game>, StoreError> {
        let row = Games::find_by_id(id).one(&self.conn).await?;
        Ok(row.map(Self::map_model_to_game))
    }

    pub async fn add(&self, game: &NewGame) -> Result<Game, StoreError> {
        validate(game)?;

        let active_model = games::ActiveModel {
            title: Set(game.title.clone()),
            description: Set(game.description.clone()),
            image_url: Set(game.image_url.clone()),
            ..Default::default()
        };

        let model = active_model.insert(&self.conn).await?;

        info!("Added game {}: {}", model.id, model.title);
        Ok(Self::map_model_to_game(model))
    }

    pub async fn delete(&self, id: i32) -> Result<Game, StoreError> {
        let txn = self.conn.begin().await?;

        let Some(model) = Games::find_by_id(id).one(&txn).await? else {
            return Err(StoreError::NotFound(id));
        };

        Games::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;

        info!("Removed game with ID: {}", id);
        Ok(Self::map_model_to_game(model))
    }
}

fn validate(game: &NewGame) -> Result<(), StoreError> {
    if game.title.is_empty() {
        return Err(StoreError::Validation("Title is required".to_string()));
    }

    if game.image_url.is_empty() {
        return Err(StoreError::Validation("Image URL is required".to_string()));
    }

    check_len("Title", &game.title, TITLE_MAX_LEN)?;
    check_len("Image URL", &game.image_url, IMAGE_URL_MAX_LEN)?;

    if let Some(description) = &game.description {
        check_len("Description", description, DESCRIPTION_MAX_LEN)?;
    }

    Ok(())
}

fn check_len(field: &str, value: &str, max: usize) -> Result<(), StoreError> {
    if value.chars().count() > max {
        return Err(StoreError::Validation(format!(
            "{field} must be {max} characters or less"
        )));
    }
    Ok(())
}
