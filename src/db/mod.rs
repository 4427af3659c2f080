use crate::config::GeneralConfig;
use crate::models::game::{Game, NewGame};
use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

pub mod migrator;
pub mod repositories;

/// Errors returned by collection operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Game {0} not found")]
    NotFound(i32),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Owns the persisted game collection.
///
/// Built once at startup and shared with every handler; cloning only clones
/// the connection pool handle.
#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    /// Opens the database named in `[general]` with its pool limits.
    pub async fn from_config(general: &GeneralConfig) -> Result<Self> {
        Self::with_pool_options(
            &general.database_path,
            general.max_db_connections,
            general.min_db_connections,
        )
        .await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let in_memory = db_url.contains(":memory:");

        if !in_memory {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        // Every pooled connection to an in-memory database would see its own
        // empty database, so those stay on a single connection.
        let max_connections = if in_memory { 1 } else { max_connections };
        let min_connections = min_connections.min(max_connections);

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn game_repo(&self) -> repositories::game::GameRepository {
        repositories::game::GameRepository::new(self.conn.clone())
    }

    /// All saved games, oldest first (ascending id).
    pub async fn list_all(&self) -> Result<Vec<Game>, StoreError> {
        self.game_repo().list_all().await
    }

    pub async fn get(&self, id: i32) -> Result<Option<Game>, StoreError> {
        self.game_repo().get(id).await
    }

    /// Persists a new game and returns it with its assigned id.
    ///
    /// Rejects an empty title or image URL, and values longer than their
    /// columns, with [`StoreError::Validation`] before anything is written.
    pub async fn add(
        &self,
        title: &str,
        description: Option<&str>,
        image_url: &str,
    ) -> Result<Game, StoreError> {
        let game = NewGame::new(title, description, image_url);
        self.game_repo().add(&game).await
    }

    /// Removes a game and returns what was deleted.
    pub async fn delete(&self, id: i32) -> Result<Game, StoreError> {
        self.game_repo().delete(id).await
    }
}
