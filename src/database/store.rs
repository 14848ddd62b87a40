use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use thiserror::Error;
use tracing::info;

use crate::database::models::drink::DrinkRow;
use crate::database::models::{Drink, Ingredient};

/// Errors from DrinkStore
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no drink with id {0}")]
    NotFound(i64),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error("stored recipe is not valid JSON: {0}")]
    Recipe(#[from] serde_json::Error),
}

/// The drink resource store. Owns its connection pool; constructed once
/// at startup and handed to handlers through application state rather
/// than living in a process-global.
#[derive(Clone)]
pub struct DrinkStore {
    pool: SqlitePool,
}

impl DrinkStore {
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;
        Ok(Self { pool })
    }

    /// Create the drinks table if needed. `recreate` drops it first,
    /// discarding all rows.
    pub async fn init(&self, recreate: bool) -> Result<(), StoreError> {
        if recreate {
            info!("recreating drinks table, existing rows will be dropped");
            sqlx::query("DROP TABLE IF EXISTS drinks")
                .execute(&self.pool)
                .await?;
        }

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS drinks (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                recipe TEXT NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Pings the store to ensure connectivity
    pub async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    pub async fn list(&self) -> Result<Vec<Drink>, StoreError> {
        let rows =
            sqlx::query_as::<_, DrinkRow>("SELECT id, title, recipe FROM drinks ORDER BY id")
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter()
            .map(|row| row.decode().map_err(StoreError::from))
            .collect()
    }

    pub async fn find(&self, id: i64) -> Result<Drink, StoreError> {
        let row =
            sqlx::query_as::<_, DrinkRow>("SELECT id, title, recipe FROM drinks WHERE id = ?1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?
                .ok_or(StoreError::NotFound(id))?;

        Ok(row.decode()?)
    }

    /// Insert a new drink and return it with its assigned id.
    pub async fn create(
        &self,
        title: String,
        recipe: Vec<Ingredient>,
    ) -> Result<Drink, StoreError> {
        let encoded = serde_json::to_string(&recipe)?;
        let result = sqlx::query("INSERT INTO drinks (title, recipe) VALUES (?1, ?2)")
            .bind(&title)
            .bind(&encoded)
            .execute(&self.pool)
            .await?;

        Ok(Drink {
            id: result.last_insert_rowid(),
            title,
            recipe,
        })
    }

    /// Partial update: fields left as `None` keep their stored value.
    pub async fn update(
        &self,
        id: i64,
        title: Option<String>,
        recipe: Option<Vec<Ingredient>>,
    ) -> Result<Drink, StoreError> {
        let current = self.find(id).await?;
        let title = title.unwrap_or(current.title);
        let recipe = recipe.unwrap_or(current.recipe);
        let encoded = serde_json::to_string(&recipe)?;

        sqlx::query("UPDATE drinks SET title = ?1, recipe = ?2 WHERE id = ?3")
            .bind(&title)
            .bind(&encoded)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(Drink { id, title, recipe })
    }

    /// Remove a drink, returning the deleted id.
    pub async fn delete(&self, id: i64) -> Result<i64, StoreError> {
        let result = sqlx::query("DELETE FROM drinks WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }

        Ok(id)
    }
}
