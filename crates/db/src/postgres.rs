//! PostgreSQL-backed game store using sqlx.

use async_trait::async_trait;
use sqlx::postgres::PgPool;
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::{Game, NewGame};
use crate::store::GameStore;

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS games (
        id             UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        name           TEXT NOT NULL,
        url            TEXT NOT NULL,
        author         TEXT NOT NULL,
        published_date DATE NOT NULL
    )
"#;

/// Escape `LIKE` wildcards so the term is matched literally.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Game store over a shared PostgreSQL connection pool.
pub struct PgGameStore {
    pool: PgPool,
}

impl PgGameStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GameStore for PgGameStore {
    async fn prepare(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        tracing::debug!(target: "gamedex-db", "games table ready");
        Ok(())
    }

    async fn create(&self, game: NewGame) -> Result<Game, StoreError> {
        let created = sqlx::query_as::<_, Game>(
            "INSERT INTO games (name, url, author, published_date)
             VALUES ($1, $2, $3, $4)
             RETURNING id, name, url, author, published_date",
        )
        .bind(game.name)
        .bind(game.url)
        .bind(game.author)
        .bind(game.published_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Game>, StoreError> {
        let game = sqlx::query_as::<_, Game>(
            "SELECT id, name, url, author, published_date FROM games WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(game)
    }

    async fn list(&self, search: Option<&str>) -> Result<Vec<Game>, StoreError> {
        let games = match search {
            Some(term) => {
                sqlx::query_as::<_, Game>(
                    "SELECT id, name, url, author, published_date FROM games
                     WHERE name ILIKE $1 OR author ILIKE $1",
                )
                .bind(format!("%{}%", escape_like(term)))
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Game>("SELECT id, name, url, author, published_date FROM games")
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        Ok(games)
    }

    async fn update(&self, id: Uuid, game: NewGame) -> Result<Game, StoreError> {
        sqlx::query_as::<_, Game>(
            "UPDATE games
             SET name = $2, url = $3, author = $4, published_date = $5
             WHERE id = $1
             RETURNING id, name, url, author, published_date",
        )
        .bind(id)
        .bind(game.name)
        .bind(game.url)
        .bind(game.author)
        .bind(game.published_date)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound { id })
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM games WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound { id });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_like_leaves_plain_terms_alone() {
        assert_eq!(escape_like("chess"), "chess");
    }

    #[test]
    fn escape_like_escapes_wildcards() {
        assert_eq!(escape_like("100%_off"), "100\\%\\_off");
        assert_eq!(escape_like("a\\b"), "a\\\\b");
    }
}
