//! In-process game store, kept in insertion order.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::{Game, NewGame};
use crate::store::GameStore;

#[derive(Default)]
pub struct MemoryGameStore {
    games: RwLock<Vec<Game>>,
}

impl MemoryGameStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches_search(game: &Game, needle: &str) -> bool {
    game.name.to_lowercase().contains(needle) || game.author.to_lowercase().contains(needle)
}

#[async_trait]
impl GameStore for MemoryGameStore {
    async fn create(&self, game: NewGame) -> Result<Game, StoreError> {
        let created = game.with_id(Uuid::new_v4());
        self.games.write().await.push(created.clone());
        Ok(created)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Game>, StoreError> {
        let games = self.games.read().await;
        Ok(games.iter().find(|game| game.id == id).cloned())
    }

    async fn list(&self, search: Option<&str>) -> Result<Vec<Game>, StoreError> {
        let games = self.games.read().await;
        let found = match search {
            Some(term) => {
                let needle = term.to_lowercase();
                games
                    .iter()
                    .filter(|game| matches_search(game, &needle))
                    .cloned()
                    .collect()
            }
            None => games.clone(),
        };
        Ok(found)
    }

    async fn update(&self, id: Uuid, game: NewGame) -> Result<Game, StoreError> {
        let mut games = self.games.write().await;
        let slot = games
            .iter_mut()
            .find(|existing| existing.id == id)
            .ok_or(StoreError::NotFound { id })?;
        *slot = game.with_id(id);
        Ok(slot.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let mut games = self.games.write().await;
        let before = games.len();
        games.retain(|game| game.id != id);
        if games.len() == before {
            return Err(StoreError::NotFound { id });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn new_game(name: &str, author: &str) -> NewGame {
        NewGame {
            name: name.to_string(),
            url: "https://example.com".to_string(),
            author: author.to_string(),
            published_date: date!(2020 - 01 - 01),
        }
    }

    #[tokio::test]
    async fn create_then_get_returns_the_stored_record() {
        let store = MemoryGameStore::new();
        let created = store.create(new_game("Chess", "Carl")).await.unwrap();

        let fetched = store.get_by_id(created.id).await.unwrap();
        assert_eq!(fetched, Some(new_game("Chess", "Carl").with_id(created.id)));
    }

    #[tokio::test]
    async fn get_unknown_id_is_none() {
        let store = MemoryGameStore::new();
        assert_eq!(store.get_by_id(Uuid::new_v4()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn list_filters_by_name_or_author_ignoring_case() {
        let store = MemoryGameStore::new();
        store.create(new_game("Chess Master", "Carl")).await.unwrap();
        store.create(new_game("Go", "Akira")).await.unwrap();
        store.create(new_game("Checkers", "mastermind")).await.unwrap();

        let all = store.list(None).await.unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].name, "Chess Master");

        let found = store.list(Some("MASTER")).await.unwrap();
        let names: Vec<_> = found.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, ["Chess Master", "Checkers"]);

        assert!(store.list(Some("zzz")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_replaces_fields_and_keeps_id() {
        let store = MemoryGameStore::new();
        let created = store.create(new_game("Chess", "Carl")).await.unwrap();

        let updated = store
            .update(created.id, new_game("Shogi", "Hiro"))
            .await
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Shogi");
        assert_eq!(store.list(None).await.unwrap(), vec![updated]);
    }

    #[tokio::test]
    async fn update_and_delete_unknown_id_report_not_found() {
        let store = MemoryGameStore::new();
        let id = Uuid::new_v4();

        let err = store.update(id, new_game("Chess", "Carl")).await.unwrap_err();
        assert!(err.is_not_found());

        let err = store.delete(id).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn delete_removes_the_row() {
        let store = MemoryGameStore::new();
        let created = store.create(new_game("Chess", "Carl")).await.unwrap();

        store.delete(created.id).await.unwrap();
        assert_eq!(store.get_by_id(created.id).await.unwrap(), None);
    }
}
