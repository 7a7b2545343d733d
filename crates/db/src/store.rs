use async_trait::async_trait;
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::{Game, NewGame};

/// Gateway to the persistent collection of games.
///
/// Every method is a single store call: no batching, no retries. Absence is
/// reported as `Ok(None)` by [`get_by_id`](GameStore::get_by_id) and as
/// [`StoreError::NotFound`] by the mutating operations.
#[async_trait]
pub trait GameStore: Send + Sync {
    /// Make sure the backing table exists.
    async fn prepare(&self) -> Result<(), StoreError> {
        Ok(())
    }

    /// Insert a game; the store assigns its id.
    async fn create(&self, game: NewGame) -> Result<Game, StoreError>;

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Game>, StoreError>;

    /// All games, or those whose name or author contains `search`
    /// case-insensitively.
    async fn list(&self, search: Option<&str>) -> Result<Vec<Game>, StoreError>;

    /// Overwrite all business fields of an existing game.
    async fn update(&self, id: Uuid, game: NewGame) -> Result<Game, StoreError>;

    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;
}
