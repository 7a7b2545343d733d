use thiserror::Error;
use uuid::Uuid;

/// Failures reported by a [`GameStore`](crate::GameStore).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("game {id} not found")]
    NotFound { id: Uuid },

    #[error("database query failed: {0}")]
    Query(#[from] sqlx::Error),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}
