use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use gamedex_db::GameStore;
use gamedex_http::error::AppError;
use serde_json::{json, Value};

use super::schema::{self, GameIdParams, GameResponse, SearchParams};

pub const GAME_NOT_FOUND: &str = "Game not found";
pub const GAME_DELETED: &str = "Game deleted successfully";

pub type SharedStore = Arc<dyn GameStore>;

/// Outcome of a lookup by id. A miss is still a 200.
pub enum GameLookup {
    Found(GameResponse),
    Missing,
}

impl IntoResponse for GameLookup {
    fn into_response(self) -> Response {
        match self {
            GameLookup::Found(game) => Json(game).into_response(),
            GameLookup::Missing => Json(json!({ "error": GAME_NOT_FOUND })).into_response(),
        }
    }
}

pub async fn create_game(
    State(store): State<SharedStore>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<GameResponse>), AppError> {
    let Json(body) = body?;
    let game = schema::validate_game(body)?;

    let created = store.create(game).await.inspect_err(|e| {
        tracing::error!(error = %e, "failed to create game");
    })?;
    tracing::info!(game_id = %created.id, "game created");

    Ok((StatusCode::CREATED, Json(schema::shape(created)?)))
}

pub async fn get_game_by_id(
    State(store): State<SharedStore>,
    Path(params): Path<GameIdParams>,
) -> Result<GameLookup, AppError> {
    let id = schema::validate_id(&params)?;

    match store.get_by_id(id).await? {
        Some(game) => Ok(GameLookup::Found(schema::shape(game)?)),
        None => {
            tracing::debug!(game_id = %id, "game not found");
            Ok(GameLookup::Missing)
        }
    }
}

pub async fn get_all_games(
    State(store): State<SharedStore>,
    query: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<Vec<GameResponse>>, AppError> {
    let Query(params) = query.map_err(AppError::fetch)?;
    let games = store.list(params.term()).await.map_err(AppError::fetch)?;
    Ok(Json(schema::shape_all(games)?))
}

pub async fn update_game(
    State(store): State<SharedStore>,
    Path(params): Path<GameIdParams>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<GameResponse>, AppError> {
    let id = schema::validate_id(&params)?;
    let Json(body) = body?;
    let game = schema::validate_game(body)?;

    let updated = store.update(id, game).await.inspect_err(|e| {
        tracing::warn!(game_id = %id, error = %e, "failed to update game");
    })?;
    tracing::info!(game_id = %id, "game updated");

    Ok(Json(schema::shape(updated)?))
}

pub async fn delete_game(
    State(store): State<SharedStore>,
    Path(params): Path<GameIdParams>,
) -> Result<Json<Value>, AppError> {
    let id = schema::validate_id(&params)?;

    store.delete(id).await.inspect_err(|e| {
        tracing::warn!(game_id = %id, error = %e, "failed to delete game");
    })?;
    tracing::info!(game_id = %id, "game deleted");

    Ok(Json(json!({ "message": GAME_DELETED })))
}
