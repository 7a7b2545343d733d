pub mod handlers;
pub mod schema;

use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use axum::{routing::get, Router};
use gamedex_db::GameStore;
use gamedex_kernel::{InitCtx, Module};

/// Game catalog: CRUD and search over the `games` table
pub struct GamesModule {
    store: Arc<dyn GameStore>,
}

impl GamesModule {
    pub fn new(store: Arc<dyn GameStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Module for GamesModule {
    fn name(&self) -> &'static str {
        "games"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        self.store
            .prepare()
            .await
            .context("failed to prepare games table")?;

        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            backend = ?ctx.db.backend(),
            "games module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route(
                "/",
                get(handlers::get_all_games).post(handlers::create_game),
            )
            .route(
                "/{id}",
                get(handlers::get_game_by_id)
                    .put(handlers::update_game)
                    .delete(handlers::delete_game),
            )
            .with_state(Arc::clone(&self.store))
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "games module stopped");
        Ok(())
    }
}

/// Create a new instance of the games module over the given store
pub fn create_module(store: Arc<dyn GameStore>) -> Arc<dyn Module> {
    Arc::new(GamesModule::new(store))
}
