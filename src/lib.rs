//! gamedex application library
//!
//! Wires the game catalog module onto the kernel, store, and HTTP crates and
//! owns the process lifecycle.

pub mod modules;

use anyhow::Context;
use gamedex_db::Database;
use gamedex_kernel::{settings::Settings, InitCtx, ModuleRegistry};

/// Run the service until a shutdown signal arrives.
///
/// The store handle is opened before any module initializes and closed after
/// every module has stopped, even when startup or serving fails.
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    tracing::info!(
        env = ?settings.environment,
        backend = ?settings.database.backend,
        "gamedex bootstrap starting"
    );

    let db = Database::connect(&settings.database)
        .await
        .context("failed to open the game store")?;

    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, &db);

    let ctx = InitCtx {
        settings: &settings,
        db: &db,
    };

    let served = serve(&registry, &ctx).await;
    let stopped = registry.stop_all().await;
    db.close().await;

    served?;
    stopped?;
    tracing::info!("gamedex shut down cleanly");
    Ok(())
}

async fn serve(registry: &ModuleRegistry, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
    registry.init_all(ctx).await?;
    registry.start_all(ctx).await?;
    tracing::info!("gamedex bootstrap complete");
    gamedex_http::start_server(registry, ctx.settings).await
}

/// Verify the configured store is reachable, then disconnect.
pub async fn check(settings: &Settings) -> anyhow::Result<()> {
    let db = Database::connect(&settings.database)
        .await
        .context("failed to open the game store")?;
    let result = db.ping().await;
    db.close().await;
    result?;

    tracing::info!(backend = ?db.backend(), "game store is reachable");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gamedex_kernel::settings::Backend;

    #[tokio::test]
    async fn check_succeeds_for_memory_backend() {
        let mut settings = Settings::default();
        settings.database.backend = Backend::Memory;
        check(&settings).await.unwrap();
    }

    #[test]
    fn register_all_mounts_the_games_module() {
        let db = Database::memory();
        let mut registry = ModuleRegistry::new();
        modules::register_all(&mut registry, &db);
        assert!(registry.get_module("games").is_some());
    }
}
