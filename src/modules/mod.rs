pub mod games;

use gamedex_db::Database;
use gamedex_kernel::ModuleRegistry;

/// Register all application modules with the registry
pub fn register_all(registry: &mut ModuleRegistry, db: &Database) {
    registry.register(games::create_module(db.games()));
}
