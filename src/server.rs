//! Process startup: modules, database, seeding, then the HTTP listener.

use std::sync::Arc;

use anyhow::Context;
use invsys_db::{seed, Database};
use invsys_kernel::{settings::Settings, AppState, InitCtx, ModuleRegistry};

use crate::modules;

pub fn build_registry() -> anyhow::Result<ModuleRegistry> {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry).context("failed to register modules")?;
    Ok(registry)
}

pub async fn connect(settings: &Settings) -> anyhow::Result<Arc<dyn Database>> {
    invsys_db::connect(&settings.database.url, settings.database.max_connections)
        .await
        .context("failed to connect to database")
}

/// Reset and seed the schema when `database.reset_on_startup` is set.
///
/// Seed failures are logged inside [`seed::reset_and_seed`] and do not abort
/// startup.
pub async fn prepare_database(
    registry: &ModuleRegistry,
    settings: &Settings,
    db: &dyn Database,
) -> anyhow::Result<()> {
    if !settings.database.reset_on_startup {
        tracing::info!("schema reset disabled; keeping existing data");
        return Ok(());
    }

    let tables = registry.collect_tables()?;
    seed::reset_and_seed(db, &tables).await;
    Ok(())
}

/// Run the server until shutdown.
///
/// Seeding completes before the listener is bound.
pub async fn serve(settings: &Settings) -> anyhow::Result<()> {
    tracing::info!(
        env = ?settings.environment,
        port = settings.server.port,
        "invsys bootstrap starting"
    );

    let registry = build_registry()?;
    let db = connect(settings).await?;
    let ctx = InitCtx {
        settings,
        db: db.as_ref(),
    };

    registry.init_modules(&ctx).await?;
    prepare_database(&registry, settings, db.as_ref()).await?;
    registry.start_modules(&ctx).await?;

    let served =
        invsys_http::start_server(&registry, settings, AppState::new(Arc::clone(&db))).await;

    registry.stop_modules().await?;
    served
}
