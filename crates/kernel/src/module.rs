use async_trait::async_trait;
use axum::Router;
use invsys_db::{Database, TableSchema};

use crate::state::AppState;

/// Context provided to modules during initialization
pub struct InitCtx<'a> {
    pub settings: &'a crate::settings::Settings,
    pub db: &'a dyn Database,
}

/// A route module: contributes routes under `/api/{name}` and the tables it owns.
#[async_trait]
pub trait Module: Sync + Send {
    /// Unique name for this module
    fn name(&self) -> &'static str;

    /// Called during application startup, before the schema is reset
    async fn init(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Routes for this module, mounted under `/api/{module_name}`
    fn routes(&self) -> Router<AppState> {
        Router::new()
    }

    /// OpenAPI fragment for this module's routes, merged into the server spec
    fn openapi(&self) -> Option<serde_json::Value> {
        None
    }

    /// Tables owned by this module, in creation order
    fn tables(&self) -> Vec<TableSchema> {
        vec![]
    }

    /// Called after the schema has been seeded
    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Called during application shutdown
    async fn stop(&self) -> anyhow::Result<()> {
        Ok(())
    }
}
