//! HTTP server facade for InvSys with Axum, error handling, and OpenAPI support.

use anyhow::Context;
use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

use invsys_kernel::{settings::Settings, AppState, ModuleRegistry};

pub mod error;
pub mod router;

use router::RouterBuilder;

pub const LIVENESS_MESSAGE: &str = "InvSys Server Running...";

/// Bind the configured address and serve until Ctrl-C
pub async fn start_server(
    registry: &ModuleRegistry,
    settings: &Settings,
    state: AppState,
) -> anyhow::Result<()> {
    let app = build_router(registry, settings, state).context("failed to build HTTP router")?;

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;

    tracing::info!("server listening on port {}", settings.server.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    tracing::info!("HTTP server stopped");
    Ok(())
}

/// Build the main HTTP router with the liveness route and all module routes
pub fn build_router(
    registry: &ModuleRegistry,
    settings: &Settings,
    state: AppState,
) -> anyhow::Result<Router> {
    let mut router_builder = RouterBuilder::new().route("/", get(liveness));

    for module in registry.modules() {
        tracing::info!(
            module = module.name(),
            "mounting module routes under /api/{}",
            module.name()
        );
        router_builder = router_builder.mount_module(module.name(), module.routes());
    }

    let router = router_builder
        .with_openapi(registry)
        .with_body_limit(settings.server.body_limit_bytes)
        .with_timeout(settings.server.request_timeout_ms)
        .with_cors(&settings.server.cors_origin)?
        .with_request_id()
        .with_tracing()
        .build(state);

    Ok(router)
}

/// Liveness check; answers regardless of database state
async fn liveness() -> Json<Value> {
    Json(json!({ "message": LIVENESS_MESSAGE }))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
