use std::sync::Arc;

use anyhow::Context;

use smartgrocer_api::config::AppConfig;
use smartgrocer_inventory::InventoryStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env();
    smartgrocer_observability::init(config.log_format);
    for warning in &config.warnings {
        tracing::warn!("{warning}");
    }

    let store = if config.seed {
        InventoryStore::with_sample_catalog()
    } else {
        InventoryStore::new()
    };
    tracing::info!(items = store.len(), seeded = config.seed, "inventory ready");

    let app = smartgrocer_api::app::build_app(Arc::new(store));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server terminated with an error")?;

    tracing::info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
