use liftlog::config::Config;
use liftlog::domain::call::CallStore;
use liftlog::interface::api::{build_router, init_metrics, AppState};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[cfg(not(feature = "sqlite"))]
use liftlog::infrastructure::persistence::InMemoryCallStore;
#[cfg(feature = "sqlite")]
use liftlog::infrastructure::persistence::{create_pool, DatabaseConfig, SqliteCallStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::load()?;

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log.level)),
        )
        .init();

    info!("Starting liftlog");
    info!("Configuration loaded: {:?}", config);

    #[cfg(feature = "sqlite")]
    let sqlite_store = {
        info!("Initializing database connection...");
        let pool = create_pool(&DatabaseConfig::from(&config.database)).await?;
        Arc::new(SqliteCallStore::new(pool))
    };
    #[cfg(feature = "sqlite")]
    let call_store: Arc<dyn CallStore> = sqlite_store.clone();

    #[cfg(not(feature = "sqlite"))]
    let call_store: Arc<dyn CallStore> = {
        tracing::warn!("sqlite feature disabled, calls are kept in memory only");
        Arc::new(InMemoryCallStore::new())
    };

    call_store.create_schema().await?;
    info!("Call store ready");

    let state = AppState::new(call_store, &config);

    if config.seed.on_startup {
        let rows = state.seeder.reseed().await?;
        info!("Startup seed loaded {} calls", rows);
    }

    // Initialize metrics exporter
    info!("Initializing Prometheus metrics exporter");
    let prometheus_handle = init_metrics()?;

    let app = build_router(state, prometheus_handle);
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("REST API server started on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutting down...");

    #[cfg(feature = "sqlite")]
    {
        sqlite_store.close().await;
        info!("Database pool closed");
    }

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            error!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await
        }
    }
}
