use std::sync::Arc;

use todo_core::{MemoryStore, MongoStore, TodoService, TodoStore, DATABASE_NAME};
use todo_server::config::ServerConfig;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,todo_server=debug,todo_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;

    let store: Arc<dyn TodoStore> = match &config.database_url {
        Some(prefix) => {
            let store = MongoStore::connect(prefix).await?;
            match store.ping().await {
                Ok(()) => tracing::info!(database = DATABASE_NAME, "connected to MongoDB"),
                Err(e) => tracing::error!("MongoDB is not reachable yet: {e}"),
            }
            if let Err(e) = store.ensure_indexes().await {
                tracing::error!("failed to create indexes: {e}");
            }
            Arc::new(store)
        }
        None => {
            tracing::warn!("DATABASE is not set; todos are kept in memory only");
            Arc::new(MemoryStore::new())
        }
    };
    let service = TodoService::new(store);

    let listener = TcpListener::bind(config.addr()).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    todo_server::run(listener, service, shutdown_signal()).await?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
