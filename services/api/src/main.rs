use std::sync::Arc;

use anyhow::Result;
use common::database::{DatabaseConfig, init_client};
use tokio::{net::TcpListener, signal};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use todo_api::{
    config::AppConfig,
    jwt::{JwtConfig, JwtService},
    repositories::{TodoRepository, UserRepository},
    routes,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before the subscriber so RUST_LOG can come from it
    let dotenv = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = dotenv {
        if !e.not_found() {
            warn!("Failed to load .env file: {}", e);
        }
    }

    info!("Starting todo API service");

    let app_config = AppConfig::from_env()?;
    let db_config = DatabaseConfig::from_env()?;
    let jwt_service = JwtService::new(JwtConfig::from_env()?)?;

    // Initialize the database client; failure here is fatal
    let client = init_client(&db_config).await?;
    let database = client.database(&db_config.database_name);

    let user_repository = UserRepository::new(&database, db_config.operation_timeout);
    let todo_repository = TodoRepository::new(&database, db_config.operation_timeout);
    user_repository.ensure_indexes().await?;
    todo_repository.ensure_indexes().await?;

    let app_state = AppState::new(
        Arc::new(user_repository),
        Arc::new(todo_repository),
        jwt_service,
    );

    // Start the web server
    let app = routes::create_router(app_state, app_config.cors_allowed_origin);

    let listener = TcpListener::bind(&app_config.bind_address).await?;
    info!("Todo API service listening on {}", app_config.bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Todo API service stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, draining connections");
}
