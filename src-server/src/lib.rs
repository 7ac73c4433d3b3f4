//! Daily Todo edge server.
//!
//! Serves the built single-page frontend and enforces the route guard before
//! any page is served, from the same decision table the client uses. A
//! request's session is just "does it carry a non-empty `auth_token` cookie";
//! the token itself is never validated here, the task service does that.
//!
//! # Configuration
//! - `DAILY_TODO_PORT`: listen port, default `8080`
//! - `DAILY_TODO_DIST`: frontend bundle directory, default `dist`
//! - `RUST_LOG`: tracing filter, default `info`

use tokio::{net::TcpListener, signal::ctrl_c};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

pub mod config;
pub mod error;
pub mod routes;

use config::ServerConfig;
use error::ServerError;

pub async fn start_server() -> Result<(), ServerError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    let config = ServerConfig::load()?;
    info!("Serving frontend from {}", config.dist_dir.display());

    let app = routes::router(&config.dist_dir);

    let address = format!("0.0.0.0:{}", config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| ServerError::Bind {
            address: address.clone(),
            source,
        })?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if ctrl_c().await.is_ok() {
            info!("Received Ctrl+C, shutting down");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
