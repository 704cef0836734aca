//! HTTP server startup logic.

use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use axum_server::Handle;

use crate::config::AppConfig;

use super::shutdown;

/// Server startup error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    #[error("Invalid http.host or http.port: {0}")]
    InvalidAddress(#[from] std::net::AddrParseError),

    #[error("Server error: {0}")]
    Server(String),
}

/// Parse the configured bind address.
pub fn bind_addr(config: &AppConfig) -> Result<SocketAddr, ServerError> {
    Ok(format!("{}:{}", config.http.host, config.http.port).parse()?)
}

/// Start the HTTP server based on configuration.
///
/// This function blocks until the server shuts down.
pub async fn start_server(app: Router, config: &AppConfig) -> Result<(), ServerError> {
    let addr = bind_addr(config)?;
    let handle = Handle::new();

    tracing::info!(%addr, "Starting HTTP server");

    shutdown::setup_shutdown_handler(
        handle.clone(),
        Duration::from_secs(config.http.shutdown_timeout_seconds),
    );

    axum_server::bind(addr)
        .handle(handle)
        .serve(app.into_make_service())
        .await
        .map_err(|e| match e.kind() {
            std::io::ErrorKind::AddrInUse | std::io::ErrorKind::PermissionDenied => {
                ServerError::Bind(e)
            }
            _ => ServerError::Server(e.to_string()),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_addr_from_config() {
        let config = AppConfig::from_toml("[http]\nhost = \"127.0.0.1\"\nport = 5002\n").unwrap();
        let addr = bind_addr(&config).unwrap();
        assert_eq!(addr, SocketAddr::from(([127, 0, 0, 1], 5002)));
    }

    #[test]
    fn test_bind_addr_rejects_hostname() {
        let config = AppConfig::from_toml("[http]\nhost = \"not a host\"\n").unwrap();
        assert!(matches!(
            bind_addr(&config),
            Err(ServerError::InvalidAddress(_))
        ));
    }
}
