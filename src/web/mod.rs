//! Axum-based web server for the single-page review UI.
//!
//! Module structure:
//! - `state` - application state shared by handlers
//! - `routes` - route definitions
//! - `handlers` - request handlers (page, review API, health)

pub mod handlers;
pub mod routes;
pub mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::config::AppConfig;
use crate::error::{RefineError, Result};
use crate::llm::LLMProvider;
use state::AppState;

pub struct WebServer {
    state: AppState,
}

impl WebServer {
    pub fn new(provider: Arc<dyn LLMProvider>, config: AppConfig) -> Self {
        Self {
            state: AppState::new(provider, config),
        }
    }

    pub async fn run(self, bind: &str, port: u16) -> Result<()> {
        let addr = parse_bind_address(bind, port)?;

        let app = routes::create_router(self.state);

        tracing::info!("Starting web server on http://{}", addr);

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| RefineError::Other(format!("Failed to bind {}: {}", addr, e)))?;

        axum::serve(listener, app)
            .await
            .map_err(|e| RefineError::Other(format!("Server error: {}", e)))?;

        Ok(())
    }
}

fn parse_bind_address(bind: &str, port: u16) -> Result<SocketAddr> {
    let ip = bind
        .parse()
        .map_err(|_| RefineError::InvalidInput(format!("Invalid bind address: {}", bind)))?;
    Ok(SocketAddr::new(ip, port))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bind_address() {
        let addr = parse_bind_address("127.0.0.1", 8787).unwrap();
        assert_eq!(addr.to_string(), "127.0.0.1:8787");

        let addr = parse_bind_address("0.0.0.0", 80).unwrap();
        assert_eq!(addr.to_string(), "0.0.0.0:80");
    }

    #[test]
    fn test_parse_bind_address_invalid() {
        assert!(parse_bind_address("not-an-ip", 8787).is_err());
    }
}
