// ABOUTME: HTTP server assembly: router composition, middleware layers, and serving
// ABOUTME: Binds the gateway routes behind trace, CORS, timeout, and body-limit layers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macrolens Nutrition

//! Gateway server assembly and lifecycle

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    limit::RequestBodyLimitLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use tracing::info;

use crate::analysis::MealAnalyzer;
use crate::config::ServerConfig;
use crate::constants::limits;
use crate::errors::{AppError, AppResult};
use crate::middleware::setup_cors;
use crate::routes::{AnalyzeRoutes, HealthRoutes};

/// The Macrolens gateway server
pub struct GatewayServer {
    config: Arc<ServerConfig>,
}

impl GatewayServer {
    /// Create a server from configuration
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Assemble the full router with middleware layers
    ///
    /// The body limit is sized for base64-encoded photos; the timeout
    /// covers the inbound request including the upstream model call.
    ///
    /// # Errors
    ///
    /// Returns an error if the analyzer's HTTP client fails to initialize.
    pub fn router(&self) -> AppResult<Router> {
        let analyzer = Arc::new(MealAnalyzer::new(self.config.llm.clone())?);

        Ok(Router::new()
            .merge(AnalyzeRoutes::routes(analyzer))
            .merge(HealthRoutes::routes())
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(RequestBodyLimitLayer::new(limits::MAX_REQUEST_BODY_BYTES))
                    .layer(setup_cors(&self.config))
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        limits::REQUEST_TIMEOUT_SECS,
                    ))),
            ))
    }

    /// Bind and serve until the process exits
    ///
    /// # Errors
    ///
    /// Returns an error if binding the port or serving fails.
    pub async fn run(&self) -> AppResult<()> {
        let router = self.router()?;
        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.http_port));

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

        info!("Gateway listening on {addr}");

        axum::serve(listener, router)
            .await
            .map_err(|e| AppError::internal(format!("Server error: {e}")))
    }
}
