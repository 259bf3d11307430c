// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides quiet logging, test configuration, and a mock upstream model server
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macrolens Nutrition

#![allow(dead_code)]

//! Shared test utilities for `macrolens`
//!
//! The mock upstream is an axum router speaking just enough of the
//! OpenAI-compatible wire format to exercise the gateway end to end on an
//! ephemeral local port.

use std::sync::Once;

use axum::http::StatusCode;
use axum::{routing::post, Json, Router};
use serde_json::json;

use macrolens::config::{GoalConfig, LlmApiConfig, ServerConfig};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Server configuration pointed at a (mock) upstream base URL
pub fn test_server_config(upstream_base_url: &str) -> ServerConfig {
    init_test_logging();
    ServerConfig {
        http_port: 0,
        cors_allowed_origins: "*".to_owned(),
        llm: LlmApiConfig {
            base_url: upstream_base_url.trim_end_matches('/').to_owned(),
            model: "mock-vision".to_owned(),
            max_output_tokens: 1000,
            request_timeout_secs: 10,
            connect_timeout_secs: 5,
        },
        goals: GoalConfig::default(),
    }
}

/// Serve a router on an ephemeral local port, returning its base URL
pub async fn spawn_router(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    format!("http://{addr}")
}

/// Spawn a mock upstream that replies to every completion with `reply_text`
/// as the assistant message content
pub async fn spawn_mock_upstream(reply_text: &str) -> String {
    let reply = reply_text.to_owned();
    let app = Router::new().route(
        "/chat/completions",
        post(move || {
            let reply = reply.clone();
            async move {
                Json(json!({
                    "id": "chatcmpl-test",
                    "model": "mock-vision",
                    "choices": [{
                        "index": 0,
                        "message": { "role": "assistant", "content": reply },
                        "finish_reason": "stop"
                    }],
                    "usage": {
                        "prompt_tokens": 100,
                        "completion_tokens": 50,
                        "total_tokens": 150
                    }
                }))
            }
        }),
    );
    spawn_router(app).await
}

/// Spawn a mock upstream that fails every completion with the given status
/// and an OpenAI-shaped error body
pub async fn spawn_mock_upstream_error(status: u16, message: &str) -> String {
    let message = message.to_owned();
    let app = Router::new().route(
        "/chat/completions",
        post(move || {
            let message = message.clone();
            async move {
                (
                    StatusCode::from_u16(status).expect("valid status"),
                    Json(json!({ "error": { "message": message, "type": "test_error" } })),
                )
            }
        }),
    );
    spawn_router(app).await
}
