// ABOUTME: HTTP client for the analysis gateway endpoint
// ABOUTME: Decodes success bodies into typed nutrition results and {error} bodies into AppError
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macrolens Nutrition

//! Gateway client
//!
//! Thin typed wrapper over `POST /api/analyze`. Gateway error bodies are
//! the flat `{ "error": string }` shape; a 400 becomes a validation error
//! the user can correct, anything else an upstream error.

use reqwest::Client;
use serde_json::json;

use crate::errors::{AppError, AppResult, ErrorResponse};
use crate::models::NutritionAnalysis;

/// Typed client for the analysis gateway
#[derive(Debug, Clone)]
pub struct AnalysisClient {
    client: Client,
    base_url: String,
}

impl AnalysisClient {
    /// Create a client for a gateway at `base_url`
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        }
    }

    /// Submit one encoded image for analysis
    ///
    /// # Errors
    ///
    /// Returns the gateway's error message: a validation error for 400
    /// responses, an upstream error otherwise (including transport
    /// failures reaching the gateway itself).
    pub async fn analyze(
        &self,
        image_data_uri: &str,
        api_key: &str,
    ) -> AppResult<NutritionAnalysis> {
        let url = format!("{}/api/analyze", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&json!({ "image": image_data_uri, "apiKey": api_key }))
            .send()
            .await
            .map_err(|e| AppError::upstream(format!("Gateway request failed: {e}")))?;

        let status = response.status();
        if status.is_success() {
            return response.json::<NutritionAnalysis>().await.map_err(|e| {
                AppError::upstream(format!("Failed to decode gateway response: {e}"))
            });
        }

        let message = response
            .json::<ErrorResponse>()
            .await
            .map_or_else(|_| format!("Gateway returned status {status}"), |body| body.error);

        if status.as_u16() == 400 {
            Err(AppError::invalid_input(message))
        } else {
            Err(AppError::upstream(message))
        }
    }
}
