// ABOUTME: Analysis gateway service: validates input, relays to the model, parses the reply
// ABOUTME: One upstream call per invocation with the caller-supplied credential
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macrolens Nutrition

//! Meal analysis gateway service
//!
//! Sits between the HTTP route and the LLM provider: validates field
//! presence, assembles the fixed prompt, performs a single completion with
//! the caller's credential, and extracts the typed nutrition result.

use reqwest::Client;
use tracing::{info, instrument};

use super::extract::extract_nutrition;
use crate::config::LlmApiConfig;
use crate::errors::{AppError, AppResult};
use crate::llm::{
    nutrition_system_prompt, ChatMessage, ChatRequest, LlmProvider, OpenAiVisionProvider,
    NUTRITION_USER_INSTRUCTION,
};
use crate::models::NutritionAnalysis;

/// Meal photo analyzer: the gateway's service layer
///
/// Holds the shared outbound HTTP client and the upstream API
/// configuration. The model credential is never stored here — it arrives
/// with each request and lives only for that call.
#[derive(Debug, Clone)]
pub struct MealAnalyzer {
    client: Client,
    config: LlmApiConfig,
}

impl MealAnalyzer {
    /// Create an analyzer for the given upstream configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn new(config: LlmApiConfig) -> AppResult<Self> {
        let client = OpenAiVisionProvider::build_client(&config)?;
        Ok(Self { client, config })
    }

    /// Analyze one meal photo
    ///
    /// Validates that both the image and the credential are present and
    /// non-empty, then performs exactly one upstream completion. The
    /// returned `totalProtein` is whatever the model reported; it is not
    /// checked against the per-item sum.
    ///
    /// # Errors
    ///
    /// - Validation error (400) naming the missing field when `image` or
    ///   `api_key` is absent or empty.
    /// - Upstream error (500) for transport/auth/rate-limit failures, with
    ///   the upstream message passed through.
    /// - Upstream-format error (500) when the reply contains no parseable
    ///   nutrition object.
    #[instrument(skip_all)]
    pub async fn analyze(
        &self,
        image: Option<String>,
        api_key: Option<String>,
    ) -> AppResult<NutritionAnalysis> {
        let image = require_field(image, "image")?;
        let api_key = require_field(api_key, "apiKey")?;

        let messages = vec![
            ChatMessage::system(nutrition_system_prompt()),
            ChatMessage::user_with_image(NUTRITION_USER_INSTRUCTION, image),
        ];
        let request =
            ChatRequest::new(messages).with_max_tokens(self.config.max_output_tokens);

        let provider = OpenAiVisionProvider::new(self.client.clone(), api_key, &self.config);
        let response = provider.complete(&request).await?;

        let analysis = extract_nutrition(&response.content)?;
        info!(
            foods = analysis.foods.len(),
            total_protein = analysis.total_protein,
            "Meal analysis complete"
        );
        Ok(analysis)
    }
}

/// Require a present, non-empty field value
fn require_field(value: Option<String>, name: &str) -> AppResult<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::missing_field(name)),
    }
}
