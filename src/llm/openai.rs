// ABOUTME: OpenAI-compatible vision chat-completion provider over HTTPS
// ABOUTME: Sends inline data-URI images and surfaces upstream errors verbatim
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macrolens Nutrition

//! # `OpenAI`-Compatible Vision Provider
//!
//! Implementation of the [`LlmProvider`] trait against any `OpenAI`-compatible
//! `/chat/completions` endpoint with vision support. The credential is
//! supplied per instance by the caller of the gateway — the server never
//! holds one of its own.
//!
//! The base URL is configuration, so the same provider serves the hosted
//! `OpenAI` API, a compatible proxy, or a local mock in tests.

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use super::{
    ChatMessage, ChatRequest, ChatResponse, LlmCapabilities, LlmProvider, MessagePart, TokenUsage,
};
use crate::config::LlmApiConfig;
use crate::errors::{AppError, ErrorCode};

// ============================================================================
// API Request/Response Types (OpenAI-compatible format)
// ============================================================================

/// OpenAI-compatible API request structure
#[derive(Debug, Serialize)]
struct OpenAiRequest {
    model: String,
    messages: Vec<OpenAiMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

/// Message structure; content is a plain string or a list of typed parts
#[derive(Debug, Serialize)]
struct OpenAiMessage {
    role: String,
    content: OpenAiContent,
}

/// Message content: text-only messages serialize as a bare string,
/// multimodal messages as an array of typed parts
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum OpenAiContent {
    Text(String),
    Parts(Vec<OpenAiContentPart>),
}

/// Typed content part for multimodal messages
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum OpenAiContentPart {
    Text {
        text: String,
    },
    ImageUrl {
        image_url: OpenAiImageUrl,
    },
}

/// Image reference wrapper
#[derive(Debug, Serialize)]
struct OpenAiImageUrl {
    url: String,
}

impl From<&ChatMessage> for OpenAiMessage {
    fn from(msg: &ChatMessage) -> Self {
        let content = match msg.parts.as_slice() {
            [MessagePart::Text(text)] => OpenAiContent::Text(text.clone()),
            parts => OpenAiContent::Parts(
                parts
                    .iter()
                    .map(|part| match part {
                        MessagePart::Text(text) => OpenAiContentPart::Text { text: text.clone() },
                        MessagePart::ImageUrl(url) => OpenAiContentPart::ImageUrl {
                            image_url: OpenAiImageUrl { url: url.clone() },
                        },
                    })
                    .collect(),
            ),
        };
        Self {
            role: msg.role.as_str().to_owned(),
            content,
        }
    }
}

/// OpenAI-compatible API response structure
#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    choices: Vec<OpenAiChoice>,
    #[serde(default)]
    usage: Option<OpenAiUsage>,
    model: String,
}

/// Choice in response
#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiResponseMessage,
    finish_reason: Option<String>,
}

/// Message in response
#[derive(Debug, Deserialize)]
struct OpenAiResponseMessage {
    content: Option<String>,
}

/// Usage statistics in response
#[derive(Debug, Deserialize)]
struct OpenAiUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

/// Error response structure
#[derive(Debug, Deserialize)]
struct OpenAiErrorResponse {
    error: OpenAiErrorDetail,
}

/// Error detail structure
#[derive(Debug, Deserialize)]
struct OpenAiErrorDetail {
    message: String,
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// `OpenAI`-compatible vision provider bound to one caller-supplied credential
pub struct OpenAiVisionProvider {
    client: Client,
    api_key: String,
    base_url: String,
    default_model: String,
}

impl OpenAiVisionProvider {
    /// Create a provider from a shared HTTP client, a caller-supplied
    /// credential, and the upstream API configuration
    #[must_use]
    pub fn new(client: Client, api_key: impl Into<String>, config: &LlmApiConfig) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url: config.base_url.clone(),
            default_model: config.model.clone(),
        }
    }

    /// Build an HTTP client with the timeouts from `config`
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend fails to initialize.
    pub fn build_client(config: &LlmApiConfig) -> Result<Client, AppError> {
        Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {e}")))
    }

    /// Convert a chat request to the OpenAI wire format
    fn build_api_request(&self, request: &ChatRequest) -> OpenAiRequest {
        OpenAiRequest {
            model: request
                .model
                .clone()
                .unwrap_or_else(|| self.default_model.clone()),
            messages: request.messages.iter().map(OpenAiMessage::from).collect(),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        }
    }

    /// Map an upstream error status to an application error
    ///
    /// The upstream message is passed through verbatim so the caller sees
    /// exactly what the model provider reported (invalid key, quota, etc.).
    fn map_api_error(status: u16, response_text: &str) -> AppError {
        let message = serde_json::from_str::<OpenAiErrorResponse>(response_text)
            .map_or_else(|_| response_text.to_owned(), |r| r.error.message);

        match status {
            429 => AppError::new(ErrorCode::ExternalRateLimited, message),
            _ => AppError::upstream(message),
        }
    }

    /// Extract the assistant text from a parsed response
    fn extract_content(response: &OpenAiResponse) -> Result<String, AppError> {
        response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| AppError::upstream("Upstream reply contained no content"))
    }
}

#[async_trait]
impl LlmProvider for OpenAiVisionProvider {
    fn name(&self) -> &'static str {
        "openai"
    }

    fn display_name(&self) -> &'static str {
        "OpenAI-compatible"
    }

    fn capabilities(&self) -> LlmCapabilities {
        LlmCapabilities::vision_chat()
    }

    fn default_model(&self) -> &str {
        &self.default_model
    }

    #[instrument(skip(self, request), fields(model = %request.model.as_deref().unwrap_or(&self.default_model)))]
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        let url = format!("{}/chat/completions", self.base_url);
        let api_request = self.build_api_request(request);

        debug!("Sending completion request to upstream model");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&api_request)
            .send()
            .await
            .map_err(|e| AppError::upstream(format!("Upstream request failed: {e}")))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|e| AppError::upstream(format!("Failed to read upstream response: {e}")))?;

        if !status.is_success() {
            error!(status = %status, "Upstream model API error");
            return Err(Self::map_api_error(status.as_u16(), &response_text));
        }

        let api_response: OpenAiResponse = serde_json::from_str(&response_text).map_err(|e| {
            error!(error = %e, "Failed to parse upstream response envelope");
            AppError::upstream(format!("Failed to parse upstream response: {e}"))
        })?;

        let content = Self::extract_content(&api_response)?;
        let finish_reason = api_response
            .choices
            .first()
            .and_then(|choice| choice.finish_reason.clone());
        let usage = api_response.usage.map(|u| TokenUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });

        debug!("Received upstream completion");

        Ok(ChatResponse {
            content,
            model: api_response.model,
            usage,
            finish_reason,
        })
    }
}

impl Debug for OpenAiVisionProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("OpenAiVisionProvider")
            .field("base_url", &self.base_url)
            .field("default_model", &self.default_model)
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MessageRole;

    #[test]
    fn test_text_only_message_serializes_as_string() {
        let msg = OpenAiMessage::from(&ChatMessage::system("be brief"));
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "system");
        assert_eq!(json["content"], "be brief");
    }

    #[test]
    fn test_image_message_serializes_as_parts() {
        let msg = OpenAiMessage::from(&ChatMessage::user_with_image(
            "analyze",
            "data:image/jpeg;base64,AAAA",
        ));
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["content"][0]["type"], "text");
        assert_eq!(json["content"][1]["type"], "image_url");
        assert_eq!(
            json["content"][1]["image_url"]["url"],
            "data:image/jpeg;base64,AAAA"
        );
    }

    #[test]
    fn test_map_api_error_passes_message_through() {
        let body = r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error"}}"#;
        let error = OpenAiVisionProvider::map_api_error(401, body);
        assert_eq!(error.code, ErrorCode::ExternalServiceError);
        assert_eq!(error.message, "Incorrect API key provided");
    }

    #[test]
    fn test_map_api_error_rate_limit() {
        let body = r#"{"error":{"message":"Rate limit reached"}}"#;
        let error = OpenAiVisionProvider::map_api_error(429, body);
        assert_eq!(error.code, ErrorCode::ExternalRateLimited);
    }

    #[test]
    fn test_debug_redacts_credential() {
        let config = LlmApiConfig::default();
        let provider =
            OpenAiVisionProvider::new(Client::new(), "sk-secret", &config);
        let debug = format!("{provider:?}");
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_roles_round_trip() {
        for role in [MessageRole::System, MessageRole::User, MessageRole::Assistant] {
            let msg = OpenAiMessage::from(&ChatMessage::new(
                role,
                vec![MessagePart::Text("x".to_owned())],
            ));
            assert_eq!(msg.role, role.as_str());
        }
    }
}
