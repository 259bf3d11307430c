// ABOUTME: LLM provider abstraction layer for vision-capable chat-completion APIs
// ABOUTME: Defines the provider contract, message parts with inline images, and capabilities
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macrolens Nutrition

//! # LLM Provider Service Provider Interface
//!
//! This module defines the contract a vision model provider must implement
//! to serve the analysis gateway. Messages carry a list of parts so a user
//! turn can combine instruction text with an inline image.
//!
//! ## Key Concepts
//!
//! - **`LlmCapabilities`**: bitflags describing provider features
//! - **`LlmProvider`**: async trait for one-shot chat completion
//! - **`ChatMessage`/`MessagePart`**: role-based messages with text and
//!   inline image parts
//!
//! ## Example: Using a Provider
//!
//! ```rust,no_run
//! use macrolens::llm::{ChatMessage, ChatRequest, LlmProvider};
//!
//! async fn example(provider: &dyn LlmProvider) {
//!     let messages = vec![
//!         ChatMessage::system("You are a nutrition analyst."),
//!         ChatMessage::user_with_image("What is in this meal?", "data:image/png;base64,..."),
//!     ];
//!     let response = provider.complete(&ChatRequest::new(messages)).await;
//! }
//! ```

mod openai;
pub mod prompts;

pub use openai::OpenAiVisionProvider;
pub use prompts::{nutrition_system_prompt, NUTRITION_USER_INSTRUCTION};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

// ============================================================================
// Capability Flags
// ============================================================================

bitflags::bitflags! {
    /// LLM provider capability flags
    ///
    /// Indicates which features a provider supports. The gateway requires
    /// vision input; the other flags inform request construction.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct LlmCapabilities: u8 {
        /// Provider supports vision/image input
        const VISION = 0b0000_0001;
        /// Provider supports JSON mode output
        const JSON_MODE = 0b0000_0010;
        /// Provider supports system messages
        const SYSTEM_MESSAGES = 0b0000_0100;
    }
}

impl LlmCapabilities {
    /// Capabilities for a vision-capable chat provider
    #[must_use]
    pub const fn vision_chat() -> Self {
        Self::VISION
            .union(Self::JSON_MODE)
            .union(Self::SYSTEM_MESSAGES)
    }

    /// Check if vision input is supported
    #[must_use]
    pub const fn supports_vision(&self) -> bool {
        self.contains(Self::VISION)
    }

    /// Check if system messages are supported
    #[must_use]
    pub const fn supports_system_messages(&self) -> bool {
        self.contains(Self::SYSTEM_MESSAGES)
    }
}

// ============================================================================
// Message Types
// ============================================================================

/// Role of a message in the conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System instruction message
    System,
    /// User input message
    User,
    /// Assistant response message
    Assistant,
}

impl MessageRole {
    /// Convert to string representation for API calls
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// One part of a message: instruction text or an inline image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessagePart {
    /// Plain text content
    Text(String),
    /// Inline image as a data URI (or https URL for remote images)
    ImageUrl(String),
}

/// A single message in a chat conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message sender
    pub role: MessageRole,
    /// Ordered message parts
    pub parts: Vec<MessagePart>,
}

impl ChatMessage {
    /// Create a message with explicit parts
    #[must_use]
    pub const fn new(role: MessageRole, parts: Vec<MessagePart>) -> Self {
        Self { role, parts }
    }

    /// Create a text-only system message
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, vec![MessagePart::Text(content.into())])
    }

    /// Create a text-only user message
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, vec![MessagePart::Text(content.into())])
    }

    /// Create a user message combining instruction text with an inline image
    #[must_use]
    pub fn user_with_image(content: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self::new(
            MessageRole::User,
            vec![
                MessagePart::Text(content.into()),
                MessagePart::ImageUrl(image_url.into()),
            ],
        )
    }

    /// Create a text-only assistant message
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(
            MessageRole::Assistant,
            vec![MessagePart::Text(content.into())],
        )
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Configuration for a chat completion request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Conversation messages
    pub messages: Vec<ChatMessage>,
    /// Model identifier (provider-specific); provider default if `None`
    pub model: Option<String>,
    /// Temperature for response randomness
    pub temperature: Option<f32>,
    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,
}

impl ChatRequest {
    /// Create a new chat request with messages
    #[must_use]
    pub const fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            model: None,
            temperature: None,
            max_tokens: None,
        }
    }

    /// Set the model to use
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the temperature
    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the maximum tokens
    #[must_use]
    pub const fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// Response from a chat completion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Generated message content
    pub content: String,
    /// Model used for generation
    pub model: String,
    /// Token usage statistics
    pub usage: Option<TokenUsage>,
    /// Finish reason (stop, length, etc.)
    pub finish_reason: Option<String>,
}

/// Token usage statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Number of tokens in the prompt
    pub prompt_tokens: u32,
    /// Number of tokens in the completion
    pub completion_tokens: u32,
    /// Total tokens used
    pub total_tokens: u32,
}

// ============================================================================
// Provider Trait
// ============================================================================

/// LLM provider trait for one-shot chat completion
///
/// Implement this trait to route the gateway through a different vision
/// model API. The gateway performs exactly one completion per analysis —
/// no streaming, no retries.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Unique provider identifier (e.g. "openai")
    fn name(&self) -> &'static str;

    /// Human-readable display name for the provider
    fn display_name(&self) -> &'static str;

    /// Provider capabilities
    fn capabilities(&self) -> LlmCapabilities;

    /// Default model used when the request names none
    fn default_model(&self) -> &str;

    /// Perform a chat completion
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError>;
}
