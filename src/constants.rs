// ABOUTME: Application constants and configuration defaults organized by domain
// ABOUTME: Single source of truth for env var names, ports, limits, and goal multipliers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macrolens Nutrition

//! Application constants and configuration defaults
//!
//! Values here are the compiled-in defaults; most can be overridden through
//! the environment variables named in [`env_config`].

/// Service identity used in logs and startup banners
pub mod service {
    /// Canonical service name
    pub const NAME: &str = "macrolens";
}

/// Environment variable names recognized by [`crate::config`]
pub mod env_config {
    /// HTTP port for the gateway server
    pub const HTTP_PORT: &str = "MACROLENS_HTTP_PORT";
    /// Comma-separated CORS origin allowlist ("*" for any)
    pub const CORS_ALLOWED_ORIGINS: &str = "CORS_ALLOWED_ORIGINS";
    /// Base URL of the upstream vision model API
    pub const LLM_BASE_URL: &str = "MACROLENS_LLM_BASE_URL";
    /// Model identifier sent to the upstream API
    pub const LLM_MODEL: &str = "MACROLENS_LLM_MODEL";
    /// Output token budget for one analysis
    pub const LLM_MAX_OUTPUT_TOKENS: &str = "MACROLENS_LLM_MAX_OUTPUT_TOKENS";
    /// Outbound request timeout in seconds
    pub const LLM_REQUEST_TIMEOUT_SECS: &str = "MACROLENS_LLM_REQUEST_TIMEOUT_SECS";
    /// Protein multiplier override for the "lose" goal (g/kg)
    pub const GOAL_MULTIPLIER_LOSE: &str = "MACROLENS_GOAL_MULTIPLIER_LOSE";
    /// Protein multiplier override for the "maintain" goal (g/kg)
    pub const GOAL_MULTIPLIER_MAINTAIN: &str = "MACROLENS_GOAL_MULTIPLIER_MAINTAIN";
    /// Protein multiplier override for the "gain" goal (g/kg)
    pub const GOAL_MULTIPLIER_GAIN: &str = "MACROLENS_GOAL_MULTIPLIER_GAIN";
}

/// Compiled-in defaults for server configuration
pub mod defaults {
    /// Default HTTP port for the gateway
    pub const HTTP_PORT: u16 = 8081;
    /// Default upstream API base URL (OpenAI-compatible)
    pub const LLM_BASE_URL: &str = "https://api.openai.com/v1";
    /// Default vision-capable model
    pub const LLM_MODEL: &str = "gpt-4o-mini";
    /// Output token budget capping cost and latency per analysis
    pub const LLM_MAX_OUTPUT_TOKENS: u32 = 1000;
    /// Outbound request timeout (seconds)
    pub const LLM_REQUEST_TIMEOUT_SECS: u64 = 60;
    /// Connect timeout for the upstream API (seconds)
    pub const LLM_CONNECT_TIMEOUT_SECS: u64 = 10;
}

/// Daily protein goal derivation (grams protein per kg bodyweight)
pub mod goals {
    /// Multiplier for a weight-loss goal
    pub const MULTIPLIER_LOSE_G_PER_KG: f64 = 1.2;
    /// Multiplier for a maintenance goal
    pub const MULTIPLIER_MAINTAIN_G_PER_KG: f64 = 1.6;
    /// Multiplier for a muscle-gain goal
    pub const MULTIPLIER_GAIN_G_PER_KG: f64 = 2.0;
}

/// Validation bounds for user profile input
pub mod limits {
    /// Minimum accepted body weight (kg)
    pub const WEIGHT_MIN_KG: f64 = 30.0;
    /// Maximum accepted body weight (kg)
    pub const WEIGHT_MAX_KG: f64 = 200.0;
    /// Request body limit for the gateway; sized for base64-encoded photos
    pub const MAX_REQUEST_BODY_BYTES: usize = 12 * 1024 * 1024;
    /// Inbound request timeout for the gateway (seconds)
    pub const REQUEST_TIMEOUT_SECS: u64 = 90;
}
