// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses env vars into typed server, upstream API, and goal configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macrolens Nutrition

//! Environment-based configuration management
//!
//! All runtime configuration is environment-driven; defaults live in
//! [`crate::constants`]. The caller-supplied model credential is never part
//! of server configuration — it arrives per request.

use std::env;

use serde::{Deserialize, Serialize};

use crate::constants::{defaults, env_config, goals};
use crate::errors::{AppError, AppResult};

/// Top-level server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP port the gateway listens on
    pub http_port: u16,
    /// Comma-separated CORS origin allowlist ("*" or empty allows any)
    pub cors_allowed_origins: String,
    /// Upstream vision model API settings
    pub llm: LlmApiConfig,
    /// Daily protein goal derivation settings
    pub goals: GoalConfig,
}

/// Upstream vision model API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmApiConfig {
    /// Base URL of the OpenAI-compatible API (no trailing slash)
    pub base_url: String,
    /// Model identifier sent with every analysis request
    pub model: String,
    /// Output token budget for one analysis
    pub max_output_tokens: u32,
    /// Outbound request timeout in seconds
    pub request_timeout_secs: u64,
    /// Connect timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for LlmApiConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::LLM_BASE_URL.to_owned(),
            model: defaults::LLM_MODEL.to_owned(),
            max_output_tokens: defaults::LLM_MAX_OUTPUT_TOKENS,
            request_timeout_secs: defaults::LLM_REQUEST_TIMEOUT_SECS,
            connect_timeout_secs: defaults::LLM_CONNECT_TIMEOUT_SECS,
        }
    }
}

impl LlmApiConfig {
    /// Load upstream API configuration from the environment
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            base_url: env::var(env_config::LLM_BASE_URL)
                .map(|url| url.trim_end_matches('/').to_owned())
                .unwrap_or_else(|_| defaults::LLM_BASE_URL.to_owned()),
            model: env::var(env_config::LLM_MODEL)
                .unwrap_or_else(|_| defaults::LLM_MODEL.to_owned()),
            max_output_tokens: env::var(env_config::LLM_MAX_OUTPUT_TOKENS)
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults::LLM_MAX_OUTPUT_TOKENS),
            request_timeout_secs: env::var(env_config::LLM_REQUEST_TIMEOUT_SECS)
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults::LLM_REQUEST_TIMEOUT_SECS),
            connect_timeout_secs: defaults::LLM_CONNECT_TIMEOUT_SECS,
        }
    }
}

/// Protein multipliers (grams per kg bodyweight) per fitness goal
///
/// Defaults follow sports-nutrition guidance: a caloric deficit still needs
/// 1.2 g/kg to preserve lean mass, maintenance sits at 1.6 g/kg, and muscle
/// gain targets 2.0 g/kg.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GoalConfig {
    /// Multiplier for a weight-loss goal (g/kg)
    pub lose_g_per_kg: f64,
    /// Multiplier for a maintenance goal (g/kg)
    pub maintain_g_per_kg: f64,
    /// Multiplier for a muscle-gain goal (g/kg)
    pub gain_g_per_kg: f64,
}

impl Default for GoalConfig {
    fn default() -> Self {
        Self {
            lose_g_per_kg: goals::MULTIPLIER_LOSE_G_PER_KG,
            maintain_g_per_kg: goals::MULTIPLIER_MAINTAIN_G_PER_KG,
            gain_g_per_kg: goals::MULTIPLIER_GAIN_G_PER_KG,
        }
    }
}

impl GoalConfig {
    /// Load goal configuration from the environment
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            lose_g_per_kg: env::var(env_config::GOAL_MULTIPLIER_LOSE)
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(goals::MULTIPLIER_LOSE_G_PER_KG),
            maintain_g_per_kg: env::var(env_config::GOAL_MULTIPLIER_MAINTAIN)
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(goals::MULTIPLIER_MAINTAIN_G_PER_KG),
            gain_g_per_kg: env::var(env_config::GOAL_MULTIPLIER_GAIN)
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(goals::MULTIPLIER_GAIN_G_PER_KG),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a set variable fails to parse into its typed
    /// form (an unset variable falls back to its default).
    pub fn from_env() -> AppResult<Self> {
        let http_port = match env::var(env_config::HTTP_PORT) {
            Ok(value) => value.parse::<u16>().map_err(|e| {
                AppError::config(format!(
                    "Invalid {}: {e}",
                    env_config::HTTP_PORT
                ))
            })?,
            Err(_) => defaults::HTTP_PORT,
        };

        Ok(Self {
            http_port,
            cors_allowed_origins: env::var(env_config::CORS_ALLOWED_ORIGINS)
                .unwrap_or_else(|_| "*".to_owned()),
            llm: LlmApiConfig::from_env(),
            goals: GoalConfig::from_env(),
        })
    }

    /// One-line configuration summary for startup logging
    ///
    /// Never includes credentials; the model credential is per-request and
    /// the server holds none of its own.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "port={} upstream={} model={} max_output_tokens={}",
            self.http_port, self.llm.base_url, self.llm.model, self.llm.max_output_tokens
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_goal_multipliers() {
        let config = GoalConfig::default();
        assert!((config.lose_g_per_kg - 1.2).abs() < f64::EPSILON);
        assert!((config.maintain_g_per_kg - 1.6).abs() < f64::EPSILON);
        assert!((config.gain_g_per_kg - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_summary_has_no_secrets() {
        let config = ServerConfig {
            http_port: 8081,
            cors_allowed_origins: "*".to_owned(),
            llm: LlmApiConfig::default(),
            goals: GoalConfig::default(),
        };
        let summary = config.summary();
        assert!(summary.contains("8081"));
        assert!(summary.contains(defaults::LLM_MODEL));
    }
}
