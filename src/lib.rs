// ABOUTME: Main library entry point for the Macrolens nutrition platform
// ABOUTME: Provides the meal photo analysis gateway and the session tracking client
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macrolens Nutrition

#![deny(unsafe_code)]

//! # Macrolens
//!
//! Macrolens turns a photo of a meal into a structured protein estimate.
//! An HTTP gateway relays the image to a vision-capable chat-completion
//! model, parses the free-text reply into typed nutrition data, and a
//! session tracker accumulates results against a daily protein goal
//! derived from body weight and fitness goal.
//!
//! ## Components
//!
//! - **Analysis Gateway** (`macrolens-server`): a single `POST /api/analyze`
//!   endpoint accepting a data-URI image plus a caller-supplied credential,
//!   returning `{ foods, totalProtein }` or `{ error }`.
//! - **Session Tracker** (`macrolens-cli`): holds the user profile, derives
//!   the daily goal, submits photos to the gateway, and reports progress.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use macrolens::config::ServerConfig;
//! use macrolens::errors::AppResult;
//!
//! fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Macrolens gateway configured on port {}", config.http_port);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **llm**: provider abstraction for vision chat-completion APIs
//! - **analysis**: prompt assembly, upstream relay, and reply extraction
//! - **tracker**: profile, derived daily state, and submission protocol
//! - **routes / server**: HTTP surface and middleware assembly

/// Meal photo analysis: upstream relay and reply extraction
pub mod analysis;

/// Environment-driven configuration management
pub mod config;

/// Application constants and configuration defaults
pub mod constants;

/// Unified error handling with HTTP response mapping
pub mod errors;

/// LLM provider abstraction for vision chat-completion APIs
pub mod llm;

/// Structured logging configuration
pub mod logging;

/// Middleware for the HTTP surface (CORS)
pub mod middleware;

/// Core data models (food items, meals, profile, daily state)
pub mod models;

/// HTTP routes organized by domain
pub mod routes;

/// HTTP server assembly and lifecycle
pub mod server;

/// Session tracking: profile, goal derivation, and meal history
pub mod tracker;
