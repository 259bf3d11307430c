// ABOUTME: Middleware for the Macrolens HTTP surface
// ABOUTME: Currently CORS; tracing and limits are composed in the server assembly
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macrolens Nutrition

//! HTTP middleware

/// CORS configuration for web clients
pub mod cors;

pub use cors::setup_cors;
