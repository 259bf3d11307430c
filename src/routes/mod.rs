// ABOUTME: Route module organization for the Macrolens HTTP surface
// ABOUTME: Provides route definitions organized by domain with thin handlers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macrolens Nutrition

//! Route module for the Macrolens gateway
//!
//! Each domain module contains only route definitions and thin handler
//! functions that delegate to the service layer.

/// Meal photo analysis endpoint
pub mod analyze;
/// Health check and system status routes
pub mod health;

/// Analysis route handlers
pub use analyze::AnalyzeRoutes;
/// Analysis request payload
pub use analyze::AnalyzeRequest;
/// Health check route handlers
pub use health::HealthRoutes;
