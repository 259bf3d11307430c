// ABOUTME: Meal photo analysis: upstream relay, prompt assembly, and reply extraction
// ABOUTME: Turns an image plus credential into a typed nutrition result
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macrolens Nutrition

//! Meal photo analysis
//!
//! The [`MealAnalyzer`] performs exactly one upstream model call per
//! invocation and parses the free-text reply with the brace-depth scanner
//! in [`extract`]. No retries, no caching: an identical image re-queries
//! the model, and the caller decides whether to retry after a failure.

mod extract;
mod gateway;

pub use extract::{extract_nutrition, find_json_object};
pub use gateway::MealAnalyzer;
