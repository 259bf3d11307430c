// ABOUTME: System prompts for LLM interactions loaded at compile time
// ABOUTME: Provides the nutrition analysis instruction and the fixed user turn
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macrolens Nutrition

//! # System Prompts
//!
//! Prompts are loaded at compile time from markdown files for easy
//! maintenance. The instruction text is part of the gateway's contract with
//! the upstream model: changing it changes the reply shape the extractor
//! depends on.

/// Nutrition analysis system instruction
///
/// Directs the model to identify visible foods, estimate quantities in
/// grams/ml, compute protein per item from standard nutrition references,
/// and reply with only the JSON object the gateway parses.
pub const NUTRITION_SYSTEM_PROMPT: &str = include_str!("nutrition_system.md");

/// Fixed user instruction sent with every meal photo
pub const NUTRITION_USER_INSTRUCTION: &str =
    "Analyze this meal photo and estimate the protein content of each visible food item.";

/// Get the system prompt for meal photo analysis
#[must_use]
pub const fn nutrition_system_prompt() -> &'static str {
    NUTRITION_SYSTEM_PROMPT
}
