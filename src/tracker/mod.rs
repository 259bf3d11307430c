// ABOUTME: Session tracker state machine: profile, derived daily state, submission protocol
// ABOUTME: Holds the ordered meal log and recomputes goal, total, progress, and remaining on read
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macrolens Nutrition

//! # Session Tracker
//!
//! Client-side state machine for one tracking session. The tracker owns the
//! user [`Profile`] and the ordered meal history; everything displayed is
//! derived from those two on every read:
//!
//! - `dailyGoal  = round(weightKg × multiplier(goal))`
//! - `dailyTotal = Σ meal.totalProtein`
//! - `progress   = min(dailyTotal / dailyGoal × 100, 100)`
//! - `remaining  = max(dailyGoal − dailyTotal, 0)`
//!
//! Derived values are never stored, so they cannot diverge from their
//! inputs. State lives for one process lifetime; nothing is persisted.
//!
//! Submissions are single-flight: the tracker holds an explicit in-flight
//! slot and rejects a second submission while one is pending, so the append
//! order of the meal log is never ambiguous.

mod client;
mod image;

pub use client::AnalysisClient;
pub use image::encode_data_uri;

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::GoalConfig;
use crate::errors::{AppError, AppResult};
use crate::models::{FitnessGoal, MealAnalysis, NutritionAnalysis, Profile};

/// Session tracker holding profile and meal history for one session
#[derive(Debug)]
pub struct SessionTracker {
    profile: Profile,
    goals: GoalConfig,
    meal_history: Vec<MealAnalysis>,
    pending_image: Option<PathBuf>,
    in_flight: bool,
}

impl SessionTracker {
    /// Create a tracker for the given profile and goal configuration
    #[must_use]
    pub const fn new(profile: Profile, goals: GoalConfig) -> Self {
        Self {
            profile,
            goals,
            meal_history: Vec::new(),
            pending_image: None,
            in_flight: false,
        }
    }

    /// Current profile
    #[must_use]
    pub const fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Update body weight; the daily goal follows on the next read
    ///
    /// # Errors
    ///
    /// Returns a validation error if the weight is outside [30, 200] kg.
    pub fn set_weight(&mut self, weight_kg: f64) -> AppResult<()> {
        self.profile.set_weight(weight_kg)
    }

    /// Update the fitness goal; the daily goal follows on the next read
    pub fn set_goal(&mut self, goal: FitnessGoal) {
        self.profile.goal = goal;
    }

    /// Daily protein goal in grams, derived from the profile
    #[must_use]
    pub fn daily_goal(&self) -> u32 {
        let grams = self.profile.weight_kg * self.profile.goal.multiplier(&self.goals);
        grams.round() as u32
    }

    /// Total protein logged today in grams, derived from the meal history
    #[must_use]
    pub fn daily_total(&self) -> u32 {
        self.meal_history.iter().map(|meal| meal.total_protein).sum()
    }

    /// Progress toward the daily goal as a percentage, clamped to [0, 100]
    #[must_use]
    pub fn progress_percentage(&self) -> f64 {
        let goal = self.daily_goal();
        if goal == 0 {
            return 0.0;
        }
        (f64::from(self.daily_total()) / f64::from(goal) * 100.0).min(100.0)
    }

    /// Protein still to eat today in grams, clamped to zero
    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.daily_goal().saturating_sub(self.daily_total())
    }

    /// Ordered meal history, oldest first
    #[must_use]
    pub fn meal_history(&self) -> &[MealAnalysis] {
        &self.meal_history
    }

    /// Whether a submission is currently pending
    #[must_use]
    pub const fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Select an image for the next submission, replacing any prior selection
    pub fn select_image(&mut self, path: impl Into<PathBuf>) {
        self.pending_image = Some(path.into());
    }

    /// Currently selected image, if any
    #[must_use]
    pub fn pending_image(&self) -> Option<&Path> {
        self.pending_image.as_deref()
    }

    /// Submit the selected image for analysis and append the result
    ///
    /// The full submission protocol: requires a selected image and a
    /// non-empty credential before any request is made, encodes the image
    /// losslessly as a data URI, invokes the gateway exactly once, and on
    /// success appends a timestamped [`MealAnalysis`]. On any failure the
    /// meal history is left unchanged. A second submission while one is
    /// pending is rejected.
    ///
    /// # Errors
    ///
    /// Validation errors for a busy in-flight slot, missing selection,
    /// empty credential, or an unreadable image file; otherwise whatever
    /// the gateway reported.
    pub async fn submit_selected(
        &mut self,
        client: &AnalysisClient,
        api_key: &str,
    ) -> AppResult<MealAnalysis> {
        if self.in_flight {
            return Err(AppError::invalid_input(
                "An analysis is already in progress",
            ));
        }
        let path = self.pending_image.clone().ok_or_else(|| {
            AppError::invalid_input("Select a meal photo before analyzing")
        })?;
        if api_key.trim().is_empty() {
            return Err(AppError::invalid_input("An API key is required"));
        }

        let data_uri = encode_data_uri(&path)?;

        // Slot stays taken for the duration of the gateway call; cleared on
        // both outcomes before the result is inspected.
        self.in_flight = true;
        let result = client.analyze(&data_uri, api_key).await;
        self.in_flight = false;

        Ok(self.record_meal(result?))
    }

    /// Append a completed analysis to the meal log with a fresh timestamp
    ///
    /// This is the append step of the submission protocol, split out so a
    /// result obtained elsewhere (or entered manually) can be logged too.
    pub fn record_meal(&mut self, analysis: NutritionAnalysis) -> MealAnalysis {
        let meal = MealAnalysis::from_analysis(analysis);
        debug!(meal_id = %meal.id, total_protein = meal.total_protein, "Meal appended");
        self.meal_history.push(meal.clone());
        meal
    }

    /// Start a fresh day: clears the meal history and any pending
    /// selection, leaving the profile untouched
    pub fn reset_day(&mut self) {
        self.meal_history.clear();
        self.pending_image = None;
    }
}
