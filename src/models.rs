// ABOUTME: Core data models shared across the gateway and the session tracker
// ABOUTME: Defines food items, nutrition analyses, meals, and the user profile
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macrolens Nutrition

//! Core data models
//!
//! Wire-facing types serialize with camelCase field names to match the
//! gateway contract (`totalProtein`). `FoodItem::protein` is a `u32`, so the
//! "non-negative integer grams" constraint is enforced by the type at
//! deserialization time.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::config::GoalConfig;
use crate::constants::limits;
use crate::errors::{AppError, AppResult};

/// One identified food item with its estimated protein content
///
/// Produced only by the gateway's parse step; immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodItem {
    /// Food name as identified by the model (e.g. "Grilled chicken breast")
    pub name: String,
    /// Estimated quantity, magnitude plus unit (e.g. "150g", "250ml")
    pub quantity: String,
    /// Estimated protein in grams
    pub protein: u32,
}

/// Parsed nutrition result for one meal photo — the gateway success body
///
/// `total_protein` is taken verbatim from the upstream model. It is NOT
/// re-derived from the item list; an arithmetically inconsistent reply
/// propagates unchanged (documented behavior, see DESIGN.md).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutritionAnalysis {
    /// Identified food items in the order the model listed them
    pub foods: Vec<FoodItem>,
    /// Total protein for the meal in grams, as reported upstream
    #[serde(rename = "totalProtein")]
    pub total_protein: u32,
}

/// One completed photo-to-protein analysis in the session log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealAnalysis {
    /// Unique id for this meal entry
    pub id: Uuid,
    /// Identified food items
    pub foods: Vec<FoodItem>,
    /// Total protein for the meal in grams
    #[serde(rename = "totalProtein")]
    pub total_protein: u32,
    /// Client-generated RFC 3339 timestamp; the gateway supplies none
    pub timestamp: String,
}

impl MealAnalysis {
    /// Build a meal entry from a gateway result, stamping it with the
    /// current time
    #[must_use]
    pub fn from_analysis(analysis: NutritionAnalysis) -> Self {
        Self {
            id: Uuid::new_v4(),
            foods: analysis.foods,
            total_protein: analysis.total_protein,
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

/// Fitness goal selecting the protein multiplier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitnessGoal {
    /// Caloric deficit; protein kept high enough to preserve lean mass
    Lose,
    /// Maintenance intake
    Maintain,
    /// Muscle gain
    Gain,
}

impl FitnessGoal {
    /// Protein multiplier for this goal in grams per kg bodyweight
    #[must_use]
    pub const fn multiplier(self, config: &GoalConfig) -> f64 {
        match self {
            Self::Lose => config.lose_g_per_kg,
            Self::Maintain => config.maintain_g_per_kg,
            Self::Gain => config.gain_g_per_kg,
        }
    }
}

impl FromStr for FitnessGoal {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lose" => Ok(Self::Lose),
            "maintain" => Ok(Self::Maintain),
            "gain" => Ok(Self::Gain),
            other => Err(AppError::invalid_input(format!(
                "Unknown fitness goal '{other}' (expected lose, maintain, or gain)"
            ))),
        }
    }
}

impl fmt::Display for FitnessGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lose => write!(f, "lose"),
            Self::Maintain => write!(f, "maintain"),
            Self::Gain => write!(f, "gain"),
        }
    }
}

/// User profile: the only inputs the daily goal derives from
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Profile {
    /// Body weight in kg, validated to [30, 200]
    #[serde(rename = "weightKg")]
    pub weight_kg: f64,
    /// Selected fitness goal
    pub goal: FitnessGoal,
}

impl Profile {
    /// Create a profile, validating the weight range
    ///
    /// # Errors
    ///
    /// Returns a validation error if `weight_kg` is outside [30, 200].
    pub fn new(weight_kg: f64, goal: FitnessGoal) -> AppResult<Self> {
        Self::validate_weight(weight_kg)?;
        Ok(Self { weight_kg, goal })
    }

    /// Update the body weight, validating the range
    ///
    /// # Errors
    ///
    /// Returns a validation error if `weight_kg` is outside [30, 200].
    pub fn set_weight(&mut self, weight_kg: f64) -> AppResult<()> {
        Self::validate_weight(weight_kg)?;
        self.weight_kg = weight_kg;
        Ok(())
    }

    fn validate_weight(weight_kg: f64) -> AppResult<()> {
        if !weight_kg.is_finite()
            || weight_kg < limits::WEIGHT_MIN_KG
            || weight_kg > limits::WEIGHT_MAX_KG
        {
            return Err(AppError::out_of_range(format!(
                "Body weight must be between {} and {} kg",
                limits::WEIGHT_MIN_KG,
                limits::WEIGHT_MAX_KG
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nutrition_analysis_wire_format() {
        let json = r#"{"foods":[{"name":"Egg","quantity":"50g","protein":6}],"totalProtein":6}"#;
        let analysis: NutritionAnalysis = serde_json::from_str(json).unwrap();
        assert_eq!(analysis.foods.len(), 1);
        assert_eq!(analysis.foods[0].name, "Egg");
        assert_eq!(analysis.total_protein, 6);

        let round = serde_json::to_string(&analysis).unwrap();
        assert!(round.contains("totalProtein"));
    }

    #[test]
    fn test_negative_protein_rejected_by_type() {
        let json = r#"{"foods":[{"name":"Egg","quantity":"50g","protein":-6}],"totalProtein":6}"#;
        assert!(serde_json::from_str::<NutritionAnalysis>(json).is_err());
    }

    #[test]
    fn test_profile_weight_bounds() {
        assert!(Profile::new(29.9, FitnessGoal::Maintain).is_err());
        assert!(Profile::new(200.1, FitnessGoal::Maintain).is_err());
        assert!(Profile::new(f64::NAN, FitnessGoal::Maintain).is_err());
        assert!(Profile::new(30.0, FitnessGoal::Maintain).is_ok());
        assert!(Profile::new(200.0, FitnessGoal::Maintain).is_ok());
    }

    #[test]
    fn test_goal_parsing() {
        assert_eq!("lose".parse::<FitnessGoal>().unwrap(), FitnessGoal::Lose);
        assert_eq!("GAIN".parse::<FitnessGoal>().unwrap(), FitnessGoal::Gain);
        assert!("bulk".parse::<FitnessGoal>().is_err());
    }
}
