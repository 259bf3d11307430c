// ABOUTME: Analysis route handler for the meal photo endpoint
// ABOUTME: Accepts an image data URI plus credential and returns the parsed nutrition result
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macrolens Nutrition

//! Meal analysis route
//!
//! `POST /api/analyze` is the gateway's one wire contract:
//!
//! - Request: `{ "image": "<data URI>", "apiKey": "<credential>" }`
//! - Success: `{ "foods": [...], "totalProtein": n }`, status 200
//! - Error: `{ "error": "<message>" }`, status 400 or 500
//!
//! Both request fields deserialize as optional so field presence is checked
//! by the service layer and a missing field yields the contract's `{error}`
//! body instead of a framework rejection.

use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;

use crate::analysis::MealAnalyzer;
use crate::errors::AppError;
use crate::models::NutritionAnalysis;

/// Request body for the analysis endpoint
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    /// Meal photo as a base64 data URI
    #[serde(default)]
    pub image: Option<String>,
    /// Caller-supplied credential for the upstream model
    #[serde(default, rename = "apiKey")]
    pub api_key: Option<String>,
}

/// Analysis routes handler
pub struct AnalyzeRoutes;

impl AnalyzeRoutes {
    /// Create the analysis routes
    pub fn routes(analyzer: Arc<MealAnalyzer>) -> Router {
        Router::new()
            .route("/api/analyze", post(Self::analyze))
            .with_state(analyzer)
    }

    /// Handle one analysis request
    async fn analyze(
        State(analyzer): State<Arc<MealAnalyzer>>,
        Json(request): Json<AnalyzeRequest>,
    ) -> Result<Json<NutritionAnalysis>, AppError> {
        let analysis = analyzer.analyze(request.image, request.api_key).await?;
        Ok(Json(analysis))
    }
}
