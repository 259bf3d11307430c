// ABOUTME: Session tracker client binary: derives the daily goal and submits meal photos
// ABOUTME: Holds the session state in memory and reports progress after each analysis
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macrolens Nutrition

//! # Macrolens Session Client
//!
//! One invocation is one tracking session: the profile is taken from the
//! command line, each photo is analyzed through the gateway in order, and
//! the running daily state is reported after every meal. Nothing is
//! persisted; state ends with the process.

use std::env;
use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;
use macrolens::{
    config::GoalConfig,
    logging,
    models::{FitnessGoal, Profile},
    tracker::{AnalysisClient, SessionTracker},
};

/// Environment variable consulted when `--api-key` is not given
const API_KEY_ENV: &str = "MACROLENS_API_KEY";

#[derive(Parser)]
#[command(name = "macrolens-cli")]
#[command(about = "Macrolens - Track protein intake from meal photos")]
struct Args {
    /// Gateway base URL
    #[arg(long, default_value = "http://localhost:8081")]
    gateway_url: String,

    /// Credential for the upstream vision model (or set MACROLENS_API_KEY)
    #[arg(long)]
    api_key: Option<String>,

    /// Body weight in kg (30-200)
    #[arg(long)]
    weight_kg: f64,

    /// Fitness goal: lose, maintain, or gain
    #[arg(long, default_value = "maintain")]
    goal: FitnessGoal,

    /// Meal photos to analyze, in order
    #[arg(required = true)]
    images: Vec<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    logging::init_from_env()?;

    let Some(api_key) = args
        .api_key
        .or_else(|| env::var(API_KEY_ENV).ok())
        .filter(|key| !key.trim().is_empty())
    else {
        bail!("No API key: pass --api-key or set {API_KEY_ENV}");
    };

    let profile = Profile::new(args.weight_kg, args.goal)?;
    let mut tracker = SessionTracker::new(profile, GoalConfig::default());
    let client = AnalysisClient::new(&args.gateway_url);

    println!(
        "Daily protein goal: {}g ({}kg, {})",
        tracker.daily_goal(),
        args.weight_kg,
        args.goal
    );

    for image in &args.images {
        println!("\nAnalyzing {}...", image.display());
        tracker.select_image(image);

        match tracker.submit_selected(&client, &api_key).await {
            Ok(meal) => {
                for food in &meal.foods {
                    println!("  {} ({}): {}g protein", food.name, food.quantity, food.protein);
                }
                println!("  Meal total: {}g protein", meal.total_protein);
            }
            Err(error) => {
                eprintln!("  Analysis failed: {error}");
            }
        }

        println!(
            "Today: {}g / {}g ({:.1}%), {}g remaining",
            tracker.daily_total(),
            tracker.daily_goal(),
            tracker.progress_percentage(),
            tracker.remaining()
        );
    }

    println!("\n{} meal(s) logged this session.", tracker.meal_history().len());
    Ok(())
}
