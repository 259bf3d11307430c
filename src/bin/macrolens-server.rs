// ABOUTME: Gateway server binary: loads configuration, initializes logging, serves
// ABOUTME: Exposes the meal analysis endpoint plus health checks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macrolens Nutrition

//! # Macrolens Gateway Server Binary
//!
//! Starts the analysis gateway: one `POST /api/analyze` endpoint relaying
//! meal photos to the configured vision model, plus health endpoints.

use anyhow::Result;
use clap::Parser;
use macrolens::{config::ServerConfig, logging, server::GatewayServer};
use tracing::info;

#[derive(Parser)]
#[command(name = "macrolens-server")]
#[command(about = "Macrolens - Meal photo protein analysis gateway")]
struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }

    logging::init_from_env()?;

    info!("Starting Macrolens gateway");
    info!("{}", config.summary());
    info!("Analysis endpoint: POST http://localhost:{}/api/analyze", config.http_port);

    GatewayServer::new(config).run().await?;
    Ok(())
}
