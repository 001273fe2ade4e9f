// ABOUTME: Server binary for the NutriSmart recipe recommendation API
// ABOUTME: Loads .env and configuration, initializes logging and storage, then serves HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # NutriSmart Server Binary

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use nutrismart_server::{
    config::{environment::load_dotenv, ServerConfig},
    logging,
    server::{run_server, ServerResources},
};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "nutrismart-server")]
#[command(about = "NutriSmart - recipe recommendations from what is in your pantry")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    port: Option<u16>,

    /// Override the sqlx database URL
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    // .env must be in the environment before logging reads RUST_LOG and LOG_FORMAT
    let dotenv_path = load_dotenv();
    logging::init_from_env()?;
    match dotenv_path {
        Some(path) => info!(path = %path.display(), "Loaded .env"),
        None => info!("No .env file found; using process environment"),
    }

    let mut config = ServerConfig::from_env()?;
    if let Some(port) = args.port {
        config.http.port = port;
    }
    if let Some(database_url) = args.database_url {
        config.database.url = database_url;
    }
    config.validate()?;

    info!("Starting NutriSmart server");
    info!("{}", config.summary());
    if !config.llm.has_usable_key() {
        warn!("GEMINI_API_KEY not set; recommendations will use backup recipes");
    }

    let resources = ServerResources::from_config(config).await?;
    info!("Database initialized");

    run_server(Arc::new(resources)).await
}
