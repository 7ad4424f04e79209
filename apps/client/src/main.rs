mod app;
mod cli;
mod config;
mod controller;
mod errors;
mod form;
mod presentation;
mod service;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::{Cli, Command, InteractiveArgs};
use crate::config::Config;
use crate::controller::SubmissionController;
use crate::service::HttpGenerationService;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = Config::from_env(cli.api_url, cli.origin)?;

    // Logs go to stderr; stdout carries the rendered page
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting application writer client v{}", env!("CARGO_PKG_VERSION"));

    let endpoint = config.upload_endpoint()?;
    let service = HttpGenerationService::new(endpoint)?;
    info!("Generation service endpoint: {}", service.endpoint());

    let controller = SubmissionController::new(Arc::new(service));

    match cli
        .command
        .unwrap_or_else(|| Command::Interactive(InteractiveArgs::default()))
    {
        Command::Interactive(args) => app::run_interactive(controller, args).await,
        Command::Generate(args) => Ok(app::run_generate(controller, args).await?.exit_code()),
    }
}
