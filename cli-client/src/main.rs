use std::process::ExitCode;

use clap::Parser;
use collectiq_client::cli::{Cli, Command};
use collectiq_client::{ApiClient, ClientError, RiskReport};
use collectiq_model::ThresholdConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_logger(verbose: bool) {
    let default = if verbose { "collectiq_client=debug,info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false).compact())
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let client = ApiClient::new(&cli.api_url);

    match cli.command {
        Command::Health => match client.health().await {
            Ok(health) if health.is_healthy() => {
                println!("API Status: Healthy");
                ExitCode::SUCCESS
            }
            Ok(health) => {
                eprintln!("API Issue Detected (status: {})", health.status);
                ExitCode::FAILURE
            }
            Err(e) => {
                tracing::debug!("health check failed: {}", e);
                eprintln!("Cannot reach backend service at {}", client.base_url());
                ExitCode::FAILURE
            }
        },
        Command::Predict(args) => {
            if let Err(msg) = args.validate() {
                eprintln!("Invalid input: {}", msg);
                return ExitCode::FAILURE;
            }

            let result = client
                .predict(&args.features(), args.client_email.as_deref(), args.model.into())
                .await;

            match result {
                Ok(prediction) => {
                    println!("{}", RiskReport::new(&prediction, &ThresholdConfig::default()));
                    ExitCode::SUCCESS
                }
                Err(ClientError::Api { status, body }) => {
                    eprintln!("API Error ({})", status);
                    eprintln!("{}", body);
                    ExitCode::FAILURE
                }
                Err(e) => {
                    eprintln!("Connection Error");
                    eprintln!("{}", e);
                    ExitCode::FAILURE
                }
            }
        }
        Command::Stats => match client.stats().await {
            Ok(stats) => {
                println!("{}", stats);
                ExitCode::SUCCESS
            }
            Err(ClientError::Api { status, .. }) => {
                eprintln!("Stats unavailable ({})", status);
                ExitCode::FAILURE
            }
            Err(e) => {
                tracing::debug!("stats request failed: {}", e);
                eprintln!("Live stats unavailable");
                ExitCode::FAILURE
            }
        },
        Command::Importance { model } => match client.feature_importance(model.map(Into::into)).await {
            Ok(importance) => {
                println!("{}", importance);
                ExitCode::SUCCESS
            }
            Err(ClientError::Api { status, .. }) => {
                eprintln!("Feature importance endpoint unavailable ({})", status);
                ExitCode::FAILURE
            }
            Err(e) => {
                tracing::debug!("feature importance request failed: {}", e);
                eprintln!("Could not load feature importance.");
                ExitCode::FAILURE
            }
        },
    }
}
