//! Offline trainer: fits the v1 and v2 models from a CSV and saves them.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use collectiq_model::training::{train_versions, DEFAULT_SPLIT_SEED, DEFAULT_TEST_FRACTION};
use collectiq_model::{Dataset, ModelVersion};

#[derive(Parser, Debug)]
#[command(name = "collectiq-train", version, about = "Train the late-payment risk models")]
struct Args {
    /// Labelled invoice history
    #[arg(long, env = "TRAINING_DATA", default_value = "data/invoices.csv")]
    data: PathBuf,

    /// Output directory for model files
    #[arg(long, env = "MODEL_DIR", default_value = "models")]
    model_dir: PathBuf,

    /// Held-out fraction for evaluation
    #[arg(long, default_value_t = DEFAULT_TEST_FRACTION)]
    test_fraction: f64,

    /// Shuffle seed for the split
    #[arg(long, default_value_t = DEFAULT_SPLIT_SEED)]
    seed: u64,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let dataset = Dataset::from_csv_path(&args.data)
        .with_context(|| format!("failed to load {}", args.data.display()))?;

    let outcome = train_versions(&dataset, args.test_fraction, args.seed)?;
    outcome
        .save_all(&args.model_dir)
        .with_context(|| format!("failed to save models to {}", args.model_dir.display()))?;

    log::info!("Model comparison ({} test rows):", outcome.test_rows);
    for trained in &outcome.models {
        match trained.evaluation.roc_auc {
            Some(auc) => log::info!("  {} ROC-AUC: {:.4}", trained.version, auc),
            None => log::info!("  {} ROC-AUC: n/a", trained.version),
        }
    }

    match outcome.preferred() {
        ModelVersion::V2 => log::info!("v2 is better"),
        ModelVersion::V1 => log::info!("v1 performs better"),
    }

    Ok(())
}
