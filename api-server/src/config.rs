//! Configuration module

use std::env;
use std::path::PathBuf;

use collectiq_model::{ModelVersion, ThresholdConfig};

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Database connection URL
    pub database_url: String,

    /// Maximum pooled connections
    pub database_max_connections: u32,

    /// Server port
    pub port: u16,

    /// Baseline model file
    pub model_v1_path: PathBuf,

    /// Current model file
    pub model_v2_path: PathBuf,

    /// Risk cut-offs for tone, action and stats
    pub thresholds: ThresholdConfig,

    /// Environment (development, production)
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let model_dir = env::var("MODEL_DIR").unwrap_or_else(|_| "models".to_string());
        let model_path = |var: &str, version: ModelVersion| {
            env::var(var)
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(&model_dir).join(version.file_name()))
        };

        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://predictions.db?mode=rwc".to_string()),

            database_max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .ok()
                .and_then(|n| n.parse().ok())
                .unwrap_or(5),

            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),

            model_v1_path: model_path("MODEL_V1_PATH", ModelVersion::V1),
            model_v2_path: model_path("MODEL_V2_PATH", ModelVersion::V2),

            thresholds: thresholds(
                env::var("HIGH_RISK_THRESHOLD").ok().as_deref(),
                env::var("LOW_RISK_THRESHOLD").ok().as_deref(),
            ),

            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
        }
    }

    pub fn model_path(&self, version: ModelVersion) -> &PathBuf {
        match version {
            ModelVersion::V1 => &self.model_v1_path,
            ModelVersion::V2 => &self.model_v2_path,
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// Probability cut-offs from raw env values. Anything unparsable, outside
/// [0, 1], or with low above high falls back to the defaults.
fn thresholds(high: Option<&str>, low: Option<&str>) -> ThresholdConfig {
    let defaults = ThresholdConfig::default();
    let parse = |raw: Option<&str>| {
        raw.and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|v| (0.0..=1.0).contains(v))
    };

    let config = ThresholdConfig {
        high_risk: parse(high).unwrap_or(defaults.high_risk),
        low_risk: parse(low).unwrap_or(defaults.low_risk),
    };
    if config.low_risk > config.high_risk {
        tracing::warn!(
            "LOW_RISK_THRESHOLD {} exceeds HIGH_RISK_THRESHOLD {}, using defaults",
            config.low_risk, config.high_risk
        );
        return defaults;
    }
    config
}
