//! Gradient Boosting Module - Binary logistic tree ensemble
//!
//! Training and inference live here; presets and file I/O sit on top.
//! Split search is exact greedy over the sampled columns of each round.

pub mod params;
pub mod tree;
pub mod booster;

// Re-export common types
pub use params::BoosterParams;
pub use tree::{Node, RegressionTree};
pub use booster::{GradientBoostedClassifier, TrainingMetadata};

/// Logistic link
pub fn sigmoid(margin: f64) -> f64 {
    1.0 / (1.0 + (-margin).exp())
}
