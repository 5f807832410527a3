//! Dataset Module - Labelled invoice history for offline training
//!
//! Loads the training CSV (six feature columns plus `late_payment`) and
//! provides the seeded train/test split used by the trainer.

pub mod record;


use std::fs::File;
use std::io::Read;
use std::path::Path;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

pub use record::TrainingRecord;

use crate::error::{ModelError, ModelResult};
use crate::features::FeatureVector;

/// Column-ordered feature rows with binary labels
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    features: Vec<FeatureVector>,
    labels: Vec<f64>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a headed CSV file
    pub fn from_csv_path(path: impl AsRef<Path>) -> ModelResult<Self> {
        let file = File::open(path.as_ref())?;
        let dataset = Self::from_csv_reader(file)?;
        log::info!(
            "Loaded {} training rows from {} ({:.1}% late)",
            dataset.len(),
            path.as_ref().display(),
            dataset.positive_rate() * 100.0
        );
        Ok(dataset)
    }

    pub fn from_csv_reader<R: Read>(reader: R) -> ModelResult<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut dataset = Self::new();
        for result in csv_reader.deserialize::<TrainingRecord>() {
            let record = result?;
            dataset.push(record.vector(), record.late_payment)?;
        }

        if dataset.is_empty() {
            return Err(ModelError::EmptyDataset);
        }

        Ok(dataset)
    }

    /// Append a row, validating label and finiteness.
    ///
    /// Errors carry the index the row would have had.
    pub fn push(&mut self, features: FeatureVector, label: f64) -> ModelResult<()> {
        let row = self.len();
        if label != 0.0 && label != 1.0 {
            return Err(ModelError::InvalidLabel { row, label });
        }
        if features.iter().any(|v| !v.is_finite()) {
            return Err(ModelError::NonFiniteFeature { row });
        }

        self.features.push(features);
        self.labels.push(label);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn features(&self) -> &[FeatureVector] {
        &self.features
    }

    pub fn labels(&self) -> &[f64] {
        &self.labels
    }

    /// Fraction of rows labelled late
    pub fn positive_rate(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        self.labels.iter().sum::<f64>() / self.len() as f64
    }

    /// Shuffle with a fixed seed and hold out `test_fraction` of the rows.
    ///
    /// The held-out size is rounded up, so any non-empty fraction keeps at
    /// least one test row.
    pub fn train_test_split(&self, test_fraction: f64, seed: u64) -> ModelResult<(Dataset, Dataset)> {
        if !(test_fraction > 0.0 && test_fraction < 1.0) {
            return Err(ModelError::InvalidParameter(format!(
                "test_fraction must be in (0, 1), got {}",
                test_fraction
            )));
        }
        if self.len() < 2 {
            return Err(ModelError::InvalidParameter(
                "need at least two rows to split".to_string(),
            ));
        }

        let n_test = ((self.len() as f64 * test_fraction).ceil() as usize).min(self.len() - 1);

        let mut order: Vec<usize> = (0..self.len()).collect();
        let mut rng = StdRng::seed_from_u64(seed);
        order.shuffle(&mut rng);

        let (test_idx, train_idx) = order.split_at(n_test);
        Ok((self.subset(train_idx), self.subset(test_idx)))
    }

    fn subset(&self, indices: &[usize]) -> Dataset {
        Dataset {
            features: indices.iter().map(|&i| self.features[i]).collect(),
            labels: indices.iter().map(|&i| self.labels[i]).collect(),
        }
    }
}
