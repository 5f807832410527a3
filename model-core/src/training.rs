//! Offline training workflow: split, fit every version, evaluate, compare

use std::path::Path;

use serde::Serialize;

use crate::dataset::Dataset;
use crate::error::ModelResult;
use crate::gbdt::GradientBoostedClassifier;
use crate::metrics::{roc_auc, ClassificationReport};
use crate::version::ModelVersion;

pub const DEFAULT_TEST_FRACTION: f64 = 0.2;
pub const DEFAULT_SPLIT_SEED: u64 = 42;

/// Held-out metrics for one model
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    /// `None` if the test split holds a single class
    pub roc_auc: Option<f64>,
    pub report: ClassificationReport,
}

impl Evaluation {
    pub fn compute(model: &GradientBoostedClassifier, test: &Dataset) -> ModelResult<Self> {
        let scores = model.predict_proba_batch(test.features());
        Ok(Self {
            roc_auc: roc_auc(test.labels(), &scores),
            report: ClassificationReport::compute(test.labels(), &scores, 0.5)?,
        })
    }
}

pub struct TrainedModel {
    pub version: ModelVersion,
    pub model: GradientBoostedClassifier,
    pub evaluation: Evaluation,
}

pub struct TrainingOutcome {
    pub train_rows: usize,
    pub test_rows: usize,
    pub models: Vec<TrainedModel>,
}

impl TrainingOutcome {
    pub fn get(&self, version: ModelVersion) -> Option<&TrainedModel> {
        self.models.iter().find(|m| m.version == version)
    }

    /// V2 must beat V1 on ROC-AUC strictly to be preferred
    pub fn preferred(&self) -> ModelVersion {
        let auc = |v| self.get(v).and_then(|m| m.evaluation.roc_auc);
        match (auc(ModelVersion::V1), auc(ModelVersion::V2)) {
            (Some(v1), Some(v2)) if v2 > v1 => ModelVersion::V2,
            (None, Some(_)) => ModelVersion::V2,
            _ => ModelVersion::V1,
        }
    }

    /// Save each model under `dir` using its version file name
    pub fn save_all(&self, dir: impl AsRef<Path>) -> ModelResult<()> {
        for trained in &self.models {
            trained.model.save(dir.as_ref().join(trained.version.file_name()))?;
        }
        Ok(())
    }
}

/// Split `dataset` and train every preset on the same training rows
pub fn train_versions(
    dataset: &Dataset,
    test_fraction: f64,
    seed: u64,
) -> ModelResult<TrainingOutcome> {
    let (train, test) = dataset.train_test_split(test_fraction, seed)?;
    log::info!("Split {} rows into {} train / {} test", dataset.len(), train.len(), test.len());

    let mut models = Vec::with_capacity(ModelVersion::ALL.len());
    for version in ModelVersion::ALL {
        let model = GradientBoostedClassifier::fit(&train, version.params())?;
        let evaluation = Evaluation::compute(&model, &test)?;

        match evaluation.roc_auc {
            Some(auc) => log::info!("{} ROC-AUC: {:.4}", version, auc),
            None => log::warn!("{} ROC-AUC undefined: test split has a single class", version),
        }
        log::info!("{} report: {}", version, evaluation.report);

        models.push(TrainedModel {
            version,
            model,
            evaluation,
        });
    }

    Ok(TrainingOutcome {
        train_rows: train.len(),
        test_rows: test.len(),
        models,
    })
}
