//! Invoice Feature Schema
//!
//! Fixed column order shared by the trainer, the CSV loader and the API.
//! Models persist the names so a model trained on a different layout is
//! rejected at load time.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};

/// Number of model inputs
pub const FEATURE_COUNT: usize = 6;

/// Feature names in model column order
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "invoice_amount",
    "avg_delay_days",
    "num_past_invoices",
    "invoice_gap_days",
    "industry_category",
    "reliability_score",
];

/// Name of the target column in training CSVs
pub const LABEL_COLUMN: &str = "late_payment";

/// One feature row in model column order
pub type FeatureVector = [f64; FEATURE_COUNT];

/// Payment-history context of a single invoice
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InvoiceFeatures {
    pub invoice_amount: f64,
    pub avg_delay_days: f64,
    pub num_past_invoices: f64,
    pub invoice_gap_days: f64,
    /// Encoded industry bucket
    pub industry_category: f64,
    /// 0.0 - 1.0
    pub reliability_score: f64,
}

impl InvoiceFeatures {
    pub fn to_vector(&self) -> FeatureVector {
        [
            self.invoice_amount,
            self.avg_delay_days,
            self.num_past_invoices,
            self.invoice_gap_days,
            self.industry_category,
            self.reliability_score,
        ]
    }

    pub fn from_slice(values: &[f64]) -> ModelResult<Self> {
        if values.len() != FEATURE_COUNT {
            return Err(ModelError::FeatureMismatch {
                expected: FEATURE_COUNT,
                actual: values.len(),
            });
        }

        Ok(Self {
            invoice_amount: values[0],
            avg_delay_days: values[1],
            num_past_invoices: values[2],
            invoice_gap_days: values[3],
            industry_category: values[4],
            reliability_score: values[5],
        })
    }

    pub fn is_finite(&self) -> bool {
        self.to_vector().iter().all(|v| v.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_follows_column_order() {
        let features = InvoiceFeatures {
            invoice_amount: 5000.0,
            avg_delay_days: 5.0,
            num_past_invoices: 10.0,
            invoice_gap_days: 30.0,
            industry_category: 1.0,
            reliability_score: 0.8,
        };

        assert_eq!(features.to_vector(), [5000.0, 5.0, 10.0, 30.0, 1.0, 0.8]);
        assert_eq!(InvoiceFeatures::from_slice(&features.to_vector()).unwrap(), features);
    }

    #[test]
    fn test_from_slice_rejects_wrong_width() {
        let err = InvoiceFeatures::from_slice(&[1.0, 2.0]).unwrap_err();
        assert!(matches!(err, ModelError::FeatureMismatch { expected: 6, actual: 2 }));
    }

    #[test]
    fn test_non_finite_detected() {
        let mut features = InvoiceFeatures::from_slice(&[0.0; FEATURE_COUNT]).unwrap();
        assert!(features.is_finite());
        features.avg_delay_days = f64::NAN;
        assert!(!features.is_finite());
    }
}
