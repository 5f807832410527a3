//! Invoice request and response types

use std::collections::BTreeMap;

use collectiq_model::{InvoiceFeatures, RiskAssessment, ModelVersion};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Invoice submitted for scoring
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct InvoiceRequest {
    #[validate(range(min = 0.0))]
    pub invoice_amount: f64,

    #[validate(range(min = 0.0))]
    pub avg_delay_days: f64,

    #[validate(range(min = 0.0))]
    pub num_past_invoices: f64,

    #[validate(range(min = 0.0))]
    pub invoice_gap_days: f64,

    #[validate(range(min = 0.0))]
    pub industry_category: f64,

    #[validate(range(min = 0.0, max = 1.0))]
    pub reliability_score: f64,

    #[serde(default)]
    #[validate(email)]
    pub client_email: Option<String>,
}

impl InvoiceRequest {
    pub fn features(&self) -> InvoiceFeatures {
        InvoiceFeatures {
            invoice_amount: self.invoice_amount,
            avg_delay_days: self.avg_delay_days,
            num_past_invoices: self.num_past_invoices,
            invoice_gap_days: self.invoice_gap_days,
            industry_category: self.industry_category,
            reliability_score: self.reliability_score,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ModelQuery {
    pub model_version: Option<String>,
}

impl ModelQuery {
    pub fn version(&self) -> ModelVersion {
        ModelVersion::from_query(self.model_version.as_deref())
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub late_payment_probability: f64,
    pub recommended_action: String,
    pub tone: String,
    pub model_version: String,
}

impl PredictionResponse {
    pub fn new(assessment: &RiskAssessment, version: ModelVersion) -> Self {
        Self {
            late_payment_probability: assessment.probability,
            recommended_action: assessment.action.to_string(),
            tone: assessment.tone.to_string(),
            model_version: version.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum StatsResponse {
    Empty {
        message: &'static str,
    },
    Summary {
        total_predictions: i64,
        average_risk: f64,
        high_risk_predictions: i64,
    },
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum FeatureImportanceResponse {
    Available {
        feature_importance: BTreeMap<String, usize>,
    },
    Unavailable {
        error: &'static str,
    },
}
