use serde::{Deserialize, Serialize};

use crate::features::{FeatureVector, InvoiceFeatures};

/// One labelled CSV row
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TrainingRecord {
    pub invoice_amount: f64,
    pub avg_delay_days: f64,
    pub num_past_invoices: f64,
    pub invoice_gap_days: f64,
    pub industry_category: f64,
    pub reliability_score: f64,

    /// 1 = paid late
    pub late_payment: f64,
}

impl TrainingRecord {
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

    pub fn vector(&self) -> FeatureVector {
        self.features().to_vector()
    }
}
