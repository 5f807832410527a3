//! Terminal rendering of a prediction

use std::fmt;

use collectiq_model::{RiskLevel, ThresholdConfig};

use crate::api::{FeatureImportance, Prediction, SystemStats};

const BAR_WIDTH: f64 = 30.0;

#[derive(Debug, Clone)]
pub struct RiskReport {
    /// Probability as a percentage, two decimals
    pub percentage: f64,
    pub level: RiskLevel,
    pub action: String,
    pub tone: String,
    pub model_version: String,
}

impl RiskReport {
    pub fn new(prediction: &Prediction, thresholds: &ThresholdConfig) -> Self {
        let p = prediction.late_payment_probability;
        Self {
            percentage: (p * 100.0 * 100.0).round() / 100.0,
            level: thresholds.level(p),
            action: prediction.recommended_action.clone(),
            tone: prediction.tone.clone(),
            model_version: prediction.model_version.clone(),
        }
    }
}

impl fmt::Display for RiskReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Late Payment Risk:  {}%", self.percentage)?;
        writeln!(f, "Risk Level:         {}", self.level)?;
        writeln!(f, "Recommended Action: {}", self.action)?;
        writeln!(f, "Tone:               {}", self.tone)?;
        write!(f, "Model Version Used: {}", self.model_version)
    }
}

impl fmt::Display for SystemStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(message) = &self.message {
            writeln!(f, "{}", message)?;
        }
        writeln!(f, "Total Predictions:  {}", self.total_predictions)?;
        writeln!(f, "Average Risk:       {:.2}%", self.average_risk * 100.0)?;
        write!(f, "High Risk Cases:    {}", self.high_risk_predictions)
    }
}

impl fmt::Display for FeatureImportance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.feature_importance.is_none() {
            write!(f, "Warning: feature importance not returned by API.")?;
            if let Some(error) = &self.error {
                write!(f, " ({})", error)?;
            }
            return Ok(());
        }

        let ranked = self.ranked();
        let Some(&(_, top)) = ranked.first() else {
            return write!(f, "No feature importance available.");
        };

        writeln!(f, "Feature Importance")?;
        for (i, (name, score)) in ranked.iter().enumerate() {
            let width = if top > 0.0 { (score / top * BAR_WIDTH).round() as usize } else { 0 };
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  {:<20} {:>8} {}", name, score, "#".repeat(width))?;
        }
        Ok(())
    }
}
