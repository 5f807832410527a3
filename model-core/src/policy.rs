//! Risk Policy - maps a late-payment probability to business decisions
//!
//! Two cut-offs: above `high_risk` the reminder turns firm and is sent
//! early; below `low_risk` the invoice is labelled low risk.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Threshold Configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    /// Strictly above = high risk, firm tone, early reminder
    pub high_risk: f64,

    /// Strictly below = low risk label
    pub low_risk: f64,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            high_risk: 0.7,
            low_risk: 0.3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tone {
    Firm,
    Friendly,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Firm => "Firm",
            Tone::Friendly => "Friendly",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecommendedAction {
    #[serde(rename = "Early reminder")]
    EarlyReminder,
    #[serde(rename = "Normal reminder")]
    NormalReminder,
}

impl RecommendedAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendedAction::EarlyReminder => "Early reminder",
            RecommendedAction::NormalReminder => "Normal reminder",
        }
    }
}

impl fmt::Display for RecommendedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Three-band label shown to users
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low Risk",
            RiskLevel::Medium => "Medium Risk",
            RiskLevel::High => "High Risk",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Payment reminder wording for a tone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reminder {
    pub subject: &'static str,
    pub body: &'static str,
}

impl Reminder {
    pub fn for_tone(tone: Tone) -> Self {
        match tone {
            Tone::Firm => Self {
                subject: "Urgent Payment Reminder",
                body: "Dear Client,\n\nYour invoice is at high risk of delay. Please clear the payment immediately.\n\nThank you.",
            },
            Tone::Friendly => Self {
                subject: "Friendly Payment Reminder",
                body: "Hi,\n\nJust a gentle reminder about your pending invoice.\n\nThank you.",
            },
        }
    }
}

/// Every decision derived from one probability
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskAssessment {
    pub probability: f64,
    pub tone: Tone,
    pub action: RecommendedAction,
    pub level: RiskLevel,
}

impl RiskAssessment {
    pub fn reminder(&self) -> Reminder {
        Reminder::for_tone(self.tone)
    }
}

impl ThresholdConfig {
    pub fn is_high_risk(&self, probability: f64) -> bool {
        probability > self.high_risk
    }

    pub fn tone(&self, probability: f64) -> Tone {
        if self.is_high_risk(probability) {
            Tone::Firm
        } else {
            Tone::Friendly
        }
    }

    pub fn action(&self, probability: f64) -> RecommendedAction {
        if self.is_high_risk(probability) {
            RecommendedAction::EarlyReminder
        } else {
            RecommendedAction::NormalReminder
        }
    }

    /// Note the band edges: exactly `high_risk` is already `High` here
    /// while `tone` stays friendly until strictly above it.
    pub fn level(&self, probability: f64) -> RiskLevel {
        if probability < self.low_risk {
            RiskLevel::Low
        } else if probability < self.high_risk {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }

    pub fn assess(&self, probability: f64) -> RiskAssessment {
        RiskAssessment {
            probability,
            tone: self.tone(probability),
            action: self.action(probability),
            level: self.level(probability),
        }
    }
}
