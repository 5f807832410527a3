//! Command line interface

use clap::{Args, Parser, Subcommand, ValueEnum};
use collectiq_model::{InvoiceFeatures, ModelVersion};

#[derive(Parser, Debug)]
#[command(name = "collectiq", version, about = "Invoice late-payment risk from the terminal")]
pub struct Cli {
    /// Prediction API base URL
    #[arg(long, env = "COLLECTIQ_API_URL", default_value = "http://localhost:8000", global = true)]
    pub api_url: String,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check that the API is up
    Health,
    /// Score an invoice
    Predict(PredictArgs),
    /// Show live prediction stats
    Stats,
    /// Show which features the model splits on most
    Importance {
        /// Model version (server default when omitted)
        #[arg(long, value_enum)]
        model: Option<VersionArg>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum VersionArg {
    V1,
    V2,
}

impl From<VersionArg> for ModelVersion {
    fn from(arg: VersionArg) -> Self {
        match arg {
            VersionArg::V1 => ModelVersion::V1,
            VersionArg::V2 => ModelVersion::V2,
        }
    }
}

#[derive(Args, Debug)]
pub struct PredictArgs {
    /// Model version to query
    #[arg(long, value_enum, default_value = "v1")]
    pub model: VersionArg,

    #[arg(long, default_value_t = 5000.0)]
    pub invoice_amount: f64,

    /// Average delay in days
    #[arg(long, default_value_t = 5.0)]
    pub avg_delay_days: f64,

    #[arg(long, default_value_t = 10.0)]
    pub num_past_invoices: f64,

    /// Invoice gap in days
    #[arg(long, default_value_t = 30.0)]
    pub invoice_gap_days: f64,

    /// Encoded industry category
    #[arg(long, default_value_t = 1.0)]
    pub industry_category: f64,

    /// Reliability score (0-1)
    #[arg(long, default_value_t = 0.8)]
    pub reliability_score: f64,

    /// Address for the payment reminder
    #[arg(long)]
    pub client_email: Option<String>,
}

impl PredictArgs {
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

    /// Same bounds as the input form: nothing negative, reliability at most 1
    pub fn validate(&self) -> Result<(), String> {
        let features = self.features();
        if features.to_vector().iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err("invoice values must be non-negative numbers".to_string());
        }
        if features.reliability_score > 1.0 {
            return Err("reliability score must be between 0 and 1".to_string());
        }
        Ok(())
    }
}
