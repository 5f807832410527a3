//! HTTP client for the prediction API

use std::collections::BTreeMap;
use std::time::Duration;

use collectiq_model::{InvoiceFeatures, ModelVersion};
use serde::{Deserialize, Serialize};

use crate::error::{ClientError, ClientResult};

const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);
const PREDICT_TIMEOUT: Duration = Duration::from_secs(60);
const STATS_TIMEOUT: Duration = Duration::from_secs(5);
const IMPORTANCE_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub model_loaded: bool,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// Prediction payload as returned by the server. Missing fields fall back
/// to neutral values rather than failing the whole call.
#[derive(Debug, Clone, Deserialize)]
pub struct Prediction {
    #[serde(default)]
    pub late_payment_probability: f64,
    #[serde(default = "not_available")]
    pub recommended_action: String,
    #[serde(default = "not_available")]
    pub tone: String,
    #[serde(default = "not_available")]
    pub model_version: String,
}

fn not_available() -> String {
    "N/A".to_string()
}

/// `/stats` body. An empty log answers with only a `message`, which
/// leaves every counter at zero.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SystemStats {
    pub total_predictions: u64,
    pub average_risk: f64,
    pub high_risk_predictions: u64,
    pub message: Option<String>,
}

/// `/feature-importance` body: either a score per feature or an `error`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FeatureImportance {
    pub feature_importance: Option<BTreeMap<String, f64>>,
    pub error: Option<String>,
}

impl FeatureImportance {
    /// Features by descending score, ties by name
    pub fn ranked(&self) -> Vec<(&str, f64)> {
        let mut ranked: Vec<(&str, f64)> = self
            .feature_importance
            .iter()
            .flatten()
            .map(|(name, score)| (name.as_str(), *score))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
    }
}

#[derive(Debug, Serialize)]
struct PredictPayload<'a> {
    #[serde(flatten)]
    features: &'a InvoiceFeatures,
    #[serde(skip_serializing_if = "Option::is_none")]
    client_email: Option<&'a str>,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn health(&self) -> ClientResult<HealthStatus> {
        let response = self
            .http
            .get(format!("{}/health", self.base_url))
            .timeout(HEALTH_TIMEOUT)
            .send()
            .await?;

        Ok(Self::check(response).await?.json().await?)
    }

    pub async fn predict(
        &self,
        features: &InvoiceFeatures,
        client_email: Option<&str>,
        version: ModelVersion,
    ) -> ClientResult<Prediction> {
        tracing::debug!("POST {}/predict model_version={}", self.base_url, version);

        let response = self
            .http
            .post(format!("{}/predict", self.base_url))
            .query(&[("model_version", version.as_str())])
            .json(&PredictPayload { features, client_email })
            .timeout(PREDICT_TIMEOUT)
            .send()
            .await?;

        Ok(Self::check(response).await?.json().await?)
    }

    pub async fn stats(&self) -> ClientResult<SystemStats> {
        let response = self
            .http
            .get(format!("{}/stats", self.base_url))
            .timeout(STATS_TIMEOUT)
            .send()
            .await?;

        Ok(Self::check(response).await?.json().await?)
    }

    /// Split-count importance; the server picks its default model when
    /// `version` is `None`
    pub async fn feature_importance(
        &self,
        version: Option<ModelVersion>,
    ) -> ClientResult<FeatureImportance> {
        let mut request = self
            .http
            .get(format!("{}/feature-importance", self.base_url))
            .timeout(IMPORTANCE_TIMEOUT);
        if let Some(version) = version {
            request = request.query(&[("model_version", version.as_str())]);
        }

        let response = request.send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn check(response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(ClientError::Api {
            status: status.as_u16(),
            body,
        })
    }
}
