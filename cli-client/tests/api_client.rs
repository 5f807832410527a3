use collectiq_client::{ApiClient, ClientError, RiskReport};
use collectiq_model::{InvoiceFeatures, ModelVersion, RiskLevel, ThresholdConfig};
use httpmock::prelude::*;
use serde_json::json;

fn invoice() -> InvoiceFeatures {
    InvoiceFeatures {
        invoice_amount: 5000.0,
        avg_delay_days: 5.0,
        num_past_invoices: 10.0,
        invoice_gap_days: 30.0,
        industry_category: 1.0,
        reliability_score: 0.8,
    }
}

#[tokio::test]
async fn test_health_reports_status() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/health");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({ "status": "healthy", "model_loaded": true }));
    });

    let client = ApiClient::new(server.base_url());
    let health = client.health().await.unwrap();

    mock.assert();
    assert!(health.is_healthy());
    assert!(health.model_loaded);
}

#[tokio::test]
async fn test_predict_sends_invoice_and_version() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/predict")
            .query_param("model_version", "v1")
            .json_body(json!({
                "invoice_amount": 5000.0,
                "avg_delay_days": 5.0,
                "num_past_invoices": 10.0,
                "invoice_gap_days": 30.0,
                "industry_category": 1.0,
                "reliability_score": 0.8
            }));
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({
                "late_payment_probability": 0.8123,
                "recommended_action": "Early reminder",
                "tone": "Firm",
                "model_version": "v1"
            }));
    });

    let client = ApiClient::new(format!("{}/", server.base_url()));
    let prediction = client.predict(&invoice(), None, ModelVersion::V1).await.unwrap();

    mock.assert();
    assert_eq!(prediction.tone, "Firm");
    assert_eq!(prediction.model_version, "v1");

    let report = RiskReport::new(&prediction, &ThresholdConfig::default());
    assert_eq!(report.percentage, 81.23);
    assert_eq!(report.level, RiskLevel::High);
}

#[tokio::test]
async fn test_predict_includes_email_when_given() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/predict")
            .query_param("model_version", "v2")
            .json_body_partial(r#"{ "client_email": "billing@example.com" }"#);
        then.status(200).json_body(json!({ "late_payment_probability": 0.1 }));
    });

    let client = ApiClient::new(server.base_url());
    let prediction = client
        .predict(&invoice(), Some("billing@example.com"), ModelVersion::V2)
        .await
        .unwrap();

    mock.assert();
    // Missing fields default rather than fail
    assert_eq!(prediction.tone, "N/A");
    assert_eq!(prediction.recommended_action, "N/A");
}

#[tokio::test]
async fn test_predict_api_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/predict");
        then.status(400)
            .json_body(json!({ "error": "reliability_score: range", "status": 400 }));
    });

    let client = ApiClient::new(server.base_url());
    let err = client.predict(&invoice(), None, ModelVersion::V2).await.unwrap_err();

    match err {
        ClientError::Api { status, body } => {
            assert_eq!(status, 400);
            assert!(body.contains("reliability_score"));
        }
        other => panic!("expected API error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unreachable_server_is_connection_error() {
    // Port 9 (discard) is not expected to serve HTTP
    let client = ApiClient::new("http://127.0.0.1:9");
    let err = client.health().await.unwrap_err();
    assert!(matches!(err, ClientError::Connection(_)));
}

#[tokio::test]
async fn test_stats_summary() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/stats");
        then.status(200).json_body(json!({
            "total_predictions": 12,
            "average_risk": 0.417,
            "high_risk_predictions": 3
        }));
    });

    let client = ApiClient::new(server.base_url());
    let stats = client.stats().await.unwrap();

    mock.assert();
    assert_eq!(stats.total_predictions, 12);
    assert_eq!(stats.average_risk, 0.417);
    assert_eq!(stats.high_risk_predictions, 3);
    assert!(stats.message.is_none());
    assert!(stats.to_string().contains("41.70%"));
}

#[tokio::test]
async fn test_stats_empty_log() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/stats");
        then.status(200).json_body(json!({ "message": "No predictions yet" }));
    });

    let client = ApiClient::new(server.base_url());
    let stats = client.stats().await.unwrap();

    assert_eq!(stats.message.as_deref(), Some("No predictions yet"));
    assert_eq!(stats.total_predictions, 0);
    assert_eq!(stats.average_risk, 0.0);
}

#[tokio::test]
async fn test_feature_importance_ranked() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/feature-importance")
            .query_param("model_version", "v2");
        then.status(200).json_body(json!({
            "feature_importance": {
                "avg_delay_days": 41,
                "invoice_amount": 7,
                "reliability_score": 33
            }
        }));
    });

    let client = ApiClient::new(server.base_url());
    let importance = client.feature_importance(Some(ModelVersion::V2)).await.unwrap();

    mock.assert();
    assert_eq!(
        importance.ranked(),
        vec![("avg_delay_days", 41.0), ("reliability_score", 33.0), ("invoice_amount", 7.0)]
    );
}

#[tokio::test]
async fn test_feature_importance_unavailable() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/feature-importance");
        then.status(200)
            .json_body(json!({ "error": "Feature importance not available" }));
    });

    let client = ApiClient::new(server.base_url());
    let importance = client.feature_importance(None).await.unwrap();

    assert!(importance.feature_importance.is_none());
    assert_eq!(importance.error.as_deref(), Some("Feature importance not available"));
    assert!(importance.ranked().is_empty());
    assert!(importance.to_string().starts_with("Warning"));
}

#[tokio::test]
async fn test_stats_api_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/stats");
        then.status(500).json_body(json!({ "error": "Database error", "status": 500 }));
    });

    let client = ApiClient::new(server.base_url());
    let err = client.stats().await.unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 500, .. }));
}
