//! Prediction log model

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, Row, SqlitePool};

/// One logged prediction
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Prediction {
    pub id: i64,
    pub invoice_amount: f64,
    pub probability: f64,
    pub tone: String,
    pub model_version: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewPrediction {
    pub invoice_amount: f64,
    pub probability: f64,
    pub tone: String,
    pub model_version: String,
}

/// Aggregates over the whole log
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionStats {
    pub total: i64,
    /// `None` when the log is empty
    pub average_probability: Option<f64>,
    pub high_risk: i64,
}

impl Prediction {
    pub async fn create(pool: &SqlitePool, data: NewPrediction) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Prediction>(
            r#"
            INSERT INTO predictions (invoice_amount, probability, tone, model_version, created_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING *
            "#
        )
        .bind(data.invoice_amount)
        .bind(data.probability)
        .bind(&data.tone)
        .bind(&data.model_version)
        .bind(Utc::now())
        .fetch_one(pool)
        .await
    }

    /// Count, mean probability and count strictly above `high_risk_threshold`
    pub async fn stats(pool: &SqlitePool, high_risk_threshold: f64) -> Result<PredictionStats, sqlx::Error> {
        let row = sqlx::query(
            r#"
            SELECT
                COUNT(*) AS total,
                AVG(probability) AS average,
                COALESCE(SUM(CASE WHEN probability > ? THEN 1 ELSE 0 END), 0) AS high_risk
            FROM predictions
            "#
        )
        .bind(high_risk_threshold)
        .fetch_one(pool)
        .await?;

        Ok(PredictionStats {
            total: row.try_get("total")?,
            average_probability: row.try_get("average")?,
            high_risk: row.try_get("high_risk")?,
        })
    }
}
