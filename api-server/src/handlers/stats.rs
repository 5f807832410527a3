//! Stats handler

use axum::{extract::State, Json};

use crate::{AppState, AppResult};
use crate::models::{Prediction, StatsResponse};

/// Summary over every logged prediction
pub async fn summary(State(state): State<AppState>) -> AppResult<Json<StatsResponse>> {
    let stats = Prediction::stats(&state.pool, state.config.thresholds.high_risk).await?;

    let response = match stats.average_probability {
        Some(average) if stats.total > 0 => StatsResponse::Summary {
            total_predictions: stats.total,
            average_risk: round3(average),
            high_risk_predictions: stats.high_risk,
        },
        _ => StatsResponse::Empty {
            message: "No predictions yet",
        },
    };

    Ok(Json(response))
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
