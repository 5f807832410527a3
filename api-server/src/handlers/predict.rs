//! Prediction handler

use axum::{extract::{Query, State}, Json};
use validator::Validate;

use crate::{AppState, AppError, AppResult};
use crate::models::{InvoiceRequest, ModelQuery, NewPrediction, Prediction, PredictionResponse};

/// Score an invoice, log the result and return the decision
pub async fn predict(
    State(state): State<AppState>,
    Query(query): Query<ModelQuery>,
    Json(req): Json<InvoiceRequest>,
) -> AppResult<Json<PredictionResponse>> {
    req.validate()?;

    let features = req.features();
    if !features.is_finite() {
        return Err(AppError::ValidationError("feature values must be finite".to_string()));
    }

    let version = query.version();
    let probability = state.models.get(version).predict_proba(&features.to_vector());
    let assessment = state.config.thresholds.assess(probability);

    if let Some(email) = req.client_email.as_deref() {
        let reminder = assessment.reminder();
        tracing::info!(
            to = email,
            subject = reminder.subject,
            "Reminder drafted (delivery disabled)"
        );
    }

    let record = Prediction::create(&state.pool, NewPrediction {
        invoice_amount: req.invoice_amount,
        probability,
        tone: assessment.tone.to_string(),
        model_version: version.to_string(),
    }).await?;

    tracing::debug!(
        "Prediction {} logged: p={:.4} tone={} model={}",
        record.id, probability, assessment.tone, version
    );

    Ok(Json(PredictionResponse::new(&assessment, version)))
}
