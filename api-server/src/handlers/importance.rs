//! Feature importance handler

use axum::{extract::{Query, State}, Json};
use collectiq_model::ModelVersion;

use crate::AppState;
use crate::models::{FeatureImportanceResponse, ModelQuery};

/// Split counts per feature; the baseline model unless `model_version=v2`
pub async fn feature_importance(
    State(state): State<AppState>,
    Query(query): Query<ModelQuery>,
) -> Json<FeatureImportanceResponse> {
    let version = match query.model_version.as_deref() {
        Some(_) => query.version(),
        None => ModelVersion::V1,
    };

    let importance = state.models.get(version).feature_importance();
    if importance.is_empty() {
        tracing::warn!("Model {} has no splits; importance unavailable", version);
        return Json(FeatureImportanceResponse::Unavailable {
            error: "Feature importance not available",
        });
    }

    Json(FeatureImportanceResponse::Available {
        feature_importance: importance,
    })
}
