use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::{DateTime, Utc};
use merit_cutoff::error::AppError;
use merit_cutoff::workflows::ledger::IngestSummary;
use merit_cutoff::workflows::merit::report::views::{CutoffRowView, PredictedPostView};
use merit_cutoff::workflows::merit::{
    BonusImpact, MeritPredictorService, PostAssessment, PredictionPolicy, UserProfile,
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub(crate) struct CutoffsResponse {
    pub(crate) computed_at: DateTime<Utc>,
    pub(crate) policy: PredictionPolicy,
    pub(crate) ingest: IngestSummary,
    pub(crate) rows: Vec<CutoffRowView>,
}

#[derive(Debug, Serialize)]
pub(crate) struct PredictResponse {
    pub(crate) bonus_impact: BonusImpact,
    pub(crate) bonus_summary: String,
    pub(crate) assessments: Vec<PostAssessment>,
    pub(crate) predictions: Vec<PredictedPostView>,
}

pub(crate) fn merit_routes(service: Arc<MeritPredictorService>) -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/cutoffs", get(cutoffs_endpoint))
        .route("/api/v1/predict", post(predict_endpoint))
        .layer(Extension(service))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn cutoffs_endpoint(
    Extension(service): Extension<Arc<MeritPredictorService>>,
) -> Json<CutoffsResponse> {
    let rows = service
        .cutoff_table()
        .rows()
        .iter()
        .map(|row| CutoffRowView::from_row(row, None))
        .collect();

    Json(CutoffsResponse {
        computed_at: service.computed_at(),
        policy: service.policy(),
        ingest: service.ledger().summary(),
        rows,
    })
}

pub(crate) async fn predict_endpoint(
    Extension(service): Extension<Arc<MeritPredictorService>>,
    Json(profile): Json<UserProfile>,
) -> Result<Json<PredictResponse>, AppError> {
    let evaluation = service.evaluate(&profile)?;

    Ok(Json(PredictResponse {
        bonus_summary: evaluation.bonus_impact.summary(),
        bonus_impact: evaluation.bonus_impact,
        predictions: evaluation
            .predictions
            .iter()
            .map(PredictedPostView::from_prediction)
            .collect(),
        assessments: evaluation.assessments,
    }))
}
