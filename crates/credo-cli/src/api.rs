use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use credo_core::{CredoError, Platform};
use credo_score::{Enrich, Rng};
use credo_store::RecordStore;

pub struct ApiState {
    pub store: Arc<dyn RecordStore>,
    pub enricher: Arc<dyn Enrich>,
}

pub fn api_router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/api/verify", post(verify_handler))
        .route("/api/compare", post(compare_handler))
        .route("/api/report", post(report_handler))
        .route("/api/history", get(history_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn validation_error(errors: Vec<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({
            "message": "Invalid request data",
            "errors": errors,
        })),
    )
        .into_response()
}

fn internal_error(context: &str, err: &CredoError) -> Response {
    error!(error = %err, "{context} failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({ "message": format!("Failed to {context}") })),
    )
        .into_response()
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "credo-api"
    }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct VerifyBody {
    profile_url: String,
    platform: Platform,
}

async fn verify_handler(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<VerifyBody>, JsonRejection>,
) -> Response {
    let Json(body) = match payload {
        Ok(json) => json,
        Err(rejection) => return validation_error(vec![rejection.body_text()]),
    };
    if body.profile_url.chars().count() < 2 {
        return validation_error(vec![
            "profileUrl must be at least 2 characters".to_string()
        ]);
    }

    let mut rng = Rng::from_entropy();
    match credo_score::verify(
        state.store.as_ref(),
        &body.profile_url,
        body.platform,
        state.enricher.as_ref(),
        &mut rng,
    ) {
        Ok(record) => Json(record.report).into_response(),
        Err(e) => internal_error("verify account", &e),
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CompareBody {
    account_ids: Vec<String>,
}

async fn compare_handler(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<CompareBody>, JsonRejection>,
) -> Response {
    let Json(body) = match payload {
        Ok(json) => json,
        Err(rejection) => return validation_error(vec![rejection.body_text()]),
    };
    if body.account_ids.len() < 2 {
        return validation_error(vec![
            "accountIds must contain at least 2 entries".to_string()
        ]);
    }

    match credo_compare::compare(state.store.as_ref(), &body.account_ids) {
        Ok(result) => Json(result).into_response(),
        Err(CredoError::Validation(msg)) => validation_error(vec![msg]),
        Err(e) => internal_error("compare accounts", &e),
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReportBody {
    account_id: String,
    reason: Option<String>,
}

async fn report_handler(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<ReportBody>, JsonRejection>,
) -> Response {
    let Json(body) = match payload {
        Ok(json) => json,
        Err(rejection) => return validation_error(vec![rejection.body_text()]),
    };

    match state.store.save_report(&body.account_id, body.reason) {
        Ok(report) => {
            info!(account = %report.account_id, report_id = report.id, "account reported");
            Json(serde_json::json!({
                "success": true,
                "message": "Account reported successfully",
                "reportId": report.id,
            }))
            .into_response()
        }
        Err(e) => internal_error("report account", &e),
    }
}

#[derive(Deserialize)]
struct HistoryParams {
    #[serde(default = "default_history_limit")]
    limit: usize,
}

fn default_history_limit() -> usize {
    10
}

async fn history_handler(
    State(state): State<Arc<ApiState>>,
    Query(params): Query<HistoryParams>,
) -> Response {
    match state.store.recent(params.limit) {
        Ok(records) => Json(records).into_response(),
        Err(e) => internal_error("load verification history", &e),
    }
}
