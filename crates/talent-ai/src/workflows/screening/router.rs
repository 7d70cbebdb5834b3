//! HTTP surface for the screening workflow.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;

use super::domain::{ApplicationId, ApplicationStatus};
use super::repository::{ApplicationRepository, AuditLog, RepositoryError};
use super::service::{ApplicationService, ApplicationServiceError, ApplicationSubmission};

/// Build the router for application intake and review.
pub fn application_router<R, L>(service: Arc<ApplicationService<R, L>>) -> Router
where
    R: ApplicationRepository + 'static,
    L: AuditLog + 'static,
{
    Router::new()
        .route("/api/v1/applications", post(submit_handler::<R, L>))
        .route(
            "/api/v1/applications/:application_id",
            get(status_handler::<R, L>),
        )
        .route(
            "/api/v1/applications/:application_id/timeline",
            get(timeline_handler::<R, L>),
        )
        .route(
            "/api/v1/applications/:application_id/status",
            post(update_status_handler::<R, L>),
        )
        .route("/api/v1/screening/stats", get(stats_handler::<R, L>))
        .with_state(service)
}

pub(crate) async fn submit_handler<R, L>(
    State(service): State<Arc<ApplicationService<R, L>>>,
    Json(submission): Json<ApplicationSubmission>,
) -> Response
where
    R: ApplicationRepository + 'static,
    L: AuditLog + 'static,
{
    match service.submit(submission) {
        Ok(record) => (StatusCode::ACCEPTED, Json(record.status_view())).into_response(),
        Err(ApplicationServiceError::Repository(RepositoryError::Conflict)) => {
            let body = Json(json!({ "error": "application already exists" }));
            (StatusCode::CONFLICT, body).into_response()
        }
        Err(other) => {
            let body = Json(json!({ "error": other.to_string() }));
            (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
        }
    }
}

pub(crate) async fn status_handler<R, L>(
    State(service): State<Arc<ApplicationService<R, L>>>,
    Path(application_id): Path<String>,
) -> Response
where
    R: ApplicationRepository + 'static,
    L: AuditLog + 'static,
{
    let id = ApplicationId(application_id);
    match service.get(&id) {
        Ok(record) => (StatusCode::OK, Json(record.status_view())).into_response(),
        Err(ApplicationServiceError::Repository(RepositoryError::NotFound)) => {
            // Unknown ids get a synthesized pending view rather than a 404,
            // so pollers written against eventually-consistent stores keep
            // working.
            let body = Json(json!({
                "application_id": id.0,
                "status": ApplicationStatus::Applied.label(),
                "evaluation_state": "pending",
                "decision_rationale": "pending evaluation",
            }));
            (StatusCode::OK, body).into_response()
        }
        Err(other) => {
            let body = Json(json!({ "error": other.to_string() }));
            (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
        }
    }
}

pub(crate) async fn timeline_handler<R, L>(
    State(service): State<Arc<ApplicationService<R, L>>>,
    Path(application_id): Path<String>,
) -> Response
where
    R: ApplicationRepository + 'static,
    L: AuditLog + 'static,
{
    let id = ApplicationId(application_id);
    match service.timeline(&id) {
        Ok(entries) => (StatusCode::OK, Json(entries)).into_response(),
        Err(err) => {
            let body = Json(json!({ "error": err.to_string() }));
            (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
        }
    }
}

/// Body of a manual status override.
#[derive(Debug, Deserialize)]
pub(crate) struct StatusChangeRequest {
    pub(crate) status: ApplicationStatus,
    pub(crate) reviewer: String,
    #[serde(default)]
    pub(crate) comment: Option<String>,
}

pub(crate) async fn update_status_handler<R, L>(
    State(service): State<Arc<ApplicationService<R, L>>>,
    Path(application_id): Path<String>,
    Json(request): Json<StatusChangeRequest>,
) -> Response
where
    R: ApplicationRepository + 'static,
    L: AuditLog + 'static,
{
    let id = ApplicationId(application_id);
    match service.update_status(&id, request.status, &request.reviewer, request.comment) {
        Ok(record) => (StatusCode::OK, Json(record.status_view())).into_response(),
        Err(ApplicationServiceError::Repository(RepositoryError::NotFound)) => {
            let body = Json(json!({ "error": "application not found" }));
            (StatusCode::NOT_FOUND, body).into_response()
        }
        Err(other) => {
            let body = Json(json!({ "error": other.to_string() }));
            (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
        }
    }
}

pub(crate) async fn stats_handler<R, L>(
    State(service): State<Arc<ApplicationService<R, L>>>,
) -> Response
where
    R: ApplicationRepository + 'static,
    L: AuditLog + 'static,
{
    match service.pipeline_stats() {
        Ok(stats) => (StatusCode::OK, Json(stats)).into_response(),
        Err(err) => {
            let body = Json(json!({ "error": err.to_string() }));
            (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
        }
    }
}
