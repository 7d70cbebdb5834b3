use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use talent_ai::error::AppError;
use talent_ai::workflows::screening::{
    application_router, ApplicationRepository, ApplicationService, AuditLog, ScanOutcome,
    ScanReport, ScreeningWorker, WorkerStats,
};

#[derive(Debug, Serialize)]
pub(crate) struct ScanTriggerResponse {
    pub(crate) triggered: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) report: Option<ScanReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) reason: Option<&'static str>,
}

pub(crate) fn with_screening_routes<R, L>(
    service: Arc<ApplicationService<R, L>>,
    worker: Arc<ScreeningWorker<R, L>>,
) -> axum::Router
where
    R: ApplicationRepository + 'static,
    L: AuditLog + 'static,
{
    application_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/screening/scan",
            axum::routing::post(scan_endpoint::<R, L>),
        )
        .route(
            "/api/v1/screening/worker",
            axum::routing::get(worker_stats_endpoint::<R, L>),
        )
        .layer(Extension(worker))
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

pub(crate) async fn scan_endpoint<R, L>(
    Extension(worker): Extension<Arc<ScreeningWorker<R, L>>>,
) -> Result<Json<ScanTriggerResponse>, AppError>
where
    R: ApplicationRepository + 'static,
    L: AuditLog + 'static,
{
    let response = match worker.run_once()? {
        ScanOutcome::Completed(report) => ScanTriggerResponse {
            triggered: true,
            report: Some(report),
            reason: None,
        },
        ScanOutcome::AlreadyRunning => ScanTriggerResponse {
            triggered: false,
            report: None,
            reason: Some("a scan is already in progress"),
        },
    };

    Ok(Json(response))
}

pub(crate) async fn worker_stats_endpoint<R, L>(
    Extension(worker): Extension<Arc<ScreeningWorker<R, L>>>,
) -> Json<WorkerStats>
where
    R: ApplicationRepository + 'static,
    L: AuditLog + 'static,
{
    Json(worker.stats())
}
