use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryApplicationRepository, InMemoryAuditLog};
use crate::routes::with_screening_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use talent_ai::config::AppConfig;
use talent_ai::error::AppError;
use talent_ai::telemetry;
use talent_ai::workflows::screening::{ApplicationService, ScreeningWorker};
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemoryApplicationRepository::default());
    let audit = Arc::new(InMemoryAuditLog::default());
    let service = Arc::new(ApplicationService::new(repository.clone(), audit.clone()));
    let worker = Arc::new(ScreeningWorker::new(repository, audit));
    let worker_task = worker.clone().spawn(config.worker.scan_interval());

    let app = with_screening_routes(service, worker)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "resume screening service ready");

    axum::serve(listener, app).await?;
    worker_task.abort();
    Ok(())
}
