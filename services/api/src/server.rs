use crate::cli::ServeArgs;
use crate::demo::seed_demo_portfolio;
use crate::infra::{AppState, InMemoryMeetingRepository};
use crate::routes::protocol_router;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;
use weg_protokoll::config::AppConfig;
use weg_protokoll::error::AppError;
use weg_protokoll::meetings::{ChromiumPdfEngine, ProtocolService};
use weg_protokoll::telemetry;

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

    let repository = Arc::new(InMemoryMeetingRepository::default());
    let demo_meeting = seed_demo_portfolio(&repository);
    info!(%demo_meeting, "seeded in-memory portfolio");

    let engine = Arc::new(ChromiumPdfEngine::new(&config.renderer));
    let protocol_service = Arc::new(ProtocolService::new(repository, engine));

    let app = protocol_router(protocol_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "protocol export service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
