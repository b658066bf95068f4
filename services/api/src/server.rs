use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryTenderRepository};
use crate::routes::with_service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tender_intel::config::AppConfig;
use tender_intel::error::AppError;
use tender_intel::telemetry;
use tender_intel::workflows::tenders::{CompetitorModel, TenderIntelService};
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

    let model = CompetitorModel::new(config.model.model_config());
    info!(
        competitors = model.config().competitors.len(),
        intercept = model.config().weights.intercept,
        "competitor model configured"
    );

    let repository = Arc::new(InMemoryTenderRepository::default());
    let service = Arc::new(TenderIntelService::new(repository, model));

    let app = with_service_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "tender intel service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
