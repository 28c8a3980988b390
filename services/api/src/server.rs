use crate::cli::ServeArgs;
use crate::infra::{load_formations, AppState};
use crate::routes::router;
use axum_prometheus::PrometheusMetricLayer;
use oriento::config::AppConfig;
use oriento::error::AppError;
use oriento::riasec::ProfileResolver;
use oriento::telemetry;
use std::sync::atomic::Ordering;
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
    let formations = load_formations(&config)?;
    let app_state = AppState::new(prometheus_handle, ProfileResolver::new(config.scoring))
        .with_formations(formations);
    let readiness_flag = app_state.readiness.clone();

    let app = router(app_state).layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "oriento api ready");

    axum::serve(listener, app).await?;
    Ok(())
}
