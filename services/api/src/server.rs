use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryNotificationRepository};
use crate::routes::with_equipment_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use equipment_care::clock::{Clock, SystemClock};
use equipment_care::config::AppConfig;
use equipment_care::error::AppError;
use equipment_care::telemetry;
use equipment_care::workflows::maintenance::{fleet_rng, generate_fixture, FleetState};
use equipment_care::workflows::notifications::NotificationService;
use std::sync::atomic::Ordering;
use std::sync::Arc;
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

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let mut rng = fleet_rng(config.fleet.seed);
    let (fleet, notifications) = generate_fixture(&config.fleet, clock.now(), &mut rng);
    info!(
        products = fleet.products.len(),
        contractors = fleet.contractors.len(),
        notifications = notifications.len(),
        seeded = config.fleet.seed.is_some(),
        "fleet fixture loaded"
    );

    let fleet = Arc::new(fleet);
    let repository = Arc::new(InMemoryNotificationRepository::seeded(notifications));
    let notification_service = Arc::new(NotificationService::new(
        repository,
        fleet.clone(),
        clock.clone(),
    ));

    let app = with_equipment_routes(FleetState { fleet, clock }, notification_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "equipment care service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
