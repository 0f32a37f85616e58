use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{HealthStatus, Product};
use super::generator::FleetSnapshot;
use super::report::{
    maintenance_tasks, products_for_contractor, products_for_installer, FleetSummary,
    PredictiveSummary,
};
use crate::clock::Clock;

/// Shared read-only fleet plus the clock used for "as of now" aggregates.
#[derive(Clone)]
pub struct FleetState {
    pub fleet: Arc<FleetSnapshot>,
    pub clock: Arc<dyn Clock>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TaskQuery {
    pub status: Option<HealthStatus>,
}

/// Router exposing fleet, recommendation, prediction, installer and contractor lookups.
/// Every product view reports health as of the state's clock.
pub fn fleet_router(state: FleetState) -> Router {
    Router::new()
        .route("/api/products", get(list_products))
        .route("/api/products/:product_id", get(product_handler))
        .route(
            "/api/products/:product_id/recommendations",
            get(recommendations_handler),
        )
        .route("/api/predict/:product_id", get(predict_handler))
        .route("/api/fleet/summary", get(summary_handler))
        .route("/api/fleet/tasks", get(tasks_handler))
        .route("/api/contractors", get(list_contractors))
        .route("/api/contractors/:contractor_id", get(contractor_handler))
        .route(
            "/api/contractors/:contractor_id/products",
            get(contractor_products_handler),
        )
        .route(
            "/api/installers/:installer_id/products",
            get(installer_products_handler),
        )
        .with_state(state)
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

fn not_found(entity: &str) -> Response {
    error_response(StatusCode::NOT_FOUND, format!("{entity} not found"))
}

fn current<'a>(
    products: impl IntoIterator<Item = &'a Product>,
    state: &FleetState,
) -> Vec<Product> {
    let now = state.clock.now();
    products.into_iter().map(|product| product.as_of(now)).collect()
}

pub(crate) async fn list_products(State(state): State<FleetState>) -> Response {
    Json(current(&state.fleet.products, &state)).into_response()
}

pub(crate) async fn product_handler(
    State(state): State<FleetState>,
    Path(product_id): Path<String>,
) -> Response {
    match state.fleet.product(&product_id) {
        Some(product) => Json(product.as_of(state.clock.now())).into_response(),
        None => not_found("Product"),
    }
}

pub(crate) async fn recommendations_handler(
    State(state): State<FleetState>,
    Path(product_id): Path<String>,
) -> Response {
    match state.fleet.product(&product_id) {
        Some(product) => Json(product.recommendations()).into_response(),
        None => not_found("Product"),
    }
}

pub(crate) async fn predict_handler(
    State(state): State<FleetState>,
    Path(product_id): Path<String>,
) -> Response {
    match state.fleet.product(&product_id) {
        Some(product) => {
            Json(PredictiveSummary::for_product(product, state.clock.now())).into_response()
        }
        None => not_found("Product"),
    }
}

pub(crate) async fn summary_handler(State(state): State<FleetState>) -> Response {
    let summary = FleetSummary::from_products(&state.fleet.products, state.clock.now());
    Json(summary).into_response()
}

pub(crate) async fn tasks_handler(
    State(state): State<FleetState>,
    query: Result<Query<TaskQuery>, QueryRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return error_response(rejection.status(), rejection.body_text()),
    };
    let tasks = maintenance_tasks(&state.fleet.products, query.status, state.clock.now());
    Json(tasks).into_response()
}

pub(crate) async fn list_contractors(State(state): State<FleetState>) -> Response {
    Json(&state.fleet.contractors).into_response()
}

pub(crate) async fn contractor_handler(
    State(state): State<FleetState>,
    Path(contractor_id): Path<String>,
) -> Response {
    match state.fleet.contractor(&contractor_id) {
        Some(contractor) => Json(contractor).into_response(),
        None => not_found("Contractor"),
    }
}

pub(crate) async fn contractor_products_handler(
    State(state): State<FleetState>,
    Path(contractor_id): Path<String>,
) -> Response {
    match state.fleet.contractor(&contractor_id) {
        Some(contractor) => {
            let products = products_for_contractor(&state.fleet.products, contractor);
            Json(current(products, &state)).into_response()
        }
        None => not_found("Contractor"),
    }
}

/// Installers have no registry of their own; an unknown id simply owns no products.
pub(crate) async fn installer_products_handler(
    State(state): State<FleetState>,
    Path(installer_id): Path<String>,
) -> Response {
    let products = products_for_installer(&state.fleet.products, &installer_id);
    Json(current(products, &state)).into_response()
}
