use super::common::*;
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, Request, StatusCode};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

use crate::workflows::notifications::domain::RecipientGroup;
use crate::workflows::notifications::notification_router;
use crate::workflows::notifications::router::{dismiss_handler, mark_read_handler};

#[tokio::test]
async fn inbox_route_filters_by_recipient_query() {
    let (service, _) = build_service();
    let response = notification_router(Arc::new(service))
        .oneshot(
            Request::get("/api/notifications?recipientId=owner-2")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let inbox = payload.as_array().expect("array payload");
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0]["id"], "notif-2");
    assert_eq!(inbox[0]["type"], "Maintenance Due");
    assert_eq!(inbox[0]["productId"], "prod-1");
}

#[tokio::test]
async fn mark_read_route_returns_updated_notification() {
    let (service, _) = build_service();
    let response = notification_router(Arc::new(service))
        .oneshot(
            Request::put("/api/notifications/notif-1/read")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["read"], true);
}

#[tokio::test]
async fn unknown_ids_return_not_found() {
    let (service, _) = build_service();
    let service = Arc::new(service);

    let response =
        mark_read_handler(State(service.clone()), Path("notif-404".to_string())).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert_eq!(payload["error"], "notification notif-404 not found");

    let response = dismiss_handler(State(service), Path("notif-404".to_string())).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn dismiss_route_returns_no_content() {
    let (service, repository) = build_service();
    let response = notification_router(Arc::new(service))
        .oneshot(
            Request::delete("/api/notifications/notif-3")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(repository.records.lock().expect("mutex").len(), 2);
}

#[tokio::test]
async fn send_route_creates_notification() {
    let (service, _) = build_service();
    let body = serde_json::to_vec(&send_request(RecipientGroup::Installers)).unwrap();
    let response = notification_router(Arc::new(service))
        .oneshot(
            Request::post("/api/contractors/contractor-1/send-notification")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload["recipients"],
        json!(["installer-1", "installer-2", "installer-3"])
    );
    assert_eq!(payload["type"], "General");
    assert_eq!(payload["read"], false);
}

#[tokio::test]
async fn send_route_maps_errors_to_status_codes() {
    let (service, _) = build_service();
    let router = notification_router(Arc::new(service));

    let blank = json!({
        "type": "Warning",
        "title": "",
        "message": "Check your unit",
        "recipientType": "both",
    });
    let response = router
        .clone()
        .oneshot(
            Request::post("/api/contractors/contractor-1/send-notification")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(blank.to_string()))
                .unwrap(),
        )
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = router
        .oneshot(
            Request::post("/api/contractors/contractor-42/send-notification")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    serde_json::to_vec(&send_request(RecipientGroup::Both)).unwrap(),
                ))
                .unwrap(),
        )
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn repository_outage_is_internal_error() {
    let response = notification_router(Arc::new(unavailable_service()))
        .oneshot(Request::get("/api/notifications").body(Body::empty()).unwrap())
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let payload = read_json_body(response).await;
    assert_eq!(payload["error"], "repository unavailable: inbox offline");
}
