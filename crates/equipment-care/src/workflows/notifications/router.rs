use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{NotificationId, SendNotificationRequest};
use super::repository::NotificationRepository;
use super::service::{NotificationService, NotificationServiceError};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboxQuery {
    pub recipient_id: Option<String>,
}

/// Router builder exposing the inbox and contractor broadcast endpoints.
pub fn notification_router<R>(service: Arc<NotificationService<R>>) -> Router
where
    R: NotificationRepository + 'static,
{
    Router::new()
        .route("/api/notifications", get(list_handler::<R>))
        .route("/api/notifications/:notification_id/read", put(mark_read_handler::<R>))
        .route("/api/notifications/:notification_id", delete(dismiss_handler::<R>))
        .route(
            "/api/contractors/:contractor_id/send-notification",
            post(send_handler::<R>),
        )
        .with_state(service)
}

fn error_response(error: NotificationServiceError) -> Response {
    let status = match &error {
        NotificationServiceError::NotFound(_) | NotificationServiceError::ContractorNotFound(_) => {
            StatusCode::NOT_FOUND
        }
        NotificationServiceError::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
        NotificationServiceError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({
        "error": error.to_string(),
    });
    (status, Json(payload)).into_response()
}

pub(crate) async fn list_handler<R>(
    State(service): State<Arc<NotificationService<R>>>,
    Query(query): Query<InboxQuery>,
) -> Response
where
    R: NotificationRepository + 'static,
{
    match service.list(query.recipient_id.as_deref()) {
        Ok(notifications) => (StatusCode::OK, Json(notifications)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn mark_read_handler<R>(
    State(service): State<Arc<NotificationService<R>>>,
    Path(notification_id): Path<String>,
) -> Response
where
    R: NotificationRepository + 'static,
{
    match service.mark_read(&NotificationId(notification_id)) {
        Ok(notification) => (StatusCode::OK, Json(notification)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn dismiss_handler<R>(
    State(service): State<Arc<NotificationService<R>>>,
    Path(notification_id): Path<String>,
) -> Response
where
    R: NotificationRepository + 'static,
{
    match service.dismiss(&NotificationId(notification_id)) {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn send_handler<R>(
    State(service): State<Arc<NotificationService<R>>>,
    Path(contractor_id): Path<String>,
    Json(request): Json<SendNotificationRequest>,
) -> Response
where
    R: NotificationRepository + 'static,
{
    match service.send(&contractor_id, request) {
        Ok(notification) => (StatusCode::CREATED, Json(notification)).into_response(),
        Err(error) => error_response(error),
    }
}
