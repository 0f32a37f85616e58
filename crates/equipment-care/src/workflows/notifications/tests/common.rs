use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::Value;

use crate::clock::FixedClock;
use crate::config::FleetConfig;
use crate::workflows::maintenance::generator::{fleet_rng, generate_fixture, FleetSnapshot};
use crate::workflows::notifications::domain::{
    Notification, NotificationId, NotificationType, RecipientGroup, SendNotificationRequest,
};
use crate::workflows::notifications::repository::{NotificationRepository, RepositoryError};
use crate::workflows::notifications::NotificationService;

pub(super) fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

pub(super) fn fleet() -> Arc<FleetSnapshot> {
    let config = FleetConfig {
        size: 6,
        seed: Some(42),
        notification_count: 0,
        contractor_count: 2,
    };
    let (fleet, _) = generate_fixture(&config, now(), &mut fleet_rng(config.seed));
    Arc::new(fleet)
}

pub(super) fn notification(id: &str, recipient: &str, days_ago: i64) -> Notification {
    Notification {
        id: NotificationId(id.to_string()),
        notification_type: NotificationType::MaintenanceDue,
        title: "Scheduled Maintenance Due".to_string(),
        message: "Maintenance is due for your generator in the next 30 days.".to_string(),
        recipients: vec![recipient.to_string()],
        product_id: Some("prod-1".to_string()),
        created_at: now() - Duration::days(days_ago),
        read: false,
        scheduled_for: None,
    }
}

pub(super) fn send_request(recipient_type: RecipientGroup) -> SendNotificationRequest {
    SendNotificationRequest {
        notification_type: NotificationType::General,
        title: "Seasonal check-up".to_string(),
        message: "Book your spring inspection before the busy season.".to_string(),
        recipient_type,
        product_id: None,
        scheduled_for: None,
    }
}

pub(super) fn build_service() -> (NotificationService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    for (id, recipient, days_ago) in [
        ("notif-1", "owner-1", 3),
        ("notif-2", "owner-2", 1),
        ("notif-3", "owner-1", 0),
    ] {
        repository
            .insert(notification(id, recipient, days_ago))
            .expect("seed insert");
    }
    let service = NotificationService::new(
        repository.clone(),
        fleet(),
        Arc::new(FixedClock(now())),
    );
    (service, repository)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<NotificationId, Notification>>>,
}

impl NotificationRepository for MemoryRepository {
    fn insert(&self, notification: Notification) -> Result<Notification, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&notification.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(notification.id.clone(), notification.clone());
        Ok(notification)
    }

    fn fetch(&self, id: &NotificationId) -> Result<Option<Notification>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<Notification>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.values().cloned().collect())
    }

    fn update(&self, notification: Notification) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(notification.id.clone(), notification);
        Ok(())
    }

    fn remove(&self, id: &NotificationId) -> Result<Notification, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.remove(id).ok_or(RepositoryError::NotFound)
    }
}

pub(super) struct UnavailableRepository;

impl NotificationRepository for UnavailableRepository {
    fn insert(&self, _notification: Notification) -> Result<Notification, RepositoryError> {
        Err(RepositoryError::Unavailable("inbox offline".to_string()))
    }

    fn fetch(&self, _id: &NotificationId) -> Result<Option<Notification>, RepositoryError> {
        Err(RepositoryError::Unavailable("inbox offline".to_string()))
    }

    fn list(&self) -> Result<Vec<Notification>, RepositoryError> {
        Err(RepositoryError::Unavailable("inbox offline".to_string()))
    }

    fn update(&self, _notification: Notification) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("inbox offline".to_string()))
    }

    fn remove(&self, _id: &NotificationId) -> Result<Notification, RepositoryError> {
        Err(RepositoryError::Unavailable("inbox offline".to_string()))
    }
}

pub(super) fn unavailable_service() -> NotificationService<UnavailableRepository> {
    NotificationService::new(
        Arc::new(UnavailableRepository),
        fleet(),
        Arc::new(FixedClock(now())),
    )
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1 << 16)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
