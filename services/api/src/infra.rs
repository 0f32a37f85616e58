use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use equipment_care::workflows::maintenance::HealthStatus;
use equipment_care::workflows::notifications::{
    Notification, NotificationId, NotificationRepository, RepositoryError,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryNotificationRepository {
    records: Arc<Mutex<HashMap<NotificationId, Notification>>>,
}

impl InMemoryNotificationRepository {
    pub(crate) fn seeded(notifications: Vec<Notification>) -> Self {
        let records = notifications
            .into_iter()
            .map(|notification| (notification.id.clone(), notification))
            .collect();
        Self {
            records: Arc::new(Mutex::new(records)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<NotificationId, Notification>>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("inbox mutex poisoned".to_string()))
    }
}

impl NotificationRepository for InMemoryNotificationRepository {
    fn insert(&self, notification: Notification) -> Result<Notification, RepositoryError> {
        let mut guard = self.lock()?;
        if guard.contains_key(&notification.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(notification.id.clone(), notification.clone());
        Ok(notification)
    }

    fn fetch(&self, id: &NotificationId) -> Result<Option<Notification>, RepositoryError> {
        Ok(self.lock()?.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<Notification>, RepositoryError> {
        Ok(self.lock()?.values().cloned().collect())
    }

    fn update(&self, notification: Notification) -> Result<(), RepositoryError> {
        let mut guard = self.lock()?;
        if guard.contains_key(&notification.id) {
            guard.insert(notification.id.clone(), notification);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn remove(&self, id: &NotificationId) -> Result<Notification, RepositoryError> {
        self.lock()?.remove(id).ok_or(RepositoryError::NotFound)
    }
}

/// Accepts RFC 3339 timestamps or bare `YYYY-MM-DD` dates (midnight UTC).
pub(crate) fn parse_as_of(raw: &str) -> Result<DateTime<Utc>, String> {
    let raw = raw.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(timestamp.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::default()).and_utc())
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD or RFC 3339 ({err})"))
}

pub(crate) fn parse_status(raw: &str) -> Result<HealthStatus, String> {
    HealthStatus::ordered()
        .into_iter()
        .find(|status| status.label().eq_ignore_ascii_case(raw.trim()))
        .ok_or_else(|| {
            let labels: Vec<&str> = HealthStatus::ordered()
                .iter()
                .map(|status| status.label())
                .collect();
            format!("unknown status '{raw}', expected one of {}", labels.join(", "))
        })
}
