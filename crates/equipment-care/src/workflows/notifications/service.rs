use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use super::domain::{Notification, NotificationId, SendNotificationRequest};
use super::repository::{NotificationRepository, RepositoryError};
use crate::clock::Clock;
use crate::workflows::maintenance::domain::ValidationError;
use crate::workflows::maintenance::generator::FleetSnapshot;

/// Inbox operations over a repository, scoped to one fleet snapshot.
pub struct NotificationService<R> {
    repository: Arc<R>,
    fleet: Arc<FleetSnapshot>,
    clock: Arc<dyn Clock>,
}

impl<R> NotificationService<R>
where
    R: NotificationRepository + 'static,
{
    pub fn new(repository: Arc<R>, fleet: Arc<FleetSnapshot>, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository,
            fleet,
            clock,
        }
    }

    pub fn fleet(&self) -> &FleetSnapshot {
        &self.fleet
    }

    /// Every notification, or those addressed to `recipient`, newest first.
    pub fn list(
        &self,
        recipient: Option<&str>,
    ) -> Result<Vec<Notification>, NotificationServiceError> {
        let mut notifications: Vec<Notification> = self
            .repository
            .list()?
            .into_iter()
            .filter(|notification| recipient.map_or(true, |id| notification.is_addressed_to(id)))
            .collect();
        notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(notifications)
    }

    pub fn mark_read(&self, id: &NotificationId) -> Result<Notification, NotificationServiceError> {
        let mut notification = self
            .repository
            .fetch(id)?
            .ok_or_else(|| NotificationServiceError::NotFound(id.clone()))?;
        notification.read = true;
        self.repository.update(notification.clone())?;
        debug!(notification_id = %id, "notification marked read");
        Ok(notification)
    }

    pub fn dismiss(&self, id: &NotificationId) -> Result<Notification, NotificationServiceError> {
        match self.repository.remove(id) {
            Ok(removed) => {
                debug!(notification_id = %id, "notification dismissed");
                Ok(removed)
            }
            Err(RepositoryError::NotFound) => Err(NotificationServiceError::NotFound(id.clone())),
            Err(other) => Err(other.into()),
        }
    }

    /// Fans a contractor broadcast out to their homeowners and/or installers.
    pub fn send(
        &self,
        contractor_id: &str,
        request: SendNotificationRequest,
    ) -> Result<Notification, NotificationServiceError> {
        let contractor = self
            .fleet
            .contractor(contractor_id)
            .ok_or_else(|| NotificationServiceError::ContractorNotFound(contractor_id.to_string()))?;
        request.validate()?;

        let group = request.recipient_type;
        let mut recipients = Vec::new();
        if group.includes_homeowners() {
            recipients.extend(contractor.homeowners.iter().cloned());
        }
        if group.includes_installers() {
            recipients.extend(contractor.installers.iter().cloned());
        }

        let notification = Notification {
            id: NotificationId(format!("notif-{}", Uuid::new_v4())),
            notification_type: request.notification_type,
            title: request.title,
            message: request.message,
            recipients,
            product_id: request.product_id,
            created_at: self.clock.now(),
            read: false,
            scheduled_for: request.scheduled_for,
        };
        notification.validate()?;

        let stored = self.repository.insert(notification)?;
        info!(
            contractor_id,
            notification_id = %stored.id,
            recipients = stored.recipients.len(),
            "contractor notification sent"
        );
        Ok(stored)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum NotificationServiceError {
    #[error("notification {0} not found")]
    NotFound(NotificationId),
    #[error("contractor {0} not found")]
    ContractorNotFound(String),
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
