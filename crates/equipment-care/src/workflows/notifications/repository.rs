use super::domain::{Notification, NotificationId};

/// Storage abstraction for the inbox so the service can be exercised in isolation.
pub trait NotificationRepository: Send + Sync {
    fn insert(&self, notification: Notification) -> Result<Notification, RepositoryError>;
    fn fetch(&self, id: &NotificationId) -> Result<Option<Notification>, RepositoryError>;
    fn list(&self) -> Result<Vec<Notification>, RepositoryError>;
    fn update(&self, notification: Notification) -> Result<(), RepositoryError>;
    fn remove(&self, id: &NotificationId) -> Result<Notification, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
