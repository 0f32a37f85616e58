//! Homeowner and installer inbox: listing, read tracking, and contractor broadcasts.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    Notification, NotificationId, NotificationType, ProductReference, RecipientGroup,
    SendNotificationRequest,
};
pub use repository::{NotificationRepository, RepositoryError};
pub use router::notification_router;
pub use service::{NotificationService, NotificationServiceError};
