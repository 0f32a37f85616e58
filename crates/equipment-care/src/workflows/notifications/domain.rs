use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::workflows::maintenance::domain::{require, Product, ValidationError};
use crate::workflows::maintenance::generator::FleetSnapshot;

/// Identifier wrapper for inbox entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(pub String);

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NotificationType {
    #[serde(rename = "Maintenance Due")]
    MaintenanceDue,
    #[serde(rename = "Critical Alert")]
    CriticalAlert,
    Warning,
    General,
}

impl NotificationType {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::MaintenanceDue,
            Self::CriticalAlert,
            Self::Warning,
            Self::General,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::MaintenanceDue => "Maintenance Due",
            Self::CriticalAlert => "Critical Alert",
            Self::Warning => "Warning",
            Self::General => "General",
        }
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A message addressed to homeowners and/or installers, optionally about one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: NotificationId,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub title: String,
    pub message: String,
    pub recipients: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub read: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_for: Option<DateTime<Utc>>,
}

/// Outcome of following a notification's weak product reference.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProductReference<'a> {
    Unlinked,
    Found(&'a Product),
    Missing(&'a str),
}

impl Notification {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("notification.id", &self.id.0)?;
        require("notification.title", &self.title)?;
        require("notification.message", &self.message)?;
        if self.recipients.is_empty() {
            return Err(ValidationError::MissingField {
                field: "notification.recipients",
            });
        }
        for recipient in &self.recipients {
            require("notification.recipients", recipient)?;
        }
        Ok(())
    }

    pub fn is_addressed_to(&self, recipient_id: &str) -> bool {
        self.recipients.iter().any(|recipient| recipient == recipient_id)
    }

    pub fn product<'a>(&'a self, fleet: &'a FleetSnapshot) -> ProductReference<'a> {
        match self.product_id.as_deref() {
            None => ProductReference::Unlinked,
            Some(id) => fleet
                .product(id)
                .map_or(ProductReference::Missing(id), ProductReference::Found),
        }
    }
}

/// Audience selector for contractor broadcasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecipientGroup {
    Homeowners,
    Installers,
    Both,
}

impl RecipientGroup {
    pub const fn includes_homeowners(self) -> bool {
        matches!(self, Self::Homeowners | Self::Both)
    }

    pub const fn includes_installers(self) -> bool {
        matches!(self, Self::Installers | Self::Both)
    }
}

/// Request body for `POST /api/contractors/:id/send-notification`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendNotificationRequest {
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub title: String,
    pub message: String,
    pub recipient_type: RecipientGroup,
    #[serde(default)]
    pub product_id: Option<String>,
    #[serde(default)]
    pub scheduled_for: Option<DateTime<Utc>>,
}

impl SendNotificationRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("title", &self.title)?;
        require("message", &self.message)
    }
}
