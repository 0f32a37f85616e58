use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Whole days elapsed from `since` to `now`, floored (a future `since` yields a negative count).
pub fn days_between(since: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - since).num_milliseconds().div_euclid(MILLIS_PER_DAY)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductType {
    #[serde(rename = "Home Standby Generator")]
    HomeStandbyGenerator,
    #[serde(rename = "Portable Generator")]
    PortableGenerator,
    #[serde(rename = "Inverter Generator")]
    InverterGenerator,
    #[serde(rename = "Pressure Washer")]
    PressureWasher,
    #[serde(rename = "Water/Trash Pump")]
    WaterTrashPump,
}

impl ProductType {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::HomeStandbyGenerator,
            Self::PortableGenerator,
            Self::InverterGenerator,
            Self::PressureWasher,
            Self::WaterTrashPump,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::HomeStandbyGenerator => "Home Standby Generator",
            Self::PortableGenerator => "Portable Generator",
            Self::InverterGenerator => "Inverter Generator",
            Self::PressureWasher => "Pressure Washer",
            Self::WaterTrashPump => "Water/Trash Pump",
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaintenanceType {
    Initial,
    Routine,
    #[serde(rename = "Long Term")]
    LongTerm,
    #[serde(rename = "Special Consideration")]
    Special,
}

impl MaintenanceType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Initial => "Initial",
            Self::Routine => "Routine",
            Self::LongTerm => "Long Term",
            Self::Special => "Special Consideration",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HealthStatus {
    Healthy,
    Warning,
    Critical,
    Neutral,
}

impl HealthStatus {
    pub const fn ordered() -> [Self; 4] {
        [Self::Critical, Self::Warning, Self::Healthy, Self::Neutral]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Healthy => "Healthy",
            Self::Warning => "Warning",
            Self::Critical => "Critical",
            Self::Neutral => "Neutral",
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceMetrics {
    pub efficiency: f64,
    pub reliability: f64,
    pub emissions: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRecord {
    pub id: String,
    pub product_id: String,
    #[serde(rename = "type")]
    pub maintenance_type: MaintenanceType,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_performed: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours_at_service: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technician: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl MaintenanceRecord {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("maintenance.id", &self.id)?;
        require("maintenance.productId", &self.product_id)?;
        require("maintenance.description", &self.description)?;
        if let Some(hours) = self.hours_at_service {
            require_hours("maintenance.hoursAtService", hours)?;
        }
        Ok(())
    }
}

/// Catalog entry describing a recommended service action for one product type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRecommendation {
    pub id: &'static str,
    pub product_type: ProductType,
    pub maintenance_type: MaintenanceType,
    pub description: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours_interval: Option<u32>,
    /// Calendar interval in months.
    #[serde(rename = "timeInterval", skip_serializing_if = "Option::is_none")]
    pub months_interval: Option<u32>,
    pub interval_description: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub serial_number: String,
    pub name: String,
    #[serde(rename = "type")]
    pub product_type: ProductType,
    pub manufacturer: String,
    pub model: String,
    pub install_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_service_date: Option<DateTime<Utc>>,
    pub total_hours_run: f64,
    pub status: HealthStatus,
    pub owner: Contact,
    pub installer: Contact,
    pub location: Location,
    pub weekly_usage: Vec<f64>,
    #[serde(default)]
    pub maintenance_history: Vec<MaintenanceRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_maintenance_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours_until_maintenance: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performance_metrics: Option<PerformanceMetrics>,
}

impl Product {
    /// Health as of `now`; the stored `status` is only a generation-time snapshot.
    pub fn current_health(&self, now: DateTime<Utc>) -> HealthStatus {
        super::status::determine_health_status(
            self.total_hours_run,
            self.install_date,
            self.last_service_date,
            now,
        )
    }

    /// Status every fleet view reports as of `now`. Neutral is an operator override and
    /// is never recomputed.
    pub fn effective_status(&self, now: DateTime<Utc>) -> HealthStatus {
        match self.status {
            HealthStatus::Neutral => HealthStatus::Neutral,
            _ => self.current_health(now),
        }
    }

    /// Copy of the product with `status` re-derived as of `now`.
    pub fn as_of(&self, now: DateTime<Utc>) -> Product {
        Product {
            status: self.effective_status(now),
            ..self.clone()
        }
    }

    /// Alert for the stored status; call on [`Product::as_of`] for a current reading.
    pub fn alert_message(&self) -> Option<String> {
        super::status::generate_alert_message(self)
    }

    pub fn recommendations(&self) -> Vec<&'static MaintenanceRecommendation> {
        super::catalog::recommendations_for_product(self)
    }

    /// Maintenance history ordered for display; undated records trail.
    pub fn history_most_recent_first(&self) -> Vec<&MaintenanceRecord> {
        let mut history: Vec<&MaintenanceRecord> = self.maintenance_history.iter().collect();
        history.sort_by(|a, b| b.date_performed.cmp(&a.date_performed));
        history
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require("id", &self.id)?;
        require("serialNumber", &self.serial_number)?;
        require("name", &self.name)?;
        require("manufacturer", &self.manufacturer)?;
        require("model", &self.model)?;
        require_hours("totalHoursRun", self.total_hours_run)?;

        validate_contact(&self.owner, ["owner.id", "owner.name", "owner.email"])?;
        validate_contact(
            &self.installer,
            ["installer.id", "installer.name", "installer.email"],
        )?;

        require("location.address", &self.location.address)?;
        require("location.city", &self.location.city)?;
        require("location.state", &self.location.state)?;
        require("location.zip", &self.location.zip)?;

        if self.weekly_usage.len() != 7 {
            return Err(ValidationError::WeeklyUsageLength {
                found: self.weekly_usage.len(),
            });
        }
        for hours in &self.weekly_usage {
            require_hours("weeklyUsage", *hours)?;
        }

        for record in &self.maintenance_history {
            record.validate()?;
            if record.product_id != self.id {
                return Err(ValidationError::ForeignMaintenanceRecord {
                    record_id: record.id.clone(),
                    expected: self.id.clone(),
                    found: record.product_id.clone(),
                });
            }
        }

        if let Some(metrics) = &self.performance_metrics {
            require_percentage("performanceMetrics.efficiency", metrics.efficiency)?;
            require_percentage("performanceMetrics.reliability", metrics.reliability)?;
            require_percentage("performanceMetrics.emissions", metrics.emissions)?;
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contractor {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub installers: Vec<String>,
    pub homeowners: Vec<String>,
}

impl Contractor {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("contractor.id", &self.id)?;
        require("contractor.name", &self.name)?;
        require("contractor.phone", &self.phone)?;
        require("contractor.company", &self.company)?;
        if !is_plausible_email(&self.email) {
            return Err(ValidationError::InvalidEmail {
                field: "contractor.email",
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    MissingField { field: &'static str },
    #[error("{field} must be a valid email address")]
    InvalidEmail { field: &'static str },
    #[error("{field} must be a finite, non-negative number of hours")]
    InvalidHours { field: &'static str },
    #[error("{field} must be between 0 and 100")]
    PercentageOutOfRange { field: &'static str },
    #[error("weeklyUsage must hold exactly 7 days, found {found}")]
    WeeklyUsageLength { found: usize },
    #[error("maintenance record {record_id} belongs to {found}, not {expected}")]
    ForeignMaintenanceRecord {
        record_id: String,
        expected: String,
        found: String,
    },
}

pub(crate) fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::MissingField { field })
    } else {
        Ok(())
    }
}

fn require_hours(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ValidationError::InvalidHours { field })
    }
}

fn require_percentage(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if (0.0..=100.0).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::PercentageOutOfRange { field })
    }
}

fn validate_contact(
    contact: &Contact,
    [id, name, email]: [&'static str; 3],
) -> Result<(), ValidationError> {
    require(id, &contact.id)?;
    require(name, &contact.name)?;
    if !is_plausible_email(&contact.email) {
        return Err(ValidationError::InvalidEmail { field: email });
    }
    Ok(())
}

fn is_plausible_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        && !value.chars().any(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn contact(id: &str) -> Contact {
        Contact {
            id: id.to_string(),
            name: format!("{id} name"),
            email: format!("{id}@example.com"),
            phone: None,
        }
    }

    fn product() -> Product {
        Product {
            id: "prod-1".to_string(),
            serial_number: "SN-100000".to_string(),
            name: "Portable Generator 6500W".to_string(),
            product_type: ProductType::PortableGenerator,
            manufacturer: "Generac".to_string(),
            model: "Model A-1000".to_string(),
            install_date: now() - Duration::days(400),
            last_service_date: Some(now() - Duration::days(30)),
            total_hours_run: 120.0,
            status: HealthStatus::Healthy,
            owner: contact("owner-1"),
            installer: contact("installer-1"),
            location: Location {
                address: "1000 Main St".to_string(),
                city: "Springfield".to_string(),
                state: "NY".to_string(),
                zip: "10000".to_string(),
            },
            weekly_usage: vec![1.0, 0.0, 2.0, 3.0, 0.0, 4.0, 1.0],
            maintenance_history: vec![
                record("maint-prod-1-1", Some(now() - Duration::days(386))),
                record("maint-prod-1-2", Some(now() - Duration::days(200))),
            ],
            next_maintenance_date: None,
            hours_until_maintenance: Some(80),
            performance_metrics: Some(PerformanceMetrics {
                efficiency: 90.0,
                reliability: 85.0,
                emissions: 70.0,
            }),
        }
    }

    fn record(id: &str, date: Option<DateTime<Utc>>) -> MaintenanceRecord {
        MaintenanceRecord {
            id: id.to_string(),
            product_id: "prod-1".to_string(),
            maintenance_type: MaintenanceType::Routine,
            description: "Routine maintenance service".to_string(),
            date_performed: date,
            hours_at_service: Some(60.0),
            technician: None,
            notes: None,
        }
    }

    #[test]
    fn days_between_floors_partial_days() {
        let since = now() - Duration::hours(47);
        assert_eq!(days_between(since, now()), 1);
        let future = now() + Duration::hours(1);
        assert_eq!(days_between(future, now()), -1);
    }

    #[test]
    fn well_formed_product_validates() {
        product().validate().expect("fixture is valid");
    }

    #[test]
    fn rejects_short_weekly_usage() {
        let mut product = product();
        product.weekly_usage.pop();
        assert_eq!(
            product.validate(),
            Err(ValidationError::WeeklyUsageLength { found: 6 })
        );
    }

    #[test]
    fn rejects_negative_hours_and_bad_metrics() {
        let mut negative = product();
        negative.total_hours_run = -1.0;
        assert_eq!(
            negative.validate(),
            Err(ValidationError::InvalidHours {
                field: "totalHoursRun"
            })
        );

        let mut metrics = product();
        metrics.performance_metrics = Some(PerformanceMetrics {
            efficiency: 101.0,
            reliability: 50.0,
            emissions: 50.0,
        });
        assert_eq!(
            metrics.validate(),
            Err(ValidationError::PercentageOutOfRange {
                field: "performanceMetrics.efficiency"
            })
        );
    }

    #[test]
    fn rejects_malformed_contact_email() {
        let mut product = product();
        product.installer.email = "installer at example".to_string();
        assert_eq!(
            product.validate(),
            Err(ValidationError::InvalidEmail {
                field: "installer.email"
            })
        );
    }

    #[test]
    fn rejects_history_owned_by_another_product() {
        let mut product = product();
        product.maintenance_history[1].product_id = "prod-9".to_string();
        assert!(matches!(
            product.validate(),
            Err(ValidationError::ForeignMaintenanceRecord { ref found, .. }) if found == "prod-9"
        ));
    }

    #[test]
    fn history_orders_most_recent_first_with_undated_last() {
        let mut product = product();
        product
            .maintenance_history
            .push(record("maint-prod-1-x", None));
        let ids: Vec<&str> = product
            .history_most_recent_first()
            .into_iter()
            .map(|record| record.id.as_str())
            .collect();
        assert_eq!(ids, ["maint-prod-1-2", "maint-prod-1-1", "maint-prod-1-x"]);
    }

    #[test]
    fn enums_use_display_labels_on_the_wire() {
        let json = serde_json::to_string(&ProductType::WaterTrashPump).unwrap();
        assert_eq!(json, "\"Water/Trash Pump\"");
        let parsed: MaintenanceType = serde_json::from_str("\"Long Term\"").unwrap();
        assert_eq!(parsed, MaintenanceType::LongTerm);
    }

    #[test]
    fn product_json_uses_camel_case_keys() {
        let value = serde_json::to_value(product()).unwrap();
        assert_eq!(value["type"], "Portable Generator");
        assert_eq!(value["totalHoursRun"], 120.0);
        assert!(value.get("nextMaintenanceDate").is_none());
        assert_eq!(value["maintenanceHistory"][0]["productId"], "prod-1");
    }
}
