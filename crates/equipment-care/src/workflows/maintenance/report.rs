use super::domain::{Contractor, HealthStatus, Product};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

const DUE_SOON_DAYS: i64 = 30;
const TASK_HOURS_HORIZON: u32 = 200;
const DEFAULT_HEALTH_SCORE: f64 = 80.0;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCount {
    pub status: HealthStatus,
    pub count: usize,
}

/// Dashboard aggregates over a fleet as of one instant.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetSummary {
    pub evaluated_at: DateTime<Utc>,
    pub total: usize,
    pub by_status: Vec<StatusCount>,
    pub due_within_30_days: usize,
    pub average_efficiency: Option<f64>,
}

impl FleetSummary {
    /// Uses each product's health as of `now` rather than its stored snapshot.
    pub fn from_products(products: &[Product], now: DateTime<Utc>) -> Self {
        let by_status = HealthStatus::ordered()
            .into_iter()
            .map(|status| StatusCount {
                status,
                count: products
                    .iter()
                    .filter(|product| product.effective_status(now) == status)
                    .count(),
            })
            .collect();

        let horizon = now + Duration::days(DUE_SOON_DAYS);
        let due_within_30_days = products
            .iter()
            .filter(|product| {
                product
                    .next_maintenance_date
                    .is_some_and(|due| due <= horizon)
            })
            .count();

        let efficiencies: Vec<f64> = products
            .iter()
            .filter_map(|product| product.performance_metrics.map(|m| m.efficiency))
            .collect();
        let average_efficiency = if efficiencies.is_empty() {
            None
        } else {
            Some(efficiencies.iter().sum::<f64>() / efficiencies.len() as f64)
        };

        Self {
            evaluated_at: now,
            total: products.len(),
            by_status,
            due_within_30_days,
            average_efficiency,
        }
    }

    pub fn count(&self, status: HealthStatus) -> usize {
        self.by_status
            .iter()
            .find(|entry| entry.status == status)
            .map(|entry| entry.count)
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceTask {
    pub product_id: String,
    pub product_name: String,
    pub location: String,
    pub due_in_hours: u32,
    pub status: HealthStatus,
}

/// Products approaching service, soonest first, optionally narrowed to one status.
/// Task status is each product's health as of `now`.
pub fn maintenance_tasks(
    products: &[Product],
    status: Option<HealthStatus>,
    now: DateTime<Utc>,
) -> Vec<MaintenanceTask> {
    let mut tasks: Vec<MaintenanceTask> = products
        .iter()
        .filter_map(|product| {
            let hours = product.hours_until_maintenance?;
            (hours < TASK_HOURS_HORIZON).then(|| MaintenanceTask {
                product_id: product.id.clone(),
                product_name: product.name.clone(),
                location: format!("{}, {}", product.location.city, product.location.state),
                due_in_hours: hours,
                status: product.effective_status(now),
            })
        })
        .filter(|task| status.map_or(true, |wanted| task.status == wanted))
        .collect();
    tasks.sort_by_key(|task| task.due_in_hours);
    tasks
}

pub fn products_for_installer<'a>(products: &'a [Product], installer_id: &str) -> Vec<&'a Product> {
    products
        .iter()
        .filter(|product| product.installer.id == installer_id)
        .collect()
}

/// Products installed by any of the contractor's installers.
pub fn products_for_contractor<'a>(
    products: &'a [Product],
    contractor: &Contractor,
) -> Vec<&'a Product> {
    products
        .iter()
        .filter(|product| contractor.installers.contains(&product.installer.id))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentPrediction {
    pub component: &'static str,
    pub health_score: f64,
    pub maintenance_recommendation: &'static str,
    pub potential_issues: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictiveSummary {
    pub product_id: String,
    pub status: HealthStatus,
    pub hours_until_maintenance: Option<u32>,
    pub next_maintenance_date: Option<DateTime<Utc>>,
    pub warning_message: Option<String>,
    pub alert_message: Option<String>,
    pub predictions: Vec<ComponentPrediction>,
}

impl PredictiveSummary {
    pub fn for_product(product: &Product, now: DateTime<Utc>) -> Self {
        let product = &product.as_of(now);
        let degraded = product.status != HealthStatus::Healthy;
        let due_soon = product
            .hours_until_maintenance
            .is_some_and(|hours| hours < super::status::UPCOMING_SERVICE_HOURS);

        let overall = ComponentPrediction {
            component: "Overall System",
            health_score: product
                .performance_metrics
                .map(|metrics| metrics.reliability)
                .unwrap_or(DEFAULT_HEALTH_SCORE),
            maintenance_recommendation: if due_soon {
                "Schedule routine maintenance"
            } else {
                "No immediate action needed"
            },
            potential_issues: if degraded {
                vec!["Performance degradation"]
            } else {
                Vec::new()
            },
        };

        Self {
            product_id: product.id.clone(),
            status: product.status,
            hours_until_maintenance: product.hours_until_maintenance,
            next_maintenance_date: product.next_maintenance_date,
            warning_message: degraded
                .then(|| format!("{} requires maintenance attention.", product.name)),
            alert_message: product.alert_message(),
            predictions: vec![overall],
        }
    }
}
