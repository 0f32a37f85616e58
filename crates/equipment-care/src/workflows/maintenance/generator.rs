use super::domain::{
    Contact, Contractor, Location, MaintenanceRecord, MaintenanceType, PerformanceMetrics,
    Product, ProductType,
};
use super::schedule::calculate_next_maintenance;
use super::status::determine_health_status;
use crate::config::FleetConfig;
use crate::workflows::notifications::domain::{Notification, NotificationId, NotificationType};
use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::debug;

const CITIES: [&str; 5] = [
    "Springfield",
    "Riverdale",
    "Centerville",
    "Oakwood",
    "Pine Valley",
];
const STATES: [&str; 5] = ["NY", "CA", "TX", "FL", "IL"];
const UNITS_PER_INSTALLER: usize = 3;
const INSTALL_WINDOW_DAYS: i64 = 365 * 2;
const SERVICE_WINDOW_DAYS: i64 = 180;
const NEW_INSTALL_GRACE_DAYS: i64 = 30;

/// Products, contractors and inbox contents generated together for one session.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetSnapshot {
    pub generated_at: DateTime<Utc>,
    pub products: Vec<Product>,
    pub contractors: Vec<Contractor>,
}

impl FleetSnapshot {
    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    pub fn contractor(&self, id: &str) -> Option<&Contractor> {
        self.contractors.iter().find(|contractor| contractor.id == id)
    }
}

/// Builds a seeded or entropy-backed random source for fixture generation.
pub fn fleet_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Generates the fleet and a matching notification inbox as configured.
pub fn generate_fixture<R: Rng + ?Sized>(
    config: &FleetConfig,
    now: DateTime<Utc>,
    rng: &mut R,
) -> (FleetSnapshot, Vec<Notification>) {
    let products = generate_mock_products(config.size, now, rng);
    let contractors = generate_mock_contractors(config.contractor_count);
    let notifications = generate_mock_notifications(config.notification_count, now, rng);

    debug!(
        products = products.len(),
        contractors = contractors.len(),
        notifications = notifications.len(),
        "generated synthetic fleet"
    );

    (
        FleetSnapshot {
            generated_at: now,
            products,
            contractors,
        },
        notifications,
    )
}

pub fn generate_mock_products<R: Rng + ?Sized>(
    count: usize,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Vec<Product> {
    (0..count).map(|index| mock_product(index, now, rng)).collect()
}

fn mock_product<R: Rng + ?Sized>(index: usize, now: DateTime<Utc>, rng: &mut R) -> Product {
    let id = format!("prod-{}", index + 1);
    let types = ProductType::ordered();
    let product_type = types[rng.gen_range(0..types.len())];

    // Service date is drawn independently of the install date and may precede it.
    let install_date = random_date_in_past(INSTALL_WINDOW_DAYS, now, rng);
    let last_service_date = random_date_in_past(SERVICE_WINDOW_DAYS, now, rng);
    let total_hours_run = f64::from(rng.gen_range(50u32..500));

    let maintenance_history = mock_history(&id, install_date, total_hours_run, now);
    let status = determine_health_status(total_hours_run, install_date, Some(last_service_date), now);
    let projection =
        calculate_next_maintenance(product_type, total_hours_run, Some(last_service_date), now);

    let installer_number = index / UNITS_PER_INSTALLER + 1;
    let owner_number = index + 1;

    Product {
        serial_number: format!("SN-{}", 100_000 + index),
        name: format!("{} {}W", product_type.label(), rng.gen_range(5000..10000)),
        product_type,
        manufacturer: "Generac".to_string(),
        model: format!(
            "Model {}-{}",
            char::from(b'A' + rng.gen_range(0..26u8)),
            1000 + index
        ),
        install_date,
        last_service_date: Some(last_service_date),
        total_hours_run,
        status,
        owner: Contact {
            id: format!("owner-{owner_number}"),
            name: format!("Homeowner {owner_number}"),
            email: format!("homeowner{owner_number}@example.com"),
            phone: Some(format!("(555) {}-{}", 100 + index, 1000 + index)),
        },
        installer: Contact {
            id: format!("installer-{installer_number}"),
            name: format!("Installer Company {installer_number}"),
            email: format!("installer{installer_number}@example.com"),
            phone: Some(format!(
                "(555) {}-{}",
                199 + installer_number,
                1999 + installer_number
            )),
        },
        location: Location {
            address: format!("{} Main St", 1000 + index),
            city: CITIES[index % CITIES.len()].to_string(),
            state: STATES[index % STATES.len()].to_string(),
            zip: format!("{}", 10_000 + (index * 123) % 90_000),
        },
        weekly_usage: (0..7).map(|_| f64::from(rng.gen_range(0u32..10))).collect(),
        maintenance_history,
        next_maintenance_date: Some(projection.date),
        hours_until_maintenance: Some(projection.hours),
        performance_metrics: Some(PerformanceMetrics {
            efficiency: f64::from(75 + rng.gen_range(0u32..25)),
            reliability: f64::from(70 + rng.gen_range(0u32..30)),
            emissions: f64::from(60 + rng.gen_range(0u32..40)),
        }),
        id,
    }
}

fn mock_history(
    product_id: &str,
    install_date: DateTime<Utc>,
    hours_run: f64,
    now: DateTime<Utc>,
) -> Vec<MaintenanceRecord> {
    if now - install_date < Duration::days(NEW_INSTALL_GRACE_DAYS) {
        return Vec::new();
    }

    let record = |sequence: u32,
                  maintenance_type: MaintenanceType,
                  description: &str,
                  performed: DateTime<Utc>,
                  hours: f64,
                  technician: &str,
                  notes: &str| MaintenanceRecord {
        id: format!("maint-{product_id}-{sequence}"),
        product_id: product_id.to_string(),
        maintenance_type,
        description: description.to_string(),
        date_performed: Some(performed),
        hours_at_service: Some(hours),
        technician: Some(technician.to_string()),
        notes: Some(notes.to_string()),
    };

    let mut records = vec![record(
        1,
        MaintenanceType::Initial,
        "Initial maintenance service",
        install_date + Duration::days(14),
        25.0,
        "John Smith",
        "Initial service completed per manufacturer guidelines.",
    )];

    if hours_run > 100.0 {
        let midpoint = install_date + (now - install_date) / 2;
        records.push(record(
            2,
            MaintenanceType::Routine,
            "Routine maintenance service",
            midpoint,
            (hours_run / 2.0).floor(),
            "Alice Johnson",
            "Routine oil change and inspection. System operating within normal parameters.",
        ));

        if hours_run > 300.0 {
            records.push(record(
                3,
                MaintenanceType::LongTerm,
                "Long-term maintenance service",
                midpoint + (now - midpoint) / 2,
                (hours_run * 0.75).floor(),
                "Bob Williams",
                "Full tune-up performed. Replaced spark plugs and air filter.",
            ));
        }
    }

    records
}

pub fn generate_mock_contractors(count: usize) -> Vec<Contractor> {
    (0..count)
        .map(|index| {
            let number = index + 1;
            Contractor {
                id: format!("contractor-{number}"),
                name: format!("Contractor Company {number}"),
                email: format!("contact@contractor{number}.com"),
                phone: format!("(555) {}-{}", 100 + index, 2000 + index),
                company: format!("Power Maintenance Solutions {number}"),
                installers: (0..3)
                    .map(|offset| format!("installer-{}", offset + 1 + index * 3))
                    .collect(),
                homeowners: (0..5)
                    .map(|offset| format!("owner-{}", offset + 1 + index * 5))
                    .collect(),
            }
        })
        .collect()
}

pub fn generate_mock_notifications<R: Rng + ?Sized>(
    count: usize,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Vec<Notification> {
    const EQUIPMENT: [&str; 3] = ["generator", "pressure washer", "pump"];

    (0..count)
        .map(|index| {
            let types = NotificationType::ordered();
            let notification_type = types[rng.gen_range(0..types.len())];
            let (title, message) = match notification_type {
                NotificationType::MaintenanceDue => (
                    "Scheduled Maintenance Due".to_string(),
                    format!(
                        "Maintenance is due for your {} in the next 30 days. Please schedule service.",
                        EQUIPMENT[index % EQUIPMENT.len()]
                    ),
                ),
                NotificationType::CriticalAlert => (
                    "Critical System Alert".to_string(),
                    "Your system has reported critical issues that require immediate attention. Please contact service.".to_string(),
                ),
                NotificationType::Warning => (
                    "System Warning".to_string(),
                    "Your system has reported unusual behavior. Consider scheduling a check-up.".to_string(),
                ),
                NotificationType::General => (
                    "System Update".to_string(),
                    "Your system has received a software update with improved features.".to_string(),
                ),
            };

            Notification {
                id: NotificationId(format!("notif-{}", index + 1)),
                notification_type,
                title,
                message,
                recipients: vec![format!("owner-{}", index % 5 + 1)],
                product_id: Some(format!("prod-{}", index % 10 + 1)),
                created_at: random_date_in_past(index as i64 * 2, now, rng),
                read: index * 2 > count,
                scheduled_for: (index % 3 == 0).then(|| now + Duration::days(index as i64)),
            }
        })
        .collect()
}

/// Uniform whole-day offset in `[0, max_days_ago)` before `now`.
fn random_date_in_past<R: Rng + ?Sized>(
    max_days_ago: i64,
    now: DateTime<Utc>,
    rng: &mut R,
) -> DateTime<Utc> {
    if max_days_ago <= 0 {
        return now;
    }
    now - Duration::days(rng.gen_range(0..max_days_ago))
}
