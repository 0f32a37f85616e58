use super::catalog::MaintenanceCatalog;
use super::domain::ProductType;
use chrono::{DateTime, Duration, Months, Utc};
use serde::Serialize;

pub const DEFAULT_HOURS_INTERVAL: u32 = 100;
pub const DEFAULT_MONTHS_INTERVAL: u32 = 12;
const FALLBACK_MONTHS: u32 = 3;
const FALLBACK_HOURS: u32 = 100;

/// When the next service is due and roughly how many operating hours remain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceProjection {
    pub date: DateTime<Utc>,
    pub hours: u32,
}

pub fn calculate_next_maintenance(
    product_type: ProductType,
    hours_run: f64,
    last_service_date: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> MaintenanceProjection {
    calculate_next_maintenance_with(
        MaintenanceCatalog::standard(),
        product_type,
        hours_run,
        last_service_date,
        now,
    )
}

/// Projects the next service from the first routine recommendation in `catalog`.
///
/// Hour and calendar intervals are both evaluated and the sooner one wins. Remaining
/// hours convert to days at one operating hour per day. A calendar due date already
/// in the past is reported as due `now` with zero hours left.
pub fn calculate_next_maintenance_with(
    catalog: &MaintenanceCatalog,
    product_type: ProductType,
    hours_run: f64,
    last_service_date: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> MaintenanceProjection {
    let Some(routine) = catalog.routine_for(product_type) else {
        return MaintenanceProjection {
            date: add_months(now, FALLBACK_MONTHS),
            hours: FALLBACK_HOURS,
        };
    };

    let hours_interval = routine
        .hours_interval
        .filter(|hours| *hours > 0)
        .unwrap_or(DEFAULT_HOURS_INTERVAL);
    let months_interval = routine
        .months_interval
        .filter(|months| *months > 0)
        .unwrap_or(DEFAULT_MONTHS_INTERVAL);

    let hours_remaining = remaining_hours(hours_run, hours_interval);
    let next_service_date = add_months(last_service_date.unwrap_or(now), months_interval);
    let hour_based_date = now + Duration::days(i64::from(hours_remaining));

    if hour_based_date < next_service_date {
        return MaintenanceProjection {
            date: hour_based_date,
            hours: hours_remaining,
        };
    }

    if next_service_date <= now {
        return MaintenanceProjection {
            date: now,
            hours: 0,
        };
    }

    let gap_hours = (next_service_date - now).num_hours().max(0);
    MaintenanceProjection {
        date: next_service_date,
        hours: u32::try_from(gap_hours).unwrap_or(u32::MAX),
    }
}

/// Whole operating hours left in the current service interval.
fn remaining_hours(hours_run: f64, interval: u32) -> u32 {
    let interval = f64::from(interval);
    let into_interval = hours_run.max(0.0) % interval;
    (interval - into_interval).max(0.0).floor() as u32
}

fn add_months(from: DateTime<Utc>, months: u32) -> DateTime<Utc> {
    from.checked_add_months(Months::new(months))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::maintenance::domain::{MaintenanceRecommendation, MaintenanceType};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn hour_interval_wins_when_sooner() {
        let last_service = now() - Months::new(6);
        let projection =
            calculate_next_maintenance(ProductType::PortableGenerator, 250.0, Some(last_service), now());
        assert_eq!(projection.hours, 50);
        assert_eq!(projection.date, now() + Duration::days(50));
    }

    #[test]
    fn calendar_interval_wins_when_sooner() {
        let last_service = now() - Months::new(11);
        let projection =
            calculate_next_maintenance(ProductType::InverterGenerator, 110.0, Some(last_service), now());
        let due = last_service + Months::new(12);
        assert_eq!(projection.date, due);
        assert_eq!(projection.hours as i64, (due - now()).num_hours());
    }

    #[test]
    fn missing_hour_interval_defaults_to_one_hundred() {
        let projection =
            calculate_next_maintenance(ProductType::PressureWasher, 430.0, Some(now()), now());
        assert_eq!(projection.hours, 70);
        assert_eq!(projection.date, now() + Duration::days(70));
    }

    #[test]
    fn exact_interval_multiple_needs_a_full_interval() {
        let projection =
            calculate_next_maintenance(ProductType::HomeStandbyGenerator, 400.0, None, now());
        assert_eq!(projection.hours, 200);
        assert_eq!(projection.date, now() + Duration::days(200));
    }

    #[test]
    fn missing_service_date_counts_from_now() {
        let projection =
            calculate_next_maintenance(ProductType::WaterTrashPump, 10.0, None, now());
        assert_eq!(projection.hours, 90);
        assert!(projection.date < now() + Months::new(12));
    }

    #[test]
    fn overdue_calendar_service_is_due_now() {
        let last_service = now() - Months::new(30);
        let projection =
            calculate_next_maintenance(ProductType::PortableGenerator, 20.0, Some(last_service), now());
        assert_eq!(projection, MaintenanceProjection { date: now(), hours: 0 });
    }

    #[test]
    fn never_projects_into_the_past() {
        for product_type in ProductType::ordered() {
            for hours in [0.0, 49.0, 99.0, 100.0, 250.5, 499.0] {
                for months_ago in [0, 3, 6, 11, 12, 13, 36] {
                    let last_service = now() - Months::new(months_ago);
                    let projection =
                        calculate_next_maintenance(product_type, hours, Some(last_service), now());
                    assert!(projection.date >= now(), "{product_type} {hours} {months_ago}");
                }
            }
        }
    }

    #[test]
    fn falls_back_without_a_routine_entry() {
        let catalog = MaintenanceCatalog::from_recommendations(vec![MaintenanceRecommendation {
            id: "rec-x",
            product_type: ProductType::PortableGenerator,
            maintenance_type: MaintenanceType::Initial,
            description: "First oil change",
            hours_interval: Some(25),
            months_interval: None,
            interval_description: "First ~25 hours",
        }]);
        let projection = calculate_next_maintenance_with(
            &catalog,
            ProductType::PortableGenerator,
            10.0,
            None,
            now(),
        );
        assert_eq!(projection.hours, 100);
        assert_eq!(projection.date, now() + Months::new(3));
    }
}
