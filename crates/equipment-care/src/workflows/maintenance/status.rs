use super::domain::{days_between, HealthStatus, Product};
use chrono::{DateTime, Utc};

pub const CRITICAL_HOURS: f64 = 350.0;
pub const CRITICAL_DAYS_SINCE_SERVICE: i64 = 300;
pub const WARNING_HOURS: f64 = 200.0;
pub const WARNING_DAYS_SINCE_SERVICE: i64 = 180;
/// Hours alone past this mark are a warning regardless of service recency.
pub const WARNING_HOURS_ALONE: f64 = 300.0;
pub const UPCOMING_SERVICE_HOURS: u32 = 50;

/// Classifies equipment health as of `now` from usage and service recency.
///
/// Without a service date the install date stands in for it. The result depends on
/// `now`, so identical stored inputs can classify differently on different days.
pub fn determine_health_status(
    hours_run: f64,
    install_date: DateTime<Utc>,
    last_service_date: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> HealthStatus {
    let days_since_install = days_between(install_date, now);
    let days_since_service = last_service_date
        .map(|serviced| days_between(serviced, now))
        .unwrap_or(days_since_install);

    if hours_run > CRITICAL_HOURS && days_since_service > CRITICAL_DAYS_SINCE_SERVICE {
        HealthStatus::Critical
    } else if (hours_run > WARNING_HOURS && days_since_service > WARNING_DAYS_SINCE_SERVICE)
        || hours_run > WARNING_HOURS_ALONE
    {
        HealthStatus::Warning
    } else {
        HealthStatus::Healthy
    }
}

/// Alert for the product's stored status. A healthy unit alerts once fewer than
/// [`UPCOMING_SERVICE_HOURS`] remain, including when service is already due (0 hours).
pub fn generate_alert_message(product: &Product) -> Option<String> {
    match product.status {
        HealthStatus::Critical => Some(format!(
            "Immediate attention required: {} has critical indicators and may fail soon.",
            product.name
        )),
        HealthStatus::Warning => Some(format!(
            "Maintenance recommended: {} is showing early warning signs.",
            product.name
        )),
        HealthStatus::Healthy => product
            .hours_until_maintenance
            .filter(|hours| *hours < UPCOMING_SERVICE_HOURS)
            .map(|hours| {
                format!(
                    "Upcoming maintenance: {} will need service in approximately {} hours.",
                    product.name, hours
                )
            }),
        HealthStatus::Neutral => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn days_ago(days: i64) -> DateTime<Utc> {
        now() - Duration::days(days)
    }

    #[test]
    fn long_unserviced_heavy_use_is_critical() {
        for (hours, days) in [(351.0, 301), (400.0, 310), (499.0, 700)] {
            assert_eq!(
                determine_health_status(hours, days_ago(720), Some(days_ago(days)), now()),
                HealthStatus::Critical,
                "{hours}h / {days}d"
            );
        }
    }

    #[test]
    fn hours_between_300_and_350_warn_regardless_of_service() {
        for hours in [300.5, 320.0, 350.0] {
            for days in [0, 90, 400] {
                assert_eq!(
                    determine_health_status(hours, days_ago(720), Some(days_ago(days)), now()),
                    HealthStatus::Warning,
                    "{hours}h / {days}d"
                );
            }
        }
    }

    #[test]
    fn moderate_use_with_stale_service_warns() {
        assert_eq!(
            determine_health_status(250.0, days_ago(500), Some(days_ago(181)), now()),
            HealthStatus::Warning
        );
        assert_eq!(
            determine_health_status(250.0, days_ago(500), Some(days_ago(180)), now()),
            HealthStatus::Healthy
        );
    }

    #[test]
    fn light_recent_use_is_healthy() {
        for (hours, days) in [(0.0, 0), (200.0, 180), (150.0, 30)] {
            assert_eq!(
                determine_health_status(hours, days_ago(700), Some(days_ago(days)), now()),
                HealthStatus::Healthy
            );
        }
    }

    #[test]
    fn install_date_stands_in_for_missing_service() {
        assert_eq!(
            determine_health_status(360.0, days_ago(320), None, now()),
            HealthStatus::Critical
        );
        assert_eq!(
            determine_health_status(360.0, days_ago(100), None, now()),
            HealthStatus::Warning
        );
    }

    #[test]
    fn status_depends_on_the_evaluation_day() {
        let install = days_ago(600);
        let serviced = days_ago(300);
        assert_eq!(
            determine_health_status(400.0, install, Some(serviced), now()),
            HealthStatus::Warning
        );
        assert_eq!(
            determine_health_status(400.0, install, Some(serviced), now() + Duration::days(1)),
            HealthStatus::Critical
        );
    }
}
