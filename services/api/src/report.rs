use crate::infra::{parse_as_of, parse_status};
use chrono::{DateTime, Utc};
use clap::Args;
use equipment_care::clock::{Clock, SystemClock};
use equipment_care::config::{AppConfig, FleetConfig};
use equipment_care::error::AppError;
use equipment_care::telemetry;
use equipment_care::workflows::maintenance::{
    fleet_rng, generate_fixture, maintenance_tasks, write_fleet_csv, FleetSnapshot, FleetSummary,
    HealthStatus,
};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Args, Debug, Default)]
pub(crate) struct FleetReportArgs {
    /// Number of products to generate (defaults to APP_FLEET_SIZE)
    #[arg(long)]
    pub(crate) size: Option<usize>,
    /// Seed for reproducible fleets (defaults to APP_FLEET_SEED, else random)
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Evaluate the fleet as of this date (YYYY-MM-DD or RFC 3339; defaults to now)
    #[arg(long, value_parser = parse_as_of)]
    pub(crate) as_of: Option<DateTime<Utc>>,
    /// Include a per-product listing in the output
    #[arg(long)]
    pub(crate) list_products: bool,
    /// Only show maintenance tasks for one status (Healthy, Warning, Critical, Neutral)
    #[arg(long, value_parser = parse_status)]
    pub(crate) status: Option<HealthStatus>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct FleetExportArgs {
    /// Number of products to generate (defaults to APP_FLEET_SIZE)
    #[arg(long)]
    pub(crate) size: Option<usize>,
    /// Seed for reproducible fleets (defaults to APP_FLEET_SEED, else random)
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Generate the fleet as of this date (YYYY-MM-DD or RFC 3339; defaults to now)
    #[arg(long, value_parser = parse_as_of)]
    pub(crate) as_of: Option<DateTime<Utc>>,
    /// Write CSV to this path instead of stdout
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

pub(crate) fn run_fleet_report(args: FleetReportArgs) -> Result<(), AppError> {
    let FleetReportArgs {
        size,
        seed,
        as_of,
        list_products,
        status,
    } = args;

    let now = as_of.unwrap_or_else(|| SystemClock.now());
    let fleet = load_fleet(size, seed, now)?;
    render_fleet_report(&mut io::stdout().lock(), &fleet, now, list_products, status)?;
    Ok(())
}

pub(crate) fn run_fleet_export(args: FleetExportArgs) -> Result<(), AppError> {
    let FleetExportArgs {
        size,
        seed,
        as_of,
        output,
    } = args;

    let now = as_of.unwrap_or_else(|| SystemClock.now());
    let fleet = load_fleet(size, seed, now)?;
    match output {
        Some(path) => {
            let file = BufWriter::new(File::create(&path)?);
            write_fleet_csv(&fleet.products, file)?;
            debug!(path = %path.display(), products = fleet.products.len(), "fleet exported");
        }
        None => write_fleet_csv(&fleet.products, io::stdout().lock())?,
    }
    Ok(())
}

fn load_fleet(
    size: Option<usize>,
    seed: Option<u64>,
    now: DateTime<Utc>,
) -> Result<FleetSnapshot, AppError> {
    let app_config = AppConfig::load()?;
    telemetry::init(&app_config.telemetry)?;
    let defaults = app_config.fleet;
    let config = FleetConfig {
        size: size.unwrap_or(defaults.size),
        seed: seed.or(defaults.seed),
        notification_count: 0,
        contractor_count: defaults.contractor_count,
    };
    let (fleet, _) = generate_fixture(&config, now, &mut fleet_rng(config.seed));
    info!(
        products = fleet.products.len(),
        seed = ?config.seed,
        as_of = %now,
        "fleet generated"
    );
    Ok(fleet)
}

pub(crate) fn render_fleet_report<W: Write>(
    out: &mut W,
    fleet: &FleetSnapshot,
    now: DateTime<Utc>,
    list_products: bool,
    status: Option<HealthStatus>,
) -> io::Result<()> {
    let summary = FleetSummary::from_products(&fleet.products, now);

    writeln!(out, "Equipment fleet report")?;
    writeln!(
        out,
        "Evaluated {} | {} products | {} contractors",
        now.format("%Y-%m-%d %H:%M UTC"),
        summary.total,
        fleet.contractors.len()
    )?;

    writeln!(out, "\nHealth")?;
    for entry in &summary.by_status {
        writeln!(out, "- {}: {}", entry.status, entry.count)?;
    }
    writeln!(out, "Due within 30 days: {}", summary.due_within_30_days)?;
    match summary.average_efficiency {
        Some(efficiency) => writeln!(out, "Average efficiency: {efficiency:.1}%")?,
        None => writeln!(out, "Average efficiency: n/a")?,
    }

    let tasks = maintenance_tasks(&fleet.products, status, now);
    if tasks.is_empty() {
        writeln!(out, "\nMaintenance tasks: none")?;
    } else {
        writeln!(out, "\nMaintenance tasks")?;
        for task in &tasks {
            writeln!(
                out,
                "- {} {} ({}): due in {} h, {}",
                task.product_id, task.product_name, task.location, task.due_in_hours, task.status
            )?;
        }
    }

    let alerts: Vec<String> = fleet
        .products
        .iter()
        .filter_map(|product| product.as_of(now).alert_message())
        .collect();
    if alerts.is_empty() {
        writeln!(out, "\nAlerts: none")?;
    } else {
        writeln!(out, "\nAlerts")?;
        for alert in &alerts {
            writeln!(out, "- {alert}")?;
        }
    }

    if list_products {
        writeln!(out, "\nProducts")?;
        for product in &fleet.products {
            let next = product
                .next_maintenance_date
                .map(|date| date.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "unscheduled".to_string());
            writeln!(
                out,
                "- {} | {} | {} | {:.0} h run | next service {} | installer {}",
                product.id,
                product.name,
                product.effective_status(now),
                product.total_hours_run,
                next,
                product.installer.id
            )?;
        }
    }

    out.flush()
}
