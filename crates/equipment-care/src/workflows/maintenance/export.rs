use super::domain::Product;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write fleet CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush fleet CSV: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Serialize)]
struct FleetCsvRow<'a> {
    id: &'a str,
    serial_number: &'a str,
    name: &'a str,
    product_type: &'static str,
    status: &'static str,
    total_hours_run: f64,
    next_maintenance_date: Option<String>,
    hours_until_maintenance: Option<u32>,
    installer_id: &'a str,
    city: &'a str,
    state: &'a str,
}

impl<'a> From<&'a Product> for FleetCsvRow<'a> {
    fn from(product: &'a Product) -> Self {
        Self {
            id: &product.id,
            serial_number: &product.serial_number,
            name: &product.name,
            product_type: product.product_type.label(),
            status: product.status.label(),
            total_hours_run: product.total_hours_run,
            next_maintenance_date: product
                .next_maintenance_date
                .map(|date| date.format("%Y-%m-%d").to_string()),
            hours_until_maintenance: product.hours_until_maintenance,
            installer_id: &product.installer.id,
            city: &product.location.city,
            state: &product.location.state,
        }
    }
}

/// Writes a header row followed by one row per product.
pub fn write_fleet_csv<W: Write>(products: &[Product], writer: W) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    if products.is_empty() {
        csv_writer.write_record(FLEET_CSV_HEADERS)?;
    }
    for product in products {
        csv_writer.serialize(FleetCsvRow::from(product))?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub const FLEET_CSV_HEADERS: [&str; 11] = [
    "id",
    "serial_number",
    "name",
    "product_type",
    "status",
    "total_hours_run",
    "next_maintenance_date",
    "hours_until_maintenance",
    "installer_id",
    "city",
    "state",
];
