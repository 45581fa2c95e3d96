//! Output formatting for fetched records

use crate::cli::OutputFormat;
use crate::error::CliError;
use serde::Serialize;
use vibrance_http_client::{EventRecord, MerchandiseRecord, ProfileRecord};

const MISSING: &str = "-";

/// Renders records as a table or as JSON
pub struct OutputFormatter {
    format: OutputFormat,
    quiet: bool,
}

impl OutputFormatter {
    /// Create a new output formatter
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    /// Render the user's personal details
    pub fn user(&self, profile: &ProfileRecord) -> Result<String, CliError> {
        if self.format == OutputFormat::Json {
            return json("user", profile);
        }

        let fields = [
            ("ID", &profile.id),
            ("Name", &profile.name),
            ("Email", &profile.email),
            ("Mobile", &profile.mobile),
            ("College", &profile.college),
        ];
        let rows = fields
            .iter()
            .map(|(label, value)| vec![label.to_string(), or_missing(value)])
            .collect();
        Ok(self.table(&["FIELD", "VALUE"], rows))
    }

    /// Render event registrations
    pub fn events(&self, events: &[EventRecord]) -> Result<String, CliError> {
        if self.format == OutputFormat::Json {
            return json("events", events);
        }

        let rows = events
            .iter()
            .map(|e| {
                vec![
                    e.order_id.map(|id| id.to_string()).unwrap_or_else(|| MISSING.to_string()),
                    e.title.clone(),
                    e.date.clone(),
                    e.time.clone(),
                    e.location.clone(),
                    if e.is_paid { "yes" } else { "no" }.to_string(),
                ]
            })
            .collect();
        Ok(self.table(&["ORDER", "TITLE", "DATE", "TIME", "LOCATION", "PAID"], rows))
    }

    /// Render merchandise orders
    pub fn merchandise(&self, items: &[MerchandiseRecord]) -> Result<String, CliError> {
        if self.format == OutputFormat::Json {
            return json("merchandise", items);
        }

        let rows = items
            .iter()
            .map(|item| {
                vec![
                    or_missing(&item.name),
                    or_missing(&item.size),
                    item.quantity.to_string(),
                    or_missing(&item.status),
                    or_missing(&item.image),
                ]
            })
            .collect();
        Ok(self.table(&["NAME", "SIZE", "QTY", "STATUS", "IMAGE"], rows))
    }

    /// Left-aligned columns separated by two spaces; headers dropped in quiet mode
    fn table(&self, headers: &[&str], rows: Vec<Vec<String>>) -> String {
        let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let header = headers.iter().map(|h| h.to_string()).collect::<Vec<_>>();
        let lines = (!self.quiet)
            .then_some(&header)
            .into_iter()
            .chain(rows.iter())
            .map(|row| {
                row.iter()
                    .zip(&widths)
                    .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
                    .collect::<Vec<_>>()
                    .join("  ")
                    .trim_end()
                    .to_string()
            });

        lines.collect::<Vec<_>>().join("\n")
    }
}

/// Pretty JSON wrapped in a single-key envelope, e.g. `{"events": [...]}`
fn json<T: Serialize + ?Sized>(key: &str, value: &T) -> Result<String, CliError> {
    let mut envelope = serde_json::Map::new();
    envelope.insert(key.to_string(), serde_json::to_value(value)?);
    Ok(serde_json::to_string_pretty(&envelope)?)
}

fn or_missing(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| MISSING.to_string())
}
