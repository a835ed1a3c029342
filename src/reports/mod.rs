//! Reporting for benchmark results
//!
//! Consumers of a finished [`MeasurementSeries`]. The harness never calls into this module;
//! the command layer hands the series to whichever generators the configuration asks for.
//! Failure-tagged measurements are always rendered, never treated as errors.

use crate::bench::MeasurementSeries;
use anyhow::{Context, Result};
use std::path::Path;

mod chart;
mod csv;
mod json;

pub use chart::ChartRenderer;
pub use csv::CsvReportGenerator;
pub use json::JsonReportGenerator;

/// Core reporting trait - allows pluggable report formats
pub trait ReportGenerator {
    /// Generate report content as a string
    fn generate(&self, series: &MeasurementSeries) -> Result<String>;

    /// Generate and write to `path`
    fn write_to(&self, series: &MeasurementSeries, path: &Path) -> Result<()> {
        let content = self.generate(series)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        tracing::debug!("Wrote {} measurements to {}", series.len(), path.display());
        Ok(())
    }
}
