use super::ReportGenerator;
use crate::bench::MeasurementSeries;
use anyhow::Result;
use std::fmt::Write;

/// Delimited export: method name, occurrence count, elapsed milliseconds
///
/// Header row first, then one row per measurement in execution order. Failure-tagged
/// measurements leave the occurrences cell empty.
#[derive(Debug, Clone)]
pub struct CsvReportGenerator {
    delimiter: char,
}

impl Default for CsvReportGenerator {
    fn default() -> Self {
        Self { delimiter: ',' }
    }
}

impl CsvReportGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(delimiter: char) -> Self {
        Self { delimiter }
    }

    fn escape(&self, field: &str) -> String {
        if field.contains(self.delimiter) || field.contains('"') || field.contains('\n') {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }
}

impl ReportGenerator for CsvReportGenerator {
    fn generate(&self, series: &MeasurementSeries) -> Result<String> {
        let d = self.delimiter;
        let mut out = String::new();
        writeln!(out, "method{d}occurrences{d}elapsed_ms")?;

        for m in series {
            let occurrences = m.occurrences().map(|o| o.to_string()).unwrap_or_default();
            writeln!(
                out,
                "{}{d}{}{d}{}",
                self.escape(&m.strategy),
                occurrences,
                m.elapsed_millis
            )?;
        }

        Ok(out)
    }
}
