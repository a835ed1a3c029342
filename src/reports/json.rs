use super::ReportGenerator;
use crate::bench::{MeasurementSeries, StrategySummary};
use anyhow::Result;
use serde::Serialize;

/// JSON export of the full series plus per-strategy summaries
#[derive(Debug, Clone, Default)]
pub struct JsonReportGenerator;

#[derive(Serialize)]
struct JsonReport<'a> {
    tool: &'static str,
    version: &'static str,
    consistent: bool,
    measurements: &'a MeasurementSeries,
    summaries: Vec<StrategySummary>,
}

impl ReportGenerator for JsonReportGenerator {
    fn generate(&self, series: &MeasurementSeries) -> Result<String> {
        let report = JsonReport {
            tool: crate::PKG_NAME,
            version: crate::VERSION,
            consistent: series.agreement(),
            measurements: series,
            summaries: series.summaries(),
        };
        Ok(serde_json::to_string_pretty(&report)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bench::Measurement;
    use crate::error::CountError;

    #[test]
    fn test_json_includes_failures_and_summaries() {
        let series: MeasurementSeries = vec![
            Measurement::counted("SerialCPU", 1, 2, 1),
            Measurement::failed(
                "ParallelCPU",
                1,
                &CountError::WorkerTimeout {
                    timeout: std::time::Duration::from_secs(1),
                },
                1000,
            ),
        ]
        .into_iter()
        .collect();

        let json = JsonReportGenerator.generate(&series).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["tool"], "wordbench");
        assert_eq!(value["consistent"], true);
        assert_eq!(value["measurements"][0]["occurrences"], 2);
        assert_eq!(value["measurements"][1]["status"], "failed");
        assert_eq!(value["measurements"][1]["kind"], "worker_timeout");
        assert_eq!(value["summaries"][1]["failed_runs"], 1);
    }
}
