use super::measurement::{Measurement, MeasurementSeries};
use crate::count::WordCounter;
use crate::error::{BenchError, CountError, FailureKind};
use std::time::Instant;

/// Runs every strategy once per repetition and records what happened
///
/// Repetitions and strategies run strictly one after another on the calling thread, so
/// no two strategies compete for cores while being timed.
pub struct BenchmarkHarness {
    strategies: Vec<Box<dyn WordCounter>>,
}

impl BenchmarkHarness {
    pub fn new(strategies: Vec<Box<dyn WordCounter>>) -> Self {
        Self { strategies }
    }

    pub fn strategy_names(&self) -> Vec<&str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Benchmark `query` over `tokens` for `repetitions` rounds
    ///
    /// Strategy errors become failure-tagged measurements. A strategy that reports
    /// [`CountError::GpuUnavailable`] is not invoked again during this run; its later slots
    /// are recorded as failures without calling it.
    pub fn run(
        &self,
        tokens: &[&str],
        query: &str,
        repetitions: usize,
    ) -> Result<MeasurementSeries, BenchError> {
        validate(query, repetitions, self.strategies.len())?;

        let mut series = MeasurementSeries::new();
        let mut unavailable: Vec<Option<CountError>> =
            (0..self.strategies.len()).map(|_| None).collect();

        for repetition in 1..=repetitions {
            for (index, strategy) in self.strategies.iter().enumerate() {
                if let Some(reason) = &unavailable[index] {
                    series.push(Measurement::failed(strategy.name(), repetition, reason, 0));
                    continue;
                }

                let start = Instant::now();
                let result = strategy.count(tokens, query);
                let elapsed_millis = start.elapsed().as_millis() as u64;

                let measurement = match result {
                    Ok(occurrences) => {
                        tracing::info!(
                            "{}: {} occurrences in {} ms",
                            strategy.name(),
                            occurrences,
                            elapsed_millis
                        );
                        Measurement::counted(strategy.name(), repetition, occurrences, elapsed_millis)
                    }
                    Err(err) => {
                        tracing::warn!("{} failed on repetition {}: {}", strategy.name(), repetition, err);
                        let measurement =
                            Measurement::failed(strategy.name(), repetition, &err, elapsed_millis);
                        if err.kind() == FailureKind::GpuUnavailable {
                            tracing::warn!("Skipping {} for the rest of the run", strategy.name());
                            unavailable[index] = Some(err);
                        }
                        measurement
                    }
                };
                series.push(measurement);
            }
        }

        Ok(series)
    }
}

fn validate(query: &str, repetitions: usize, strategy_count: usize) -> Result<(), BenchError> {
    if repetitions == 0 {
        return Err(BenchError::InvalidConfig(
            "repetitions must be at least 1".to_string(),
        ));
    }
    if strategy_count == 0 {
        return Err(BenchError::InvalidConfig(
            "at least one strategy is required".to_string(),
        ));
    }
    if query.is_empty() {
        return Err(BenchError::InvalidConfig("query word is empty".to_string()));
    }
    if query.chars().any(char::is_whitespace) {
        return Err(BenchError::InvalidConfig(format!(
            "query '{}' must be a single token",
            query
        )));
    }
    Ok(())
}
