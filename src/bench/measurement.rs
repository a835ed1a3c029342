//! Measurement records produced by the benchmark harness

use crate::error::{CountError, FailureKind};
use serde::{Deserialize, Serialize};

/// What a single strategy invocation produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Counted { occurrences: usize },
    Failed { kind: FailureKind, message: String },
}

/// One run of one strategy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Measurement {
    pub strategy: String,
    /// 1-based repetition index
    pub repetition: usize,
    pub elapsed_millis: u64,
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl Measurement {
    pub fn counted(strategy: &str, repetition: usize, occurrences: usize, elapsed_millis: u64) -> Self {
        Self {
            strategy: strategy.to_string(),
            repetition,
            elapsed_millis,
            outcome: Outcome::Counted { occurrences },
        }
    }

    pub fn failed(strategy: &str, repetition: usize, error: &CountError, elapsed_millis: u64) -> Self {
        Self {
            strategy: strategy.to_string(),
            repetition,
            elapsed_millis,
            outcome: Outcome::Failed {
                kind: error.kind(),
                message: error.to_string(),
            },
        }
    }

    /// `None` for failure-tagged measurements
    pub fn occurrences(&self) -> Option<usize> {
        match self.outcome {
            Outcome::Counted { occurrences } => Some(occurrences),
            Outcome::Failed { .. } => None,
        }
    }

    pub fn failure(&self) -> Option<FailureKind> {
        match self.outcome {
            Outcome::Counted { .. } => None,
            Outcome::Failed { kind, .. } => Some(kind),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Counted { .. })
    }
}

/// Aggregate view of one strategy's measurements
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategySummary {
    pub strategy: String,
    pub successful_runs: usize,
    pub failed_runs: usize,
    /// Occurrences if every successful run agreed
    pub occurrences: Option<usize>,
    pub min_millis: Option<u64>,
    pub max_millis: Option<u64>,
    pub mean_millis: Option<f64>,
}

/// Measurements in execution order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MeasurementSeries {
    measurements: Vec<Measurement>,
}

impl MeasurementSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, measurement: Measurement) {
        self.measurements.push(measurement);
    }

    pub fn len(&self) -> usize {
        self.measurements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.measurements.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Measurement> {
        self.measurements.iter()
    }

    pub fn as_slice(&self) -> &[Measurement] {
        &self.measurements
    }

    /// Strategy names in first-seen order
    pub fn strategies(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for m in &self.measurements {
            if !names.contains(&m.strategy.as_str()) {
                names.push(&m.strategy);
            }
        }
        names
    }

    /// Whether every successful measurement reports the same occurrence count
    pub fn agreement(&self) -> bool {
        let mut counts = self.measurements.iter().filter_map(Measurement::occurrences);
        match counts.next() {
            Some(first) => counts.all(|c| c == first),
            None => true,
        }
    }

    /// Per-strategy statistics in first-seen order
    pub fn summaries(&self) -> Vec<StrategySummary> {
        self.strategies()
            .into_iter()
            .map(|name| {
                let runs: Vec<&Measurement> =
                    self.measurements.iter().filter(|m| m.strategy == name).collect();
                let successes: Vec<&Measurement> =
                    runs.iter().copied().filter(|m| m.is_success()).collect();

                let mut counts = successes.iter().filter_map(|m| m.occurrences());
                let occurrences = counts.next().filter(|first| counts.all(|c| c == *first));

                let times: Vec<u64> = successes.iter().map(|m| m.elapsed_millis).collect();
                let mean_millis = if times.is_empty() {
                    None
                } else {
                    Some(times.iter().sum::<u64>() as f64 / times.len() as f64)
                };

                StrategySummary {
                    strategy: name.to_string(),
                    successful_runs: successes.len(),
                    failed_runs: runs.len() - successes.len(),
                    occurrences,
                    min_millis: times.iter().min().copied(),
                    max_millis: times.iter().max().copied(),
                    mean_millis,
                }
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a MeasurementSeries {
    type Item = &'a Measurement;
    type IntoIter = std::slice::Iter<'a, Measurement>;

    fn into_iter(self) -> Self::IntoIter {
        self.measurements.iter()
    }
}

impl FromIterator<Measurement> for MeasurementSeries {
    fn from_iter<I: IntoIterator<Item = Measurement>>(iter: I) -> Self {
        Self {
            measurements: iter.into_iter().collect(),
        }
    }
}
