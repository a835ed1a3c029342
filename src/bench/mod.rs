//! Benchmark harness
//!
//! Invokes each configured strategy once per repetition, times it with a monotonic clock
//! and collects the results into a [`MeasurementSeries`]. The harness only produces data;
//! exporting and rendering are done by the caller through [`crate::reports`].

pub mod harness;
pub mod measurement;

pub use harness::BenchmarkHarness;
pub use measurement::{Measurement, MeasurementSeries, Outcome, StrategySummary};

use crate::config::ParallelSettings;
use crate::count::{
    ParallelCpuCounter, SerialCounter, StrategyKind, WordCounter, WorkStealingCounter,
};
use crate::gpu::{GpuCounter, GpuSettings};

/// Instantiate the counter for one strategy kind
pub fn build_strategy(
    kind: StrategyKind,
    parallel: &ParallelSettings,
    gpu: &GpuSettings,
) -> Box<dyn WordCounter> {
    match kind {
        StrategyKind::Serial => Box::new(SerialCounter::new()),
        StrategyKind::ParallelCpu => Box::new(ParallelCpuCounter::new(
            parallel.resolve_workers(),
            parallel.timeout(),
        )),
        StrategyKind::ParallelGpu => Box::new(GpuCounter::new(gpu.clone())),
        StrategyKind::Rayon => Box::new(WorkStealingCounter::new()),
    }
}

/// Build a harness over `kinds` in declared order
pub fn build_harness(
    kinds: &[StrategyKind],
    parallel: &ParallelSettings,
    gpu: &GpuSettings,
) -> BenchmarkHarness {
    let strategies = kinds
        .iter()
        .map(|kind| build_strategy(*kind, parallel, gpu))
        .collect();
    BenchmarkHarness::new(strategies)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_harness_keeps_declared_order() {
        let kinds = [
            StrategyKind::ParallelGpu,
            StrategyKind::Serial,
            StrategyKind::Rayon,
            StrategyKind::ParallelCpu,
        ];
        let harness = build_harness(&kinds, &ParallelSettings::default(), &GpuSettings::default());
        assert_eq!(
            harness.strategy_names(),
            vec!["ParallelGPU", "SerialCPU", "RayonCPU", "ParallelCPU"]
        );
    }

    #[test]
    fn test_strategy_names_match_labels() {
        for kind in [
            StrategyKind::Serial,
            StrategyKind::ParallelCpu,
            StrategyKind::ParallelGpu,
            StrategyKind::Rayon,
        ] {
            let counter = build_strategy(kind, &ParallelSettings::default(), &GpuSettings::default());
            assert_eq!(counter.name(), kind.label());
        }
    }
}
