//! Counting strategies
//!
//! Every strategy answers the same question: how many tokens equal the query under ASCII
//! case-insensitive comparison. They differ only in how the work is executed.

use crate::error::CountError;
use serde::{Deserialize, Serialize};

pub mod parallel;
pub mod serial;
pub mod work_stealing;

pub use parallel::ParallelCpuCounter;
pub use serial::SerialCounter;
pub use work_stealing::WorkStealingCounter;

/// Capability shared by every counting strategy
pub trait WordCounter: Send {
    /// Name recorded in measurements and reports
    fn name(&self) -> &str;

    /// Count tokens equal to `query`, ignoring ASCII case
    fn count(&self, tokens: &[&str], query: &str) -> Result<usize, CountError>;
}

/// Token equality used by every strategy
#[inline]
pub fn matches(token: &str, query: &str) -> bool {
    token.eq_ignore_ascii_case(query)
}

/// Strategies that can be selected from configuration or the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    Serial,
    ParallelCpu,
    ParallelGpu,
    Rayon,
}

impl StrategyKind {
    /// Method name used in measurements and reports
    pub fn label(&self) -> &'static str {
        match self {
            StrategyKind::Serial => "SerialCPU",
            StrategyKind::ParallelCpu => "ParallelCPU",
            StrategyKind::ParallelGpu => "ParallelGPU",
            StrategyKind::Rayon => "RayonCPU",
        }
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
