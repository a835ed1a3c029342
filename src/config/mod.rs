//! Configuration management for wordbench
//!
//! Settings are layered with figment: embedded defaults, user config, repository config,
//! an explicit `--config` file, `WORDBENCH_` environment variables and finally command-line
//! flags. The merged result is extracted into [`BenchConfig`].

use crate::count::StrategyKind;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub mod core;
pub mod overrides;
pub mod smart_load;

pub use crate::gpu::GpuSettings;
pub use overrides::ConfigOverrides;

/// Main configuration structure for a benchmark run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchConfig {
    /// Text file to analyse
    #[serde(default)]
    pub input: Option<PathBuf>,

    /// Token to count
    #[serde(deserialize_with = "token_string")]
    pub query: String,

    /// Rounds over every strategy
    pub repetitions: usize,

    /// Strategies in execution order
    pub strategies: Vec<StrategyKind>,

    #[serde(default)]
    pub parallel: ParallelSettings,

    #[serde(default)]
    pub gpu: GpuSettings,

    #[serde(default)]
    pub output: OutputSettings,
}

/// Read a token as text even when the source typed it as a number or boolean
fn token_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct TokenVisitor;

    impl Visitor<'_> for TokenVisitor {
        type Value = String;

        fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("a single word, number or boolean")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
            Ok(v)
        }

        fn visit_char<E: de::Error>(self, v: char) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
            Ok(v.to_string())
        }
    }

    deserializer.deserialize_any(TokenVisitor)
}

/// Worker pool settings for the multi-threaded strategy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParallelSettings {
    /// Explicit worker count (0 = derive from available cores)
    #[serde(default)]
    pub workers: usize,

    /// Percentage of CPU cores to use (1-100)
    #[serde(default = "default_thread_percentage")]
    pub thread_percentage: u8,

    /// Maximum number of worker threads (0 = no limit)
    #[serde(default)]
    pub max_threads: usize,

    /// Upper bound on waiting for workers, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_thread_percentage() -> u8 {
    100
}

fn default_timeout_secs() -> u64 {
    60 * 60
}

impl Default for ParallelSettings {
    fn default() -> Self {
        Self {
            workers: 0,
            thread_percentage: default_thread_percentage(),
            max_threads: 0,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ParallelSettings {
    /// Worker count after applying the explicit override or the core-based calculation
    pub fn resolve_workers(&self) -> usize {
        if self.workers > 0 {
            self.workers
        } else {
            crate::parallel::calculate_optimal_workers(self.max_threads, self.thread_percentage)
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Where results go after a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSettings {
    /// CSV export path
    #[serde(default)]
    pub csv: Option<PathBuf>,

    /// JSON export path
    #[serde(default)]
    pub json: Option<PathBuf>,

    /// Render the terminal chart
    #[serde(default = "default_chart")]
    pub chart: bool,
}

fn default_chart() -> bool {
    true
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            csv: None,
            json: None,
            chart: default_chart(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parallel_settings_explicit_workers_win() {
        let settings = ParallelSettings {
            workers: 3,
            max_threads: 1,
            ..ParallelSettings::default()
        };
        assert_eq!(settings.resolve_workers(), 3);
    }

    #[test]
    fn test_parallel_settings_auto_workers() {
        let settings = ParallelSettings::default();
        assert_eq!(settings.resolve_workers(), num_cpus::get().max(1));
        assert_eq!(settings.timeout(), Duration::from_secs(3600));
    }
}
