//! Error types for the counting engine
//!
//! Two layers, mirroring how far a failure reaches:
//! - [`CountError`] is scoped to one strategy invocation. The harness turns it into a
//!   failure-tagged measurement and keeps going.
//! - [`BenchError`] aborts the whole run (bad input text, bad harness configuration).

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Errors raised by a single counting strategy call
#[derive(Debug, thiserror::Error)]
pub enum CountError {
    #[error("worker {worker} failed: {reason}")]
    WorkerFailure { worker: usize, reason: String },

    #[error("workers did not finish within {timeout:?}")]
    WorkerTimeout { timeout: Duration },

    #[error("no compute device available: {0}")]
    GpuUnavailable(String),

    #[error("kernel build failed: {0}")]
    KernelBuild(String),

    #[error("device transfer failed: {0}")]
    DeviceTransfer(String),
}

impl CountError {
    /// Tag recorded in a failed measurement
    pub fn kind(&self) -> FailureKind {
        match self {
            CountError::WorkerFailure { .. } => FailureKind::WorkerFailure,
            CountError::WorkerTimeout { .. } => FailureKind::WorkerTimeout,
            CountError::GpuUnavailable(_) => FailureKind::GpuUnavailable,
            CountError::KernelBuild(_) => FailureKind::KernelBuild,
            CountError::DeviceTransfer(_) => FailureKind::DeviceTransfer,
        }
    }
}

/// Serializable tag for a failed strategy invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    WorkerFailure,
    WorkerTimeout,
    GpuUnavailable,
    KernelBuild,
    DeviceTransfer,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::WorkerFailure => "worker_failure",
            FailureKind::WorkerTimeout => "worker_timeout",
            FailureKind::GpuUnavailable => "gpu_unavailable",
            FailureKind::KernelBuild => "kernel_build",
            FailureKind::DeviceTransfer => "device_transfer",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that abort an entire benchmark run
#[derive(Debug, thiserror::Error)]
pub enum BenchError {
    #[error("input is not valid UTF-8 (first bad byte at offset {offset})")]
    Normalization { offset: usize },

    #[error("invalid benchmark configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_error_kinds() {
        let err = CountError::WorkerTimeout {
            timeout: Duration::from_secs(3600),
        };
        assert_eq!(err.kind(), FailureKind::WorkerTimeout);
        assert_eq!(err.to_string(), "workers did not finish within 3600s");

        let err = CountError::WorkerTimeout {
            timeout: Duration::from_millis(250),
        };
        assert_eq!(err.to_string(), "workers did not finish within 250ms");

        let err = CountError::GpuUnavailable("no platforms".to_string());
        assert_eq!(err.kind(), FailureKind::GpuUnavailable);
    }

    #[test]
    fn test_failure_kind_serializes_snake_case() {
        let json = serde_json::to_string(&FailureKind::DeviceTransfer).unwrap();
        assert_eq!(json, "\"device_transfer\"");
        assert_eq!(FailureKind::KernelBuild.to_string(), "kernel_build");
    }
}
