//! GPU counting strategy
//!
//! Launches one OpenCL work-item per token. Each work-item compares its token against
//! the query and writes a 0/1 flag; the host sums the flags.
//!
//! # Feature Gate
//!
//! The OpenCL backend is only compiled with the `opencl` feature:
//! ```bash
//! cargo build --features opencl
//! ```
//! Without it, [`GpuCounter`] reports [`CountError::GpuUnavailable`] and the harness skips
//! the strategy.

use crate::count::WordCounter;
use crate::error::CountError;
use serde::{Deserialize, Serialize};
#[cfg(feature = "opencl")]
use std::sync::Mutex;

#[cfg(feature = "opencl")]
pub mod engine;
pub mod layout;

pub use layout::TokenLayout;

/// Device selection settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GpuSettings {
    /// Index into the list of GPU devices across all platforms
    #[serde(default)]
    pub device_index: usize,
    /// Fall back to any OpenCL device (e.g. a CPU runtime) when no GPU is present
    #[serde(default)]
    pub allow_cpu_fallback: bool,
}

/// Information about a discovered compute device
#[derive(Debug, Clone, Serialize)]
pub struct DeviceInfo {
    pub name: String,
    pub vendor: String,
    pub is_gpu: bool,
    /// Global memory size in bytes
    pub global_mem_size: u64,
}

/// List available compute devices, never fails
pub fn probe_devices() -> Vec<DeviceInfo> {
    #[cfg(feature = "opencl")]
    {
        engine::probe_devices()
    }
    #[cfg(not(feature = "opencl"))]
    {
        Vec::new()
    }
}

/// One work-item per token on an OpenCL device
///
/// The device context and compiled kernel are created on the first call and kept for the
/// lifetime of the counter, which is one benchmark run. Per-call buffers are released
/// before `count` returns.
pub struct GpuCounter {
    settings: GpuSettings,
    #[cfg(feature = "opencl")]
    engine: Mutex<Option<engine::GpuEngine>>,
}

impl GpuCounter {
    pub fn new(settings: GpuSettings) -> Self {
        Self {
            settings,
            #[cfg(feature = "opencl")]
            engine: Mutex::new(None),
        }
    }

    #[cfg(feature = "opencl")]
    fn count_on_device(&self, tokens: &[&str], query: &str) -> Result<usize, CountError> {
        let mut slot = self.engine.lock().unwrap_or_else(|e| e.into_inner());
        if slot.is_none() {
            *slot = Some(engine::GpuEngine::create(&self.settings)?);
        }
        let Some(engine) = slot.as_ref() else {
            return Err(CountError::GpuUnavailable("engine not initialised".to_string()));
        };

        let layout = TokenLayout::build(tokens)?;
        tracing::debug!(
            "Dispatching {} work-items ({} bytes) to {}",
            layout.token_count(),
            layout.bytes().len(),
            engine.device_name()
        );
        engine.count(&layout, query.as_bytes())
    }

    #[cfg(not(feature = "opencl"))]
    fn count_on_device(&self, _tokens: &[&str], _query: &str) -> Result<usize, CountError> {
        Err(CountError::GpuUnavailable(
            "built without the `opencl` feature".to_string(),
        ))
    }
}

impl Default for GpuCounter {
    fn default() -> Self {
        Self::new(GpuSettings::default())
    }
}

impl std::fmt::Debug for GpuCounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GpuCounter")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl WordCounter for GpuCounter {
    fn name(&self) -> &str {
        "ParallelGPU"
    }

    fn count(&self, tokens: &[&str], query: &str) -> Result<usize, CountError> {
        self.count_on_device(tokens, query)
    }
}
