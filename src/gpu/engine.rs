//! OpenCL backend for the GPU counting strategy
//!
//! ```text
//! ┌──────────────┐     ┌──────────────────┐     ┌─────────────┐
//! │  Host (CPU)  │────▶│  OpenCL Device   │────▶│  Host (CPU) │
//! │  pack tokens │     │  one work-item   │     │  sum 0/1    │
//! │  + offsets   │     │  per token       │     │  flags      │
//! └──────────────┘     └──────────────────┘     └─────────────┘
//! ```
//!
//! Every OpenCL handle here (context, queue, program, kernel, buffers) releases itself on
//! drop, so device resources are freed on every exit path including `?` returns.

use super::layout::TokenLayout;
use super::{DeviceInfo, GpuSettings};
use crate::error::CountError;

use opencl3::command_queue::CommandQueue;
use opencl3::context::Context;
use opencl3::device::{CL_DEVICE_TYPE_ALL, CL_DEVICE_TYPE_GPU, Device, get_all_devices};
use opencl3::kernel::{ExecuteKernel, Kernel};
use opencl3::memory::{Buffer, CL_MEM_READ_ONLY, CL_MEM_WRITE_ONLY};
use opencl3::program::Program;
use opencl3::types::{CL_BLOCKING, cl_device_type, cl_uint};

use std::ptr;

/// Embedded OpenCL kernel source: one work-item per token.
const COUNT_KERNEL_SOURCE: &str = include_str!("../../kernels/count_matches.cl");

const COUNT_KERNEL_NAME: &str = "CountMatches";

/// Probe all available OpenCL devices without creating an engine.
///
/// Returns an empty vec if no OpenCL runtime is installed or no devices are found.
pub fn probe_devices() -> Vec<DeviceInfo> {
    let device_ids = match get_all_devices(CL_DEVICE_TYPE_ALL) {
        Ok(ids) => ids,
        Err(_) => return Vec::new(),
    };

    device_ids
        .into_iter()
        .map(|id| {
            let dev = Device::new(id);
            let dev_type: cl_device_type = dev.dev_type().unwrap_or(0);
            DeviceInfo {
                name: dev.name().unwrap_or_default().trim().to_string(),
                vendor: dev.vendor().unwrap_or_default().trim().to_string(),
                is_gpu: (dev_type & CL_DEVICE_TYPE_GPU) != 0,
                global_mem_size: dev.global_mem_size().unwrap_or(0),
            }
        })
        .collect()
}

/// Device, context, queue and compiled kernel for one benchmark run
pub struct GpuEngine {
    _device: Device,
    context: Context,
    queue: CommandQueue,
    _program: Program,
    kernel: Kernel,
    device_name: String,
}

// SAFETY: OpenCL 1.2+ guarantees thread safety for context, command queue, kernel and
// memory objects. The engine is only ever used by one call at a time behind a mutex.
unsafe impl Send for GpuEngine {}

impl std::fmt::Debug for GpuEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GpuEngine")
            .field("device_name", &self.device_name)
            .finish_non_exhaustive()
    }
}

impl GpuEngine {
    /// Select a device and compile the counting kernel
    pub fn create(settings: &GpuSettings) -> Result<Self, CountError> {
        let mut candidates = get_all_devices(CL_DEVICE_TYPE_GPU).unwrap_or_default();
        if candidates.is_empty() && settings.allow_cpu_fallback {
            candidates = get_all_devices(CL_DEVICE_TYPE_ALL).unwrap_or_default();
        }

        let selected_id = *candidates.get(settings.device_index).ok_or_else(|| {
            CountError::GpuUnavailable(format!(
                "device index {} requested, {} device(s) found",
                settings.device_index,
                candidates.len()
            ))
        })?;

        let device = Device::new(selected_id);
        let device_name = device.name().unwrap_or_default().trim().to_string();

        let context = Context::from_device(&device)
            .map_err(|e| CountError::GpuUnavailable(format!("context: {}", e)))?;

        // OpenCL 1.2 API, macOS has nothing newer
        #[allow(deprecated)]
        let queue = CommandQueue::create_default(&context, 0)
            .map_err(|e| CountError::GpuUnavailable(format!("command queue: {}", e)))?;

        let program = Program::create_and_build_from_source(&context, COUNT_KERNEL_SOURCE, "")
            .map_err(|log| CountError::KernelBuild(log.to_string()))?;
        let kernel = Kernel::create(&program, COUNT_KERNEL_NAME)
            .map_err(|e| CountError::KernelBuild(e.to_string()))?;

        tracing::info!("Compiled {} on {}", COUNT_KERNEL_NAME, device_name);

        Ok(Self {
            _device: device,
            context,
            queue,
            _program: program,
            kernel,
            device_name,
        })
    }

    pub fn device_name(&self) -> &str {
        &self.device_name
    }

    /// Upload `layout` and `query`, run one work-item per token, sum the flags
    pub fn count(&self, layout: &TokenLayout, query: &[u8]) -> Result<usize, CountError> {
        let token_count = layout.token_count();
        if token_count == 0 {
            return Ok(0);
        }

        let token_bytes = self.upload(layout.bytes())?;
        let token_offsets = self.upload(layout.offsets())?;
        let token_lengths = self.upload(layout.lengths())?;
        let query_buf = self.upload(query)?;

        let matches_buf = unsafe {
            Buffer::<cl_uint>::create(
                &self.context,
                CL_MEM_WRITE_ONLY,
                token_count,
                ptr::null_mut(),
            )
            .map_err(|e| transfer_error("allocate result buffer", e))?
        };

        let query_len = query.len() as cl_uint;
        let count = token_count as cl_uint;

        let kernel_event = unsafe {
            ExecuteKernel::new(&self.kernel)
                .set_arg(&token_bytes)
                .set_arg(&token_offsets)
                .set_arg(&token_lengths)
                .set_arg(&query_buf)
                .set_arg(&query_len)
                .set_arg(&count)
                .set_arg(&matches_buf)
                .set_global_work_size(token_count)
                .enqueue_nd_range(&self.queue)
                .map_err(|e| transfer_error("launch kernel", e))?
        };
        kernel_event
            .wait()
            .map_err(|e| transfer_error("wait for kernel", e))?;

        let mut flags: Vec<cl_uint> = vec![0; token_count];
        let read_event = unsafe {
            self.queue
                .enqueue_read_buffer(&matches_buf, CL_BLOCKING, 0, &mut flags, &[])
                .map_err(|e| transfer_error("read results", e))?
        };
        read_event
            .wait()
            .map_err(|e| transfer_error("wait for read", e))?;

        Ok(flags.iter().map(|&flag| flag as usize).sum())
    }

    /// Allocate a read-only device buffer and copy `data` into it
    fn upload<T>(&self, data: &[T]) -> Result<Buffer<T>, CountError> {
        let mut buffer = unsafe {
            Buffer::<T>::create(&self.context, CL_MEM_READ_ONLY, data.len(), ptr::null_mut())
                .map_err(|e| transfer_error("allocate input buffer", e))?
        };

        let write_event = unsafe {
            self.queue
                .enqueue_write_buffer(&mut buffer, CL_BLOCKING, 0, data, &[])
                .map_err(|e| transfer_error("write input buffer", e))?
        };
        write_event
            .wait()
            .map_err(|e| transfer_error("wait for write", e))?;

        Ok(buffer)
    }
}

fn transfer_error(step: &str, err: impl std::fmt::Display) -> CountError {
    CountError::DeviceTransfer(format!("{}: {}", step, err))
}
