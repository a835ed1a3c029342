//! Devices command implementation
//!
//! Lists the compute devices the GPU strategy can use.

use crate::cli::Output;
use crate::gpu::probe_devices;
use anyhow::Result;

pub async fn execute(output: &Output) -> Result<()> {
    output.header("Compute Devices");

    if !cfg!(feature = "opencl") {
        output.warning("Built without the `opencl` feature, the GPU strategy is unavailable");
        return Ok(());
    }

    let devices = tokio::task::spawn_blocking(probe_devices).await?;
    if devices.is_empty() {
        output.warning("No OpenCL devices found");
        return Ok(());
    }

    for (index, device) in devices.iter().enumerate() {
        let kind = if device.is_gpu { "GPU" } else { "other" };
        output.key_value(
            &format!("[{}] {}", index, kind),
            &format!(
                "{} ({}, {} MiB)",
                device.name,
                device.vendor,
                device.global_mem_size / (1024 * 1024)
            ),
            device.is_gpu,
        );
    }
    output.verbose("Select a GPU with `gpu.device_index` (counts GPU devices only)");

    Ok(())
}
