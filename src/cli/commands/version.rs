//! Version command implementation
//!
//! Displays version and build information about wordbench.

use crate::cli::Output;
use anyhow::Result;

/// Execute the version command
pub async fn execute(output: &Output) -> Result<()> {
    output.header(&format!("{} v{}", crate::PKG_NAME, crate::VERSION));
    output.key_value("Description:", crate::PKG_DESCRIPTION, false);
    output.blank_line();

    output.key_value("Rust edition:", "2024", false);
    output.key_value("Target:", std::env::consts::ARCH, false);
    output.key_value("Profile:", if cfg!(debug_assertions) { "debug" } else { "release" }, false);
    output.key_value(
        "OpenCL support:",
        if cfg!(feature = "opencl") { "enabled" } else { "disabled" },
        cfg!(feature = "opencl"),
    );
    output.key_value("Logical CPUs:", &num_cpus::get().to_string(), false);

    output.blank_line();
    output.info("Run 'wordbench --help' for usage information");

    Ok(())
}
