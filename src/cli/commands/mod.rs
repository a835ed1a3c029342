//! Command implementations for the wordbench CLI
//!
//! Each command is organized into its own module.

pub mod config;
pub mod devices;
pub mod run;
pub mod version;
