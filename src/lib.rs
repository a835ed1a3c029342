//! # wordbench - serial vs multi-threaded vs GPU word counting
//!
//! Counts how often a query token occurs in a normalized text, once per strategy,
//! and times each run so the strategies can be compared side by side.
//!
//! ## Features
//!
//! - **Normalization**: punctuation stripped, whitespace-split tokens shared by every strategy
//! - **Strategies**: serial scan, chunked worker threads, rayon work stealing, OpenCL kernel
//! - **Failure isolation**: a strategy that fails yields a tagged measurement, not an abort
//! - **Reports**: terminal chart, CSV and JSON exports
//!
//! ## Quick Start
//!
//! ```bash
//! # Count "y" three times with every strategy
//! wordbench run --input book.txt --query y -n 3 --csv results.csv
//!
//! # Build with the GPU strategy
//! cargo install wordbench --features opencl
//! ```

pub mod bench;
pub mod cli;
pub mod config;
pub mod count;
pub mod error;
pub mod gpu;
pub mod parallel;
pub mod reports;
pub mod text;

pub use cli::{Cli, Output};
pub use config::BenchConfig;

/// Result type alias for wordbench operations
pub type Result<T> = anyhow::Result<T>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const PKG_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
