//! Fixed-pool parallel execution over contiguous chunks
//!
//! This module provides the worker-pool plumbing used by the multi-threaded counting
//! strategy. It knows nothing about tokens or queries.
//!
//! # Architecture Responsibilities
//!
//! ## What This Module Does:
//! - **Resource Discovery**: Detects available CPU cores using `num_cpus::get()`
//! - **Resource Calculation**: Applies user configuration (thread percentage, max threads)
//! - **Partitioning**: Splits `[0, n)` into `W` contiguous, non-overlapping ranges
//! - **Execution**: Runs one scoped worker per range and collects the per-worker results
//!   over a crossbeam channel, bounded by a join timeout
//!
//! ## What This Module Does NOT Do:
//! - **Domain Logic**: Does not know what a token or a match is
//! - **Reduction**: Returns per-worker partials; the caller decides how to combine them
//!
//! ```text
//! ┌─────────────────┐    ┌──────────────────┐    ┌─────────────────┐
//! │   Client        │    │   Parallel       │    │   System        │
//! │   (Counter)     │───▶│   Module         │───▶│   Resources     │
//! │                 │    │                  │    │                 │
//! │ • Match logic   │    │ • CPU cores      │    │ • Hardware      │
//! │ • Reduction     │    │ • Partitioning   │    │ • OS threads    │
//! │                 │    │ • Join/timeout   │    │                 │
//! └─────────────────┘    └──────────────────┘    └─────────────────┘
//! ```
//!
//! # Example Usage
//!
//! ```rust
//! use std::time::Duration;
//! use wordbench::parallel::ChunkExecutor;
//!
//! let items: Vec<u32> = (1..=100).collect();
//! let executor = ChunkExecutor::new(4, Duration::from_secs(60));
//! let partials = executor
//!     .execute(&items, |chunk, _stop| chunk.iter().sum::<u32>())
//!     .unwrap();
//! assert_eq!(partials.iter().sum::<u32>(), 5050);
//! ```

pub mod core;

// Re-export main types for easier access
pub use core::{ChunkExecutor, StopFlag, calculate_optimal_workers, partition};
