use super::{WordCounter, matches};
use crate::error::CountError;
use crate::parallel::{ChunkExecutor, calculate_optimal_workers};
use std::time::Duration;

/// Default bound on how long `count` waits for its workers
pub const DEFAULT_WORKER_TIMEOUT: Duration = Duration::from_secs(60 * 60);

/// Tokens scanned between checks of the stop flag
const STOP_CHECK_INTERVAL: usize = 4096;

/// Multi-threaded counter over contiguous token chunks
///
/// Each call spins up its own pool of scoped threads, one per chunk, and tears it down
/// before returning. Workers count into private accumulators that the calling thread sums.
#[derive(Debug, Clone)]
pub struct ParallelCpuCounter {
    workers: usize,
    timeout: Duration,
}

impl ParallelCpuCounter {
    pub fn new(workers: usize, timeout: Duration) -> Self {
        Self {
            workers: workers.max(1),
            timeout,
        }
    }

    /// One worker per available core
    pub fn with_available_parallelism() -> Self {
        Self::new(calculate_optimal_workers(0, 100), DEFAULT_WORKER_TIMEOUT)
    }
}

impl Default for ParallelCpuCounter {
    fn default() -> Self {
        Self::with_available_parallelism()
    }
}

impl WordCounter for ParallelCpuCounter {
    fn name(&self) -> &str {
        "ParallelCPU"
    }

    fn count(&self, tokens: &[&str], query: &str) -> Result<usize, CountError> {
        // Don't create more workers than tokens
        let workers = std::cmp::min(self.workers, tokens.len().max(1));
        tracing::debug!(
            "Counting {} tokens with {} workers (chunk size {})",
            tokens.len(),
            workers,
            tokens.len() / workers
        );

        let executor = ChunkExecutor::new(workers, self.timeout);
        let partials = executor.execute(tokens, |chunk, stop| {
            let mut local_count = 0usize;
            for block in chunk.chunks(STOP_CHECK_INTERVAL) {
                if stop.is_raised() {
                    break;
                }
                local_count += block.iter().filter(|token| matches(token, query)).count();
            }
            local_count
        })?;

        Ok(partials.into_iter().sum())
    }
}
