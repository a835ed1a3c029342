use crate::error::CountError;
use crossbeam::channel::{Receiver, RecvTimeoutError, bounded};
use std::ops::Range;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Calculate the number of worker threads from the available cores
///
/// `thread_percentage` scales the detected core count (minimum one worker) and
/// `max_threads` caps the result when non-zero.
pub fn calculate_optimal_workers(max_threads: usize, thread_percentage: u8) -> usize {
    let cpu_cores = num_cpus::get();

    // Apply thread percentage from config
    let max_by_percentage = std::cmp::max(1, (cpu_cores * thread_percentage as usize) / 100);

    // Apply max_threads limit if specified (0 means use percentage calculation)
    if max_threads > 0 {
        std::cmp::min(max_threads, max_by_percentage)
    } else {
        max_by_percentage
    }
}

/// Split `[0, len)` into `workers` contiguous ranges of `len / workers` items
///
/// The last range absorbs the remainder, so the ranges cover every index exactly once.
/// When `len < workers` every range but the last is empty.
pub fn partition(len: usize, workers: usize) -> Vec<Range<usize>> {
    let workers = workers.max(1);
    let chunk_size = len / workers;

    (0..workers)
        .map(|i| {
            let start = i * chunk_size;
            let end = if i == workers - 1 {
                len
            } else {
                (i + 1) * chunk_size
            };
            start..end
        })
        .collect()
}

/// Cooperative stop signal raised when the collector gives up waiting
#[derive(Debug, Default)]
pub struct StopFlag(AtomicBool);

impl StopFlag {
    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    fn raise(&self) {
        self.0.store(true, Ordering::Relaxed);
    }
}

/// Runs one scoped worker per chunk and gathers the per-worker results
#[derive(Debug, Clone)]
pub struct ChunkExecutor {
    workers: usize,
    timeout: Duration,
}

impl ChunkExecutor {
    pub fn new(workers: usize, timeout: Duration) -> Self {
        Self {
            workers: workers.max(1),
            timeout,
        }
    }

    /// Apply `worker_fn` to each chunk of `items` on its own thread
    ///
    /// Returns one result per worker, indexed by worker id. Blocks until every worker has
    /// reported or the timeout elapses. A panicking worker fails the whole call with
    /// [`CountError::WorkerFailure`]; a timeout raises the [`StopFlag`], waits for the
    /// workers to wind down and returns [`CountError::WorkerTimeout`].
    pub fn execute<T, R, F>(&self, items: &[T], worker_fn: F) -> Result<Vec<R>, CountError>
    where
        T: Sync,
        R: Send,
        F: Fn(&[T], &StopFlag) -> R + Sync,
    {
        let ranges = partition(items.len(), self.workers);
        let worker_count = ranges.len();
        let stop = StopFlag::default();
        let deadline = Instant::now().checked_add(self.timeout);

        // Every worker sends exactly once, so the buffer never blocks a sender
        let (result_tx, result_rx) = bounded(worker_count);

        let outcome = crossbeam::thread::scope(|s| {
            for (worker_id, range) in ranges.into_iter().enumerate() {
                let result_tx = result_tx.clone();
                let chunk = &items[range];
                let worker_fn = &worker_fn;
                let stop = &stop;

                s.spawn(move |_| {
                    let partial = panic::catch_unwind(AssertUnwindSafe(|| worker_fn(chunk, stop)))
                        .map_err(|payload| panic_message(payload.as_ref()));
                    // Collector may already have given up
                    let _ = result_tx.send((worker_id, partial));
                });
            }

            // Drop the original sender so the collector sees disconnection
            drop(result_tx);

            let collected = self.collect_results(&result_rx, worker_count, deadline);
            if collected.is_err() {
                stop.raise();
            }
            collected
        });

        match outcome {
            Ok(result) => result,
            Err(payload) => Err(CountError::WorkerFailure {
                worker: 0,
                reason: panic_message(payload.as_ref()),
            }),
        }
    }

    /// Collect results from workers into a worker-id-indexed table
    fn collect_results<R>(
        &self,
        result_rx: &Receiver<(usize, Result<R, String>)>,
        worker_count: usize,
        deadline: Option<Instant>,
    ) -> Result<Vec<R>, CountError> {
        let mut slots: Vec<Option<R>> = (0..worker_count).map(|_| None).collect();
        let mut received = 0;

        while received < worker_count {
            let message = match deadline {
                Some(deadline) => result_rx.recv_deadline(deadline),
                None => result_rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
            };

            match message {
                Ok((worker, Ok(partial))) => {
                    slots[worker] = Some(partial);
                    received += 1;
                }
                Ok((worker, Err(reason))) => {
                    return Err(CountError::WorkerFailure { worker, reason });
                }
                Err(RecvTimeoutError::Timeout) => {
                    return Err(CountError::WorkerTimeout {
                        timeout: self.timeout,
                    });
                }
                Err(RecvTimeoutError::Disconnected) => {
                    let worker = slots.iter().position(Option::is_none).unwrap_or(0);
                    return Err(CountError::WorkerFailure {
                        worker,
                        reason: "worker exited without reporting a result".to_string(),
                    });
                }
            }
        }

        Ok(slots.into_iter().flatten().collect())
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "worker panicked".to_string()
    }
}
