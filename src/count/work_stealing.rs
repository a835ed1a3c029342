use super::{WordCounter, matches};
use crate::error::CountError;
use rayon::prelude::*;

/// Minimum tokens per rayon task, keeps splitting overhead below the comparison cost
const MIN_TOKENS_PER_TASK: usize = 1024;

/// Data-parallel counter on rayon's global work-stealing pool
#[derive(Debug, Default, Clone)]
pub struct WorkStealingCounter;

impl WorkStealingCounter {
    pub fn new() -> Self {
        Self
    }
}

impl WordCounter for WorkStealingCounter {
    fn name(&self) -> &str {
        "RayonCPU"
    }

    fn count(&self, tokens: &[&str], query: &str) -> Result<usize, CountError> {
        Ok(tokens
            .par_iter()
            .with_min_len(MIN_TOKENS_PER_TASK)
            .filter(|token| matches(token, query))
            .count())
    }
}
