use super::{WordCounter, matches};
use crate::error::CountError;

/// Single-threaded, single-pass counter
///
/// The reference result every other strategy must agree with.
#[derive(Debug, Default, Clone)]
pub struct SerialCounter;

impl SerialCounter {
    pub fn new() -> Self {
        Self
    }
}

impl WordCounter for SerialCounter {
    fn name(&self) -> &str {
        "SerialCPU"
    }

    fn count(&self, tokens: &[&str], query: &str) -> Result<usize, CountError> {
        let mut occurrences = 0;
        for token in tokens {
            if matches(token, query) {
                occurrences += 1;
            }
        }
        Ok(occurrences)
    }
}
