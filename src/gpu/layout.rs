//! Host-side buffer layout for the GPU counting kernel
//!
//! Tokens are packed back to back into one byte buffer. Because tokens vary in length,
//! work-item `i` cannot derive its start from a fixed stride; it reads `offsets[i]`, the
//! exclusive prefix sum of all preceding lengths, and `lengths[i]`.

use crate::error::CountError;

/// Packed token bytes plus per-token addressing tables
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenLayout {
    bytes: Vec<u8>,
    offsets: Vec<u32>,
    lengths: Vec<u32>,
}

impl TokenLayout {
    /// Pack `tokens` as UTF-8
    ///
    /// Fails when the packed size does not fit the kernel's 32-bit addressing.
    pub fn build(tokens: &[&str]) -> Result<Self, CountError> {
        let total: usize = tokens.iter().map(|t| t.len()).sum();
        if total > u32::MAX as usize || tokens.len() > u32::MAX as usize {
            return Err(CountError::DeviceTransfer(format!(
                "{} tokens / {} bytes exceed 32-bit device addressing",
                tokens.len(),
                total
            )));
        }

        let mut bytes = Vec::with_capacity(total);
        let mut offsets = Vec::with_capacity(tokens.len());
        let mut lengths = Vec::with_capacity(tokens.len());

        for token in tokens {
            offsets.push(bytes.len() as u32);
            lengths.push(token.len() as u32);
            bytes.extend_from_slice(token.as_bytes());
        }

        Ok(Self {
            bytes,
            offsets,
            lengths,
        })
    }

    pub fn token_count(&self) -> usize {
        self.lengths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lengths.is_empty()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn offsets(&self) -> &[u32] {
        &self.offsets
    }

    pub fn lengths(&self) -> &[u32] {
        &self.lengths
    }

    /// Byte range of token `index`, addressed the same way the kernel does
    pub fn token_bytes(&self, index: usize) -> &[u8] {
        let start = self.offsets[index] as usize;
        let len = self.lengths[index] as usize;
        &self.bytes[start..start + len]
    }
}
