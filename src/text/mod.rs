//! Text normalization
//!
//! Strips punctuation from raw text and splits it into whitespace-delimited tokens.
//! Letters, digits and whitespace are never removed, so a token is any maximal run of
//! non-whitespace characters left after stripping.

use crate::error::BenchError;
use unicode_properties::{GeneralCategoryGroup, UnicodeGeneralCategory};

/// Punctuation-free text ready to be split into tokens
///
/// Tokens borrow from this buffer, so it is produced once per run and shared read-only
/// by every strategy and every repetition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    text: String,
}

impl Normalized {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Split on runs of whitespace, dropping empty tokens
    pub fn tokens(&self) -> Vec<&str> {
        self.text.split_whitespace().collect()
    }
}

/// Remove punctuation from `raw`
pub fn normalize(raw: &str) -> Normalized {
    let text = raw.chars().filter(|c| !is_punctuation(*c)).collect();
    Normalized { text }
}

/// Decode `raw` as UTF-8, then normalize it
pub fn normalize_bytes(raw: &[u8]) -> Result<Normalized, BenchError> {
    let text = std::str::from_utf8(raw).map_err(|e| BenchError::Normalization {
        offset: e.valid_up_to(),
    })?;
    Ok(normalize(text))
}

/// ASCII `[:punct:]` plus every character in Unicode General_Category P*
///
/// ASCII symbols such as `$`, `+` and `|` count as punctuation, matching the POSIX class.
/// Outside ASCII only the P* categories are stripped, so math symbols like `⁄` (Sm) stay.
pub fn is_punctuation(c: char) -> bool {
    if c.is_ascii() {
        return c.is_ascii_punctuation();
    }
    c.general_category_group() == GeneralCategoryGroup::Punctuation
}
