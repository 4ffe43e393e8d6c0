//! Physical type validation
//!
//! A physical type is either a word from the IVOA UCD1+ controlled vocabulary
//! (`time`, `em.wl`, `pos.eq.ra`, ...), any string prefixed with `custom:`, or
//! unset (`None`).

use std::collections::BTreeSet;
use std::sync::LazyLock;

use tracing::debug;

use crate::error::PhysicalTypeError;

/// Prefix that escapes the controlled vocabulary
pub const CUSTOM_PREFIX: &str = "custom:";

const UCD1P_WORDS: &str = include_str!("ucd1p-words.txt");

static VOCABULARY: LazyLock<BTreeSet<&'static str>> = LazyLock::new(|| {
    let words: BTreeSet<&'static str> = UCD1P_WORDS
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect();
    debug!(count = words.len(), "Loaded UCD1+ vocabulary");
    words
});

/// Iterate over the UCD1+ vocabulary in sorted order
pub fn ucd1p_words() -> impl Iterator<Item = &'static str> {
    VOCABULARY.iter().copied()
}

/// Check a single physical type
pub fn is_valid_physical_type(physical_type: Option<&str>) -> bool {
    match physical_type {
        None => true,
        Some(t) => t.starts_with(CUSTOM_PREFIX) || VOCABULARY.contains(t),
    }
}

/// Validate a sequence of physical types
///
/// Every invalid entry is reported, in input order.
pub fn validate_physical_types<'a, I>(physical_types: I) -> Result<(), PhysicalTypeError>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let invalid: Vec<String> = physical_types
        .into_iter()
        .filter(|t| !is_valid_physical_type(*t))
        .flatten()
        .map(str::to_string)
        .collect();

    if invalid.is_empty() {
        Ok(())
    } else {
        debug!(?invalid, "Rejected physical types");
        Err(PhysicalTypeError::Invalid { types: invalid })
    }
}
