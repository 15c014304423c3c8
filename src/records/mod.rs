//! Persistable record types
//!
//! Every record is normalized at construction: string fields are trimmed and
//! blank values are replaced with a `"No <field>"` placeholder, so a persisted
//! CSV cell is never empty. Records are immutable after construction.

mod pin_data;
mod search_data;

pub use pin_data::PinData;
pub use search_data::SearchData;

use serde::Serialize;

/// A flat record that a sink can deduplicate and write as one CSV row
///
/// Serialization order of the struct fields is the column order.
pub trait Record: Serialize + Send + Sync + 'static {
    /// Field used for duplicate detection within one sink
    fn natural_key(&self) -> &str;
}

/// Normalize one string field
///
/// Surrounding whitespace is trimmed; an empty result becomes `"No <field>"`.
#[must_use]
pub fn normalize_field(field: &str, value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        format!("No {field}")
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_only_becomes_placeholder() {
        assert_eq!(normalize_field("name", "  "), "No name");
        assert_eq!(normalize_field("image", ""), "No image");
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        assert_eq!(normalize_field("name", "Acme "), "Acme");
        assert_eq!(normalize_field("name", "\t Acme Grill\n"), "Acme Grill");
    }
}
