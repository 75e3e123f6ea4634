//! Data model for cascading code lookup tables.
//!
//! A [`Catalog`] is the normalized, read-only result of loading one data
//! source. A [`SelectionState`] holds the user's current filter choices.

pub mod catalog;
pub mod error;
pub mod selection;

pub use catalog::{Catalog, Category, CodeCatalog, LeafRecord, SubCategory};
pub use error::{LoadError, Result};
pub use selection::SelectionState;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaf_record_serializes_with_optional_sub_category() {
        let record = LeafRecord::new("Example U", "1234", "US", None::<String>);
        let json = serde_json::to_value(&record).expect("serialize record");
        assert_eq!(json["code"], "1234");
        assert!(json.get("sub_category").is_none());
    }
}
