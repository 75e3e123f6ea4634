//! The filter engine.

use codefinder_model::{CodeCatalog, LeafRecord, SelectionState};

/// Leaf records visible for `selection`, in source order.
///
/// Narrowing is applied as category, then sub-category (only when the
/// category has children and one is chosen), then free text.
pub fn filter_leaves<'a, C>(catalog: &'a C, selection: &SelectionState) -> Vec<&'a LeafRecord>
where
    C: CodeCatalog + ?Sized,
{
    let Some(category) = selection.category.as_deref() else {
        return Vec::new();
    };
    let has_children = catalog
        .category(category)
        .is_some_and(|category| category.has_children);
    let sub_category = if has_children {
        selection.sub_category.as_deref()
    } else {
        None
    };

    let mut rows = catalog.list_leaves(category, sub_category);
    if let Some(query) = selection.normalized_query() {
        rows.retain(|leaf| matches_query(&leaf.name, &query));
    }
    rows
}

/// Case-insensitive substring match against an already normalized query.
#[must_use]
pub fn matches_query(name: &str, normalized_query: &str) -> bool {
    name.to_lowercase().contains(normalized_query)
}

#[cfg(test)]
mod tests {
    use codefinder_model::{Catalog, Category, SubCategory};

    use super::*;

    fn catalog() -> Catalog {
        Catalog::new(
            vec![
                Category::new("US", "United States", true),
                Category::new("IN", "India", false),
            ],
            vec![("US".to_string(), vec![SubCategory::new("CA", "California")])],
            vec![
                LeafRecord::new("Academy of Art U", "3354", "US", Some("CA")),
                LeafRecord::new("Columbia U", "2116", "US", Some("NY")),
                LeafRecord::new("IIT Bombay", "7001", "IN", Some("MH")),
            ],
        )
    }

    fn codes(rows: &[&LeafRecord]) -> Vec<String> {
        rows.iter().map(|leaf| leaf.code.clone()).collect()
    }

    #[test]
    fn no_category_means_no_rows() {
        let catalog = catalog();
        let selection = SelectionState::new().with_sub_category("CA").with_query("art");
        assert!(filter_leaves(&catalog, &selection).is_empty());
    }

    #[test]
    fn sub_category_inactive_until_chosen() {
        let catalog = catalog();
        let rows = filter_leaves(&catalog, &SelectionState::new().with_category("US"));
        assert_eq!(codes(&rows), vec!["3354", "2116"]);
    }

    #[test]
    fn sub_category_ignored_for_category_without_children() {
        let catalog = catalog();
        let selection = SelectionState::new().with_category("IN").with_sub_category("XX");
        assert_eq!(codes(&filter_leaves(&catalog, &selection)), vec!["7001"]);
    }

    #[test]
    fn query_applies_after_sub_category() {
        let catalog = catalog();
        let selection = SelectionState::new()
            .with_category("US")
            .with_sub_category("CA")
            .with_query("  ART ");
        assert_eq!(codes(&filter_leaves(&catalog, &selection)), vec!["3354"]);

        let miss = selection.with_query("columbia");
        assert!(filter_leaves(&catalog, &miss).is_empty());
    }

    #[test]
    fn unknown_category_yields_nothing() {
        let catalog = catalog();
        let selection = SelectionState::new().with_category("United States");
        assert!(filter_leaves(&catalog, &selection).is_empty());
    }
}
