//! Normalized catalog shared by every data source.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Top-level grouping the user selects first (a country or a department).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Matching key used for sub-categories and leaf records.
    pub id: String,
    pub label: String,
    pub has_children: bool,
}

impl Category {
    pub fn new(id: impl Into<String>, label: impl Into<String>, has_children: bool) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            has_children,
        }
    }
}

/// Second-level grouping, scoped to exactly one [`Category`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubCategory {
    pub id: String,
    pub label: String,
}

impl SubCategory {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// A displayed name/code pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeafRecord {
    pub name: String,
    pub code: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_category: Option<String>,
}

impl LeafRecord {
    pub fn new(
        name: impl Into<String>,
        code: impl Into<String>,
        category: impl Into<String>,
        sub_category: Option<impl Into<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            category: category.into(),
            sub_category: sub_category.map(Into::into),
        }
    }

    /// True when the record belongs to `category` and, if given, to
    /// `sub_category` within that category.
    #[must_use]
    pub fn belongs_to(&self, category: &str, sub_category: Option<&str>) -> bool {
        if self.category != category {
            return false;
        }
        match sub_category {
            Some(sub) => self.sub_category.as_deref() == Some(sub),
            None => true,
        }
    }
}

/// Read-only capability set every loaded data source exposes.
pub trait CodeCatalog {
    fn list_categories(&self) -> &[Category];

    /// Sub-categories of `category` in source order; empty when it has none.
    fn list_sub_categories(&self, category: &str) -> &[SubCategory];

    /// Leaf records of `category` (narrowed to `sub_category` when given),
    /// in source order.
    fn list_leaves(&self, category: &str, sub_category: Option<&str>) -> Vec<&LeafRecord>;

    fn category(&self, id: &str) -> Option<&Category> {
        self.list_categories().iter().find(|category| category.id == id)
    }
}

/// The normalized in-memory shape produced by a source adapter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    categories: Vec<Category>,
    sub_categories: BTreeMap<String, Vec<SubCategory>>,
    leaves: Vec<LeafRecord>,
}

impl Catalog {
    pub fn new<I>(categories: Vec<Category>, sub_categories: I, leaves: Vec<LeafRecord>) -> Self
    where
        I: IntoIterator<Item = (String, Vec<SubCategory>)>,
    {
        Self {
            categories,
            sub_categories: sub_categories.into_iter().collect(),
            leaves,
        }
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    #[must_use]
    pub fn leaves(&self) -> &[LeafRecord] {
        &self.leaves
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Total number of sub-categories across all categories.
    #[must_use]
    pub fn sub_category_count(&self) -> usize {
        self.sub_categories.values().map(Vec::len).sum()
    }
}

impl CodeCatalog for Catalog {
    fn list_categories(&self) -> &[Category] {
        &self.categories
    }

    fn list_sub_categories(&self, category: &str) -> &[SubCategory] {
        self.sub_categories
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    fn list_leaves(&self, category: &str, sub_category: Option<&str>) -> Vec<&LeafRecord> {
        self.leaves
            .iter()
            .filter(|leaf| leaf.belongs_to(category, sub_category))
            .collect()
    }
}
