//! The user's current filter choices.

/// Category, sub-category and free-text query currently selected.
///
/// Blank identifiers are stored as `None`, so an empty dropdown value and
/// "nothing selected" are the same state. Other identifiers are stored
/// verbatim; only the query is trimmed, and only when it is applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    pub category: Option<String>,
    pub sub_category: Option<String>,
    pub query: String,
}

impl SelectionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_category(mut self, category: impl AsRef<str>) -> Self {
        self.category = non_blank(Some(category.as_ref()));
        self
    }

    #[must_use]
    pub fn with_sub_category(mut self, sub_category: impl AsRef<str>) -> Self {
        self.sub_category = non_blank(Some(sub_category.as_ref()));
        self
    }

    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Replace the category. The sub-category always resets, because it
    /// is scoped to the previous category.
    pub fn set_category(&mut self, category: Option<&str>) {
        self.category = non_blank(category);
        self.sub_category = None;
    }

    pub fn set_sub_category(&mut self, sub_category: Option<&str>) {
        self.sub_category = non_blank(sub_category);
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Trimmed, lower-cased query, or `None` when it is blank.
    #[must_use]
    pub fn normalized_query(&self) -> Option<String> {
        let trimmed = self.query.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_lowercase())
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .filter(|value| !value.trim().is_empty())
        .map(str::to_string)
}
