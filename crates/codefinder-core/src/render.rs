//! Result table model and the renderer seam.

use serde::Serialize;

use codefinder_model::error::LOAD_FAILED_MESSAGE;
use codefinder_model::{Category, LeafRecord, SubCategory};

/// Placeholder shown when the filters match nothing.
pub const NO_MATCHES_TEXT: &str = "No matches. Adjust your filters.";

/// Placeholder shown when the initial load failed.
pub const LOAD_FAILED_TEXT: &str = LOAD_FAILED_MESSAGE;

/// Column headers, code first.
pub const RESULT_COLUMNS: [&str; 2] = ["Code", "Name"];

/// Result-count label, e.g. `1 match` or `3 matches`.
#[must_use]
pub fn count_label(count: usize) -> String {
    let noun = if count == 1 { "match" } else { "matches" };
    format!("{count} {noun}")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultRow {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableBody {
    /// A single row spanning every column.
    Placeholder(&'static str),
    Rows(Vec<ResultRow>),
}

/// Everything the result area displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultTable {
    pub body: TableBody,
    pub count_label: String,
}

impl ResultTable {
    pub fn from_records(records: &[&LeafRecord]) -> Self {
        if records.is_empty() {
            return Self {
                body: TableBody::Placeholder(NO_MATCHES_TEXT),
                count_label: count_label(0),
            };
        }
        let rows = records
            .iter()
            .map(|record| ResultRow {
                code: record.code.clone(),
                name: record.name.clone(),
            })
            .collect();
        Self {
            body: TableBody::Rows(rows),
            count_label: count_label(records.len()),
        }
    }

    /// Terminal state after a failed load: placeholder row, blank count.
    #[must_use]
    pub fn load_failed() -> Self {
        Self {
            body: TableBody::Placeholder(LOAD_FAILED_TEXT),
            count_label: String::new(),
        }
    }

    #[must_use]
    pub fn rows(&self) -> &[ResultRow] {
        match &self.body {
            TableBody::Rows(rows) => rows,
            TableBody::Placeholder(_) => &[],
        }
    }

    #[must_use]
    pub fn placeholder(&self) -> Option<&'static str> {
        match self.body {
            TableBody::Placeholder(text) => Some(text),
            TableBody::Rows(_) => None,
        }
    }

    /// Plain rendering: one line per row, then the count label.
    #[must_use]
    pub fn to_plain_text(&self) -> String {
        let mut lines: Vec<String> = match &self.body {
            TableBody::Placeholder(text) => vec![(*text).to_string()],
            TableBody::Rows(rows) => rows
                .iter()
                .map(|row| format!("{}  {}", row.code, row.name))
                .collect(),
        };
        lines.push(self.count_label.clone());
        lines.join("\n")
    }
}

/// State of the sub-category control.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubCategoryControl {
    pub visible: bool,
    /// Text of the "none selected" entry.
    pub prompt: &'static str,
    pub options: Vec<SubCategory>,
}

impl SubCategoryControl {
    #[must_use]
    pub fn hidden(prompt: &'static str) -> Self {
        Self {
            visible: false,
            prompt,
            options: Vec::new(),
        }
    }

    #[must_use]
    pub fn shown(prompt: &'static str, options: Vec<SubCategory>) -> Self {
        Self {
            visible: true,
            prompt,
            options,
        }
    }
}

/// Output side of the pipeline.
pub trait Renderer {
    /// Populate the category control. Called once after a successful load.
    fn render_categories(&mut self, categories: &[Category]);

    fn render_sub_categories(&mut self, control: &SubCategoryControl);

    fn render_table(&mut self, table: &ResultTable);
}

/// Renderer that keeps the last state it was given.
#[derive(Debug, Clone, Default)]
pub struct RetainedRenderer {
    pub categories: Vec<Category>,
    pub sub_categories: SubCategoryControl,
    pub table: Option<ResultTable>,
    /// Number of `render_table` calls.
    pub table_renders: usize,
}

impl Renderer for RetainedRenderer {
    fn render_categories(&mut self, categories: &[Category]) {
        self.categories = categories.to_vec();
    }

    fn render_sub_categories(&mut self, control: &SubCategoryControl) {
        self.sub_categories = control.clone();
    }

    fn render_table(&mut self, table: &ResultTable) {
        self.table = Some(table.clone());
        self.table_renders += 1;
    }
}
