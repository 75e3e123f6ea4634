//! Terminal rendering with comfy-table.

use std::io::Write;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use tracing::warn;

use codefinder_core::copy::COPIED_LABEL;
use codefinder_core::render::{RESULT_COLUMNS, TableBody};
use codefinder_core::{Renderer, ResultTable, SourceKind, SubCategoryControl};
use codefinder_model::{Catalog, Category, CodeCatalog};

/// Result table; `labels` overrides the code column text per row.
pub fn results_table(table: &ResultTable, labels: &[&str]) -> Table {
    let mut out = Table::new();
    out.set_header(vec![
        header_cell("#"),
        header_cell(RESULT_COLUMNS[0]),
        header_cell(RESULT_COLUMNS[1]),
    ]);
    apply_table_style(&mut out);
    align_column(&mut out, 0, CellAlignment::Right);
    match &table.body {
        TableBody::Placeholder(text) => {
            out.add_row(vec![dim_cell("-"), dim_cell(text), dim_cell("")]);
        }
        TableBody::Rows(rows) => {
            for (index, row) in rows.iter().enumerate() {
                let label = labels.get(index).copied().unwrap_or(&row.code);
                out.add_row(vec![
                    dim_cell(index + 1),
                    code_cell(label),
                    Cell::new(&row.name),
                ]);
            }
        }
    }
    out
}

/// Categories with their sub-categories, one row per category.
pub fn categories_table(kind: SourceKind, catalog: &Catalog) -> Table {
    let mut out = Table::new();
    out.set_header(vec![
        header_cell("ID"),
        header_cell(&capitalize(kind.category_noun())),
        header_cell(&format!("{}s", capitalize(kind.sub_category_noun()))),
    ]);
    apply_table_style(&mut out);
    for category in catalog.list_categories() {
        let subs = catalog.list_sub_categories(&category.id);
        let sub_cell = if category.has_children && !subs.is_empty() {
            Cell::new(
                subs.iter()
                    .map(|sub| format!("{} ({})", sub.label, sub.id))
                    .collect::<Vec<_>>()
                    .join(", "),
            )
        } else {
            dim_cell("-")
        };
        out.add_row(vec![
            Cell::new(&category.id).add_attribute(Attribute::Bold),
            Cell::new(&category.label),
            sub_cell,
        ]);
    }
    out
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn code_cell(label: &str) -> Cell {
    if label == COPIED_LABEL {
        Cell::new(label)
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
    } else {
        Cell::new(label).fg(Color::Blue)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Prints every render to a writer.
pub struct TerminalRenderer<W: Write> {
    out: W,
    kind: SourceKind,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(kind: SourceKind, out: W) -> Self {
        Self { out, kind }
    }

    /// Print the results with per-row code labels (copy feedback).
    pub fn print_results(&mut self, table: &ResultTable, labels: &[&str]) {
        let rendered = results_table(table, labels);
        self.emit(&format!("{rendered}\n{}", table.count_label));
    }

    pub fn print_line(&mut self, line: &str) {
        self.emit(line);
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, text: &str) {
        if let Err(error) = writeln!(self.out, "{text}") {
            warn!(%error, "failed to write output");
        }
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn render_categories(&mut self, categories: &[Category]) {
        let noun = self.kind.category_noun();
        let ids = categories
            .iter()
            .map(|category| category.id.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        self.emit(&format!("{} {noun} options: {ids}", categories.len()));
    }

    fn render_sub_categories(&mut self, control: &SubCategoryControl) {
        if !control.visible {
            return;
        }
        let options = control
            .options
            .iter()
            .map(|option| option.id.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        self.emit(&format!("{} [{options}]", control.prompt));
    }

    fn render_table(&mut self, table: &ResultTable) {
        self.print_results(table, &[]);
    }
}

#[cfg(test)]
mod tests {
    use codefinder_model::LeafRecord;

    use super::*;

    #[test]
    fn copied_label_replaces_code_cell() {
        let record = LeafRecord::new("Example U", "1234", "US", Some("CA"));
        let table = ResultTable::from_records(&[&record]);
        let rendered = results_table(&table, &[COPIED_LABEL]).to_string();
        assert!(rendered.contains("Copied!"));
        assert!(!rendered.contains("1234"));
        assert!(rendered.contains("Example U"));
    }

    #[test]
    fn capitalizes_nouns() {
        assert_eq!(capitalize("sub department"), "Sub department");
        assert_eq!(capitalize(""), "");
    }
}
