//! One-shot `lookup`: apply a fixed selection to a loaded view and format it.

use std::time::Instant;

use serde_json::{Value, json};
use tracing::warn;

use codefinder_core::{Clipboard, FilterView, Renderer};

use crate::render::results_table;

/// Filter inputs for a single lookup.
#[derive(Debug, Clone, Default)]
pub struct LookupRequest {
    pub category: Option<String>,
    pub sub_category: Option<String>,
    pub query: Option<String>,
    /// 1-based row whose code goes to the clipboard.
    pub copy: Option<usize>,
}

/// Drive `view` through the request's events in UI order.
///
/// Returns whether a code was copied.
pub fn apply_lookup<R: Renderer>(
    view: &mut FilterView<R>,
    request: &LookupRequest,
    clipboard: &mut dyn Clipboard,
    now: Instant,
) -> bool {
    view.select_category(request.category.as_deref());
    if request.sub_category.is_some() {
        view.select_sub_category(request.sub_category.as_deref());
    }
    if let Some(query) = &request.query {
        view.set_query(query.clone());
    }

    let Some(row) = request.copy else {
        return false;
    };
    let Some(index) = row.checked_sub(1) else {
        warn!("row numbers start at 1");
        return false;
    };
    if index >= view.table().rows().len() {
        warn!(row, "no such row");
        return false;
    }
    view.copy_row(index, clipboard, now)
}

/// `{"rows": [{"code", "name"}...], "count": "<n> matches"}`
#[must_use]
pub fn lookup_json<R: Renderer>(view: &FilterView<R>) -> Value {
    json!({
        "rows": view.table().rows(),
        "count": view.table().count_label,
    })
}

/// Result table followed by the count label.
#[must_use]
pub fn lookup_text<R: Renderer>(view: &FilterView<R>, now: Instant) -> String {
    let labels: Vec<&str> = (0..view.table().rows().len())
        .filter_map(|index| view.copy_label(index, now))
        .collect();
    format!(
        "{}\n{}",
        results_table(view.table(), &labels),
        view.table().count_label
    )
}
