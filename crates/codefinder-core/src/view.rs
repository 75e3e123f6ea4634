//! The cascading filter view: owns loaded data and selection state, reacts
//! to input events and pushes results to a [`Renderer`].

use std::time::Instant;

use tracing::{debug, error};

use codefinder_model::{Catalog, CodeCatalog, LoadError, SelectionState};

use crate::copy::{Clipboard, CopyButton};
use crate::filter::filter_leaves;
use crate::loader::{ResourceFetcher, load_catalog};
use crate::render::{Renderer, ResultTable, SubCategoryControl};
use crate::source::{SourceAdapter, SourceKind};

/// Lifecycle of a [`FilterView`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Before the data has been fetched.
    Idle,
    /// Data is available and inputs are live.
    Loaded,
    /// The load failed; the view no longer reacts to input.
    Failed,
}

pub struct FilterView<R: Renderer> {
    phase: Phase,
    kind: Option<SourceKind>,
    catalog: Catalog,
    selection: SelectionState,
    sub_categories: SubCategoryControl,
    table: ResultTable,
    buttons: Vec<CopyButton>,
    renderer: R,
}

impl<R: Renderer> FilterView<R> {
    pub fn new(renderer: R) -> Self {
        Self {
            phase: Phase::Idle,
            kind: None,
            catalog: Catalog::default(),
            selection: SelectionState::new(),
            sub_categories: SubCategoryControl::hidden(""),
            table: ResultTable::from_records(&[]),
            buttons: Vec::new(),
            renderer,
        }
    }

    /// A view that is already loaded with `catalog`.
    pub fn with_catalog(kind: SourceKind, catalog: Catalog, renderer: R) -> Self {
        let mut view = Self::new(renderer);
        view.enter_loaded(kind, catalog);
        view
    }

    /// Fetch the adapter's data. On failure the view renders its failed
    /// state and the error is returned for the caller to report.
    ///
    /// A view loads once. Calling again on a loaded view is a no-op; on a
    /// failed view it returns [`LoadError::PreviouslyFailed`].
    pub fn load<F>(&mut self, adapter: &dyn SourceAdapter, fetcher: &F) -> Result<(), LoadError>
    where
        F: ResourceFetcher + ?Sized,
    {
        match self.phase {
            Phase::Idle => {}
            Phase::Loaded => {
                debug!("ignoring repeated load");
                return Ok(());
            }
            Phase::Failed => return Err(LoadError::PreviouslyFailed),
        }
        match load_catalog(adapter, fetcher) {
            Ok(catalog) => {
                self.enter_loaded(adapter.kind(), catalog);
                Ok(())
            }
            Err(load_error) => {
                error!(source = %adapter.kind(), error = %load_error, "failed to load data");
                self.phase = Phase::Failed;
                self.kind = Some(adapter.kind());
                self.buttons.clear();
                self.table = ResultTable::load_failed();
                self.renderer.render_table(&self.table);
                Err(load_error)
            }
        }
    }

    fn enter_loaded(&mut self, kind: SourceKind, catalog: Catalog) {
        self.phase = Phase::Loaded;
        self.kind = Some(kind);
        self.catalog = catalog;
        self.selection = SelectionState::new();
        self.sub_categories = SubCategoryControl::hidden(kind.sub_category_prompt());
        self.renderer.render_categories(self.catalog.list_categories());
        self.renderer.render_sub_categories(&self.sub_categories);
        self.refresh();
    }

    /// Category control changed. `None` (or blank) clears the selection.
    pub fn select_category(&mut self, category: Option<&str>) {
        if !self.accepts_input() {
            return;
        }
        self.selection.set_category(category);
        let prompt = self.sub_categories.prompt;
        let selected = self
            .selection
            .category
            .as_deref()
            .and_then(|id| self.catalog.category(id));
        self.sub_categories = match selected {
            Some(category) if category.has_children => SubCategoryControl::shown(
                prompt,
                self.catalog.list_sub_categories(&category.id).to_vec(),
            ),
            _ => SubCategoryControl::hidden(prompt),
        };
        self.renderer.render_sub_categories(&self.sub_categories);
        self.refresh();
    }

    /// Sub-category control changed.
    pub fn select_sub_category(&mut self, sub_category: Option<&str>) {
        if !self.accepts_input() {
            return;
        }
        self.selection.set_sub_category(sub_category);
        self.refresh();
    }

    /// Free-text control changed; runs on every keystroke.
    pub fn set_query(&mut self, query: impl Into<String>) {
        if !self.accepts_input() {
            return;
        }
        self.selection.set_query(query);
        self.refresh();
    }

    /// Activate the copy control of row `index`.
    ///
    /// Returns whether a code was written to the clipboard.
    pub fn copy_row<C>(&mut self, index: usize, clipboard: &mut C, now: Instant) -> bool
    where
        C: Clipboard + ?Sized,
    {
        self.buttons
            .get_mut(index)
            .is_some_and(|button| button.activate(clipboard, now))
    }

    /// Text of the copy control of row `index` at `now`.
    #[must_use]
    pub fn copy_label(&self, index: usize, now: Instant) -> Option<&str> {
        self.buttons.get(index).map(|button| button.label(now))
    }

    fn refresh(&mut self) {
        let records = filter_leaves(&self.catalog, &self.selection);
        debug!(
            category = ?self.selection.category,
            sub_category = ?self.selection.sub_category,
            query = %self.selection.query,
            matches = records.len(),
            "filter applied"
        );
        self.buttons = records
            .iter()
            .map(|record| CopyButton::new(record.code.clone()))
            .collect();
        self.table = ResultTable::from_records(&records);
        self.renderer.render_table(&self.table);
    }

    fn accepts_input(&self) -> bool {
        self.phase == Phase::Loaded
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn kind(&self) -> Option<SourceKind> {
        self.kind
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    #[must_use]
    pub fn sub_categories(&self) -> &SubCategoryControl {
        &self.sub_categories
    }

    #[must_use]
    pub fn table(&self) -> &ResultTable {
        &self.table
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
