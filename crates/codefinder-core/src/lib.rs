//! Cascading filter pipeline: load a data source, narrow it by category,
//! sub-category and free text, and render the matches as copyable rows.
//!
//! The pieces compose in a fixed order:
//!
//! 1. [`loader`] fetches the resources a [`source::SourceAdapter`] declares
//!    and hands them to the adapter, which normalizes them into a
//!    [`Catalog`](codefinder_model::Catalog).
//! 2. [`view::FilterView`] owns the catalog and the selection state and
//!    reacts to input events.
//! 3. [`filter::filter_leaves`] recomputes the visible records on every event.
//! 4. [`render`] turns the records into a [`render::ResultTable`] and pushes
//!    it to a [`render::Renderer`].

pub mod copy;
pub mod filter;
pub mod loader;
pub mod render;
pub mod source;
pub mod view;

pub use copy::{Clipboard, ClipboardError, CopyButton, MemoryClipboard, SystemClipboard};
pub use filter::filter_leaves;
pub use loader::{DefaultFetcher, ResourceFetcher, ResourceLocation, load_catalog};
pub use render::{Renderer, ResultTable, RetainedRenderer, SubCategoryControl};
pub use source::{SourceAdapter, SourceKind};
pub use view::{FilterView, Phase};
