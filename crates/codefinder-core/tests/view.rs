//! End-to-end tests for the filter view lifecycle.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use codefinder_core::copy::{COPIED_LABEL, COPY_FEEDBACK};
use codefinder_core::render::{LOAD_FAILED_TEXT, NO_MATCHES_TEXT};
use codefinder_core::{
    FilterView, MemoryClipboard, Phase, ResourceFetcher, ResourceLocation, RetainedRenderer,
    SourceKind,
};
use codefinder_model::{Catalog, Category, LeafRecord, LoadError, Result, SubCategory};

/// Serves canned documents; anything else is a network error.
struct StubFetcher {
    documents: HashMap<String, String>,
}

impl StubFetcher {
    fn new(entries: &[(&str, &str)]) -> Self {
        Self {
            documents: entries
                .iter()
                .map(|(location, body)| ((*location).to_string(), (*body).to_string()))
                .collect(),
        }
    }
}

impl ResourceFetcher for StubFetcher {
    fn fetch(&self, location: &ResourceLocation) -> Result<Vec<u8>> {
        self.documents
            .get(&location.to_string())
            .map(|body| body.clone().into_bytes())
            .ok_or_else(|| LoadError::Network {
                location: location.to_string(),
                message: "connection refused".to_string(),
            })
    }
}

const CODES_URL: &str = "https://codes.example.test/data/codes.json";

const CODES: &str = r#"{
    "countries": [
        { "code": "US", "name": "United States", "hasStates": true },
        { "code": "IN", "name": "India", "hasStates": false }
    ],
    "regionsByCountry": {
        "US": [
            { "code": "CA", "name": "California" },
            { "code": "NY", "name": "New York" }
        ]
    },
    "institutions": [
        { "country": "US", "region": "CA", "code": "1234", "name": "Example U" },
        { "country": "US", "region": "NY", "code": "2116", "name": "Columbia U" },
        { "country": "IN", "region": "MH", "code": "7001", "name": "IIT Bombay" }
    ]
}"#;

fn loaded_view() -> FilterView<RetainedRenderer> {
    let mut view = FilterView::new(RetainedRenderer::default());
    let adapter = SourceKind::Institutions.adapter(vec![CODES_URL.parse().unwrap()]);
    view.load(adapter.as_ref(), &StubFetcher::new(&[(CODES_URL, CODES)]))
        .expect("load codes");
    view
}

#[test]
fn load_populates_categories_and_hides_sub_categories() {
    let view = loaded_view();
    assert_eq!(view.phase(), Phase::Loaded);
    assert_eq!(view.renderer().categories.len(), 2);
    assert!(!view.renderer().sub_categories.visible);
    assert_eq!(view.renderer().sub_categories.prompt, "Select a state…");
    assert_eq!(view.table().count_label, "0 matches");
}

#[test]
fn scenario_select_category_then_sub_category() {
    let mut view = loaded_view();
    view.select_category(Some("US"));

    let control = &view.renderer().sub_categories;
    assert!(control.visible);
    assert_eq!(control.options.len(), 2);
    // Sub-category filter stays inactive until one is chosen.
    assert_eq!(view.table().rows().len(), 2);

    view.select_sub_category(Some("CA"));
    let table = view.renderer().table.as_ref().unwrap();
    assert_eq!(table.rows().len(), 1);
    assert_eq!(table.rows()[0].code, "1234");
    assert_eq!(table.rows()[0].name, "Example U");
    assert_eq!(table.count_label, "1 match");
}

#[test]
fn scenario_query_without_match_shows_placeholder() {
    let mut view = loaded_view();
    view.select_category(Some("US"));
    view.select_sub_category(Some("CA"));
    view.set_query("zzz");

    let table = view.renderer().table.as_ref().unwrap();
    assert_eq!(table.placeholder(), Some(NO_MATCHES_TEXT));
    assert_eq!(table.count_label, "0 matches");
}

#[test]
fn scenario_copy_shows_feedback_then_reverts() {
    let mut view = loaded_view();
    view.select_category(Some("US"));
    view.select_sub_category(Some("CA"));

    let mut clipboard = MemoryClipboard::new();
    let now = Instant::now();
    assert!(view.copy_row(0, &mut clipboard, now));
    assert_eq!(clipboard.writes, vec!["1234".to_string()]);
    assert_eq!(view.copy_label(0, now), Some(COPIED_LABEL));
    assert_eq!(view.copy_label(0, now + COPY_FEEDBACK), Some("1234"));
}

#[test]
fn scenario_failed_load_is_terminal() {
    let mut view = FilterView::new(RetainedRenderer::default());
    let adapter = SourceKind::Institutions.adapter(vec![CODES_URL.parse().unwrap()]);
    let error = view
        .load(adapter.as_ref(), &StubFetcher::new(&[]))
        .unwrap_err();
    assert!(matches!(error, LoadError::Network { .. }));
    assert_eq!(view.phase(), Phase::Failed);

    let renderer = view.renderer();
    let table = renderer.table.as_ref().unwrap();
    assert_eq!(table.placeholder(), Some(LOAD_FAILED_TEXT));
    assert_eq!(table.count_label, "");
    assert!(renderer.categories.is_empty());

    // Inputs are ignored once failed.
    view.select_category(Some("US"));
    assert_eq!(view.renderer().table_renders, 1);
    assert_eq!(view.selection().category, None);
}

#[test]
fn changing_category_hides_and_clears_sub_categories() {
    let mut view = loaded_view();
    view.select_category(Some("US"));
    view.select_sub_category(Some("CA"));
    view.select_category(Some("IN"));

    let control = &view.renderer().sub_categories;
    assert!(!control.visible);
    assert!(control.options.is_empty());
    assert_eq!(view.selection().sub_category, None);

    // A sub-category chosen for a childless category is never consulted.
    view.select_sub_category(Some("XX"));
    assert_eq!(view.table().rows().len(), 1);
    assert_eq!(view.table().rows()[0].code, "7001");
}

#[test]
fn clearing_category_empties_results() {
    let mut view = loaded_view();
    view.select_category(Some("US"));
    view.select_category(None);
    assert!(!view.sub_categories().visible);
    assert_eq!(view.table().count_label, "0 matches");
}

#[test]
fn every_event_rerenders_the_table() {
    let mut view = loaded_view();
    let before = view.renderer().table_renders;
    view.select_category(Some("US"));
    view.select_sub_category(Some("CA"));
    view.set_query("e");
    view.set_query("ex");
    assert_eq!(view.renderer().table_renders, before + 4);
}

#[test]
fn refiltering_discards_stale_copy_feedback() {
    let mut view = loaded_view();
    view.select_category(Some("US"));
    let mut clipboard = MemoryClipboard::new();
    let now = Instant::now();
    view.copy_row(0, &mut clipboard, now);
    view.set_query("");
    assert_eq!(view.copy_label(0, now + Duration::from_millis(1)), Some("1234"));
    assert!(!view.copy_row(5, &mut clipboard, now));
}

#[test]
fn departments_source_loads_through_the_same_pipeline() {
    let url = "https://codes.example.test/department_codes.json";
    let body = r#"{ "Department Codes": {
        "Sciences": { "Physical": { "Physics": "61", "Chemistry": "57" } }
    } }"#;
    let mut view = FilterView::new(RetainedRenderer::default());
    let adapter = SourceKind::Departments.adapter(vec![url.parse().unwrap()]);
    view.load(adapter.as_ref(), &StubFetcher::new(&[(url, body)]))
        .unwrap();

    view.select_category(Some("Sciences"));
    assert_eq!(view.sub_categories().prompt, "Select a sub department…");
    view.select_sub_category(Some("Physical"));
    view.set_query("CHEM");
    assert_eq!(view.table().rows()[0].code, "57");
    assert_eq!(view.table().count_label, "1 match");
}

#[test]
fn repeated_load_after_failure_reports_the_failure() {
    let mut view = FilterView::new(RetainedRenderer::default());
    let adapter = SourceKind::Institutions.adapter(vec![CODES_URL.parse().unwrap()]);
    assert!(view.load(adapter.as_ref(), &StubFetcher::new(&[])).is_err());

    let retry = view.load(adapter.as_ref(), &StubFetcher::new(&[(CODES_URL, CODES)]));
    assert!(matches!(retry, Err(LoadError::PreviouslyFailed)));
    assert_eq!(view.phase(), Phase::Failed);
}

#[test]
fn repeated_load_after_success_is_a_no_op() {
    let mut view = loaded_view();
    view.select_category(Some("US"));
    let adapter = SourceKind::Institutions.adapter(vec![CODES_URL.parse().unwrap()]);
    view.load(adapter.as_ref(), &StubFetcher::new(&[])).unwrap();
    assert_eq!(view.phase(), Phase::Loaded);
    assert_eq!(view.selection().category.as_deref(), Some("US"));
}

#[test]
fn keys_with_surrounding_whitespace_are_selectable() {
    let catalog = Catalog::new(
        vec![Category::new("Engineering ", "Engineering ", true)],
        vec![(
            "Engineering ".to_string(),
            vec![SubCategory::new(" Civil", " Civil")],
        )],
        vec![LeafRecord::new("Structures", "14", "Engineering ", Some(" Civil"))],
    );
    let mut view = FilterView::with_catalog(
        SourceKind::Departments,
        catalog,
        RetainedRenderer::default(),
    );

    view.select_category(Some("Engineering "));
    assert!(view.sub_categories().visible);
    assert_eq!(view.sub_categories().options[0].id, " Civil");

    view.select_sub_category(Some(" Civil"));
    assert_eq!(view.table().rows()[0].code, "14");
    assert_eq!(view.table().count_label, "1 match");
}
