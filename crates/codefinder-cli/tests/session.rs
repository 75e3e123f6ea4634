//! Integration tests for the interactive session.

use std::io::Cursor;

use codefinder_cli::render::TerminalRenderer;
use codefinder_cli::session::run_session;
use codefinder_core::{FilterView, MemoryClipboard, SourceKind};
use codefinder_model::{Catalog, Category, LeafRecord, SubCategory};

fn catalog() -> Catalog {
    Catalog::new(
        vec![
            Category::new("US", "United States", true),
            Category::new("IN", "India", false),
        ],
        vec![("US".to_string(), vec![SubCategory::new("CA", "California")])],
        vec![
            LeafRecord::new("Example U", "1234", "US", Some("CA")),
            LeafRecord::new("IIT Bombay", "7001", "IN", None::<String>),
        ],
    )
}

fn run(script: &str, clipboard: &mut MemoryClipboard) -> String {
    let renderer = TerminalRenderer::new(SourceKind::Institutions, Vec::new());
    let mut view = FilterView::with_catalog(SourceKind::Institutions, catalog(), renderer);
    run_session(&mut view, Cursor::new(script.to_string()), clipboard);
    String::from_utf8(view.into_renderer().into_inner()).unwrap()
}

#[test]
fn category_and_state_narrow_to_one_match() {
    let output = run("category US\nsub CA\n", &mut MemoryClipboard::new());
    assert!(output.contains("2 country options: US, IN"));
    assert!(output.contains("Select a state… [CA]"));
    assert!(output.contains("Example U"));
    assert!(output.trim_end().ends_with("1 match"));
}

#[test]
fn unmatched_search_shows_placeholder() {
    let output = run("category US\nsub CA\nsearch zzz\n", &mut MemoryClipboard::new());
    assert!(output.contains("No matches. Adjust your filters."));
    assert!(output.trim_end().ends_with("0 matches"));
}

#[test]
fn copy_writes_code_and_shows_feedback() {
    let mut clipboard = MemoryClipboard::new();
    let output = run("category US\ncopy 1\nquit\nsearch ignored\n", &mut clipboard);
    assert_eq!(clipboard.writes, vec!["1234".to_string()]);
    assert!(output.contains("Copied!"));
    assert!(!output.contains("ignored"));
}

#[test]
fn bad_lines_report_errors_and_continue() {
    let output = run("bogus\ncopy 9\n\ncategory IN\n", &mut MemoryClipboard::new());
    assert!(output.contains("error: unknown command `bogus`"));
    assert!(output.contains("error: no row 9"));
    assert!(output.contains("IIT Bombay"));
}
