use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tracing::{info_span, warn};

use codefinder_core::{
    DefaultFetcher, FilterView, ResourceLocation, ResultTable, RetainedRenderer, SourceKind,
    load_catalog,
};
use codefinder_model::LoadError;

use codefinder_cli::lookup::{LookupRequest, apply_lookup, lookup_json, lookup_text};
use codefinder_cli::render::{TerminalRenderer, categories_table, results_table};
use codefinder_cli::session::{HELP_TEXT, LazyClipboard, run_session};

use crate::cli::{LookupArgs, SourceArgs};

const DATA_DIR_ENV_VAR: &str = "CODEFINDER_DATA_DIR";

/// Data directory used when no `--data`/`--data-dir` is given.
pub fn default_data_dir() -> PathBuf {
    match std::env::var(DATA_DIR_ENV_VAR) {
        Ok(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
        _ => PathBuf::from("data"),
    }
}

fn resolve_resources(kind: SourceKind, args: &SourceArgs) -> Vec<ResourceLocation> {
    if !args.data.is_empty() {
        return args
            .data
            .iter()
            .map(|location| match location.parse::<ResourceLocation>() {
                Ok(location) => location,
                Err(never) => match never {},
            })
            .collect();
    }
    let dir = args.data_dir.clone().unwrap_or_else(default_data_dir);
    kind.default_resources(&dir)
}

fn build_fetcher(args: &SourceArgs) -> Result<DefaultFetcher> {
    let fetcher = if args.no_proxy {
        DefaultFetcher::without_proxy()
    } else {
        DefaultFetcher::new()
    };
    fetcher.context("create fetcher")
}

fn print_load_failure(error: &LoadError) {
    let table = ResultTable::load_failed();
    println!("{}", results_table(&table, &[]));
    eprintln!("{}", error.user_message());
}

pub fn run_categories(args: &SourceArgs) -> Result<()> {
    let kind = SourceKind::from(args.source);
    let adapter = kind.adapter(resolve_resources(kind, args));
    let fetcher = build_fetcher(args)?;
    let catalog = match load_catalog(adapter.as_ref(), &fetcher) {
        Ok(catalog) => catalog,
        Err(error) => {
            print_load_failure(&error);
            return Err(error).with_context(|| format!("load {kind} data"));
        }
    };
    println!("{}", categories_table(kind, &catalog));
    Ok(())
}

pub fn run_lookup(args: &LookupArgs) -> Result<()> {
    let kind = SourceKind::from(args.source.source);
    let span = info_span!("lookup", source = %kind);
    let _guard = span.enter();

    let adapter = kind.adapter(resolve_resources(kind, &args.source));
    let fetcher = build_fetcher(&args.source)?;
    let mut view = FilterView::new(RetainedRenderer::default());
    if let Err(error) = view.load(adapter.as_ref(), &fetcher) {
        print_load_failure(&error);
        return Err(error).with_context(|| format!("load {kind} data"));
    }

    let request = LookupRequest {
        category: args.category.clone(),
        sub_category: args.sub_category.clone(),
        query: args.query.clone(),
        copy: args.copy,
    };
    let hold = Duration::from_secs(args.copy_hold);
    let mut clipboard = if hold.is_zero() {
        LazyClipboard::default()
    } else {
        if args.copy.is_some() && cfg!(target_os = "linux") {
            eprintln!(
                "Keeping the copied code on the clipboard for up to {}s…",
                hold.as_secs()
            );
        }
        LazyClipboard::holding(hold)
    };
    let now = Instant::now();
    if !apply_lookup(&mut view, &request, &mut clipboard, now) && args.copy.is_some() {
        warn!("nothing was copied");
    }

    if args.json {
        let output = lookup_json(&view);
        println!(
            "{}",
            serde_json::to_string_pretty(&output).context("serialize results")?
        );
        return Ok(());
    }
    println!("{}", lookup_text(&view, now));
    Ok(())
}

pub fn run_browse(args: &SourceArgs) -> Result<()> {
    let kind = SourceKind::from(args.source);
    let adapter = kind.adapter(resolve_resources(kind, args));
    let fetcher = build_fetcher(args)?;
    let mut view = FilterView::new(TerminalRenderer::new(kind, io::stdout()));
    view.load(adapter.as_ref(), &fetcher)
        .with_context(|| format!("load {kind} data"))?;

    let stdin = io::stdin();
    if stdin.is_terminal() {
        view.renderer_mut().print_line(HELP_TEXT);
    }
    let mut clipboard = LazyClipboard::default();
    run_session(&mut view, stdin.lock(), &mut clipboard);
    Ok(())
}
