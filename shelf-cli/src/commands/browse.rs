//! `shelf browse` command handler
//!
//! Drives [`InfiniteScroll`] over a JSON fixture exactly like a list view
//! would: the first page loads on construction, then `load_more()` is called
//! once per requested page until the list ends or a fetch fails.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::info;

use shelf_core::config::{BackendConfig, PaginationConfig, ShelfConfig};
use shelf_core::error::FetchError;
use shelf_paginator::{
    Entry, InfiniteScroll, ListItem, ListState, MemoryFetcher, ScrollOptions, ScrollOptionsBuilder,
};

use crate::cli::{BrowseArgs, Collection};
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Field shown for each item when no group field is configured.
const DEFAULT_LABEL_FIELD: &str = "name";

/// Execute the `browse` command.
///
/// The report is rendered even when a fetch fails, then the failure is
/// returned so the process exits non-zero.
pub async fn execute(
    args: BrowseArgs,
    config: &ShelfConfig,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let report = collect(&args, config).await?;
    writer.render(&report)?;

    match report.error {
        Some(message) => Err(CliError::Fetch(message)),
        None => Ok(()),
    }
}

/// Load the requested pages and build the report.
pub async fn collect(args: &BrowseArgs, config: &ShelfConfig) -> Result<BrowseReport, CliError> {
    let items = read_fixture(&args.fixture).await?;
    let options = browse_options(args, &config.pagination)?;
    let label_field = options
        .grouping_field()
        .unwrap_or(DEFAULT_LABEL_FIELD)
        .to_owned();

    let source_url = config
        .backend
        .endpoint(collection_path(args.collection, &config.backend));
    let fetcher = Arc::new(MemoryFetcher::new(items).with_source_url(source_url.clone()));
    let endpoint = source_url.clone();
    let scroll = InfiniteScroll::new(Arc::clone(&fetcher), options)?;

    let mut state = scroll.wait_idle().await;
    let mut pages_loaded = u32::from(state.error().is_none());

    if let Some(status) = args.fail_status {
        fetcher.fail_next(FetchError::Http {
            status,
            url: Some(source_url),
        });
    }

    while state.error().is_none() && (args.all || pages_loaded < args.pages) {
        if !scroll.load_more() {
            break;
        }
        state = scroll.wait_idle().await;
        if state.error().is_none() {
            pages_loaded += 1;
        }
    }

    info!(
        fixture = %args.fixture.display(),
        endpoint = %endpoint,
        pages_loaded,
        items = state.item_count(),
        has_more = state.has_more(),
        "browse finished"
    );

    Ok(BrowseReport::new(
        args.fixture.display().to_string(),
        endpoint,
        pages_loaded,
        label_field,
        state,
    ))
}

/// Backend path configured for a collection.
pub fn collection_path(collection: Collection, backend: &BackendConfig) -> &str {
    match collection {
        Collection::Books => &backend.books_path,
        Collection::Series => &backend.series_path,
        Collection::Authors => &backend.authors_path,
    }
}

/// Merge configuration and command-line flags into paginator options.
pub fn browse_options(
    args: &BrowseArgs,
    pagination: &PaginationConfig,
) -> Result<ScrollOptions, CliError> {
    let mut builder = ScrollOptionsBuilder::from_core(pagination);
    if let Some(size) = args.page_size {
        builder = builder.page_size(size);
    }
    if let Some(field) = &args.group_by {
        builder = builder.group_by(field.clone());
    }
    if args.no_groups {
        builder = builder.without_separators();
    }
    Ok(builder.build()?)
}

async fn read_fixture(path: &Path) -> Result<Vec<Value>, CliError> {
    let raw = tokio::fs::read_to_string(path).await?;
    let fixture_error = |reason: String| CliError::Fixture {
        path: path.display().to_string(),
        reason,
    };

    match serde_json::from_str::<Value>(&raw) {
        Ok(Value::Array(items)) => {
            if let Some(pos) = items.iter().position(|item| !item.is_object()) {
                return Err(fixture_error(format!("element {} is not an object", pos)));
            }
            Ok(items)
        }
        Ok(_) => Err(fixture_error("expected a JSON array of records".to_owned())),
        Err(e) => Err(fixture_error(e.to_string())),
    }
}

/// Result of a browse session.
#[derive(Debug, Serialize)]
pub struct BrowseReport {
    /// Fixture path
    pub source: String,
    /// Backend endpoint the fixture stands in for
    pub endpoint: String,
    /// Pages successfully appended
    pub pages_loaded: u32,
    /// Items loaded (separators excluded)
    pub item_count: usize,
    /// Total reported by the last page, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
    /// Whether another page is available
    pub has_more: bool,
    /// Cursor for the next page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
    /// Message of the last failed fetch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Rendered entries in display order
    pub entries: Vec<Entry<Value>>,
    /// Field used as the item label in text output
    #[serde(skip)]
    pub label_field: String,
}

impl BrowseReport {
    fn new(
        source: String,
        endpoint: String,
        pages_loaded: u32,
        label_field: String,
        state: ListState<Value>,
    ) -> Self {
        Self {
            source,
            endpoint,
            pages_loaded,
            item_count: state.item_count(),
            total_count: state.total_count(),
            has_more: state.has_more(),
            next_cursor: state.cursor().map(|c| c.as_str().to_owned()),
            error: state.error().map(str::to_owned),
            entries: state.entries().to_vec(),
            label_field,
        }
    }

    /// Separator letters in display order.
    pub fn letters(&self) -> Vec<char> {
        self.entries
            .iter()
            .filter_map(Entry::as_separator)
            .map(|sep| sep.letter)
            .collect()
    }
}

impl Render for BrowseReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "Browse: {} ({})", self.source.bold(), self.endpoint.dimmed())?;
        writeln!(w)?;

        if self.entries.is_empty() && self.error.is_none() {
            writeln!(w, "  {}", "(no items)".dimmed())?;
        }

        for entry in &self.entries {
            match entry {
                Entry::Separator(sep) => {
                    writeln!(w, "{}", format!("-- {} --", sep.letter).cyan().bold())?;
                }
                Entry::Item(item) => {
                    let label = item.field(&self.label_field).unwrap_or_default();
                    writeln!(w, "  {:<8} {}", item.item_id(), label)?;
                }
            }
        }

        writeln!(w)?;
        let total = self
            .total_count
            .map_or_else(|| "?".to_owned(), |t| t.to_string());
        writeln!(
            w,
            "Pages: {}  Items: {}/{}  More: {}",
            self.pages_loaded,
            self.item_count,
            total,
            if self.has_more { "yes" } else { "no" }
        )?;

        if let Some(error) = &self.error {
            writeln!(w, "{} {}", "Error:".red().bold(), error.red())?;
        }

        Ok(())
    }
}
