//! Static command-palette index over pages, KPIs, charts and features.

use serde::Serialize;
use tracing::debug;

/// Entries shown for an empty query.
pub const DEFAULT_VIEW_LEN: usize = 5;
/// Upper bound on results for a non-empty query.
pub const MAX_RESULTS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchCategory {
    Page,
    Metric,
    Chart,
    Feature,
}

impl SearchCategory {
    pub fn label(&self) -> &'static str {
        match self {
            SearchCategory::Page => "page",
            SearchCategory::Metric => "metric",
            SearchCategory::Chart => "chart",
            SearchCategory::Feature => "feature",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SearchEntry {
    pub id: &'static str,
    pub title: &'static str,
    /// Route, optionally followed by `#element-id`.
    pub path: &'static str,
    pub category: SearchCategory,
    pub keywords: &'static [&'static str],
}

impl SearchEntry {
    pub fn target(&self) -> NavigationTarget<'static> {
        split_path(self.path)
    }

    /// Secondary line of a result row, e.g. `metric • revenue`.
    pub fn subtitle(&self) -> String {
        match self.keywords.first() {
            Some(keyword) => format!("{} • {}", self.category.label(), keyword),
            None => self.category.label().to_string(),
        }
    }
}

const fn entry(
    id: &'static str,
    title: &'static str,
    path: &'static str,
    category: SearchCategory,
    keywords: &'static [&'static str],
) -> SearchEntry {
    SearchEntry {
        id,
        title,
        path,
        category,
        keywords,
    }
}

pub static SEARCH_INDEX: [SearchEntry; 17] = [
    // Pages
    entry("page-dash", "Dashboard", "/dashboard", SearchCategory::Page, &["home", "overview", "main"]),
    entry("page-analytics", "Analytics", "/analytics", SearchCategory::Page, &["charts", "graphs", "reports"]),
    entry("page-txns", "Transactions", "/transactions", SearchCategory::Page, &["payments", "history", "list"]),
    // Dashboard metrics and charts
    entry("metric-gtv", "Total GTV", "/dashboard#kpi-gtv", SearchCategory::Metric, &["revenue", "volume", "sales", "gross"]),
    entry("metric-success", "Success Rate", "/dashboard#kpi-success", SearchCategory::Metric, &["performance", "quality"]),
    entry("metric-failed", "Failed Volume", "/dashboard#kpi-failed", SearchCategory::Metric, &["errors", "declined", "lost"]),
    entry("chart-rev", "Revenue Trends", "/dashboard#chart-revenue", SearchCategory::Chart, &["graph", "history"]),
    entry("chart-status", "Status Breakdown", "/dashboard#chart-status", SearchCategory::Chart, &["success", "pending", "failed", "split"]),
    entry("chart-payment", "Payment Distribution", "/dashboard#chart-payment", SearchCategory::Chart, &["methods", "cards", "wallet"]),
    entry("chart-hourly", "Hourly Traffic", "/dashboard#chart-hourly", SearchCategory::Chart, &["time", "peak", "activity"]),
    // Transactions
    entry("feat-filter", "Transaction Filters", "/transactions#filters-panel", SearchCategory::Feature, &["search", "refine", "sort", "status"]),
    entry("feat-export", "Export Data", "/transactions#export-btn", SearchCategory::Feature, &["download", "csv", "json"]),
    // Analytics
    entry("feat-date", "Date Range Picker", "/analytics#date-picker", SearchCategory::Feature, &["time", "calendar", "period"]),
    entry("chart-rev-ana", "Revenue Analysis", "/analytics#chart-revenue-analytics", SearchCategory::Chart, &["growth", "trends"]),
    entry("chart-pay-ana", "Payment Method Analysis", "/analytics#chart-payment-analytics", SearchCategory::Chart, &["distribution", "usage"]),
    entry("chart-daily-ana", "Daily Traffic", "/analytics#chart-daily-analytics", SearchCategory::Chart, &["volume", "count"]),
    entry("chart-hourly-ana", "Hourly Peak Traffic", "/analytics#chart-hourly-analytics", SearchCategory::Chart, &["peak", "load", "issues"]),
];

/// Searches the built-in index.
pub fn search(query: &str) -> Vec<&'static SearchEntry> {
    search_in(&SEARCH_INDEX, query)
}

/// Empty query: the first [`DEFAULT_VIEW_LEN`] entries. Otherwise entries whose
/// title contains the query case-insensitively, or whose keywords contain the
/// lowercased query as stored, in declaration order, at most [`MAX_RESULTS`].
///
/// Keywords are compared without lowercasing them. The built-in keywords are
/// all lowercase so this only matters for custom indexes.
pub fn search_in<'a>(entries: &'a [SearchEntry], query: &str) -> Vec<&'a SearchEntry> {
    if query.is_empty() {
        return entries.iter().take(DEFAULT_VIEW_LEN).collect();
    }
    let needle = query.to_lowercase();
    entries
        .iter()
        .filter(|e| {
            e.title.to_lowercase().contains(&needle)
                || e.keywords.iter().any(|k| k.contains(&needle))
        })
        .take(MAX_RESULTS)
        .collect()
}

/// Route and optional in-page anchor of a search result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationTarget<'a> {
    pub path: &'a str,
    pub fragment: Option<&'a str>,
}

/// Splits `path` on its first `#`. An empty fragment counts as none.
pub fn split_path(path: &str) -> NavigationTarget<'_> {
    match path.split_once('#') {
        Some((route, fragment)) if !fragment.is_empty() => NavigationTarget {
            path: route,
            fragment: Some(fragment),
        },
        Some((route, _)) => NavigationTarget {
            path: route,
            fragment: None,
        },
        None => NavigationTarget {
            path,
            fragment: None,
        },
    }
}

/// Keyboard-driven palette over [`SEARCH_INDEX`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPalette {
    open: bool,
    query: String,
    results: Vec<&'static SearchEntry>,
    selected: usize,
}

impl Default for SearchPalette {
    fn default() -> Self {
        Self {
            open: false,
            query: String::new(),
            results: search(""),
            selected: 0,
        }
    }
}

impl SearchPalette {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[&'static SearchEntry] {
        &self.results
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_entry(&self) -> Option<&'static SearchEntry> {
        self.results.get(self.selected).copied()
    }

    /// Opening starts from an empty query and the default view.
    pub fn open(&mut self) {
        if self.open {
            return;
        }
        self.open = true;
        self.query.clear();
        self.results = search("");
        self.selected = 0;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Ctrl+K / Cmd+K.
    pub fn toggle(&mut self) {
        if self.open {
            self.close();
        } else {
            self.open();
        }
    }

    /// Typing also opens the palette.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.open = true;
        self.results = search(&self.query);
        self.selected = 0;
    }

    pub fn select_next(&mut self) {
        if !self.results.is_empty() {
            self.selected = (self.selected + 1) % self.results.len();
        }
    }

    pub fn select_previous(&mut self) {
        if !self.results.is_empty() {
            let len = self.results.len();
            self.selected = (self.selected + len - 1) % len;
        }
    }

    /// Hover.
    pub fn select(&mut self, index: usize) {
        if index < self.results.len() {
            self.selected = index;
        }
    }

    /// Enter: closes the palette and returns where to go.
    pub fn confirm(&mut self) -> Option<NavigationTarget<'static>> {
        let entry = self.selected_entry()?;
        self.choose(entry)
    }

    /// Click on a result row.
    pub fn choose(&mut self, entry: &'static SearchEntry) -> Option<NavigationTarget<'static>> {
        debug!(id = entry.id, path = entry.path, "Search result selected");
        self.close();
        Some(entry.target())
    }
}
