//! Client-side query state for the payments analytics dashboard.
//!
//! Nothing in this crate performs I/O. Callers (the browser app and the CLI)
//! feed user intents in, receive [`orchestrator::Ticket`]s describing the
//! requests to issue, and hand the responses back so stale ones can be
//! discarded.

pub mod codec;
pub mod dashboard;
pub mod date_range;
pub mod error;
pub mod export;
pub mod fetch_state;
pub mod filter;
pub mod format;
pub mod list_query;
pub mod orchestrator;
pub mod pagination;
pub mod search;

pub use codec::{QueryParams, encode, encode_range};
pub use dashboard::{ApiSource, DashboardData, StatsScope, fetch_dashboard, fetch_transactions};
pub use date_range::{DateRange, DateRangeStore};
pub use error::{ExportError, FetchError, FilterParseError};
pub use export::{ExportDataset, ExportFormat, ExportMenu, ExportMeta, ExportSection};
pub use format::PaymentShare;
pub use fetch_state::FetchState;
pub use filter::{FilterChange, FilterKey, TransactionFilter};
pub use list_query::{ListQuery, ListQueryController};
pub use orchestrator::{FetchOrchestrator, Generation, Ticket};
pub use pagination::{PageRequest, PageSummary};
pub use search::{NavigationTarget, SearchCategory, SearchEntry, SearchPalette, search};
