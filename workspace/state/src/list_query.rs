//! Filter + pagination controller for one paginated listing endpoint.

use std::fmt;

use common::PaginatedResult;
use tracing::{debug, info};

use crate::codec::{self, QueryParams};
use crate::error::FetchError;
use crate::fetch_state::FetchState;
use crate::filter::{FilterChange, TransactionFilter};
use crate::orchestrator::{FetchOrchestrator, Ticket};
use crate::pagination::{PageRequest, PageSummary, clamp_index};

/// Trigger key of a listing fetch: everything that ends up in the query string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListQuery {
    pub filter: TransactionFilter,
    pub page: PageRequest,
}

impl ListQuery {
    pub fn params(&self) -> QueryParams {
        codec::encode(&self.filter, self.page)
    }
}

/// Owns the filter, the page and the fetch state of a listing.
///
/// Every operation returns the [`Ticket`] of the fetch it triggers. Filter
/// edits always go back to the first page, and each new ticket supersedes
/// whatever listing fetch is still in flight.
#[derive(Debug, Clone)]
pub struct ListQueryController<T> {
    filter: TransactionFilter,
    page: PageRequest,
    total_pages: Option<u32>,
    total_elements: Option<u64>,
    fetch: FetchOrchestrator<ListQuery, PaginatedResult<T>>,
}

impl<T> ListQueryController<T> {
    pub fn new(page_size: u32) -> Self {
        Self {
            filter: TransactionFilter::default(),
            page: PageRequest::first(page_size),
            total_pages: None,
            total_elements: None,
            fetch: FetchOrchestrator::new(),
        }
    }

    pub fn filter(&self) -> &TransactionFilter {
        &self.filter
    }

    pub fn page(&self) -> PageRequest {
        self.page
    }

    pub fn total_pages(&self) -> Option<u32> {
        self.total_pages
    }

    pub fn total_elements(&self) -> Option<u64> {
        self.total_elements
    }

    pub fn state(&self) -> &FetchState<PaginatedResult<T>> {
        self.fetch.state()
    }

    pub fn query(&self) -> ListQuery {
        ListQuery {
            filter: self.filter.clone(),
            page: self.page,
        }
    }

    pub fn params(&self) -> QueryParams {
        self.query().params()
    }

    pub fn has_active_filters(&self) -> bool {
        self.filter.has_active()
    }

    /// "Showing X to Y of Z" once a total is known.
    pub fn summary(&self) -> Option<PageSummary> {
        self.total_elements
            .map(|total| PageSummary::new(self.page, total))
    }

    pub fn has_previous_page(&self) -> bool {
        self.page.index > 0
    }

    pub fn has_next_page(&self) -> bool {
        self.total_pages
            .is_some_and(|total| self.page.index + 1 < total)
    }

    /// Initial fetch; `None` if the current query was already requested.
    pub fn start(&mut self) -> Option<Ticket<ListQuery>> {
        self.fetch.trigger(self.query())
    }

    pub fn set_filter(&mut self, change: FilterChange) -> Ticket<ListQuery> {
        debug!(key = ?change.key(), "Filter changed");
        self.filter.apply(change);
        self.reset_paging();
        self.fetch.restart(self.query())
    }

    pub fn clear_filters(&mut self) -> Ticket<ListQuery> {
        info!("Clearing all transaction filters");
        self.filter = TransactionFilter::default();
        self.reset_paging();
        self.fetch.restart(self.query())
    }

    /// Moves to `index`, clamped to the known page count. Filters are kept.
    pub fn set_page(&mut self, index: u32) -> Ticket<ListQuery> {
        let clamped = clamp_index(index, self.total_pages);
        if clamped != index {
            debug!(requested = index, clamped, "Page index clamped");
        }
        self.page = self.page.with_index(clamped);
        self.fetch.restart(self.query())
    }

    pub fn next_page(&mut self) -> Ticket<ListQuery> {
        self.set_page(self.page.index.saturating_add(1))
    }

    pub fn previous_page(&mut self) -> Ticket<ListQuery> {
        self.set_page(self.page.index.saturating_sub(1))
    }

    /// Re-issues the current query, e.g. after a failure.
    pub fn refresh(&mut self) -> Ticket<ListQuery> {
        self.fetch.restart(self.query())
    }

    /// Applies a listing response. Stale tickets are ignored and return `false`.
    pub fn resolve(
        &mut self,
        ticket: Ticket<ListQuery>,
        outcome: Result<PaginatedResult<T>, FetchError>,
    ) -> bool {
        let totals = outcome
            .as_ref()
            .ok()
            .map(|page| (page.total_pages, page.total_elements));
        if !self.fetch.resolve(ticket, outcome) {
            return false;
        }
        if let Some((pages, elements)) = totals {
            self.total_pages = Some(pages);
            self.total_elements = Some(elements);
        }
        true
    }

    // Totals belong to the previous filter; they are unknown until the next response.
    fn reset_paging(&mut self) {
        self.page = self.page.with_index(0);
        self.total_pages = None;
        self.total_elements = None;
    }
}

impl fmt::Display for ListQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.params().to_query_string())
    }
}
