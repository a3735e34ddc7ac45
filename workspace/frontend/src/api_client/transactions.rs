use common::{PaginatedResult, TransactionListItem};
use state::{FetchError, ListQuery, fetch_transactions};

use super::BrowserApi;

/// Get one page of transactions for the given filter and page
pub async fn get_transactions(
    query: &ListQuery,
) -> Result<PaginatedResult<TransactionListItem>, FetchError> {
    log::trace!("Fetching transactions: {}", query);
    let result = fetch_transactions(&BrowserApi, query).await;
    match &result {
        Ok(page) => log::info!(
            "Fetched {} transactions ({} total)",
            page.content.len(),
            page.total_elements
        ),
        Err(e) => log::error!("Failed to fetch transactions: {}", e),
    }
    result
}
