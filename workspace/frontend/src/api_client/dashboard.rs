use state::{DashboardData, DateRange, FetchError, StatsScope, fetch_dashboard};

use super::BrowserApi;

/// Overview page: all-time KPIs plus the series of the applied range
pub async fn get_overview(range: DateRange) -> Result<DashboardData, FetchError> {
    log::trace!("Fetching overview for {}", range);
    let result = fetch_dashboard(&BrowserApi, range, StatsScope::AllTime).await;
    match &result {
        Ok(data) => log::info!("Fetched overview: {} days of data", data.daily.len()),
        Err(e) => log::error!("Failed to fetch overview: {}", e),
    }
    result
}

/// Analytics page: every figure restricted to the applied range
pub async fn get_analytics(range: DateRange) -> Result<DashboardData, FetchError> {
    log::trace!("Fetching analytics for {}", range);
    let result = fetch_dashboard(&BrowserApi, range, StatsScope::Range).await;
    match &result {
        Ok(data) => log::info!(
            "Fetched analytics: {} days, {} payment methods",
            data.daily.len(),
            data.payment_methods.len()
        ),
        Err(e) => log::error!("Failed to fetch analytics: {}", e),
    }
    result
}
