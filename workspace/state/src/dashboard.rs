//! REST paths of the analytics backend and the fetch group behind the
//! dashboard and analytics pages.

use std::future::Future;

use common::{
    DailyStat, DashboardStats, HourlyStat, PaginatedResult, PaymentMethodStat,
    TransactionListItem,
};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::codec::encode_range;
use crate::date_range::DateRange;
use crate::error::{ExportError, FetchError};
use crate::export::{ExportDataset, ExportSection};
use crate::list_query::ListQuery;

pub const STATS_PATH: &str = "/dashboard/stats";
pub const FILTERED_STATS_PATH: &str = "/dashboard/stats/filtered";
pub const DAILY_PATH: &str = "/dashboard/analytics/daily";
pub const PAYMENT_METHODS_PATH: &str = "/dashboard/analytics/payment-methods";
pub const HOURLY_TRAFFIC_PATH: &str = "/dashboard/analytics/hourly-traffic";
pub const TRANSACTIONS_PATH: &str = "/transactions";

/// Which KPI endpoint a fetch group uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatsScope {
    /// All-time figures from `/dashboard/stats` (overview page).
    AllTime,
    /// `/dashboard/stats/filtered` for the applied range (analytics page).
    Range,
}

/// `None` selects the unfiltered endpoint.
pub fn stats_path(range: Option<&DateRange>) -> String {
    match range {
        Some(range) => encode_range(Some(range)).append_to(FILTERED_STATS_PATH),
        None => STATS_PATH.to_string(),
    }
}

pub fn daily_path(range: &DateRange) -> String {
    encode_range(Some(range)).append_to(DAILY_PATH)
}

pub fn payment_methods_path(range: &DateRange) -> String {
    encode_range(Some(range)).append_to(PAYMENT_METHODS_PATH)
}

pub fn hourly_traffic_path(range: &DateRange) -> String {
    encode_range(Some(range)).append_to(HOURLY_TRAFFIC_PATH)
}

pub fn transactions_path(query: &ListQuery) -> String {
    query.params().append_to(TRANSACTIONS_PATH)
}

/// Anything that can GET a JSON document relative to the API base URL.
pub trait ApiSource {
    fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> impl Future<Output = Result<T, FetchError>>;
}

/// Result of one dashboard fetch group.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardData {
    pub stats: DashboardStats,
    pub daily: Vec<DailyStat>,
    pub payment_methods: Vec<PaymentMethodStat>,
    pub hourly: Vec<HourlyStat>,
}

impl DashboardData {
    /// Sections in the order they appear on the analytics page.
    pub fn export_dataset(&self) -> Result<ExportDataset, ExportError> {
        Ok(ExportDataset::new()
            .with_section(ExportSection::single("stats", "Summary", &self.stats)?)
            .with_section(ExportSection::new("daily", "Daily Trends", &self.daily)?)
            .with_section(ExportSection::new(
                "paymentMethods",
                "Payment Methods",
                &self.payment_methods,
            )?)
            .with_section(ExportSection::new("hourly", "Hourly Traffic", &self.hourly)?))
    }
}

/// Issues the four requests of a dashboard group concurrently. The first
/// failure fails the whole group and partial results are dropped.
#[instrument(skip(source))]
pub async fn fetch_dashboard<S: ApiSource>(
    source: &S,
    range: DateRange,
    scope: StatsScope,
) -> Result<DashboardData, FetchError> {
    let stats_range = match scope {
        StatsScope::AllTime => None,
        StatsScope::Range => Some(&range),
    };
    let stats_path = stats_path(stats_range);
    let daily_path = daily_path(&range);
    let payment_path = payment_methods_path(&range);
    let hourly_path = hourly_traffic_path(&range);

    let (stats, daily, payment_methods, hourly) = futures::try_join!(
        source.get_json::<DashboardStats>(&stats_path),
        source.get_json::<Vec<DailyStat>>(&daily_path),
        source.get_json::<Vec<PaymentMethodStat>>(&payment_path),
        source.get_json::<Vec<HourlyStat>>(&hourly_path),
    )?;

    debug!(
        days = daily.len(),
        methods = payment_methods.len(),
        hours = hourly.len(),
        "Dashboard data loaded"
    );
    Ok(DashboardData {
        stats,
        daily,
        payment_methods,
        hourly,
    })
}

pub async fn fetch_transactions<S: ApiSource>(
    source: &S,
    query: &ListQuery,
) -> Result<PaginatedResult<TransactionListItem>, FetchError> {
    source.get_json(&transactions_path(query)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::cell::RefCell;

    use crate::filter::{FilterChange, TransactionFilter};
    use crate::pagination::PageRequest;
    use common::TxnStatus;

    /// Serves canned JSON per path prefix and records every request.
    #[derive(Default)]
    struct StubSource {
        requests: RefCell<Vec<String>>,
        failing_prefix: Option<&'static str>,
    }

    impl ApiSource for StubSource {
        async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
            self.requests.borrow_mut().push(path.to_string());
            if self.failing_prefix.is_some_and(|p| path.starts_with(p)) {
                return Err(FetchError::status(path, 503));
            }
            let body = if path.starts_with("/dashboard/stats") {
                serde_json::json!({"totalGtv": 5000.0, "totalTxns": 12, "successRate": 75.0})
            } else if path.starts_with(DAILY_PATH) {
                serde_json::json!([{"date": "2024-05-01", "txnCount": 12, "totalAmount": 5000.0,
                    "successCount": 9, "pendingCount": 1, "failedCount": 2}])
            } else if path.starts_with(PAYMENT_METHODS_PATH) {
                serde_json::json!([{"paymentMethod": "UPI", "count": 8}, {"method": "CARD", "count": 4}])
            } else if path.starts_with(HOURLY_TRAFFIC_PATH) {
                serde_json::json!([{"hour": 10, "txnCount": 12, "successCount": 9,
                    "pendingCount": 1, "failedCount": 2}])
            } else {
                serde_json::json!({"content": [], "totalPages": 0, "totalElements": 0})
            };
            serde_json::from_value(body).map_err(|e| FetchError::decode(path, e))
        }
    }

    fn range() -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2024, 4, 24).unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        )
    }

    #[test]
    fn test_paths() {
        assert_eq!(stats_path(None), "/dashboard/stats");
        assert_eq!(
            stats_path(Some(&range())),
            "/dashboard/stats/filtered?startDate=2024-04-24&endDate=2024-05-01"
        );
        assert_eq!(
            hourly_traffic_path(&range()),
            "/dashboard/analytics/hourly-traffic?startDate=2024-04-24&endDate=2024-05-01"
        );

        let mut filter = TransactionFilter::default();
        filter.apply(FilterChange::Status(Some(TxnStatus::Pending)));
        let query = ListQuery {
            filter,
            page: PageRequest::new(2, 10),
        };
        assert_eq!(transactions_path(&query), "/transactions?page=2&size=10&status=PENDING");
    }

    #[tokio::test]
    async fn test_fetch_dashboard_issues_four_requests() {
        let source = StubSource::default();
        let data = fetch_dashboard(&source, range(), StatsScope::Range).await.unwrap();

        assert_eq!(data.stats.total_txns, Some(12));
        assert_eq!(data.daily.len(), 1);
        assert_eq!(data.payment_methods.len(), 2);
        assert_eq!(data.hourly[0].hour, 10);

        let requests = source.requests.borrow();
        assert_eq!(requests.len(), 4);
        assert!(requests[0].starts_with(FILTERED_STATS_PATH));
    }

    #[tokio::test]
    async fn test_all_time_scope_uses_unfiltered_stats() {
        let source = StubSource::default();
        fetch_dashboard(&source, range(), StatsScope::AllTime).await.unwrap();
        assert_eq!(source.requests.borrow()[0], "/dashboard/stats");
    }

    #[tokio::test]
    async fn test_one_failure_fails_the_group() {
        let source = StubSource {
            failing_prefix: Some(PAYMENT_METHODS_PATH),
            ..Default::default()
        };
        let err = fetch_dashboard(&source, range(), StatsScope::Range)
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 503, .. }));
        assert!(err.endpoint().starts_with(PAYMENT_METHODS_PATH));
    }

    #[test]
    fn test_export_dataset_sections() {
        let dataset = DashboardData::default().export_dataset().unwrap();
        let names: Vec<&str> = dataset.sections.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["stats", "daily", "paymentMethods", "hourly"]);
    }
}
