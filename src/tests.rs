#[cfg(test)]
mod integration_tests {
    use std::time::Duration;

    use chrono::NaiveDate;
    use common::{DashboardStats, TxnStatus};
    use serde_json::Value;
    use state::export::ExportFormat;
    use state::{DateRange, FetchError, FetchState, FilterChange, StatsScope, dashboard};

    use crate::api::ApiClient;
    use crate::cli::commands::export::build_export;
    use crate::cli::commands::transactions::load_page;
    use crate::test_utils::test_utils::{
        TOTAL_TRANSACTIONS, spawn_failing_backend, spawn_stub_backend, unreachable_base_url,
    };

    fn range() -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2024, 4, 25).unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_get_all_time_stats() {
        let backend = spawn_stub_backend().await;
        let client = backend.client();

        let stats: DashboardStats = client.get(&dashboard::stats_path(None)).await.unwrap();

        assert_eq!(stats.total_txns, Some(10));
        assert_eq!(stats.pending_trxns, None);
        assert_eq!(backend.requests(), vec!["/api/dashboard/stats"]);
    }

    #[tokio::test]
    async fn test_filtered_stats_send_date_range() {
        let backend = spawn_stub_backend().await;
        let client = backend.client();

        let _: DashboardStats = client
            .get(&dashboard::stats_path(Some(&range())))
            .await
            .unwrap();

        assert_eq!(
            backend.requests(),
            vec!["/api/dashboard/stats/filtered?startDate=2024-04-25&endDate=2024-05-02"]
        );
    }

    #[tokio::test]
    async fn test_second_page_of_failed_transactions() {
        let backend = spawn_stub_backend().await;
        let client = backend.client();

        let controller = load_page(
            &client,
            10,
            vec![FilterChange::Status(Some(TxnStatus::Failed))],
            1,
        )
        .await
        .unwrap();

        let requests = backend.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0], "/api/transactions?page=0&size=10&status=FAILED");
        assert_eq!(requests[1], "/api/transactions?page=1&size=10&status=FAILED");

        let page = controller.state().data().unwrap();
        assert_eq!(page.content.len(), 10);
        assert_eq!(page.content[0].id, "11");
        assert!(page.content.iter().all(|t| t.status == TxnStatus::Failed));
        assert_eq!(
            controller.summary().unwrap().to_string(),
            "Showing 11 to 20 of 25"
        );
    }

    #[tokio::test]
    async fn test_page_past_the_end_is_clamped() {
        let backend = spawn_stub_backend().await;
        let client = backend.client();

        let controller = load_page(&client, 10, Vec::new(), 9).await.unwrap();

        assert_eq!(
            backend.requests().last().unwrap(),
            "/api/transactions?page=2&size=10"
        );
        assert_eq!(controller.page().index, 2);
        assert_eq!(controller.total_elements(), Some(TOTAL_TRANSACTIONS));
        assert_eq!(
            controller.summary().unwrap().to_string(),
            "Showing 21 to 25 of 25"
        );
    }

    #[tokio::test]
    async fn test_json_export_contains_meta_and_all_sections() {
        let backend = spawn_stub_backend().await;
        let client = backend.client();

        let document = build_export(&client, ExportFormat::Json, range()).await.unwrap();
        let doc: Value = serde_json::from_str(&document).unwrap();

        assert_eq!(doc["meta"]["dateRange"]["start"], "2024-04-25");
        assert_eq!(doc["meta"]["dateRange"]["end"], "2024-05-02");
        assert_eq!(doc["stats"]["totalTxns"], 10);
        assert_eq!(doc["daily"].as_array().unwrap().len(), 2);
        assert_eq!(doc["paymentMethods"][0]["paymentMethod"], "UPI");
        assert_eq!(doc["hourly"][1]["hour"], 18);

        let mut requests = backend.requests();
        requests.sort();
        assert_eq!(
            requests,
            vec![
                "/api/dashboard/analytics/daily?startDate=2024-04-25&endDate=2024-05-02",
                "/api/dashboard/analytics/hourly-traffic?startDate=2024-04-25&endDate=2024-05-02",
                "/api/dashboard/analytics/payment-methods?startDate=2024-04-25&endDate=2024-05-02",
                "/api/dashboard/stats/filtered?startDate=2024-04-25&endDate=2024-05-02",
            ]
        );
    }

    #[tokio::test]
    async fn test_csv_export_has_titled_sections() {
        let backend = spawn_stub_backend().await;
        let client = backend.client();

        let document = build_export(&client, ExportFormat::Csv, range()).await.unwrap();
        let lines: Vec<&str> = document.lines().collect();

        assert_eq!(lines[0], "Summary");
        assert!(lines.contains(&"Daily Trends"));
        assert!(lines.contains(&"paymentMethod,count"));
        assert!(lines.contains(&"UPI,7"));
        assert!(lines.contains(&""));
    }

    #[tokio::test]
    async fn test_one_failed_request_fails_the_export() {
        let backend = spawn_failing_backend("/dashboard/analytics/payment-methods").await;
        let client = backend.client();

        let err = build_export(&client, ExportFormat::Json, range())
            .await
            .unwrap_err();
        let fetch_err = err.downcast_ref::<FetchError>().unwrap();

        assert!(matches!(fetch_err, FetchError::Status { status: 500, .. }));
        assert!(fetch_err.endpoint().starts_with("/dashboard/analytics/payment-methods"));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_a_request_error() {
        let client = ApiClient::new(unreachable_base_url().await, Duration::from_secs(2)).unwrap();

        let outcome = state::fetch_dashboard(&client, range(), StatsScope::AllTime).await;

        assert!(matches!(outcome, Err(FetchError::Request { .. })));
    }

    #[tokio::test]
    async fn test_failed_listing_surfaces_as_failed_state() {
        let backend = spawn_failing_backend("/transactions").await;
        let client = backend.client();

        let controller = load_page(&client, 10, Vec::new(), 3).await.unwrap();

        assert!(matches!(controller.state(), FetchState::Failed(_)));
        // No page count yet, so no second request
        assert_eq!(backend.requests().len(), 1);
        assert!(controller.summary().is_none());
    }
}
