#[cfg(test)]
pub mod test_utils {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use axum::Router;
    use axum::extract::{Query, State};
    use axum::http::{StatusCode, Uri};
    use axum::response::{IntoResponse, Json, Response};
    use serde_json::{Value, json};
    use tokio::net::TcpListener;
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    use crate::api::ApiClient;

    pub const TOTAL_TRANSACTIONS: u64 = 25;

    #[derive(Clone, Default)]
    struct StubState {
        requests: Arc<Mutex<Vec<String>>>,
        failing_path: Option<&'static str>,
    }

    /// In-process stand-in for the analytics REST API, served under `/api`.
    pub struct StubBackend {
        pub base_url: String,
        requests: Arc<Mutex<Vec<String>>>,
        _tracing: tracing::subscriber::DefaultGuard,
    }

    impl StubBackend {
        /// Path and query of every request received so far, in arrival order.
        pub fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }

        pub fn client(&self) -> ApiClient {
            ApiClient::new(self.base_url.clone(), Duration::from_secs(5)).unwrap()
        }
    }

    /// Initialize tracing for tests with output to STDERR.
    ///
    /// The log level is determined by the RUST_LOG environment variable,
    /// defaulting to WARN if not set.
    fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let log_level = std::env::var("RUST_LOG")
            .ok()
            .and_then(|level| level.parse::<Level>().ok())
            .unwrap_or(Level::WARN);

        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub async fn spawn_stub_backend() -> StubBackend {
        spawn_with(StubState::default()).await
    }

    /// Same as [`spawn_stub_backend`] but answers 500 for `path` (without the `/api` prefix).
    pub async fn spawn_failing_backend(path: &'static str) -> StubBackend {
        spawn_with(StubState {
            failing_path: Some(path),
            ..Default::default()
        })
        .await
    }

    async fn spawn_with(state: StubState) -> StubBackend {
        let tracing_guard = init_test_tracing();

        let requests = state.requests.clone();
        let app = Router::new().fallback(handle).with_state(state);
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stub backend");
        let addr = listener.local_addr().expect("Stub backend has no address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Stub backend crashed");
        });

        StubBackend {
            base_url: format!("http://{}/api", addr),
            requests,
            _tracing: tracing_guard,
        }
    }

    /// Base URL of a port nothing listens on.
    pub async fn unreachable_base_url() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{}/api", addr)
    }

    async fn handle(
        State(state): State<StubState>,
        uri: Uri,
        Query(params): Query<HashMap<String, String>>,
    ) -> Response {
        state.requests.lock().unwrap().push(uri.to_string());

        let path = uri.path().trim_start_matches("/api");
        if state.failing_path == Some(path) {
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }

        let body = match path {
            "/dashboard/stats" => stats_body(2_500_000.0),
            "/dashboard/stats/filtered" => stats_body(48_000.0),
            "/dashboard/analytics/daily" => json!([
                {"date": "2024-05-01", "txnCount": 6, "totalAmount": 30000.0,
                 "successCount": 4, "pendingCount": 1, "failedCount": 1},
                {"date": "2024-05-02", "txnCount": 4, "totalAmount": 18000.0,
                 "successCount": 4, "pendingCount": 0, "failedCount": 0}
            ]),
            "/dashboard/analytics/payment-methods" => json!([
                {"paymentMethod": "UPI", "count": 7},
                {"paymentMethod": "CARD", "count": 3}
            ]),
            "/dashboard/analytics/hourly-traffic" => json!([
                {"hour": 9, "txnCount": 4, "successCount": 3, "pendingCount": 0, "failedCount": 1},
                {"hour": 18, "txnCount": 6, "successCount": 5, "pendingCount": 1, "failedCount": 0}
            ]),
            "/transactions" => transactions_body(&params),
            _ => return StatusCode::NOT_FOUND.into_response(),
        };
        Json(body).into_response()
    }

    fn stats_body(gtv: f64) -> Value {
        json!({
            "totalGtv": gtv,
            "newUsersToday": 3,
            "successRate": 80.0,
            "totalFailedVolume": 1200.0,
            "totalUsers": 40,
            "totalTxns": 10,
            "averageTicketSize": 4800.0,
            "pendingTrxns": null
        })
    }

    fn transactions_body(params: &HashMap<String, String>) -> Value {
        let page: u64 = params.get("page").and_then(|p| p.parse().ok()).unwrap_or(0);
        let size: u64 = params.get("size").and_then(|s| s.parse().ok()).unwrap_or(10);
        let status = params.get("status").cloned().unwrap_or_else(|| "SUCCESS".to_string());

        let first = page * size + 1;
        let last = ((page + 1) * size).min(TOTAL_TRANSACTIONS);
        let content: Vec<Value> = (first..=last)
            .map(|n| {
                json!({
                    "id": n,
                    "userName": format!("Customer {}", n),
                    "userEmail": format!("customer{}@example.com", n),
                    "amount": 100.0 * n as f64,
                    "type": "PAYIN",
                    "paymentMethod": "UPI",
                    "status": status,
                    "createdAt": "2024-05-01T10:15:00"
                })
            })
            .collect();

        json!({
            "content": content,
            "totalPages": TOTAL_TRANSACTIONS.div_ceil(size),
            "totalElements": TOTAL_TRANSACTIONS
        })
    }
}
