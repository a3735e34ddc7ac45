use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::PaymentMethod;

/// KPI block returned by `/dashboard/stats` and `/dashboard/stats/filtered`.
///
/// Every figure is nullable on the wire; an empty range yields nulls rather
/// than zeros for the amount fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[serde(default)]
    pub total_gtv: Option<Decimal>,
    #[serde(default)]
    pub new_users_today: Option<i64>,
    /// Percentage of SUCCESS transactions, 0..=100.
    #[serde(default)]
    pub success_rate: Option<f64>,
    #[serde(default)]
    pub total_failed_volume: Option<Decimal>,
    #[serde(default)]
    pub total_users: Option<i64>,
    #[serde(default)]
    pub total_txns: Option<i64>,
    #[serde(default)]
    pub average_ticket_size: Option<Decimal>,
    #[serde(default)]
    pub pending_trxns: Option<i64>,
}

/// One day of the `/dashboard/analytics/daily` series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailyStat {
    pub date: NaiveDate,
    #[serde(default)]
    pub txn_count: i64,
    #[serde(default)]
    pub total_amount: Decimal,
    #[serde(default)]
    pub success_count: i64,
    #[serde(default)]
    pub pending_count: i64,
    #[serde(default)]
    pub failed_count: i64,
}

/// Transaction count per payment method.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodStat {
    #[serde(alias = "method")]
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub count: i64,
}

/// One hour-of-day bucket (0..=23) of `/dashboard/analytics/hourly-traffic`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HourlyStat {
    pub hour: u8,
    #[serde(default)]
    pub txn_count: i64,
    #[serde(default)]
    pub success_count: i64,
    #[serde(default)]
    pub pending_count: i64,
    #[serde(default)]
    pub failed_count: i64,
}

impl HourlyStat {
    /// Total for the bucket; falls back to the status sum when the backend
    /// omits `txnCount`.
    pub fn total(&self) -> i64 {
        if self.txn_count > 0 {
            self.txn_count
        } else {
            self.success_count + self.pending_count + self.failed_count
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_with_nulls() {
        let json = r#"{"totalGtv": null, "successRate": 92.5, "totalTxns": 120}"#;
        let stats: DashboardStats = serde_json::from_str(json).unwrap();
        assert_eq!(stats.total_gtv, None);
        assert_eq!(stats.success_rate, Some(92.5));
        assert_eq!(stats.total_txns, Some(120));
        assert_eq!(stats.pending_trxns, None);
    }

    #[test]
    fn test_payment_stat_accepts_legacy_key() {
        let legacy: PaymentMethodStat =
            serde_json::from_str(r#"{"method": "WALLET", "count": 4}"#).unwrap();
        let current: PaymentMethodStat =
            serde_json::from_str(r#"{"paymentMethod": "WALLET", "count": 4}"#).unwrap();
        assert_eq!(legacy, current);
    }

    #[test]
    fn test_hourly_total_falls_back_to_status_sum() {
        let stat: HourlyStat = serde_json::from_str(
            r#"{"hour": 9, "successCount": 5, "pendingCount": 1, "failedCount": 2}"#,
        )
        .unwrap();
        assert_eq!(stat.total(), 8);
    }

    #[test]
    fn test_daily_stat_without_status_counts() {
        let stat: DailyStat = serde_json::from_str(
            r#"{"date": "2024-03-01", "totalAmount": 1500.25, "txnCount": 12}"#,
        )
        .unwrap();
        assert_eq!(stat.date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(stat.success_count, 0);
        assert_eq!(stat.txn_count, 12);
    }
}
