//! Common transport-layer types shared between the browser frontend and the CLI.
//! These structs mirror the analytics backend's response payloads so both
//! clients can deserialize API responses without duplicating shapes.

mod analytics;
mod enums;

pub use analytics::{DailyStat, DashboardStats, HourlyStat, PaymentMethodStat};
pub use enums::{ParseEnumError, PaymentMethod, TxnStatus, TxnType};

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

// ===================== Pagination =====================

/// One page of a paginated listing. Unknown page metadata sent by the backend
/// (sort, pageable, ...) is ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResult<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_elements: u64,
}

impl<T> Default for PaginatedResult<T> {
    fn default() -> Self {
        Self {
            content: Vec::new(),
            total_pages: 0,
            total_elements: 0,
        }
    }
}

// ===================== Transactions =====================

/// Row of the transaction data grid (mirrors backend TransactionListItemDTO).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionListItem {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub user_email: Option<String>,
    #[serde(default, alias = "userName")]
    pub user_full_name: Option<String>,
    pub amount: Decimal,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default, rename = "type")]
    pub txn_type: Option<TxnType>,
    pub status: TxnStatus,
    pub payment_method: PaymentMethod,
    pub created_at: NaiveDateTime,
}

/// Ids are UUIDs in the current backend but were plain numbers in older builds.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Number(number) => number.to_string(),
    })
}
