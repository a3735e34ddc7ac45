use chrono::NaiveDate;
use common::{PaymentMethod, TxnStatus, TxnType};

use crate::error::FilterParseError;

/// Filters accepted by the transaction listing endpoint.
///
/// Unset fields are `None` (or an empty email) and are never sent; the API
/// treats an omitted filter as "match all".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TransactionFilter {
    pub status: Option<TxnStatus>,
    pub payment_method: Option<PaymentMethod>,
    pub txn_type: Option<TxnType>,
    /// Substring of the user's email; empty means unset.
    pub user_email: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKey {
    Status,
    PaymentMethod,
    Type,
    UserEmail,
    StartDate,
    EndDate,
}

impl FilterKey {
    /// Transport order of the filter parameters.
    pub const ALL: [FilterKey; 6] = [
        FilterKey::Status,
        FilterKey::PaymentMethod,
        FilterKey::Type,
        FilterKey::UserEmail,
        FilterKey::StartDate,
        FilterKey::EndDate,
    ];

    pub fn param_name(&self) -> &'static str {
        match self {
            FilterKey::Status => "status",
            FilterKey::PaymentMethod => "paymentMethod",
            FilterKey::Type => "type",
            FilterKey::UserEmail => "userEmail",
            FilterKey::StartDate => "startDate",
            FilterKey::EndDate => "endDate",
        }
    }
}

/// A single-field edit of a [`TransactionFilter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterChange {
    Status(Option<TxnStatus>),
    PaymentMethod(Option<PaymentMethod>),
    Type(Option<TxnType>),
    UserEmail(String),
    StartDate(Option<NaiveDate>),
    EndDate(Option<NaiveDate>),
}

impl FilterChange {
    pub fn key(&self) -> FilterKey {
        match self {
            FilterChange::Status(_) => FilterKey::Status,
            FilterChange::PaymentMethod(_) => FilterKey::PaymentMethod,
            FilterChange::Type(_) => FilterKey::Type,
            FilterChange::UserEmail(_) => FilterKey::UserEmail,
            FilterChange::StartDate(_) => FilterKey::StartDate,
            FilterChange::EndDate(_) => FilterKey::EndDate,
        }
    }

    /// Builds a change from raw form input. An empty string clears the field.
    pub fn parse(key: FilterKey, raw: &str) -> Result<Self, FilterParseError> {
        let value = raw.trim();
        Ok(match key {
            FilterKey::Status => FilterChange::Status(parse_opt(value)?),
            FilterKey::PaymentMethod => FilterChange::PaymentMethod(parse_opt(value)?),
            FilterKey::Type => FilterChange::Type(parse_opt(value)?),
            // Typed text is sent as entered.
            FilterKey::UserEmail => FilterChange::UserEmail(raw.to_string()),
            FilterKey::StartDate => FilterChange::StartDate(parse_date(value)?),
            FilterKey::EndDate => FilterChange::EndDate(parse_date(value)?),
        })
    }
}

fn parse_opt<T>(value: &str) -> Result<Option<T>, FilterParseError>
where
    T: std::str::FromStr<Err = common::ParseEnumError>,
{
    if value.is_empty() {
        return Ok(None);
    }
    Ok(Some(value.parse()?))
}

fn parse_date(value: &str) -> Result<Option<NaiveDate>, FilterParseError> {
    if value.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| FilterParseError::Date(value.to_string()))
}

impl TransactionFilter {
    pub fn apply(&mut self, change: FilterChange) {
        match change {
            FilterChange::Status(v) => self.status = v,
            FilterChange::PaymentMethod(v) => self.payment_method = v,
            FilterChange::Type(v) => self.txn_type = v,
            FilterChange::UserEmail(v) => self.user_email = v,
            FilterChange::StartDate(v) => self.start_date = v,
            FilterChange::EndDate(v) => self.end_date = v,
        }
    }

    /// Transport value of `key`, or `None` when the field is unset.
    pub fn value(&self, key: FilterKey) -> Option<String> {
        match key {
            FilterKey::Status => self.status.map(|v| v.as_str().to_string()),
            FilterKey::PaymentMethod => self.payment_method.map(|v| v.as_str().to_string()),
            FilterKey::Type => self.txn_type.map(|v| v.as_str().to_string()),
            FilterKey::UserEmail => {
                (!self.user_email.is_empty()).then(|| self.user_email.clone())
            }
            FilterKey::StartDate => self.start_date.map(|d| d.format("%Y-%m-%d").to_string()),
            FilterKey::EndDate => self.end_date.map(|d| d.format("%Y-%m-%d").to_string()),
        }
    }

    /// Set fields in transport order.
    pub fn active(&self) -> Vec<(FilterKey, String)> {
        FilterKey::ALL
            .iter()
            .filter_map(|key| self.value(*key).map(|v| (*key, v)))
            .collect()
    }

    pub fn has_active(&self) -> bool {
        FilterKey::ALL.iter().any(|key| self.value(*key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_clears_field() {
        assert_eq!(
            FilterChange::parse(FilterKey::Status, "").unwrap(),
            FilterChange::Status(None)
        );
        assert_eq!(
            FilterChange::parse(FilterKey::StartDate, "").unwrap(),
            FilterChange::StartDate(None)
        );
    }

    #[test]
    fn test_parse_values() {
        assert_eq!(
            FilterChange::parse(FilterKey::PaymentMethod, "NET_BANKING").unwrap(),
            FilterChange::PaymentMethod(Some(PaymentMethod::NetBanking))
        );
        assert_eq!(
            FilterChange::parse(FilterKey::EndDate, "2024-03-31").unwrap(),
            FilterChange::EndDate(NaiveDate::from_ymd_opt(2024, 3, 31))
        );
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(matches!(
            FilterChange::parse(FilterKey::Status, "DONE"),
            Err(FilterParseError::Enum(_))
        ));
        assert_eq!(
            FilterChange::parse(FilterKey::StartDate, "31/03/2024"),
            Err(FilterParseError::Date("31/03/2024".to_string()))
        );
    }

    #[test]
    fn test_active_lists_only_set_fields() {
        let mut filter = TransactionFilter::default();
        assert!(!filter.has_active());

        filter.apply(FilterChange::UserEmail("asha@".to_string()));
        filter.apply(FilterChange::Status(Some(TxnStatus::Pending)));

        assert!(filter.has_active());
        assert_eq!(
            filter.active(),
            vec![
                (FilterKey::Status, "PENDING".to_string()),
                (FilterKey::UserEmail, "asha@".to_string()),
            ]
        );

        filter.apply(FilterChange::UserEmail(String::new()));
        filter.apply(FilterChange::Status(None));
        assert!(!filter.has_active());
    }
}
