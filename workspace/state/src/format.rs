//! Display helpers shared by the KPI cards, legends and the transaction table.

use common::{PaymentMethod, PaymentMethodStat};
use rust_decimal::prelude::*;

const CRORE: i64 = 10_000_000;
const LAKH: i64 = 100_000;
const THOUSAND: i64 = 1_000;

fn fixed(value: Decimal, dp: u32) -> String {
    let rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.*}", dp as usize, rounded)
}

/// Compact rupee amount for KPI cards: `₹1.25Cr`, `₹3.40L`, `₹12.5K`, `₹950`.
pub fn format_compact_inr(value: Option<Decimal>) -> String {
    let Some(value) = value else {
        return "₹0".to_string();
    };
    if value >= Decimal::from(CRORE) {
        format!("₹{}Cr", fixed(value / Decimal::from(CRORE), 2))
    } else if value >= Decimal::from(LAKH) {
        format!("₹{}L", fixed(value / Decimal::from(LAKH), 2))
    } else if value >= Decimal::from(THOUSAND) {
        format!("₹{}K", fixed(value / Decimal::from(THOUSAND), 1))
    } else {
        format!("₹{}", fixed(value, 0))
    }
}

/// Indian digit grouping: the last three digits, then pairs (`12,34,567`).
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

pub fn format_count(n: i64) -> String {
    let grouped = group_indian(&n.unsigned_abs().to_string());
    if n < 0 { format!("-{}", grouped) } else { grouped }
}

/// Full amount with paise for the transaction table: `₹1,23,456.50`.
pub fn format_inr(value: Decimal) -> String {
    let text = fixed(value.abs(), 2);
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    let sign = if value.is_sign_negative() && !value.is_zero() { "-" } else { "" };
    format!("{}₹{}.{}", sign, group_indian(whole), fraction)
}

/// `98.4%`; missing rates render as `0.0%`.
pub fn format_percent(value: Option<f64>) -> String {
    format!("{:.1}%", value.unwrap_or(0.0))
}

/// `NET_BANKING` -> `NET BANKING`.
pub fn display_label(wire: &str) -> String {
    wire.replace('_', " ")
}

/// `#` followed by the id left-padded with zeros to six characters.
pub fn short_txn_id(id: &str) -> String {
    format!("#{:0>6}", id)
}

/// One legend row of the payment-method donut.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentShare {
    pub method: PaymentMethod,
    pub count: i64,
    /// Share of the total count in percent, rounded to one decimal.
    pub percent: f64,
}

impl PaymentShare {
    pub fn from_stats(stats: &[PaymentMethodStat]) -> Vec<PaymentShare> {
        let total: i64 = stats.iter().map(|s| s.count).sum();
        stats
            .iter()
            .map(|s| PaymentShare {
                method: s.payment_method,
                count: s.count,
                percent: if total == 0 {
                    0.0
                } else {
                    (s.count as f64 * 1000.0 / total as f64).round() / 10.0
                },
            })
            .collect()
    }

    pub fn label(&self) -> String {
        display_label(self.method.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_format_compact_inr_thresholds() {
        assert_eq!(format_compact_inr(None), "₹0");
        assert_eq!(format_compact_inr(Some(dec("950.4"))), "₹950");
        assert_eq!(format_compact_inr(Some(dec("999.5"))), "₹1000");
        assert_eq!(format_compact_inr(Some(dec("12500"))), "₹12.5K");
        assert_eq!(format_compact_inr(Some(dec("340000"))), "₹3.40L");
        assert_eq!(format_compact_inr(Some(dec("12500000"))), "₹1.25Cr");
    }

    #[test]
    fn test_format_count_indian_grouping() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(123456), "1,23,456");
        assert_eq!(format_count(1234567), "12,34,567");
        assert_eq!(format_count(-45000), "-45,000");
    }

    #[test]
    fn test_format_inr() {
        assert_eq!(format_inr(dec("123456.5")), "₹1,23,456.50");
        assert_eq!(format_inr(dec("42")), "₹42.00");
        assert_eq!(format_inr(dec("-1500.255")), "-₹1,500.26");
    }

    #[test]
    fn test_labels_and_ids() {
        assert_eq!(display_label("NET_BANKING"), "NET BANKING");
        assert_eq!(short_txn_id("42"), "#000042");
        assert_eq!(short_txn_id("1234567"), "#1234567");
        assert_eq!(format_percent(Some(98.44)), "98.4%");
        assert_eq!(format_percent(None), "0.0%");
    }

    #[test]
    fn test_payment_shares() {
        let stats = vec![
            PaymentMethodStat { payment_method: PaymentMethod::Upi, count: 2 },
            PaymentMethodStat { payment_method: PaymentMethod::Card, count: 1 },
        ];
        let shares = PaymentShare::from_stats(&stats);
        assert_eq!(shares[0].percent, 66.7);
        assert_eq!(shares[1].percent, 33.3);
        assert_eq!(shares[0].label(), "UPI");
    }

    #[test]
    fn test_payment_shares_with_zero_total() {
        let stats = vec![PaymentMethodStat { payment_method: PaymentMethod::Wallet, count: 0 }];
        assert_eq!(PaymentShare::from_stats(&stats)[0].percent, 0.0);
        assert!(PaymentShare::from_stats(&[]).is_empty());
    }
}
