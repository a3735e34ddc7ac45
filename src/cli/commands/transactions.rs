use anyhow::{Result, bail};
use common::TransactionListItem;
use state::format::{display_label, format_inr, short_txn_id};
use state::{FetchState, FilterChange, ListQueryController, fetch_transactions};
use tracing::{debug, info, trace, warn};

use crate::api::ApiClient;

pub async fn transactions(
    client: &ApiClient,
    page_size: u32,
    changes: Vec<FilterChange>,
    page_index: u32,
) -> Result<()> {
    trace!("Entering transactions function");
    let controller = load_page(client, page_size, changes, page_index).await?;

    match controller.state() {
        FetchState::Ready(result) => {
            if result.content.is_empty() {
                info!("No transactions match the current filters");
            }
            print!("{}", render_table(&result.content));
            if let Some(summary) = controller.summary() {
                println!("{}", summary);
            }
            Ok(())
        }
        FetchState::Failed(e) => Err(e.clone().into()),
        FetchState::Loading => bail!("Transaction listing did not complete"),
    }
}

/// Applies the filters, loads the first page and, once the page count is
/// known, moves to `page_index` (clamped to the last page).
pub async fn load_page(
    client: &ApiClient,
    page_size: u32,
    changes: Vec<FilterChange>,
    page_index: u32,
) -> Result<ListQueryController<TransactionListItem>> {
    let mut controller = ListQueryController::new(page_size);
    for change in changes {
        // Superseded by the refresh below
        let _ = controller.set_filter(change);
    }
    if controller.has_active_filters() {
        debug!("Listing query: {}", controller.query());
    }

    let ticket = controller.refresh();
    let outcome = fetch_transactions(client, ticket.key()).await;
    controller.resolve(ticket, outcome);

    if page_index > 0 && controller.state().is_ready() {
        let ticket = controller.set_page(page_index);
        if ticket.key().page.index != page_index {
            warn!(
                "Page {} does not exist, showing page {}",
                page_index + 1,
                ticket.key().page.index + 1
            );
        }
        let outcome = fetch_transactions(client, ticket.key()).await;
        controller.resolve(ticket, outcome);
    }

    Ok(controller)
}

pub fn render_table(items: &[TransactionListItem]) -> String {
    let mut out = format!(
        "{:<10} {:<20} {:<28} {:>14} {:<7} {:<12} {:<8} {}\n",
        "ID", "Customer", "Email", "Amount", "Type", "Method", "Status", "Created"
    );
    for txn in items {
        out.push_str(&format!(
            "{:<10} {:<20} {:<28} {:>14} {:<7} {:<12} {:<8} {}\n",
            short_txn_id(&txn.id),
            txn.user_full_name.as_deref().unwrap_or("-"),
            txn.user_email.as_deref().unwrap_or("-"),
            format_inr(txn.amount),
            txn.txn_type.map(|t| t.as_str()).unwrap_or("-"),
            display_label(txn.payment_method.as_str()),
            txn.status.as_str(),
            txn.created_at.format("%Y-%m-%d %H:%M"),
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use common::{PaymentMethod, TxnStatus, TxnType};
    use rust_decimal::Decimal;

    #[test]
    fn test_render_table_row() {
        let txn = TransactionListItem {
            id: "42".to_string(),
            user_id: Some(7),
            user_email: Some("asha@example.com".to_string()),
            user_full_name: Some("Asha Rao".to_string()),
            amount: Decimal::new(1_234_550, 2),
            currency: Some("INR".to_string()),
            txn_type: Some(TxnType::Payin),
            status: TxnStatus::Success,
            payment_method: PaymentMethod::NetBanking,
            created_at: NaiveDate::from_ymd_opt(2024, 5, 1)
                .unwrap()
                .and_hms_opt(14, 5, 0)
                .unwrap(),
        };

        let table = render_table(&[txn]);
        let row = table.lines().nth(1).unwrap();
        assert!(row.starts_with("#000042"));
        assert!(row.contains("Asha Rao"));
        assert!(row.contains("₹12,345.50"));
        assert!(row.contains("NET BANKING"));
        assert!(row.contains("SUCCESS"));
        assert!(row.ends_with("2024-05-01 14:05"));
    }
}
