use anyhow::Result;
use common::DashboardStats;
use state::format::{format_compact_inr, format_count, format_percent};
use state::{DateRange, dashboard};
use tracing::{debug, error, info, trace};

use crate::api::ApiClient;

pub async fn stats(client: &ApiClient, range: Option<DateRange>) -> Result<()> {
    trace!("Entering stats function");
    match &range {
        Some(range) => info!("Fetching KPI summary for {}", range),
        None => info!("Fetching all-time KPI summary"),
    }

    let path = dashboard::stats_path(range.as_ref());
    debug!("Stats endpoint: {}", path);
    let stats: DashboardStats = match client.get(&path).await {
        Ok(stats) => stats,
        Err(e) => {
            error!("Failed to load dashboard stats: {}", e);
            return Err(e.into());
        }
    };

    print!("{}", render_stats(&stats));
    Ok(())
}

/// Two-column KPI table, one figure per line.
pub fn render_stats(stats: &DashboardStats) -> String {
    let rows = [
        ("Total GTV", format_compact_inr(stats.total_gtv)),
        ("Success Rate", format_percent(stats.success_rate)),
        ("Failed Volume", format_compact_inr(stats.total_failed_volume)),
        ("Transactions", format_count(stats.total_txns.unwrap_or(0))),
        ("Average Ticket", format_compact_inr(stats.average_ticket_size)),
        ("Pending", format_count(stats.pending_trxns.unwrap_or(0))),
        ("Total Users", format_count(stats.total_users.unwrap_or(0))),
        ("New Users Today", format_count(stats.new_users_today.unwrap_or(0))),
    ];
    rows.iter()
        .map(|(label, value)| format!("{:<16} {}\n", label, value))
        .collect()
}
