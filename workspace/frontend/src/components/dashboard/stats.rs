use common::DashboardStats;
use state::format::{format_compact_inr, format_count, format_percent};
use yew::prelude::*;

use crate::components::common::kpi_card::KpiCard;

#[derive(Properties, PartialEq)]
pub struct StatsProps {
    pub stats: DashboardStats,
}

/// KPI grid; missing figures show as zero.
#[function_component(Stats)]
pub fn stats(props: &StatsProps) -> Html {
    let stats = &props.stats;

    html! {
        <div class="grid grid-cols-1 md:grid-cols-2 xl:grid-cols-4 gap-4">
            <KpiCard
                id="kpi-gtv"
                title="Total GTV"
                value={format_compact_inr(stats.total_gtv)}
                desc={format!("{} transactions", format_count(stats.total_txns.unwrap_or(0)))}
                tone="text-primary"
                icon="fas fa-indian-rupee-sign"
            />
            <KpiCard
                id="kpi-success"
                title="Success Rate"
                value={format_percent(stats.success_rate)}
                desc={format!("{} pending", format_count(stats.pending_trxns.unwrap_or(0)))}
                tone="text-success"
                icon="fas fa-circle-check"
            />
            <KpiCard
                id="kpi-failed"
                title="Failed Volume"
                value={format_compact_inr(stats.total_failed_volume)}
                tone="text-error"
                icon="fas fa-triangle-exclamation"
            />
            <KpiCard
                title="Users"
                value={format_count(stats.total_users.unwrap_or(0))}
                desc={format!("+{} today", format_count(stats.new_users_today.unwrap_or(0)))}
                icon="fas fa-users"
            />
            <KpiCard
                title="Avg Ticket Size"
                value={format_compact_inr(stats.average_ticket_size)}
                icon="fas fa-receipt"
            />
        </div>
    }
}
