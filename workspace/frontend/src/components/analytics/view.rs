use chrono::Utc;
use state::{DashboardData, DateRange, ExportFormat, ExportMeta, FetchState, PaymentShare};
use yew::prelude::*;

use super::date_picker::DatePicker;
use crate::api_client::dashboard::get_analytics;
use crate::common::fetch_render::FetchRender;
use crate::common::toast::ToastContext;
use crate::components::charts::{
    Chart, base_layout, daily_count_traces, donut_layout, hourly_traces, payment_traces,
    revenue_traces,
};
use crate::components::dashboard::payment_legend::PaymentLegend;
use crate::components::dashboard::stats::Stats;
use crate::components::export_menu::{ExportMenuButton, export_to_file};
use crate::context::date_range::use_date_range;
use crate::hooks::use_fetch_group;

#[derive(Properties, PartialEq)]
struct AnalyticsBodyProps {
    data: DashboardData,
}

#[function_component(AnalyticsBody)]
fn analytics_body(props: &AnalyticsBodyProps) -> Html {
    let data = &props.data;
    let shares = PaymentShare::from_stats(&data.payment_methods);

    html! {
        <>
            <Stats stats={data.stats.clone()} />
            <div class="grid grid-cols-1 lg:grid-cols-2 gap-6 mt-6">
                <div class="card bg-base-100 shadow">
                    <div class="card-body">
                        <h2 class="card-title">{"Revenue Analysis"}</h2>
                        <Chart id="chart-revenue-analytics" data={revenue_traces(&data.daily)} layout={base_layout(false)} />
                    </div>
                </div>
                <div class="card bg-base-100 shadow">
                    <div class="card-body">
                        <h2 class="card-title">{"Payment Method Analysis"}</h2>
                        <div class="grid grid-cols-1 md:grid-cols-2 gap-4 items-center">
                            <Chart id="chart-payment-analytics" data={payment_traces(&shares)} layout={donut_layout()} height={240} />
                            <PaymentLegend shares={shares.clone()} />
                        </div>
                    </div>
                </div>
                <div class="card bg-base-100 shadow">
                    <div class="card-body">
                        <h2 class="card-title">{"Daily Traffic"}</h2>
                        <Chart id="chart-daily-analytics" data={daily_count_traces(&data.daily)} layout={base_layout(false)} />
                    </div>
                </div>
                <div class="card bg-base-100 shadow">
                    <div class="card-body">
                        <h2 class="card-title">{"Hourly Peak Traffic"}</h2>
                        <Chart id="chart-hourly-analytics" data={hourly_traces(&data.hourly)} layout={base_layout(false)} />
                    </div>
                </div>
            </div>
        </>
    }
}

fn export_analytics(format: ExportFormat, data: &DashboardData, range: DateRange, toast_ctx: &ToastContext) {
    match data.export_dataset() {
        Ok(dataset) => {
            let meta = ExportMeta::new(Utc::now()).with_range(range);
            export_to_file(format, &dataset, &meta, "analytics", toast_ctx);
        }
        Err(e) => toast_ctx.show_error(format!("Export failed: {}", e)),
    }
}

/// Every figure restricted to the applied range
#[function_component(Analytics)]
pub fn analytics() -> Html {
    let range = use_date_range();
    let toast_ctx = use_context::<ToastContext>().expect("ToastContext not found");
    let applied = range.applied();
    let (fetch_state, refetch) = use_fetch_group(applied, get_analytics);

    let on_export = {
        let fetch_state = fetch_state.clone();
        Callback::from(move |format: ExportFormat| {
            if let FetchState::Ready(data) = &fetch_state {
                export_analytics(format, data, applied, &toast_ctx);
            }
        })
    };

    let render = Callback::from(|data: DashboardData| html! { <AnalyticsBody {data} /> });

    html! {
        <>
            <div class="flex flex-wrap justify-between items-end gap-4 mb-6">
                <DatePicker />
                <ExportMenuButton id="export-analytics" disabled={!fetch_state.is_ready()} {on_export} />
            </div>
            <FetchRender<DashboardData> state={fetch_state} {render} on_retry={refetch} loading_text="Loading analytics..." />
        </>
    }
}
