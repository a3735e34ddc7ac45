use state::{DashboardData, PaymentShare};
use yew::prelude::*;

use super::payment_legend::PaymentLegend;
use super::stats::Stats;
use crate::api_client::dashboard::get_overview;
use crate::common::fetch_render::FetchRender;
use crate::components::charts::{
    Chart, base_layout, donut_layout, hourly_traces, payment_traces, revenue_traces,
    status_traces,
};
use crate::context::date_range::use_date_range;
use crate::hooks::use_fetch_group;

#[derive(Properties, PartialEq)]
struct OverviewProps {
    data: DashboardData,
}

#[function_component(Overview)]
fn overview(props: &OverviewProps) -> Html {
    let data = &props.data;
    let shares = PaymentShare::from_stats(&data.payment_methods);

    html! {
        <>
            <Stats stats={data.stats.clone()} />
            <div class="grid grid-cols-1 lg:grid-cols-3 gap-6 mt-6">
                <div class="card bg-base-100 shadow lg:col-span-2">
                    <div class="card-body">
                        <h2 class="card-title">{"Revenue Trends"}</h2>
                        <Chart id="chart-revenue" data={revenue_traces(&data.daily)} layout={base_layout(false)} />
                    </div>
                </div>
                <div class="card bg-base-100 shadow">
                    <div class="card-body">
                        <h2 class="card-title">{"Payment Distribution"}</h2>
                        <Chart id="chart-payment" data={payment_traces(&shares)} layout={donut_layout()} height={220} />
                        <PaymentLegend shares={shares.clone()} />
                    </div>
                </div>
            </div>
            <div class="grid grid-cols-1 lg:grid-cols-2 gap-6 mt-6">
                <div class="card bg-base-100 shadow">
                    <div class="card-body">
                        <h2 class="card-title">{"Status Breakdown"}</h2>
                        <Chart id="chart-status" data={status_traces(&data.daily)} layout={base_layout(true)} />
                    </div>
                </div>
                <div class="card bg-base-100 shadow">
                    <div class="card-body">
                        <h2 class="card-title">{"Hourly Traffic"}</h2>
                        <Chart id="chart-hourly" data={hourly_traces(&data.hourly)} layout={base_layout(false)} />
                    </div>
                </div>
            </div>
        </>
    }
}

/// All-time KPIs with the series of the applied range
#[function_component(Dashboard)]
pub fn dashboard() -> Html {
    let range = use_date_range();
    let applied = range.applied();
    let (fetch_state, refetch) = use_fetch_group(applied, get_overview);

    let render = Callback::from(|data: DashboardData| html! { <Overview {data} /> });

    html! {
        <>
            <p class="text-sm text-base-content/60 mb-4">{ format!("Showing {}", applied) }</p>
            <FetchRender<DashboardData> state={fetch_state} {render} on_retry={refetch} loading_text="Loading dashboard..." />
        </>
    }
}
