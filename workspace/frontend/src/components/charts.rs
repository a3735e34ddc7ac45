use common::{DailyStat, HourlyStat};
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use serde_json::{Value, json};
use state::PaymentShare;
use state::format::display_label;
use wasm_bindgen::prelude::*;
use web_sys::Element;
use yew::prelude::*;

const SUCCESS_COLOR: &str = "#22c55e";
const PENDING_COLOR: &str = "#f59e0b";
const FAILED_COLOR: &str = "#ef4444";
const PRIMARY_COLOR: &str = "#6366f1";
const DONUT_COLORS: [&str; 4] = ["#6366f1", "#22c55e", "#f59e0b", "#ec4899"];

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = Plotly)]
    pub fn newPlot(div_id: &str, data: JsValue, layout: JsValue, config: JsValue);
}

fn day_labels(daily: &[DailyStat]) -> Vec<String> {
    daily
        .iter()
        .map(|d| d.date.format("%Y-%m-%d").to_string())
        .collect()
}

/// Filled area of the daily processed amount
pub fn revenue_traces(daily: &[DailyStat]) -> Value {
    let amounts: Vec<f64> = daily
        .iter()
        .map(|d| d.total_amount.to_f64().unwrap_or(0.0))
        .collect();

    json!([{
        "x": day_labels(daily),
        "y": amounts,
        "type": "scatter",
        "mode": "lines",
        "fill": "tozeroy",
        "line": {"color": PRIMARY_COLOR, "shape": "spline"},
        "name": "Revenue"
    }])
}

/// Stacked bars of success/pending/failed counts per day
pub fn status_traces(daily: &[DailyStat]) -> Value {
    let days = day_labels(daily);
    let series = [
        ("Success", SUCCESS_COLOR, daily.iter().map(|d| d.success_count).collect::<Vec<_>>()),
        ("Pending", PENDING_COLOR, daily.iter().map(|d| d.pending_count).collect()),
        ("Failed", FAILED_COLOR, daily.iter().map(|d| d.failed_count).collect()),
    ];

    Value::Array(
        series
            .into_iter()
            .map(|(name, color, counts)| {
                json!({
                    "x": days,
                    "y": counts,
                    "type": "bar",
                    "name": name,
                    "marker": {"color": color}
                })
            })
            .collect(),
    )
}

/// Transactions per day, all statuses
pub fn daily_count_traces(daily: &[DailyStat]) -> Value {
    let counts: Vec<i64> = daily.iter().map(|d| d.txn_count).collect();
    json!([{
        "x": day_labels(daily),
        "y": counts,
        "type": "bar",
        "marker": {"color": PRIMARY_COLOR},
        "name": "Transactions"
    }])
}

pub fn payment_traces(shares: &[PaymentShare]) -> Value {
    let labels: Vec<String> = shares
        .iter()
        .map(|s| display_label(s.method.as_str()))
        .collect();
    let values: Vec<i64> = shares.iter().map(|s| s.count).collect();

    json!([{
        "labels": labels,
        "values": values,
        "type": "pie",
        "hole": 0.6,
        "marker": {"colors": DONUT_COLORS},
        "textinfo": "none",
        "sort": false
    }])
}

pub fn hour_label(hour: u8) -> String {
    format!("{:02}:00", hour)
}

pub fn hourly_traces(hourly: &[HourlyStat]) -> Value {
    let hours: Vec<String> = hourly.iter().map(|h| hour_label(h.hour)).collect();
    let totals: Vec<i64> = hourly.iter().map(|h| h.txn_count).collect();
    let failed: Vec<i64> = hourly.iter().map(|h| h.failed_count).collect();

    json!([
        {
            "x": hours,
            "y": totals,
            "type": "scatter",
            "mode": "lines+markers",
            "line": {"color": PRIMARY_COLOR, "shape": "spline"},
            "name": "Transactions"
        },
        {
            "x": hours,
            "y": failed,
            "type": "scatter",
            "mode": "lines",
            "line": {"color": FAILED_COLOR, "dash": "dot"},
            "name": "Failed"
        }
    ])
}

pub fn base_layout(stacked: bool) -> Value {
    let mut layout = json!({
        "margin": {"t": 10, "r": 10, "l": 50, "b": 30},
        "paper_bgcolor": "rgba(0,0,0,0)",
        "plot_bgcolor": "rgba(0,0,0,0)",
        "xaxis": {"showgrid": false},
        "yaxis": {"showgrid": true, "gridcolor": "#eee"},
        "showlegend": true,
        "legend": {"orientation": "h"}
    });
    if stacked {
        layout["barmode"] = json!("stack");
    }
    layout
}

pub fn donut_layout() -> Value {
    json!({
        "margin": {"t": 10, "r": 10, "l": 10, "b": 10},
        "paper_bgcolor": "rgba(0,0,0,0)",
        "showlegend": false
    })
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, serde_wasm_bindgen::Error> {
    // Plain objects, Plotly does not read JS Maps
    value.serialize(&serde_wasm_bindgen::Serializer::json_compatible())
}

fn plot(div_id: &str, data: &Value, layout: &Value) {
    let config = json!({"responsive": true, "displayModeBar": false});
    match (to_js(data), to_js(layout), to_js(&config)) {
        (Ok(data), Ok(layout), Ok(config)) => newPlot(div_id, data, layout, config),
        _ => log::error!("Failed to convert chart '{}' for Plotly", div_id),
    }
}

#[derive(Properties, PartialEq)]
pub struct ChartProps {
    /// Element id, also the search palette target
    pub id: AttrValue,
    pub data: Value,
    pub layout: Value,
    #[prop_or(300)]
    pub height: u32,
}

#[function_component(Chart)]
pub fn chart(props: &ChartProps) -> Html {
    let chart_ref = use_node_ref();

    {
        let chart_ref = chart_ref.clone();
        use_effect_with(
            (props.data.clone(), props.layout.clone()),
            move |(data, layout)| {
                if let Some(element) = chart_ref.cast::<Element>() {
                    let div_id = element.id();
                    if !div_id.is_empty() {
                        log::trace!("Plotting chart {}", div_id);
                        plot(&div_id, data, layout);
                    }
                }
                || ()
            },
        );
    }

    html! {
        <div ref={chart_ref} id={props.id.clone()} class="chart-container" style={format!("height: {}px;", props.height)}></div>
    }
}
