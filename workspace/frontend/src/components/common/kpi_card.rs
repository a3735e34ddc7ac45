use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct KpiCardProps {
    #[prop_or_default]
    pub id: Option<AttrValue>,
    pub title: AttrValue,
    pub value: String,
    #[prop_or_default]
    pub desc: Option<String>,
    /// daisyUI text color class of the value
    #[prop_or(AttrValue::Static("text-base-content"))]
    pub tone: AttrValue,
    pub icon: AttrValue,
}

#[function_component(KpiCard)]
pub fn kpi_card(props: &KpiCardProps) -> Html {
    html! {
        <div id={props.id.clone()} class="stats shadow bg-base-100">
            <div class="stat">
                <div class="stat-figure text-base-content/40">
                    <i class={classes!(props.icon.to_string(), "text-2xl")}></i>
                </div>
                <div class="stat-title">{ &props.title }</div>
                <div class={classes!("stat-value", "text-2xl", props.tone.to_string())}>{ &props.value }</div>
                if let Some(desc) = &props.desc {
                    <div class="stat-desc">{ desc }</div>
                }
            </div>
        </div>
    }
}
