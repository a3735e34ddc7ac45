use state::PaymentShare;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct PaymentLegendProps {
    pub shares: Vec<PaymentShare>,
}

#[function_component(PaymentLegend)]
pub fn payment_legend(props: &PaymentLegendProps) -> Html {
    if props.shares.is_empty() {
        return html! { <p class="text-sm text-base-content/60">{"No payments in this period"}</p> };
    }

    html! {
        <ul class="space-y-2 text-sm">
            { for props.shares.iter().map(|share| html! {
                <li class="flex justify-between">
                    <span>{ share.label() }</span>
                    <span class="font-mono">{ format!("{:.1}%", share.percent) }</span>
                </li>
            })}
        </ul>
    }
}
