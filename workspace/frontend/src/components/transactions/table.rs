use common::{TransactionListItem, TxnStatus};
use state::format::{display_label, format_inr, short_txn_id};
use yew::prelude::*;

fn status_badge(status: TxnStatus) -> &'static str {
    match status {
        TxnStatus::Success => "badge-success",
        TxnStatus::Pending => "badge-warning",
        TxnStatus::Failed => "badge-error",
    }
}

#[derive(Properties, PartialEq)]
pub struct TransactionTableProps {
    pub items: Vec<TransactionListItem>,
}

#[function_component(TransactionTable)]
pub fn transaction_table(props: &TransactionTableProps) -> Html {
    if props.items.is_empty() {
        return html! {
            <div class="bg-base-100 shadow rounded-box p-12 text-center text-base-content/60">
                {"No transactions match these filters"}
            </div>
        };
    }

    html! {
        <div class="overflow-x-auto bg-base-100 shadow rounded-box">
            <table class="table table-zebra">
                <thead>
                    <tr>
                        <th>{"ID"}</th>
                        <th>{"User"}</th>
                        <th class="text-right">{"Amount"}</th>
                        <th>{"Type"}</th>
                        <th>{"Method"}</th>
                        <th>{"Status"}</th>
                        <th>{"Date"}</th>
                    </tr>
                </thead>
                <tbody>
                    { for props.items.iter().map(|t| {
                        let user = t.user_full_name.clone().unwrap_or_else(|| "Unknown".to_string());
                        let txn_type = t.txn_type.map(|v| display_label(v.as_str())).unwrap_or_default();

                        html! {
                            <tr class="hover" key={t.id.clone()}>
                                <td class="font-mono text-xs">{ short_txn_id(&t.id) }</td>
                                <td>
                                    <div class="font-medium">{ user }</div>
                                    <div class="text-xs text-base-content/60">{ t.user_email.clone().unwrap_or_default() }</div>
                                </td>
                                <td class="font-mono text-right font-bold">{ format_inr(t.amount) }</td>
                                <td>{ txn_type }</td>
                                <td><span class="badge badge-sm badge-ghost">{ display_label(t.payment_method.as_str()) }</span></td>
                                <td>
                                    <span class={classes!("badge", "badge-sm", status_badge(t.status))}>
                                        { t.status.as_str() }
                                    </span>
                                </td>
                                <td class="whitespace-nowrap">{ t.created_at.format("%d %b %Y, %H:%M").to_string() }</td>
                            </tr>
                        }
                    })}
                </tbody>
            </table>
        </div>
    }
}
