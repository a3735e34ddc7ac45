use common::{PaymentMethod, TxnStatus, TxnType};
use state::{FilterChange, FilterKey, TransactionFilter};
use state::format::display_label;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct FiltersProps {
    pub filter: TransactionFilter,
    pub has_active: bool,
    pub on_change: Callback<FilterChange>,
    pub on_clear: Callback<()>,
    pub on_invalid: Callback<String>,
}

/// Turns raw form input into a change; an empty value clears the field.
fn change_callback<E>(key: FilterKey, props: &FiltersProps, read: fn(&E) -> String) -> Callback<E>
where
    E: 'static,
{
    let on_change = props.on_change.clone();
    let on_invalid = props.on_invalid.clone();
    Callback::from(move |e: E| match FilterChange::parse(key, &read(&e)) {
        Ok(change) => on_change.emit(change),
        Err(err) => on_invalid.emit(err.to_string()),
    })
}

fn select_value(e: &Event) -> String {
    e.target_unchecked_into::<HtmlSelectElement>().value()
}

fn input_value(e: &Event) -> String {
    e.target_unchecked_into::<HtmlInputElement>().value()
}

fn typed_value(e: &InputEvent) -> String {
    e.target_unchecked_into::<HtmlInputElement>().value()
}

fn options(all: &[&'static str], selected: Option<&'static str>) -> Html {
    html! {
        <>
            <option value="" selected={selected.is_none()}>{"All"}</option>
            { for all.iter().map(|wire| html! {
                <option value={*wire} selected={selected == Some(*wire)}>{ display_label(wire) }</option>
            })}
        </>
    }
}

fn date_text(date: Option<chrono::NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

#[function_component(Filters)]
pub fn filters(props: &FiltersProps) -> Html {
    let filter = &props.filter;

    let statuses: Vec<&'static str> = TxnStatus::ALL.iter().map(|s| s.as_str()).collect();
    let methods: Vec<&'static str> = PaymentMethod::ALL.iter().map(|m| m.as_str()).collect();
    let types: Vec<&'static str> = TxnType::ALL.iter().map(|t| t.as_str()).collect();

    let on_clear = {
        let on_clear = props.on_clear.clone();
        Callback::from(move |_: MouseEvent| on_clear.emit(()))
    };

    html! {
        <div id="filters-panel" class="card bg-base-100 shadow mb-6">
            <div class="card-body py-4">
                <div class="grid grid-cols-1 md:grid-cols-3 xl:grid-cols-6 gap-3 items-end">
                    <label class="form-control">
                        <span class="label-text text-xs">{"Search email"}</span>
                        <input
                            type="search"
                            class="input input-sm input-bordered"
                            placeholder="user@example.com"
                            value={filter.user_email.clone()}
                            oninput={change_callback(FilterKey::UserEmail, props, typed_value)}
                        />
                    </label>
                    <label class="form-control">
                        <span class="label-text text-xs">{"Status"}</span>
                        <select class="select select-sm select-bordered" onchange={change_callback(FilterKey::Status, props, select_value)}>
                            { options(&statuses, filter.status.map(|s| s.as_str())) }
                        </select>
                    </label>
                    <label class="form-control">
                        <span class="label-text text-xs">{"Payment method"}</span>
                        <select class="select select-sm select-bordered" onchange={change_callback(FilterKey::PaymentMethod, props, select_value)}>
                            { options(&methods, filter.payment_method.map(|m| m.as_str())) }
                        </select>
                    </label>
                    <label class="form-control">
                        <span class="label-text text-xs">{"Type"}</span>
                        <select class="select select-sm select-bordered" onchange={change_callback(FilterKey::Type, props, select_value)}>
                            { options(&types, filter.txn_type.map(|t| t.as_str())) }
                        </select>
                    </label>
                    <label class="form-control">
                        <span class="label-text text-xs">{"From"}</span>
                        <input
                            type="date"
                            class="input input-sm input-bordered"
                            value={date_text(filter.start_date)}
                            onchange={change_callback(FilterKey::StartDate, props, input_value)}
                        />
                    </label>
                    <label class="form-control">
                        <span class="label-text text-xs">{"To"}</span>
                        <input
                            type="date"
                            class="input input-sm input-bordered"
                            value={date_text(filter.end_date)}
                            onchange={change_callback(FilterKey::EndDate, props, input_value)}
                        />
                    </label>
                </div>
                if props.has_active {
                    <div class="flex justify-end">
                        <button class="btn btn-sm btn-ghost gap-2" onclick={on_clear}>
                            <i class="fas fa-times"></i>
                            {"Clear filters"}
                        </button>
                    </div>
                }
            </div>
        </div>
    }
}
