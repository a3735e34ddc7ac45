use chrono::NaiveDate;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::context::date_range::{DateRangeAction, use_date_range};

fn parse_input(e: &Event) -> Option<NaiveDate> {
    let input: HtmlInputElement = e.target_unchecked_into();
    NaiveDate::parse_from_str(&input.value(), "%Y-%m-%d").ok()
}

/// Edits the draft range. Nothing is fetched until Apply.
#[function_component(DatePicker)]
pub fn date_picker() -> Html {
    let range = use_date_range();
    let draft = range.draft();

    let on_start = {
        let range = range.clone();
        Callback::from(move |e: Event| {
            if let Some(date) = parse_input(&e) {
                range.dispatch(DateRangeAction::SetStart(date));
            }
        })
    };

    let on_end = {
        let range = range.clone();
        Callback::from(move |e: Event| {
            if let Some(date) = parse_input(&e) {
                range.dispatch(DateRangeAction::SetEnd(date));
            }
        })
    };

    let on_apply = {
        let range = range.clone();
        Callback::from(move |_: MouseEvent| range.dispatch(DateRangeAction::Apply))
    };

    let on_reset = {
        let range = range.clone();
        Callback::from(move |_: MouseEvent| range.dispatch(DateRangeAction::Reset))
    };

    html! {
        <div id="date-picker" class="flex flex-wrap items-end gap-3">
            <label class="form-control">
                <span class="label-text text-xs">{"From"}</span>
                <input
                    type="date"
                    class="input input-sm input-bordered"
                    value={draft.start.format("%Y-%m-%d").to_string()}
                    onchange={on_start}
                />
            </label>
            <label class="form-control">
                <span class="label-text text-xs">{"To"}</span>
                <input
                    type="date"
                    class="input input-sm input-bordered"
                    min={draft.start.format("%Y-%m-%d").to_string()}
                    value={draft.end.format("%Y-%m-%d").to_string()}
                    onchange={on_end}
                />
            </label>
            <button class="btn btn-sm btn-primary" disabled={!range.has_pending_edits()} onclick={on_apply}>
                {"Apply"}
            </button>
            <button class="btn btn-sm btn-ghost" onclick={on_reset}>
                {"Reset"}
            </button>
        </div>
    }
}
