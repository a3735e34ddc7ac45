use chrono::Utc;
use common::{PaginatedResult, TransactionListItem};
use state::{
    ExportDataset, ExportFormat, ExportMeta, ExportSection, FetchState, FilterChange,
    TransactionFilter,
};
use yew::prelude::*;

use super::filters::Filters;
use super::table::TransactionTable;
use crate::common::error::ErrorDisplay;
use crate::common::loading::{Loading, LoadingSize};
use crate::common::toast::ToastContext;
use crate::components::common::pagination::Pagination;
use crate::components::export_menu::{ExportMenuButton, export_to_file};
use crate::hooks::{ListQueryHandle, use_list_query};
use crate::settings::get_settings;

/// Exports the rows on screen with the filters that produced them.
fn export_page(
    format: ExportFormat,
    items: &[TransactionListItem],
    filter: &TransactionFilter,
    toast_ctx: &ToastContext,
) {
    match ExportSection::new("transactions", "Transactions", items) {
        Ok(section) => {
            let dataset = ExportDataset::new().with_section(section);
            let meta = ExportMeta::new(Utc::now()).with_filters(filter);
            export_to_file(format, &dataset, &meta, "transactions", toast_ctx);
        }
        Err(e) => toast_ctx.show_error(format!("Export failed: {}", e)),
    }
}

fn listing(list: &ListQueryHandle, fetch_state: &FetchState<PaginatedResult<TransactionListItem>>) -> Html {
    match fetch_state {
        FetchState::Loading => html! { <Loading size={LoadingSize::Small} text="Loading transactions..." /> },
        FetchState::Failed(err) => {
            let list = list.clone();
            html! {
                <ErrorDisplay
                    message={err.to_string()}
                    on_retry={Callback::from(move |_: ()| list.refresh())}
                />
            }
        }
        FetchState::Ready(page) => html! { <TransactionTable items={page.content.clone()} /> },
    }
}

#[function_component(Transactions)]
pub fn transactions() -> Html {
    let list = use_list_query(get_settings().page_size);
    let toast_ctx = use_context::<ToastContext>().expect("ToastContext not found");

    let (fetch_state, page, total_pages, summary, filter, has_active) = list.with(|c| {
        (
            c.state().clone(),
            c.page(),
            c.total_pages(),
            c.summary(),
            c.filter().clone(),
            c.has_active_filters(),
        )
    });

    let on_change = {
        let list = list.clone();
        Callback::from(move |change: FilterChange| list.set_filter(change))
    };

    let on_clear = {
        let list = list.clone();
        Callback::from(move |_: ()| list.clear_filters())
    };

    let on_invalid = {
        let toast_ctx = toast_ctx.clone();
        Callback::from(move |message: String| toast_ctx.show_error(message))
    };

    let on_page_change = {
        let list = list.clone();
        Callback::from(move |index: u32| list.set_page(index))
    };

    let on_export = {
        let fetch_state = fetch_state.clone();
        let filter = filter.clone();
        Callback::from(move |format: ExportFormat| {
            if let FetchState::Ready(page) = &fetch_state {
                export_page(format, &page.content, &filter, &toast_ctx);
            }
        })
    };

    html! {
        <>
            <Filters {filter} has_active={has_active} {on_change} {on_clear} {on_invalid} />
            <div class="flex justify-end mb-3">
                <ExportMenuButton id="export-btn" disabled={!fetch_state.is_ready()} {on_export} />
            </div>
            { listing(&list, &fetch_state) }
            <Pagination
                {page}
                {total_pages}
                {summary}
                disabled={fetch_state.is_loading()}
                {on_page_change}
            />
        </>
    }
}
