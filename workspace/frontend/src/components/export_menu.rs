use js_sys::Array;
use state::export::{file_name, render};
use state::{ExportDataset, ExportFormat, ExportMenu, ExportMeta};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};
use yew::prelude::*;

use crate::common::toast::ToastContext;

/// Hands `content` to the browser as a file download named
/// `{prefix}-{today}.{ext}`.
pub fn download(content: &str, format: ExportFormat, prefix: &str) -> Result<(), JsValue> {
    let name = file_name(prefix, format, chrono::Local::now().date_naive());
    log::info!("Downloading {} ({} bytes)", name, content.len());

    let parts = Array::of1(&JsValue::from_str(content));
    let options = BlobPropertyBag::new();
    options.set_type(format.mime_type());
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;
    let url = Url::create_object_url_with_blob(&blob)?;

    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(&url);
    anchor.set_download(&name);
    anchor.click();

    Url::revoke_object_url(&url)
}

/// Renders `dataset` and downloads it, reporting the outcome as a toast.
pub fn export_to_file(
    format: ExportFormat,
    dataset: &ExportDataset,
    meta: &ExportMeta,
    prefix: &str,
    toast_ctx: &ToastContext,
) {
    let result = render(format, dataset, meta)
        .map_err(|e| e.to_string())
        .and_then(|content| {
            download(&content, format, prefix).map_err(|e| format!("{:?}", e))
        });
    match result {
        Ok(()) => toast_ctx.show_success(format!("Exported {}", format.label())),
        Err(e) => {
            log::error!("Export failed: {}", e);
            toast_ctx.show_error(format!("Export failed: {}", e));
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct ExportMenuProps {
    #[prop_or_default]
    pub id: Option<AttrValue>,
    #[prop_or_default]
    pub disabled: bool,
    pub on_export: Callback<ExportFormat>,
}

#[function_component(ExportMenuButton)]
pub fn export_menu_button(props: &ExportMenuProps) -> Html {
    let menu = use_state(ExportMenu::default);

    let on_toggle = {
        let menu = menu.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = *menu;
            next.toggle();
            menu.set(next);
        })
    };

    let on_click_outside = {
        let menu = menu.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = *menu;
            next.click_outside();
            menu.set(next);
        })
    };

    let options = ExportFormat::ALL.iter().map(|format| {
        let format = *format;
        let onclick = {
            let menu = menu.clone();
            let on_export = props.on_export.clone();
            Callback::from(move |_: MouseEvent| {
                let mut next = *menu;
                if let Some(picked) = next.pick(format) {
                    on_export.emit(picked);
                }
                menu.set(next);
            })
        };
        html! {
            <li><a {onclick}>{ format!("Export as {}", format.label()) }</a></li>
        }
    });

    html! {
        <div class="relative">
            <button id={props.id.clone()} class="btn btn-sm btn-outline gap-2" disabled={props.disabled} onclick={on_toggle}>
                <i class="fas fa-download"></i>
                {"Export"}
            </button>
            if menu.is_open() {
                <div class="fixed inset-0 z-30" onclick={on_click_outside}></div>
                <ul class="menu absolute right-0 mt-2 z-40 w-44 bg-base-100 rounded-box shadow">
                    { for options }
                </ul>
            }
        </div>
    }
}
