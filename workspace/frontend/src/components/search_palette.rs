use std::rc::Rc;

use gloo_timers::callback::Timeout;
use state::{NavigationTarget, SearchEntry, SearchPalette};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlInputElement, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;
use crate::settings::get_settings;

const HIGHLIGHT_CLASS: &str = "search-highlight";
/// Fragment targets appear once their page has loaded; poll a few times
const LOOKUP_ATTEMPTS: u32 = 20;
const LOOKUP_INTERVAL_MS: u32 = 150;

#[derive(Clone, PartialEq, Default)]
struct PaletteState(SearchPalette);

enum PaletteAction {
    Open,
    Close,
    Toggle,
    Query(String),
    Next,
    Previous,
    Hover(usize),
}

impl Reducible for PaletteState {
    type Action = PaletteAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut palette = self.0.clone();
        match action {
            PaletteAction::Open => palette.open(),
            PaletteAction::Close => palette.close(),
            PaletteAction::Toggle => palette.toggle(),
            PaletteAction::Query(query) => palette.set_query(query),
            PaletteAction::Next => palette.select_next(),
            PaletteAction::Previous => palette.select_previous(),
            PaletteAction::Hover(index) => palette.select(index),
        }
        Rc::new(Self(palette))
    }
}

fn highlight(element: web_sys::Element, highlight_ms: u32) {
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Center);
    element.scroll_into_view_with_scroll_into_view_options(&options);

    if element.class_list().add_1(HIGHLIGHT_CLASS).is_err() {
        return;
    }
    Timeout::new(highlight_ms, move || {
        let _ = element.class_list().remove_1(HIGHLIGHT_CLASS);
    })
    .forget();
}

/// Scrolls to `#fragment` and flashes it. A target that never shows up is ignored.
fn highlight_fragment(fragment: String, attempts_left: u32) {
    let element = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(&fragment));

    match element {
        Some(element) => highlight(element, get_settings().highlight_ms),
        None if attempts_left > 0 => {
            Timeout::new(LOOKUP_INTERVAL_MS, move || {
                highlight_fragment(fragment, attempts_left - 1)
            })
            .forget();
        }
        None => log::debug!("Search target #{} not found", fragment),
    }
}

fn navigate(navigator: Option<&Navigator>, target: NavigationTarget<'static>) {
    log::info!("Search navigation to {}", target.path);
    match (navigator, Route::recognize(target.path)) {
        (Some(navigator), Some(route)) => navigator.push(&route),
        _ => {
            log::warn!("Cannot navigate to {}", target.path);
            return;
        }
    }
    if let Some(fragment) = target.fragment {
        highlight_fragment(fragment.to_string(), LOOKUP_ATTEMPTS);
    }
}

fn is_toggle_shortcut(event: &web_sys::KeyboardEvent) -> bool {
    (event.ctrl_key() || event.meta_key()) && event.key().eq_ignore_ascii_case("k")
}

#[function_component(SearchPaletteView)]
pub fn search_palette_view() -> Html {
    let palette = use_reducer(PaletteState::default);
    let navigator = use_navigator();
    let input_ref = use_node_ref();

    // Ctrl/Cmd+K anywhere on the page, Escape to close
    {
        let dispatcher = palette.dispatcher();
        use_effect_with((), move |_| {
            let listener = Closure::<dyn Fn(web_sys::KeyboardEvent)>::new(
                move |event: web_sys::KeyboardEvent| {
                    if is_toggle_shortcut(&event) {
                        event.prevent_default();
                        dispatcher.dispatch(PaletteAction::Toggle);
                    } else if event.key() == "Escape" {
                        dispatcher.dispatch(PaletteAction::Close);
                    }
                },
            );
            let window = web_sys::window();
            if let Some(window) = &window {
                let _ = window.add_event_listener_with_callback(
                    "keydown",
                    listener.as_ref().unchecked_ref(),
                );
            }
            move || {
                if let Some(window) = window {
                    let _ = window.remove_event_listener_with_callback(
                        "keydown",
                        listener.as_ref().unchecked_ref(),
                    );
                }
            }
        });
    }

    {
        let input_ref = input_ref.clone();
        use_effect_with(palette.0.is_open(), move |open| {
            if *open {
                if let Some(input) = input_ref.cast::<HtmlInputElement>() {
                    let _ = input.focus();
                }
            }
            || ()
        });
    }

    let on_open = {
        let palette = palette.clone();
        Callback::from(move |_: MouseEvent| palette.dispatch(PaletteAction::Open))
    };

    let on_close = {
        let palette = palette.clone();
        Callback::from(move |_: MouseEvent| palette.dispatch(PaletteAction::Close))
    };

    let on_input = {
        let palette = palette.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            palette.dispatch(PaletteAction::Query(input.value()));
        })
    };

    let on_keydown = {
        let palette = palette.clone();
        let navigator = navigator.clone();
        Callback::from(move |e: KeyboardEvent| match e.key().as_str() {
            "ArrowDown" => {
                e.prevent_default();
                palette.dispatch(PaletteAction::Next);
            }
            "ArrowUp" => {
                e.prevent_default();
                palette.dispatch(PaletteAction::Previous);
            }
            "Enter" => {
                e.prevent_default();
                let mut current = palette.0.clone();
                if let Some(target) = current.confirm() {
                    palette.dispatch(PaletteAction::Close);
                    navigate(navigator.as_ref(), target);
                }
            }
            _ => {}
        })
    };

    let on_choose = {
        let palette = palette.clone();
        let navigator = navigator.clone();
        Callback::from(move |entry: &'static SearchEntry| {
            let mut current = palette.0.clone();
            if let Some(target) = current.choose(entry) {
                palette.dispatch(PaletteAction::Close);
                navigate(navigator.as_ref(), target);
            }
        })
    };

    let results = palette.0.results();
    let selected = palette.0.selected_index();

    html! {
        <>
            <button class="btn btn-ghost btn-sm gap-2" onclick={on_open} id="search-open">
                <i class="fas fa-search"></i>
                <span class="hidden md:inline text-base-content/60">{"Search..."}</span>
                <kbd class="kbd kbd-sm hidden md:inline">{"Ctrl K"}</kbd>
            </button>

            if palette.0.is_open() {
                <div class="fixed inset-0 z-50 flex items-start justify-center pt-24">
                    <div class="absolute inset-0 bg-black/40" onclick={on_close}></div>
                    <div class="relative w-full max-w-xl bg-base-100 rounded-box shadow-xl">
                        <div class="flex items-center gap-3 px-4 border-b border-base-300">
                            <i class="fas fa-search text-base-content/50"></i>
                            <input
                                ref={input_ref}
                                type="text"
                                class="input input-ghost w-full focus:outline-none"
                                placeholder="Search pages, metrics, charts..."
                                value={palette.0.query().to_string()}
                                oninput={on_input}
                                onkeydown={on_keydown}
                            />
                        </div>
                        <ul class="menu p-2">
                            if results.is_empty() {
                                <li class="disabled"><span>{"No results found"}</span></li>
                            }
                            { for results.iter().enumerate().map(|(index, entry)| {
                                let entry: &'static SearchEntry = entry;
                                let onclick = {
                                    let on_choose = on_choose.clone();
                                    Callback::from(move |_: MouseEvent| on_choose.emit(entry))
                                };
                                let onmouseenter = {
                                    let palette = palette.clone();
                                    Callback::from(move |_: MouseEvent| palette.dispatch(PaletteAction::Hover(index)))
                                };
                                html! {
                                    <li key={entry.id}>
                                        <a class={classes!((index == selected).then_some("active"))} {onclick} {onmouseenter}>
                                            <div class="flex flex-col">
                                                <span class="font-medium">{ entry.title }</span>
                                                <span class="text-xs text-base-content/60">{ entry.subtitle() }</span>
                                            </div>
                                        </a>
                                    </li>
                                }
                            })}
                        </ul>
                    </div>
                </div>
            }
        </>
    }
}
