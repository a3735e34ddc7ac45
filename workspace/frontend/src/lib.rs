use yew::prelude::*;
use yew_router::prelude::*;

mod components;
pub mod api_client;
pub mod common;
pub mod context;
pub mod hooks;
pub mod settings;

use common::toast::ToastProvider;
use components::analytics::Analytics;
use components::dashboard::Dashboard;
use components::layout::layout::Layout;
use components::transactions::Transactions;
use context::date_range::DateRangeProvider;

#[derive(Debug, Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/dashboard")]
    Dashboard,
    #[at("/analytics")]
    Analytics,
    #[at("/transactions")]
    Transactions,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    log::debug!("Routing to: {:?}", routes);
    match routes {
        Route::Home | Route::Dashboard => {
            log::trace!("Rendering Dashboard page");
            html! { <Layout title="Dashboard"><Dashboard /></Layout> }
        }
        Route::Analytics => {
            log::trace!("Rendering Analytics page");
            html! { <Layout title="Analytics"><Analytics /></Layout> }
        }
        Route::Transactions => {
            log::trace!("Rendering Transactions page");
            html! { <Layout title="Transactions"><Transactions /></Layout> }
        }
        Route::NotFound => {
            log::warn!("404 - Route not found");
            html! { <Layout title="404"><h1>{"404 Not Found"}</h1></Layout> }
        }
    }
}

/// The date range provider sits above the router so every page shares one range.
#[function_component(App)]
pub fn app() -> Html {
    html! {
        <ToastProvider>
            <DateRangeProvider>
                <BrowserRouter>
                    <Switch<Route> render={switch} />
                </BrowserRouter>
            </DateRangeProvider>
        </ToastProvider>
    }
}

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn run_app() {
    settings::init_settings();

    let settings = settings::get_settings();
    wasm_logger::init(wasm_logger::Config::new(settings.log_level));

    log::info!("=== PayDash Frontend Starting ===");
    log::info!("Application settings: {:?}", settings);
    log::debug!("API base URL: {}", settings.api_base_url());

    yew::Renderer::<App>::new().render();
    log::info!("Application initialized successfully");
}
