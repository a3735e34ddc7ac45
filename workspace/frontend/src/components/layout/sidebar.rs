use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;

#[function_component(Sidebar)]
pub fn sidebar() -> Html {
    html! {
        <div class="drawer-side z-50">
            <label aria-label="close sidebar" class="drawer-overlay" for="app-drawer"></label>
            <ul class="menu p-4 w-72 min-h-full bg-base-100 text-base-content border-r border-base-300">
                <li class="mb-4">
                    <div class="flex items-center gap-3 px-2">
                        <div class="w-10 h-10 rounded-lg bg-primary flex items-center justify-center text-primary-content font-bold text-2xl">
                            <i class="fas fa-bolt"></i>
                        </div>
                        <span class="text-2xl font-bold tracking-tight">{"PayDash"}</span>
                    </div>
                </li>

                <li><Link<Route> to={Route::Dashboard} classes="nav-link"><i class="fas fa-home w-5"></i> {"Dashboard"}</Link<Route>></li>
                <li><Link<Route> to={Route::Analytics} classes="nav-link"><i class="fas fa-chart-line w-5"></i> {"Analytics"}</Link<Route>></li>
                <li><Link<Route> to={Route::Transactions} classes="nav-link"><i class="fas fa-exchange-alt w-5"></i> {"Transactions"}</Link<Route>></li>
            </ul>
        </div>
    }
}
