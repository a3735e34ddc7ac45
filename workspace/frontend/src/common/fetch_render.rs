use state::FetchState;
use yew::prelude::*;

use super::error::ErrorDisplay;
use super::loading::Loading;

#[derive(Properties)]
pub struct FetchRenderProps<T: Clone + PartialEq + 'static> {
    pub state: FetchState<T>,
    pub render: Callback<T, Html>,
    #[prop_or_default]
    pub on_retry: Option<Callback<()>>,
    #[prop_or_default]
    pub loading_text: Option<String>,
}

impl<T: Clone + PartialEq + 'static> PartialEq for FetchRenderProps<T> {
    fn eq(&self, other: &Self) -> bool {
        self.state == other.state && self.loading_text == other.loading_text
    }
}

/// Component that handles rendering based on FetchState
/// - Loading: shows loading spinner
/// - Failed: shows error display with optional retry
/// - Ready: calls render callback with data
#[function_component(FetchRender)]
pub fn fetch_render<T>(props: &FetchRenderProps<T>) -> Html
where
    T: Clone + PartialEq + 'static,
{
    match &props.state {
        FetchState::Loading => html! { <Loading text={props.loading_text.clone()} /> },
        FetchState::Failed(err) => {
            html! {
                <ErrorDisplay
                    message={err.to_string()}
                    on_retry={props.on_retry.clone()}
                />
            }
        }
        FetchState::Ready(data) => props.render.emit(data.clone()),
    }
}
