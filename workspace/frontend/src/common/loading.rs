use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct LoadingProps {
    #[prop_or_default]
    pub size: LoadingSize,
    #[prop_or_default]
    pub text: Option<String>,
}

#[derive(Clone, PartialEq, Default)]
pub enum LoadingSize {
    Small,
    #[default]
    Large,
}

impl LoadingSize {
    fn class(&self) -> &'static str {
        match self {
            LoadingSize::Small => "loading-sm",
            LoadingSize::Large => "loading-lg",
        }
    }
}

#[function_component(Loading)]
pub fn loading(props: &LoadingProps) -> Html {
    html! {
        <div class="flex flex-col justify-center items-center py-12 gap-4">
            <span class={classes!("loading", "loading-spinner", props.size.class())}></span>
            {if let Some(text) = &props.text {
                html! { <p class="text-sm text-gray-500">{text}</p> }
            } else {
                html! {}
            }}
        </div>
    }
}
