use std::rc::Rc;

use yew::prelude::*;

const TOAST_DURATION_MS: u32 = 5000;

#[derive(Clone, Copy, PartialEq)]
pub enum ToastType {
    Success,
    Error,
}

impl ToastType {
    fn alert_class(&self) -> &'static str {
        match self {
            ToastType::Success => "alert-success",
            ToastType::Error => "alert-error",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            ToastType::Success => "fas fa-check-circle",
            ToastType::Error => "fas fa-exclamation-circle",
        }
    }
}

#[derive(Clone, PartialEq)]
pub struct Toast {
    pub id: usize,
    pub message: String,
    pub toast_type: ToastType,
}

/// Visible toasts plus the id handed to the next one
#[derive(Clone, PartialEq, Default)]
pub struct ToastList {
    toasts: Vec<Toast>,
    next_id: usize,
}

pub enum ToastAction {
    Push(String, ToastType),
    Dismiss(usize),
}

impl Reducible for ToastList {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            ToastAction::Push(message, toast_type) => {
                next.toasts.push(Toast {
                    id: next.next_id,
                    message,
                    toast_type,
                });
                next.next_id += 1;
            }
            ToastAction::Dismiss(id) => next.toasts.retain(|t| t.id != id),
        }
        Rc::new(next)
    }
}

#[derive(Clone, PartialEq)]
pub struct ToastContext {
    dispatch: UseReducerDispatcher<ToastList>,
}

impl ToastContext {
    pub fn show_success(&self, message: String) {
        self.show(message, ToastType::Success);
    }

    pub fn show_error(&self, message: String) {
        self.show(message, ToastType::Error);
    }

    fn show(&self, message: String, toast_type: ToastType) {
        self.dispatch.dispatch(ToastAction::Push(message, toast_type));
    }
}

#[derive(Properties, PartialEq)]
pub struct ToastProviderProps {
    pub children: Children,
}

#[function_component(ToastProvider)]
pub fn toast_provider(props: &ToastProviderProps) -> Html {
    let list = use_reducer(ToastList::default);
    let context = ToastContext {
        dispatch: list.dispatcher(),
    };

    // Auto-dismiss the newest toast
    {
        let dispatch = list.dispatcher();
        use_effect_with(list.next_id, move |next_id| {
            let timeout = next_id.checked_sub(1).map(|id| {
                gloo_timers::callback::Timeout::new(TOAST_DURATION_MS, move || {
                    dispatch.dispatch(ToastAction::Dismiss(id));
                })
            });
            // Dropping a gloo Timeout cancels it, so keep it alive past this render
            move || {
                if let Some(timeout) = timeout {
                    timeout.forget();
                }
            }
        });
    }

    html! {
        <ContextProvider<ToastContext> context={context}>
            {props.children.clone()}
            <div class="toast toast-top toast-end z-50">
                {for list.toasts.iter().map(|toast| {
                    let id = toast.id;
                    let on_close = {
                        let dispatch = list.dispatcher();
                        Callback::from(move |_| dispatch.dispatch(ToastAction::Dismiss(id)))
                    };

                    html! {
                        <div key={id} class={classes!("alert", toast.toast_type.alert_class(), "shadow-lg")}>
                            <i class={toast.toast_type.icon()}></i>
                            <span>{&toast.message}</span>
                            <button class="btn btn-sm btn-ghost btn-circle" onclick={on_close}>
                                <i class="fas fa-times"></i>
                            </button>
                        </div>
                    }
                })}
            </div>
        </ContextProvider<ToastContext>>
    }
}
