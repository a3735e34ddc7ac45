use std::cell::RefCell;
use std::fmt::Debug;
use std::future::Future;
use std::rc::Rc;

use state::{FetchError, FetchOrchestrator, FetchState, Ticket};
use yew::prelude::*;

use crate::common::toast::ToastContext;

type SharedOrchestrator<K, T> = Rc<RefCell<FetchOrchestrator<K, T>>>;

/// Runs `fetch` whenever `key` changes and returns the group state plus a
/// refetch callback. Results of superseded keys are dropped.
#[hook]
pub fn use_fetch_group<K, T, F, Fut>(key: K, fetch: F) -> (FetchState<T>, Callback<()>)
where
    K: Clone + PartialEq + Debug + 'static,
    T: Clone + 'static,
    F: Fn(K) -> Fut + 'static,
    Fut: Future<Output = Result<T, FetchError>> + 'static,
{
    let orchestrator: SharedOrchestrator<K, T> = use_mut_ref(FetchOrchestrator::new);
    let fetch_state = use_state(|| FetchState::Loading);
    let toast_ctx = use_context::<ToastContext>();
    let fetch_fn = use_state(|| Rc::new(fetch));

    let refetch = {
        let orchestrator = orchestrator.clone();
        let fetch_state = fetch_state.clone();
        let toast_ctx = toast_ctx.clone();
        let fetch_fn = fetch_fn.clone();

        use_callback((), move |_, _| {
            let ticket = orchestrator.borrow_mut().refresh();
            if let Some(ticket) = ticket {
                log::debug!("Manual refetch of {:?}", ticket.key());
                spawn_group(
                    orchestrator.clone(),
                    fetch_state.clone(),
                    toast_ctx.clone(),
                    (*fetch_fn).clone(),
                    ticket,
                );
            }
        })
    };

    // Fetch on mount and whenever the trigger key changes
    {
        let fetch_state = fetch_state.clone();
        use_effect_with(key, move |key| {
            let ticket = orchestrator.borrow_mut().trigger(key.clone());
            if let Some(ticket) = ticket {
                spawn_group(orchestrator, fetch_state, toast_ctx, (*fetch_fn).clone(), ticket);
            }
            || ()
        });
    }

    ((*fetch_state).clone(), refetch)
}

fn spawn_group<K, T, F, Fut>(
    orchestrator: SharedOrchestrator<K, T>,
    fetch_state: UseStateHandle<FetchState<T>>,
    toast_ctx: Option<ToastContext>,
    fetch_fn: Rc<F>,
    ticket: Ticket<K>,
) where
    K: Clone + PartialEq + Debug + 'static,
    T: Clone + 'static,
    F: Fn(K) -> Fut + 'static,
    Fut: Future<Output = Result<T, FetchError>> + 'static,
{
    fetch_state.set(FetchState::Loading);

    wasm_bindgen_futures::spawn_local(async move {
        let outcome = (*fetch_fn)(ticket.key().clone()).await;
        let message = outcome.as_ref().err().map(ToString::to_string);

        let applied = orchestrator.borrow_mut().resolve(ticket, outcome);
        if !applied {
            return;
        }
        fetch_state.set(orchestrator.borrow().state().clone());
        if let (Some(message), Some(toast_ctx)) = (message, toast_ctx) {
            toast_ctx.show_error(message);
        }
    });
}
