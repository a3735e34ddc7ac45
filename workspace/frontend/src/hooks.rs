use std::cell::RefCell;
use std::rc::Rc;

use common::TransactionListItem;
use state::{FilterChange, ListQuery, ListQueryController, Ticket};
use yew::prelude::*;

use crate::api_client::transactions::get_transactions;
use crate::common::toast::ToastContext;

pub use crate::common::fetch_hook::use_fetch_group;

pub type TransactionList = ListQueryController<TransactionListItem>;

/// Handle to the transaction listing of the current page.
///
/// Every operation hands its ticket to a spawned request; only the newest
/// ticket's response reaches the controller.
#[derive(Clone)]
pub struct ListQueryHandle {
    controller: Rc<RefCell<TransactionList>>,
    rerender: UseForceUpdateHandle,
    toast_ctx: Option<ToastContext>,
}

impl ListQueryHandle {
    /// Read access for rendering
    pub fn with<R>(&self, f: impl FnOnce(&TransactionList) -> R) -> R {
        f(&self.controller.borrow())
    }

    pub fn set_filter(&self, change: FilterChange) {
        let ticket = self.controller.borrow_mut().set_filter(change);
        self.dispatch(ticket);
    }

    pub fn clear_filters(&self) {
        let ticket = self.controller.borrow_mut().clear_filters();
        self.dispatch(ticket);
    }

    pub fn set_page(&self, index: u32) {
        let ticket = self.controller.borrow_mut().set_page(index);
        self.dispatch(ticket);
    }

    pub fn next_page(&self) {
        let ticket = self.controller.borrow_mut().next_page();
        self.dispatch(ticket);
    }

    pub fn previous_page(&self) {
        let ticket = self.controller.borrow_mut().previous_page();
        self.dispatch(ticket);
    }

    pub fn refresh(&self) {
        let ticket = self.controller.borrow_mut().refresh();
        self.dispatch(ticket);
    }

    fn start(&self) {
        let ticket = self.controller.borrow_mut().start();
        if let Some(ticket) = ticket {
            self.dispatch(ticket);
        }
    }

    fn dispatch(&self, ticket: Ticket<ListQuery>) {
        self.rerender.force_update();

        let handle = self.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let outcome = get_transactions(ticket.key()).await;
            let message = outcome.as_ref().err().map(ToString::to_string);

            let applied = handle.controller.borrow_mut().resolve(ticket, outcome);
            if !applied {
                return;
            }
            handle.rerender.force_update();
            if let (Some(message), Some(toast_ctx)) = (message, &handle.toast_ctx) {
                toast_ctx.show_error(message);
            }
        });
    }
}

/// Transaction listing with filters and pagination, loaded on mount
#[hook]
pub fn use_list_query(page_size: u32) -> ListQueryHandle {
    let controller = use_mut_ref(|| TransactionList::new(page_size));
    let rerender = use_force_update();
    let toast_ctx = use_context::<ToastContext>();

    let handle = ListQueryHandle {
        controller,
        rerender,
        toast_ctx,
    };

    {
        let handle = handle.clone();
        use_effect_with((), move |_| {
            handle.start();
            || ()
        });
    }

    handle
}
