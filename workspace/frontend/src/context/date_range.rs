use std::rc::Rc;

use chrono::NaiveDate;
use state::{DateRange, DateRangeStore};
use yew::prelude::*;

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// The one date range shared by every page of the session
#[derive(Debug, Clone, PartialEq)]
pub struct DateRangeState {
    store: DateRangeStore,
}

impl DateRangeState {
    pub fn draft(&self) -> DateRange {
        self.store.draft()
    }

    /// The range that drives fetches
    pub fn applied(&self) -> DateRange {
        self.store.applied()
    }

    pub fn has_pending_edits(&self) -> bool {
        self.store.has_pending_edits()
    }
}

pub enum DateRangeAction {
    SetStart(NaiveDate),
    SetEnd(NaiveDate),
    Apply,
    Reset,
}

impl Reducible for DateRangeState {
    type Action = DateRangeAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut store = self.store;
        match action {
            DateRangeAction::SetStart(date) => store.set_draft_start(date),
            DateRangeAction::SetEnd(date) => store.set_draft_end(date),
            DateRangeAction::Apply => {
                if store.commit() {
                    log::info!("Applied date range {}", store.applied());
                }
            }
            DateRangeAction::Reset => store.reset(today()),
        }
        if store == self.store {
            return self;
        }
        Rc::new(Self { store })
    }
}

pub type DateRangeContext = UseReducerHandle<DateRangeState>;

#[derive(Properties, PartialEq)]
pub struct DateRangeProviderProps {
    pub children: Children,
}

#[function_component(DateRangeProvider)]
pub fn date_range_provider(props: &DateRangeProviderProps) -> Html {
    let range = use_reducer(|| DateRangeState {
        store: DateRangeStore::new(today()),
    });

    html! {
        <ContextProvider<DateRangeContext> context={range}>
            {props.children.clone()}
        </ContextProvider<DateRangeContext>>
    }
}

/// Shared date range; panics outside a [`DateRangeProvider`], which wraps the whole app.
#[hook]
pub fn use_date_range() -> DateRangeContext {
    use_context::<DateRangeContext>().expect("DateRangeProvider is missing from the component tree")
}
