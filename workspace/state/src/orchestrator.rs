//! Fetch-on-change orchestration with last-trigger-wins ordering.
//!
//! A fetch group is started by a change of its trigger key. Each start bumps a
//! generation counter and hands the caller a [`Ticket`]; the caller issues the
//! requests (concurrently, all-or-nothing) and gives the outcome back through
//! [`FetchOrchestrator::resolve`]. Outcomes carrying an older generation are
//! dropped, so a slow superseded group can never overwrite a newer one.
//! In-flight requests are not aborted.

use std::fmt;
use std::future::Future;

use tracing::{debug, error, trace};

use crate::error::FetchError;
use crate::fetch_state::FetchState;

/// Monotonic tag of a fetch group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Permission to deliver the outcome of one fetch group.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a ticket must be resolved for the fetch group to leave Loading"]
pub struct Ticket<K> {
    generation: Generation,
    key: K,
}

impl<K> Ticket<K> {
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Trigger key the requests of this group must be built from.
    pub fn key(&self) -> &K {
        &self.key
    }
}

#[derive(Debug, Clone)]
pub struct FetchOrchestrator<K, T> {
    trigger: Option<K>,
    generation: Generation,
    state: FetchState<T>,
}

impl<K, T> Default for FetchOrchestrator<K, T> {
    fn default() -> Self {
        Self {
            trigger: None,
            generation: Generation::default(),
            state: FetchState::Loading,
        }
    }
}

impl<K, T> FetchOrchestrator<K, T>
where
    K: Clone + PartialEq + fmt::Debug,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FetchState<T> {
        &self.state
    }

    pub fn trigger_key(&self) -> Option<&K> {
        self.trigger.as_ref()
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn is_current(&self, ticket: &Ticket<K>) -> bool {
        ticket.generation == self.generation
    }

    /// Starts a group when `key` differs from the current trigger; an unchanged
    /// key returns `None` and leaves the state alone.
    pub fn trigger(&mut self, key: K) -> Option<Ticket<K>> {
        if self.trigger.as_ref() == Some(&key) {
            trace!(?key, "Trigger key unchanged, no fetch");
            return None;
        }
        Some(self.restart(key))
    }

    /// Starts a group for `key` even when it equals the current trigger.
    pub fn restart(&mut self, key: K) -> Ticket<K> {
        self.generation = self.generation.next();
        self.trigger = Some(key.clone());
        self.state = FetchState::Loading;
        debug!(generation = %self.generation, ?key, "Starting fetch group");
        Ticket {
            generation: self.generation,
            key,
        }
    }

    /// Re-runs the current trigger (manual recovery after a failure).
    pub fn refresh(&mut self) -> Option<Ticket<K>> {
        let key = self.trigger.clone()?;
        Some(self.restart(key))
    }

    /// Applies the outcome of a group. Returns `false`, leaving the state
    /// untouched, when the ticket was superseded by a newer trigger.
    pub fn resolve(&mut self, ticket: Ticket<K>, outcome: Result<T, FetchError>) -> bool {
        if ticket.generation != self.generation {
            debug!(
                stale = %ticket.generation,
                current = %self.generation,
                "Discarding result of superseded fetch group"
            );
            return false;
        }

        self.state = match outcome {
            Ok(data) => {
                debug!(generation = %ticket.generation, "Fetch group ready");
                FetchState::Ready(data)
            }
            Err(err) => {
                error!(generation = %ticket.generation, endpoint = err.endpoint(), "Fetch group failed: {}", err);
                FetchState::Failed(err)
            }
        };
        true
    }

    /// Triggers, awaits `fetch` and resolves in one go, for callers that own
    /// the orchestrator exclusively for the duration of the fetch.
    pub async fn run<F, Fut>(&mut self, key: K, fetch: F) -> &FetchState<T>
    where
        F: FnOnce(K) -> Fut,
        Fut: Future<Output = Result<T, FetchError>>,
    {
        if let Some(ticket) = self.trigger(key) {
            let outcome = fetch(ticket.key().clone()).await;
            self.resolve(ticket, outcome);
        }
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use tokio::sync::oneshot;

    fn server_error() -> FetchError {
        FetchError::status("/dashboard/stats", 500)
    }

    #[test]
    fn test_trigger_starts_loading_and_ready_on_success() {
        let mut orchestrator = FetchOrchestrator::<&str, u32>::new();
        let ticket = orchestrator.trigger("A").expect("first trigger starts a group");
        assert!(orchestrator.state().is_loading());

        assert!(orchestrator.resolve(ticket, Ok(7)));
        assert_eq!(orchestrator.state(), &FetchState::Ready(7));
    }

    #[test]
    fn test_unchanged_key_does_not_refetch() {
        let mut orchestrator = FetchOrchestrator::<&str, u32>::new();
        let ticket = orchestrator.trigger("A").unwrap();
        orchestrator.resolve(ticket, Ok(1));

        assert!(orchestrator.trigger("A").is_none());
        assert_eq!(orchestrator.state(), &FetchState::Ready(1));
        assert_eq!(orchestrator.generation().value(), 1);
    }

    #[test]
    fn test_failure_discards_previous_data() {
        let mut orchestrator = FetchOrchestrator::<&str, u32>::new();
        let ticket = orchestrator.trigger("A").unwrap();
        orchestrator.resolve(ticket, Ok(1));

        let ticket = orchestrator.trigger("B").unwrap();
        orchestrator.resolve(ticket, Err(server_error()));
        assert_eq!(orchestrator.state(), &FetchState::Failed(server_error()));
    }

    #[test]
    fn test_stale_resolution_is_ignored() {
        let mut orchestrator = FetchOrchestrator::<&str, u32>::new();
        let first = orchestrator.trigger("A").unwrap();
        let second = orchestrator.trigger("B").unwrap();

        assert!(orchestrator.resolve(second, Ok(2)));
        assert!(!orchestrator.resolve(first, Ok(1)));
        assert_eq!(orchestrator.state(), &FetchState::Ready(2));
    }

    #[test]
    fn test_stale_failure_does_not_clobber_loading() {
        let mut orchestrator = FetchOrchestrator::<&str, u32>::new();
        let first = orchestrator.trigger("A").unwrap();
        let _second = orchestrator.trigger("B").unwrap();

        assert!(!orchestrator.resolve(first, Err(server_error())));
        assert!(orchestrator.state().is_loading());
    }

    #[test]
    fn test_refresh_supersedes_in_flight_group() {
        let mut orchestrator = FetchOrchestrator::<&str, u32>::new();
        assert!(orchestrator.refresh().is_none());

        let first = orchestrator.trigger("A").unwrap();
        orchestrator.resolve(first, Err(server_error()));

        let retry = orchestrator.refresh().unwrap();
        assert_eq!(retry.key(), &"A");
        assert!(orchestrator.state().is_loading());
        orchestrator.resolve(retry, Ok(3));
        assert_eq!(orchestrator.state(), &FetchState::Ready(3));
    }

    #[tokio::test]
    async fn test_slow_stale_group_never_overwrites_newer_group() {
        let orchestrator = RefCell::new(FetchOrchestrator::<&str, u32>::new());
        let (tx_a, rx_a) = oneshot::channel::<u32>();
        let (tx_b, rx_b) = oneshot::channel::<u32>();

        let ticket_a = orchestrator.borrow_mut().trigger("A").unwrap();
        let ticket_b = orchestrator.borrow_mut().trigger("B").unwrap();

        let group_a = async {
            let value = rx_a.await.unwrap();
            orchestrator.borrow_mut().resolve(ticket_a, Ok(value))
        };
        let group_b = async {
            let value = rx_b.await.unwrap();
            orchestrator.borrow_mut().resolve(ticket_b, Ok(value))
        };
        // B answers first, A straggles in afterwards.
        let network = async {
            tx_b.send(20).unwrap();
            tokio::task::yield_now().await;
            tx_a.send(10).unwrap();
        };

        let (applied_a, applied_b, ()) = tokio::join!(group_a, group_b, network);

        assert!(!applied_a);
        assert!(applied_b);
        assert_eq!(orchestrator.borrow().state(), &FetchState::Ready(20));
    }

    #[tokio::test]
    async fn test_concurrent_group_fails_as_a_whole() {
        let mut orchestrator = FetchOrchestrator::<u8, (u32, u32)>::new();

        let state = orchestrator
            .run(1, |_| async {
                let stats = async { Ok::<u32, FetchError>(5) };
                let daily = async { Err::<u32, FetchError>(server_error()) };
                tokio::try_join!(stats, daily)
            })
            .await;

        assert_eq!(state, &FetchState::Failed(server_error()));
    }

    #[tokio::test]
    async fn test_run_skips_unchanged_key() {
        let mut orchestrator = FetchOrchestrator::<u8, u32>::new();
        orchestrator.run(1, |_| async { Ok::<u32, FetchError>(1) }).await;

        let mut calls = 0;
        let state = orchestrator
            .run(1, |_| {
                calls += 1;
                async { Ok::<u32, FetchError>(2) }
            })
            .await
            .clone();
        assert_eq!(calls, 0);
        assert_eq!(state, FetchState::Ready(1));
    }
}
