//! Observable loading state for screens.
//!
//! A [`StateCell`] holds the latest [`LoadState`] of one resource and
//! publishes every change through a `tokio::sync::watch` channel. Each fetch
//! takes a [`FetchTicket`]; only the newest ticket may write its result, so a
//! slow response can never overwrite one that started later, and results
//! that resolve after [`StateCell::detach`] are dropped.

use crate::error::SpotResult;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Idle,
    Loading,
    Success(T),
    Error(String),
}

impl<T> LoadState<T> {
    pub fn from_result(result: SpotResult<T>) -> Self {
        match result {
            Ok(value) => LoadState::Success(value),
            Err(e) => LoadState::Error(e.user_message()),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            LoadState::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Error(message) => Some(message),
            _ => None,
        }
    }
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        LoadState::Idle
    }
}

/// Permission to publish the result of one fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
}

pub struct StateCell<T> {
    tx: watch::Sender<LoadState<T>>,
    generation: AtomicU64,
}

impl<T: Clone> StateCell<T> {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(LoadState::Idle);
        Self {
            tx,
            generation: AtomicU64::new(0),
        }
    }

    /// Snapshot of the current state.
    pub fn get(&self) -> LoadState<T> {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<LoadState<T>> {
        self.tx.subscribe()
    }

    /// Enters `Loading` and invalidates every earlier ticket.
    pub fn begin(&self) -> FetchTicket {
        let mut generation = 0;
        self.tx.send_modify(|state| {
            generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            *state = LoadState::Loading;
        });
        FetchTicket { generation }
    }

    /// Publishes `result` if `ticket` is still the newest. Returns whether
    /// the result was applied.
    pub fn finish(&self, ticket: FetchTicket, result: SpotResult<T>) -> bool {
        let mut result = Some(result);
        let applied = self.tx.send_if_modified(|state| {
            if self.generation.load(Ordering::SeqCst) != ticket.generation {
                return false;
            }
            match result.take() {
                Some(r) => {
                    *state = LoadState::from_result(r);
                    true
                }
                None => false,
            }
        });
        if !applied {
            debug!(generation = ticket.generation, "Dropping stale fetch result");
        }
        applied
    }

    /// Called when the observer goes away; outstanding fetches are ignored.
    pub fn detach(&self) {
        self.tx.send_if_modified(|_| {
            self.generation.fetch_add(1, Ordering::SeqCst);
            false
        });
    }

    /// Detaches and returns to `Idle`.
    pub fn reset(&self) {
        self.tx.send_modify(|state| {
            self.generation.fetch_add(1, Ordering::SeqCst);
            *state = LoadState::Idle;
        });
    }

    /// Replaces the state without a fetch, e.g. after a local edit.
    pub fn set_success(&self, value: T) {
        self.tx.send_modify(|state| {
            self.generation.fetch_add(1, Ordering::SeqCst);
            *state = LoadState::Success(value);
        });
    }

    /// Runs one fetch cycle: `Loading`, then `Success` or `Error`.
    pub async fn run<F>(&self, fetch: F) -> LoadState<T>
    where
        F: Future<Output = SpotResult<T>>,
    {
        let ticket = self.begin();
        let result = fetch.await;
        self.finish(ticket, result);
        self.get()
    }
}

impl<T: Clone> Default for StateCell<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SpotError;

    #[test]
    fn test_cycle() {
        let cell: StateCell<u32> = StateCell::new();
        assert_eq!(cell.get(), LoadState::Idle);

        let ticket = cell.begin();
        assert!(cell.get().is_loading());
        assert!(cell.finish(ticket, Ok(3)));
        assert_eq!(cell.get(), LoadState::Success(3));
    }

    #[test]
    fn test_stale_ticket_is_dropped() {
        let cell: StateCell<&'static str> = StateCell::new();
        let first = cell.begin();
        let second = cell.begin();

        assert!(cell.finish(second, Ok("new")));
        assert!(!cell.finish(first, Ok("old")));
        assert_eq!(cell.get(), LoadState::Success("new"));
    }

    #[test]
    fn test_detach_drops_late_result() {
        let cell: StateCell<u32> = StateCell::new();
        let ticket = cell.begin();
        cell.detach();
        assert!(!cell.finish(ticket, Ok(1)));
        assert!(cell.get().is_loading());
    }

    #[test]
    fn test_error_message_is_user_facing() {
        let cell: StateCell<u32> = StateCell::new();
        let ticket = cell.begin();
        cell.finish(
            ticket,
            Err(SpotError::Network {
                message: "connection refused".to_string(),
            }),
        );
        assert_eq!(
            cell.get().error(),
            Some("Network error: Unable to connect to server")
        );
    }

    #[tokio::test]
    async fn test_run_notifies_subscribers() {
        let cell: StateCell<Vec<i64>> = StateCell::new();
        let mut rx = cell.subscribe();
        let state = cell.run(async { Ok(vec![1, 2]) }).await;
        assert_eq!(state.data(), Some(&vec![1, 2]));
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), LoadState::Success(vec![1, 2]));
    }
}
