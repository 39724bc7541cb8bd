//! Keyed polling feeds.
//!
//! A `FeedController` keeps one remote resource fresh: it fetches immediately
//! when given a key, then again on every tick of its `PollCycle`, and on
//! demand through `refresh`. Results are committed only when they belong to
//! the current generation (bumped on every key change) and were issued after
//! the last committed result, so a slow response can never overwrite newer
//! state.

use std::fmt::Debug;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Local};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::api_client::RemoteError;

/// One kind of pollable resource.
#[async_trait]
pub trait FeedSource: Send + Sync + 'static {
    type Key: Clone + PartialEq + Debug + Send + Sync + 'static;
    type Payload: Clone + Send + Sync + 'static;

    fn name(&self) -> &'static str {
        "feed"
    }

    async fn fetch(&self, key: &Self::Key) -> Result<Self::Payload, RemoteError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedStatus {
    Idle,
    Loading,
    Ready,
    Failed,
}

#[derive(Debug, Clone)]
pub struct FeedState<K, T> {
    pub key: Option<K>,
    pub status: FeedStatus,
    /// Last good payload; kept while reloading and after failures.
    pub payload: Option<T>,
    pub error: Option<String>,
    pub generation: u64,
    pub last_updated: Option<DateTime<Local>>,
    applied_seq: u64,
}

impl<K, T> Default for FeedState<K, T> {
    fn default() -> Self {
        Self {
            key: None,
            status: FeedStatus::Idle,
            payload: None,
            error: None,
            generation: 0,
            last_updated: None,
            applied_seq: 0,
        }
    }
}

impl<K, T> FeedState<K, T> {
    pub fn is_loading(&self) -> bool {
        self.status == FeedStatus::Loading
    }
}

#[derive(Debug)]
struct Ticket<K> {
    key: K,
    generation: u64,
    seq: u64,
}

struct FeedShared<S: FeedSource> {
    source: S,
    state: watch::Sender<FeedState<S::Key, S::Payload>>,
    next_seq: AtomicU64,
}

impl<S: FeedSource> FeedShared<S> {
    /// Marks the feed as loading and hands out a ticket for one fetch.
    ///
    /// With `expected` set, nothing happens unless the feed is still on that
    /// generation.
    fn begin(&self, expected: Option<u64>) -> Option<Ticket<S::Key>> {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed) + 1;
        let mut ticket = None;
        self.state.send_if_modified(|state| {
            if expected.is_some_and(|generation| generation != state.generation) {
                return false;
            }
            let Some(key) = state.key.clone() else {
                return false;
            };
            ticket = Some(Ticket {
                key,
                generation: state.generation,
                seq,
            });
            let changed = state.status != FeedStatus::Loading || state.error.is_some();
            state.status = FeedStatus::Loading;
            state.error = None;
            changed
        });
        ticket
    }

    async fn run(&self, ticket: Ticket<S::Key>) {
        let result = self.source.fetch(&ticket.key).await;
        self.complete(ticket, result);
    }

    /// An older fetch landing while a newer one is still in flight flips the
    /// status to `Ready`/`Failed` until the newer result arrives.
    fn complete(&self, ticket: Ticket<S::Key>, result: Result<S::Payload, RemoteError>) -> bool {
        let name = self.source.name();
        if let Err(e) = &result {
            log::warn!("{} fetch for {:?} failed: {}", name, ticket.key, e);
        }

        let applied = self.state.send_if_modified(|state| {
            if state.generation != ticket.generation || ticket.seq <= state.applied_seq {
                return false;
            }
            state.applied_seq = ticket.seq;
            match result {
                Ok(payload) => {
                    state.payload = Some(payload);
                    state.error = None;
                    state.status = FeedStatus::Ready;
                    state.last_updated = Some(Local::now());
                }
                Err(e) => {
                    state.error = Some(e.to_string());
                    state.status = FeedStatus::Failed;
                }
            }
            true
        });

        if !applied {
            log::debug!(
                "{} discarded stale result for {:?} (generation {}, seq {})",
                name,
                ticket.key,
                ticket.generation,
                ticket.seq
            );
        }
        applied
    }
}

/// The recurring timer bound to one feed generation. Dropping it stops future
/// ticks; fetches already in flight still finish and go through the guard.
pub struct PollCycle {
    handle: JoinHandle<()>,
    interval: Duration,
    generation: u64,
}

impl PollCycle {
    fn start<S: FeedSource>(shared: Arc<FeedShared<S>>, generation: u64, interval: Duration) -> Self {
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                // First tick completes immediately.
                ticker.tick().await;
                let Some(ticket) = shared.begin(Some(generation)) else {
                    break;
                };
                let shared = shared.clone();
                tokio::spawn(async move {
                    shared.run(ticket).await;
                });
            }
        });

        Self {
            handle,
            interval,
            generation,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_active(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for PollCycle {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Owns one feed's state and its poll cycle.
///
/// Must be used from within a tokio runtime.
pub struct FeedController<S: FeedSource> {
    shared: Arc<FeedShared<S>>,
    interval: Duration,
    cycle: Option<PollCycle>,
}

impl<S: FeedSource> FeedController<S> {
    pub fn new(source: S, interval: Duration) -> Self {
        let (state, _) = watch::channel(FeedState::default());
        Self {
            shared: Arc::new(FeedShared {
                source,
                state,
                next_seq: AtomicU64::new(0),
            }),
            interval,
            cycle: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn key(&self) -> Option<S::Key> {
        self.shared.state.borrow().key.clone()
    }

    pub fn snapshot(&self) -> FeedState<S::Key, S::Payload> {
        self.shared.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<FeedState<S::Key, S::Payload>> {
        self.shared.state.subscribe()
    }

    pub fn is_polling(&self) -> bool {
        self.cycle.as_ref().is_some_and(PollCycle::is_active)
    }

    /// Points the feed at a new key.
    ///
    /// A different key cancels the current cycle, keeps the last payload for
    /// display, fetches immediately and starts a fresh cycle. `None` stops
    /// polling and returns the feed to `Idle`. Repeating the current key is a
    /// no-op.
    pub fn set_key(&mut self, key: Option<S::Key>) {
        let current = self.key();
        if current == key && (key.is_none() || self.cycle.is_some()) {
            return;
        }

        self.cycle = None;
        let name = self.shared.source.name();

        match key {
            None => {
                self.shared.state.send_modify(|state| {
                    state.generation += 1;
                    state.key = None;
                    state.status = FeedStatus::Idle;
                    state.payload = None;
                    state.error = None;
                    state.last_updated = None;
                });
                log::debug!("{} stopped", name);
            }
            Some(key) => {
                log::info!("{} polling {:?} every {:?}", name, key, self.interval);
                let mut generation = 0;
                self.shared.state.send_modify(|state| {
                    state.generation += 1;
                    state.key = Some(key);
                    state.status = FeedStatus::Loading;
                    state.error = None;
                    generation = state.generation;
                });
                self.cycle = Some(PollCycle::start(self.shared.clone(), generation, self.interval));
            }
        }
    }

    /// Fetches now under the current key without touching the poll cadence.
    /// Returns the state after this fetch was committed or discarded.
    pub async fn refresh(&self) -> FeedState<S::Key, S::Payload> {
        if let Some(ticket) = self.shared.begin(None) {
            self.shared.run(ticket).await;
        }
        self.snapshot()
    }

    pub fn stop(&mut self) {
        self.set_key(None);
    }
}

impl<S: FeedSource> Drop for FeedController<S> {
    fn drop(&mut self) {
        self.stop();
    }
}
