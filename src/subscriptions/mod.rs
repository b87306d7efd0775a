//! Change-stream subscriptions.
//!
//! The store's live listeners are modelled explicitly: publishers hold a
//! [`ChangeStream`] and emit events on every write, and consumers hold a
//! [`Subscription`] that folds arriving events into a projection through a
//! reducer. Dropping the subscription tears the listener down.

use std::sync::{Arc, Mutex};

use log::warn;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

/// A single change observed on a stored collection.
#[derive(Debug, Clone, PartialEq)]
pub enum ChangeEvent<T> {
    Created(T),
    Updated(T),
    Removed(String),
}

/// Default buffer depth for change streams. A slow subscriber past this
/// depth loses the oldest events (and is told how many).
const DEFAULT_STREAM_CAPACITY: usize = 64;

/// The publishing side of a change feed. Cheap to clone into every
/// repository or service that writes the underlying collection.
#[derive(Debug, Clone)]
pub struct ChangeStream<T> {
    tx: broadcast::Sender<T>,
}

impl<T: Clone + Send + 'static> ChangeStream<T> {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_STREAM_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Opens a receiver positioned at the current end of the stream.
    pub fn subscribe(&self) -> broadcast::Receiver<T> {
        self.tx.subscribe()
    }

    /// Publishes an event to all current subscribers. Publishing with no
    /// subscribers is a no-op, not an error.
    pub fn publish(&self, event: T) {
        let _ = self.tx.send(event);
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl<T: Clone + Send + 'static> Default for ChangeStream<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A running subscription folding a change feed into a shared projection.
///
/// The driving task is aborted by [`cancel`](Subscription::cancel) and on
/// drop, so teardown is tied to the handle's scope.
pub struct Subscription<P> {
    projection: Arc<Mutex<P>>,
    task: JoinHandle<()>,
}

impl<P: Send + 'static> Subscription<P> {
    /// Spawns a task that applies `reduce` to every event arriving on `rx`.
    pub fn spawn<T, F>(mut rx: broadcast::Receiver<T>, initial: P, mut reduce: F) -> Self
    where
        T: Clone + Send + 'static,
        F: FnMut(&mut P, T) + Send + 'static,
    {
        let projection = Arc::new(Mutex::new(initial));
        let shared = projection.clone();

        let task = tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(event) => {
                        let mut guard = shared.lock().unwrap();
                        reduce(&mut guard, event);
                    }
                    Err(broadcast::error::RecvError::Lagged(missed)) => {
                        warn!("Subscription lagged behind; {} events dropped", missed);
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });

        Self { projection, task }
    }

    /// Returns a copy of the current projection.
    pub fn snapshot(&self) -> P
    where
        P: Clone,
    {
        self.projection.lock().unwrap().clone()
    }

    /// Stops consuming events. Idempotent; also happens on drop.
    pub fn cancel(&self) {
        self.task.abort();
    }

    pub fn is_cancelled(&self) -> bool {
        self.task.is_finished()
    }
}

impl<P> Drop for Subscription<P> {
    fn drop(&mut self) {
        self.task.abort();
    }
}
