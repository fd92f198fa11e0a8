//! Subscription contract shared by all channel implementations.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::error::RealtimeError;
use crate::job::JobUpdateEvent;

/// Project-changed event delivered on the project updates channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectUpdateEvent {
    pub user_id: String,
    pub updated_at: DateTime<Utc>,
}

/// Delivers job update events for a single job id until unsubscribed.
///
/// At most one live subscription per job id; subscribing again while a
/// prior subscription is live is rejected with
/// [`RealtimeError::AlreadySubscribed`].
pub trait JobUpdates: Send + Sync {
    fn subscribe_job(&self, job_id: &str) -> Result<JobSubscription, RealtimeError>;
}

/// Delivers project-changed events for a user id until unsubscribed.
pub trait ProjectUpdates: Send + Sync {
    fn subscribe_project(&self, user_id: &str) -> Result<ProjectSubscription, RealtimeError>;
}

pub type JobSubscription = Subscription<JobUpdateEvent>;
pub type ProjectSubscription = Subscription<ProjectUpdateEvent>;

type Cleanup = Box<dyn FnOnce() + Send>;

/// Cancellation handle for a subscription. Cloneable so the consumer can
/// keep one while the event stream is pumped elsewhere.
#[derive(Clone)]
pub struct SubscriptionHandle {
    cancelled: Arc<AtomicBool>,
    cleanup: Arc<Mutex<Option<Cleanup>>>,
}

impl SubscriptionHandle {
    fn new(cancelled: Arc<AtomicBool>, cleanup: Cleanup) -> Self {
        Self {
            cancelled,
            cleanup: Arc::new(Mutex::new(Some(cleanup))),
        }
    }

    /// Permanently stops delivery and releases the underlying producer
    /// task. Idempotent: every call after the first is a no-op.
    pub fn unsubscribe(&self) {
        if self.cancelled.swap(true, Ordering::AcqRel) {
            return;
        }
        let cleanup = match self.cleanup.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        if let Some(f) = cleanup {
            f();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// True when this handle was built around the given cancellation flag.
    /// Lets a producer identify its own bookkeeping entry without racing a
    /// replacement subscription that re-used the key.
    pub fn shares_flag(&self, flag: &Arc<AtomicBool>) -> bool {
        Arc::ptr_eq(&self.cancelled, flag)
    }
}

/// A live subscription: an event receiver plus its cancellation handle.
pub struct Subscription<T> {
    topic: String,
    receiver: mpsc::UnboundedReceiver<T>,
    handle: SubscriptionHandle,
}

impl<T> Subscription<T> {
    /// Builds a subscription from its parts. The producer keeps a clone of
    /// `cancelled` so it can observe cancellation and identify its own
    /// bookkeeping entries; `cleanup` runs exactly once, on the first
    /// `unsubscribe` call.
    pub fn new(
        topic: &str,
        receiver: mpsc::UnboundedReceiver<T>,
        cancelled: Arc<AtomicBool>,
        cleanup: Cleanup,
    ) -> Self {
        Self {
            topic: topic.to_string(),
            receiver,
            handle: SubscriptionHandle::new(cancelled, cleanup),
        }
    }

    /// The job id (or user id) this subscription is keyed by.
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Receives the next event. Returns `None` once the producer is done
    /// or the subscription has been cancelled.
    pub async fn recv(&mut self) -> Option<T> {
        if self.handle.is_cancelled() {
            // Drain nothing after cancellation: delivery stops permanently.
            return None;
        }
        self.receiver.recv().await
    }

    /// Non-blocking receive for polling consumers.
    pub fn try_recv(&mut self) -> Option<T> {
        if self.handle.is_cancelled() {
            return None;
        }
        self.receiver.try_recv().ok()
    }

    pub fn handle(&self) -> SubscriptionHandle {
        self.handle.clone()
    }

    pub fn unsubscribe(&self) {
        self.handle.unsubscribe();
    }

    pub fn is_cancelled(&self) -> bool {
        self.handle.is_cancelled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn subscription_with_counter() -> (Subscription<u32>, mpsc::UnboundedSender<u32>, Arc<AtomicUsize>)
    {
        let (tx, rx) = mpsc::unbounded_channel();
        let cleanups = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&cleanups);
        let sub = Subscription::new(
            "job-1",
            rx,
            Arc::new(AtomicBool::new(false)),
            Box::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        );
        (sub, tx, cleanups)
    }

    #[tokio::test]
    async fn test_recv_delivers_events() {
        let (mut sub, tx, _) = subscription_with_counter();
        tx.send(1).unwrap();
        tx.send(2).unwrap();

        assert_eq!(sub.recv().await, Some(1));
        assert_eq!(sub.recv().await, Some(2));
        assert_eq!(sub.topic(), "job-1");
    }

    #[tokio::test]
    async fn test_unsubscribe_is_idempotent() {
        let (sub, _tx, cleanups) = subscription_with_counter();

        sub.unsubscribe();
        sub.unsubscribe();
        sub.unsubscribe();

        // Cleanup ran exactly once
        assert_eq!(cleanups.load(Ordering::SeqCst), 1);
        assert!(sub.is_cancelled());
    }

    #[tokio::test]
    async fn test_no_delivery_after_unsubscribe() {
        let (mut sub, tx, _) = subscription_with_counter();
        tx.send(1).unwrap();
        sub.unsubscribe();
        tx.send(2).unwrap();

        assert_eq!(sub.recv().await, None);
        assert_eq!(sub.try_recv(), None);
    }

    #[tokio::test]
    async fn test_handle_shared_cancellation() {
        let (sub, _tx, cleanups) = subscription_with_counter();
        let handle = sub.handle();

        handle.unsubscribe();
        assert!(sub.is_cancelled());

        sub.unsubscribe();
        assert_eq!(cleanups.load(Ordering::SeqCst), 1);
    }
}
