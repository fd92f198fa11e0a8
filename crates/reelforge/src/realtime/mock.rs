//! Interval-driven mock channels. Fabricates job progress and
//! project-changed events with tokio timer tasks; one producer task per
//! subscription, tracked in an arena keyed by id so a second subscribe for
//! a live id is rejected and cancellation releases the timer.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;
use rand::Rng;
use tokio::sync::mpsc;

use crate::config::ChannelConfig;
use crate::error::RealtimeError;
use crate::job::{JobStatus, JobUpdateEvent};
use crate::realtime::channel::{
    JobSubscription, JobUpdates, ProjectSubscription, ProjectUpdateEvent, ProjectUpdates,
    Subscription, SubscriptionHandle,
};

/// Per-tick progress increment range for fabricated jobs, percent.
const MIN_INCREMENT: u8 = 10;
const MAX_INCREMENT: u8 = 25;

type Arena = Arc<Mutex<HashMap<String, SubscriptionHandle>>>;

/// Mocked realtime collaborator.
pub struct MockRealtime {
    job_interval: Duration,
    project_interval: Duration,
    active_jobs: Arena,
    active_projects: Arena,
}

impl MockRealtime {
    pub fn new() -> Self {
        Self::with_intervals(Duration::from_millis(2000), Duration::from_millis(5000))
    }

    pub fn with_intervals(job_interval: Duration, project_interval: Duration) -> Self {
        Self {
            job_interval,
            project_interval,
            active_jobs: Arc::new(Mutex::new(HashMap::new())),
            active_projects: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn from_config(config: &ChannelConfig) -> Self {
        Self::with_intervals(
            Duration::from_millis(config.job_interval_ms),
            Duration::from_millis(config.project_interval_ms),
        )
    }

    /// Number of live job subscriptions.
    pub fn active_job_count(&self) -> usize {
        lock_arena(&self.active_jobs).len()
    }

    fn register(arena: &Arena, key: &str, handle: SubscriptionHandle) -> Result<(), RealtimeError> {
        let mut guard = lock_arena(arena);
        if let Some(existing) = guard.get(key) {
            if !existing.is_cancelled() {
                return Err(RealtimeError::AlreadySubscribed(key.to_string()));
            }
            guard.remove(key);
        }
        guard.insert(key.to_string(), handle);
        Ok(())
    }
}

impl Default for MockRealtime {
    fn default() -> Self {
        Self::new()
    }
}

fn lock_arena(arena: &Arena) -> std::sync::MutexGuard<'_, HashMap<String, SubscriptionHandle>> {
    match arena.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            log::warn!("Realtime arena lock was poisoned, recovering");
            poisoned.into_inner()
        }
    }
}

/// Removes the arena entry for `key`, but only when it still belongs to
/// the subscription identified by `flag`. A producer that finished never
/// evicts a fresh subscription that re-used the key in the meantime.
fn remove_own_entry(arena: &Arena, key: &str, flag: &Arc<AtomicBool>) {
    let mut guard = lock_arena(arena);
    if guard.get(key).is_some_and(|h| h.shares_flag(flag)) {
        guard.remove(key);
    }
}

impl JobUpdates for MockRealtime {
    fn subscribe_job(&self, job_id: &str) -> Result<JobSubscription, RealtimeError> {
        let (tx, rx) = mpsc::unbounded_channel();
        let cancelled = Arc::new(AtomicBool::new(false));
        let interval = self.job_interval;
        let arena = Arc::clone(&self.active_jobs);
        let flag = Arc::clone(&cancelled);
        let id = job_id.to_string();

        let task = tokio::spawn(async move {
            let mut progress: u8 = 0;
            loop {
                tokio::time::sleep(interval).await;
                if flag.load(Ordering::Acquire) {
                    break;
                }

                let increment = rand::rng().random_range(MIN_INCREMENT..=MAX_INCREMENT);
                progress = progress.saturating_add(increment).min(100);

                let event = if progress >= 100 {
                    JobUpdateEvent::completed(&id)
                } else {
                    JobUpdateEvent::new(&id, JobStatus::Processing, progress)
                };
                let terminal = event.status.is_terminal();

                if tx.send(event).is_err() {
                    // Receiver dropped; nothing left to deliver
                    break;
                }
                if terminal {
                    break;
                }
            }
            remove_own_entry(&arena, &id, &flag);
        });

        let arena = Arc::clone(&self.active_jobs);
        let key = job_id.to_string();
        let cleanup_flag = Arc::clone(&cancelled);
        let subscription = Subscription::new(
            job_id,
            rx,
            cancelled,
            Box::new(move || {
                task.abort();
                remove_own_entry(&arena, &key, &cleanup_flag);
            }),
        );

        Self::register(&self.active_jobs, job_id, subscription.handle())?;

        log::debug!("Subscribed to job updates for {}", job_id);
        Ok(subscription)
    }
}

impl ProjectUpdates for MockRealtime {
    fn subscribe_project(&self, user_id: &str) -> Result<ProjectSubscription, RealtimeError> {
        let (tx, rx) = mpsc::unbounded_channel();
        let cancelled = Arc::new(AtomicBool::new(false));
        let interval = self.project_interval;
        let arena = Arc::clone(&self.active_projects);
        let flag = Arc::clone(&cancelled);
        let id = user_id.to_string();

        let task = tokio::spawn(async move {
            loop {
                tokio::time::sleep(interval).await;
                if flag.load(Ordering::Acquire) {
                    break;
                }
                let event = ProjectUpdateEvent {
                    user_id: id.clone(),
                    updated_at: Utc::now(),
                };
                if tx.send(event).is_err() {
                    break;
                }
            }
            remove_own_entry(&arena, &id, &flag);
        });

        let arena = Arc::clone(&self.active_projects);
        let key = user_id.to_string();
        let cleanup_flag = Arc::clone(&cancelled);
        let subscription = Subscription::new(
            user_id,
            rx,
            cancelled,
            Box::new(move || {
                task.abort();
                remove_own_entry(&arena, &key, &cleanup_flag);
            }),
        );

        Self::register(&self.active_projects, user_id, subscription.handle())?;

        log::debug!("Subscribed to project updates for {}", user_id);
        Ok(subscription)
    }
}
