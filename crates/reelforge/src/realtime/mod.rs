//! Realtime update channels.
//!
//! Delivers asynchronous status/progress events for a specific job (and
//! project-changed events for a user) until unsubscribed. The traits are
//! the substitution seam: the mock here is interval-driven, a real backend
//! implementation would hold a streaming subscription behind the same
//! contract.

pub mod channel;
pub mod mock;

pub use channel::{
    JobSubscription, JobUpdates, ProjectSubscription, ProjectUpdateEvent, ProjectUpdates,
    Subscription, SubscriptionHandle,
};
pub use mock::MockRealtime;
