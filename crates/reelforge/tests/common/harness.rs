//! Test harness for isolated store execution.
//!
//! `StoreHarness` wires an `AppStore` to the mock collaborators and an
//! in-memory database, with fast channel intervals so integration tests
//! finish quickly.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use reelforge::backend::{AuthGateway, MockAuth, MockObjectStore, MockVideoGateway, VideoGateway};
use reelforge::config::Config;
use reelforge::db::Database;
use reelforge::job::JobStatus;
use reelforge::model::User;
use reelforge::realtime::{JobUpdates, MockRealtime};
use reelforge::store::{AppStore, Notification, NotificationKind};

use super::builders::ProjectBuilder;

pub struct StoreHarness {
    pub store: Arc<AppStore>,
    pub auth: Arc<MockAuth>,
    pub video: Arc<MockVideoGateway>,
    pub realtime: Arc<MockRealtime>,
    pub db: Database,
}

impl StoreHarness {
    /// Harness with default config but millisecond-scale channel cadence.
    pub fn new() -> Self {
        let mut config = Config::default();
        config.channel.job_interval_ms = 10;
        config.channel.project_interval_ms = 10;
        config.channel.fallback_tick_ms = 5;
        Self::with_config(config)
    }

    pub fn with_config(config: Config) -> Self {
        let auth = Arc::new(MockAuth::new());
        let objects = Arc::new(MockObjectStore::new());
        let video = Arc::new(MockVideoGateway::new());
        let realtime = Arc::new(MockRealtime::from_config(&config.channel));
        let db = Database::open_in_memory().expect("open in-memory DB");

        let store = Arc::new(AppStore::new(
            config,
            Arc::clone(&auth) as Arc<dyn AuthGateway>,
            objects,
            Arc::clone(&video) as Arc<dyn VideoGateway>,
            Arc::clone(&realtime) as Arc<dyn JobUpdates>,
        ));
        store.set_database(db.clone());

        Self {
            store,
            auth,
            video,
            realtime,
            db,
        }
    }

    /// Signs in the default test user.
    pub async fn sign_in(&self) -> User {
        assert!(self.store.login("tester@example.com", "secret").await);
        self.store.user().expect("user after login")
    }

    /// Signs in and installs a submittable project with `photo_count`
    /// photos.
    pub async fn seed_project(&self, photo_count: usize) -> User {
        let user = self.sign_in().await;
        let project = ProjectBuilder::new().photos(photo_count).build();
        self.store.set_photos(project.photos.clone());
        self.store.set_prompt(&project.prompt);
        user
    }

    /// Waits until the current job reaches a terminal state, or panics
    /// after `timeout`.
    pub async fn wait_for_terminal_job(&self, timeout: Duration) {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            if let Some(job) = self.store.current_job() {
                if job.is_finished() {
                    return;
                }
            }
            if tokio::time::Instant::now() >= deadline {
                panic!(
                    "Job did not reach a terminal state within {:?}: {:?}",
                    timeout,
                    self.store.current_job()
                );
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    }

    pub fn notifications_of(&self, kind: NotificationKind) -> Vec<Notification> {
        self.store
            .notifications()
            .into_iter()
            .filter(|n| n.kind == kind)
            .collect()
    }

    pub fn assert_job_status(&self, expected: JobStatus) {
        let job = self.store.current_job().expect("a current job");
        assert_eq!(job.status, expected);
    }
}

impl Default for StoreHarness {
    fn default() -> Self {
        Self::new()
    }
}
