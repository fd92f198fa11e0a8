//! Application store: the single source of truth for the wizard client.
//!
//! Selectors hand out cloned snapshots; mutations happen behind one
//! `RwLock` so no consumer ever observes a partially-applied change. Async
//! operations call collaborators without holding the lock, return a
//! boolean success indicator, and convert every failure into an error
//! notification rather than propagating it.

pub mod notifications;
pub mod state;

pub use notifications::{Notification, NotificationKind};
pub use state::{AppState, ProcessingState, UiState};

use std::sync::{Arc, Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use crate::backend::{
    AuthGateway, MockAuth, MockObjectStore, MockVideoGateway, ObjectStore, VideoGateway,
};
use crate::config::Config;
use crate::db::{snapshot_repo, Database};
use crate::error::ValidationError;
use crate::job::{
    FallbackDriver, JobStatus, JobUpdateEvent, ProcessingJob, ProcessingStep, StepTracker,
};
use crate::model::{
    CurrentProject, GeneratedVideo, GenerationRequest, PhotoSource, SubtitleConfig, SubtitleItem,
    UploadedPhoto, User, UserUpdate, VideoSettings,
};
use crate::realtime::{JobSubscription, JobUpdates, MockRealtime, SubscriptionHandle};

pub struct AppStore {
    config: Config,
    state: RwLock<AppState>,
    auth: Arc<dyn AuthGateway>,
    objects: Arc<dyn ObjectStore>,
    video: Arc<dyn VideoGateway>,
    realtime: Arc<dyn JobUpdates>,
    /// Database handle (clone is cheap — inner `Arc`).
    db: RwLock<Option<Database>>,
    /// Cancellation handle for the live job subscription, if any.
    job_subscription: Mutex<Option<SubscriptionHandle>>,
    /// Step display shared with the fallback driver.
    steps: Arc<Mutex<StepTracker>>,
    fallback: Mutex<Option<FallbackDriver>>,
}

impl AppStore {
    pub fn new(
        config: Config,
        auth: Arc<dyn AuthGateway>,
        objects: Arc<dyn ObjectStore>,
        video: Arc<dyn VideoGateway>,
        realtime: Arc<dyn JobUpdates>,
    ) -> Self {
        let steps = Arc::new(Mutex::new(StepTracker::new(&config.steps)));
        Self {
            config,
            state: RwLock::new(AppState::default()),
            auth,
            objects,
            video,
            realtime,
            db: RwLock::new(None),
            job_subscription: Mutex::new(None),
            steps,
            fallback: Mutex::new(None),
        }
    }

    /// Store wired to the in-memory mock collaborators, matching the
    /// snapshot's mock mode.
    pub fn with_mocks(config: Config) -> Self {
        let realtime = Arc::new(MockRealtime::from_config(&config.channel));
        Self::new(
            config,
            Arc::new(MockAuth::new()),
            Arc::new(MockObjectStore::new()),
            Arc::new(MockVideoGateway::new()),
            realtime,
        )
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    // ─── Lock helpers ───────────────────────────────────────────────────────

    fn state_read(&self) -> RwLockReadGuard<'_, AppState> {
        match self.state.read() {
            Ok(guard) => guard,
            Err(poisoned) => {
                log::warn!("App state lock was poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }

    fn state_write(&self) -> RwLockWriteGuard<'_, AppState> {
        match self.state.write() {
            Ok(guard) => guard,
            Err(poisoned) => {
                log::warn!("App state lock was poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }

    fn steps_lock(&self) -> MutexGuard<'_, StepTracker> {
        match self.steps.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                log::warn!("Step tracker lock was poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }

    // ─── Persistence ────────────────────────────────────────────────────────

    /// Sets the database used for best-effort snapshot persistence.
    pub fn set_database(&self, db: Database) {
        let mut guard = match self.db.write() {
            Ok(g) => g,
            Err(poisoned) => {
                log::warn!("Store DB lock was poisoned, recovering");
                poisoned.into_inner()
            }
        };
        *guard = Some(db);
    }

    fn get_database(&self) -> Option<Database> {
        let guard = match self.db.read() {
            Ok(g) => g,
            Err(poisoned) => {
                log::warn!("Store DB lock was poisoned, recovering");
                poisoned.into_inner()
            }
        };
        guard.clone()
    }

    /// Restores the persisted state subset (user, current project, videos)
    /// on startup. Missing or unreadable snapshots are skipped.
    pub fn load_persisted(&self) {
        let db = match self.get_database() {
            Some(db) => db,
            None => return,
        };

        let mut loaded = 0;
        match snapshot_repo::get_typed::<User>(&db, snapshot_repo::KEY_USER) {
            Ok(Some(user)) => {
                self.state_write().user = Some(user);
                loaded += 1;
            }
            Ok(None) => {}
            Err(e) => log::error!("Failed to load user snapshot: {}", e),
        }
        match snapshot_repo::get_typed::<CurrentProject>(&db, snapshot_repo::KEY_PROJECT) {
            Ok(Some(project)) => {
                self.state_write().current_project = Some(project);
                loaded += 1;
            }
            Ok(None) => {}
            Err(e) => log::error!("Failed to load project snapshot: {}", e),
        }
        match snapshot_repo::get_typed::<Vec<GeneratedVideo>>(&db, snapshot_repo::KEY_VIDEOS) {
            Ok(Some(videos)) => {
                self.state_write().videos = videos;
                loaded += 1;
            }
            Ok(None) => {}
            Err(e) => log::error!("Failed to load videos snapshot: {}", e),
        }

        log::info!("Restored {} persisted snapshot(s)", loaded);
    }

    fn persist_user(&self) {
        let db = match self.get_database() {
            Some(db) => db,
            None => return,
        };
        let user = self.state_read().user.clone();
        let result = match &user {
            Some(user) => snapshot_repo::put_typed(&db, snapshot_repo::KEY_USER, user),
            None => snapshot_repo::delete(&db, snapshot_repo::KEY_USER),
        };
        if let Err(e) = result {
            log::error!("Failed to persist user snapshot: {}", e);
        }
    }

    fn persist_project(&self) {
        let db = match self.get_database() {
            Some(db) => db,
            None => return,
        };
        let project = self.state_read().current_project.clone();
        let result = match &project {
            Some(project) => snapshot_repo::put_typed(&db, snapshot_repo::KEY_PROJECT, project),
            None => snapshot_repo::delete(&db, snapshot_repo::KEY_PROJECT),
        };
        if let Err(e) = result {
            log::error!("Failed to persist project snapshot: {}", e);
        }
    }

    fn persist_videos(&self) {
        let db = match self.get_database() {
            Some(db) => db,
            None => return,
        };
        let videos = self.state_read().videos.clone();
        if let Err(e) = snapshot_repo::put_typed(&db, snapshot_repo::KEY_VIDEOS, &videos) {
            log::error!("Failed to persist videos snapshot: {}", e);
        }
    }

    // ─── Notifications & UI state ───────────────────────────────────────────

    /// Appends a notification and returns its assigned id.
    pub fn add_notification(&self, kind: NotificationKind, title: &str, message: &str) -> String {
        self.push_notification(Notification::new(kind, title, message))
    }

    /// Appends a notification that an external timer may auto-dismiss
    /// after `duration_ms`.
    pub fn add_timed_notification(
        &self,
        kind: NotificationKind,
        title: &str,
        message: &str,
        duration_ms: u64,
    ) -> String {
        self.push_notification(Notification::new(kind, title, message).with_duration(duration_ms))
    }

    fn push_notification(&self, notification: Notification) -> String {
        let id = notification.id.clone();
        self.state_write().ui.notifications.push(notification);
        id
    }

    pub fn remove_notification(&self, notification_id: &str) {
        self.state_write()
            .ui
            .notifications
            .retain(|n| n.id != notification_id);
    }

    pub fn clear_notifications(&self) {
        self.state_write().ui.notifications.clear();
    }

    pub fn set_loading(&self, loading: bool) {
        self.state_write().ui.loading = loading;
    }

    pub fn set_error(&self, error: Option<String>) {
        self.state_write().ui.error = error;
    }

    // ─── Auth ───────────────────────────────────────────────────────────────

    pub async fn login(&self, email: &str, password: &str) -> bool {
        match self.auth.sign_in(email, password).await {
            Ok(user) => {
                self.state_write().user = Some(user);
                self.persist_user();
                true
            }
            Err(e) => {
                self.add_notification(NotificationKind::Error, "Sign-in failed", &e.to_string());
                false
            }
        }
    }

    pub async fn register(
        &self,
        email: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> bool {
        match self.auth.sign_up(email, password, display_name).await {
            Ok(_) => {
                self.add_notification(
                    NotificationKind::Success,
                    "Registration successful",
                    "Check your inbox to verify your account",
                );
                true
            }
            Err(e) => {
                self.add_notification(
                    NotificationKind::Error,
                    "Registration failed",
                    &e.to_string(),
                );
                false
            }
        }
    }

    /// Signs out and clears user, project, processing state, and videos.
    pub async fn logout(&self) {
        if let Err(e) = self.auth.sign_out().await {
            log::warn!("Sign-out reported an error: {}", e);
        }
        self.reset_session_state();
    }

    /// Applied on an external signed-out event as well as explicit logout.
    pub fn reset_session_state(&self) {
        self.release_job_subscription();
        self.stop_fallback();
        {
            let mut state = self.state_write();
            state.user = None;
            state.current_project = None;
            state.processing = ProcessingState::default();
            state.videos.clear();
        }
        self.persist_user();
        self.persist_project();
        self.persist_videos();
    }

    pub async fn check_auth(&self) {
        match self.auth.current_user().await {
            Ok(Some(user)) => {
                self.state_write().user = Some(user);
                self.persist_user();
            }
            Ok(None) => {}
            Err(e) => log::warn!("Auth check failed: {}", e),
        }
    }

    pub async fn update_profile(&self, updates: &UserUpdate) -> bool {
        match self.auth.update_user(updates).await {
            Ok(user) => {
                self.state_write().user = Some(user);
                self.persist_user();
                self.add_notification(
                    NotificationKind::Success,
                    "Profile updated",
                    "Your profile has been saved",
                );
                true
            }
            Err(e) => {
                self.add_notification(NotificationKind::Error, "Update failed", &e.to_string());
                false
            }
        }
    }

    // ─── Project mutations ──────────────────────────────────────────────────

    fn default_project(&self) -> CurrentProject {
        CurrentProject {
            settings: self.config.defaults.clone(),
            ..CurrentProject::default()
        }
    }

    fn with_project<F>(&self, f: F)
    where
        F: FnOnce(&mut CurrentProject),
    {
        {
            let default = self.default_project();
            let mut state = self.state_write();
            let project = state.current_project.get_or_insert(default);
            f(project);
        }
        self.persist_project();
    }

    pub fn set_photos(&self, photos: Vec<UploadedPhoto>) {
        self.with_project(|p| p.photos = photos);
    }

    pub fn add_photo(&self, photo: UploadedPhoto) {
        self.with_project(|p| p.add_photo(photo));
    }

    pub fn remove_photo(&self, photo_id: &str) {
        self.with_project(|p| p.remove_photo(photo_id));
    }

    pub fn set_prompt(&self, prompt: &str) {
        self.with_project(|p| p.prompt = prompt.to_string());
    }

    pub fn set_subtitles(&self, subtitles: SubtitleConfig) {
        self.with_project(|p| p.subtitles = subtitles);
    }

    pub fn set_video_settings(&self, settings: VideoSettings) {
        self.with_project(|p| p.settings = settings);
    }

    pub fn add_subtitle(&self, item: SubtitleItem) {
        self.with_project(|p| p.add_subtitle(item));
    }

    pub fn update_subtitle(&self, id: &str, text: &str, start_secs: f64, end_secs: f64) {
        self.with_project(|p| p.update_subtitle(id, text, start_secs, end_secs));
    }

    pub fn remove_subtitle(&self, id: &str) {
        self.with_project(|p| p.remove_subtitle(id));
    }

    /// Applies an arbitrary edit to the current project, creating one with
    /// the configured defaults if none exists yet.
    pub fn update_project<F>(&self, f: F)
    where
        F: FnOnce(&mut CurrentProject),
    {
        self.with_project(f);
    }

    pub fn clear_project(&self) {
        self.state_write().current_project = None;
        self.persist_project();
    }

    // ─── Photo upload ───────────────────────────────────────────────────────

    fn validate_upload(&self, sources: &[PhotoSource]) -> Result<(), ValidationError> {
        let limits = &self.config.upload;

        if sources.is_empty() {
            return Err(ValidationError::NoPhotos);
        }
        if sources.len() > limits.max_files {
            return Err(ValidationError::TooManyPhotos {
                count: sources.len(),
                max: limits.max_files,
            });
        }
        for source in sources {
            if source.size > limits.max_file_bytes {
                return Err(ValidationError::FileTooLarge {
                    name: source.name.clone(),
                    size: source.size,
                    max: limits.max_file_bytes,
                });
            }
            let mime_type = source
                .effective_mime_type()
                .unwrap_or_else(|| "unknown".to_string());
            if !limits.allowed_types.contains(&mime_type) {
                return Err(ValidationError::UnsupportedFileType {
                    name: source.name.clone(),
                    mime_type,
                });
            }
        }
        Ok(())
    }

    /// Uploads the given photos through the object store and appends them
    /// to the current project.
    pub async fn upload_photos(&self, sources: &[PhotoSource]) -> bool {
        let user = match self.state_read().user.clone() {
            Some(user) => user,
            None => {
                self.add_notification(NotificationKind::Error, "Upload failed", "Not signed in");
                return false;
            }
        };

        if let Err(e) = self.validate_upload(sources) {
            self.add_notification(NotificationKind::Warning, "Upload rejected", &e.to_string());
            return false;
        }

        let mut photos = Vec::with_capacity(sources.len());
        for source in sources {
            match self.objects.upload_photo(&user.id, source).await {
                Ok(stored) => photos.push(UploadedPhoto::new(source, &stored.public_url)),
                Err(e) => {
                    self.add_notification(
                        NotificationKind::Error,
                        "Upload failed",
                        &e.to_string(),
                    );
                    return false;
                }
            }
        }

        let count = photos.len();
        self.with_project(move |p| {
            for photo in photos {
                p.add_photo(photo);
            }
        });

        self.add_timed_notification(
            NotificationKind::Success,
            "Upload complete",
            &format!("Uploaded {} photo(s)", count),
            5000,
        );
        true
    }

    // ─── Video generation ───────────────────────────────────────────────────

    fn validate_project(&self, project: &CurrentProject) -> Result<(), ValidationError> {
        if project.photos.is_empty() {
            return Err(ValidationError::NoPhotos);
        }
        if project.prompt.trim().is_empty() {
            return Err(ValidationError::EmptyPrompt);
        }
        let max = self.config.prompt.max_chars;
        if project.prompt.chars().count() > max {
            return Err(ValidationError::PromptTooLong { max });
        }
        Ok(())
    }

    /// Submits the current project for generation. On success the returned
    /// job occupies the current-job slot and a channel subscription keyed
    /// by its id feeds updates back into the store. On any failure the job
    /// slot is left untouched.
    pub async fn start_generation(self: Arc<Self>) -> bool {
        let (user, project) = {
            let state = self.state_read();
            (state.user.clone(), state.current_project.clone())
        };
        let (user, project) = match (user, project) {
            (Some(user), Some(project)) => (user, project),
            (None, _) => {
                self.add_notification(
                    NotificationKind::Error,
                    "Generation failed",
                    &ValidationError::NotAuthenticated.to_string(),
                );
                return false;
            }
            (_, None) => {
                self.add_notification(
                    NotificationKind::Error,
                    "Generation failed",
                    &ValidationError::MissingProject.to_string(),
                );
                return false;
            }
        };

        if let Err(e) = self.validate_project(&project) {
            self.add_notification(
                NotificationKind::Warning,
                "Generation rejected",
                &e.to_string(),
            );
            return false;
        }

        let request = GenerationRequest::new(&user, &project);
        let job = match self.video.generate(&request).await {
            Ok(job) => job,
            Err(e) => {
                self.add_notification(
                    NotificationKind::Error,
                    "Generation failed",
                    &e.to_string(),
                );
                return false;
            }
        };

        // Open the channel before touching the job slot so a rejected
        // subscription leaves the store unchanged.
        let subscription = match self.realtime.subscribe_job(&job.id) {
            Ok(subscription) => subscription,
            Err(e) => {
                log::error!("Job subscription rejected for {}: {}", job.id, e);
                self.add_notification(
                    NotificationKind::Error,
                    "Generation failed",
                    &e.to_string(),
                );
                return false;
            }
        };

        self.stop_fallback();
        self.release_job_subscription();
        {
            let mut state = self.state_write();
            state.processing.current_job = Some(job);
        }
        {
            let mut guard = match self.job_subscription.lock() {
                Ok(g) => g,
                Err(poisoned) => poisoned.into_inner(),
            };
            *guard = Some(subscription.handle());
        }

        self.add_notification(
            NotificationKind::Success,
            "Video generation started",
            "Your video is being generated, hang tight",
        );

        Self::spawn_update_pump(Arc::clone(&self), subscription);
        true
    }

    /// Consumes the subscription's event stream, applying each event to
    /// the store until a terminal state arrives.
    fn spawn_update_pump(store: Arc<Self>, mut subscription: JobSubscription) {
        tokio::spawn(async move {
            while let Some(event) = subscription.recv().await {
                let terminal = event.status.is_terminal();
                store.apply_job_update(&event);
                if terminal {
                    break;
                }
            }
            subscription.unsubscribe();
        });
    }

    /// Applies a channel event to the current job. Events for any other
    /// job id are ignored. A terminal transition emits exactly one
    /// notification; duplicate terminal events are idempotent.
    pub fn apply_job_update(&self, event: &JobUpdateEvent) {
        let applied = {
            let mut state = self.state_write();
            match state.processing.current_job.as_mut() {
                Some(job) if job.id == event.job_id => {
                    let was_terminal = job.is_finished();
                    job.apply_update(event);
                    Some((job.status, job.progress, was_terminal))
                }
                _ => None,
            }
        };

        let (status, progress, was_terminal) = match applied {
            Some(applied) => applied,
            None => {
                log::debug!("Ignoring update for unknown job {}", event.job_id);
                return;
            }
        };

        self.steps_lock().sync_from_progress(progress);

        if was_terminal {
            return;
        }
        match status {
            JobStatus::Completed => {
                self.add_notification(
                    NotificationKind::Success,
                    "Video ready",
                    "Your video was generated successfully and is ready to preview",
                );
            }
            JobStatus::Failed => {
                let message = event
                    .error
                    .clone()
                    .unwrap_or_else(|| "An error occurred during generation".to_string());
                self.add_notification(NotificationKind::Error, "Video generation failed", &message);
            }
            _ => {}
        }
    }

    /// Resets step progress (upload stays complete) and resubmits the
    /// current project.
    pub async fn retry_generation(self: Arc<Self>) -> bool {
        self.steps_lock().reset_for_retry();
        self.start_generation().await
    }

    /// Moves a terminal current job into the history and frees the slot.
    /// Returns false when there is no job or it is still live.
    pub fn archive_current_job(&self) -> bool {
        let archived = {
            let mut state = self.state_write();
            let terminal = state
                .processing
                .current_job
                .as_ref()
                .is_some_and(|j| j.is_finished());
            if !terminal {
                false
            } else if let Some(job) = state.processing.current_job.take() {
                state.processing.history.insert(0, job);
                true
            } else {
                false
            }
        };

        if archived {
            self.release_job_subscription();
        }
        archived
    }

    /// Prepends a job to the history. History is additive only.
    pub fn add_job_to_history(&self, job: ProcessingJob) {
        self.state_write().processing.history.insert(0, job);
    }

    fn release_job_subscription(&self) {
        let handle = {
            let mut guard = match self.job_subscription.lock() {
                Ok(g) => g,
                Err(poisoned) => poisoned.into_inner(),
            };
            guard.take()
        };
        if let Some(handle) = handle {
            handle.unsubscribe();
        }
    }

    // ─── Fallback progress ──────────────────────────────────────────────────

    /// Starts the simulated step driver. Refused while a real job occupies
    /// the current-job slot or a driver is already running.
    pub fn start_fallback(&self) -> bool {
        if self.state_read().processing.current_job.is_some() {
            return false;
        }
        let mut guard = match self.fallback.lock() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        if guard.as_ref().is_some_and(|d| !d.is_stopped()) {
            return false;
        }
        let driver = FallbackDriver::spawn(
            Arc::clone(&self.steps),
            Duration::from_millis(self.config.channel.fallback_tick_ms),
        );
        *guard = Some(driver);
        true
    }

    pub fn stop_fallback(&self) {
        let driver = {
            let mut guard = match self.fallback.lock() {
                Ok(g) => g,
                Err(poisoned) => poisoned.into_inner(),
            };
            guard.take()
        };
        if let Some(driver) = driver {
            driver.stop();
        }
    }

    // ─── Videos ─────────────────────────────────────────────────────────────

    pub fn add_video(&self, video: GeneratedVideo) {
        self.state_write().videos.insert(0, video);
        self.persist_videos();
    }

    pub fn remove_video(&self, video_id: &str) {
        self.state_write().videos.retain(|v| v.id != video_id);
        self.persist_videos();
    }

    pub fn set_videos(&self, videos: Vec<GeneratedVideo>) {
        self.state_write().videos = videos;
        self.persist_videos();
    }

    pub async fn load_videos(&self) -> bool {
        let user = match self.state_read().user.clone() {
            Some(user) => user,
            None => {
                log::debug!("load_videos: no signed-in user");
                return false;
            }
        };
        match self.video.list_videos(&user.id).await {
            Ok(videos) => {
                self.set_videos(videos);
                true
            }
            Err(e) => {
                self.add_notification(
                    NotificationKind::Error,
                    "Could not load videos",
                    &e.to_string(),
                );
                false
            }
        }
    }

    pub async fn download_video(&self, video_id: &str, quality: &str) -> bool {
        match self.video.download(video_id, quality).await {
            Ok(link) => {
                log::debug!("Download link issued: {}", link.download_url);
                self.add_timed_notification(
                    NotificationKind::Success,
                    "Download started",
                    "Your video download has begun",
                    5000,
                );
                true
            }
            Err(e) => {
                self.add_notification(NotificationKind::Error, "Download failed", &e.to_string());
                false
            }
        }
    }

    // ─── Selectors ──────────────────────────────────────────────────────────

    pub fn user(&self) -> Option<User> {
        self.state_read().user.clone()
    }

    pub fn current_project(&self) -> Option<CurrentProject> {
        self.state_read().current_project.clone()
    }

    pub fn photos(&self) -> Vec<UploadedPhoto> {
        self.state_read()
            .current_project
            .as_ref()
            .map(|p| p.photos.clone())
            .unwrap_or_default()
    }

    pub fn prompt(&self) -> String {
        self.state_read()
            .current_project
            .as_ref()
            .map(|p| p.prompt.clone())
            .unwrap_or_default()
    }

    pub fn subtitles(&self) -> SubtitleConfig {
        self.state_read()
            .current_project
            .as_ref()
            .map(|p| p.subtitles.clone())
            .unwrap_or_default()
    }

    pub fn video_settings(&self) -> VideoSettings {
        self.state_read()
            .current_project
            .as_ref()
            .map(|p| p.settings.clone())
            .unwrap_or_else(|| self.config.defaults.clone())
    }

    pub fn current_job(&self) -> Option<ProcessingJob> {
        self.state_read().processing.current_job.clone()
    }

    pub fn job_history(&self) -> Vec<ProcessingJob> {
        self.state_read().processing.history.clone()
    }

    pub fn videos(&self) -> Vec<GeneratedVideo> {
        self.state_read().videos.clone()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.state_read().ui.notifications.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state_read().ui.loading
    }

    pub fn error(&self) -> Option<String> {
        self.state_read().ui.error.clone()
    }

    pub fn steps(&self) -> Vec<ProcessingStep> {
        self.steps_lock().steps().to_vec()
    }

    /// Overall progress: the real job's percentage when one is attached,
    /// the step-tracker mean otherwise.
    pub fn progress(&self) -> u8 {
        if let Some(job) = self.current_job() {
            return job.progress;
        }
        self.steps_lock().overall_progress()
    }

    pub fn is_completed(&self) -> bool {
        if let Some(job) = self.current_job() {
            return job.status == JobStatus::Completed;
        }
        self.steps_lock().is_complete()
    }

    pub fn is_failed(&self) -> bool {
        if let Some(job) = self.current_job() {
            return job.status == JobStatus::Failed;
        }
        self.steps_lock().has_failed()
    }

    pub fn estimated_remaining_secs(&self) -> u64 {
        self.steps_lock().estimated_remaining_secs()
    }
}
