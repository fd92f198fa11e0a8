//! Authentication collaborator.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::error::BackendError;
use crate::model::{User, UserUpdate};

#[async_trait]
pub trait AuthGateway: Send + Sync {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> Result<User, BackendError>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<User, BackendError>;

    async fn sign_out(&self) -> Result<(), BackendError>;

    /// Returns the signed-in user, if any.
    async fn current_user(&self) -> Result<Option<User>, BackendError>;

    async fn update_user(&self, updates: &UserUpdate) -> Result<User, BackendError>;
}

/// In-memory auth mock fabricating user records.
pub struct MockAuth {
    session: Mutex<Option<User>>,
    failure: Mutex<Option<String>>,
}

impl MockAuth {
    pub fn new() -> Self {
        Self {
            session: Mutex::new(None),
            failure: Mutex::new(None),
        }
    }

    /// Makes every subsequent call fail with the given message, until
    /// cleared with `clear_failure`.
    pub fn set_failure(&self, message: &str) {
        *self.failure.lock().unwrap_or_else(|p| p.into_inner()) = Some(message.to_string());
    }

    pub fn clear_failure(&self) {
        *self.failure.lock().unwrap_or_else(|p| p.into_inner()) = None;
    }

    fn check_failure(&self) -> Result<(), BackendError> {
        if let Some(message) = self.failure.lock().unwrap_or_else(|p| p.into_inner()).clone() {
            return Err(BackendError::auth(message));
        }
        Ok(())
    }

    fn fabricate_user(email: &str, display_name: Option<&str>) -> User {
        let mut user = User::new(&uuid::Uuid::new_v4().to_string(), email);
        user.name = display_name.map(|n| n.to_string());
        user
    }
}

impl Default for MockAuth {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthGateway for MockAuth {
    async fn sign_up(
        &self,
        email: &str,
        _password: &str,
        display_name: Option<&str>,
    ) -> Result<User, BackendError> {
        self.check_failure()?;
        log::debug!("Mock sign-up for {}", email);
        let user = Self::fabricate_user(email, display_name);
        *self.session.lock().unwrap_or_else(|p| p.into_inner()) = Some(user.clone());
        Ok(user)
    }

    async fn sign_in(&self, email: &str, _password: &str) -> Result<User, BackendError> {
        self.check_failure()?;
        log::debug!("Mock sign-in for {}", email);
        let user = Self::fabricate_user(email, None);
        *self.session.lock().unwrap_or_else(|p| p.into_inner()) = Some(user.clone());
        Ok(user)
    }

    async fn sign_out(&self) -> Result<(), BackendError> {
        self.check_failure()?;
        *self.session.lock().unwrap_or_else(|p| p.into_inner()) = None;
        Ok(())
    }

    async fn current_user(&self) -> Result<Option<User>, BackendError> {
        self.check_failure()?;
        Ok(self.session.lock().unwrap_or_else(|p| p.into_inner()).clone())
    }

    async fn update_user(&self, updates: &UserUpdate) -> Result<User, BackendError> {
        self.check_failure()?;
        let mut guard = self.session.lock().unwrap_or_else(|p| p.into_inner());
        let user = guard
            .as_mut()
            .ok_or_else(|| BackendError::auth("Not signed in"))?;

        if let Some(ref name) = updates.name {
            user.name = Some(name.clone());
        }
        if let Some(ref avatar) = updates.avatar {
            user.avatar = Some(avatar.clone());
        }
        user.updated_at = Utc::now();
        Ok(user.clone())
    }
}
