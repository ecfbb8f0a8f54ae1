//! Registration, sign-in and profile editing.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::{ProfileDraft, RegistrationDraft, User, Viewer};
use crate::error::DomainError;
use crate::policy::require_authenticated;
use crate::ports::{PasswordService, Repositories};

#[derive(Clone)]
pub struct AccountService {
    repos: Repositories,
    passwords: Arc<dyn PasswordService>,
}

impl AccountService {
    pub fn new(repos: Repositories, passwords: Arc<dyn PasswordService>) -> Self {
        Self { repos, passwords }
    }

    pub async fn register(
        &self,
        draft: RegistrationDraft,
        now: DateTime<Utc>,
    ) -> Result<User, DomainError> {
        draft.validate()?;
        self.ensure_username_free(&draft.username, None).await?;

        let password_hash = self
            .passwords
            .hash(&draft.password)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let mut user = User::new(draft.username, draft.email, password_hash);
        user.created_at = now;
        let user = self.repos.users.save(user).await?;

        tracing::info!(user_id = %user.id, "user registered");
        Ok(user)
    }

    /// Check credentials. `None` for an unknown user or a wrong password alike.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, DomainError> {
        let Some(user) = self.repos.users.find_by_username(username).await? else {
            return Ok(None);
        };

        let valid = self
            .passwords
            .verify(password, &user.password_hash)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        Ok(valid.then_some(user))
    }

    /// The signed-in user, for the profile form.
    pub async fn current_user(&self, viewer: &Viewer) -> Result<User, DomainError> {
        let user_id = require_authenticated(viewer)?;
        self.repos
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::AuthenticationRequired)
    }

    pub async fn edit_profile(
        &self,
        viewer: &Viewer,
        draft: ProfileDraft,
    ) -> Result<User, DomainError> {
        let mut user = self.current_user(viewer).await?;
        draft.validate()?;
        self.ensure_username_free(&draft.username, Some(&user)).await?;

        user.username = draft.username;
        user.email = draft.email;
        user.first_name = draft.first_name;
        user.last_name = draft.last_name;

        let user = self.repos.users.save(user).await?;
        tracing::info!(user_id = %user.id, "profile updated");
        Ok(user)
    }

    async fn ensure_username_free(
        &self,
        username: &str,
        current: Option<&User>,
    ) -> Result<(), DomainError> {
        match self.repos.users.find_by_username(username).await? {
            Some(other) if current.is_none_or(|u| u.id != other.id) => Err(
                DomainError::Duplicate(format!("username '{username}' is already taken")),
            ),
            _ => Ok(()),
        }
    }
}
