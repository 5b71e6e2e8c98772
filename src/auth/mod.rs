use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use crate::{
    error::SessionError,
    ids::IdSource,
    models::{LoginInput, ProfileUpdate, SignupInput, User},
    pace::NetworkPace,
};

pub mod directory;
pub mod vault;

use directory::{session_token, IdentityDirectory};
use vault::SessionVault;

/// Read-only view of the current auth session.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSnapshot {
    pub user: Option<User>,
    pub is_authenticated: bool,
    pub is_loading: bool,
    pub error: Option<String>,
}

/// Single session-scoped store mediating every identity-changing operation.
///
/// Each asynchronous operation clears the previous error, raises the loading
/// flag, suspends at the [`NetworkPace`] boundary, and resolves to exactly
/// one of success or a recorded [`SessionError`]. Exclusive `&mut self`
/// access is what serializes overlapping calls; the store is owned by one
/// application scope and never shared across writers.
pub struct SessionStore {
    directory: Box<dyn IdentityDirectory>,
    vault: SessionVault,
    pace: Arc<dyn NetworkPace>,
    ids: Arc<dyn IdSource>,
    user: Option<User>,
    is_loading: bool,
    error: Option<String>,
}

impl SessionStore {
    /// Builds the store and restores any persisted session. A session is
    /// restored only when both the saved user and the auth token are present.
    pub fn new(
        directory: Box<dyn IdentityDirectory>,
        vault: SessionVault,
        pace: Arc<dyn NetworkPace>,
        ids: Arc<dyn IdSource>,
    ) -> Result<Self, SessionError> {
        let user = vault.load_session()?;
        if let Some(user) = &user {
            info!(user_id = %user.id, "restored persisted session");
        }

        Ok(Self {
            directory,
            vault,
            pace,
            ids,
            user,
            is_loading: false,
            error: None,
        })
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn snapshot(&self) -> AuthSnapshot {
        AuthSnapshot {
            user: self.user.clone(),
            is_authenticated: self.user.is_some(),
            is_loading: self.is_loading,
            error: self.error.clone(),
        }
    }

    pub fn directory(&self) -> &dyn IdentityDirectory {
        self.directory.as_ref()
    }

    pub async fn login(&mut self, input: LoginInput) -> Result<(), SessionError> {
        self.begin();
        let result = self.login_inner(input).await;
        self.finish(&result);
        result
    }

    async fn login_inner(&mut self, input: LoginInput) -> Result<(), SessionError> {
        self.pace.pause().await;

        let Some(mut user) = self.directory.find_by_email(&input.email) else {
            warn!(email = %input.email, "login rejected: unknown email");
            return Err(SessionError::InvalidCredentials);
        };
        if !self.directory.verify_password(&input.email, &input.password) {
            warn!(email = %input.email, "login rejected: wrong password");
            return Err(SessionError::InvalidCredentials);
        }

        user.last_login_at = Some(Utc::now());
        self.vault
            .save_session(&user, &session_token(), input.remember_me)?;
        info!(user_id = %user.id, "login succeeded");
        self.user = Some(user);
        Ok(())
    }

    pub async fn signup(&mut self, input: SignupInput) -> Result<(), SessionError> {
        self.begin();
        let result = self.signup_inner(input).await;
        self.finish(&result);
        result
    }

    async fn signup_inner(&mut self, input: SignupInput) -> Result<(), SessionError> {
        self.pace.pause().await;

        if input.password != input.confirm_password {
            return Err(SessionError::PasswordMismatch);
        }
        if self.directory.find_by_email(&input.email).is_some() {
            return Err(SessionError::DuplicateAccount);
        }

        let now = Utc::now();
        let user = User {
            id: self.ids.mint(),
            name: input.name,
            email: input.email,
            avatar: None,
            is_online: Some(true),
            role: None,
            department: None,
            phone: None,
            timezone: None,
            created_at: now,
            last_login_at: Some(now),
        };

        self.directory.insert(user.clone(), &input.password);
        self.vault.save_session(&user, &session_token(), false)?;
        info!(user_id = %user.id, "account created");
        self.user = Some(user);
        Ok(())
    }

    /// Clears the persisted session and returns to the anonymous state.
    /// Synchronous and idempotent.
    pub fn logout(&mut self) -> Result<(), SessionError> {
        self.vault.clear()?;
        self.user = None;
        self.is_loading = false;
        self.error = None;
        Ok(())
    }

    /// Simulates sending a reset email. The session itself is untouched on
    /// success.
    pub async fn reset_password(&mut self, email: &str) -> Result<(), SessionError> {
        self.begin();
        let result = self.reset_password_inner(email).await;
        self.finish(&result);
        result
    }

    async fn reset_password_inner(&mut self, email: &str) -> Result<(), SessionError> {
        self.pace.pause().await;

        if self.directory.find_by_email(email).is_none() {
            return Err(SessionError::UnknownAccount);
        }

        info!(email = %email, "password reset email sent");
        Ok(())
    }

    /// Merges a partial update into the authenticated user and re-persists.
    /// A no-op when nobody is logged in.
    pub async fn update_profile(&mut self, update: ProfileUpdate) -> Result<(), SessionError> {
        if self.user.is_none() {
            return Ok(());
        }

        self.begin();
        let result = self.update_profile_inner(update).await;
        self.finish(&result);
        result
    }

    async fn update_profile_inner(&mut self, update: ProfileUpdate) -> Result<(), SessionError> {
        self.pace.pause().await;

        let Some(user) = self.user.as_mut() else {
            return Ok(());
        };

        if let Some(name) = update.name {
            user.name = name;
        }
        if let Some(avatar) = update.avatar {
            user.avatar = Some(avatar);
        }
        if let Some(role) = update.role {
            user.role = Some(role);
        }
        if let Some(department) = update.department {
            user.department = Some(department);
        }
        if let Some(phone) = update.phone {
            user.phone = Some(phone);
        }
        if let Some(timezone) = update.timezone {
            user.timezone = Some(timezone);
        }

        self.vault
            .save_user(user)
            .map_err(|_| SessionError::ProfileUpdateFailed)?;
        Ok(())
    }

    /// Resets the surfaced error. Idempotent.
    pub fn clear_error(&mut self) {
        self.error = None;
    }

    fn begin(&mut self) {
        self.error = None;
        self.is_loading = true;
    }

    fn finish(&mut self, result: &Result<(), SessionError>) {
        self.is_loading = false;
        self.error = result.as_ref().err().map(|error| error.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        auth::directory::MockDirectory,
        ids::UuidSource,
        pace::InstantPace,
    };

    fn store() -> SessionStore {
        SessionStore::new(
            Box::new(MockDirectory::with_seed_users()),
            SessionVault::in_memory(),
            Arc::new(InstantPace),
            Arc::new(UuidSource),
        )
        .expect("fresh store")
    }

    #[tokio::test]
    async fn update_profile_without_user_is_a_no_op() {
        let mut store = store();
        store
            .update_profile(ProfileUpdate {
                name: Some("Ghost".to_string()),
                ..ProfileUpdate::default()
            })
            .await
            .unwrap();

        assert!(!store.is_authenticated());
        assert!(store.error().is_none());
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn update_profile_merges_partial_fields() {
        let mut store = store();
        store
            .login(LoginInput {
                email: "john@company.com".to_string(),
                password: directory::MOCK_PASSWORD.to_string(),
                remember_me: false,
            })
            .await
            .unwrap();

        store
            .update_profile(ProfileUpdate {
                role: Some("Staff Engineer".to_string()),
                ..ProfileUpdate::default()
            })
            .await
            .unwrap();

        let user = store.user().expect("authenticated");
        assert_eq!(user.role.as_deref(), Some("Staff Engineer"));
        assert_eq!(user.name, "John Doe");
    }

    #[tokio::test]
    async fn a_new_operation_clears_the_previous_error() {
        let mut store = store();
        let _ = store
            .login(LoginInput {
                email: "john@company.com".to_string(),
                password: "wrong".to_string(),
                remember_me: false,
            })
            .await;
        assert!(store.error().is_some());

        store
            .login(LoginInput {
                email: "john@company.com".to_string(),
                password: directory::MOCK_PASSWORD.to_string(),
                remember_me: false,
            })
            .await
            .unwrap();
        assert!(store.error().is_none());
        assert!(store.is_authenticated());
    }

    #[tokio::test]
    async fn reset_password_leaves_the_session_untouched() {
        let mut store = store();
        store.reset_password("sarah@company.com").await.unwrap();
        assert!(!store.is_authenticated());
        assert!(store.error().is_none());
    }
}
