use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

use super::store::{get_json, set_json, KeyValueStore, StoreError};

/// Minimum password length accepted at signup
pub const MIN_PASSWORD_LEN: usize = 8;

/// Errors from the demo account flows
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Password must be at least {} characters", MIN_PASSWORD_LEN)]
    PasswordTooShort,

    #[error("An account with this email already exists")]
    EmailTaken,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreferences {
    #[serde(default)]
    pub notifications: bool,
}

/// Stored account record. The password is kept as submitted: this is a
/// demo account system with no security guarantees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub preferences: UserPreferences,
    #[serde(default)]
    pub saved: Vec<serde_json::Value>,
}

/// The signed-in user as exposed to pages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl SessionUser {
    /// Greeting name: the account name, or the e-mail local part when blank
    pub fn display_name(&self) -> &str {
        if !self.name.trim().is_empty() {
            return &self.name;
        }
        self.email.split('@').next().unwrap_or_default()
    }
}

impl From<&User> for SessionUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

/// Toy signup/login backed by the same [`KeyValueStore`] as drafts
#[derive(Clone)]
pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
    users_key: String,
    current_key: String,
}

impl SessionStore {
    pub fn new(store: Arc<dyn KeyValueStore>, namespace: &str) -> Self {
        Self {
            store,
            users_key: format!("{namespace}_users_v1"),
            current_key: format!("{namespace}_current_user_v1"),
        }
    }

    /// All users; an unreadable record counts as no users
    pub fn users(&self) -> Result<Vec<User>, SessionError> {
        match get_json(self.store.as_ref(), &self.users_key) {
            Ok(users) => Ok(users.unwrap_or_default()),
            Err(StoreError::SerializationError(e)) => {
                tracing::warn!("Discarding unreadable user list: {}", e);
                Ok(Vec::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn write_users(&self, users: &[User]) -> Result<(), SessionError> {
        Ok(set_json(self.store.as_ref(), &self.users_key, &users)?)
    }

    fn set_current(&self, user: &SessionUser) -> Result<(), SessionError> {
        Ok(set_json(self.store.as_ref(), &self.current_key, user)?)
    }

    pub fn signup(
        &self,
        name: &str,
        email: &str,
        password: &str,
        notifications: bool,
    ) -> Result<SessionUser, SessionError> {
        let name = name.trim();
        let email = normalize_email(email);

        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(SessionError::PasswordTooShort);
        }

        let mut users = self.users()?;
        if users.iter().any(|user| user.email == email) {
            return Err(SessionError::EmailTaken);
        }

        let user = User {
            id: next_id(&users),
            name: name.to_string(),
            email,
            password: password.to_string(),
            preferences: UserPreferences { notifications },
            saved: Vec::new(),
        };
        let session = SessionUser::from(&user);

        users.push(user);
        self.write_users(&users)?;
        self.set_current(&session)?;

        tracing::info!("Account created for user {}", session.id);
        Ok(session)
    }

    pub fn login(&self, email: &str, password: &str) -> Result<SessionUser, SessionError> {
        let email = normalize_email(email);
        let users = self.users()?;

        let user = users
            .iter()
            .find(|user| user.email == email && user.password == password)
            .ok_or(SessionError::InvalidCredentials)?;

        let session = SessionUser::from(user);
        self.set_current(&session)?;

        tracing::info!("User {} signed in", session.id);
        Ok(session)
    }

    /// The signed-in user; an unreadable session counts as signed out
    pub fn current(&self) -> Result<Option<SessionUser>, SessionError> {
        match get_json(self.store.as_ref(), &self.current_key) {
            Ok(session) => Ok(session),
            Err(StoreError::SerializationError(_)) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn logout(&self) -> Result<(), SessionError> {
        Ok(self.store.delete(&self.current_key)?)
    }

    /// Append an opportunity to the signed-in user's saved list.
    ///
    /// Returns `false` when nobody is signed in or the session points at a
    /// user that no longer exists.
    pub fn save_opportunity(&self, item: serde_json::Value) -> Result<bool, SessionError> {
        let Some(current) = self.current()? else {
            return Ok(false);
        };

        let mut users = self.users()?;
        let Some(user) = users.iter_mut().find(|user| user.id == current.id) else {
            return Ok(false);
        };

        user.saved.push(item);
        self.write_users(&users)?;
        Ok(true)
    }

    pub fn saved(&self) -> Result<Vec<serde_json::Value>, SessionError> {
        let Some(current) = self.current()? else {
            return Ok(Vec::new());
        };

        Ok(self
            .users()?
            .into_iter()
            .find(|user| user.id == current.id)
            .map(|user| user.saved)
            .unwrap_or_default())
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Millisecond timestamp ids, bumped past the newest id if two signups share a millisecond
fn next_id(users: &[User]) -> i64 {
    let now = chrono::Utc::now().timestamp_millis();
    let newest = users.iter().map(|user| user.id).max().unwrap_or(i64::MIN);
    now.max(newest.saturating_add(1))
}
