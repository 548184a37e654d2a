//! Session management
//!
//! A session binds an opaque bearer token to one of the known users. Sessions
//! are created on login, looked up on every authenticated request and dropped
//! on logout. The store is owned by the application state and handed to the
//! extractors that need it.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Session errors
#[derive(Error, Debug, PartialEq)]
pub enum SessionError {
    #[error("No account registered for {0}")]
    UnknownUser(String),

    #[error("Session not found or expired")]
    SessionNotFound,
}

/// User roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    User,
    Admin,
}

/// Platform user
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet_address: Option<String>,
    pub balance: f64,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

/// Known accounts, looked up by email
#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    users: Vec<User>,
}

impl UserDirectory {
    pub fn new(users: Vec<User>) -> Self {
        Self { users }
    }

    /// The borrower and administrator demo accounts
    pub fn demo() -> Self {
        Self::new(vec![
            User {
                id: "1".to_string(),
                email: "user@example.com".to_string(),
                name: "John Doe".to_string(),
                role: UserRole::User,
                wallet_address: Some("0x742d35Cc6634C0532925a3b8D4017C8a4567891a".to_string()),
                balance: 2500.50,
            },
            User {
                id: "2".to_string(),
                email: "admin@example.com".to_string(),
                name: "Admin User".to_string(),
                role: UserRole::Admin,
                wallet_address: Some("0x8ba1f109551bD432803012645Hac136c9X67B19".to_string()),
                balance: 10000.00,
            },
        ])
    }

    pub fn find_by_email(&self, email: &str) -> Option<&User> {
        self.users
            .iter()
            .find(|user| user.email.eq_ignore_ascii_case(email.trim()))
    }
}

/// An active login
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub token: String,
    pub user: User,
    pub created_at: DateTime<Utc>,
}

/// Login request body
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    /// Accepted for form compatibility; credentials are not verified
    #[serde(default)]
    pub password: Option<String>,
}

/// Active sessions keyed by token
pub struct SessionStore {
    directory: UserDirectory,
    sessions: RwLock<HashMap<String, Session>>,
}

impl SessionStore {
    pub fn new(directory: UserDirectory) -> Self {
        Self {
            directory,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Open a session for the account registered under `email`
    pub async fn login(&self, email: &str) -> Result<Session, SessionError> {
        let user = self
            .directory
            .find_by_email(email)
            .cloned()
            .ok_or_else(|| SessionError::UnknownUser(email.to_string()))?;

        let session = Session {
            token: Uuid::new_v4().simple().to_string(),
            user,
            created_at: Utc::now(),
        };

        self.sessions
            .write()
            .await
            .insert(session.token.clone(), session.clone());

        tracing::info!(user_id = %session.user.id, role = ?session.user.role, "User logged in");
        Ok(session)
    }

    pub async fn resolve(&self, token: &str) -> Result<Session, SessionError> {
        self.sessions
            .read()
            .await
            .get(token)
            .cloned()
            .ok_or(SessionError::SessionNotFound)
    }

    pub async fn logout(&self, token: &str) -> Result<(), SessionError> {
        let removed = self.sessions.write().await.remove(token);
        match removed {
            Some(session) => {
                tracing::info!(user_id = %session.user.id, "User logged out");
                Ok(())
            }
            None => Err(SessionError::SessionNotFound),
        }
    }

    pub async fn active_sessions(&self) -> usize {
        self.sessions.read().await.len()
    }
}
