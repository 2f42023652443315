//! Session management for opaque bearer tokens

use chrono::Utc;
use common::store::Index;
use rand::{Rng, distributions::Alphanumeric};
use tracing::info;

use crate::models::{Session, User};

/// Number of random characters in a session token
const TOKEN_LENGTH: usize = 48;

/// Session manager for handling user sessions
///
/// A token stays valid until it is explicitly revoked or the process
/// restarts; no expiry is enforced.
#[derive(Clone)]
pub struct SessionManager {
    sessions: Index<String, Session>,
}

impl SessionManager {
    /// Create a new session manager
    pub fn new() -> Self {
        Self {
            sessions: Index::new(),
        }
    }

    /// Create a new session for a user
    ///
    /// The role is copied onto the session at issuance and never
    /// re-validated against the account afterwards. A user may hold any
    /// number of concurrent sessions.
    pub async fn create_session(&self, user: &User) -> Session {
        info!("Creating session for user: {}", user.id);

        let session = Session {
            token: generate_token(),
            user_id: user.id,
            email: user.email.clone(),
            role: user.role,
            created_at: Utc::now(),
        };

        self.sessions
            .insert(session.token.clone(), session.clone())
            .await;

        session
    }

    /// Get the session for a token
    pub async fn get_session(&self, token: &str) -> Option<Session> {
        self.sessions.get(token).await
    }

    /// Delete the session for a token
    ///
    /// Deleting an unknown or already-revoked token is a no-op; the return
    /// value reports whether a session was actually removed.
    pub async fn delete_session(&self, token: &str) -> bool {
        info!("Deleting session");
        self.sessions.remove(token).await
    }

    /// Number of live sessions
    pub async fn session_count(&self) -> usize {
        self.sessions.len().await
    }
}

/// Generate an unguessable session token from the thread CSPRNG
fn generate_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LENGTH)
        .map(char::from)
        .collect()
}
