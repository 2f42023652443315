//! Session model and related functionality

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Role;

/// Session entity
///
/// The role is copied from the account at issuance and never re-validated;
/// an account may hold any number of concurrent sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user_id: i64,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}
