//! User repository for account storage

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use chrono::Utc;
use common::{
    error::{StoreError, StoreResult},
    store::Index,
};
use tracing::info;

use crate::models::{NewUser, Role, User};

/// User repository
///
/// Accounts are keyed by email; the email comparison is case-sensitive.
#[derive(Clone)]
pub struct UserRepository {
    users: Index<String, User>,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new() -> Self {
        Self {
            users: Index::new(),
        }
    }

    /// Create a new user with the given role
    ///
    /// The password is hashed before the account is stored. The duplicate
    /// check and the id assignment happen under one write guard so
    /// concurrent registrations cannot race.
    pub async fn create(&self, new_user: &NewUser, role: Role) -> StoreResult<User> {
        info!("Creating new user: {}", new_user.email);

        // Hash the password
        let salt = SaltString::generate(&mut rand::thread_rng());
        let argon2 = Argon2::default();
        let password_hash = argon2
            .hash_password(new_user.password.as_bytes(), &salt)
            .map_err(|e| StoreError::Internal(format!("Failed to hash password: {}", e)))?
            .to_string();

        let mut users = self.users.write().await;

        if users.contains_key(&new_user.email) {
            return Err(StoreError::DuplicateKey(new_user.email.clone()));
        }

        let id = users.values().map(|u| u.id).max().unwrap_or(0) + 1;
        let user = User {
            id,
            email: new_user.email.clone(),
            password_hash,
            role,
            name: new_user.name.clone(),
            created_at: Utc::now(),
        };
        users.insert(user.email.clone(), user.clone());

        Ok(user)
    }

    /// Find a user by email
    pub async fn find_by_email(&self, email: &str) -> Option<User> {
        self.users.get(email).await
    }

    /// Verify a user's password
    pub async fn verify_password(&self, user: &User, password: &str) -> StoreResult<bool> {
        let parsed_hash = PasswordHash::new(&user.password_hash)
            .map_err(|e| StoreError::Internal(format!("Failed to parse password hash: {}", e)))?;

        let argon2 = Argon2::default();
        let result = argon2.verify_password(password.as_bytes(), &parsed_hash);

        Ok(result.is_ok())
    }

    /// Number of registered accounts
    pub async fn count(&self) -> usize {
        self.users.len().await
    }
}
