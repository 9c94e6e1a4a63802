//! Account service — registration and credential verification.
//!
//! ERROR HANDLING
//! ==============
//! Duplicate accounts are detected from the UNIQUE violation raised by the
//! insert rather than a pre-flight SELECT, so two concurrent registrations
//! for the same name cannot both succeed.

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::services::session::SessionUser;

const USERNAME_MAX_LEN: usize = 50;
const EMAIL_MAX_LEN: usize = 100;

#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("username or email already exists")]
    Duplicate,
    #[error("invalid username")]
    InvalidUsername,
    #[error("invalid email")]
    InvalidEmail,
    #[error("empty password")]
    EmptyPassword,
    #[error("password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
}

/// Trim a submitted username and enforce the column length bound.
#[must_use]
pub fn normalize_username(username: &str) -> Option<String> {
    let normalized = username.trim();
    if normalized.is_empty() || normalized.len() > USERNAME_MAX_LEN {
        return None;
    }
    Some(normalized.to_owned())
}

/// Lowercase and sanity-check a submitted email address.
#[must_use]
pub fn normalize_email(email: &str) -> Option<String> {
    let normalized = email.trim().to_ascii_lowercase();
    if normalized.is_empty() || normalized.len() > EMAIL_MAX_LEN || !normalized.contains('@') {
        return None;
    }
    let parts = normalized.split('@').collect::<Vec<_>>();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return None;
    }
    Some(normalized)
}

/// Hash a password with bcrypt. Each hash carries its own random salt.
///
/// # Errors
///
/// Returns an error if hashing fails.
pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST)
}

/// Verify a password against a stored bcrypt hash. Malformed hashes count
/// as a mismatch.
#[must_use]
pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}

/// Register a new account, returning the user's id.
///
/// # Errors
///
/// Returns `Duplicate` when the username or email is already taken, a
/// validation error for malformed fields, or the underlying hash/database
/// error otherwise.
pub async fn create_user(
    pool: &SqlitePool,
    username: &str,
    email: &str,
    password: &str,
) -> Result<Uuid, AccountError> {
    let username = normalize_username(username).ok_or(AccountError::InvalidUsername)?;
    let email = normalize_email(email).ok_or(AccountError::InvalidEmail)?;
    if password.is_empty() {
        return Err(AccountError::EmptyPassword);
    }

    let password_hash = hash_password(password)?;
    let id = Uuid::new_v4();

    let result = sqlx::query("INSERT INTO users (id, username, email, password_hash) VALUES (?, ?, ?, ?)")
        .bind(id)
        .bind(&username)
        .bind(&email)
        .bind(&password_hash)
        .execute(pool)
        .await;

    match result {
        Ok(_) => Ok(id),
        Err(sqlx::Error::Database(db)) if db.is_unique_violation() => Err(AccountError::Duplicate),
        Err(e) => Err(AccountError::Db(e)),
    }
}

/// Check a username/password pair, returning the user on a match and
/// `None` for an unknown username or a wrong password.
///
/// # Errors
///
/// Returns a database error if the lookup fails.
pub async fn verify_credentials(
    pool: &SqlitePool,
    username: &str,
    password: &str,
) -> Result<Option<SessionUser>, sqlx::Error> {
    let row = sqlx::query_as::<_, (Uuid, String, String, String)>(
        "SELECT id, username, email, password_hash FROM users WHERE username = ?",
    )
    .bind(username.trim())
    .fetch_optional(pool)
    .await?;

    Ok(row.and_then(|(id, username, email, password_hash)| {
        verify_password(password, &password_hash).then_some(SessionUser { id, username, email })
    }))
}

#[cfg(test)]
#[path = "account_test.rs"]
mod tests;
