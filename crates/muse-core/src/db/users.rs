//! User accounts and sessions
//!
//! Passwords are stored as Argon2id PHC strings. Session tokens are random;
//! only their SHA-256 hex digest is persisted, so a leaked database does not
//! leak live sessions.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, NaiveDateTime};
use rusqlite::{params, OptionalExtension, Row};
use sha2::{Digest, Sha256};
use std::sync::OnceLock;

use super::{format_datetime, parse_datetime, Database, SESSION_TTL_DAYS};
use crate::error::{Error, Result};
use crate::models::User;

fn email_pattern() -> &'static regex::Regex {
    static PATTERN: OnceLock<regex::Regex> = OnceLock::new();
    PATTERN.get_or_init(|| regex::Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap())
}

/// Lightweight email sanity check (not exhaustive)
pub fn is_plausible_email(email: &str) -> bool {
    email_pattern().is_match(email)
}

/// Hash a password with Argon2id and a fresh random salt
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| Error::Password(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

fn verify_password(password: &str, hash: &str) -> bool {
    PasswordHash::new(hash)
        .and_then(|parsed| Argon2::default().verify_password(password.as_bytes(), &parsed))
        .is_ok()
}

fn token_hash(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

fn map_user(row: &Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        password_hash: row.get(3)?,
        reminders_enabled: row.get(4)?,
        created_at: parse_datetime(&row.get::<_, String>(5)?),
    })
}

const USER_COLUMNS: &str = "id, name, email, password_hash, reminders_enabled, created_at";

impl Database {
    /// Create a user with a hashed password
    ///
    /// Rejects blank fields, implausible emails, and duplicate name/email.
    pub fn create_user(&self, name: &str, email: &str, password: &str) -> Result<User> {
        let name = name.trim();
        let email = email.trim().to_lowercase();

        if name.is_empty() || email.is_empty() || password.is_empty() {
            return Err(Error::InvalidData(
                "name, email, and password are required".to_string(),
            ));
        }
        if !is_plausible_email(&email) {
            return Err(Error::InvalidData(format!("Invalid email address: {}", email)));
        }

        let conn = self.conn()?;
        let taken: Option<i64> = conn
            .query_row(
                "SELECT id FROM users WHERE name = ?1 OR email = ?2",
                params![name, email],
                |row| row.get(0),
            )
            .optional()?;
        if taken.is_some() {
            return Err(Error::Conflict(
                "An account with that name or email already exists".to_string(),
            ));
        }

        let password_hash = hash_password(password)?;
        conn.execute(
            "INSERT INTO users (name, email, password_hash) VALUES (?1, ?2, ?3)",
            params![name, email, password_hash],
        )?;
        let id = conn.last_insert_rowid();

        self.get_user(id)?
            .ok_or_else(|| Error::NotFound("User not found after creation".to_string()))
    }

    pub fn get_user(&self, id: i64) -> Result<Option<User>> {
        let conn = self.conn()?;
        let user = conn
            .query_row(
                &format!("SELECT {} FROM users WHERE id = ?1", USER_COLUMNS),
                params![id],
                map_user,
            )
            .optional()?;
        Ok(user)
    }

    pub fn get_user_by_name(&self, name: &str) -> Result<Option<User>> {
        let conn = self.conn()?;
        let user = conn
            .query_row(
                &format!("SELECT {} FROM users WHERE name = ?1", USER_COLUMNS),
                params![name.trim()],
                map_user,
            )
            .optional()?;
        Ok(user)
    }

    pub fn list_users(&self) -> Result<Vec<User>> {
        let conn = self.conn()?;
        let mut stmt =
            conn.prepare(&format!("SELECT {} FROM users ORDER BY id", USER_COLUMNS))?;
        let users = stmt
            .query_map([], map_user)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(users)
    }

    /// Verify a name + password pair; returns the user on success
    pub fn authenticate(&self, name: &str, password: &str) -> Result<Option<User>> {
        let user = match self.get_user_by_name(name)? {
            Some(user) => user,
            None => return Ok(None),
        };
        if verify_password(password, &user.password_hash) {
            Ok(Some(user))
        } else {
            Ok(None)
        }
    }

    /// Toggle email reminders for a user
    pub fn set_reminders_enabled(&self, user_id: i64, enabled: bool) -> Result<()> {
        let conn = self.conn()?;
        let changed = conn.execute(
            "UPDATE users SET reminders_enabled = ?1 WHERE id = ?2",
            params![enabled, user_id],
        )?;
        if changed == 0 {
            return Err(Error::NotFound(format!("User {} not found", user_id)));
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Sessions
    // ------------------------------------------------------------------

    /// Open a session for a user; returns the raw token (shown once)
    pub fn create_session(&self, user_id: i64, now: NaiveDateTime) -> Result<String> {
        let token = SaltString::generate(&mut OsRng).as_str().to_string();
        let expires = now + Duration::days(SESSION_TTL_DAYS);

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO sessions (user_id, token_hash, created_at, expires_at) VALUES (?1, ?2, ?3, ?4)",
            params![
                user_id,
                token_hash(&token),
                format_datetime(now),
                format_datetime(expires)
            ],
        )?;

        Ok(token)
    }

    /// Resolve a raw session token to its user, honoring expiry
    pub fn session_user(&self, token: &str, now: NaiveDateTime) -> Result<Option<User>> {
        let conn = self.conn()?;
        let user = conn
            .query_row(
                "SELECT u.id, u.name, u.email, u.password_hash, u.reminders_enabled, u.created_at
                 FROM sessions s JOIN users u ON u.id = s.user_id
                 WHERE s.token_hash = ?1 AND s.expires_at > ?2",
                params![token_hash(token), format_datetime(now)],
                map_user,
            )
            .optional()?;
        Ok(user)
    }

    /// Revoke a session by its raw token
    pub fn delete_session(&self, token: &str) -> Result<()> {
        let conn = self.conn()?;
        conn.execute(
            "DELETE FROM sessions WHERE token_hash = ?1",
            params![token_hash(token)],
        )?;
        Ok(())
    }

    /// Remove sessions past their expiry
    pub fn purge_expired_sessions(&self, now: NaiveDateTime) -> Result<usize> {
        let conn = self.conn()?;
        let purged = conn.execute(
            "DELETE FROM sessions WHERE expires_at <= ?1",
            params![format_datetime(now)],
        )?;
        Ok(purged)
    }
}
