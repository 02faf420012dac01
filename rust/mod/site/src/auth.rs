//! Admin authentication.
//!
//! The site only sees [`AuthProvider`]: sign in, sign out and a watch
//! channel carrying the current session. [`CredentialAuth`] is the local
//! provider: one configured admin, an argon2 password hash and JWT
//! session tokens.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::jwt::JwtService;

pub const MAX_FAILED_ATTEMPTS: u32 = 5;
pub const LOCKOUT_SECS: i64 = 5 * 60;

pub const MSG_INVALID: &str = "Invalid username or password";
pub const MSG_RATE_LIMITED: &str = "Too many failed attempts. Please try again later.";
pub const MSG_GENERIC: &str = "Login failed. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub username: String,
    pub token: String,
    pub issued_at: i64,
    pub expires_at: i64,
}

impl Session {
    pub fn is_expired_at(&self, now: i64) -> bool {
        now >= self.expires_at
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(chrono::Utc::now().timestamp())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("invalid credential")]
    InvalidCredential,
    #[error("user not found")]
    UserNotFound,
    #[error("wrong password")]
    WrongPassword,
    #[error("too many requests")]
    RateLimited,
    #[error("password hash: {0}")]
    PasswordHash(String),
    #[error("{0}")]
    Other(String),
}

impl AuthError {
    /// Fixed text shown on the login form. Every credential failure reads
    /// the same so the form does not reveal which part was wrong.
    pub fn user_message(&self) -> &'static str {
        match self {
            AuthError::InvalidCredential | AuthError::UserNotFound | AuthError::WrongPassword => {
                MSG_INVALID
            }
            AuthError::RateLimited => MSG_RATE_LIMITED,
            AuthError::PasswordHash(_) | AuthError::Other(_) => MSG_GENERIC,
        }
    }
}

#[async_trait::async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_in(&self, username: &str, password: &str) -> Result<Session, AuthError>;

    async fn sign_out(&self);

    /// Receives the session on every change. `None` when signed out.
    fn session(&self) -> watch::Receiver<Option<Session>>;

    /// The session if one exists and has not expired.
    fn current(&self) -> Option<Session> {
        let session = self.session().borrow().clone();
        session.filter(|s| !s.is_expired())
    }
}

// ── Password helpers ──

pub fn hash_password(password: &str) -> Result<String, AuthError> {
    use argon2::Argon2;
    use password_hash::rand_core::OsRng;
    use password_hash::{PasswordHasher, SaltString};

    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AuthError::PasswordHash(e.to_string()))
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    use argon2::Argon2;
    use password_hash::{PasswordHash, PasswordVerifier};

    let parsed = PasswordHash::new(hash).map_err(|e| AuthError::PasswordHash(e.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Consecutive-failure counter with a timed lock.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoginThrottle {
    failures: u32,
    locked_until: Option<i64>,
}

impl LoginThrottle {
    pub fn is_locked(&self, now: i64) -> bool {
        self.locked_until.is_some_and(|until| now < until)
    }

    pub fn record_failure(&mut self, now: i64) {
        if self.locked_until.is_some_and(|until| now >= until) {
            self.locked_until = None;
            self.failures = 0;
        }
        self.failures += 1;
        if self.failures >= MAX_FAILED_ATTEMPTS {
            self.locked_until = Some(now + LOCKOUT_SECS);
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Single-admin provider.
pub struct CredentialAuth {
    username: String,
    password_hash: String,
    jwt: JwtService,
    throttle: Mutex<LoginThrottle>,
    session: watch::Sender<Option<Session>>,
}

impl CredentialAuth {
    pub fn new(username: &str, password_hash: &str, jwt: JwtService) -> Self {
        let (session, _) = watch::channel(None);
        Self {
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            jwt,
            throttle: Mutex::new(LoginThrottle::default()),
            session,
        }
    }

    /// Resume a saved session from its token.
    pub fn restore(&self, token: &str) -> Result<Session, AuthError> {
        let claims = self.jwt.verify(token).map_err(AuthError::Other)?;
        if claims.sub != self.username {
            return Err(AuthError::UserNotFound);
        }
        let session = Session {
            username: claims.sub,
            token: token.to_string(),
            issued_at: claims.iat,
            expires_at: claims.exp,
        };
        self.session.send_replace(Some(session.clone()));
        Ok(session)
    }

    fn check(&self, username: &str, password: &str, now: i64) -> Result<Session, AuthError> {
        let mut throttle = self.throttle.lock().unwrap();
        if throttle.is_locked(now) {
            return Err(AuthError::RateLimited);
        }
        if username.trim().is_empty() || password.is_empty() {
            return Err(AuthError::InvalidCredential);
        }
        if username.trim() != self.username {
            throttle.record_failure(now);
            return Err(AuthError::UserNotFound);
        }
        if !verify_password(password, &self.password_hash)? {
            throttle.record_failure(now);
            return Err(AuthError::WrongPassword);
        }
        throttle.reset();
        drop(throttle);

        let (token, claims) = self.jwt.issue_at(&self.username, now).map_err(AuthError::Other)?;
        Ok(Session {
            username: claims.sub,
            token,
            issued_at: claims.iat,
            expires_at: claims.exp,
        })
    }
}

#[async_trait::async_trait]
impl AuthProvider for CredentialAuth {
    async fn sign_in(&self, username: &str, password: &str) -> Result<Session, AuthError> {
        let now = chrono::Utc::now().timestamp();
        match self.check(username, password, now) {
            Ok(session) => {
                info!(username = %session.username, "admin signed in");
                self.session.send_replace(Some(session.clone()));
                Ok(session)
            }
            Err(e) => {
                warn!(error = %e, "admin sign-in rejected");
                Err(e)
            }
        }
    }

    async fn sign_out(&self) {
        if self.session.send_replace(None).is_some() {
            info!("admin signed out");
        }
    }

    fn session(&self) -> watch::Receiver<Option<Session>> {
        self.session.subscribe()
    }
}
