//! Token sessions.

use std::sync::{PoisonError, RwLock};

use chrono::{DateTime, Utc};

use crate::Credential;

#[derive(Debug, Clone)]
struct Token {
    value: String,
    expires_at: Option<DateTime<Utc>>,
}

/// An authenticated user session.
///
/// Holds the access token obtained elsewhere (the OAuth flow is not part
/// of this crate). The token can be replaced with [`Session::refresh`];
/// requests built earlier pick up the new token the next time they are
/// prepared.
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use spotkit::{ApiClient, HyperClient, Session};
///
/// let session = Arc::new(Session::new("wizzler", token));
/// let client = ApiClient::new(HyperClient::new()).with_credential(session.clone());
/// ```
#[derive(Debug)]
pub struct Session {
    user_name: String,
    token: RwLock<Token>,
}

impl Session {
    /// A session whose token never expires.
    pub fn new(user_name: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            token: RwLock::new(Token {
                value: access_token.into(),
                expires_at: None,
            }),
        }
    }

    /// A session whose token expires at `expires_at`.
    pub fn with_expiry(
        user_name: impl Into<String>,
        access_token: impl Into<String>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        let session = Self::new(user_name, access_token);
        session.write().expires_at = Some(expires_at);
        session
    }

    /// The canonical user name.
    #[must_use]
    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    /// When the current token expires, if it does.
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.read().expires_at
    }

    /// Whether the current token is past its expiry.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at().is_some_and(|expiry| expiry <= Utc::now())
    }

    /// Replace the token.
    pub fn refresh(&self, access_token: impl Into<String>, expires_at: Option<DateTime<Utc>>) {
        *self.write() = Token {
            value: access_token.into(),
            expires_at,
        };
        tracing::debug!(user = %self.user_name, "session token refreshed");
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Token> {
        self.token.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Token> {
        self.token.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Credential for Session {
    fn access_token(&self) -> Option<String> {
        let token = self.read();
        match token.expires_at {
            Some(expiry) if expiry <= Utc::now() => None,
            _ => Some(token.value.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;

    use super::*;

    #[test]
    fn session_without_expiry_has_token() {
        let session = Session::new("wizzler", "abc");
        assert_eq!(session.user_name(), "wizzler");
        assert_eq!(session.access_token().as_deref(), Some("abc"));
        assert!(!session.is_expired());
    }

    #[test]
    fn expired_session_has_no_token() {
        let session = Session::with_expiry("wizzler", "abc", Utc::now() - TimeDelta::minutes(1));
        assert!(session.is_expired());
        assert_eq!(session.access_token(), None);
    }

    #[test]
    fn refresh_replaces_token_and_expiry() {
        let session = Session::with_expiry("wizzler", "old", Utc::now() - TimeDelta::minutes(1));
        let expiry = Utc::now() + TimeDelta::hours(1);
        session.refresh("new", Some(expiry));

        assert_eq!(session.access_token().as_deref(), Some("new"));
        assert_eq!(session.expires_at(), Some(expiry));
    }
}
