//! Authenticated session state shared by the HTTP client and the local store.

use crate::models::JwtResponse;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, RwLock};
use tokio::sync::watch;

/// Role the backend assigned to the logged-in user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserRole {
    Student,
    Teacher,
    Admin,
    SystemAdmin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Student => "STUDENT",
            UserRole::Teacher => "TEACHER",
            UserRole::Admin => "ADMIN",
            UserRole::SystemAdmin => "SYSTEM_ADMIN",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace(['-', ' '], "_").as_str() {
            "STUDENT" => Ok(UserRole::Student),
            "TEACHER" => Ok(UserRole::Teacher),
            "ADMIN" => Ok(UserRole::Admin),
            "SYSTEM_ADMIN" | "SYSTEMADMIN" => Ok(UserRole::SystemAdmin),
            other => Err(format!("unknown user type {other}")),
        }
    }
}

/// Credentials and identity of the logged-in user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthSession {
    pub token: String,
    pub token_type: String,
    pub user_id: i64,
    pub role: UserRole,
    pub email: String,
    pub name: String,
}

impl AuthSession {
    /// Builds a session from a login response.
    pub fn from_jwt(jwt: &JwtResponse) -> Result<Self, String> {
        if jwt.access_token.trim().is_empty() {
            return Err("login response carried an empty access token".to_string());
        }
        Ok(Self {
            token: jwt.access_token.clone(),
            token_type: if jwt.token_type.trim().is_empty() {
                "Bearer".to_string()
            } else {
                jwt.token_type.clone()
            },
            user_id: jwt.id,
            role: jwt.user_type.parse()?,
            email: jwt.email.clone(),
            name: jwt.name.clone(),
        })
    }

    /// Value for the `Authorization` header.
    pub fn authorization(&self) -> String {
        format!("{} {}", self.token_type, self.token)
    }

    pub fn key(&self) -> SessionKey {
        SessionKey::from_token(&self.token)
    }
}

/// A session key derived from the bearer token, used in log fields.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub struct SessionKey(String);

impl SessionKey {
    /// Creates a session key from a raw token.
    ///
    /// The token is hashed so log lines never contain the credential.
    pub fn from_token(token: &str) -> Self {
        let digest = Sha256::digest(token.as_bytes());
        Self(
            digest[..16]
                .iter()
                .map(|b| format!("{:02x}", b))
                .collect(),
        )
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Only show first 8 chars
        write!(f, "{}...", &self.0[..8.min(self.0.len())])
    }
}

/// Shared, observable holder of the current session.
///
/// Subscribers see `None` whenever credentials are cleared, including the
/// global clear triggered by a 401; a UI uses that to navigate to login.
#[derive(Clone)]
pub struct SessionHandle {
    current: Arc<RwLock<Option<AuthSession>>>,
    changes: Arc<watch::Sender<Option<AuthSession>>>,
}

impl SessionHandle {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self {
            current: Arc::new(RwLock::new(None)),
            changes: Arc::new(tx),
        }
    }

    pub fn get(&self) -> Option<AuthSession> {
        self.current.read().ok().and_then(|guard| guard.clone())
    }

    pub fn set(&self, session: AuthSession) {
        if let Ok(mut guard) = self.current.write() {
            *guard = Some(session.clone());
        }
        self.changes.send_replace(Some(session));
    }

    pub fn clear(&self) {
        if let Ok(mut guard) = self.current.write() {
            *guard = None;
        }
        self.changes.send_replace(None);
    }

    pub fn user_id(&self) -> Option<i64> {
        self.get().map(|s| s.user_id)
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<AuthSession>> {
        self.changes.subscribe()
    }
}

impl Default for SessionHandle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jwt(user_type: &str) -> JwtResponse {
        JwtResponse {
            access_token: "abc.def.ghi".to_string(),
            token_type: String::new(),
            user_type: user_type.to_string(),
            id: 42,
            email: "s@cit.edu".to_string(),
            name: "Sam".to_string(),
            google_linked: false,
        }
    }

    #[test]
    fn test_session_from_jwt() {
        let session = AuthSession::from_jwt(&jwt("student")).unwrap();
        assert_eq!(session.role, UserRole::Student);
        assert_eq!(session.authorization(), "Bearer abc.def.ghi");
    }

    #[test]
    fn test_unknown_role_rejected() {
        assert!(AuthSession::from_jwt(&jwt("janitor")).is_err());
        assert_eq!("system-admin".parse::<UserRole>().unwrap(), UserRole::SystemAdmin);
    }

    #[test]
    fn test_session_key_hashing() {
        let key1 = SessionKey::from_token("token123");
        let key2 = SessionKey::from_token("token123");
        let key3 = SessionKey::from_token("token456");

        assert_eq!(key1, key2);
        assert_ne!(key1, key3);
        assert_eq!(key1.as_str().len(), 32);
        assert!(!key1.to_string().contains("token"));
    }

    #[test]
    fn test_clear_notifies_subscribers() {
        let handle = SessionHandle::new();
        let rx = handle.subscribe();
        handle.set(AuthSession::from_jwt(&jwt("TEACHER")).unwrap());
        assert!(rx.borrow().is_some());
        handle.clear();
        assert!(rx.borrow().is_none());
        assert_eq!(handle.user_id(), None);
    }
}
