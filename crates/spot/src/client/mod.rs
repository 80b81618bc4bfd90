//! HTTP transport for the SPOT REST backend.
//!
//! Every call goes through [`SpotClient::execute`], which:
//! 1. Joins the resource path onto the configured base URL
//! 2. Attaches the bearer token unless the path is a public auth endpoint
//! 3. Clears the session globally on HTTP 401
//! 4. Unwraps the `{ result, message, data }` envelope when present

mod envelope;

pub use envelope::unwrap_envelope;

use crate::config::ClientConfig;
use crate::error::{SpotError, SpotResult};
use crate::session::{AuthSession, SessionHandle};
use crate::store::LocalStore;
use rand::Rng;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};
use url::Url;

/// Paths that must never carry a bearer token.
const PUBLIC_PATHS: &[&str] = &["/auth/login", "/auth/check-email"];

/// Client for the SPOT backend, cheap to clone.
#[derive(Clone)]
pub struct SpotClient {
    http: Client,
    base_url: Url,
    session: SessionHandle,
    store: Option<Arc<LocalStore>>,
}

impl SpotClient {
    /// Creates a client without a persistent store.
    pub fn new(config: &ClientConfig) -> SpotResult<Self> {
        let http = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout)
            .build()
            .map_err(|e| SpotError::Network {
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        // A trailing slash makes `Url::join` append instead of replacing the last segment
        let mut base = config.api_url.trim_end_matches('/').to_string();
        base.push('/');

        Ok(Self {
            http,
            base_url: Url::parse(&base)?,
            session: SessionHandle::new(),
            store: None,
        })
    }

    /// Creates a client that persists its session in `store` and restores
    /// any session saved by a previous run.
    pub fn with_store(config: &ClientConfig, store: Arc<LocalStore>) -> SpotResult<Self> {
        let mut client = Self::new(config)?;
        if let Some(saved) = store.load_session()? {
            debug!(session = %saved.key(), "Restored saved session");
            client.session.set(saved);
        }
        client.store = Some(store);
        Ok(client)
    }

    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    pub fn store(&self) -> Option<&Arc<LocalStore>> {
        self.store.as_ref()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Id of the logged-in user, or `NotLoggedIn`.
    pub fn require_user_id(&self) -> SpotResult<i64> {
        self.session.user_id().ok_or(SpotError::NotLoggedIn)
    }

    /// Installs a session in memory and in the store.
    pub fn set_session(&self, session: AuthSession) -> SpotResult<()> {
        if let Some(store) = &self.store {
            store.save_session(&session)?;
        }
        info!(session = %session.key(), role = %session.role, "Session stored");
        self.session.set(session);
        Ok(())
    }

    /// Drops credentials everywhere and notifies session subscribers.
    pub fn clear_session(&self) {
        if let Some(store) = &self.store {
            if let Err(e) = store.clear_session() {
                warn!(error = %e, "Failed to clear stored session");
            }
        }
        self.session.clear();
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> SpotResult<T> {
        decode(path, self.execute(Method::GET, path, &[], None).await?)
    }

    pub async fn get_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> SpotResult<T> {
        decode(path, self.execute(Method::GET, path, query, None).await?)
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> SpotResult<T> {
        let body = serde_json::to_value(body)?;
        decode(path, self.execute(Method::POST, path, &[], Some(body)).await?)
    }

    /// POST without a body; parameters travel in the query string.
    pub async fn post_empty<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> SpotResult<T> {
        decode(path, self.execute(Method::POST, path, query, None).await?)
    }

    pub async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> SpotResult<T> {
        let body = serde_json::to_value(body)?;
        decode(path, self.execute(Method::PUT, path, &[], Some(body)).await?)
    }

    /// PUT without a body.
    pub async fn put_empty<T: DeserializeOwned>(&self, path: &str) -> SpotResult<T> {
        decode(path, self.execute(Method::PUT, path, &[], None).await?)
    }

    /// DELETE; whatever the backend answers with is discarded.
    pub async fn delete(&self, path: &str) -> SpotResult<()> {
        self.execute(Method::DELETE, path, &[], None).await?;
        Ok(())
    }

    /// Sends one request and returns the unwrapped payload.
    async fn execute(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<Value>,
    ) -> SpotResult<Value> {
        let correlation_id = generate_correlation_id();
        let url = self.url_for(path, query)?;
        let public = is_public_path(path);

        let mut request = self.http.request(method.clone(), url.clone());
        let session = if public { None } else { self.session.get() };
        if let Some(session) = &session {
            request = request.header(AUTHORIZATION, session.authorization());
        }
        if let Some(body) = &body {
            request = request.json(body);
        }

        debug!(
            correlation_id = %correlation_id,
            method = %method,
            url = %url,
            session = %session.as_ref().map(|s| s.key().to_string()).unwrap_or_default(),
            "Sending request"
        );

        let start = Instant::now();
        let response = request.send().await.map_err(|e| {
            error!(
                correlation_id = %correlation_id,
                error = %e,
                duration_ms = start.elapsed().as_millis() as u64,
                "Request failed"
            );
            SpotError::from(e)
        })?;

        let status = response.status();
        let text = response.text().await?;

        debug!(
            correlation_id = %correlation_id,
            status = %status,
            duration_ms = start.elapsed().as_millis() as u64,
            "Response received"
        );

        if status == StatusCode::UNAUTHORIZED && !public {
            warn!(
                correlation_id = %correlation_id,
                url = %url,
                "Unauthorized, clearing session"
            );
            self.clear_session();
            return Err(SpotError::Unauthorized);
        }

        if !status.is_success() {
            let message = error_message(status, &text);
            warn!(
                correlation_id = %correlation_id,
                status = %status,
                message = %message,
                "Backend returned error"
            );
            return Err(SpotError::api(status, message));
        }

        let value = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text)?
        };

        unwrap_envelope(value).map_err(|message| {
            warn!(
                correlation_id = %correlation_id,
                message = %message,
                "Backend returned ERROR envelope"
            );
            SpotError::api(status, message)
        })
    }

    fn url_for(&self, path: &str, query: &[(&str, String)]) -> SpotResult<Url> {
        let mut url = self.base_url.join(path.trim_start_matches('/'))?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }
}

fn is_public_path(path: &str) -> bool {
    let path = format!("/{}", path.trim_start_matches('/'));
    PUBLIC_PATHS.iter().any(|prefix| path.starts_with(prefix))
}

/// Picks the most useful message out of an error body.
fn error_message(status: StatusCode, text: &str) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(text) {
        if let Some(Value::String(message)) = map.get("message") {
            if !message.is_empty() {
                return message.clone();
            }
        }
    }
    let trimmed = text.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }
    status
        .canonical_reason()
        .unwrap_or("Request failed")
        .to_string()
}

fn decode<T: DeserializeOwned>(path: &str, value: Value) -> SpotResult<T> {
    serde_json::from_value(value).map_err(|e| {
        warn!(path = %path, error = %e, "Failed to decode response payload");
        SpotError::Decode {
            message: format!("{path}: {e}"),
        }
    })
}

/// Millisecond timestamp and a random suffix, both hex.
fn generate_correlation_id() -> String {
    let millis = chrono::Utc::now().timestamp_millis() as u64;
    let suffix: u32 = rand::thread_rng().gen();
    format!("{:x}-{:08x}", millis & 0xFFFF_FFFF, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_paths() {
        assert!(is_public_path("/auth/login"));
        assert!(is_public_path("auth/login/student-id"));
        assert!(is_public_path("/auth/check-email"));
        assert!(!is_public_path("/auth/logout"));
        assert!(!is_public_path("/sections"));
    }

    #[test]
    fn test_url_join_keeps_api_prefix() {
        let client = SpotClient::new(&ClientConfig::with_api_url("http://localhost:8080/api")).unwrap();
        let url = client
            .url_for("/schedules", &[("sectionId", "12".to_string())])
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/schedules?sectionId=12");
    }

    #[test]
    fn test_error_message_prefers_envelope() {
        let body = r#"{"result":"ERROR","message":"Seat already taken","data":null}"#;
        assert_eq!(error_message(StatusCode::BAD_REQUEST, body), "Seat already taken");
        assert_eq!(error_message(StatusCode::BAD_REQUEST, "plain text"), "plain text");
        assert_eq!(error_message(StatusCode::NOT_FOUND, ""), "Not Found");
    }

    #[test]
    fn test_correlation_id_format() {
        let id = generate_correlation_id();
        assert!(id.contains('-'));
        assert_ne!(id, generate_correlation_id());
    }
}
