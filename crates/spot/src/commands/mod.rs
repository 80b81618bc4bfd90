pub mod analytics;
pub mod attend;
pub mod auth;
pub mod calendar;
pub mod courses;
pub mod dashboard;
pub mod enroll;
pub mod notifications;
pub mod schedules;
pub mod sections;
pub mod seats;

use anyhow::Context as _;
use spot::notifications::SharedLog;
use spot::{ClientConfig, LocalStore, NotificationLog, SpotClient};
use std::sync::{Arc, Mutex};
use tracing::debug;

/// What every command runs against: the client with its restored session
/// and the activity log, both backed by the same local store.
pub struct Context {
    pub client: SpotClient,
    pub activity: SharedLog,
}

impl Context {
    pub fn open(config: &ClientConfig) -> anyhow::Result<Self> {
        let store = Arc::new(
            LocalStore::open(&config.store_path)
                .with_context(|| format!("opening {}", config.store_path.display()))?,
        );
        let client = SpotClient::with_store(config, store.clone())?;
        let log = NotificationLog::with_store(store)?;
        debug!(api_url = %client.base_url(), "Client ready");
        Ok(Self {
            client,
            activity: Arc::new(Mutex::new(log)),
        })
    }
}
