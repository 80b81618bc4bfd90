/// Row types for the local store

use crate::models::{Notification, NotificationType};
use crate::session::{AuthSession, UserRole};
use chrono::NaiveDateTime;

#[derive(Debug, Clone)]
pub struct DbSession {
    pub token: String,
    pub token_type: String,
    pub user_id: i64,
    pub role: String,
    pub email: String,
    pub name: String,
    pub saved_at: NaiveDateTime,
}

impl DbSession {
    /// Returns `None` when the stored role is no longer recognized.
    pub fn into_session(self) -> Option<AuthSession> {
        let role: UserRole = self.role.parse().ok()?;
        Some(AuthSession {
            token: self.token,
            token_type: self.token_type,
            user_id: self.user_id,
            role,
            email: self.email,
            name: self.name,
        })
    }
}

#[derive(Debug, Clone)]
pub struct DbNotification {
    pub id: i64,
    pub title: String,
    pub message: String,
    pub kind: String,
    pub related_entity_id: Option<i64>,
    pub timestamp: NaiveDateTime,
    pub is_read: bool,
}

impl DbNotification {
    pub fn into_notification(self) -> Notification {
        Notification {
            id: self.id,
            title: self.title,
            message: self.message,
            // Rows written by a newer client may carry kinds we don't know yet
            kind: self.kind.parse().unwrap_or(NotificationType::System),
            related_entity_id: self.related_entity_id,
            timestamp: self.timestamp,
            is_read: self.is_read,
        }
    }
}
