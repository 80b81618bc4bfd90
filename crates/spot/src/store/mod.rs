/// Local SQLite store for the saved session and the activity log

mod types;

pub use types::{DbNotification, DbSession};

use crate::error::{SpotError, SpotResult};
use crate::models::Notification;
use crate::session::AuthSession;
use chrono::Local;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

const SCHEMA_SQL: &str = include_str!("../../sql/init_store.sql");

pub struct LocalStore {
    db: Mutex<Connection>,
}

impl LocalStore {
    /// Opens (or creates) the store at `path` and initializes the schema
    pub fn open(path: impl AsRef<Path>) -> SpotResult<Self> {
        let conn = Connection::open(path.as_ref())?;
        debug!(path = %path.as_ref().display(), "Opened local store");
        Self::with_connection(conn)
    }

    /// Store that lives only as long as the process
    pub fn in_memory() -> SpotResult<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> SpotResult<Self> {
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(Self {
            db: Mutex::new(conn),
        })
    }

    fn conn(&self) -> SpotResult<MutexGuard<'_, Connection>> {
        self.db.lock().map_err(|_| SpotError::Store {
            message: "store lock poisoned".to_string(),
        })
    }

    /// Replaces the saved session
    pub fn save_session(&self, session: &AuthSession) -> SpotResult<()> {
        let db = self.conn()?;
        db.execute(
            "INSERT OR REPLACE INTO session (slot, token, token_type, user_id, role, email, name, saved_at)
             VALUES (1, ?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            (
                &session.token,
                &session.token_type,
                session.user_id,
                session.role.as_str(),
                &session.email,
                &session.name,
                Local::now().naive_local(),
            ),
        )?;
        Ok(())
    }

    pub fn load_session(&self) -> SpotResult<Option<AuthSession>> {
        let db = self.conn()?;
        let row = db
            .query_row(
                "SELECT token, token_type, user_id, role, email, name, saved_at
                 FROM session WHERE slot = 1",
                [],
                |row| {
                    Ok(DbSession {
                        token: row.get(0)?,
                        token_type: row.get(1)?,
                        user_id: row.get(2)?,
                        role: row.get(3)?,
                        email: row.get(4)?,
                        name: row.get(5)?,
                        saved_at: row.get(6)?,
                    })
                },
            )
            .optional()?;
        Ok(row.and_then(DbSession::into_session))
    }

    pub fn clear_session(&self) -> SpotResult<()> {
        let db = self.conn()?;
        db.execute("DELETE FROM session", [])?;
        Ok(())
    }

    /// Inserts a notification, replacing any row with the same id
    pub fn insert_notification(&self, notification: &Notification) -> SpotResult<()> {
        let db = self.conn()?;
        db.execute(
            "INSERT OR REPLACE INTO notifications
                (id, title, message, kind, related_entity_id, timestamp, is_read)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                notification.id,
                notification.title,
                notification.message,
                notification.kind.as_str(),
                notification.related_entity_id,
                notification.timestamp,
                notification.is_read,
            ],
        )?;
        Ok(())
    }

    /// All notifications, newest first
    pub fn list_notifications(&self) -> SpotResult<Vec<Notification>> {
        let db = self.conn()?;
        let mut stmt = db.prepare(
            "SELECT id, title, message, kind, related_entity_id, timestamp, is_read
             FROM notifications
             ORDER BY timestamp DESC, id DESC",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(DbNotification {
                id: row.get(0)?,
                title: row.get(1)?,
                message: row.get(2)?,
                kind: row.get(3)?,
                related_entity_id: row.get(4)?,
                timestamp: row.get(5)?,
                is_read: row.get(6)?,
            })
        })?;

        let mut notifications = Vec::new();
        for row in rows {
            notifications.push(row?.into_notification());
        }
        Ok(notifications)
    }

    /// Returns false if no notification had that id
    pub fn mark_notification_read(&self, id: i64) -> SpotResult<bool> {
        let db = self.conn()?;
        let changed = db.execute("UPDATE notifications SET is_read = 1 WHERE id = ?1", [id])?;
        Ok(changed > 0)
    }

    pub fn mark_all_notifications_read(&self) -> SpotResult<usize> {
        let db = self.conn()?;
        Ok(db.execute("UPDATE notifications SET is_read = 1 WHERE is_read = 0", [])?)
    }

    pub fn delete_notification(&self, id: i64) -> SpotResult<bool> {
        let db = self.conn()?;
        let changed = db.execute("DELETE FROM notifications WHERE id = ?1", [id])?;
        Ok(changed > 0)
    }

    pub fn clear_notifications(&self) -> SpotResult<usize> {
        let db = self.conn()?;
        Ok(db.execute("DELETE FROM notifications", [])?)
    }

    pub fn unread_count(&self) -> SpotResult<usize> {
        let db = self.conn()?;
        let count: i64 = db.query_row(
            "SELECT COUNT(*) FROM notifications WHERE is_read = 0",
            [],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NotificationType;
    use crate::session::UserRole;
    use chrono::NaiveDate;

    fn session() -> AuthSession {
        AuthSession {
            token: "tok".to_string(),
            token_type: "Bearer".to_string(),
            user_id: 7,
            role: UserRole::Teacher,
            email: "t@cit.edu".to_string(),
            name: "Tess".to_string(),
        }
    }

    fn notification(id: i64, minute: u32) -> Notification {
        Notification {
            id,
            title: "Attendance".to_string(),
            message: format!("entry {id}"),
            kind: NotificationType::Attendance,
            related_entity_id: Some(3),
            timestamp: NaiveDate::from_ymd_opt(2024, 3, 4)
                .unwrap()
                .and_hms_opt(9, minute, 0)
                .unwrap(),
            is_read: false,
        }
    }

    #[test]
    fn test_session_round_trip_and_clear() {
        let store = LocalStore::in_memory().unwrap();
        assert!(store.load_session().unwrap().is_none());

        store.save_session(&session()).unwrap();
        assert_eq!(store.load_session().unwrap(), Some(session()));

        let mut other = session();
        other.user_id = 8;
        store.save_session(&other).unwrap();
        assert_eq!(store.load_session().unwrap().unwrap().user_id, 8);

        store.clear_session().unwrap();
        assert!(store.load_session().unwrap().is_none());
    }

    #[test]
    fn test_notifications_newest_first() {
        let store = LocalStore::in_memory().unwrap();
        store.insert_notification(&notification(1, 0)).unwrap();
        store.insert_notification(&notification(2, 30)).unwrap();
        store.insert_notification(&notification(3, 15)).unwrap();

        let ids: Vec<i64> = store
            .list_notifications()
            .unwrap()
            .iter()
            .map(|n| n.id)
            .collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_read_flags_and_deletes() {
        let store = LocalStore::in_memory().unwrap();
        for id in 1..=3 {
            store.insert_notification(&notification(id, id as u32)).unwrap();
        }
        assert_eq!(store.unread_count().unwrap(), 3);

        assert!(store.mark_notification_read(2).unwrap());
        assert!(!store.mark_notification_read(99).unwrap());
        assert_eq!(store.unread_count().unwrap(), 2);

        assert_eq!(store.mark_all_notifications_read().unwrap(), 2);
        assert_eq!(store.unread_count().unwrap(), 0);

        assert!(store.delete_notification(1).unwrap());
        assert_eq!(store.list_notifications().unwrap().len(), 2);
        assert_eq!(store.clear_notifications().unwrap(), 2);
        assert!(store.list_notifications().unwrap().is_empty());
    }
}
