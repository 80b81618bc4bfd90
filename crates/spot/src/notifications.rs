//! Local activity log.
//!
//! Entries live newest-first in memory. When a [`LocalStore`] is attached
//! every mutation is written through to it, so the log survives restarts.

use crate::error::SpotResult;
use crate::models::{Notification, NotificationType};
use crate::store::LocalStore;
use chrono::{Local, NaiveDate};
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

/// The log as shared between view-models.
pub type SharedLog = Arc<Mutex<NotificationLog>>;

/// Appends an activity entry through `log`, if there is one.
///
/// Failing to record activity never fails the action that triggered it.
pub fn record_activity<F>(log: Option<&SharedLog>, entry: F)
where
    F: FnOnce(&mut NotificationLog) -> SpotResult<i64>,
{
    let Some(log) = log else {
        return;
    };
    let result = match log.lock() {
        Ok(mut guard) => entry(&mut guard),
        Err(_) => {
            warn!("Activity log lock poisoned");
            return;
        }
    };
    if let Err(e) = result {
        warn!(error = %e, "Failed to record activity");
    }
}

pub struct NotificationLog {
    entries: Vec<Notification>,
    store: Option<Arc<LocalStore>>,
    last_id: i64,
}

impl NotificationLog {
    /// In-memory log only.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            store: None,
            last_id: 0,
        }
    }

    /// Log backed by `store`, starting from whatever it already holds.
    pub fn with_store(store: Arc<LocalStore>) -> SpotResult<Self> {
        let entries = store.list_notifications()?;
        let last_id = entries.iter().map(|n| n.id).max().unwrap_or(0);
        debug!(count = entries.len(), "Loaded activity log");
        Ok(Self {
            entries,
            store: Some(store),
            last_id,
        })
    }

    /// Newest first.
    pub fn entries(&self) -> &[Notification] {
        &self.entries
    }

    pub fn unread_count(&self) -> usize {
        self.entries.iter().filter(|n| !n.is_read).count()
    }

    /// Adds an entry and returns its id.
    ///
    /// Ids are millisecond timestamps, bumped when two entries land in the
    /// same millisecond.
    pub fn add(
        &mut self,
        kind: NotificationType,
        title: impl Into<String>,
        message: impl Into<String>,
        related_entity_id: Option<i64>,
    ) -> SpotResult<i64> {
        let now = Local::now();
        let id = now.timestamp_millis().max(self.last_id + 1);
        let notification = Notification {
            id,
            title: title.into(),
            message: message.into(),
            kind,
            related_entity_id,
            timestamp: now.naive_local(),
            is_read: false,
        };

        if let Some(store) = &self.store {
            store.insert_notification(&notification)?;
        }
        debug!(id, kind = %kind, "Activity logged");
        self.last_id = id;
        self.entries.insert(0, notification);
        Ok(id)
    }

    pub fn log_seat_selection(
        &mut self,
        section_name: &str,
        row: u32,
        column: u32,
        section_id: i64,
    ) -> SpotResult<i64> {
        self.add(
            NotificationType::SeatPlan,
            NotificationType::SeatPlan.title(),
            format!("Selected seat at row {row}, column {column} in {section_name}"),
            Some(section_id),
        )
    }

    pub fn log_attendance_recorded(
        &mut self,
        section_name: &str,
        date: NaiveDate,
        section_id: i64,
    ) -> SpotResult<i64> {
        self.add(
            NotificationType::Attendance,
            NotificationType::Attendance.title(),
            format!(
                "Attendance recorded for {section_name} on {}",
                date.format("%Y-%m-%d")
            ),
            Some(section_id),
        )
    }

    pub fn log_qr_scan(&mut self, section_name: &str, section_id: i64) -> SpotResult<i64> {
        self.add(
            NotificationType::Attendance,
            NotificationType::Attendance.title(),
            format!("Scanned QR code for {section_name} attendance"),
            Some(section_id),
        )
    }

    pub fn log_enrollment(
        &mut self,
        course_name: &str,
        section_name: &str,
        section_id: i64,
    ) -> SpotResult<i64> {
        self.add(
            NotificationType::Enrollment,
            NotificationType::Enrollment.title(),
            format!("Successfully enrolled in {course_name} - {section_name}"),
            Some(section_id),
        )
    }

    pub fn log_profile_update(&mut self, field: &str, user_id: Option<i64>) -> SpotResult<i64> {
        self.add(
            NotificationType::ProfileUpdate,
            NotificationType::ProfileUpdate.title(),
            format!("Updated profile information: {field}"),
            user_id,
        )
    }

    pub fn log_system(&mut self, message: &str) -> SpotResult<i64> {
        self.add(
            NotificationType::System,
            NotificationType::System.title(),
            message,
            None,
        )
    }

    /// Returns false when no entry has that id.
    pub fn mark_read(&mut self, id: i64) -> SpotResult<bool> {
        let Some(entry) = self.entries.iter_mut().find(|n| n.id == id) else {
            return Ok(false);
        };
        if let Some(store) = &self.store {
            store.mark_notification_read(id)?;
        }
        entry.is_read = true;
        Ok(true)
    }

    pub fn mark_all_read(&mut self) -> SpotResult<usize> {
        if let Some(store) = &self.store {
            store.mark_all_notifications_read()?;
        }
        let mut changed = 0;
        for entry in self.entries.iter_mut().filter(|n| !n.is_read) {
            entry.is_read = true;
            changed += 1;
        }
        Ok(changed)
    }

    pub fn delete(&mut self, id: i64) -> SpotResult<bool> {
        let Some(index) = self.entries.iter().position(|n| n.id == id) else {
            return Ok(false);
        };
        if let Some(store) = &self.store {
            store.delete_notification(id)?;
        }
        self.entries.remove(index);
        Ok(true)
    }

    pub fn clear_all(&mut self) -> SpotResult<usize> {
        if let Some(store) = &self.store {
            store.clear_notifications()?;
        }
        let removed = self.entries.len();
        self.entries.clear();
        Ok(removed)
    }
}

impl Default for NotificationLog {
    fn default() -> Self {
        Self::new()
    }
}
