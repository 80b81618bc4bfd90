//! Attendance QR payloads and the scan-to-log flow.
//!
//! The wire format is the ASCII string `attend:<sectionId>`.

use crate::client::SpotClient;
use crate::error::{SpotError, SpotResult};
use crate::models::Attendance;
use thiserror::Error;
use tracing::{debug, info, warn};

pub const ATTENDANCE_PREFIX: &str = "attend:";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QrError {
    #[error("Invalid QR code format: empty payload")]
    Empty,

    #[error("Invalid QR code format: expected attend:<sectionId>")]
    WrongPrefix,

    #[error("Invalid QR code format: section id {0:?} is not a number")]
    InvalidSectionId(String),
}

impl From<QrError> for SpotError {
    fn from(err: QrError) -> Self {
        SpotError::InvalidQr {
            message: err.to_string(),
        }
    }
}

/// Extracts the section id from a scanned payload.
pub fn parse_attendance_payload(payload: &str) -> Result<i64, QrError> {
    let payload = payload.trim();
    if payload.is_empty() {
        return Err(QrError::Empty);
    }
    let id = payload
        .strip_prefix(ATTENDANCE_PREFIX)
        .ok_or(QrError::WrongPrefix)?
        .trim();
    if id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
        return Err(QrError::InvalidSectionId(id.to_string()));
    }
    id.parse::<i64>()
        .map_err(|_| QrError::InvalidSectionId(id.to_string()))
}

pub fn format_attendance_payload(section_id: i64) -> String {
    format!("{ATTENDANCE_PREFIX}{section_id}")
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScanState {
    Scanning,
    Submitting { section_id: i64 },
    Logged(Attendance),
    Failed(String),
}

/// What kind of failure a scan ended in, for picking the message style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanFailureKind {
    /// Student already checked in today
    DuplicateAttendance,
    ServerError,
    InvalidQr,
    General,
}

impl ScanFailureKind {
    pub fn classify(message: &str) -> Self {
        let message = message.to_lowercase();
        if ["already recorded", "already marked", "already logged", "duplicate"]
            .iter()
            .any(|p| message.contains(p))
        {
            ScanFailureKind::DuplicateAttendance
        } else if ["server", "network", "connection"].iter().any(|p| message.contains(p)) {
            ScanFailureKind::ServerError
        } else if message.contains("invalid") || message.contains("format") {
            ScanFailureKind::InvalidQr
        } else {
            ScanFailureKind::General
        }
    }
}

/// Drives one scan at a time: a payload is accepted only while scanning,
/// and after `Logged` or `Failed` the scanner stays put until [`rearm`].
///
/// [`rearm`]: AttendanceScanner::rearm
#[derive(Debug, Clone)]
pub struct AttendanceScanner {
    state: ScanState,
}

impl AttendanceScanner {
    pub fn new() -> Self {
        Self {
            state: ScanState::Scanning,
        }
    }

    pub fn state(&self) -> &ScanState {
        &self.state
    }

    /// Feeds a decoded payload. Returns the section to log when the payload
    /// is valid and the scanner was idle.
    pub fn accept(&mut self, payload: &str) -> Option<i64> {
        if self.state != ScanState::Scanning {
            debug!("Scanner busy, ignoring payload");
            return None;
        }
        match parse_attendance_payload(payload) {
            Ok(section_id) => {
                self.state = ScanState::Submitting { section_id };
                Some(section_id)
            }
            Err(e) => {
                warn!(error = %e, "Rejected QR payload");
                self.state = ScanState::Failed(e.to_string());
                None
            }
        }
    }

    /// Records the outcome of the log call started by [`accept`].
    ///
    /// [`accept`]: AttendanceScanner::accept
    pub fn complete(&mut self, result: SpotResult<Attendance>) {
        if !matches!(self.state, ScanState::Submitting { .. }) {
            return;
        }
        self.state = match result {
            Ok(record) => ScanState::Logged(record),
            Err(e) => ScanState::Failed(e.user_message()),
        };
    }

    /// Accepts a payload and, if valid, logs attendance through `client`.
    pub async fn scan(&mut self, client: &SpotClient, payload: &str) -> &ScanState {
        if let Some(section_id) = self.accept(payload) {
            let result = client.attendance().log(section_id).await;
            if result.is_ok() {
                info!(section_id, "Attendance recorded from QR scan");
            }
            self.complete(result);
        }
        &self.state
    }

    pub fn failure_kind(&self) -> Option<ScanFailureKind> {
        match &self.state {
            ScanState::Failed(message) => Some(ScanFailureKind::classify(message)),
            _ => None,
        }
    }

    /// Back to scanning after a result was shown.
    pub fn rearm(&mut self) {
        self.state = ScanState::Scanning;
    }
}

impl Default for AttendanceScanner {
    fn default() -> Self {
        Self::new()
    }
}
