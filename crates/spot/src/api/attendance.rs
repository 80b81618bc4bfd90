use super::or_empty;
use crate::client::SpotClient;
use crate::error::SpotResult;
use crate::models::{Attendance, LogAttendanceRequest, QrCodeResponse};
use chrono::NaiveDate;
use tracing::info;

pub struct AttendanceApi<'a> {
    client: &'a SpotClient,
}

impl<'a> AttendanceApi<'a> {
    pub(crate) fn new(client: &'a SpotClient) -> Self {
        Self { client }
    }

    /// Logs the current student into a section. The server stamps the time.
    pub async fn log(&self, section_id: i64) -> SpotResult<Attendance> {
        let record: Attendance = self
            .client
            .post("/attendance/log", &LogAttendanceRequest { section_id })
            .await?;
        info!(section_id, attendance_id = record.id, "Attendance logged");
        Ok(record)
    }

    pub async fn list_by_section(&self, section_id: i64) -> SpotResult<Vec<Attendance>> {
        or_empty(
            self.client
                .get(&format!("/attendance/section/{section_id}"))
                .await,
            "section attendance",
        )
    }

    pub async fn list_by_student(&self, student_id: i64) -> SpotResult<Vec<Attendance>> {
        or_empty(
            self.client
                .get(&format!("/attendance/student/{student_id}"))
                .await,
            "student attendance",
        )
    }

    pub async fn list_by_section_and_date(
        &self,
        section_id: i64,
        date: NaiveDate,
    ) -> SpotResult<Vec<Attendance>> {
        or_empty(
            self.client
                .get(&format!(
                    "/attendance/section/{section_id}/date/{}",
                    date.format("%Y-%m-%d")
                ))
                .await,
            "attendance by date",
        )
    }

    /// Issues a fresh attendance QR code for a section (teachers only).
    pub async fn generate_qr(&self, section_id: i64) -> SpotResult<QrCodeResponse> {
        self.client
            .post_empty(
                "/attendance/generate-qr",
                &[("sectionId", section_id.to_string())],
            )
            .await
    }

    pub async fn delete(&self, id: i64) -> SpotResult<()> {
        self.client.delete(&format!("/attendance/{id}")).await
    }
}
