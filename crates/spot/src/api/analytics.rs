use super::{or_default, or_empty};
use crate::client::SpotClient;
use crate::error::SpotResult;
use crate::models::{AttendanceAnalytics, StudentAttendance};
use chrono::NaiveDate;

pub struct AnalyticsApi<'a> {
    client: &'a SpotClient,
}

impl<'a> AnalyticsApi<'a> {
    pub(crate) fn new(client: &'a SpotClient) -> Self {
        Self { client }
    }

    /// Section-wide analytics; an empty report when the backend fails.
    pub async fn section(&self, section_id: i64) -> SpotResult<AttendanceAnalytics> {
        let mut analytics: AttendanceAnalytics = or_default(
            self.client.get(&format!("/analytics/{section_id}")).await,
            "analytics",
        )?;
        if analytics.section_id == 0 {
            analytics.section_id = section_id;
        }
        Ok(analytics)
    }

    pub async fn section_range(
        &self,
        section_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> SpotResult<AttendanceAnalytics> {
        self.client
            .get_query(
                &format!("/analytics/{section_id}/range"),
                &[
                    ("startDate", start.format("%Y-%m-%d").to_string()),
                    ("endDate", end.format("%Y-%m-%d").to_string()),
                ],
            )
            .await
    }

    pub async fn students(&self, section_id: i64) -> SpotResult<Vec<StudentAttendance>> {
        or_empty(
            self.client
                .get(&format!("/analytics/{section_id}/students"))
                .await,
            "student analytics",
        )
    }

    pub async fn student_in_section(
        &self,
        section_id: i64,
        student_id: i64,
    ) -> SpotResult<StudentAttendance> {
        self.client
            .get(&format!("/analytics/{section_id}/students/{student_id}"))
            .await
    }
}
