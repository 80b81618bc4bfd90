use super::or_empty;
use crate::client::SpotClient;
use crate::error::SpotResult;
use crate::models::{Schedule, ScheduleRequest};

pub struct ScheduleApi<'a> {
    client: &'a SpotClient,
}

impl<'a> ScheduleApi<'a> {
    pub(crate) fn new(client: &'a SpotClient) -> Self {
        Self { client }
    }

    /// Weekly slots of a section, ordered by day then start time.
    pub async fn list_by_section(&self, section_id: i64) -> SpotResult<Vec<Schedule>> {
        let mut schedules: Vec<Schedule> = or_empty(
            self.client
                .get_query("/schedules", &[("sectionId", section_id.to_string())])
                .await,
            "schedules",
        )?;
        schedules.sort_by_key(|s| (s.day_of_week, s.time_start));
        Ok(schedules)
    }

    pub async fn get(&self, id: i64) -> SpotResult<Schedule> {
        self.client.get(&format!("/schedules/{id}")).await
    }

    /// Times are sent as `HH:mm`.
    pub async fn create(&self, request: &ScheduleRequest) -> SpotResult<Schedule> {
        self.client.post("/schedules", request).await
    }

    pub async fn update(&self, id: i64, request: &ScheduleRequest) -> SpotResult<Schedule> {
        self.client.put(&format!("/schedules/{id}"), request).await
    }

    pub async fn delete(&self, id: i64) -> SpotResult<()> {
        self.client.delete(&format!("/schedules/{id}")).await
    }
}
