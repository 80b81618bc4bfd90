use super::or_empty;
use crate::client::SpotClient;
use crate::error::SpotResult;
use crate::models::{Section, SectionCreateRequest, SectionUpdateRequest};
use serde_json::Value;
use tracing::{debug, warn};

pub struct SectionApi<'a> {
    client: &'a SpotClient,
}

impl<'a> SectionApi<'a> {
    pub(crate) fn new(client: &'a SpotClient) -> Self {
        Self { client }
    }

    pub async fn list_by_course(&self, course_id: i64) -> SpotResult<Vec<Section>> {
        or_empty(
            self.client
                .get_query("/sections", &[("courseId", course_id.to_string())])
                .await,
            "sections",
        )
    }

    /// Sections of every course. The backend has no flat listing, so this
    /// walks the courses one by one and skips any whose sections fail.
    pub async fn list_all(&self) -> SpotResult<Vec<Section>> {
        let courses = self.client.courses().list().await?;
        let mut sections = Vec::new();
        for course in courses {
            let result: SpotResult<Vec<Section>> = self
                .client
                .get_query("/sections", &[("courseId", course.id.to_string())])
                .await;
            match result {
                Ok(found) => sections.extend(found),
                Err(e) if e.needs_reauth() => return Err(e),
                Err(e) => warn!(course_id = course.id, error = %e, "Skipping course sections"),
            }
        }
        debug!(count = sections.len(), "Collected sections across courses");
        Ok(sections)
    }

    pub async fn list_by_teacher(&self, teacher_id: i64) -> SpotResult<Vec<Section>> {
        or_empty(
            self.client
                .get_query("/sections", &[("teacherId", teacher_id.to_string())])
                .await,
            "teacher sections",
        )
    }

    pub async fn get(&self, id: i64) -> SpotResult<Section> {
        self.client.get(&format!("/sections/{id}")).await
    }

    pub async fn get_by_enrollment_key(&self, enrollment_key: &str) -> SpotResult<Section> {
        self.client
            .get(&format!("/sections/enrollment-key/{}", enrollment_key.trim()))
            .await
    }

    pub async fn create(&self, request: &SectionCreateRequest) -> SpotResult<Section> {
        self.client.post("/sections", request).await
    }

    pub async fn update(&self, id: i64, request: &SectionUpdateRequest) -> SpotResult<Section> {
        self.client.put(&format!("/sections/{id}"), request).await
    }

    pub async fn delete(&self, id: i64) -> SpotResult<()> {
        self.client.delete(&format!("/sections/{id}")).await
    }

    pub async fn assign_teacher(&self, section_id: i64, teacher_id: i64) -> SpotResult<()> {
        let _: Value = self
            .client
            .post_empty(
                &format!("/sections/{section_id}/assign"),
                &[("teacherId", teacher_id.to_string())],
            )
            .await?;
        Ok(())
    }

    /// Closes the section for good.
    pub async fn end_section(&self, section_id: i64) -> SpotResult<()> {
        self.lifecycle(section_id, "end").await
    }

    pub async fn open_enrollment(&self, section_id: i64) -> SpotResult<()> {
        self.lifecycle(section_id, "open").await
    }

    pub async fn close_enrollment(&self, section_id: i64) -> SpotResult<()> {
        self.lifecycle(section_id, "close").await
    }

    async fn lifecycle(&self, section_id: i64, action: &str) -> SpotResult<()> {
        let _: Value = self
            .client
            .post_empty(&format!("/sections/{section_id}/{action}"), &[])
            .await?;
        Ok(())
    }
}
