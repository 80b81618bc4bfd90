use super::or_empty;
use crate::client::SpotClient;
use crate::error::SpotResult;
use crate::models::{CreateTeacherRequest, Teacher, TeacherUpdateRequest};
use serde_json::Value;
use tracing::debug;

pub struct TeacherApi<'a> {
    client: &'a SpotClient,
}

impl<'a> TeacherApi<'a> {
    pub(crate) fn new(client: &'a SpotClient) -> Self {
        Self { client }
    }

    /// All teachers. System admins and plain admins see the list on
    /// different endpoints, so the admin one is tried when the first fails.
    pub async fn list(&self) -> SpotResult<Vec<Teacher>> {
        match self.client.get("/system-admin/teachers").await {
            Ok(teachers) => Ok(teachers),
            Err(e) if e.needs_reauth() => Err(e),
            Err(e) => {
                debug!(error = %e, "System admin teacher list unavailable, trying admin endpoint");
                or_empty(self.client.get("/admin/teachers").await, "teachers")
            }
        }
    }

    pub async fn get(&self, id: i64) -> SpotResult<Teacher> {
        self.client.get(&format!("/admin/teachers/{id}")).await
    }

    /// Profile of the logged-in teacher.
    pub async fn me(&self) -> SpotResult<Teacher> {
        self.client.get("/teacher-profile/me").await
    }

    pub async fn update_me(&self, request: &TeacherUpdateRequest) -> SpotResult<Teacher> {
        self.client.put("/teacher-profile/me", request).await
    }

    pub async fn create(&self, request: &CreateTeacherRequest) -> SpotResult<Teacher> {
        self.client.post("/admin/create-teacher", request).await
    }

    pub async fn assign_to_section(&self, teacher_id: i64, section_id: i64) -> SpotResult<()> {
        let _: Value = self
            .client
            .post_empty(&format!("/teachers/{teacher_id}/assign/{section_id}"), &[])
            .await?;
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> SpotResult<()> {
        self.client.delete(&format!("/admin/teachers/{id}")).await
    }
}
