use super::or_empty;
use crate::client::SpotClient;
use crate::error::SpotResult;
use crate::models::{Course, CourseCreateRequest, CourseUpdateRequest};

pub struct CourseApi<'a> {
    client: &'a SpotClient,
}

impl<'a> CourseApi<'a> {
    pub(crate) fn new(client: &'a SpotClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> SpotResult<Vec<Course>> {
        or_empty(self.client.get("/courses").await, "courses")
    }

    pub async fn get(&self, id: i64) -> SpotResult<Course> {
        self.client.get(&format!("/courses/{id}")).await
    }

    pub async fn get_by_code(&self, course_code: &str) -> SpotResult<Course> {
        self.client
            .get(&format!("/courses/code/{}", course_code.trim()))
            .await
    }

    pub async fn create(&self, request: &CourseCreateRequest) -> SpotResult<Course> {
        self.client.post("/courses", request).await
    }

    pub async fn update(&self, id: i64, request: &CourseUpdateRequest) -> SpotResult<Course> {
        self.client.put(&format!("/courses/{id}"), request).await
    }

    pub async fn delete(&self, id: i64) -> SpotResult<()> {
        self.client.delete(&format!("/courses/{id}")).await
    }
}
