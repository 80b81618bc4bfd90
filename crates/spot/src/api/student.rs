use super::or_empty;
use crate::client::SpotClient;
use crate::error::SpotResult;
use crate::models::{CreateStudentRequest, Student, StudentUpdateRequest};

pub struct StudentApi<'a> {
    client: &'a SpotClient,
}

impl<'a> StudentApi<'a> {
    pub(crate) fn new(client: &'a SpotClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> SpotResult<Vec<Student>> {
        or_empty(self.client.get("/admin/students").await, "students")
    }

    pub async fn get(&self, id: i64) -> SpotResult<Student> {
        self.client.get(&format!("/students/{id}")).await
    }

    pub async fn get_by_physical_id(&self, physical_id: &str) -> SpotResult<Student> {
        self.client
            .get(&format!("/students/physical-id/{}", physical_id.trim()))
            .await
    }

    pub async fn update(&self, id: i64, request: &StudentUpdateRequest) -> SpotResult<Student> {
        self.client.put(&format!("/students/{id}"), request).await
    }

    pub async fn create(&self, request: &CreateStudentRequest) -> SpotResult<Student> {
        self.client.post("/admin/create-student", request).await
    }

    pub async fn delete(&self, id: i64) -> SpotResult<()> {
        self.client.delete(&format!("/admin/students/{id}")).await
    }
}
