use super::or_empty;
use crate::client::SpotClient;
use crate::error::SpotResult;
use crate::models::{EnrollRequest, Enrollment};

pub struct EnrollmentApi<'a> {
    client: &'a SpotClient,
}

impl<'a> EnrollmentApi<'a> {
    pub(crate) fn new(client: &'a SpotClient) -> Self {
        Self { client }
    }

    pub async fn list_by_student(&self, student_id: i64) -> SpotResult<Vec<Enrollment>> {
        or_empty(self.fetch_by_student(student_id).await, "student enrollments")
    }

    /// Like [`Self::list_by_student`] but failures reach the caller.
    pub async fn fetch_by_student(&self, student_id: i64) -> SpotResult<Vec<Enrollment>> {
        self.client
            .get(&format!("/enrollments/student/{student_id}"))
            .await
    }

    pub async fn list_by_section(&self, section_id: i64) -> SpotResult<Vec<Enrollment>> {
        or_empty(
            self.client
                .get(&format!("/enrollments/section/{section_id}"))
                .await,
            "section enrollments",
        )
    }

    pub async fn is_enrolled(&self, student_id: i64, section_id: i64) -> SpotResult<bool> {
        self.client
            .get_query(
                "/enrollments/status",
                &[
                    ("studentId", student_id.to_string()),
                    ("sectionId", section_id.to_string()),
                ],
            )
            .await
    }

    /// Enrolls the logged-in student with a section's enrollment key.
    pub async fn enroll(&self, enrollment_key: &str) -> SpotResult<Enrollment> {
        let request = EnrollRequest {
            enrollment_key: enrollment_key.trim().to_string(),
        };
        self.client.post("/enrollments/enroll", &request).await
    }

    pub async fn delete(&self, id: i64) -> SpotResult<()> {
        self.client.delete(&format!("/enrollments/{id}")).await
    }
}
