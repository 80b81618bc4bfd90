use super::or_empty;
use crate::client::SpotClient;
use crate::error::SpotResult;
use crate::models::{OverrideSeatRequest, PickSeatRequest, Seat, SeatMap};

pub struct SeatApi<'a> {
    client: &'a SpotClient,
}

impl<'a> SeatApi<'a> {
    pub(crate) fn new(client: &'a SpotClient) -> Self {
        Self { client }
    }

    /// Occupied seats of a section.
    pub async fn list_by_section(&self, section_id: i64) -> SpotResult<Vec<Seat>> {
        or_empty(self.fetch_by_section(section_id).await, "seats")
    }

    /// Occupied seats, propagating the failure.
    pub async fn fetch_by_section(&self, section_id: i64) -> SpotResult<Vec<Seat>> {
        self.client
            .get_query("/seats", &[("sectionId", section_id.to_string())])
            .await
    }

    /// The seat a student holds in a section, if any.
    pub async fn get_for_student(&self, student_id: i64, section_id: i64) -> SpotResult<Option<Seat>> {
        let result = self
            .client
            .get_query(
                "/seats/student",
                &[
                    ("studentId", student_id.to_string()),
                    ("sectionId", section_id.to_string()),
                ],
            )
            .await;
        match result {
            Ok(seat) => Ok(seat),
            // The backend answers 404 when the student has not picked yet
            Err(e) if e.status() == Some(404) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Picks a seat for the logged-in student.
    pub async fn pick(&self, section_id: i64, row: u32, column: u32) -> SpotResult<Seat> {
        let request = PickSeatRequest {
            student_id: self.client.require_user_id()?,
            section_id,
            row,
            column,
        };
        self.client.post("/seats/pick", &request).await
    }

    /// Moves a student to a seat on the teacher's authority.
    pub async fn override_seat(
        &self,
        section_id: i64,
        student_id: i64,
        row: u32,
        column: u32,
    ) -> SpotResult<Seat> {
        let request = OverrideSeatRequest {
            student_id,
            section_id,
            row,
            column,
            teacher_id: self.client.require_user_id()?,
        };
        self.client.post("/seats/override", &request).await
    }

    /// Declared layout plus occupied seats.
    pub async fn seat_map(&self, section_id: i64) -> SpotResult<SeatMap> {
        self.client.get(&format!("/seats/{section_id}/map")).await
    }
}
