/// Types for seat plans
use super::people::Student;
use serde::{Deserialize, Serialize};

/// An occupied seat in a section's seat plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seat {
    #[serde(default)]
    pub id: i64,
    pub section_id: i64,
    #[serde(default)]
    pub student: Option<Student>,
    /// Flat form used by the web endpoints instead of an embedded student
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_id: Option<i64>,
    pub row: u32,
    pub column: u32,
}

impl Seat {
    /// Id of the occupying student, whichever shape the backend used.
    pub fn occupant_id(&self) -> Option<i64> {
        self.student.as_ref().map(|s| s.id).or(self.student_id)
    }

    pub fn is_taken(&self) -> bool {
        self.occupant_id().is_some()
    }
}

/// Seat layout declared by the backend together with the occupied seats
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeatMap {
    pub rows: u32,
    pub columns: u32,
    #[serde(default)]
    pub seats: Vec<Seat>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PickSeatRequest {
    pub student_id: i64,
    pub section_id: i64,
    pub row: u32,
    pub column: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverrideSeatRequest {
    pub student_id: i64,
    pub section_id: i64,
    pub row: u32,
    pub column: u32,
    pub teacher_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_occupant_from_flat_student_id() {
        let seat: Seat = serde_json::from_value(json!({
            "id": 9, "sectionId": 2, "studentId": 77, "row": 1, "column": 4
        }))
        .unwrap();
        assert_eq!(seat.occupant_id(), Some(77));
        assert!(seat.is_taken());
    }

    #[test]
    fn test_empty_seat() {
        let seat: Seat =
            serde_json::from_value(json!({ "sectionId": 2, "row": 0, "column": 0 })).unwrap();
        assert!(!seat.is_taken());
    }
}
