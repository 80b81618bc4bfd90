/// Types for the local activity log
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category of an activity-log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationType {
    SeatPlan,
    Attendance,
    Enrollment,
    ProfileUpdate,
    Course,
    Section,
    Schedule,
    System,
}

impl NotificationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::SeatPlan => "SEAT_PLAN",
            NotificationType::Attendance => "ATTENDANCE",
            NotificationType::Enrollment => "ENROLLMENT",
            NotificationType::ProfileUpdate => "PROFILE_UPDATE",
            NotificationType::Course => "COURSE",
            NotificationType::Section => "SECTION",
            NotificationType::Schedule => "SCHEDULE",
            NotificationType::System => "SYSTEM",
        }
    }

    /// Default title shown for entries of this type.
    pub fn title(&self) -> &'static str {
        match self {
            NotificationType::SeatPlan => "Seat Plan",
            NotificationType::Attendance => "Attendance",
            NotificationType::Enrollment => "Enrollment",
            NotificationType::ProfileUpdate => "Profile Update",
            NotificationType::Course => "Course",
            NotificationType::Section => "Section",
            NotificationType::Schedule => "Schedule",
            NotificationType::System => "System",
        }
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SEAT_PLAN" => Ok(NotificationType::SeatPlan),
            "ATTENDANCE" => Ok(NotificationType::Attendance),
            "ENROLLMENT" => Ok(NotificationType::Enrollment),
            "PROFILE_UPDATE" => Ok(NotificationType::ProfileUpdate),
            "COURSE" => Ok(NotificationType::Course),
            "SECTION" => Ok(NotificationType::Section),
            "SCHEDULE" => Ok(NotificationType::Schedule),
            "SYSTEM" => Ok(NotificationType::System),
            other => Err(format!("unknown notification type {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: i64,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub related_entity_id: Option<i64>,
    pub timestamp: NaiveDateTime,
    pub is_read: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_string_round_trip_matches_serde() {
        for kind in [
            NotificationType::SeatPlan,
            NotificationType::ProfileUpdate,
            NotificationType::System,
        ] {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
            assert_eq!(kind.as_str().parse::<NotificationType>().unwrap(), kind);
        }
    }
}
