/// Types for attendance records, QR codes and analytics
use super::academic::Section;
use super::people::Student;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One check-in of a student into a section on a date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendance {
    pub id: i64,
    #[serde(default)]
    pub student: Option<Student>,
    #[serde(default)]
    pub section: Option<Section>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_id: Option<i64>,
    pub date: NaiveDate,
    #[serde(default, with = "super::time::option")]
    pub start_time: Option<NaiveTime>,
    #[serde(default, with = "super::time::option")]
    pub end_time: Option<NaiveTime>,
}

impl Attendance {
    pub fn student_ref(&self) -> Option<i64> {
        self.student.as_ref().map(|s| s.id).or(self.student_id)
    }

    pub fn section_ref(&self) -> Option<i64> {
        self.section.as_ref().map(|s| s.id).or(self.section_id)
    }

    pub fn student_name(&self) -> Option<String> {
        self.student.as_ref().map(Student::full_name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogAttendanceRequest {
    pub section_id: i64,
}

/// QR code issued by the backend for a section's attendance window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrCodeResponse {
    #[serde(alias = "qrCodeData")]
    pub qr_code_url: String,
    #[serde(default)]
    pub qr_code_image_base64: String,
    pub section_id: i64,
    #[serde(default)]
    pub course_name: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub expires_in_seconds: u64,
}

/// Attendance on one date with the times needed to detect lateness
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceDetail {
    pub date: NaiveDate,
    pub present: bool,
    /// Actual check-in time
    #[serde(default, with = "super::time::option")]
    pub start_time: Option<NaiveTime>,
    #[serde(default, with = "super::time::option")]
    pub end_time: Option<NaiveTime>,
    /// Scheduled start of the class that day
    #[serde(default, with = "super::time::option")]
    pub schedule_start_time: Option<NaiveTime>,
    #[serde(default, with = "super::time::option")]
    pub schedule_end_time: Option<NaiveTime>,
}

/// A student's attendance statistics in one section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentAttendance {
    pub student_id: i64,
    #[serde(default)]
    pub student_name: String,
    #[serde(default)]
    pub section_id: Option<i64>,
    #[serde(default)]
    pub total_class_days: u32,
    #[serde(default)]
    pub days_present: u32,
    #[serde(default)]
    pub attendance_rate: f64,
    #[serde(default)]
    pub attendance_by_date: BTreeMap<NaiveDate, bool>,
    #[serde(default)]
    pub attendance_data: BTreeMap<NaiveDate, AttendanceDetail>,
}

impl StudentAttendance {
    pub fn absent_count(&self) -> u32 {
        self.total_class_days.saturating_sub(self.days_present)
    }

    pub fn present_dates(&self) -> usize {
        self.attendance_by_date.values().filter(|p| **p).count()
    }

    /// Rate over the dates actually present in the map, as a whole percentage.
    pub fn displayed_rate(&self) -> u32 {
        let total = self.attendance_by_date.len();
        if total == 0 {
            return 0;
        }
        (self.present_dates() * 100 / total) as u32
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyAttendance {
    pub date: NaiveDate,
    pub present_count: u32,
    pub total_students: u32,
    pub attendance_rate: f64,
}

/// Section-wide attendance analytics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AttendanceAnalytics {
    pub section_id: i64,
    pub course_name: String,
    pub section_room: String,
    pub total_enrolled_students: u32,
    pub average_attendance_rate: f64,
    pub total_class_days: u32,
    pub attendance_by_date: BTreeMap<NaiveDate, u32>,
    pub daily_attendance: Vec<DailyAttendance>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_student_attendance_date_keys() {
        let stats: StudentAttendance = serde_json::from_value(json!({
            "studentId": 5,
            "studentName": "Juan Dela Cruz",
            "totalClassDays": 4,
            "daysPresent": 3,
            "attendanceRate": 75.0,
            "attendanceByDate": {
                "2024-03-04": true,
                "2024-03-06": false,
                "2024-03-11": true,
                "2024-03-13": true
            }
        }))
        .unwrap();
        assert_eq!(stats.absent_count(), 1);
        assert_eq!(stats.displayed_rate(), 75);
        assert!(stats.attendance_data.is_empty());
    }

    #[test]
    fn test_attendance_flat_refs() {
        let record: Attendance = serde_json::from_value(json!({
            "id": 1, "studentId": 5, "sectionId": 9,
            "date": "2024-03-04", "startTime": "08:05:00"
        }))
        .unwrap();
        assert_eq!(record.student_ref(), Some(5));
        assert_eq!(record.section_ref(), Some(9));
        assert_eq!(record.end_time, None);
    }

    #[test]
    fn test_analytics_partial_payload_uses_defaults() {
        let analytics: AttendanceAnalytics =
            serde_json::from_value(json!({ "sectionId": 3, "totalClassDays": 8 })).unwrap();
        assert_eq!(analytics.total_class_days, 8);
        assert!(analytics.daily_attendance.is_empty());
    }
}
