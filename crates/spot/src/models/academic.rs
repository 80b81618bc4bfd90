/// Types for courses, sections, schedules and enrollments
use super::people::{Student, Teacher};
use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: i64,
    pub course_name: String,
    #[serde(default)]
    pub course_description: String,
    pub course_code: String,
    #[serde(default)]
    pub section_count: u32,
    /// Formatted schedule text some endpoints attach (e.g. "Mon 9:00AM-10:30AM")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseCreateRequest {
    pub course_name: String,
    pub course_description: String,
    pub course_code: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_code: Option<String>,
}

/// Section as returned by the backend, with the course and teacher embedded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: i64,
    pub course: Course,
    #[serde(default)]
    pub teacher: Option<Teacher>,
    pub section_name: String,
    #[serde(default)]
    pub enrollment_key: Option<String>,
    #[serde(default)]
    pub enrollment_open: bool,
    #[serde(default)]
    pub enrollment_count: u32,
}

impl Section {
    pub fn course_id(&self) -> i64 {
        self.course.id
    }

    pub fn teacher_id(&self) -> Option<i64> {
        self.teacher.as_ref().map(|t| t.id)
    }

    pub fn instructor_name(&self) -> String {
        self.teacher
            .as_ref()
            .map(Teacher::name)
            .unwrap_or_else(|| "Not Assigned".to_string())
    }

    /// The backend has no room column on sections; the section name doubles as one.
    pub fn room(&self) -> &str {
        &self.section_name
    }

    pub fn schedule_text(&self) -> &str {
        self.course.schedule.as_deref().unwrap_or("No Schedule")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionCreateRequest {
    pub course_id: i64,
    pub section_name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrollment_key: Option<String>,
}

/// Kind of meeting a schedule slot represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ScheduleType {
    #[default]
    #[serde(rename = "LEC")]
    Lecture,
    #[serde(rename = "LAB")]
    Laboratory,
    #[serde(rename = "REC")]
    Recitation,
}

impl ScheduleType {
    pub fn code(&self) -> &'static str {
        match self {
            ScheduleType::Lecture => "LEC",
            ScheduleType::Laboratory => "LAB",
            ScheduleType::Recitation => "REC",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScheduleType::Lecture => "Lecture",
            ScheduleType::Laboratory => "Laboratory",
            ScheduleType::Recitation => "Recitation",
        }
    }
}

impl fmt::Display for ScheduleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A recurring weekly slot belonging to a section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub id: i64,
    pub section_id: i64,
    /// 1 = Monday ... 7 = Sunday
    pub day_of_week: u8,
    #[serde(with = "super::time")]
    pub time_start: NaiveTime,
    #[serde(with = "super::time")]
    pub time_end: NaiveTime,
    #[serde(default)]
    pub schedule_type: ScheduleType,
    #[serde(default = "default_room")]
    pub room: String,
}

fn default_room() -> String {
    "No Room".to_string()
}

impl Schedule {
    pub fn day_label(&self) -> &'static str {
        day_label(self.day_of_week)
    }
}

/// Display name for an ISO day-of-week number (1 = Monday).
pub fn day_label(day_of_week: u8) -> &'static str {
    match day_of_week {
        1 => "Monday",
        2 => "Tuesday",
        3 => "Wednesday",
        4 => "Thursday",
        5 => "Friday",
        6 => "Saturday",
        7 => "Sunday",
        _ => "Unknown",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_id: Option<i64>,
    pub day_of_week: u8,
    #[serde(with = "super::time")]
    pub time_start: NaiveTime,
    #[serde(with = "super::time")]
    pub time_end: NaiveTime,
    pub room: String,
    pub schedule_type: ScheduleType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub id: i64,
    pub section: Section,
    pub student: Student,
    pub enrolled_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollRequest {
    pub enrollment_key: String,
}
