/// Client-side aggregation of raw attendance records
use crate::models::Attendance;
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, PartialEq)]
pub struct DateAttendance {
    pub date: NaiveDate,
    pub count: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StudentTally {
    pub student_id: i64,
    pub student_name: Option<String>,
    pub attendance_count: usize,
    pub attendance_percentage: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttendanceSummary {
    /// Distinct dates with at least one check-in
    pub total_sessions: usize,
    pub total_students: usize,
    pub average_attendance: f64,
    pub by_date: Vec<DateAttendance>,
    pub by_student: Vec<StudentTally>,
}

/// Groups records by date and by student.
///
/// A student counts once per date however many records they have. Date
/// percentages are over `enrolled` when given, else over the distinct
/// students seen. Student percentages are over the distinct session dates.
/// Records without a student reference are ignored.
pub fn summarize(records: &[Attendance], enrolled: Option<usize>) -> AttendanceSummary {
    let mut dates: BTreeMap<NaiveDate, BTreeSet<i64>> = BTreeMap::new();
    let mut students: BTreeMap<i64, (Option<String>, BTreeSet<NaiveDate>)> = BTreeMap::new();

    for record in records {
        let Some(student_id) = record.student_ref() else {
            continue;
        };
        dates.entry(record.date).or_default().insert(student_id);
        let entry = students
            .entry(student_id)
            .or_insert_with(|| (None, BTreeSet::new()));
        if entry.0.is_none() {
            entry.0 = record.student_name();
        }
        entry.1.insert(record.date);
    }

    let total_sessions = dates.len();
    let total_students = enrolled.unwrap_or(students.len());

    let by_date: Vec<DateAttendance> = dates
        .into_iter()
        .map(|(date, present)| DateAttendance {
            date,
            count: present.len(),
            percentage: percent(present.len(), total_students),
        })
        .collect();

    let mut by_student: Vec<StudentTally> = students
        .into_iter()
        .map(|(student_id, (student_name, attended))| StudentTally {
            student_id,
            student_name,
            attendance_count: attended.len(),
            attendance_percentage: percent(attended.len(), total_sessions),
        })
        .collect();
    by_student.sort_by(|a, b| {
        b.attendance_count
            .cmp(&a.attendance_count)
            .then(a.student_id.cmp(&b.student_id))
    });

    let average_attendance = if by_date.is_empty() {
        0.0
    } else {
        by_date.iter().map(|d| d.percentage).sum::<f64>() / by_date.len() as f64
    };

    AttendanceSummary {
        total_sessions,
        total_students,
        average_attendance,
        by_date,
        by_student,
    }
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    (part as f64 * 100.0 / whole as f64).min(100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, student_id: i64, day: u32) -> Attendance {
        Attendance {
            id,
            student: None,
            section: None,
            student_id: Some(student_id),
            section_id: Some(1),
            date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            start_time: None,
            end_time: None,
        }
    }

    #[test]
    fn test_empty() {
        assert_eq!(summarize(&[], None), AttendanceSummary::default());
    }

    #[test]
    fn test_groups_by_date_and_student() {
        let records = vec![
            record(1, 10, 4),
            record(2, 11, 4),
            record(3, 10, 6),
            // duplicate check-in on the same day
            record(4, 10, 6),
        ];
        let summary = summarize(&records, Some(4));

        assert_eq!(summary.total_sessions, 2);
        assert_eq!(summary.total_students, 4);
        assert_eq!(summary.by_date[0].count, 2);
        assert_eq!(summary.by_date[0].percentage, 50.0);
        assert_eq!(summary.by_date[1].count, 1);
        assert_eq!(summary.by_date[1].percentage, 25.0);
        assert_eq!(summary.average_attendance, 37.5);

        assert_eq!(summary.by_student[0].student_id, 10);
        assert_eq!(summary.by_student[0].attendance_count, 2);
        assert_eq!(summary.by_student[0].attendance_percentage, 100.0);
        assert_eq!(summary.by_student[1].attendance_percentage, 50.0);
    }

    #[test]
    fn test_defaults_to_distinct_students() {
        let summary = summarize(&[record(1, 10, 4), record(2, 11, 4)], None);
        assert_eq!(summary.total_students, 2);
        assert_eq!(summary.by_date[0].percentage, 100.0);
    }
}
