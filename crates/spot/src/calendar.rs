//! Month grid for the attendance calendar.

use crate::models::AttendanceDetail;
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Cells in a calendar page: six Monday-first weeks.
pub const CALENDAR_CELLS: usize = 42;

/// Minutes after the scheduled start a check-in still counts as on time.
pub const LATE_GRACE_MINUTES: i64 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
    NoClass,
}

impl AttendanceStatus {
    /// Single-character marker used by text renderings.
    pub fn marker(&self) -> char {
        match self {
            AttendanceStatus::Present => 'P',
            AttendanceStatus::Absent => 'A',
            AttendanceStatus::Late => 'L',
            AttendanceStatus::NoClass => '.',
        }
    }
}

/// A calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        // Validated on construction
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    pub fn last_day(&self) -> NaiveDate {
        self.next().first_day() - Duration::days(1)
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn previous(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = String;

    /// Parses `YYYY-MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| format!("expected YYYY-MM, got {s:?}"))?;
        let year: i32 = year.parse().map_err(|_| format!("invalid year in {s:?}"))?;
        let month: u32 = month.parse().map_err(|_| format!("invalid month in {s:?}"))?;
        YearMonth::new(year, month).ok_or_else(|| format!("month out of range in {s:?}"))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub is_current_month: bool,
    pub status: AttendanceStatus,
    pub detail: Option<AttendanceDetail>,
}

/// Builds the 42-cell grid for `month`.
///
/// Detailed records win over the coarse map. A present student whose
/// check-in is more than [`LATE_GRACE_MINUTES`] after the scheduled start is
/// `Late`. Dates without any record, and the padding cells from the
/// neighbouring months, are `NoClass`.
pub fn create_calendar_days(
    month: YearMonth,
    attendance_by_date: &BTreeMap<NaiveDate, bool>,
    attendance_data: Option<&BTreeMap<NaiveDate, AttendanceDetail>>,
) -> Vec<CalendarDay> {
    let first = month.first_day();
    let leading = first.weekday().num_days_from_monday() as i64;
    let start = first - Duration::days(leading);

    (0..CALENDAR_CELLS as i64)
        .map(|offset| {
            let date = start + Duration::days(offset);
            let is_current_month = month.contains(date);
            let detail = attendance_data.and_then(|data| data.get(&date)).cloned();

            let status = if !is_current_month {
                AttendanceStatus::NoClass
            } else if let Some(detail) = &detail {
                classify_detail(detail)
            } else {
                match attendance_by_date.get(&date) {
                    Some(true) => AttendanceStatus::Present,
                    Some(false) => AttendanceStatus::Absent,
                    None => AttendanceStatus::NoClass,
                }
            };

            CalendarDay {
                date,
                is_current_month,
                status,
                detail: if is_current_month { detail } else { None },
            }
        })
        .collect()
}

fn classify_detail(detail: &AttendanceDetail) -> AttendanceStatus {
    if !detail.present {
        return AttendanceStatus::Absent;
    }
    match (detail.start_time, detail.schedule_start_time) {
        (Some(checked_in), Some(scheduled))
            if checked_in - scheduled > Duration::minutes(LATE_GRACE_MINUTES) =>
        {
            AttendanceStatus::Late
        }
        _ => AttendanceStatus::Present,
    }
}

/// Cell counts per status over the days of the month itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MonthSummary {
    pub present: u32,
    pub late: u32,
    pub absent: u32,
    pub no_class: u32,
}

impl MonthSummary {
    /// Present or late days over days that had a class, as a whole percentage.
    pub fn attendance_rate(&self) -> u32 {
        let held = self.present + self.late + self.absent;
        if held == 0 {
            return 0;
        }
        (self.present + self.late) * 100 / held
    }
}

pub fn month_summary(days: &[CalendarDay]) -> MonthSummary {
    days.iter()
        .filter(|d| d.is_current_month)
        .fold(MonthSummary::default(), |mut acc, day| {
            match day.status {
                AttendanceStatus::Present => acc.present += 1,
                AttendanceStatus::Late => acc.late += 1,
                AttendanceStatus::Absent => acc.absent += 1,
                AttendanceStatus::NoClass => acc.no_class += 1,
            }
            acc
        })
}

/// Column headers matching the grid order.
pub const WEEKDAY_HEADERS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Text grid, one week per line. Each day of the month shows its number
/// and status marker; padding cells are blank.
pub fn render_calendar(days: &[CalendarDay]) -> String {
    let mut out: String = WEEKDAY_HEADERS
        .iter()
        .map(|day| format!("{:>5}", day.to_string()))
        .collect();
    out.push('\n');
    for week in days.chunks(7) {
        for day in week {
            if day.is_current_month {
                out.push_str(&format!("{:>4}{}", day.date.day(), day.status.marker()));
            } else {
                out.push_str("     ");
            }
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn detail(day: NaiveDate, present: bool, check_in: (u32, u32)) -> AttendanceDetail {
        AttendanceDetail {
            date: day,
            present,
            start_time: NaiveTime::from_hms_opt(check_in.0, check_in.1, 0),
            end_time: None,
            schedule_start_time: NaiveTime::from_hms_opt(8, 0, 0),
            schedule_end_time: NaiveTime::from_hms_opt(9, 30, 0),
        }
    }

    #[test]
    fn test_always_42_cells() {
        let empty = BTreeMap::new();
        let mut month = YearMonth::new(2023, 1).unwrap();
        for _ in 0..36 {
            assert_eq!(create_calendar_days(month, &empty, None).len(), CALENDAR_CELLS);
            month = month.next();
        }
    }

    #[test]
    fn test_padding_is_outside_month_and_no_class() {
        // March 2024 starts on a Friday
        let month = YearMonth::new(2024, 3).unwrap();
        let days = create_calendar_days(month, &BTreeMap::new(), None);

        assert_eq!(days[0].date, date(2024, 2, 26));
        assert_eq!(days[4].date, date(2024, 3, 1));
        for day in days.iter().filter(|d| !d.is_current_month) {
            assert!(!month.contains(day.date));
            assert_eq!(day.status, AttendanceStatus::NoClass);
        }
        assert_eq!(days.iter().filter(|d| d.is_current_month).count(), 31);
    }

    #[test]
    fn test_month_starting_monday_has_no_leading_padding() {
        // April 2024 starts on a Monday
        let days = create_calendar_days(YearMonth::new(2024, 4).unwrap(), &BTreeMap::new(), None);
        assert_eq!(days[0].date, date(2024, 4, 1));
        assert!(days[0].is_current_month);
    }

    #[test]
    fn test_late_threshold() {
        let month = YearMonth::new(2024, 3).unwrap();
        let mut data = BTreeMap::new();
        data.insert(date(2024, 3, 4), detail(date(2024, 3, 4), true, (8, 15)));
        data.insert(date(2024, 3, 5), detail(date(2024, 3, 5), true, (8, 16)));
        data.insert(date(2024, 3, 6), detail(date(2024, 3, 6), false, (0, 0)));

        let days = create_calendar_days(month, &BTreeMap::new(), Some(&data));
        let status_on = |d: u32| {
            days.iter()
                .find(|c| c.date == date(2024, 3, d))
                .map(|c| c.status)
                .unwrap()
        };

        assert_eq!(status_on(4), AttendanceStatus::Present);
        assert_eq!(status_on(5), AttendanceStatus::Late);
        assert_eq!(status_on(6), AttendanceStatus::Absent);
        assert_eq!(status_on(7), AttendanceStatus::NoClass);
    }

    #[test]
    fn test_coarse_map_only() {
        let month = YearMonth::new(2024, 3).unwrap();
        let mut by_date = BTreeMap::new();
        by_date.insert(date(2024, 3, 11), true);
        by_date.insert(date(2024, 3, 13), false);
        // Outside the month; must not leak into padding
        by_date.insert(date(2024, 2, 26), true);

        let days = create_calendar_days(month, &by_date, None);
        let summary = month_summary(&days);
        assert_eq!(summary.present, 1);
        assert_eq!(summary.absent, 1);
        assert_eq!(summary.no_class, 29);
        assert_eq!(summary.attendance_rate(), 50);
        assert_eq!(days[0].status, AttendanceStatus::NoClass);
    }

    #[test]
    fn test_year_month_parse() {
        let month: YearMonth = "2024-12".parse().unwrap();
        assert_eq!(month.next().to_string(), "2025-01");
        assert_eq!(month.last_day(), date(2024, 12, 31));
        assert_eq!(YearMonth::new(2024, 1).unwrap().previous().to_string(), "2023-12");
        assert!("2024-13".parse::<YearMonth>().is_err());
        assert!("March".parse::<YearMonth>().is_err());
    }

    #[test]
    fn test_render_marks_days_and_blanks_padding() {
        let month = YearMonth::new(2024, 3).unwrap();
        let mut by_date = BTreeMap::new();
        by_date.insert(date(2024, 3, 11), true);
        let rendered = render_calendar(&create_calendar_days(month, &by_date, None));
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 7);
        assert!(lines[0].trim_start().starts_with("Mon"));
        assert_eq!(&lines[1][..25], format!("{}   1.", " ".repeat(20)));
        assert!(lines[3].starts_with("  11P"));
    }
}
