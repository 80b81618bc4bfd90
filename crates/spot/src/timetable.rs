//! Helpers for schedule times and "is class in session" checks.

use crate::models::Schedule;
use chrono::{Datelike, Duration, NaiveDateTime, NaiveTime, Timelike};
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

/// Students may check in this many minutes before a class starts.
pub const CLASS_START_BUFFER_MINUTES: i64 = 10;

fn am_pm_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^(\d{1,2}):(\d{2})\s*([AP]M)$").expect("valid regex"))
}

fn range_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)(\d+:\d+\s*[AP]M)\s*-\s*(\d+:\d+\s*[AP]M)").expect("valid regex")
    })
}

/// Trims a backend time (`HH:mm:ss`, ISO datetime) down to `HH:mm`.
/// Text that doesn't look like a time is returned unchanged.
pub fn format_backend_time(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return String::new();
    }
    let time_part = raw.split_once('T').map(|(_, t)| t).unwrap_or(raw);
    let mut parts = time_part.split(':');
    match (parts.next(), parts.next()) {
        (Some(h), Some(m)) if !h.is_empty() => match m.get(..2) {
            Some(mm) if mm.bytes().all(|b| b.is_ascii_digit()) => format!("{h}:{mm}"),
            _ => raw.to_string(),
        },
        _ => raw.to_string(),
    }
}

/// Parses a 12-hour clock time such as `7:30AM` or `9:00 pm`.
pub fn parse_am_pm(text: &str) -> Option<NaiveTime> {
    let caps = am_pm_regex().captures(text.trim())?;
    let mut hour: u32 = caps[1].parse().ok()?;
    let minute: u32 = caps[2].parse().ok()?;
    if hour == 0 || hour > 12 {
        return None;
    }
    let pm = caps[3].eq_ignore_ascii_case("PM");
    if pm && hour < 12 {
        hour += 12;
    } else if !pm && hour == 12 {
        hour = 0;
    }
    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// `9:05AM` style rendering.
pub fn format_am_pm(time: NaiveTime) -> String {
    let (pm, hour) = time.hour12();
    format!("{}:{:02}{}", hour, time.minute(), if pm { "PM" } else { "AM" })
}

/// `"Mon 9:00AM-10:30AM | NGE 101 (LEC)"`, one line per schedule joined
/// with `", "`. Returns `None` for an empty list.
pub fn format_schedule_text(schedules: &[Schedule]) -> Option<String> {
    if schedules.is_empty() {
        return None;
    }
    let lines: Vec<String> = schedules
        .iter()
        .map(|s| {
            format!(
                "{} {}-{} | {} ({})",
                &s.day_label()[..3],
                format_am_pm(s.time_start),
                format_am_pm(s.time_end),
                s.room,
                s.schedule_type.code()
            )
        })
        .collect();
    Some(lines.join(", "))
}

/// One slot recovered from formatted schedule text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextSlot {
    /// 1 = Monday ... 7 = Sunday
    pub day_of_week: u8,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

/// Parses text like `"Mon 9:00AM-10:30AM, Wed 1:00PM-2:30PM"`.
///
/// Each comma separated item must start with a day name (`Mon`, `Monday`,
/// any case) followed by a 12-hour range. Unparseable items are skipped.
pub fn parse_schedule_text(text: &str) -> Vec<TextSlot> {
    text.split(',')
        .filter_map(|item| {
            let item = item.trim();
            let day_word = item.split_whitespace().next()?;
            let day_of_week = day_number(day_word)?;
            let caps = range_regex().captures(item)?;
            Some(TextSlot {
                day_of_week,
                start: parse_am_pm(&caps[1])?,
                end: parse_am_pm(&caps[2])?,
            })
        })
        .collect()
}

fn day_number(word: &str) -> Option<u8> {
    let word = word.trim_end_matches(['.', ':']).to_ascii_lowercase();
    const DAYS: [&str; 7] = [
        "monday",
        "tuesday",
        "wednesday",
        "thursday",
        "friday",
        "saturday",
        "sunday",
    ];
    if word.len() < 3 {
        return None;
    }
    DAYS.iter()
        .position(|day| day.starts_with(&word))
        .map(|i| i as u8 + 1)
}

fn in_window(now: NaiveTime, start: NaiveTime, end: NaiveTime) -> bool {
    now.signed_duration_since(start) >= -Duration::minutes(CLASS_START_BUFFER_MINUTES) && now <= end
}

/// Whether `now` falls in one of the section's class windows, opening
/// [`CLASS_START_BUFFER_MINUTES`] early. Structured schedules are checked
/// first, then the formatted schedule text if one is given.
pub fn is_within_class_schedule(
    schedules: &[Schedule],
    schedule_text: Option<&str>,
    now: NaiveDateTime,
) -> bool {
    let today = now.weekday().number_from_monday() as u8;
    let time = now.time();

    if schedules
        .iter()
        .any(|s| s.day_of_week == today && in_window(time, s.time_start, s.time_end))
    {
        return true;
    }

    if let Some(text) = schedule_text {
        let matched = parse_schedule_text(text)
            .iter()
            .any(|slot| slot.day_of_week == today && in_window(time, slot.start, slot.end));
        if matched {
            return true;
        }
    }

    debug!(day = today, time = %time, "Not within class schedule");
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ScheduleType;
    use chrono::NaiveDate;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn schedule(day: u8, start: NaiveTime, end: NaiveTime) -> Schedule {
        Schedule {
            id: 1,
            section_id: 1,
            day_of_week: day,
            time_start: start,
            time_end: end,
            schedule_type: ScheduleType::Lecture,
            room: "NGE 101".to_string(),
        }
    }

    // 2024-03-04 is a Monday
    fn monday_at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 4)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_format_backend_time() {
        assert_eq!(format_backend_time("08:30:00"), "08:30");
        assert_eq!(format_backend_time("2024-03-04T13:05:00.000"), "13:05");
        assert_eq!(format_backend_time("TBA"), "TBA");
        assert_eq!(format_backend_time(""), "");
    }

    #[test]
    fn test_malformed_minutes_returned_unchanged() {
        assert_eq!(format_backend_time("09:3€"), "09:3€");
        assert_eq!(format_backend_time("09:€0"), "09:€0");
        assert_eq!(format_backend_time("09:3"), "09:3");
        assert_eq!(format_backend_time("9:ab"), "9:ab");
    }

    #[test]
    fn test_parse_am_pm() {
        assert_eq!(parse_am_pm("7:30AM"), Some(t(7, 30)));
        assert_eq!(parse_am_pm("9:00 pm"), Some(t(21, 0)));
        assert_eq!(parse_am_pm("12:15AM"), Some(t(0, 15)));
        assert_eq!(parse_am_pm("12:00PM"), Some(t(12, 0)));
        assert_eq!(parse_am_pm("13:00PM"), None);
        assert_eq!(format_am_pm(t(13, 5)), "1:05PM");
    }

    #[test]
    fn test_parse_schedule_text() {
        let slots = parse_schedule_text("Mon 9:00AM-10:30AM, wednesday 1:00PM - 2:30PM, TBA");
        assert_eq!(
            slots,
            vec![
                TextSlot { day_of_week: 1, start: t(9, 0), end: t(10, 30) },
                TextSlot { day_of_week: 3, start: t(13, 0), end: t(14, 30) },
            ]
        );
    }

    #[test]
    fn test_formatted_text_parses_back() {
        let schedules = vec![schedule(1, t(9, 0), t(10, 30)), schedule(3, t(13, 0), t(14, 30))];
        let text = format_schedule_text(&schedules).unwrap();
        assert_eq!(
            text,
            "Mon 9:00AM-10:30AM | NGE 101 (LEC), Wed 1:00PM-2:30PM | NGE 101 (LEC)"
        );
        assert_eq!(parse_schedule_text(&text).len(), 2);
        assert_eq!(format_schedule_text(&[]), None);
    }

    #[test]
    fn test_buffer_before_start() {
        let schedules = vec![schedule(1, t(8, 0), t(9, 30))];
        assert!(!is_within_class_schedule(&schedules, None, monday_at(7, 49)));
        assert!(is_within_class_schedule(&schedules, None, monday_at(7, 50)));
        assert!(is_within_class_schedule(&schedules, None, monday_at(9, 30)));
        assert!(!is_within_class_schedule(&schedules, None, monday_at(9, 31)));
    }

    #[test]
    fn test_other_day_and_text_fallback() {
        let schedules = vec![schedule(2, t(8, 0), t(9, 30))];
        assert!(!is_within_class_schedule(&schedules, None, monday_at(8, 30)));
        assert!(is_within_class_schedule(
            &schedules,
            Some("Mon 8:00AM-9:30AM"),
            monday_at(8, 30)
        ));
    }
}
