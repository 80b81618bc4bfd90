//! Lenient (de)serialization of backend `LocalTime` values.
//!
//! The backend emits times as `"HH:mm"` / `"HH:mm:ss"` strings, but older
//! payloads carry `{ "hour", "minute", "second", "nano" }` objects. Both
//! shapes decode to [`NaiveTime`]; times are always written back as `HH:mm`.

use chrono::{NaiveTime, Timelike};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTime {
    Text(String),
    Parts {
        hour: u32,
        #[serde(default)]
        minute: u32,
        #[serde(default)]
        second: u32,
        #[serde(default)]
        nano: u32,
    },
}

/// Parses `HH:mm`, `HH:mm:ss` or `HH:mm:ss.fff`, or an ISO datetime's time part.
pub fn parse_time(text: &str) -> Option<NaiveTime> {
    let trimmed = text.trim();
    let time_part = trimmed.split_once('T').map(|(_, t)| t).unwrap_or(trimmed);
    ["%H:%M:%S%.f", "%H:%M:%S", "%H:%M"]
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(time_part, fmt).ok())
}

fn from_raw<E: de::Error>(raw: RawTime) -> Result<NaiveTime, E> {
    match raw {
        RawTime::Text(text) => {
            parse_time(&text).ok_or_else(|| E::custom(format!("invalid time {text:?}")))
        }
        RawTime::Parts {
            hour,
            minute,
            second,
            nano,
        } => NaiveTime::from_hms_nano_opt(hour, minute, second, nano)
            .ok_or_else(|| E::custom("time component out of range")),
    }
}

pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format!("{:02}:{:02}", time.hour(), time.minute()))
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
    from_raw(RawTime::deserialize(deserializer)?)
}

/// Same as the parent module, for `Option<NaiveTime>` fields.
pub mod option {
    use super::*;

    pub fn serialize<S: Serializer>(
        time: &Option<NaiveTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match time {
            Some(t) => super::serialize(t, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveTime>, D::Error> {
        Option::<RawTime>::deserialize(deserializer)?
            .map(from_raw)
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize, Deserialize)]
    struct Slot {
        #[serde(with = "super")]
        start: NaiveTime,
        #[serde(with = "super::option", default)]
        end: Option<NaiveTime>,
    }

    #[test]
    fn test_string_and_object_forms() {
        let slot: Slot =
            serde_json::from_str(r#"{"start":"09:30:00","end":{"hour":10,"minute":45}}"#).unwrap();
        assert_eq!(slot.start, NaiveTime::from_hms_opt(9, 30, 0).unwrap());
        assert_eq!(slot.end, NaiveTime::from_hms_opt(10, 45, 0));
    }

    #[test]
    fn test_serializes_as_hh_mm() {
        let slot = Slot {
            start: NaiveTime::from_hms_opt(7, 5, 59).unwrap(),
            end: None,
        };
        let json = serde_json::to_string(&slot).unwrap();
        assert_eq!(json, r#"{"start":"07:05","end":null}"#);
    }

    #[test]
    fn test_parse_time_iso() {
        assert_eq!(
            parse_time("2024-03-01T13:15:00"),
            NaiveTime::from_hms_opt(13, 15, 0)
        );
        assert_eq!(parse_time("nonsense"), None);
    }
}
