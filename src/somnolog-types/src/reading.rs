use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

/// One sample from the bedside sensors.
///
/// Readings are produced by the caller and never mutated by the analysis.
/// Sequence order is authoritative, `time` is only carried along for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    #[serde(alias = "timestamp", deserialize_with = "deserialize_timestamp")]
    pub time: NaiveDateTime,
    /// Ambient light in lux
    #[serde(alias = "Lux")]
    pub lux: f64,
    /// Movement detected during the sampling window
    #[serde(alias = "Motion", deserialize_with = "deserialize_motion")]
    pub motion: bool,
    /// Heart rate in beats per minute
    #[serde(alias = "heartRate", alias = "heart_rate", alias = "HR")]
    pub bpm: f64,
    /// Root mean square of successive RR differences, in milliseconds
    #[serde(default, alias = "RMSSD", skip_serializing_if = "Option::is_none")]
    pub rmssd: Option<f64>,
    /// Room temperature in degrees Celsius
    #[serde(
        default,
        alias = "Temp",
        alias = "temperature",
        skip_serializing_if = "Option::is_none"
    )]
    pub temp: Option<f64>,
}

impl Reading {
    pub fn new(time: NaiveDateTime, lux: f64, motion: bool, bpm: f64) -> Self {
        Self {
            time,
            lux,
            motion,
            bpm,
            rmssd: None,
            temp: None,
        }
    }

    pub fn with_rmssd(self, rmssd: f64) -> Self {
        Self {
            rmssd: Some(rmssd),
            ..self
        }
    }

    pub fn with_temp(self, temp: f64) -> Self {
        Self {
            temp: Some(temp),
            ..self
        }
    }
}

const TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
];

#[derive(Deserialize)]
#[serde(untagged)]
enum TimestampRepr {
    Unix(i64),
    Text(String),
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    match TimestampRepr::deserialize(deserializer)? {
        TimestampRepr::Unix(secs) => DateTime::from_timestamp(secs, 0)
            .map(|dt| dt.naive_utc())
            .ok_or_else(|| serde::de::Error::custom(format!("Unix time out of range: {secs}"))),
        TimestampRepr::Text(text) => TIMESTAMP_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(&text, fmt).ok())
            .ok_or_else(|| {
                serde::de::Error::custom(format!(
                    "Invalid timestamp: '{text}'. Expected 'YYYY-MM-DD HH:MM:SS' or 'YYYY-MM-DDTHH:MM:SS'"
                ))
            }),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MotionRepr {
    Flag(bool),
    Count(u64),
    Label(String),
}

fn deserialize_motion<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match MotionRepr::deserialize(deserializer)? {
        MotionRepr::Flag(flag) => Ok(flag),
        MotionRepr::Count(count) => Ok(count > 0),
        MotionRepr::Label(label) => match label.trim().to_ascii_uppercase().as_str() {
            "YES" | "TRUE" | "1" => Ok(true),
            "NO" | "FALSE" | "0" => Ok(false),
            _ => Err(serde::de::Error::custom(format!(
                "Invalid motion value: '{label}'. Expected YES/NO, true/false or 0/1"
            ))),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn time(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn decodes_canonical_fields() {
        let reading: Reading = serde_json::from_str(
            r#"{"time": "2025-01-01T22:30:00", "lux": 3.5, "motion": false, "bpm": 58.0}"#,
        )
        .unwrap();

        assert_eq!(reading, Reading::new(time(22, 30), 3.5, false, 58.0));
    }

    #[test]
    fn decodes_sensor_style_fields() {
        let reading: Reading = serde_json::from_str(
            r#"{"timestamp": "2025-01-01 23:00:00", "Lux": 420, "Motion": "YES", "HR": 77, "RMSSD": 31.2, "Temp": 22.5}"#,
        )
        .unwrap();

        assert_eq!(
            reading,
            Reading::new(time(23, 0), 420.0, true, 77.0)
                .with_rmssd(31.2)
                .with_temp(22.5)
        );
    }

    #[test]
    fn optional_fields_default_to_none() {
        let reading: Reading = serde_json::from_str(
            r#"{"time": "2025-01-01 23:00:00", "lux": 1, "motion": false, "bpm": 60, "temperature": 19}"#,
        )
        .unwrap();

        assert_eq!(reading.rmssd, None);
        assert_eq!(reading.temp, Some(19.0));

        let json = serde_json::to_value(Reading::new(time(23, 0), 1.0, false, 60.0)).unwrap();
        assert!(json.get("rmssd").is_none());
        assert!(json.get("temp").is_none());
    }

    #[test]
    fn decodes_numeric_motion_and_camel_case_heart_rate() {
        let reading: Reading = serde_json::from_str(
            r#"{"timestamp": "2025-01-01 01:15:00.250", "lux": 0, "motion": 0, "heartRate": 55}"#,
        )
        .unwrap();

        assert!(!reading.motion);
        assert_eq!(reading.bpm, 55.0);
        assert_eq!(reading.time.format("%H:%M").to_string(), "01:15");
    }

    #[test]
    fn decodes_unix_timestamp() {
        let reading: Reading =
            serde_json::from_str(r#"{"time": 1735689600, "lux": 1, "motion": true, "bpm": 60}"#)
                .unwrap();

        assert_eq!(reading.time, time(0, 0));
    }

    #[test]
    fn rejects_unknown_motion_label() {
        let result = serde_json::from_str::<Reading>(
            r#"{"time": "2025-01-01 01:00:00", "lux": 1, "motion": "maybe", "bpm": 60}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn rejects_missing_heart_rate() {
        let result = serde_json::from_str::<Reading>(
            r#"{"time": "2025-01-01 01:00:00", "lux": 1, "motion": false}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn serialized_reading_decodes_back() {
        let reading = Reading::new(time(4, 45), 2.0, false, 52.5);
        let json = serde_json::to_string(&reading).unwrap();
        assert_eq!(serde_json::from_str::<Reading>(&json).unwrap(), reading);
    }
}
