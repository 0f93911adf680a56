use std::{fs, path::Path};

use anyhow::Context;
use somnolog_types::Reading;

/// Loads readings from a sensor dump: a JSON array, a single JSON object,
/// or one JSON object per line.
pub fn load_readings(path: &Path) -> anyhow::Result<Vec<Reading>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read sensor file `{}`", path.display()))?;

    let readings = parse_readings(&content)
        .with_context(|| format!("invalid sensor file `{}`", path.display()))?;

    info!("Loaded {} readings from {}", readings.len(), path.display());
    Ok(readings)
}

pub fn parse_readings(content: &str) -> anyhow::Result<Vec<Reading>> {
    let content = content.trim();
    if content.is_empty() {
        return Ok(Vec::new());
    }

    if content.starts_with('[') {
        return Ok(serde_json::from_str(content)?);
    }
    if let Ok(reading) = serde_json::from_str::<Reading>(content) {
        return Ok(vec![reading]);
    }

    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| parse_line(line).with_context(|| format!("line {}", i + 1)))
        .collect()
}

pub fn parse_line(line: &str) -> anyhow::Result<Reading> {
    Ok(serde_json::from_str(line.trim())?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_content_has_no_readings() {
        assert!(parse_readings("  \n").unwrap().is_empty());
    }

    #[test]
    fn parse_json_array() {
        let readings = parse_readings(
            r#"[
                {"timestamp": "2025-01-01 23:00:00", "lux": 2, "motion": "NO", "heartRate": 57},
                {"timestamp": "2025-01-01 23:01:00", "lux": 3, "motion": "YES", "heartRate": 66}
            ]"#,
        )
        .unwrap();

        assert_eq!(readings.len(), 2);
        assert!(readings[1].motion);
    }

    #[test]
    fn bad_array_entry_keeps_field_error() {
        let error = parse_readings(
            r#"[
                {"timestamp": "2025-01-01 23:00:00", "lux": 2, "motion": "NO", "heartRate": 57},
                {"timestamp": "2025-01-01 23:01:00", "lux": 3, "motion": "NO"}
            ]"#,
        )
        .unwrap_err();

        let message = error.to_string();
        assert!(message.contains("missing field `bpm`"), "{message}");
        assert!(!message.starts_with("line"), "{message}");
    }

    #[test]
    fn parse_single_object() {
        let readings =
            parse_readings(r#"{"time": "2025-01-01T23:00:00", "lux": 2, "motion": false, "bpm": 57}"#)
                .unwrap();
        assert_eq!(readings.len(), 1);
    }

    #[test]
    fn parse_json_lines() {
        let content = concat!(
            r#"{"time": "2025-01-01 23:00:00", "lux": 2, "motion": 0, "bpm": 57}"#,
            "\n\n",
            r#"{"time": "2025-01-01 23:01:00", "lux": 2, "motion": 1, "bpm": 59}"#,
            "\n",
        );
        let readings = parse_readings(content).unwrap();

        assert_eq!(readings.len(), 2);
        assert!(!readings[0].motion);
        assert!(readings[1].motion);
    }

    #[test]
    fn bad_line_reports_line_number() {
        let content = concat!(
            r#"{"time": "2025-01-01 23:00:00", "lux": 2, "motion": 0, "bpm": 57}"#,
            "\n",
            r#"{"time": "2025-01-01 23:01:00", "lux": 2}"#,
        );
        let error = parse_readings(content).unwrap_err();
        assert_eq!(error.to_string(), "line 2");
    }
}
