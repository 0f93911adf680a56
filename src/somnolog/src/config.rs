use std::{fs, path::Path};

use anyhow::Context;
use somnolog_algos::SleepDetectorConfig;

/// Reads a JSON detector config, or the defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<SleepDetectorConfig> {
    let Some(path) = path else {
        return Ok(SleepDetectorConfig::default());
    };

    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read config `{}`", path.display()))?;
    let config = parse_config(&content)
        .with_context(|| format!("invalid config `{}`", path.display()))?;

    info!("Loaded detector config from {}", path.display());
    Ok(config)
}

fn parse_config(content: &str) -> anyhow::Result<SleepDetectorConfig> {
    let config: SleepDetectorConfig = serde_json::from_str(content)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_path_gives_defaults() {
        assert_eq!(load_config(None).unwrap(), SleepDetectorConfig::default());
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_config(Some(Path::new("/nonexistent/somnolog.json"))).is_err());
    }

    #[test]
    fn parse_overrides() {
        let config = parse_config(r#"{"max_lux": 5, "thresholds": {"good_min": 85}}"#).unwrap();
        assert_eq!(config.max_lux, 5.0);
        assert_eq!(config.thresholds.good_min, 85);
        assert_eq!(config.thresholds.ok_min, 50);
    }

    #[test]
    fn parse_rejects_invalid_weights() {
        assert!(parse_config(r#"{"weights": {"duration": 0.2, "continuity": 0.2}}"#).is_err());
    }
}
