use serde::{Deserialize, Serialize};

use crate::{AnalysisError, QualityThresholds, ScoreWeights};

/// Tunables of the sleep detector.
///
/// Every field has a default, so a partial JSON document only overrides
/// the values it names.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SleepDetectorConfig {
    /// Readings at or above this light level are never sleep-like
    pub max_lux: f64,
    /// Sleep-like heart rate must stay under `baseline * heart_rate_ratio`
    pub heart_rate_ratio: f64,
    /// Shortest run of sleep-like readings counted as an episode
    pub min_episode_readings: usize,
    /// Sleep duration that earns the full duration share of the score
    pub target_hours: f64,
    pub weights: ScoreWeights,
    pub thresholds: QualityThresholds,
    /// Shortest still-but-lit run reported as a sedentary period
    pub min_sedentary_readings: usize,
}

impl Default for SleepDetectorConfig {
    fn default() -> Self {
        Self {
            max_lux: 10.0,
            heart_rate_ratio: 0.85,
            min_episode_readings: 3,
            target_hours: 8.0,
            weights: ScoreWeights::default(),
            thresholds: QualityThresholds::default(),
            min_sedentary_readings: 5,
        }
    }
}

impl SleepDetectorConfig {
    pub fn validate(&self) -> Result<(), AnalysisError> {
        let positive = |v: f64| v.is_finite() && v > 0.0;

        if !positive(self.max_lux) {
            return Err(AnalysisError::InvalidConfig(format!(
                "max_lux must be positive, got {}",
                self.max_lux
            )));
        }
        if !positive(self.heart_rate_ratio) {
            return Err(AnalysisError::InvalidConfig(format!(
                "heart_rate_ratio must be positive, got {}",
                self.heart_rate_ratio
            )));
        }
        if !positive(self.target_hours) {
            return Err(AnalysisError::InvalidConfig(format!(
                "target_hours must be positive, got {}",
                self.target_hours
            )));
        }
        if self.min_episode_readings == 0 || self.min_sedentary_readings == 0 {
            return Err(AnalysisError::InvalidConfig(
                "minimum run lengths must be at least one reading".to_string(),
            ));
        }

        self.weights.validate()?;
        self.thresholds.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = SleepDetectorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_lux, 10.0);
        assert_eq!(config.heart_rate_ratio, 0.85);
        assert_eq!(config.min_episode_readings, 3);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: SleepDetectorConfig = serde_json::from_str(
            r#"{"target_hours": 7.5, "weights": {"duration": 0.6, "continuity": 0.4}}"#,
        )
        .unwrap();

        assert_eq!(config.target_hours, 7.5);
        assert_eq!(config.weights.duration, 0.6);
        assert_eq!(config.max_lux, 10.0);
        assert_eq!(config.thresholds, QualityThresholds::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_run_length_rejected() {
        let config = SleepDetectorConfig {
            min_episode_readings: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(AnalysisError::InvalidConfig(_))
        ));
    }

    #[test]
    fn non_positive_target_rejected() {
        let config = SleepDetectorConfig {
            target_hours: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn bad_weights_rejected() {
        let config = SleepDetectorConfig {
            weights: ScoreWeights {
                duration: 0.9,
                continuity: 0.9,
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
