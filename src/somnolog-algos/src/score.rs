use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::AnalysisError;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    EnumString,
)]
pub enum QualityLabel {
    Poor,
    #[serde(rename = "OK")]
    #[strum(serialize = "OK")]
    Ok,
    Good,
}

/// Share of the score taken by each component. Must sum to one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub duration: f64,
    pub continuity: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            duration: 0.7,
            continuity: 0.3,
        }
    }
}

impl ScoreWeights {
    const SUM_TOLERANCE: f64 = 1e-9;

    pub fn validate(&self) -> Result<(), AnalysisError> {
        let valid = |w: f64| w.is_finite() && w >= 0.0;
        if !valid(self.duration) || !valid(self.continuity) {
            return Err(AnalysisError::InvalidConfig(format!(
                "score weights must be non-negative, got duration {} and continuity {}",
                self.duration, self.continuity
            )));
        }

        let sum = self.duration + self.continuity;
        if (sum - 1.0).abs() > Self::SUM_TOLERANCE {
            return Err(AnalysisError::InvalidConfig(format!(
                "score weights must sum to 1, got {sum}"
            )));
        }

        Ok(())
    }

    /// Blends duration adequacy against `target_hours` (saturating) with
    /// continuity, both in `0.0..=1.0`, into a 0-100 score.
    pub fn score(&self, duration_hours: f64, target_hours: f64, continuity: f64) -> u8 {
        let adequacy = (duration_hours / target_hours).clamp(0.0, 1.0);
        let continuity = continuity.clamp(0.0, 1.0);
        let score = (self.duration * adequacy + self.continuity * continuity) * 100.0;
        score.round().clamp(0.0, 100.0) as u8
    }
}

/// Lowest score for each label. Anything under `ok_min` is poor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityThresholds {
    pub good_min: u8,
    pub ok_min: u8,
}

impl Default for QualityThresholds {
    fn default() -> Self {
        Self {
            good_min: 80,
            ok_min: 50,
        }
    }
}

impl QualityThresholds {
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.ok_min > self.good_min || self.good_min > 100 {
            return Err(AnalysisError::InvalidConfig(format!(
                "quality thresholds must satisfy ok_min <= good_min <= 100, got ok_min {} and good_min {}",
                self.ok_min, self.good_min
            )));
        }
        Ok(())
    }

    pub fn label(&self, score: u8) -> QualityLabel {
        if score >= self.good_min {
            QualityLabel::Good
        } else if score >= self.ok_min {
            QualityLabel::Ok
        } else {
            QualityLabel::Poor
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_thresholds_cover_every_score() {
        let thresholds = QualityThresholds::default();
        let mut previous = QualityLabel::Poor;
        for score in 0..=100 {
            let label = thresholds.label(score);
            assert!(label >= previous, "labels must not go down at {score}");
            previous = label;
        }
        assert_eq!(thresholds.label(0), QualityLabel::Poor);
        assert_eq!(thresholds.label(49), QualityLabel::Poor);
        assert_eq!(thresholds.label(50), QualityLabel::Ok);
        assert_eq!(thresholds.label(79), QualityLabel::Ok);
        assert_eq!(thresholds.label(80), QualityLabel::Good);
        assert_eq!(thresholds.label(100), QualityLabel::Good);
    }

    #[test]
    fn inverted_thresholds_rejected() {
        let thresholds = QualityThresholds {
            good_min: 40,
            ok_min: 60,
        };
        assert!(matches!(
            thresholds.validate(),
            Err(AnalysisError::InvalidConfig(_))
        ));
    }

    #[test]
    fn thresholds_above_scale_rejected() {
        let thresholds = QualityThresholds {
            good_min: 101,
            ok_min: 50,
        };
        assert!(thresholds.validate().is_err());
    }

    #[test]
    fn label_strings() {
        assert_eq!(QualityLabel::Ok.to_string(), "OK");
        assert_eq!(QualityLabel::Good.as_ref(), "Good");
        assert_eq!("Poor".parse::<QualityLabel>().unwrap(), QualityLabel::Poor);
        assert_eq!(serde_json::to_string(&QualityLabel::Ok).unwrap(), "\"OK\"");
    }

    #[test]
    fn weights_must_sum_to_one() {
        assert!(ScoreWeights::default().validate().is_ok());
        let weights = ScoreWeights {
            duration: 0.5,
            continuity: 0.4,
        };
        assert!(weights.validate().is_err());
        let weights = ScoreWeights {
            duration: 1.2,
            continuity: -0.2,
        };
        assert!(weights.validate().is_err());
    }

    #[test]
    fn duration_saturates_at_target() {
        let weights = ScoreWeights::default();
        assert_eq!(weights.score(8.0, 8.0, 1.0), 100);
        assert_eq!(weights.score(11.0, 8.0, 1.0), 100);
        assert_eq!(weights.score(0.0, 8.0, 0.0), 0);
    }

    #[test]
    fn score_blends_components() {
        let weights = ScoreWeights::default();
        // 0.7 * 0.75 + 0.3 * 1.0 = 0.825
        assert_eq!(weights.score(6.0, 8.0, 1.0), 83);
        // 0.7 * 1.0 + 0.3 * 0.5 = 0.85
        assert_eq!(weights.score(8.0, 8.0, 0.5), 85);
    }

    #[test]
    fn score_non_decreasing_in_duration() {
        let weights = ScoreWeights::default();
        let mut previous = 0;
        for quarter_hours in 0..=40 {
            let score = weights.score(quarter_hours as f64 / 4.0, 8.0, 0.6);
            assert!(score >= previous);
            previous = score;
        }
    }
}
