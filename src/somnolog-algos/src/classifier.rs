use serde::Serialize;
use somnolog_types::Reading;

use crate::{AnalysisError, SleepDetectorConfig};

/// Outcome of the three sleep predicates for one reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ClassificationResult {
    pub sleep_like: bool,
    pub light_ok: bool,
    pub motion_ok: bool,
    pub heart_rate_ok: bool,
}

impl ClassificationResult {
    pub fn new(light_ok: bool, motion_ok: bool, heart_rate_ok: bool) -> Self {
        Self {
            sleep_like: light_ok && motion_ok && heart_rate_ok,
            light_ok,
            motion_ok,
            heart_rate_ok,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SleepClassifier {
    max_lux: f64,
    heart_rate_ratio: f64,
}

impl Default for SleepClassifier {
    fn default() -> Self {
        Self::new(&SleepDetectorConfig::default())
    }
}

impl SleepClassifier {
    pub fn new(config: &SleepDetectorConfig) -> Self {
        Self {
            max_lux: config.max_lux,
            heart_rate_ratio: config.heart_rate_ratio,
        }
    }

    /// A reading is sleep-like when it is dark, still, and its heart rate sits
    /// clearly under `baseline`. Malformed light or heart rate values fail
    /// their predicate.
    pub fn classify(
        &self,
        reading: &Reading,
        baseline: f64,
    ) -> Result<ClassificationResult, AnalysisError> {
        if !baseline.is_finite() || baseline <= 0.0 {
            return Err(AnalysisError::InvalidBaseline(baseline));
        }

        let light_ok = reading.lux.is_finite() && reading.lux >= 0.0 && reading.lux < self.max_lux;
        let motion_ok = !reading.motion;
        let heart_rate_ok = reading.bpm.is_finite()
            && reading.bpm > 0.0
            && reading.bpm < baseline * self.heart_rate_ratio;

        Ok(ClassificationResult::new(light_ok, motion_ok, heart_rate_ok))
    }
}
