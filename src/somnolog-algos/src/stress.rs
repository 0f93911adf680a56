use serde::Serialize;
use somnolog_types::Reading;
use strum::Display;

use crate::helpers::time_math::{mean, std_dev};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StressLevel {
    Low,
    Medium,
    High,
}

impl StressLevel {
    fn raised(self) -> Self {
        match self {
            Self::Low => Self::Medium,
            Self::Medium | Self::High => Self::High,
        }
    }

    pub fn recommendations(self) -> &'static [&'static str] {
        match self {
            Self::High => &[
                "Practice deep breathing exercises (4-7-8 technique)",
                "Take regular breaks throughout the day",
                "Consider meditation or mindfulness practice",
                "Ensure adequate sleep (7-9 hours)",
            ],
            Self::Medium => &[
                "Maintain regular physical activity",
                "Practice stress management techniques",
                "Monitor your sleep quality",
            ],
            Self::Low => &[
                "Keep up your healthy habits",
                "Continue regular exercise routine",
                "Maintain good sleep hygiene",
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StressScore {
    /// 0-100, higher means better recovery
    pub hrv_score: f64,
    pub level: StressLevel,
    pub avg_bpm: f64,
    /// `None` when no reading carried a usable RMSSD value
    pub avg_rmssd: Option<f64>,
    pub bpm_std_dev: f64,
}

pub struct StressCalculator;

impl StressCalculator {
    /// Heart rate spread that raises the stress level one step.
    pub const UNSTEADY_BPM_STD_DEV: f64 = 15.0;
    const UNSTEADY_PENALTY: f64 = 15.0;
    const MIN_HRV_SCORE: f64 = 20.0;

    /// Scores recovery from RMSSD, or from resting heart rate when no
    /// reading carries RMSSD. `None` without a single valid heart rate.
    pub fn calculate_stress(readings: &[Reading]) -> Option<StressScore> {
        let usable = |v: &f64| v.is_finite() && *v > 0.0;

        let bpm = readings
            .iter()
            .map(|r| r.bpm)
            .filter(usable)
            .collect::<Vec<_>>();
        if bpm.is_empty() {
            return None;
        }

        let rmssd = readings
            .iter()
            .filter_map(|r| r.rmssd)
            .filter(usable)
            .collect::<Vec<_>>();

        let avg_bpm = mean(&bpm);
        let avg_rmssd = (!rmssd.is_empty()).then(|| mean(&rmssd));

        let (mut hrv_score, mut level) = match avg_rmssd {
            Some(avg_rmssd) => Self::from_rmssd(avg_rmssd),
            None => Self::from_heart_rate(avg_bpm),
        };

        let bpm_std_dev = std_dev(&bpm);
        if bpm_std_dev > Self::UNSTEADY_BPM_STD_DEV {
            level = level.raised();
            hrv_score = (hrv_score - Self::UNSTEADY_PENALTY).max(Self::MIN_HRV_SCORE);
        }

        Some(StressScore {
            hrv_score,
            level,
            avg_bpm,
            avg_rmssd,
            bpm_std_dev,
        })
    }

    fn from_rmssd(rmssd: f64) -> (f64, StressLevel) {
        if rmssd >= 60.0 {
            (95.0, StressLevel::Low)
        } else if rmssd >= 40.0 {
            (70.0 + (rmssd - 40.0) * 1.25, StressLevel::Low)
        } else if rmssd >= 20.0 {
            (40.0 + (rmssd - 20.0) * 1.5, StressLevel::Medium)
        } else {
            (20.0 + rmssd, StressLevel::High)
        }
    }

    fn from_heart_rate(bpm: f64) -> (f64, StressLevel) {
        if bpm < 70.0 {
            (70.0, StressLevel::Low)
        } else if bpm < 85.0 {
            (50.0, StressLevel::Medium)
        } else {
            (30.0, StressLevel::High)
        }
    }
}
