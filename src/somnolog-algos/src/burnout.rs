use std::fmt::{self, Display};

use serde::Serialize;
use somnolog_types::Reading;
use strum::Display as StrumDisplay;

use crate::{
    SedentaryReport, SleepAnalysis, StressScore,
    helpers::time_math::{mean, round_float},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, StrumDisplay)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BurnoutLevel {
    Low,
    Medium,
    High,
}

/// Burnout contribution of each component, 0-100 where higher is worse.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BurnoutFactors {
    pub sleep: f64,
    pub sedentary: f64,
    pub stress: f64,
    pub environment: f64,
}

/// Weighted index over sleep, sitting, stress and the room environment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BurnoutIndex {
    pub score: f64,
    pub level: BurnoutLevel,
    pub factors: BurnoutFactors,
    pub recommendations: Vec<String>,
}

impl BurnoutIndex {
    const SLEEP_WEIGHT: f64 = 0.30;
    const SEDENTARY_WEIGHT: f64 = 0.25;
    const STRESS_WEIGHT: f64 = 0.30;
    const ENVIRONMENT_WEIGHT: f64 = 0.15;

    /// HRV score assumed when stress could not be scored.
    pub const NEUTRAL_HRV_SCORE: f64 = 50.0;
    const CONCERN: f64 = 50.0;

    pub fn new(
        sleep: &SleepAnalysis,
        sedentary: &SedentaryReport,
        stress: Option<&StressScore>,
        readings: &[Reading],
    ) -> Self {
        let hrv_score = stress.map_or(Self::NEUTRAL_HRV_SCORE, |s| s.hrv_score);
        let factors = BurnoutFactors {
            sleep: 100.0 - f64::from(sleep.score),
            sedentary: sedentary_impact(sedentary.total_minutes),
            stress: 100.0 - hrv_score,
            environment: environment_impact(readings),
        };

        let score = factors.sleep * Self::SLEEP_WEIGHT
            + factors.sedentary * Self::SEDENTARY_WEIGHT
            + factors.stress * Self::STRESS_WEIGHT
            + factors.environment * Self::ENVIRONMENT_WEIGHT;

        let level = if score >= 70.0 {
            BurnoutLevel::High
        } else if score >= 40.0 {
            BurnoutLevel::Medium
        } else {
            BurnoutLevel::Low
        };

        Self {
            score,
            level,
            recommendations: recommendations(&factors, level),
            factors,
        }
    }
}

fn sedentary_impact(minutes: f64) -> f64 {
    match minutes {
        m if m > 480.0 => 90.0,
        m if m > 360.0 => 70.0,
        m if m > 240.0 => 50.0,
        m if m > 120.0 => 30.0,
        _ => 10.0,
    }
}

/// Light is judged for desk work, 200-500 lux. Temperature only counts when
/// readings carry it.
fn environment_impact(readings: &[Reading]) -> f64 {
    let lux = readings
        .iter()
        .map(|r| r.lux)
        .filter(|v| v.is_finite() && *v >= 0.0)
        .collect::<Vec<_>>();
    let temps = readings
        .iter()
        .filter_map(|r| r.temp)
        .filter(|v| v.is_finite())
        .collect::<Vec<_>>();

    let avg_lux = mean(&lux);
    let light = if (200.0..=500.0).contains(&avg_lux) {
        10.0
    } else if (100.0..200.0).contains(&avg_lux) || (avg_lux > 500.0 && avg_lux <= 1000.0) {
        40.0
    } else {
        70.0
    };

    if temps.is_empty() {
        return light;
    }

    let avg_temp = mean(&temps);
    let temp = if (20.0..=24.0).contains(&avg_temp) {
        10.0
    } else if (18.0..20.0).contains(&avg_temp) || (avg_temp > 24.0 && avg_temp <= 26.0) {
        40.0
    } else {
        70.0
    };

    (light + temp) / 2.0
}

fn recommendations(factors: &BurnoutFactors, level: BurnoutLevel) -> Vec<String> {
    let concern = |impact: f64| impact > BurnoutIndex::CONCERN;
    let mut lines = Vec::new();

    if concern(factors.sleep) {
        lines.push("Prioritize sleep: aim for 7-9 hours of quality sleep");
    }
    if concern(factors.sedentary) {
        lines.push("Reduce sedentary time: take breaks every 30-60 minutes");
    }
    if concern(factors.stress) {
        lines.push("Practice stress management: meditation, deep breathing");
        lines.push("Consider professional support if stress persists");
    }
    if concern(factors.environment) {
        lines.push("Optimize your environment: adjust lighting and temperature");
    }
    if level == BurnoutLevel::Low {
        lines.push("Great job! Maintain your healthy habits");
    }

    lines.into_iter().map(String::from).collect()
}

impl Display for BurnoutIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_fmt(format_args!(
            "Burnout: {} ({})\n\tsleep {}, sedentary {}, stress {}, environment {}",
            round_float(self.score),
            self.level,
            round_float(self.factors.sleep),
            round_float(self.factors.sedentary),
            round_float(self.factors.stress),
            round_float(self.factors.environment),
        ))
    }
}
