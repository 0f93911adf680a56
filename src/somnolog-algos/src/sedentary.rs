use chrono::NaiveDateTime;
use serde::Serialize;
use somnolog_types::Reading;
use strum::Display;

use crate::{
    AnalysisError, BaselineStrategy, EpisodeAnalyzer,
    analysis::Classified,
    episode::detect_runs,
    helpers::time_math::readings_to_hours,
};

/// State of the most recent reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ActivityStatus {
    Sleeping,
    Active,
    Sedentary,
}

/// Run of still readings in lit conditions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SedentaryPeriod {
    pub start_index: usize,
    pub end_index: usize,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub minutes: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SedentaryReport {
    pub periods: Vec<SedentaryPeriod>,
    pub total_minutes: f64,
    pub longest_minutes: f64,
    pub status: ActivityStatus,
}

impl SedentaryReport {
    /// Past this much sitting in one sequence a break is recommended.
    pub const BREAK_AFTER_MINUTES: f64 = 60.0;

    pub fn needs_break(&self) -> bool {
        self.total_minutes > Self::BREAK_AFTER_MINUTES
    }
}

impl<B: BaselineStrategy> EpisodeAnalyzer<B> {
    /// Finds awake stretches without movement: lit, still, and not sleep-like.
    pub fn detect_sedentary(
        &self,
        readings: &[Reading],
        sampling_interval_minutes: f64,
    ) -> Result<SedentaryReport, AnalysisError> {
        let classified = self.classify_all(readings, sampling_interval_minutes)?;
        self.sedentary_from(readings, &classified, sampling_interval_minutes)
    }

    pub(crate) fn sedentary_from(
        &self,
        readings: &[Reading],
        classified: &Classified,
        sampling_interval_minutes: f64,
    ) -> Result<SedentaryReport, AnalysisError> {
        let Classified {
            results, warnings, ..
        } = classified;

        let malformed = warnings.iter().map(|w| w.index).collect::<Vec<_>>();
        let flags = readings.iter().zip(results).enumerate().map(|(i, (r, c))| {
            !c.sleep_like && !r.motion && r.lux >= self.config.max_lux && !malformed.contains(&i)
        });

        let periods = detect_runs(flags)
            .into_iter()
            .filter(|run| run.len() >= self.config.min_sedentary_readings)
            .map(|run| {
                let end_index = run.end - 1;
                SedentaryPeriod {
                    start_index: run.start,
                    end_index,
                    start: readings[run.start].time,
                    end: readings[end_index].time,
                    minutes: readings_to_hours(run.len(), sampling_interval_minutes) * 60.0,
                }
            })
            .collect::<Vec<_>>();

        let total_minutes = periods.iter().map(|p| p.minutes).sum::<f64>();
        let longest_minutes = periods.iter().map(|p| p.minutes).fold(0.0, f64::max);

        let (last, last_result) = readings
            .last()
            .zip(results.last())
            .ok_or(AnalysisError::EmptyInput)?;
        let status = if last_result.sleep_like {
            ActivityStatus::Sleeping
        } else if last.motion {
            ActivityStatus::Active
        } else {
            ActivityStatus::Sedentary
        };

        Ok(SedentaryReport {
            periods,
            total_minutes,
            longest_minutes,
            status,
        })
    }
}
