use serde::Serialize;
use somnolog_types::Reading;

use crate::{
    AnalysisError, BaselineStrategy, BurnoutIndex, EpisodeAnalyzer, SedentaryReport,
    SleepAnalysis, StressCalculator, StressScore,
};

/// Everything derived from one reading sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WellnessReport {
    pub sleep: SleepAnalysis,
    pub sedentary: SedentaryReport,
    /// `None` when no reading had a usable heart rate
    pub stress: Option<StressScore>,
    pub burnout: BurnoutIndex,
}

impl<B: BaselineStrategy> EpisodeAnalyzer<B> {
    /// Sleep, sedentary, stress and burnout over a single classification
    /// pass, so malformed readings are reported once.
    pub fn assess(
        &self,
        readings: &[Reading],
        sampling_interval_minutes: f64,
    ) -> Result<WellnessReport, AnalysisError> {
        let classified = self.classify_all(readings, sampling_interval_minutes)?;
        let sedentary = self.sedentary_from(readings, &classified, sampling_interval_minutes)?;
        let sleep = self.summarize(readings, classified, sampling_interval_minutes);

        let stress = StressCalculator::calculate_stress(readings);
        let burnout = BurnoutIndex::new(&sleep, &sedentary, stress.as_ref(), readings);

        Ok(WellnessReport {
            sleep,
            sedentary,
            stress,
            burnout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FixedBaseline;
    use chrono::{NaiveDate, TimeDelta};

    const DESK: (f64, bool, f64) = (350.0, false, 72.0);
    const ASLEEP: (f64, bool, f64) = (2.0, false, 55.0);
    const BROKEN: (f64, bool, f64) = (-3.0, false, 0.0);

    fn make_readings(pattern: &[(usize, (f64, bool, f64))]) -> Vec<Reading> {
        let base = NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(17, 0, 0)
            .unwrap();
        pattern
            .iter()
            .flat_map(|&(n, spec)| std::iter::repeat_n(spec, n))
            .enumerate()
            .map(|(i, (lux, motion, bpm))| {
                Reading::new(base + TimeDelta::minutes(30 * i as i64), lux, motion, bpm)
            })
            .collect()
    }

    fn analyzer() -> EpisodeAnalyzer<FixedBaseline> {
        EpisodeAnalyzer::default().with_baseline(FixedBaseline(75.0))
    }

    #[test]
    fn empty_input_fails() {
        assert_eq!(analyzer().assess(&[], 30.0), Err(AnalysisError::EmptyInput));
    }

    #[test]
    fn matches_separate_passes() {
        let history = make_readings(&[(6, DESK), (1, BROKEN), (8, ASLEEP), (6, DESK)]);
        let report = analyzer().assess(&history, 30.0).unwrap();

        assert_eq!(report.sleep, analyzer().analyze(&history, 30.0).unwrap());
        assert_eq!(
            report.sedentary,
            analyzer().detect_sedentary(&history, 30.0).unwrap()
        );
        assert_eq!(report.sleep.warnings.len(), 1);
        assert_eq!(report.sleep.duration_hours, 4.0);
        assert_eq!(report.sedentary.total_minutes, 360.0);
    }

    #[test]
    fn burnout_uses_sleep_and_sedentary_results() {
        let history = make_readings(&[(6, DESK), (8, ASLEEP), (6, DESK)]);
        let report = analyzer().assess(&history, 30.0).unwrap();

        assert_eq!(
            report.burnout.factors.sleep,
            100.0 - f64::from(report.sleep.score)
        );
        assert_eq!(report.burnout.factors.sedentary, 50.0);
        assert!(report.stress.is_some());
    }
}
