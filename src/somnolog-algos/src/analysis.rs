use std::fmt::{self, Display};

use chrono::{NaiveDateTime, TimeDelta};
use serde::Serialize;
use somnolog_types::Reading;

use crate::{
    AnalysisError, BaselineStrategy, ClassificationResult, Episode, MalformedReading,
    MeanBaseline, QualityLabel, ReadingIssue, SleepClassifier, SleepDetectorConfig,
    episode::detect_runs,
    helpers::{
        format_hm::FormatHM,
        time_math::{fraction, readings_to_hours, round_float},
    },
};

/// Turns a reading sequence into sleep episodes and a scored summary.
///
/// The analyzer holds no state between calls, so one instance can serve any
/// number of independent sequences.
#[derive(Debug, Clone)]
pub struct EpisodeAnalyzer<B = MeanBaseline> {
    pub(crate) config: SleepDetectorConfig,
    pub(crate) classifier: SleepClassifier,
    pub(crate) baseline: B,
}

/// Per-reading classification shared by the sleep and sedentary passes.
pub(crate) struct Classified {
    pub baseline: f64,
    pub results: Vec<ClassificationResult>,
    pub warnings: Vec<MalformedReading>,
}

impl Default for EpisodeAnalyzer {
    fn default() -> Self {
        let config = SleepDetectorConfig::default();
        Self {
            config,
            classifier: SleepClassifier::new(&config),
            baseline: MeanBaseline,
        }
    }
}

impl EpisodeAnalyzer {
    pub fn new(config: SleepDetectorConfig) -> Result<Self, AnalysisError> {
        config.validate()?;
        Ok(Self {
            config,
            classifier: SleepClassifier::new(&config),
            baseline: MeanBaseline,
        })
    }
}

impl<B: BaselineStrategy> EpisodeAnalyzer<B> {
    pub fn with_baseline<S: BaselineStrategy>(self, baseline: S) -> EpisodeAnalyzer<S> {
        EpisodeAnalyzer {
            config: self.config,
            classifier: self.classifier,
            baseline,
        }
    }

    pub fn config(&self) -> &SleepDetectorConfig {
        &self.config
    }

    pub fn analyze(
        &self,
        readings: &[Reading],
        sampling_interval_minutes: f64,
    ) -> Result<SleepAnalysis, AnalysisError> {
        let classified = self.classify_all(readings, sampling_interval_minutes)?;
        Ok(self.summarize(readings, classified, sampling_interval_minutes))
    }

    /// Builds the sleep summary from an already classified sequence.
    pub(crate) fn summarize(
        &self,
        readings: &[Reading],
        classified: Classified,
        sampling_interval_minutes: f64,
    ) -> SleepAnalysis {
        let Classified {
            baseline,
            results,
            warnings,
        } = classified;

        let (episode_runs, short_runs): (Vec<_>, Vec<_>) =
            detect_runs(results.iter().map(|r| r.sleep_like))
                .into_iter()
                .partition(|run| run.len() >= self.config.min_episode_readings);

        let episodes = episode_runs
            .into_iter()
            .map(|run| Episode::from_run(run, readings))
            .collect::<Vec<_>>();

        for episode in &episodes {
            debug!(
                "Sleep episode {} - {} ({} readings)",
                episode.start, episode.end, episode.readings
            );
        }

        let episode_readings = episodes.iter().map(|e| e.readings).sum::<usize>();
        let near_miss_readings = short_runs.iter().map(|run| run.len()).sum::<usize>();

        let duration_hours = readings_to_hours(episode_readings, sampling_interval_minutes);
        let continuity = fraction(episode_readings, episode_readings + near_miss_readings);
        let score = self
            .config
            .weights
            .score(duration_hours, self.config.target_hours, continuity);

        SleepAnalysis {
            duration_hours,
            score,
            quality: self.config.thresholds.label(score),
            factors: FactorBreakdown::new(&results, near_miss_readings, warnings.len()),
            episodes,
            baseline_bpm: baseline,
            warnings,
        }
    }

    pub(crate) fn classify_all(
        &self,
        readings: &[Reading],
        sampling_interval_minutes: f64,
    ) -> Result<Classified, AnalysisError> {
        if readings.is_empty() {
            return Err(AnalysisError::EmptyInput);
        }
        if !sampling_interval_minutes.is_finite() || sampling_interval_minutes <= 0.0 {
            return Err(AnalysisError::InvalidSamplingInterval(
                sampling_interval_minutes,
            ));
        }

        let mut warnings = Vec::new();
        let mut well_formed = Vec::with_capacity(readings.len());
        for (index, reading) in readings.iter().enumerate() {
            let issues = ReadingIssue::inspect(reading);
            if issues.is_empty() {
                well_formed.push(*reading);
                continue;
            }

            let warning = MalformedReading {
                index,
                time: reading.time,
                issues,
            };
            warn!("{}", warning);
            warnings.push(warning);
        }

        let baseline = self.baseline.compute_baseline(&well_formed)?;
        if !baseline.is_finite() || baseline <= 0.0 {
            return Err(AnalysisError::InvalidBaseline(baseline));
        }

        let results = readings
            .iter()
            .map(|reading| self.classifier.classify(reading, baseline))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Classified {
            baseline,
            results,
            warnings,
        })
    }
}

/// Analyzes `readings` with the default detector config and a mean baseline.
pub fn analyze(
    readings: &[Reading],
    sampling_interval_minutes: f64,
) -> Result<SleepAnalysis, AnalysisError> {
    EpisodeAnalyzer::default().analyze(readings, sampling_interval_minutes)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SleepAnalysis {
    pub duration_hours: f64,
    pub score: u8,
    pub quality: QualityLabel,
    pub factors: FactorBreakdown,
    pub episodes: Vec<Episode>,
    pub baseline_bpm: f64,
    pub warnings: Vec<MalformedReading>,
}

impl SleepAnalysis {
    pub fn sleep_detected(&self) -> bool {
        !self.episodes.is_empty()
    }

    /// Longest episode, the earliest one on ties.
    pub fn longest_episode(&self) -> Option<&Episode> {
        self.episodes
            .iter()
            .fold(None, |longest: Option<&Episode>, e| match longest {
                Some(l) if l.readings >= e.readings => Some(l),
                _ => Some(e),
            })
    }

    pub fn sleep_start(&self) -> Option<NaiveDateTime> {
        self.longest_episode().map(|e| e.start)
    }

    pub fn sleep_end(&self) -> Option<NaiveDateTime> {
        self.longest_episode().map(|e| e.end)
    }

    pub fn duration(&self) -> TimeDelta {
        TimeDelta::seconds((self.duration_hours * 3600.0).round() as i64)
    }
}

/// Share of all readings failing each sleep predicate.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct FactorBreakdown {
    pub light: f64,
    pub motion: f64,
    pub heart_rate: f64,
    /// Sleep-like readings in runs too short to count as an episode
    pub near_miss_readings: usize,
    pub malformed_readings: usize,
}

impl FactorBreakdown {
    pub(crate) fn new(
        results: &[ClassificationResult],
        near_miss_readings: usize,
        malformed_readings: usize,
    ) -> Self {
        let total = results.len();
        let failing = |predicate: fn(&ClassificationResult) -> bool| {
            fraction(results.iter().filter(|r| !predicate(r)).count(), total)
        };

        Self {
            light: failing(|r| r.light_ok),
            motion: failing(|r| r.motion_ok),
            heart_rate: failing(|r| r.heart_rate_ok),
            near_miss_readings,
            malformed_readings,
        }
    }

    /// One line per factor that kept readings from counting as sleep.
    pub fn explanations(&self) -> Vec<String> {
        let mut lines = Vec::new();
        let percent = |share: f64| round_float(share * 100.0).round();

        if self.light > 0.0 {
            lines.push(format!("too bright in {}% of readings", percent(self.light)));
        }
        if self.motion > 0.0 {
            lines.push(format!("motion detected in {}% of readings", percent(self.motion)));
        }
        if self.heart_rate > 0.0 {
            lines.push(format!(
                "heart rate too high in {}% of readings",
                percent(self.heart_rate)
            ));
        }
        if self.near_miss_readings > 0 {
            lines.push(format!(
                "{} sleep-like readings in runs too short to count",
                self.near_miss_readings
            ));
        }
        if self.malformed_readings > 0 {
            lines.push(format!(
                "{} malformed readings excluded",
                self.malformed_readings
            ));
        }

        lines
    }
}

impl Display for SleepAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_fmt(format_args!(
            "Duration: {} ({}h) in {} episode(s)\nScore: {} ({})\nBaseline: {} bpm",
            self.duration().format_hm(),
            round_float(self.duration_hours),
            self.episodes.len(),
            self.score,
            self.quality,
            round_float(self.baseline_bpm),
        ))?;

        if let (Some(start), Some(end)) = (self.sleep_start(), self.sleep_end()) {
            f.write_fmt(format_args!("\nMain sleep: {} - {}", start, end))?;
        }

        for line in self.factors.explanations() {
            f.write_fmt(format_args!("\n\t{}", line))?;
        }
        Ok(())
    }
}
