use chrono::NaiveDateTime;
use serde::Serialize;
use somnolog_algos::{
    AnalysisError, BurnoutIndex, Episode, FactorBreakdown, QualityLabel, SedentaryReport,
    SleepAnalysis, StressScore, WellnessReport, helpers::time_math::round_float,
};

/// JSON body returned for a successful analysis.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResponse {
    pub sleep_detected: bool,
    pub sleep_start: Option<NaiveDateTime>,
    pub sleep_end: Option<NaiveDateTime>,
    pub duration_hours: f64,
    pub score: u8,
    pub quality: QualityLabel,
    pub factors: FactorBreakdown,
    pub insights: Vec<String>,
    pub episodes: Vec<Episode>,
    pub baseline_bpm: f64,
    pub warnings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sedentary: Option<SedentaryReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stress: Option<StressScore>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub burnout: Option<BurnoutIndex>,
}

impl AnalysisResponse {
    /// Sleep-only response, as produced for each live window.
    pub fn new(analysis: SleepAnalysis) -> Self {
        Self {
            sleep_detected: analysis.sleep_detected(),
            sleep_start: analysis.sleep_start(),
            sleep_end: analysis.sleep_end(),
            duration_hours: round_float(analysis.duration_hours),
            score: analysis.score,
            quality: analysis.quality,
            insights: analysis.factors.explanations(),
            factors: analysis.factors,
            episodes: analysis.episodes,
            baseline_bpm: round_float(analysis.baseline_bpm),
            warnings: analysis.warnings.iter().map(ToString::to_string).collect(),
            sedentary: None,
            stress: None,
            burnout: None,
        }
    }
}

impl From<WellnessReport> for AnalysisResponse {
    fn from(report: WellnessReport) -> Self {
        Self {
            sedentary: Some(report.sedentary),
            stress: report.stress,
            burnout: Some(report.burnout),
            ..Self::new(report.sleep)
        }
    }
}

/// JSON body returned when an analysis cannot be produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorResponse {
    pub status: u16,
    pub error: &'static str,
    pub message: String,
}

impl From<&AnalysisError> for ErrorResponse {
    fn from(error: &AnalysisError) -> Self {
        let (status, kind) = match error {
            AnalysisError::EmptyInput => (400, "empty_input"),
            AnalysisError::InvalidBaseline(_) => (422, "invalid_baseline"),
            AnalysisError::InvalidSamplingInterval(_) => (400, "invalid_sampling_interval"),
            AnalysisError::InvalidConfig(_) => (400, "invalid_config"),
        };

        Self {
            status,
            error: kind,
            message: error.to_string(),
        }
    }
}
