use somnolog_types::Reading;

use crate::{AnalysisError, helpers::time_math::mean};

/// Derives the awake reference heart rate for one analysis call.
///
/// Implementations only ever see well-formed readings. A result that is not
/// a positive number fails the analysis with [`AnalysisError::InvalidBaseline`].
pub trait BaselineStrategy {
    fn compute_baseline(&self, readings: &[Reading]) -> Result<f64, AnalysisError>;
}

impl<T: BaselineStrategy + ?Sized> BaselineStrategy for Box<T> {
    fn compute_baseline(&self, readings: &[Reading]) -> Result<f64, AnalysisError> {
        (**self).compute_baseline(readings)
    }
}

/// Plain mean heart rate over the whole sequence.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeanBaseline;

impl BaselineStrategy for MeanBaseline {
    fn compute_baseline(&self, readings: &[Reading]) -> Result<f64, AnalysisError> {
        let bpm = readings.iter().map(|r| r.bpm).collect::<Vec<_>>();
        Ok(mean(&bpm))
    }
}

/// Mean heart rate over readings that are visibly awake (lit or moving).
/// Falls back to the whole sequence when there are none.
#[derive(Debug, Clone, Copy)]
pub struct AwakeWindowBaseline {
    pub max_lux: f64,
}

impl AwakeWindowBaseline {
    pub fn new(max_lux: f64) -> Self {
        Self { max_lux }
    }
}

impl Default for AwakeWindowBaseline {
    fn default() -> Self {
        Self::new(10.0)
    }
}

impl BaselineStrategy for AwakeWindowBaseline {
    fn compute_baseline(&self, readings: &[Reading]) -> Result<f64, AnalysisError> {
        let awake = readings
            .iter()
            .filter(|r| r.motion || r.lux >= self.max_lux)
            .map(|r| r.bpm)
            .collect::<Vec<_>>();

        if awake.is_empty() {
            return MeanBaseline.compute_baseline(readings);
        }

        Ok(mean(&awake))
    }
}

/// Externally supplied reference heart rate.
#[derive(Debug, Clone, Copy)]
pub struct FixedBaseline(pub f64);

impl BaselineStrategy for FixedBaseline {
    fn compute_baseline(&self, _readings: &[Reading]) -> Result<f64, AnalysisError> {
        Ok(self.0)
    }
}
