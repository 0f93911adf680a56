use std::collections::VecDeque;

use somnolog_algos::{AnalysisError, BaselineStrategy, EpisodeAnalyzer, SleepAnalysis};
use somnolog_types::Reading;

/// Rolling window over the most recent live readings.
#[derive(Debug, Clone)]
pub struct ReadingWindow {
    capacity: usize,
    readings: VecDeque<Reading>,
}

impl ReadingWindow {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            readings: VecDeque::with_capacity(capacity),
        }
    }

    /// Appends a reading, returning the one that fell out of the window.
    pub fn push(&mut self, reading: Reading) -> Option<Reading> {
        let evicted = if self.readings.len() == self.capacity {
            self.readings.pop_front()
        } else {
            None
        };
        self.readings.push_back(reading);
        evicted
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    pub fn readings(&self) -> Vec<Reading> {
        self.readings.iter().copied().collect()
    }

    pub fn analyze<B: BaselineStrategy>(
        &self,
        analyzer: &EpisodeAnalyzer<B>,
        sampling_interval_minutes: f64,
    ) -> Result<SleepAnalysis, AnalysisError> {
        analyzer.analyze(&self.readings(), sampling_interval_minutes)
    }
}
