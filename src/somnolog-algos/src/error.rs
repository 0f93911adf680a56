use std::fmt::{self, Display};

use chrono::NaiveDateTime;
use serde::Serialize;
use somnolog_types::Reading;
use thiserror::Error;

/// Fatal failures of a single analysis call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error("no readings supplied")]
    EmptyInput,
    #[error("baseline heart rate must be a positive number, got {0}")]
    InvalidBaseline(f64),
    #[error("sampling interval must be a positive number of minutes, got {0}")]
    InvalidSamplingInterval(f64),
    #[error("invalid detector config: {0}")]
    InvalidConfig(String),
}

/// Why a reading cannot take part in the analysis.
#[derive(Debug, Clone, Copy, PartialEq, Error, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ReadingIssue {
    #[error("lux must be a non-negative number, got {0}")]
    InvalidLux(f64),
    #[error("heart rate must be a positive number, got {0}")]
    InvalidHeartRate(f64),
}

impl ReadingIssue {
    pub fn inspect(reading: &Reading) -> Vec<ReadingIssue> {
        let mut issues = Vec::new();
        if !reading.lux.is_finite() || reading.lux < 0.0 {
            issues.push(ReadingIssue::InvalidLux(reading.lux));
        }
        if !reading.bpm.is_finite() || reading.bpm <= 0.0 {
            issues.push(ReadingIssue::InvalidHeartRate(reading.bpm));
        }
        issues
    }
}

/// Non-fatal: the reading was kept out of the baseline and counted as awake.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MalformedReading {
    pub index: usize,
    pub time: NaiveDateTime,
    pub issues: Vec<ReadingIssue>,
}

impl Display for MalformedReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "reading #{} at {} excluded", self.index, self.time)?;
        for (i, issue) in self.issues.iter().enumerate() {
            let sep = if i == 0 { ": " } else { "; " };
            write!(f, "{sep}{issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for MalformedReading {}
