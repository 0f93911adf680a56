#[macro_use]
extern crate log;

pub(crate) mod error;
pub use error::{AnalysisError, MalformedReading, ReadingIssue};

pub(crate) mod config;
pub use config::SleepDetectorConfig;

pub(crate) mod score;
pub use score::{QualityLabel, QualityThresholds, ScoreWeights};

pub(crate) mod classifier;
pub use classifier::{ClassificationResult, SleepClassifier};

pub(crate) mod baseline;
pub use baseline::{AwakeWindowBaseline, BaselineStrategy, FixedBaseline, MeanBaseline};

pub(crate) mod episode;
pub use episode::Episode;

pub(crate) mod analysis;
pub use analysis::{EpisodeAnalyzer, FactorBreakdown, SleepAnalysis, analyze};

pub(crate) mod sedentary;
pub use sedentary::{ActivityStatus, SedentaryPeriod, SedentaryReport};

pub(crate) mod stress;
pub use stress::{StressCalculator, StressLevel, StressScore};

pub(crate) mod burnout;
pub use burnout::{BurnoutFactors, BurnoutIndex, BurnoutLevel};

pub(crate) mod wellness;
pub use wellness::WellnessReport;

pub mod helpers;

pub use somnolog_types::Reading;
