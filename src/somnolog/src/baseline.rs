use std::str::FromStr;

use anyhow::anyhow;
use somnolog_algos::{AwakeWindowBaseline, BaselineStrategy, FixedBaseline, MeanBaseline};

/// Baseline strategy picked on the command line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BaselineChoice {
    Mean,
    AwakeWindow,
    Fixed(f64),
}

impl FromStr for BaselineChoice {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mean" => return Ok(Self::Mean),
            "awake-window" | "awake" => return Ok(Self::AwakeWindow),
            _ => {}
        }

        match s.parse::<f64>() {
            Ok(bpm) if bpm.is_finite() && bpm > 0.0 => Ok(Self::Fixed(bpm)),
            _ => Err(anyhow!(
                "Invalid baseline `{}`, expected mean, awake-window or a heart rate in bpm",
                s
            )),
        }
    }
}

impl BaselineChoice {
    pub fn strategy(self, max_lux: f64) -> Box<dyn BaselineStrategy> {
        match self {
            BaselineChoice::Mean => Box::new(MeanBaseline),
            BaselineChoice::AwakeWindow => Box::new(AwakeWindowBaseline::new(max_lux)),
            BaselineChoice::Fixed(bpm) => Box::new(FixedBaseline(bpm)),
        }
    }
}
