use std::ops::Range;

use chrono::{NaiveDateTime, TimeDelta};
use serde::Serialize;
use somnolog_types::Reading;

use crate::helpers::time_math::readings_to_delta;

/// Maximal run of consecutive sleep-like readings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Episode {
    pub start_index: usize,
    pub end_index: usize,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub readings: usize,
}

impl Episode {
    pub(crate) fn from_run(run: Range<usize>, history: &[Reading]) -> Episode {
        let end_index = run.end - 1;
        Self {
            start_index: run.start,
            end_index,
            start: history[run.start].time,
            end: history[end_index].time,
            readings: run.len(),
        }
    }

    /// Time covered at the nominal sampling interval.
    pub fn duration(&self, interval_minutes: f64) -> TimeDelta {
        readings_to_delta(self.readings, interval_minutes)
    }
}

/// Maximal runs of `true` in `flags`, as index ranges.
pub(crate) fn detect_runs<I>(flags: I) -> Vec<Range<usize>>
where
    I: IntoIterator<Item = bool>,
{
    let mut runs = Vec::new();
    let mut start = None;
    let mut len = 0;

    for (i, flag) in flags.into_iter().enumerate() {
        match (flag, start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                runs.push(s..i);
                start = None;
            }
            _ => {}
        }
        len = i + 1;
    }

    if let Some(s) = start {
        runs.push(s..len);
    }

    runs
}
