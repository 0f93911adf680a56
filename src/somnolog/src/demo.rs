//! Hand-authored day of readings for demos: an afternoon and evening awake,
//! a night of sleep broken by one stir, and a morning awake again.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use somnolog_types::Reading;

/// Nominal spacing of the demo readings.
pub const INTERVAL_MINUTES: f64 = 30.0;

/// (readings, lux, motion, bpm)
const SEGMENTS: [(usize, f64, bool, f64); 11] = [
    // 12:00 walking around the office
    (6, 420.0, true, 82.0),
    // 15:00 at the desk
    (6, 380.0, false, 76.0),
    // 18:00 evening walk and cooking
    (4, 250.0, true, 88.0),
    // 20:00 sofa
    (4, 120.0, false, 74.0),
    // 22:00 dozing off in front of a dark screen
    (2, 6.0, false, 58.0),
    // 23:00 getting ready for bed
    (1, 180.0, true, 78.0),
    // 23:30 asleep
    (8, 1.0, false, 56.0),
    // 03:30 stirs
    (1, 2.0, true, 63.0),
    // 04:00 asleep again
    (6, 0.5, false, 54.0),
    // 07:00 waking up
    (2, 40.0, true, 72.0),
    // 08:00 morning
    (4, 500.0, true, 84.0),
];

fn start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 1, 1)
        .and_then(|d| d.and_hms_opt(12, 0, 0))
        .unwrap_or_default()
}

pub fn readings() -> Vec<Reading> {
    let start = start();
    let step = TimeDelta::minutes(INTERVAL_MINUTES as i64);

    SEGMENTS
        .iter()
        .flat_map(|&(count, lux, motion, bpm)| std::iter::repeat_n((lux, motion, bpm), count))
        .enumerate()
        .map(|(i, (lux, motion, bpm))| Reading::new(start + step * i as i32, lux, motion, bpm))
        .collect()
}
