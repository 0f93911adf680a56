use chrono::TimeDelta;

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0_f64
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Population standard deviation, zero for fewer than two values.
pub fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0_f64;
    }
    let avg = mean(values);
    let variance = values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Share of `count` in `total`, zero when there is nothing to divide by.
pub fn fraction(count: usize, total: usize) -> f64 {
    if total == 0 {
        0_f64
    } else {
        count as f64 / total as f64
    }
}

/// Hours covered by `readings` samples at the nominal interval.
pub fn readings_to_hours(readings: usize, interval_minutes: f64) -> f64 {
    readings as f64 * interval_minutes / 60.0
}

pub fn readings_to_delta(readings: usize, interval_minutes: f64) -> TimeDelta {
    TimeDelta::milliseconds((readings as f64 * interval_minutes * 60_000.0).round() as i64)
}

pub fn round_float(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_empty() {
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn mean_basic() {
        assert_eq!(mean(&[2.0, 4.0, 6.0]), 4.0);
    }

    #[test]
    fn std_dev_basic() {
        assert_eq!(std_dev(&[72.0]), 0.0);
        assert_eq!(std_dev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]), 2.0);
    }

    #[test]
    fn fraction_of_nothing_is_zero() {
        assert_eq!(fraction(0, 0), 0.0);
        assert_eq!(fraction(3, 0), 0.0);
    }

    #[test]
    fn fraction_basic() {
        assert_eq!(fraction(2, 5), 0.4);
    }

    #[test]
    fn readings_to_hours_minute_samples() {
        // 90 one-minute samples -> 1.5h
        assert_eq!(readings_to_hours(90, 1.0), 1.5);
        assert_eq!(readings_to_hours(6, 60.0), 6.0);
        assert_eq!(readings_to_hours(0, 30.0), 0.0);
    }

    #[test]
    fn readings_to_delta_basic() {
        assert_eq!(readings_to_delta(16, 30.0), TimeDelta::hours(8));
        assert_eq!(readings_to_delta(3, 0.5), TimeDelta::seconds(90));
    }

    #[test]
    fn round_float_basic() {
        assert_eq!(round_float(3.14159), 3.14);
        assert_eq!(round_float(1.999), 2.0);
        assert_eq!(round_float(0.0), 0.0);
    }
}
