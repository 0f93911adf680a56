use chrono::TimeDelta;

pub trait FormatHM {
    fn format_hm(&self) -> String;
}

/// Hours are not wrapped to a day, a 25 hour span prints as `25:00`.
impl FormatHM for TimeDelta {
    fn format_hm(&self) -> String {
        format!("{:02}:{:02}", self.num_hours(), self.num_minutes() % 60)
    }
}
