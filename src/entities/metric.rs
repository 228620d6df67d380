/// A single measurement logged for a run.
///
/// Equality compares all four fields, so two metrics holding `NaN` are never equal.
#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    pub key: String,
    pub value: f64,
    /// Milliseconds since the unix epoch, see [`current_time_millis`](crate::current_time_millis).
    pub timestamp: i64,
    pub step: i64,
}

impl Metric {
    pub fn new(key: impl Into<String>, value: f64, timestamp: i64, step: i64) -> Self {
        Metric {
            key: key.into(),
            value,
            timestamp,
            step,
        }
    }
}
