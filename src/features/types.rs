use chrono::{DateTime, Datelike, FixedOffset, Timelike};

pub const FEATURE_COUNT: usize = 8;

/// [sin(hour), cos(hour), sin(dow), cos(dow), venue hash, court hash, price, outdoor]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector(pub [f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

/// Wall-clock hour and weekday of a slot, weekday 0 = Sunday
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotTime {
    pub hour: u32,
    pub dow: u32,
}

impl SlotTime {
    pub fn new(hour: u32, dow: u32) -> Self {
        Self {
            hour: hour % 24,
            dow: dow % 7,
        }
    }

    pub fn from_datetime(at: &DateTime<FixedOffset>) -> Self {
        Self::new(at.hour(), at.weekday().num_days_from_sunday())
    }
}

/// Hour-truncated ISO timestamp in the slot's own offset,
/// e.g. `2024-06-01T23:00:00+02:00`
pub fn hour_bucket(at: &DateTime<FixedOffset>) -> String {
    at.format("%Y-%m-%dT%H:00:00%:z").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_time_uses_local_offset() {
        // 2024-06-01 is a Saturday; 23:30 at +02:00 is still Saturday locally
        let at = DateTime::parse_from_rfc3339("2024-06-01T23:30:00+02:00").unwrap();
        let slot = SlotTime::from_datetime(&at);
        assert_eq!(slot, SlotTime { hour: 23, dow: 6 });
        assert_eq!(hour_bucket(&at), "2024-06-01T23:00:00+02:00");
    }
}
