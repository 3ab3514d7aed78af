//! Wall-clock label and second-aligned tick scheduling.

use chrono::{NaiveTime, Timelike};

pub const TIME_FORMAT: &str = "%H:%M:%S";

pub fn format_time(now: NaiveTime) -> String {
    now.format(TIME_FORMAT).to_string()
}

/// Milliseconds until the next whole second, so a timer armed with this
/// delay fires right on the boundary. Always in `1..=1000`.
pub fn delay_to_next_second(now: NaiveTime) -> u32 {
    // Leap seconds report nanos >= 1e9.
    let millis = (now.nanosecond() / 1_000_000).min(999);
    1000 - millis
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_24_hour() {
        let t = NaiveTime::from_hms_milli_opt(21, 4, 9, 250).unwrap();
        assert_eq!(format_time(t), "21:04:09");
        let t = NaiveTime::from_hms_opt(0, 0, 0).unwrap();
        assert_eq!(format_time(t), "00:00:00");
    }

    #[test]
    fn delay_lands_on_second_boundary() {
        let t = NaiveTime::from_hms_milli_opt(12, 0, 0, 0).unwrap();
        assert_eq!(delay_to_next_second(t), 1000);
        let t = NaiveTime::from_hms_milli_opt(12, 0, 0, 999).unwrap();
        assert_eq!(delay_to_next_second(t), 1);
        let t = NaiveTime::from_hms_milli_opt(12, 0, 0, 380).unwrap();
        assert_eq!(delay_to_next_second(t), 620);
        let leap = NaiveTime::from_hms_milli_opt(23, 59, 59, 1500).unwrap();
        assert_eq!(delay_to_next_second(leap), 1);
    }
}
