use chrono::Local;

pub struct Utils;

impl Utils {
    /// Current local date as zero-padded ISO `YYYY-MM-DD`. All dates the
    /// service writes come through here, which keeps lexical `>=` on the
    /// date column chronologically correct.
    pub fn today_string() -> String {
        Local::now().format("%Y-%m-%d").to_string()
    }

    /// Current local time as `HH:MM`.
    pub fn current_time_hhmm() -> String {
        Local::now().format("%H:%M").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_today_string_is_fixed_width_iso() {
        let today = Utils::today_string();
        assert_eq!(today.len(), 10);
        let bytes = today.as_bytes();
        assert_eq!(bytes[4], b'-');
        assert_eq!(bytes[7], b'-');
        assert!(today
            .chars()
            .all(|c| c.is_ascii_digit() || c == '-'));
    }

    #[test]
    fn test_current_time_is_hh_mm() {
        let time = Utils::current_time_hhmm();
        assert_eq!(time.len(), 5);
        assert_eq!(time.as_bytes()[2], b':');
    }
}
