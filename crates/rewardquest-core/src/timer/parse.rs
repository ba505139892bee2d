//! Free-text time input.
//!
//! Two shapes are accepted: `MM:SS` (1-3 minute digits, 1-2 second digits)
//! and a bare 1-3 digit number meaning whole minutes. Seconds above 59 are
//! capped, not rejected.

use crate::error::ParseError;

/// Largest accepted seconds component; larger values are capped.
pub const MAX_SECONDS_FIELD: u64 = 59;

/// Parse a time input into whole seconds.
///
/// Empty input yields `Ok(0)` so callers can tell "nothing typed" apart from
/// malformed text. Whitespace-only input is not empty and is rejected.
pub fn parse_time_input(input: &str) -> Result<u64, ParseError> {
    if input.is_empty() {
        return Ok(0);
    }

    let trimmed = input.trim();
    let malformed = || ParseError {
        input: input.to_string(),
    };

    match trimmed.split_once(':') {
        Some((minutes, seconds)) => {
            let mm = digits(minutes, 3).ok_or_else(malformed)?;
            let ss = digits(seconds, 2).ok_or_else(malformed)?;
            Ok(mm * 60 + ss.min(MAX_SECONDS_FIELD))
        }
        None => {
            let mm = digits(trimmed, 3).ok_or_else(malformed)?;
            Ok(mm * 60)
        }
    }
}

/// Render seconds as `MM:SS`. Minutes are not wrapped at 60.
pub fn format_mmss(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

fn digits(field: &str, max_len: usize) -> Option<u64> {
    if field.is_empty() || field.len() > max_len || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_minutes_and_seconds() {
        assert_eq!(parse_time_input("05:30"), Ok(330));
        assert_eq!(parse_time_input("0:5"), Ok(5));
        assert_eq!(parse_time_input("120:00"), Ok(7200));
    }

    #[test]
    fn bare_number_is_minutes() {
        assert_eq!(parse_time_input("5"), Ok(300));
        assert_eq!(parse_time_input("999"), Ok(999 * 60));
    }

    #[test]
    fn seconds_above_59_are_capped() {
        assert_eq!(parse_time_input("1:99"), Ok(119));
        assert_eq!(parse_time_input("0:60"), Ok(59));
    }

    #[test]
    fn empty_is_zero_not_error() {
        assert_eq!(parse_time_input(""), Ok(0));
    }

    #[test]
    fn surrounding_whitespace_is_allowed() {
        assert_eq!(parse_time_input("  10:00 "), Ok(600));
        assert_eq!(parse_time_input("\t7\n"), Ok(420));
    }

    #[test]
    fn rejects_malformed_text() {
        for bad in ["abc", "   ", "1:2:3", "1234", "1:123", ":30", "5:", "-5", "5 :30", "1.5", "٣"] {
            assert!(parse_time_input(bad).is_err(), "expected error for {bad:?}");
        }
    }

    #[test]
    fn error_keeps_original_input() {
        let err = parse_time_input(" x ").unwrap_err();
        assert_eq!(err.input, " x ");
    }

    #[test]
    fn format_pads_and_does_not_wrap_minutes() {
        assert_eq!(format_mmss(0), "00:00");
        assert_eq!(format_mmss(330), "05:30");
        assert_eq!(format_mmss(6000), "100:00");
    }

    proptest! {
        #[test]
        fn mmss_matches_arithmetic(mm in 0u64..1000, ss in 0u64..100) {
            let parsed = parse_time_input(&format!("{mm}:{ss}")).unwrap();
            prop_assert_eq!(parsed, mm * 60 + ss.min(59));
        }

        #[test]
        fn formatted_durations_parse_back(secs in 0u64..(999 * 60 + 59)) {
            prop_assert_eq!(parse_time_input(&format_mmss(secs)).unwrap(), secs);
        }
    }
}
