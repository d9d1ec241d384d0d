/// Flexible calendar-date normalization for heterogeneous station data files.
///
/// Station CSVs come from several agencies and mix day-first, month-first,
/// and ISO date strings. `parse_flexible_date` tries a fixed, ordered list of
/// formats and returns the first that parses. Callers treat a failure as
/// "drop the record", never as a hard stop.
///
/// # Ambiguity
/// Because day-month-year is tried before month-day-year, a string like
/// `03-04-2021` always resolves day-first (3 April), even though it is also a
/// valid month-first date. `is_ambiguous` detects this case so ingest can
/// count and log it; the resolution order itself is part of the contract.

use chrono::NaiveDate;

use crate::model::PipelineError;

/// Supported formats, attempted in order. First match wins.
const DATE_FORMATS: &[&str] = &[
    "%d-%m-%Y", // Day-Month-Year (13-01-2020)
    "%m-%d-%Y", // Month-Day-Year (01-13-2020)
    "%Y-%m-%d", // Year-Month-Day (2020-01-13)
    "%d/%m/%Y", // Day/Month/Year (13/01/2020)
    "%m/%d/%Y", // Month/Day/Year (01/13/2020)
];

/// Parses a date string against the supported format list.
///
/// Returns `PipelineError::DateParse` when no format matches.
pub fn parse_flexible_date(raw: &str) -> Result<NaiveDate, PipelineError> {
    let trimmed = raw.trim();
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Ok(date);
        }
    }
    Err(PipelineError::DateParse(raw.to_string()))
}

/// Returns `true` if the string is valid under both the day-first and
/// month-first delimited readings and the two readings disagree.
///
/// `05-05-2021` parses both ways but to the same date, so it is not
/// ambiguous. `03-04-2021` is.
pub fn is_ambiguous(raw: &str) -> bool {
    let trimmed = raw.trim();
    let day_first = NaiveDate::parse_from_str(trimmed, "%d-%m-%Y")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%d/%m/%Y"));
    let month_first = NaiveDate::parse_from_str(trimmed, "%m-%d-%Y")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%m/%d/%Y"));
    match (day_first, month_first) {
        (Ok(d), Ok(m)) => d != m,
        _ => false,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_day_month_year_dashes() {
        assert_eq!(parse_flexible_date("13-01-2020").unwrap(), ymd(2020, 1, 13));
    }

    #[test]
    fn test_month_day_year_dashes() {
        // Day slot is 13, impossible as a month, so the month-first format
        // is the first one that parses.
        assert_eq!(parse_flexible_date("01-13-2020").unwrap(), ymd(2020, 1, 13));
    }

    #[test]
    fn test_year_month_day() {
        assert_eq!(parse_flexible_date("2020-01-13").unwrap(), ymd(2020, 1, 13));
    }

    #[test]
    fn test_day_month_year_slashes() {
        assert_eq!(parse_flexible_date("13/01/2020").unwrap(), ymd(2020, 1, 13));
    }

    #[test]
    fn test_month_day_year_slashes() {
        assert_eq!(parse_flexible_date("01/13/2020").unwrap(), ymd(2020, 1, 13));
    }

    #[test]
    fn test_surrounding_whitespace_is_tolerated() {
        assert_eq!(parse_flexible_date(" 13-01-2020 ").unwrap(), ymd(2020, 1, 13));
    }

    #[test]
    fn test_ambiguous_date_resolves_day_first() {
        // 03-04-2021 is valid both ways; the format-list order makes
        // day-first win: 3 April, not 4 March.
        assert_eq!(parse_flexible_date("03-04-2021").unwrap(), ymd(2021, 4, 3));
    }

    #[test]
    fn test_unparseable_string_returns_date_parse_error() {
        let result = parse_flexible_date("not-a-date");
        assert!(
            matches!(result, Err(PipelineError::DateParse(_))),
            "expected DateParse error, got {:?}",
            result
        );
    }

    #[test]
    fn test_empty_string_returns_date_parse_error() {
        assert!(parse_flexible_date("").is_err());
    }

    #[test]
    fn test_impossible_calendar_date_is_rejected() {
        // Day 32 fits no format.
        assert!(parse_flexible_date("32-01-2020").is_err());
    }

    #[test]
    fn test_is_ambiguous_when_both_readings_differ() {
        assert!(is_ambiguous("03-04-2021"));
        assert!(is_ambiguous("01/02/2020"));
    }

    #[test]
    fn test_is_not_ambiguous_when_day_exceeds_twelve() {
        assert!(!is_ambiguous("13-01-2020"));
    }

    #[test]
    fn test_is_not_ambiguous_when_readings_agree() {
        // Same digit in both slots: both readings are the same date.
        assert!(!is_ambiguous("05-05-2021"));
    }

    #[test]
    fn test_iso_dates_are_not_flagged_ambiguous() {
        assert!(!is_ambiguous("2020-01-13"));
    }
}
