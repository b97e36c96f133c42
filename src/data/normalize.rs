use chrono::{NaiveDate, NaiveDateTime};

// ---------------------------------------------------------------------------
// Cell coercion: malformed input becomes `None`, never an error
// ---------------------------------------------------------------------------

/// Parse an availability cell. Blank, non-numeric and NaN cells are missing.
pub fn coerce_numeric(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<f64>().ok().filter(|v| !v.is_nan())
}

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parse a review date. Accepts plain dates and ISO date-times; anything
/// else is missing.
pub fn coerce_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
    {
        return Some(date);
    }
    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    {
        return Some(dt.date());
    }
    chrono::DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_cells() {
        assert_eq!(coerce_numeric("12"), Some(12.0));
        assert_eq!(coerce_numeric(" 365 "), Some(365.0));
        assert_eq!(coerce_numeric("30.0"), Some(30.0));
    }

    #[test]
    fn malformed_numeric_cells_are_missing() {
        assert_eq!(coerce_numeric(""), None);
        assert_eq!(coerce_numeric("   "), None);
        assert_eq!(coerce_numeric("N/A"), None);
        assert_eq!(coerce_numeric("nan"), None);
        assert_eq!(coerce_numeric("12 days"), None);
    }

    #[test]
    fn date_formats() {
        let expected = NaiveDate::from_ymd_opt(2023, 3, 9);
        assert_eq!(coerce_date("2023-03-09"), expected);
        assert_eq!(coerce_date("2023/03/09"), expected);
        assert_eq!(coerce_date("03/09/2023"), expected);
        assert_eq!(coerce_date("2023-03-09 18:45:00"), expected);
        assert_eq!(coerce_date("2023-03-09T18:45:00.250"), expected);
        assert_eq!(coerce_date("2023-03-09T18:45:00+02:00"), expected);
    }

    #[test]
    fn malformed_dates_are_missing() {
        assert_eq!(coerce_date(""), None);
        assert_eq!(coerce_date("yesterday"), None);
        assert_eq!(coerce_date("2023-02-30"), None);
        assert_eq!(coerce_date("2023-13-01"), None);
    }
}
