//! Shared cell-level helpers for the wrangling pipeline.
//!
//! Every numeric heuristic in the pipeline works on decorated cell text
//! (`"$1,200.00"`, `"12%"`). The helpers here centralize the stripping and
//! parsing rules so each engine applies them identically.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

/// Decoration characters stripped before numeric parsing.
pub const NUMERIC_DECORATIONS: [char; 3] = ['$', ',', '%'];

/// Strip currency/thousands/percent decorations and surrounding whitespace.
pub fn strip_decorations(s: &str) -> String {
    let mut result = s.trim().to_string();
    for c in NUMERIC_DECORATIONS {
        result = result.replace(c, "");
    }
    result
}

/// Try to parse a decorated cell as a finite number.
pub fn parse_decorated_number(s: &str) -> Option<f64> {
    let cleaned = strip_decorations(s);
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Whether a decorated cell parses as a number.
pub fn is_decorated_number(s: &str) -> bool {
    parse_decorated_number(s).is_some()
}

static PLAIN_DECIMAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+(\.\d+)?$").unwrap());

/// Whether the stripped cell is a plain non-negative decimal.
///
/// This is the stricter test the row-merge aggregation uses; signed or
/// exponent forms do not qualify.
pub fn is_plain_decimal(s: &str) -> bool {
    PLAIN_DECIMAL.is_match(&strip_decorations(s))
}

/// ISO `YYYY-MM-DD` value pattern.
pub static ISO_DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());

/// Slash-delimited `M/D/YY` or `M/D/YYYY` value pattern.
pub static SLASH_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,2}/\d{1,2}/\d{2,4}$").unwrap());

/// Whether a cell's text looks like a date value.
pub fn looks_like_date(s: &str) -> bool {
    ISO_DATE.is_match(s) || SLASH_DATE.is_match(s)
}

/// Formats tried, in order, when normalizing or sorting date cells.
///
/// `%m/%d/%y` must come before `%m/%d/%Y`: chrono's `%Y` accepts two-digit
/// years verbatim (`1/5/23` would become year 23), while `%y` rejects
/// four-digit years, so this order handles both.
const DATE_FORMATS: [&str; 6] = [
    "%Y-%m-%d",
    "%m/%d/%y",
    "%m/%d/%Y",
    "%Y/%m/%d",
    "%B %d, %Y",
    "%d %B %Y",
];

/// Parse a date cell against the known format list.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let trimmed = s.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
}

/// Normalize a date cell to `YYYY-MM-DD`, or `None` if it does not parse.
pub fn normalize_date(s: &str) -> Option<String> {
    parse_date(s).map(|d| d.format("%Y-%m-%d").to_string())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_decorations() {
        assert_eq!(strip_decorations("$1,234.56"), "1234.56");
        assert_eq!(strip_decorations("  42%  "), "42");
        assert_eq!(strip_decorations("plain"), "plain");
    }

    #[test]
    fn test_parse_decorated_number() {
        assert_eq!(parse_decorated_number("42"), Some(42.0));
        assert_eq!(parse_decorated_number("$1,234.56"), Some(1234.56));
        assert_eq!(parse_decorated_number("-100"), Some(-100.0));
        assert_eq!(parse_decorated_number("12%"), Some(12.0));
        assert_eq!(parse_decorated_number(""), None);
        assert_eq!(parse_decorated_number("hello"), None);
        assert_eq!(parse_decorated_number("12abc"), None);
    }

    #[test]
    fn test_is_plain_decimal() {
        assert!(is_plain_decimal("42"));
        assert!(is_plain_decimal("42.5"));
        assert!(is_plain_decimal("$499.90"));
        assert!(is_plain_decimal("15%"));
        assert!(!is_plain_decimal("-3"));
        assert!(!is_plain_decimal("1e3"));
        assert!(!is_plain_decimal("abc"));
    }

    #[test]
    fn test_looks_like_date() {
        assert!(looks_like_date("2023-01-05"));
        assert!(looks_like_date("1/5/23"));
        assert!(looks_like_date("12/31/2023"));
        assert!(!looks_like_date("2023-1-5"));
        assert!(!looks_like_date("January"));
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2023, 1, 5).unwrap();
        assert_eq!(parse_date("2023-01-05"), Some(expected));
        assert_eq!(parse_date("01/05/2023"), Some(expected));
        assert_eq!(parse_date("1/5/23"), Some(expected));
        assert_eq!(parse_date("January 5, 2023"), Some(expected));
        assert_eq!(parse_date("not a date"), None);
    }

    #[test]
    fn test_two_digit_years_land_in_the_current_century() {
        // %Y would happily parse "23" as year 23; the %y-first order keeps
        // short years modern without breaking four-digit input.
        assert_eq!(
            parse_date("1/5/23"),
            NaiveDate::from_ymd_opt(2023, 1, 5)
        );
        assert_eq!(
            parse_date("12/31/99"),
            NaiveDate::from_ymd_opt(1999, 12, 31)
        );
        assert_eq!(normalize_date("1/5/23").as_deref(), Some("2023-01-05"));
        assert_eq!(normalize_date("01/05/2023").as_deref(), Some("2023-01-05"));
    }

    #[test]
    fn test_normalize_date() {
        assert_eq!(normalize_date("01/05/2023").as_deref(), Some("2023-01-05"));
        assert_eq!(normalize_date("2023-01-05").as_deref(), Some("2023-01-05"));
        assert_eq!(normalize_date("garbage"), None);
    }
}
