//! Delimiter/format sniffing for raw text input.

/// The primary delimiter candidate.
pub const DEFAULT_DELIMITER: char = ',';

/// Fraction of lines whose delimiter count must match the header line.
///
/// The one-off tolerance plus this threshold deliberately accepts CSV with
/// minor ragged rows (optional trailing fields, quoted embedded delimiters);
/// exact matching would reject legitimate input.
pub const DEFAULT_MATCH_RATIO: f64 = 0.8;

/// Decide whether `text` already looks like delimited tabular data.
pub fn is_delimited(text: &str) -> bool {
    is_delimited_with(text, DEFAULT_DELIMITER, DEFAULT_MATCH_RATIO)
}

/// [`is_delimited`] with an explicit delimiter and match ratio.
pub fn is_delimited_with(text: &str, delimiter: char, match_ratio: f64) -> bool {
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    if lines.len() < 2 {
        // Need a header plus at least one data row.
        return false;
    }

    let first_count = count_delimiters(lines[0], delimiter);
    if first_count == 0 {
        return false;
    }

    let matching = lines
        .iter()
        .filter(|line| {
            let count = count_delimiters(line, delimiter);
            count.abs_diff(first_count) <= 1
        })
        .count();

    (matching as f64 / lines.len() as f64) >= match_ratio
}

fn count_delimiters(line: &str, delimiter: char) -> usize {
    line.chars().filter(|&c| c == delimiter).count()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_csv_is_delimited() {
        assert!(is_delimited("Name,Age\nAlice,30\nBob,28"));
    }

    #[test]
    fn test_single_line_is_not_delimited() {
        assert!(!is_delimited("Name,Age"));
    }

    #[test]
    fn test_no_commas_is_not_delimited() {
        assert!(!is_delimited("first line\nsecond line\nthird line"));
    }

    #[test]
    fn test_blank_lines_are_ignored() {
        assert!(is_delimited("Name,Age\n\nAlice,30\n\nBob,28\n"));
    }

    #[test]
    fn test_one_off_count_tolerated() {
        // Second row has an optional trailing field.
        assert!(is_delimited("Name,Age\nAlice,30,extra\nBob,28"));
    }

    #[test]
    fn test_eighty_percent_boundary_inclusive() {
        // 8 of 10 lines match the header's comma count; 2 differ by more
        // than one. Exactly 80% must still pass.
        let mut lines = vec!["a,b,c".to_string()];
        for _ in 0..7 {
            lines.push("1,2,3".to_string());
        }
        lines.push("no commas here at all x y z w,1,2,3,4,5".to_string());
        lines.push("1,2,3,4,5,6".to_string());
        let text = lines.join("\n");
        assert_eq!(text.lines().count(), 10);
        assert!(is_delimited(&text));
    }

    #[test]
    fn test_below_threshold_rejected() {
        // Only 2 of 4 lines match; the others differ by more than one comma.
        let text = "a,b\n1,2\nx,y,z,w,v\np,q,r,s,t";
        assert!(!is_delimited(text));
    }

    #[test]
    fn test_custom_delimiter() {
        assert!(is_delimited_with("a|b\n1|2", '|', 0.8));
        assert!(!is_delimited_with("a|b\n1|2", ',', 0.8));
    }
}
