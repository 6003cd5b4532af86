//! Cell coercion helpers.

use ipl_model::NO_STATS_SENTINEL;

/// Parses a cell as `f64`, returning `None` for empty, invalid, or
/// non-finite input.
pub fn parse_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parses a season cell. Accepts integral numbers in any numeric spelling
/// (`2016`, `2016.0`); anything else is `None`.
#[allow(clippy::cast_possible_truncation)]
pub fn parse_season(value: &str) -> Option<i32> {
    let parsed = parse_f64(value)?;
    if parsed.fract() != 0.0 || parsed < f64::from(i32::MIN) || parsed > f64::from(i32::MAX) {
        return None;
    }
    Some(parsed as i32)
}

/// Whether the cell holds the "no statistics available" sentinel.
pub fn is_no_stats(value: &str) -> bool {
    value.trim() == NO_STATS_SENTINEL
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_f64() {
        assert_eq!(parse_f64(""), None);
        assert_eq!(parse_f64("  "), None);
        assert_eq!(parse_f64("36.5"), Some(36.5));
        assert_eq!(parse_f64("  973  "), Some(973.0));
        assert_eq!(parse_f64("4/16"), None);
        assert_eq!(parse_f64("inf"), None);
    }

    #[test]
    fn test_parse_season() {
        assert_eq!(parse_season("2016"), Some(2016));
        assert_eq!(parse_season("2016.0"), Some(2016));
        assert_eq!(parse_season("2016.5"), None);
        assert_eq!(parse_season("twenty"), None);
        assert_eq!(parse_season(""), None);
    }

    #[test]
    fn test_is_no_stats() {
        assert!(is_no_stats("No stats"));
        assert!(is_no_stats(" No stats "));
        assert!(!is_no_stats("no stats available"));
    }
}
