//! Input validation utilities

use std::sync::LazyLock;

use regex::Regex;

use crate::constants::{messages, ranking};

static NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9 ]+$").expect("name pattern is a valid regex")
});

/// Validate a contestant name: 1 to 64 ASCII letters, digits or spaces
pub fn validate_name(name: &str) -> Result<(), &'static str> {
    if name.is_empty() || name.len() > ranking::MAX_NAME_LENGTH || !NAME_PATTERN.is_match(name) {
        return Err(messages::INVALID_NAME);
    }
    Ok(())
}

/// Validate a grade-and-class code and return it normalized (`"2b"` -> `"2B"`)
pub fn normalize_grade_and_class(code: &str) -> Result<String, &'static str> {
    let mut chars = code.chars();
    let (Some(grade), Some(class), None) = (chars.next(), chars.next(), chars.next()) else {
        return Err(messages::INVALID_GRADE_AND_CLASS);
    };

    let class = class.to_ascii_uppercase();
    if !ranking::GRADES.contains(&grade) || !ranking::CLASSES.contains(&class) {
        return Err(messages::INVALID_GRADE_AND_CLASS);
    }

    Ok(format!("{grade}{class}"))
}

/// Validate a submitted score and convert it to an integer
///
/// JSON numbers arrive as `f64`; `50.0` is accepted as `50`.
pub fn validate_score(score: f64) -> Result<i64, &'static str> {
    if !score.is_finite() || score < 0.0 || score.fract() != 0.0 || score > ranking::MAX_SCORE as f64
    {
        return Err(messages::INVALID_SCORE);
    }
    Ok(score as i64)
}

/// Parse a score filter received as text (query string)
pub fn parse_score_filter(raw: &str) -> Result<i64, &'static str> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| messages::INVALID_SCORE)
        .and_then(validate_score)
}

/// Validate a 1-based position
pub fn validate_position(position: i64) -> Result<i64, &'static str> {
    if position < 1 {
        return Err(messages::INVALID_POSITION);
    }
    Ok(position)
}

/// Parse a position received as text (path segment)
pub fn parse_position(raw: &str) -> Result<i64, &'static str> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| messages::INVALID_POSITION)
        .and_then(validate_position)
}

/// Validate an explicit range bound
pub fn validate_range_bound(bound: i64) -> Result<i64, &'static str> {
    if bound < 1 {
        return Err(messages::INVALID_RANGE);
    }
    Ok(bound)
}

/// Parse an explicit range bound received as text (query string)
pub fn parse_range_bound(raw: &str) -> Result<i64, &'static str> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| messages::INVALID_RANGE)
        .and_then(validate_range_bound)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Alice").is_ok());
        assert!(validate_name("Team 42").is_ok());
        assert!(validate_name(&"a".repeat(64)).is_ok());
        assert_eq!(validate_name(""), Err("Invalid name"));
        assert_eq!(validate_name(&"a".repeat(65)), Err("Invalid name"));
        assert_eq!(validate_name("Al_ice"), Err("Invalid name"));
        assert_eq!(validate_name("Zoë"), Err("Invalid name"));
    }

    #[test]
    fn test_normalize_grade_and_class() {
        assert_eq!(normalize_grade_and_class("1A").unwrap(), "1A");
        assert_eq!(normalize_grade_and_class("3c").unwrap(), "3C");
        assert_eq!(normalize_grade_and_class("9Z"), Err("Invalid grade and class"));
        assert_eq!(normalize_grade_and_class("4A"), Err("Invalid grade and class"));
        assert_eq!(normalize_grade_and_class("1D"), Err("Invalid grade and class"));
        assert_eq!(normalize_grade_and_class("1"), Err("Invalid grade and class"));
        assert_eq!(normalize_grade_and_class("1AB"), Err("Invalid grade and class"));
        assert_eq!(normalize_grade_and_class(""), Err("Invalid grade and class"));
    }

    #[test]
    fn test_validate_score() {
        assert_eq!(validate_score(0.0), Ok(0));
        assert_eq!(validate_score(50.0), Ok(50));
        assert_eq!(validate_score(-1.0), Err("Invalid score"));
        assert_eq!(validate_score(12.5), Err("Invalid score"));
        assert_eq!(validate_score(f64::NAN), Err("Invalid score"));
        assert_eq!(validate_score(f64::INFINITY), Err("Invalid score"));
        assert_eq!(validate_score(1e300), Err("Invalid score"));
    }

    #[test]
    fn test_parse_position() {
        assert_eq!(parse_position("3"), Ok(3));
        assert_eq!(parse_position("0"), Err("Invalid position"));
        assert_eq!(parse_position("-2"), Err("Invalid position"));
        assert_eq!(parse_position("first"), Err("Invalid position"));
    }

    #[test]
    fn test_validate_range_bound() {
        assert_eq!(validate_range_bound(1), Ok(1));
        assert_eq!(validate_range_bound(0), Err("Invalid range"));
    }

    #[test]
    fn test_parse_range_bound() {
        assert_eq!(parse_range_bound("2"), Ok(2));
        assert_eq!(parse_range_bound("0"), Err("Invalid range"));
        assert_eq!(parse_range_bound("abc"), Err("Invalid range"));
        assert_eq!(parse_range_bound("1.5"), Err("Invalid range"));
        assert_eq!(parse_range_bound(""), Err("Invalid range"));
    }

    #[test]
    fn test_parse_score_filter() {
        assert_eq!(parse_score_filter("80"), Ok(80));
        assert_eq!(parse_score_filter("80.0"), Ok(80));
        assert_eq!(parse_score_filter("1.5"), Err("Invalid score"));
        assert_eq!(parse_score_filter("-1"), Err("Invalid score"));
        assert_eq!(parse_score_filter("lots"), Err("Invalid score"));
        assert_eq!(parse_score_filter("NaN"), Err("Invalid score"));
    }
}
