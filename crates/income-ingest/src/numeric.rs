//! Cell normalization: missing markers and numeric parsing.
//!
//! Handles the formats found in published statistics tables:
//! - Plain numbers: "123", "-45.67"
//! - Thousands separators between digits: "1,234,567", "1,234.5"
//! - Surrounding whitespace: "  123  "
//! - Scientific notation: "1.23e5"

use std::borrow::Cow;

/// Cell texts treated as an absent value (after trimming).
pub const MISSING_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// A parsed numeric cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Int(v) => v as f64,
            Self::Float(v) => v,
        }
    }
}

/// Returns true if the cell text stands for an absent value.
pub fn is_missing(value: &str) -> bool {
    MISSING_MARKERS.contains(&value.trim())
}

/// Removes `,` grouping separators from a numeric-looking token.
///
/// A separator is only accepted between two ASCII digits in the integer
/// part. Returns `None` when a `,` appears anywhere else, since the token is
/// then not a grouped number.
pub fn strip_grouping(token: &str) -> Option<Cow<'_, str>> {
    if !token.contains(',') {
        return Some(Cow::Borrowed(token));
    }
    if !token.is_ascii() {
        return None;
    }
    let bytes = token.as_bytes();
    let mut cleaned = String::with_capacity(token.len());
    let mut in_integer_part = true;
    for (index, &byte) in bytes.iter().enumerate() {
        match byte {
            b',' => {
                let prev_digit = index > 0 && bytes[index - 1].is_ascii_digit();
                let next_digit = bytes.get(index + 1).is_some_and(u8::is_ascii_digit);
                if !(in_integer_part && prev_digit && next_digit) {
                    return None;
                }
            }
            b'.' | b'e' | b'E' => {
                in_integer_part = false;
                cleaned.push(byte as char);
            }
            _ => cleaned.push(byte as char),
        }
    }
    Some(Cow::Owned(cleaned))
}

/// Parses a cell as a number after trimming and separator stripping.
///
/// Integers that fit in `i64` stay integral; everything else numeric becomes
/// `f64`. Missing markers and non-numeric text return `None`.
pub fn parse_number(value: &str) -> Option<Number> {
    let trimmed = value.trim();
    if is_missing(trimmed) {
        return None;
    }
    let cleaned = strip_grouping(trimmed)?;
    if let Ok(int) = cleaned.parse::<i64>() {
        return Some(Number::Int(int));
    }
    if !looks_numeric(&cleaned) {
        return None;
    }
    cleaned.parse::<f64>().ok().map(Number::Float)
}

/// Check if a string represents a valid numeric value.
pub fn is_numeric(value: &str) -> bool {
    parse_number(value).is_some()
}

// `f64::from_str` also accepts words such as "infinity"; only the short
// "inf" spellings are kept.
fn looks_numeric(value: &str) -> bool {
    let unsigned = value.trim_start_matches(['+', '-']);
    if unsigned.eq_ignore_ascii_case("inf") {
        return true;
    }
    unsigned.starts_with(|c: char| c.is_ascii_digit() || c == '.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_integer() {
        assert_eq!(parse_number("123"), Some(Number::Int(123)));
        assert_eq!(parse_number("-456"), Some(Number::Int(-456)));
    }

    #[test]
    fn test_decimal() {
        assert_eq!(parse_number("123.45"), Some(Number::Float(123.45)));
        assert_eq!(parse_number("-0.5"), Some(Number::Float(-0.5)));
    }

    #[test]
    fn test_thousands_separator() {
        assert_eq!(parse_number("1,234,567"), Some(Number::Int(1_234_567)));
        assert_eq!(parse_number("1,234.56"), Some(Number::Float(1234.56)));
    }

    #[test]
    fn test_misplaced_separator() {
        assert_eq!(parse_number(",123"), None);
        assert_eq!(parse_number("123,"), None);
        assert_eq!(parse_number("1,,234"), None);
        assert_eq!(parse_number("1.234,5"), None);
        assert_eq!(parse_number("a,b"), None);
    }

    #[test]
    fn test_whitespace() {
        assert_eq!(parse_number("  123  "), Some(Number::Int(123)));
        assert_eq!(parse_number("  -45.67  "), Some(Number::Float(-45.67)));
    }

    #[test]
    fn test_scientific_notation() {
        assert_eq!(parse_number("1.23e5"), Some(Number::Float(123000.0)));
        assert_eq!(parse_number("1.5E-3"), Some(Number::Float(0.0015)));
    }

    #[test]
    fn test_missing_markers() {
        assert!(is_missing(""));
        assert!(is_missing("  "));
        assert!(is_missing("NA"));
        assert!(is_missing("nan"));
        assert!(!is_missing("0"));
        assert_eq!(parse_number("N/A"), None);
    }

    #[test]
    fn test_invalid() {
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number("12.34.56"), None);
        assert_eq!(parse_number("infinity"), None);
        assert_eq!(parse_number("서울"), None);
        assert!(!is_numeric("1 234"));
    }

    #[test]
    fn test_inf() {
        assert_eq!(parse_number("inf"), Some(Number::Float(f64::INFINITY)));
        assert_eq!(parse_number("-inf"), Some(Number::Float(f64::NEG_INFINITY)));
    }
}
