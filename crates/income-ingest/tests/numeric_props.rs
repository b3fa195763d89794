//! Property tests for numeric cell normalization.

use income_ingest::{Number, parse_number, strip_grouping};
use proptest::prelude::*;

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[test]
fn group_thousands_helper() {
    assert_eq!(group_thousands(1_234_567), "1,234,567");
    assert_eq!(group_thousands(999), "999");
    assert_eq!(group_thousands(1000), "1,000");
}

proptest! {
    #[test]
    fn grouped_integers_parse_to_the_same_integer(value in 0u64..=i64::MAX as u64) {
        let grouped = group_thousands(value);
        prop_assert_eq!(parse_number(&grouped), Some(Number::Int(value as i64)));
    }

    #[test]
    fn negative_grouped_integers_keep_their_sign(value in 1i64..=1_000_000_000_000) {
        let grouped = format!("-{}", group_thousands(value as u64));
        prop_assert_eq!(parse_number(&grouped), Some(Number::Int(-value)));
    }

    #[test]
    fn separator_stripping_removes_only_commas(value in 0u64..=u64::MAX, frac in 0u32..1000) {
        let token = format!("{}.{frac}", group_thousands(value));
        let stripped = strip_grouping(&token).expect("grouped token");
        prop_assert_eq!(stripped.as_ref(), format!("{value}.{frac}"));
    }

    #[test]
    fn text_with_letters_is_never_numeric(word in "[가-힣a-zA-Z]{1,8}") {
        prop_assume!(!word.eq_ignore_ascii_case("inf"));
        prop_assert_eq!(parse_number(&word), None);
    }
}
