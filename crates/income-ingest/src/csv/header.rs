//! Header normalization.

use std::collections::HashSet;

/// Normalizes a header value by trimming whitespace.
pub fn normalize_header(value: &str) -> String {
    value.trim().to_string()
}

/// Turns raw header cells into unique, trimmed column names.
///
/// - Surrounding whitespace is removed ("` 평균소득`" becomes "`평균소득`").
/// - An empty cell is named `Unnamed: <index>`.
/// - A repeated name gets `.1`, `.2`, ... in order of appearance, skipping
///   suffixes that are already taken.
pub fn normalize_headers<'a, I>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let trimmed: Vec<String> = raw
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            let name = normalize_header(value);
            if name.is_empty() {
                format!("Unnamed: {index}")
            } else {
                name
            }
        })
        .collect();

    let mut taken: HashSet<String> = HashSet::with_capacity(trimmed.len());
    let mut names = Vec::with_capacity(trimmed.len());
    for name in trimmed {
        let mut candidate = name.clone();
        let mut suffix = 1usize;
        while taken.contains(&candidate) {
            candidate = format!("{name}.{suffix}");
            suffix += 1;
        }
        taken.insert(candidate.clone());
        names.push(candidate);
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("  hello  "), "hello");
        assert_eq!(normalize_header("hello"), "hello");
        assert_eq!(normalize_header(" 평균소득"), "평균소득");
    }

    #[test]
    fn test_normalize_headers_trimmed() {
        let names = normalize_headers(["성별", " 평균소득 ", "\t지역"]);
        assert_eq!(names, vec!["성별", "평균소득", "지역"]);
    }

    #[test]
    fn test_normalize_headers_unnamed() {
        let names = normalize_headers(["", "A", "  "]);
        assert_eq!(names, vec!["Unnamed: 0", "A", "Unnamed: 2"]);
    }

    #[test]
    fn test_normalize_headers_duplicates() {
        let names = normalize_headers(["A", " A", "A ", "B"]);
        assert_eq!(names, vec!["A", "A.1", "A.2", "B"]);
    }

    #[test]
    fn test_normalize_headers_suffix_collision() {
        let names = normalize_headers(["A", "A.1", "A"]);
        assert_eq!(names, vec!["A", "A.1", "A.2"]);
    }
}
