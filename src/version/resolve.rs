//! Version resolution against registry metadata
//!
//! Only exact versions, a bare major token, and "latest" are understood.
//! Ranges such as `^1.2.0` are not evaluated here.

use std::cmp::Ordering;

use crate::version::types::{LATEST, RegistryMetadata};

/// Parse the leading integer of a string, ignoring anything after it.
///
/// Leading whitespace and a single sign are accepted, so `"9"`, `"9.9.9"`
/// and `" 9rc"` all yield `9`. Returns `None` when no digit follows.
pub fn parse_leading_integer(value: &str) -> Option<i64> {
    let trimmed = value.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }

    let magnitude: i64 = rest[..digits_end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Compare two versions component by component as integers.
///
/// Versions are split on `.`; a missing trailing component counts as `0`,
/// and so does a component that is not entirely an integer (`"3-beta"`).
pub fn compare_numeric(a: &str, b: &str) -> Ordering {
    let a_parts: Vec<i64> = numeric_components(a);
    let b_parts: Vec<i64> = numeric_components(b);
    let len = a_parts.len().max(b_parts.len());

    (0..len)
        .map(|i| {
            let left = a_parts.get(i).copied().unwrap_or(0);
            let right = b_parts.get(i).copied().unwrap_or(0);
            left.cmp(&right)
        })
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

fn numeric_components(version: &str) -> Vec<i64> {
    version
        .split('.')
        .map(|part| part.trim().parse::<i64>().unwrap_or(0))
        .collect()
}

/// All known versions of a package, newest first by [`compare_numeric`]
pub fn versions_descending(metadata: &RegistryMetadata) -> Vec<&str> {
    let mut versions: Vec<&str> = metadata.version_names().collect();
    // Tie-break on the raw string so equal-comparing versions keep a stable order.
    versions.sort_by(|a, b| compare_numeric(b, a).then_with(|| b.cmp(a)));
    versions
}

/// Resolve a requested version to the concrete version to check.
///
/// - `None`, an empty string, or `"latest"` resolves to the latest dist-tag.
/// - A version present verbatim in the metadata is used unchanged.
/// - Otherwise a leading integer is treated as a major token and resolves to
///   the greatest known `<major>.*` version, or `<major>.0.0` when none exists.
///   `"9.9.9"` therefore resolves like `"9"` when it is not a known version.
/// - Anything else is returned unchanged.
///
/// The result is not guaranteed to exist in the metadata.
pub fn resolve_version(requested: Option<&str>, metadata: &RegistryMetadata) -> String {
    let requested = match requested {
        Some(requested) if !requested.trim().is_empty() && requested != LATEST => requested,
        _ => return metadata.latest_tag.clone(),
    };

    if metadata.has_version(requested) {
        return requested.to_string();
    }

    let Some(major) = parse_leading_integer(requested) else {
        return requested.to_string();
    };

    let prefix = format!("{}.", major);
    metadata
        .version_names()
        .filter(|version| version.starts_with(&prefix))
        .max_by(|a, b| compare_numeric(a, b).then_with(|| a.cmp(b)))
        .map(str::to_string)
        .unwrap_or_else(|| format!("{}.0.0", major))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn metadata(latest: &str, versions: &[&str]) -> RegistryMetadata {
        versions.iter().fold(RegistryMetadata::new(latest), |meta, v| {
            meta.with_version(v, "2024-01-01T00:00:00.000Z")
        })
    }

    #[rstest]
    #[case("9", Some(9))]
    #[case("9.9.9", Some(9))]
    #[case("12abc", Some(12))]
    #[case("  3", Some(3))]
    #[case("-1", Some(-1))]
    #[case("+4.0", Some(4))]
    #[case("latest", None)]
    #[case("v1", None)]
    #[case("", None)]
    #[case("-", None)]
    fn parse_leading_integer_returns_expected(#[case] input: &str, #[case] expected: Option<i64>) {
        assert_eq!(parse_leading_integer(input), expected);
    }

    #[rstest]
    #[case("1.2.0", "1.10.0", Ordering::Less)]
    #[case("2.0.0", "1.99.99", Ordering::Greater)]
    #[case("1.0", "1.0.0", Ordering::Equal)]
    #[case("1.0.1", "1.0", Ordering::Greater)]
    #[case("1.0.0", "1.0.0", Ordering::Equal)]
    #[case("1.2.3-beta", "1.2.2", Ordering::Less)]
    #[case("1.2.3-beta", "1.2.0", Ordering::Equal)]
    fn compare_numeric_returns_expected(
        #[case] a: &str,
        #[case] b: &str,
        #[case] expected: Ordering,
    ) {
        assert_eq!(compare_numeric(a, b), expected);
    }

    #[test]
    fn versions_descending_orders_numerically() {
        let meta = metadata("1.10.0", &["1.2.0", "1.10.0", "0.9.0", "1.9.1"]);

        assert_eq!(
            versions_descending(&meta),
            vec!["1.10.0", "1.9.1", "1.2.0", "0.9.0"]
        );
    }

    #[rstest]
    #[case(None, "2.0.0")]
    #[case(Some(""), "2.0.0")]
    #[case(Some("  "), "2.0.0")]
    #[case(Some("latest"), "2.0.0")]
    #[case(Some("1.0.0"), "1.0.0")]
    #[case(Some("1"), "1.2.0")]
    #[case(Some("2"), "2.0.0")]
    #[case(Some("5"), "5.0.0")]
    #[case(Some("next"), "next")]
    fn resolve_version_returns_expected(#[case] requested: Option<&str>, #[case] expected: &str) {
        let meta = metadata("2.0.0", &["1.0.0", "1.2.0", "2.0.0"]);

        assert_eq!(resolve_version(requested, &meta), expected);
    }

    #[test]
    fn resolve_version_treats_absent_full_version_as_major_token() {
        let meta = metadata("9.1.0", &["8.0.0", "9.0.0", "9.1.0"]);

        assert_eq!(resolve_version(Some("9.9.9"), &meta), "9.1.0");
    }

    #[test]
    fn resolve_version_ranks_prerelease_component_below_numeric_patch() {
        let meta = metadata("1.2.2", &["1.2.2", "1.2.3-beta"]);

        assert_eq!(resolve_version(Some("1"), &meta), "1.2.2");
    }

    #[test]
    fn resolve_version_does_not_match_longer_majors() {
        let meta = metadata("10.0.0", &["1.0.0", "10.0.0", "11.2.0"]);

        assert_eq!(resolve_version(Some("1"), &meta), "1.0.0");
    }
}
