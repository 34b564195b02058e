//! Version parsing and comparison for installed StyLua binaries.
//!
//! Release tags come with or without a leading `v`; the binary reports
//! itself as `stylua X.Y.Z`. Everything is normalized to the bare version
//! string before comparison.

use std::cmp::Ordering;

/// A version string comparable with `version_compare` semantics.
#[derive(Debug, Clone)]
pub struct Version {
    string: String,
}

impl Version {
    pub fn new(string: impl Into<String>) -> Self {
        Version {
            string: string.into(),
        }
    }

    /// Leading numeric components, e.g. `"0.20.1-beta"` -> `[0, 20, 1]`.
    fn numeric_components(&self) -> Vec<u64> {
        self.string
            .split(['.', '-', '+'])
            .map_while(|part| part.parse::<u64>().ok())
            .collect()
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        let version = version_compare::Version::from(self.string.as_str());
        let other_version = version_compare::Version::from(other.string.as_str());
        version == other_version
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        let version = version_compare::Version::from(self.string.as_str());
        let other_version = version_compare::Version::from(other.string.as_str());
        version.partial_cmp(&other_version)
    }
}

/// Strip the conventional `v` tag prefix.
pub fn normalize(tag: &str) -> &str {
    tag.strip_prefix('v').unwrap_or(tag)
}

/// Extract the version from `stylua --version` output (`"stylua 0.20.0"`).
pub fn parse_version_output(output: &str) -> Option<String> {
    let token = output.split_whitespace().last()?;
    let token = normalize(token);
    if token.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        Some(token.to_string())
    } else {
        None
    }
}

/// Caret-range satisfaction: `installed` satisfies `^wanted`.
///
/// Major components must match; while major is 0 the minor must match too;
/// and the installed version must not be older than the wanted one.
pub fn caret_satisfies(installed: &str, wanted: &str) -> bool {
    let installed = Version::new(normalize(installed));
    let wanted = Version::new(normalize(wanted));

    let a = installed.numeric_components();
    let b = wanted.numeric_components();
    let (Some(major_a), Some(major_b)) = (a.first(), b.first()) else {
        return false;
    };
    if major_a != major_b {
        return false;
    }
    if *major_a == 0 && a.get(1) != b.get(1) {
        return false;
    }
    !matches!(installed.partial_cmp(&wanted), Some(Ordering::Less) | None)
}

/// Whether an installed version is current with respect to the desired
/// version token.
///
/// `"latest"` requires an exact match against the latest release tag;
/// anything else is caret-range satisfaction.
pub fn is_up_to_date(installed: &str, desired: &str, latest_tag: Option<&str>) -> bool {
    if desired == "latest" {
        match latest_tag {
            Some(tag) => Version::new(normalize(tag)) == Version::new(normalize(installed)),
            None => false,
        }
    } else {
        caret_satisfies(installed, desired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("v0.20.0"), "0.20.0");
        assert_eq!(normalize("0.20.0"), "0.20.0");
    }

    #[test]
    fn test_parse_version_output() {
        assert_eq!(
            parse_version_output("stylua 0.20.0\n"),
            Some("0.20.0".to_string())
        );
        assert_eq!(
            parse_version_output("stylua v2.3.0"),
            Some("2.3.0".to_string())
        );
        assert_eq!(parse_version_output(""), None);
        assert_eq!(parse_version_output("stylua unknown"), None);
    }

    #[test]
    fn test_version_ordering() {
        assert!(Version::new("0.19.1") < Version::new("0.20.0"));
        assert_eq!(Version::new("1.0"), Version::new("1.0.0"));
    }

    #[test]
    fn test_caret_satisfies_stable() {
        assert!(caret_satisfies("2.3.1", "2.3.0"));
        assert!(caret_satisfies("2.9.0", "2.3.0"));
        assert!(!caret_satisfies("3.0.0", "2.3.0"));
        assert!(!caret_satisfies("2.2.0", "2.3.0"));
    }

    #[test]
    fn test_caret_satisfies_zero_major() {
        // Pre-1.0, the minor is the breaking component.
        assert!(caret_satisfies("0.20.1", "0.20.0"));
        assert!(!caret_satisfies("0.21.0", "0.20.0"));
        assert!(!caret_satisfies("0.19.9", "0.20.0"));
    }

    #[test]
    fn test_caret_satisfies_tag_prefixes() {
        assert!(caret_satisfies("v0.20.0", "0.20.0"));
        assert!(caret_satisfies("0.20.0", "v0.20.0"));
    }

    #[test]
    fn test_up_to_date_latest() {
        assert!(is_up_to_date("0.20.0", "latest", Some("v0.20.0")));
        assert!(!is_up_to_date("0.19.0", "latest", Some("v0.20.0")));
        assert!(!is_up_to_date("0.20.0", "latest", None));
    }

    #[test]
    fn test_up_to_date_pinned() {
        assert!(is_up_to_date("0.20.1", "0.20.0", None));
        assert!(!is_up_to_date("0.19.0", "0.20.0", Some("v0.20.0")));
    }
}
