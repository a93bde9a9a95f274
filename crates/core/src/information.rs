//! Build information and release type classification
//!
//! Pure functions for parsing semantic versions and deciding which kind of
//! build produced them. Only the build metadata segment (`+...`) influences
//! the classification: builds stamped with a git commit hash are snapshots,
//! builds without metadata are production releases.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Length of an abbreviated git commit hash
const SHORT_COMMIT_HASH_LENGTH: usize = 7;

/// Length of a full git commit hash
const LONG_COMMIT_HASH_LENGTH: usize = 40;

/// Release category of a build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseType {
    Production,
    Snapshot,
    Unknown,
    /// Reserved for local builds; never returned by [`get_release_type`].
    Development,
}

impl ReleaseType {
    /// Every release type, in declaration order
    pub const ALL: [ReleaseType; 4] = [
        ReleaseType::Production,
        ReleaseType::Snapshot,
        ReleaseType::Unknown,
        ReleaseType::Development,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReleaseType::Production => "production",
            ReleaseType::Snapshot => "snapshot",
            ReleaseType::Unknown => "unknown",
            ReleaseType::Development => "development",
        }
    }
}

impl fmt::Display for ReleaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReleaseType {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReleaseType::ALL
            .into_iter()
            .find(|release_type| release_type.as_str() == s)
            .ok_or_else(|| VersionError::UnknownReleaseType(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    #[error("Version string is empty")]
    Empty,

    #[error("Not a valid semantic version: {0}")]
    Malformed(String),

    #[error("Unknown release type: {0}")]
    UnknownReleaseType(String),
}

/// A parsed `MAJOR.MINOR.PATCH[-prerelease][+build]` version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemanticVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub prerelease: Option<String>,
    pub build: Option<String>,
}

impl SemanticVersion {
    pub fn prerelease(&self) -> Option<&str> {
        self.prerelease.as_deref()
    }

    pub fn build(&self) -> Option<&str> {
        self.build.as_deref()
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(prerelease) = &self.prerelease {
            write!(f, "-{prerelease}")?;
        }
        if let Some(build) = &self.build {
            write!(f, "+{build}")?;
        }
        Ok(())
    }
}

impl FromStr for SemanticVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_version(s)
    }
}

fn semver_regex() -> &'static Regex {
    static RE_SEMVER: OnceLock<Regex> = OnceLock::new();
    RE_SEMVER.get_or_init(|| {
        Regex::new(
            r"^(0|[1-9]\d*)\.(0|[1-9]\d*)\.(0|[1-9]\d*)(?:-((?:0|[1-9]\d*|\d*[a-zA-Z-][0-9a-zA-Z-]*)(?:\.(?:0|[1-9]\d*|\d*[a-zA-Z-][0-9a-zA-Z-]*))*))?(?:\+([0-9a-zA-Z-]+(?:\.[0-9a-zA-Z-]+)*))?$",
        )
        .unwrap()
    })
}

/// Parse a semantic version string
///
/// Accepts the full semver 2.0.0 grammar. Surrounding whitespace and a single
/// leading `v` (as found in release tags like "v1.2.3") are ignored.
pub fn parse_version(version: &str) -> Result<SemanticVersion, VersionError> {
    let trimmed = version.trim();
    if trimmed.is_empty() {
        return Err(VersionError::Empty);
    }

    let candidate = trimmed.strip_prefix('v').unwrap_or(trimmed);
    let malformed = || VersionError::Malformed(version.to_string());
    let caps = semver_regex().captures(candidate).ok_or_else(malformed)?;

    let number = |index: usize| -> Result<u64, VersionError> {
        caps.get(index)
            .ok_or_else(malformed)?
            .as_str()
            .parse::<u64>()
            .map_err(|_| malformed())
    };

    Ok(SemanticVersion {
        major: number(1)?,
        minor: number(2)?,
        patch: number(3)?,
        prerelease: caps.get(4).map(|m| m.as_str().to_string()),
        build: caps.get(5).map(|m| m.as_str().to_string()),
    })
}

/// Check whether a string looks like a short (7) or full (40) git commit hash
pub fn is_git_commit_hash(candidate: &str) -> bool {
    matches!(
        candidate.len(),
        SHORT_COMMIT_HASH_LENGTH | LONG_COMMIT_HASH_LENGTH
    ) && candidate.chars().all(|c| c.is_ascii_hexdigit())
}

/// Classify a version string into a release type
///
/// The pre-release tag never matters, only the build metadata does:
///
/// - no build metadata: [`ReleaseType::Production`]
/// - a git commit hash as build metadata: [`ReleaseType::Snapshot`]
/// - any other build metadata: [`ReleaseType::Unknown`]
///
/// Strings that are not valid semantic versions are classified as
/// [`ReleaseType::Unknown`] instead of failing.
pub fn get_release_type(version: &str) -> ReleaseType {
    parse_version(version)
        .map(|parsed| classify_version(&parsed))
        .unwrap_or(ReleaseType::Unknown)
}

/// Classify an already parsed version, see [`get_release_type`]
pub fn classify_version(version: &SemanticVersion) -> ReleaseType {
    match version.build() {
        None => ReleaseType::Production,
        Some(build) if is_git_commit_hash(build) => ReleaseType::Snapshot,
        Some(_) => ReleaseType::Unknown,
    }
}

/// The version declared by this build's package metadata
pub fn get_current_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    // ============================================================================
    // ReleaseType tests
    // ============================================================================

    #[test]
    fn test_release_types_have_distinct_values() {
        let values: HashSet<&str> = ReleaseType::ALL.iter().map(|r| r.as_str()).collect();
        assert_eq!(values.len(), ReleaseType::ALL.len());
    }

    #[test]
    fn test_release_type_display_matches_as_str() {
        for release_type in ReleaseType::ALL {
            assert_eq!(release_type.to_string(), release_type.as_str());
        }
    }

    #[test]
    fn test_release_type_from_str() {
        assert_eq!(
            "snapshot".parse::<ReleaseType>().unwrap(),
            ReleaseType::Snapshot
        );
        assert_eq!(
            "nightly".parse::<ReleaseType>().unwrap_err(),
            VersionError::UnknownReleaseType("nightly".to_string())
        );
    }

    #[test]
    fn test_release_type_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ReleaseType::Production).unwrap(),
            r#""production""#
        );
    }

    // ============================================================================
    // parse_version tests
    // ============================================================================

    #[test]
    fn test_parse_version_full() {
        let version = parse_version("1.0.0-beta.19+6374412").unwrap();
        assert_eq!(version.major, 1);
        assert_eq!(version.minor, 0);
        assert_eq!(version.patch, 0);
        assert_eq!(version.prerelease(), Some("beta.19"));
        assert_eq!(version.build(), Some("6374412"));
    }

    #[test]
    fn test_parse_version_with_v_prefix() {
        let version = parse_version("v2.10.3").unwrap();
        assert_eq!(version.to_string(), "2.10.3");
    }

    #[test]
    fn test_parse_version_display_round_trips() {
        let version = parse_version("1.2.3-rc.1+build.5").unwrap();
        assert_eq!(version.to_string(), "1.2.3-rc.1+build.5");
    }

    #[test]
    fn test_parse_version_empty() {
        assert_eq!(parse_version("   ").unwrap_err(), VersionError::Empty);
    }

    #[test]
    fn test_parse_version_rejects_malformed() {
        for input in ["1.0", "1.0.0.0", "01.0.0", "1.0.0+", "1.0.0-", "foo"] {
            assert_eq!(
                parse_version(input).unwrap_err(),
                VersionError::Malformed(input.to_string()),
                "{input}"
            );
        }
    }

    // ============================================================================
    // get_release_type tests
    // ============================================================================

    #[test]
    fn test_short_commit_hash_is_snapshot() {
        assert_eq!(get_release_type("1.0.0+6374412"), ReleaseType::Snapshot);
        assert_eq!(
            get_release_type("1.0.0-beta.19+6374412"),
            ReleaseType::Snapshot
        );
    }

    #[test]
    fn test_long_commit_hash_is_snapshot() {
        assert_eq!(
            get_release_type("1.0.0+6374412554b034799bfc6e13b4e39c3f5e6386e6"),
            ReleaseType::Snapshot
        );
        assert_eq!(
            get_release_type("1.0.0-beta.19+6374412554b034799bfc6e13b4e39c3f5e6386e6"),
            ReleaseType::Snapshot
        );
    }

    #[test]
    fn test_no_build_number_is_production() {
        assert_eq!(get_release_type("1.0.0"), ReleaseType::Production);
        assert_eq!(get_release_type("1.0.0-beta.19"), ReleaseType::Production);
    }

    #[test]
    fn test_non_hash_build_number_is_unknown() {
        assert_eq!(get_release_type("1.0.0+foo"), ReleaseType::Unknown);
        assert_eq!(get_release_type("1.0.0-beta.19+foo"), ReleaseType::Unknown);
    }

    #[test]
    fn test_hex_build_number_of_other_length_is_unknown() {
        assert_eq!(get_release_type("1.0.0+637441"), ReleaseType::Unknown);
        assert_eq!(get_release_type("1.0.0+63744125"), ReleaseType::Unknown);
    }

    #[test]
    fn test_dotted_build_number_is_unknown() {
        assert_eq!(get_release_type("1.0.0+6374412.1"), ReleaseType::Unknown);
    }

    #[test]
    fn test_malformed_version_is_unknown() {
        assert_eq!(get_release_type(""), ReleaseType::Unknown);
        assert_eq!(get_release_type("not-a-version"), ReleaseType::Unknown);
        assert_eq!(get_release_type("1.0+6374412"), ReleaseType::Unknown);
    }

    #[test]
    fn test_development_is_never_inferred() {
        for version in ["1.0.0", "1.0.0+6374412", "1.0.0+foo", "garbage"] {
            assert_ne!(get_release_type(version), ReleaseType::Development);
        }
    }

    #[test]
    fn test_classify_version_uses_build_metadata_only() {
        let snapshot = parse_version("1.0.0-beta.19+6374412").unwrap();
        assert_eq!(classify_version(&snapshot), ReleaseType::Snapshot);

        let production = parse_version("1.0.0-beta.19").unwrap();
        assert_eq!(classify_version(&production), ReleaseType::Production);
    }

    // ============================================================================
    // is_git_commit_hash tests
    // ============================================================================

    #[test]
    fn test_is_git_commit_hash() {
        assert!(is_git_commit_hash("6374412"));
        assert!(is_git_commit_hash("ABCDEF0"));
        assert!(!is_git_commit_hash("637441g"));
        assert!(!is_git_commit_hash(""));
    }

    // ============================================================================
    // get_current_version tests
    // ============================================================================

    #[test]
    fn test_get_current_version_matches_package() {
        assert_eq!(get_current_version(), env!("CARGO_PKG_VERSION"));
        assert!(parse_version(get_current_version()).is_ok());
    }
}
