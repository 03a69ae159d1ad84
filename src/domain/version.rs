use crate::error::{Result, VersionError};
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

fn core_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(\d+)\.(\d+)\.(\d+)$").expect("valid regex"))
}

/// Numeric `major.minor.patch` triple without pre-release or build metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SemVerCore {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl SemVerCore {
    /// Rendered as `0.0.0` when the main branch carries no tag
    pub const UNKNOWN: SemVerCore = SemVerCore {
        major: 0,
        minor: 0,
        patch: 0,
    };

    /// Create a new version core
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        SemVerCore {
            major,
            minor,
            patch,
        }
    }

    /// Parse a strict `x.y.z` string. No prefix, no whitespace, no suffix.
    /// Components are read as `u64`; a component outside that range is a
    /// format error.
    pub fn parse(text: &str) -> Result<Self> {
        let caps = core_pattern()
            .captures(text)
            .ok_or_else(|| VersionError::wrong_tag_format(text))?;

        let component = |idx: usize| -> Result<u64> {
            caps[idx]
                .parse::<u64>()
                .map_err(|_| VersionError::wrong_tag_format(text))
        };

        Ok(SemVerCore {
            major: component(1)?,
            minor: component(2)?,
            patch: component(3)?,
        })
    }

    /// True when `text` is a strict `x.y.z` string
    pub fn is_valid(text: &str) -> bool {
        core_pattern().is_match(text)
    }

    /// `a.b.c` -> `a.b.(c+1)`
    pub fn bump_patch(&self) -> Result<Self> {
        let patch = self
            .patch
            .checked_add(1)
            .ok_or_else(|| self.cannot_bump("patch"))?;
        Ok(SemVerCore { patch, ..*self })
    }

    /// `a.b.c` -> `a.(b+1).0`
    pub fn bump_minor(&self) -> Result<Self> {
        let minor = self
            .minor
            .checked_add(1)
            .ok_or_else(|| self.cannot_bump("minor"))?;
        Ok(SemVerCore {
            minor,
            patch: 0,
            ..*self
        })
    }

    fn cannot_bump(&self, component: &str) -> VersionError {
        VersionError::format(format!(
            "Cannot increment the {} component of {}: it is already at its maximum",
            component, self
        ))
    }
}

impl fmt::Display for SemVerCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let v = SemVerCore::parse("1.2.3").unwrap();
        assert_eq!(v.major, 1);
        assert_eq!(v.minor, 2);
        assert_eq!(v.patch, 3);
    }

    #[test]
    fn test_parse_rejects_prefix() {
        assert!(SemVerCore::parse("v1.2.3").is_err());
        assert!(SemVerCore::parse("V1.2.3").is_err());
    }

    #[test]
    fn test_parse_rejects_wrong_shape() {
        assert!(SemVerCore::parse("1.2").is_err());
        assert!(SemVerCore::parse("1.2.3.4").is_err());
        assert!(SemVerCore::parse("1.2.3-beta").is_err());
        assert!(SemVerCore::parse(" 1.2.3").is_err());
        assert!(SemVerCore::parse("").is_err());
    }

    #[test]
    fn test_parse_rejects_overflow() {
        let err = SemVerCore::parse("1.2.99999999999999999999999").unwrap_err();
        assert!(matches!(err, VersionError::Format(_)));

        let err = SemVerCore::parse("1.99999999999999999999.0").unwrap_err();
        assert!(err.to_string().contains("1.99999999999999999999.0"));
    }

    #[test]
    fn test_parse_accepts_u64_max() {
        let v = SemVerCore::parse("1.2.18446744073709551615").unwrap();
        assert_eq!(v.patch, u64::MAX);
    }

    #[test]
    fn test_leading_zeros_are_numeric() {
        assert_eq!(SemVerCore::parse("01.002.3").unwrap(), SemVerCore::new(1, 2, 3));
    }

    #[test]
    fn test_bump_patch() {
        assert_eq!(
            SemVerCore::new(1, 2, 3).bump_patch().unwrap(),
            SemVerCore::new(1, 2, 4)
        );
    }

    #[test]
    fn test_bump_minor() {
        assert_eq!(
            SemVerCore::new(2, 1, 7).bump_minor().unwrap(),
            SemVerCore::new(2, 2, 0)
        );
    }

    #[test]
    fn test_bump_at_maximum_is_error() {
        let err = SemVerCore::new(1, 2, u64::MAX).bump_patch().unwrap_err();
        assert!(matches!(err, VersionError::Format(_)));
        assert!(err.to_string().contains("patch"));

        let err = SemVerCore::new(1, u64::MAX, 0).bump_minor().unwrap_err();
        assert!(err.to_string().contains("minor"));

        // patch resets, so only the minor component can overflow
        assert_eq!(
            SemVerCore::new(1, 2, u64::MAX).bump_minor().unwrap(),
            SemVerCore::new(1, 3, 0)
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(SemVerCore::new(1, 2, 3).to_string(), "1.2.3");
        assert_eq!(SemVerCore::UNKNOWN.to_string(), "0.0.0");
    }

    #[test]
    fn test_is_valid() {
        assert!(SemVerCore::is_valid("10.20.30"));
        assert!(!SemVerCore::is_valid("10.20"));
    }
}
