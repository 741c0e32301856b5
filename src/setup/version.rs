//! Go toolchain version handling
//!
//! Versions are compared the way the harness always has: the three
//! components are concatenated into one integer (`1.5.1` becomes `151`) and
//! the integers are compared.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::common::{Error, Result};

// Handles the current Go release naming; may need updating if the naming changes.
static BETA: LazyLock<Regex> = LazyLock::new(|| Regex::new("beta[0-9]").unwrap());
static RC: LazyLock<Regex> = LazyLock::new(|| Regex::new("rc[0-9]").unwrap());

/// Strip the `go` prefix and any pre-release suffix (`beta1`, `rc2`, ...)
pub fn normalize(raw: &str) -> String {
    let trimmed = raw.trim();
    let mut version = trimmed.strip_prefix("go").unwrap_or(trimmed);

    for suffix in [&*BETA, &*RC] {
        if let Some(m) = suffix.find(version) {
            version = &version[..m.start()];
        }
    }

    version.to_string()
}

/// Extract the `go1.x.y` token from `go version` output
///
/// `go version go1.21.3 linux/amd64` yields `go1.21.3`.
pub fn extract_go_version(output: &str) -> Option<&str> {
    output.split_whitespace().find(|token| {
        token
            .strip_prefix("go")
            .and_then(|rest| rest.chars().next())
            .is_some_and(|c| c.is_ascii_digit())
    })
}

/// A `major.minor.patch` version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    major: String,
    minor: String,
    patch: String,
    number: u64,
}

impl Version {
    /// Parse a normalized version; a missing patch component becomes `0`
    pub fn parse(v: &str) -> Result<Self> {
        let parts: Vec<&str> = v.split('.').collect();
        let (major, minor, patch) = match parts.as_slice() {
            [major, minor] => (*major, *minor, "0"),
            [major, minor, patch] => (*major, *minor, *patch),
            _ => return Err(Error::VersionParse(v.to_string())),
        };

        let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
        if !(all_digits(major) && all_digits(minor) && all_digits(patch)) {
            return Err(Error::VersionParse(v.to_string()));
        }

        let number = format!("{}{}{}", major, minor, patch)
            .parse::<u64>()
            .map_err(|_| Error::VersionParse(v.to_string()))?;

        Ok(Self {
            major: major.to_string(),
            minor: minor.to_string(),
            patch: patch.to_string(),
            number,
        })
    }

    pub fn major(&self) -> &str {
        &self.major
    }

    pub fn minor(&self) -> &str {
        &self.minor
    }

    pub fn patch(&self) -> &str {
        &self.patch
    }

    /// The concatenated components as an integer
    pub fn as_number(&self) -> u64 {
        self.number
    }

    pub fn less_than(&self, other: &Version) -> bool {
        self.as_number() < other.as_number()
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
