use crate::error::{FlowrelError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Versioning scheme used for a repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scheme {
    /// Calendar versioning, `YYYY.MM.DD[-N]`
    #[default]
    CalVer,
    /// Semantic versioning, `MAJOR.MINOR.PATCH[-PRE][+BUILD]`
    SemVer,
}

impl Scheme {
    /// Lowercase name as written in configuration files
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::CalVer => "calver",
            Scheme::SemVer => "semver",
        }
    }
}

impl FromStr for Scheme {
    type Err = FlowrelError;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("calver") {
            Ok(Scheme::CalVer)
        } else if s.eq_ignore_ascii_case("semver") {
            Ok(Scheme::SemVer)
        } else {
            Err(FlowrelError::UnknownScheme(s.to_string()))
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Scheme {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Scheme {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Why a new version is requested
///
/// `Minor` is a release bump; `Patch` and `Hotfix` both request the
/// small-increment behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bump {
    Minor,
    Patch,
    Hotfix,
}

impl FromStr for Bump {
    type Err = FlowrelError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "minor" => Ok(Bump::Minor),
            "patch" => Ok(Bump::Patch),
            "hotfix" => Ok(Bump::Hotfix),
            other => Err(FlowrelError::UnsupportedBump(other.to_string())),
        }
    }
}

impl fmt::Display for Bump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bump::Minor => write!(f, "minor"),
            Bump::Patch => write!(f, "patch"),
            Bump::Hotfix => write!(f, "hotfix"),
        }
    }
}
