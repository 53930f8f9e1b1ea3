use super::calver::is_calver;
use super::prerelease;
use super::scheme::{Bump, Scheme};
use super::versioner::{current_from, TagSource, Versioner};
use crate::error::{FlowrelError, Result};
use semver::{Prerelease, Version};

/// Parse a semantic version, accepting the shorthand forms found in real tags
///
/// A leading `v` is ignored, `1` and `1.2` are padded to `1.0.0` and
/// `1.2.0`, and leading zeros in core components are normalised away.
/// Prerelease and build metadata must follow the strict grammar.
pub fn parse_lenient(input: &str) -> Option<Version> {
    let trimmed = input.strip_prefix('v').unwrap_or(input);
    let core_end = trimmed.find(['-', '+']).unwrap_or(trimmed.len());
    let (core, rest) = trimmed.split_at(core_end);

    let parts: Vec<&str> = core.split('.').collect();
    if parts.len() > 3 {
        return None;
    }

    let mut numbers = [0u64; 3];
    for (slot, part) in numbers.iter_mut().zip(&parts) {
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        *slot = part.parse().ok()?;
    }

    Version::parse(&format!(
        "{}.{}.{}{}",
        numbers[0], numbers[1], numbers[2], rest
    ))
    .ok()
}

/// Semantic versioning: releases bump minor, hotfixes bump patch
pub struct SemVer {
    latest_tag: TagSource,
}

impl SemVer {
    pub fn new(latest_tag: TagSource) -> Self {
        SemVer { latest_tag }
    }

    /// Advance the prerelease iteration, e.g. `1.0.0-rc.0` -> `1.0.0-rc.1`
    pub fn increment_prerelease(&self, version: &str) -> Result<String> {
        let mut parsed = parse_lenient(version)
            .ok_or_else(|| FlowrelError::version(format!("'{}' is not a semantic version", version)))?;

        if parsed.pre.is_empty() {
            return Err(FlowrelError::version(format!(
                "version {} has no prerelease to increment",
                version
            )));
        }

        let label = prerelease::next_iteration(parsed.pre.as_str());
        parsed.pre = Prerelease::new(&label)
            .map_err(|e| FlowrelError::version(format!("invalid prerelease '{}': {}", label, e)))?;
        Ok(parsed.to_string())
    }
}

impl Versioner for SemVer {
    fn current(&self) -> Result<String> {
        current_from(&self.latest_tag)
    }

    fn next(&self, current: &str, bump: Bump) -> Result<String> {
        if current.is_empty() {
            return Ok(match bump {
                Bump::Minor => "0.1.0".to_string(),
                Bump::Patch | Bump::Hotfix => "0.0.1".to_string(),
            });
        }

        let parsed = parse_lenient(current).ok_or_else(|| {
            FlowrelError::version(format!("current version '{}' is not a semantic version", current))
        })?;

        let overflow =
            || FlowrelError::version(format!("cannot bump {}: component overflow", current));
        let next = match bump {
            Bump::Minor => {
                let minor = parsed.minor.checked_add(1).ok_or_else(overflow)?;
                Version::new(parsed.major, minor, 0)
            }
            Bump::Patch | Bump::Hotfix => {
                if parsed.pre.is_empty() {
                    let patch = parsed.patch.checked_add(1).ok_or_else(overflow)?;
                    Version::new(parsed.major, parsed.minor, patch)
                } else {
                    // 1.2.3-rc.1 has not shipped yet; its own core is the next patch
                    Version::new(parsed.major, parsed.minor, parsed.patch)
                }
            }
        };
        Ok(next.to_string())
    }

    fn scheme(&self) -> Scheme {
        Scheme::SemVer
    }

    fn is_valid(&self, version: &str) -> bool {
        !is_calver(version) && parse_lenient(version).is_some()
    }

    fn set_prerelease(&self, version: &str, label: &str) -> String {
        let fallback = || format!("{}-{}", version, label);
        let Some(mut parsed) = parse_lenient(version) else {
            return fallback();
        };
        match Prerelease::new(label) {
            Ok(pre) => {
                parsed.pre = pre;
                parsed.to_string()
            }
            Err(_) => fallback(),
        }
    }

    fn remove_prerelease(&self, version: &str) -> String {
        match parse_lenient(version) {
            Some(mut parsed) => {
                parsed.pre = Prerelease::EMPTY;
                parsed.to_string()
            }
            None => match version.find('-') {
                Some(idx) => version[..idx].to_string(),
                None => version.to_string(),
            },
        }
    }
}
