//! Scheme-specific version arithmetic
//!
//! The flow controller only ever talks to a [`Versioner`]; which scheme sits
//! behind it is decided once, when [`new`] or [`with_clock`] builds it.

use super::calver::CalVer;
use super::clock::{Clock, SystemClock};
use super::scheme::{Bump, Scheme};
use super::semver::SemVer;
use super::tag;
use crate::error::Result;
use std::sync::Arc;

/// Accessor for the latest tag in the repository (empty string when none)
///
/// Keeps version arithmetic independent of the git layer.
pub type TagSource = Arc<dyn Fn() -> Result<String> + Send + Sync>;

/// Shared contract of the CalVer and SemVer versioners
pub trait Versioner: Send + Sync {
    /// Version of the latest tag with any leading `v` removed
    ///
    /// Returns an empty string when the repository has no tags yet.
    fn current(&self) -> Result<String>;

    /// Next version for the given bump intent
    fn next(&self, current: &str, bump: Bump) -> Result<String>;

    fn scheme(&self) -> Scheme;

    /// Grammar-only check; never fails
    fn is_valid(&self, version: &str) -> bool;

    /// Attach or replace a prerelease label
    fn set_prerelease(&self, version: &str, label: &str) -> String;

    /// Strip any prerelease label
    fn remove_prerelease(&self, version: &str) -> String;
}

/// Build the versioner for `scheme` using the system clock
pub fn new(scheme: Scheme, latest_tag: TagSource) -> Box<dyn Versioner> {
    with_clock(scheme, latest_tag, Arc::new(SystemClock))
}

/// Build the versioner for `scheme` with an explicit clock
pub fn with_clock(scheme: Scheme, latest_tag: TagSource, clock: Arc<dyn Clock>) -> Box<dyn Versioner> {
    match scheme {
        Scheme::CalVer => Box::new(CalVer::with_clock(latest_tag, clock)),
        Scheme::SemVer => Box::new(SemVer::new(latest_tag)),
    }
}

/// Current version from a tag source, shared by both schemes
pub(crate) fn current_from(latest_tag: &TagSource) -> Result<String> {
    let tag = latest_tag()?;
    Ok(tag::version_part(&tag).to_string())
}
