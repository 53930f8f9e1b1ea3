use super::clock::{Clock, SystemClock};
use super::scheme::{Bump, Scheme};
use super::versioner::{current_from, TagSource, Versioner};
use crate::error::Result;
use regex::Regex;
use std::sync::{Arc, OnceLock};

/// `YYYY.MM.DD` with an optional `-N` hotfix counter
fn calver_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(\d{4})\.(\d{2})\.(\d{2})(?:-(\d+))?$").expect("calver pattern is valid")
    })
}

/// Whether `version` matches the CalVer grammar
pub fn is_calver(version: &str) -> bool {
    calver_pattern().is_match(version)
}

/// Calendar versioning: releases are named after the day they start,
/// same-day hotfixes append `-1`, `-2`, ...
pub struct CalVer {
    latest_tag: TagSource,
    clock: Arc<dyn Clock>,
}

impl CalVer {
    pub fn new(latest_tag: TagSource) -> Self {
        Self::with_clock(latest_tag, Arc::new(SystemClock))
    }

    pub fn with_clock(latest_tag: TagSource, clock: Arc<dyn Clock>) -> Self {
        CalVer { latest_tag, clock }
    }

    /// Today's date as a CalVer version
    pub fn today(&self) -> String {
        self.clock.today().format("%Y.%m.%d").to_string()
    }

    fn next_hotfix(&self, current: &str, today: &str) -> String {
        let Some(caps) = calver_pattern().captures(current) else {
            return format!("{}-1", today);
        };

        let date = format!("{}.{}.{}", &caps[1], &caps[2], &caps[3]);
        if date != today {
            // counters never carry across days
            return format!("{}-1", today);
        }

        // an unreadable counter counts as 0
        let next = caps
            .get(4)
            .and_then(|m| m.as_str().parse::<u64>().ok())
            .and_then(|counter| counter.checked_add(1))
            .unwrap_or(1);
        format!("{}-{}", today, next)
    }
}

impl Versioner for CalVer {
    fn current(&self) -> Result<String> {
        current_from(&self.latest_tag)
    }

    fn next(&self, current: &str, bump: Bump) -> Result<String> {
        let today = self.today();
        match bump {
            Bump::Minor => Ok(today),
            Bump::Patch | Bump::Hotfix => Ok(self.next_hotfix(current, &today)),
        }
    }

    fn scheme(&self) -> Scheme {
        Scheme::CalVer
    }

    fn is_valid(&self, version: &str) -> bool {
        is_calver(version)
    }

    fn set_prerelease(&self, version: &str, _label: &str) -> String {
        version.to_string()
    }

    fn remove_prerelease(&self, version: &str) -> String {
        version.to_string()
    }
}
