//! Release and hotfix flows
//!
//! A [Flow] ties one [Versioner] to one [Repository] and drives the Git Flow
//! lifecycle: `start` creates a `release/<version>` or `hotfix/<version>`
//! branch, `finish` merges it to main, tags, merges main back to develop,
//! pushes and deletes the branch.
//!
//! There is no state file. A flow is in progress exactly while a branch
//! with its prefix exists, so deleting such a branch by hand ends it.
//!
//! Every step is a blocking repository call issued in order; the first
//! failure aborts the flow and nothing already applied is rolled back.

mod lifecycle;

use crate::domain::clock::{Clock, SystemClock};
use crate::domain::versioner::{self, TagSource, Versioner};
use crate::domain::{FlowKind, Scheme};
use crate::error::Result;
use crate::git::Repository;
use crate::ui::Progress;
use std::sync::Arc;

/// Remote used when none is configured
pub const DEFAULT_REMOTE: &str = "origin";

/// Settings for building a [Flow]
#[derive(Debug, Clone, Default)]
pub struct FlowOptions {
    pub scheme: Scheme,
    /// Remote to push to (default: `origin`)
    pub remote: Option<String>,
    /// Production branch (default: auto-detect)
    pub main_branch: Option<String>,
    /// Development branch (default: auto-detect)
    pub develop_branch: Option<String>,
    pub dry_run: bool,
    pub verbose: bool,
}

/// Result of starting a release or hotfix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartOutcome {
    pub branch: String,
    pub version: String,
}

/// Result of finishing a release or hotfix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinishOutcome {
    pub branch: String,
    pub version: String,
    pub tag: String,
    /// False when the finished branch could not be deleted
    pub branch_deleted: bool,
    /// The release chained on with `--start-new`
    pub next: Option<StartOutcome>,
}

/// Flows currently in progress, inferred from branch names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlowStatus {
    pub releases: Vec<String>,
    pub hotfixes: Vec<String>,
}

impl FlowStatus {
    pub fn is_idle(&self) -> bool {
        self.releases.is_empty() && self.hotfixes.is_empty()
    }
}

/// Orchestrates Git Flow releases and hotfixes
pub struct Flow<R: Repository> {
    repo: Arc<R>,
    versioner: Box<dyn Versioner>,
    remote: String,
    main_branch: String,
    develop_branch: String,
    dry_run: bool,
    progress: Progress,
}

impl<R: Repository + 'static> Flow<R> {
    /// Build a flow using the system clock
    pub fn new(repo: R, options: FlowOptions) -> Result<Self> {
        Self::with_clock(repo, options, Arc::new(SystemClock))
    }

    /// Build a flow whose CalVer dates come from `clock`
    ///
    /// Main and develop branches are resolved here, once: explicit names win,
    /// otherwise the first existing candidate branch is used.
    pub fn with_clock(repo: R, options: FlowOptions, clock: Arc<dyn Clock>) -> Result<Self> {
        let repo = Arc::new(repo);

        let source = Arc::clone(&repo);
        let latest_tag: TagSource = Arc::new(move || source.latest_tag());
        let versioner = versioner::with_clock(options.scheme, latest_tag, clock);

        let remote = non_empty(options.remote).unwrap_or_else(|| DEFAULT_REMOTE.to_string());
        let main_branch = match non_empty(options.main_branch) {
            Some(branch) => branch,
            None => repo.main_branch()?,
        };
        let develop_branch = match non_empty(options.develop_branch) {
            Some(branch) => branch,
            None => repo.develop_branch()?,
        };

        Ok(Flow {
            repo,
            versioner,
            remote,
            main_branch,
            develop_branch,
            dry_run: options.dry_run,
            progress: Progress::new(options.verbose || options.dry_run),
        })
    }
}

impl<R: Repository> Flow<R> {
    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn versioner(&self) -> &dyn Versioner {
        self.versioner.as_ref()
    }

    pub fn remote(&self) -> &str {
        &self.remote
    }

    pub fn main_branch(&self) -> &str {
        &self.main_branch
    }

    pub fn develop_branch(&self) -> &str {
        &self.develop_branch
    }

    /// Create `release/<next version>` from develop
    ///
    /// SemVer releases carry an `rc.0` prerelease label until finished.
    pub fn release_start(&self) -> Result<StartOutcome> {
        self.start(FlowKind::Release)
    }

    /// Merge, tag, push and delete the single release branch
    ///
    /// With `start_new` a new release is started right after.
    pub fn release_finish(&self, start_new: bool) -> Result<FinishOutcome> {
        self.finish(FlowKind::Release, start_new)
    }

    /// Create `hotfix/<next version>` from main
    pub fn hotfix_start(&self) -> Result<StartOutcome> {
        self.start(FlowKind::Hotfix)
    }

    /// Merge, tag, push and delete the single hotfix branch
    pub fn hotfix_finish(&self) -> Result<FinishOutcome> {
        self.finish(FlowKind::Hotfix, false)
    }

    /// Release and hotfix branches currently present
    pub fn status(&self) -> Result<FlowStatus> {
        Ok(FlowStatus {
            releases: self.repo.list_branches(FlowKind::Release.prefix())?,
            hotfixes: self.repo.list_branches(FlowKind::Hotfix.prefix())?,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
