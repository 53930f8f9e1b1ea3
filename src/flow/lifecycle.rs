use super::{FinishOutcome, Flow, StartOutcome};
use crate::domain::prerelease::RELEASE_CANDIDATE;
use crate::domain::{FlowKind, Scheme};
use crate::error::{FlowrelError, Result};
use crate::git::Repository;
use crate::ui;
use tracing::{debug, warn};

impl<R: Repository> Flow<R> {
    /// Branch a new flow of `kind` starts from
    fn base_branch(&self, kind: FlowKind) -> &str {
        match kind {
            FlowKind::Release => &self.develop_branch,
            FlowKind::Hotfix => &self.main_branch,
        }
    }

    pub(super) fn start(&self, kind: FlowKind) -> Result<StartOutcome> {
        self.progress.step(&format!("Starting new {}", kind));

        let existing = self.repo.list_branches(kind.prefix())?;
        if let Some(branch) = existing.into_iter().next() {
            return Err(FlowrelError::AlreadyInProgress { kind, branch });
        }

        let base = self.base_branch(kind);
        self.progress.detail(&format!("Using base branch: {}", base));

        self.repo.checkout(base)?;
        if self.repo.has_uncommitted_changes()? {
            return Err(FlowrelError::DirtyWorkingTree("working directory".to_string()));
        }

        let current = self.versioner.current()?;
        self.progress.detail(&format!(
            "Current version: {}",
            if current.is_empty() { "(none)" } else { current.as_str() }
        ));

        let mut version = self.versioner.next(&current, kind.bump())?;
        if kind == FlowKind::Release && self.versioner.scheme() == Scheme::SemVer {
            version = self.versioner.set_prerelease(&version, RELEASE_CANDIDATE);
        }
        self.progress.detail(&format!("New version: {}", version));

        let branch = kind.branch_name(&version);
        self.progress.detail(&format!("Creating branch: {}", branch));
        self.repo.create_branch(&branch, base)?;
        debug!(%branch, %version, "{} started", kind);

        ui::display_success(&format!("{} {} started", kind.title(), version));
        ui::display_detail(&format!("Branch: {}", branch));
        ui::display_detail("");
        ui::display_detail(match kind {
            FlowKind::Release => "Make any final changes, then run:",
            FlowKind::Hotfix => "Make your fixes, then run:",
        });
        ui::display_detail(&format!("  flowrel {} finish", kind));

        Ok(StartOutcome { branch, version })
    }

    /// The one branch of `kind` in progress; zero or several is an error
    fn branch_in_progress(&self, kind: FlowKind) -> Result<String> {
        let mut branches = self.repo.list_branches(kind.prefix())?;
        match branches.len() {
            0 => Err(FlowrelError::NotInProgress { kind }),
            1 => Ok(branches.remove(0)),
            _ => Err(FlowrelError::MultipleInProgress { kind, branches }),
        }
    }

    pub(super) fn finish(&self, kind: FlowKind, start_new: bool) -> Result<FinishOutcome> {
        self.progress.step(&format!("Finishing {}", kind));

        let branch = self.branch_in_progress(kind)?;
        self.progress.detail(&format!("{} branch: {}", kind.title(), branch));

        let branch_version = kind.version_of(&branch).unwrap_or(branch.as_str());
        let version = match kind {
            FlowKind::Release => self.versioner.remove_prerelease(branch_version),
            FlowKind::Hotfix => branch_version.to_string(),
        };
        self.progress.detail(&format!("Final version: {}", version));

        self.repo.checkout(&branch)?;
        if self.repo.has_uncommitted_changes()? {
            return Err(FlowrelError::DirtyWorkingTree(format!("{} branch", kind)));
        }

        // the tag must point at a commit reachable from main
        self.progress.detail(&format!("Merging to {}", self.main_branch));
        self.repo.checkout(&self.main_branch)?;
        self.repo.merge(&branch, true)?;

        let tag = self.repo.format_tag(&version)?;
        self.progress.detail(&format!("Creating tag: {}", tag));
        self.repo.create_tag(&tag, &kind.tag_message(&version))?;

        self.progress.detail(&format!("Merging to {}", self.develop_branch));
        self.repo.checkout(&self.develop_branch)?;
        self.repo.merge(&self.main_branch, true)?;

        self.progress.detail(&format!("Pushing to {}", self.remote));
        self.repo.push_with_tags(
            &self.remote,
            &[self.main_branch.as_str(), self.develop_branch.as_str()],
        )?;

        self.progress.detail(&format!("Deleting branch: {}", branch));
        let branch_deleted = match self.repo.delete_branch(&branch) {
            Ok(()) => true,
            Err(e) => {
                warn!(%branch, error = %e, "failed to delete finished branch");
                ui::display_warning(&format!("failed to delete branch {}: {}", branch, e));
                false
            }
        };

        match kind {
            FlowKind::Release => ui::display_success(&format!("Released {}", version)),
            FlowKind::Hotfix => ui::display_success(&format!("Hotfix {} released", version)),
        }
        ui::display_detail(&format!("Tag: {}", tag));

        let next = if start_new && kind == FlowKind::Release {
            ui::display_detail("");
            if self.dry_run {
                // the finished branch was never deleted, so a start would refuse
                ui::display_detail("A new release would be started next");
                None
            } else {
                Some(self.start(FlowKind::Release)?)
            }
        } else {
            None
        };

        Ok(FinishOutcome {
            branch,
            version,
            tag,
            branch_deleted,
            next,
        })
    }
}
