use crate::error::{FlowrelError, Result};
use crate::git::Repository;
use crate::ui;
use git2::build::CheckoutBuilder;
use git2::{
    BranchType, Commit, Cred, CredentialType, DescribeFormatOptions, DescribeOptions, ErrorClass,
    ErrorCode, ObjectType, Oid, PushOptions, RemoteCallbacks, Repository as Git2Repo,
    StatusOptions,
};
use std::path::Path;
use tracing::debug;

/// Wrapper around git2::Repository with our trait interface
///
/// In dry-run mode every mutating operation is skipped and printed as the
/// equivalent git command; queries still read the real repository.
pub struct Git2Repository {
    repo: Git2Repo,
    dry_run: bool,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P, dry_run: bool) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo, dry_run })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo, dry_run: bool) -> Self {
        Git2Repository { repo, dry_run }
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Short name of the checked-out branch
    pub fn current_branch(&self) -> Result<String> {
        let head = self.repo.head()?;
        head.shorthand()
            .map(str::to_string)
            .ok_or_else(|| FlowrelError::branch("HEAD is not a valid UTF-8 branch name"))
    }

    /// Whether a tag exists
    pub fn tag_exists(&self, name: &str) -> Result<bool> {
        match self.repo.find_reference(&format!("refs/tags/{}", name)) {
            Ok(_) => Ok(true),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Returns true when the write described by `command` must be skipped
    fn skip_write(&self, command: &str) -> bool {
        if self.dry_run {
            ui::display_command(command);
            true
        } else {
            debug!(command, "running git operation");
            false
        }
    }

    fn branch_commit(&self, name: &str) -> Result<Commit<'_>> {
        let branch = self
            .repo
            .find_branch(name, BranchType::Local)
            .map_err(|e| FlowrelError::branch(format!("Cannot find branch '{}': {}", name, e)))?;

        Ok(branch.get().peel_to_commit()?)
    }

    fn force_checkout_head(&self) -> Result<()> {
        let mut options = CheckoutBuilder::new();
        options.force();
        self.repo.checkout_head(Some(&mut options))?;
        Ok(())
    }

    /// Annotated tags pointing at commits reachable from any of `heads`
    fn reachable_annotated_tags(&self, heads: &[Oid]) -> Result<Vec<String>> {
        let mut reachable = Vec::new();

        for name in self.list_tags()? {
            let reference = self.repo.find_reference(&format!("refs/tags/{}", name))?;
            if reference.peel_to_tag().is_err() {
                // lightweight
                continue;
            }
            let Ok(commit) = reference.peel_to_commit() else {
                continue;
            };

            let target = commit.id();
            let mut contained = false;
            for head in heads {
                if *head == target || self.repo.graph_descendant_of(*head, target)? {
                    contained = true;
                    break;
                }
            }
            if contained {
                reachable.push(name);
            }
        }

        Ok(reachable)
    }
}

impl Repository for Git2Repository {
    fn list_branches(&self, prefix: &str) -> Result<Vec<String>> {
        let mut names = Vec::new();

        for entry in self.repo.branches(Some(BranchType::Local))? {
            let (branch, _) = entry?;
            if let Some(name) = branch.name()? {
                if name.starts_with(prefix) {
                    names.push(name.to_string());
                }
            }
        }

        names.sort();
        debug!(prefix, count = names.len(), "listed branches");
        Ok(names)
    }

    fn branch_exists(&self, name: &str) -> Result<bool> {
        match self.repo.find_branch(name, BranchType::Local) {
            Ok(_) => Ok(true),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn checkout(&self, branch: &str) -> Result<()> {
        if self.skip_write(&format!("git checkout {}", branch)) {
            return Ok(());
        }

        let refname = format!("refs/heads/{}", branch);
        let target = self
            .repo
            .revparse_single(&refname)
            .map_err(|e| FlowrelError::branch(format!("Cannot find branch '{}': {}", branch, e)))?;

        let mut options = CheckoutBuilder::new();
        options.safe();
        self.repo.checkout_tree(&target, Some(&mut options))?;
        self.repo.set_head(&refname)?;
        Ok(())
    }

    fn create_branch(&self, name: &str, base: &str) -> Result<()> {
        if self.skip_write(&format!("git checkout -b {} {}", name, base)) {
            return Ok(());
        }

        let base_commit = self.branch_commit(base)?;
        self.repo
            .branch(name, &base_commit, false)
            .map_err(|e| FlowrelError::branch(format!("Cannot create branch '{}': {}", name, e)))?;

        self.checkout(name)
    }

    fn delete_branch(&self, name: &str) -> Result<()> {
        if self.skip_write(&format!("git branch -d {}", name)) {
            return Ok(());
        }

        let mut branch = self
            .repo
            .find_branch(name, BranchType::Local)
            .map_err(|e| FlowrelError::branch(format!("Cannot find branch '{}': {}", name, e)))?;

        branch
            .delete()
            .map_err(|e| FlowrelError::branch(format!("Cannot delete branch '{}': {}", name, e)))
    }

    fn has_uncommitted_changes(&self) -> Result<bool> {
        let mut options = StatusOptions::new();
        options
            .include_untracked(true)
            .include_ignored(false)
            .recurse_untracked_dirs(false);

        let statuses = self.repo.statuses(Some(&mut options))?;
        Ok(!statuses.is_empty())
    }

    fn merge(&self, branch: &str, no_fast_forward: bool) -> Result<()> {
        let command = if no_fast_forward {
            format!("git merge --no-ff {}", branch)
        } else {
            format!("git merge {}", branch)
        };
        if self.skip_write(&command) {
            return Ok(());
        }

        let into = self.current_branch()?;
        let head = self.repo.head()?.peel_to_commit()?;
        let theirs = self.branch_commit(branch)?;

        if head.id() == theirs.id() || self.repo.graph_descendant_of(head.id(), theirs.id())? {
            debug!(branch, into = %into, "already up to date");
            return Ok(());
        }

        if !no_fast_forward && self.repo.graph_descendant_of(theirs.id(), head.id())? {
            let mut reference = self.repo.find_reference(&format!("refs/heads/{}", into))?;
            reference.set_target(theirs.id(), &format!("merge {}: Fast-forward", branch))?;
            return self.force_checkout_head();
        }

        let mut index = self.repo.merge_commits(&head, &theirs, None)?;
        if index.has_conflicts() {
            return Err(FlowrelError::MergeConflict {
                branch: branch.to_string(),
                into,
            });
        }

        let tree_id = index.write_tree_to(&self.repo)?;
        let tree = self.repo.find_tree(tree_id)?;
        let signature = self.repo.signature()?;
        let message = format!("Merge branch '{}' into {}", branch, into);

        self.repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            &message,
            &tree,
            &[&head, &theirs],
        )?;

        self.force_checkout_head()
    }

    fn create_tag(&self, name: &str, message: &str) -> Result<()> {
        if self.skip_write(&format!("git tag -a {} -m \"{}\"", name, message)) {
            return Ok(());
        }

        let target = self.repo.head()?.peel(ObjectType::Commit)?;
        let signature = self.repo.signature()?;

        self.repo
            .tag(name, &target, &signature, message, false)
            .map_err(|e| FlowrelError::tag(format!("Cannot create tag '{}': {}", name, e)))?;

        Ok(())
    }

    fn list_tags(&self) -> Result<Vec<String>> {
        let tags = self.repo.tag_names(None)?;

        let mut names: Vec<String> = tags.iter().flatten().map(str::to_string).collect();
        names.sort();
        Ok(names)
    }

    fn latest_tag(&self) -> Result<String> {
        let mut options = DescribeOptions::new();
        options.describe_tags();

        match self.repo.describe(&options) {
            Ok(description) => {
                let mut format = DescribeFormatOptions::new();
                format.abbreviated_size(0);
                Ok(description.format(Some(&format))?)
            }
            // no tag reachable from HEAD is a valid initial state
            Err(e)
                if e.class() == ErrorClass::Describe
                    || matches!(e.code(), ErrorCode::NotFound | ErrorCode::UnbornBranch) =>
            {
                debug!(error = %e, "no tag reachable from HEAD");
                Ok(String::new())
            }
            Err(e) => Err(FlowrelError::tag(format!("Cannot describe HEAD: {}", e))),
        }
    }

    fn push_with_tags(&self, remote: &str, branches: &[&str]) -> Result<()> {
        let command = format!("git push --follow-tags {} {}", remote, branches.join(" "));
        if self.skip_write(&command) {
            return Ok(());
        }

        let mut heads = Vec::with_capacity(branches.len());
        for branch in branches {
            heads.push(self.branch_commit(branch)?.id());
        }

        let mut refspecs: Vec<String> = branches
            .iter()
            .map(|branch| format!("refs/heads/{0}:refs/heads/{0}", branch))
            .collect();
        refspecs.extend(
            self.reachable_annotated_tags(&heads)?
                .into_iter()
                .map(|tag| format!("refs/tags/{0}:refs/tags/{0}", tag)),
        );

        let mut remote_handle = self
            .repo
            .find_remote(remote)
            .map_err(|e| FlowrelError::remote(format!("Cannot find remote '{}': {}", remote, e)))?;

        let config = self.repo.config()?;
        let mut callbacks = RemoteCallbacks::new();
        callbacks.credentials(|url, username_from_url, allowed_types| {
            let username = username_from_url.unwrap_or("git");

            if allowed_types.contains(CredentialType::SSH_KEY) {
                if let Ok(cred) = Cred::ssh_key_from_agent(username) {
                    return Ok(cred);
                }

                if let Some(home) = dirs::home_dir() {
                    for key in ["id_ed25519", "id_rsa", "id_ecdsa"] {
                        let path = home.join(".ssh").join(key);
                        if path.exists() {
                            if let Ok(cred) = Cred::ssh_key(username, None, &path, None) {
                                return Ok(cred);
                            }
                        }
                    }
                }
            }

            if allowed_types.contains(CredentialType::USER_PASS_PLAINTEXT) {
                if let Ok(cred) = Cred::credential_helper(&config, url, username_from_url) {
                    return Ok(cred);
                }
            }

            Cred::default()
        });

        // surface per-ref rejections as errors
        callbacks.push_update_reference(|refname, status| match status {
            Some(message) => Err(git2::Error::from_str(&format!(
                "{} rejected: {}",
                refname, message
            ))),
            None => Ok(()),
        });

        let mut options = PushOptions::new();
        options.remote_callbacks(callbacks);

        let specs: Vec<&str> = refspecs.iter().map(String::as_str).collect();
        remote_handle
            .push(&specs, Some(&mut options))
            .map_err(|e| FlowrelError::remote(format!("Push to '{}' failed: {}", remote, e)))?;

        Ok(())
    }
}

// SAFETY: git2::Repository is Send; the flows only ever drive it from a
// single thread, one blocking call at a time.
unsafe impl Sync for Git2Repository {}
