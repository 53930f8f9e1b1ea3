use crate::error::{FlowrelError, Result};
use crate::git::Repository;
use std::collections::{BTreeSet, HashSet};
use std::sync::{Mutex, MutexGuard};

/// One recorded repository call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListBranches(String),
    BranchExists(String),
    Checkout(String),
    CreateBranch { name: String, base: String },
    DeleteBranch(String),
    HasUncommittedChanges,
    Merge { branch: String, no_fast_forward: bool },
    CreateTag { name: String, message: String },
    ListTags,
    LatestTag,
    PushWithTags { remote: String, branches: Vec<String> },
}

impl Call {
    /// Whether the call changes repository state
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Call::Checkout(_)
                | Call::CreateBranch { .. }
                | Call::DeleteBranch(_)
                | Call::Merge { .. }
                | Call::CreateTag { .. }
                | Call::PushWithTags { .. }
        )
    }
}

#[derive(Default)]
struct MockState {
    branches: BTreeSet<String>,
    tags: Vec<String>,
    latest_tag: String,
    head: Option<String>,
    dirty: bool,
    conflicting: HashSet<String>,
    fail_delete: bool,
    reject_push: bool,
    calls: Vec<Call>,
}

/// In-memory repository that records every call, for testing flows
/// without touching git
#[derive(Default)]
pub struct MockRepository {
    state: Mutex<MockState>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Mock with `main` and `develop` branches, `develop` checked out
    pub fn git_flow() -> Self {
        let repo = Self::new().with_branch("main").with_branch("develop");
        repo.state().head = Some("develop".to_string());
        repo
    }

    pub fn with_branch(self, name: impl Into<String>) -> Self {
        self.state().branches.insert(name.into());
        self
    }

    /// Add an existing tag; the most recently added one is the latest
    pub fn with_tag(self, name: impl Into<String>) -> Self {
        {
            let mut state = self.state();
            let name = name.into();
            state.latest_tag = name.clone();
            state.tags.push(name);
        }
        self
    }

    /// Report uncommitted changes from now on
    pub fn with_dirty_tree(self) -> Self {
        self.state().dirty = true;
        self
    }

    /// Make merging `branch` fail with a conflict
    pub fn with_conflict_on(self, branch: impl Into<String>) -> Self {
        self.state().conflicting.insert(branch.into());
        self
    }

    pub fn with_failing_delete(self) -> Self {
        self.state().fail_delete = true;
        self
    }

    pub fn with_rejected_push(self) -> Self {
        self.state().reject_push = true;
        self
    }

    pub fn set_dirty(&self, dirty: bool) {
        self.state().dirty = dirty;
    }

    /// Every call made so far, in order
    pub fn calls(&self) -> Vec<Call> {
        self.state().calls.clone()
    }

    /// Only the calls that change repository state
    pub fn mutations(&self) -> Vec<Call> {
        self.state()
            .calls
            .iter()
            .filter(|call| call.is_mutation())
            .cloned()
            .collect()
    }

    pub fn branches(&self) -> Vec<String> {
        self.state().branches.iter().cloned().collect()
    }

    pub fn tags(&self) -> Vec<String> {
        self.state().tags.clone()
    }

    pub fn head(&self) -> Option<String> {
        self.state().head.clone()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        // a panicking test must not poison the rest of its assertions
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record(&self, call: Call) -> MutexGuard<'_, MockState> {
        let mut state = self.state();
        state.calls.push(call);
        state
    }
}

impl Repository for MockRepository {
    fn list_branches(&self, prefix: &str) -> Result<Vec<String>> {
        let state = self.record(Call::ListBranches(prefix.to_string()));
        Ok(state
            .branches
            .iter()
            .filter(|name| name.starts_with(prefix))
            .cloned()
            .collect())
    }

    fn branch_exists(&self, name: &str) -> Result<bool> {
        let state = self.record(Call::BranchExists(name.to_string()));
        Ok(state.branches.contains(name))
    }

    fn checkout(&self, branch: &str) -> Result<()> {
        let mut state = self.record(Call::Checkout(branch.to_string()));
        if !state.branches.contains(branch) {
            return Err(FlowrelError::branch(format!("Branch not found: {}", branch)));
        }
        state.head = Some(branch.to_string());
        Ok(())
    }

    fn create_branch(&self, name: &str, base: &str) -> Result<()> {
        let mut state = self.record(Call::CreateBranch {
            name: name.to_string(),
            base: base.to_string(),
        });
        if !state.branches.contains(base) {
            return Err(FlowrelError::branch(format!("Branch not found: {}", base)));
        }
        if !state.branches.insert(name.to_string()) {
            return Err(FlowrelError::branch(format!("Branch already exists: {}", name)));
        }
        state.head = Some(name.to_string());
        Ok(())
    }

    fn delete_branch(&self, name: &str) -> Result<()> {
        let mut state = self.record(Call::DeleteBranch(name.to_string()));
        if state.fail_delete {
            return Err(FlowrelError::branch(format!("Cannot delete branch '{}'", name)));
        }
        state.branches.remove(name);
        Ok(())
    }

    fn has_uncommitted_changes(&self) -> Result<bool> {
        let state = self.record(Call::HasUncommittedChanges);
        Ok(state.dirty)
    }

    fn merge(&self, branch: &str, no_fast_forward: bool) -> Result<()> {
        let state = self.record(Call::Merge {
            branch: branch.to_string(),
            no_fast_forward,
        });
        if state.conflicting.contains(branch) {
            return Err(FlowrelError::MergeConflict {
                branch: branch.to_string(),
                into: state.head.clone().unwrap_or_default(),
            });
        }
        Ok(())
    }

    fn create_tag(&self, name: &str, message: &str) -> Result<()> {
        let mut state = self.record(Call::CreateTag {
            name: name.to_string(),
            message: message.to_string(),
        });
        if state.tags.iter().any(|existing| existing == name) {
            return Err(FlowrelError::tag(format!("Tag already exists: {}", name)));
        }
        state.tags.push(name.to_string());
        state.latest_tag = name.to_string();
        Ok(())
    }

    fn list_tags(&self) -> Result<Vec<String>> {
        let state = self.record(Call::ListTags);
        let mut tags = state.tags.clone();
        tags.sort();
        Ok(tags)
    }

    fn latest_tag(&self) -> Result<String> {
        let state = self.record(Call::LatestTag);
        Ok(state.latest_tag.clone())
    }

    fn push_with_tags(&self, remote: &str, branches: &[&str]) -> Result<()> {
        let state = self.record(Call::PushWithTags {
            remote: remote.to_string(),
            branches: branches.iter().map(|b| b.to_string()).collect(),
        });
        if state.reject_push {
            return Err(FlowrelError::remote(format!("push to '{}' rejected", remote)));
        }
        Ok(())
    }
}
