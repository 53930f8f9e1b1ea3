//! Git operations abstraction layer
//!
//! The flow controller depends on the [Repository] trait rather than on a
//! concrete backend. Two implementations ship with the crate:
//!
//! - [repository::Git2Repository]: the real backend, built on the `git2` crate
//! - [mock::MockRepository]: an in-memory double that records every call
//!
//! Read operations always run. Write operations are skipped by
//! [Git2Repository] in dry-run mode and only reported.
//!
//! ```rust,no_run
//! # use flowrel::git::{Git2Repository, Repository};
//! # fn example() -> flowrel::Result<()> {
//! let repo = Git2Repository::open(".", false)?;
//! for branch in repo.list_branches("release/")? {
//!     println!("release in progress: {}", branch);
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::{Call, MockRepository};
pub use repository::Git2Repository;

use crate::domain::tag;
use crate::error::{FlowrelError, Result};

/// Candidate names for the production branch, in order of preference
pub const MAIN_CANDIDATES: &[&str] = &["main", "master"];

/// Candidate names for the development branch, in order of preference
pub const DEVELOP_CANDIDATES: &[&str] = &["develop", "development", "dev"];

/// Branch, tag, merge and push primitives needed by the release flows
///
/// ## Error Handling
///
/// Every method returns [crate::error::Result]. Implementations map backend
/// errors onto [crate::error::FlowrelError] variants; merge conflicts are
/// reported as [FlowrelError::MergeConflict] and never resolved.
pub trait Repository: Send + Sync {
    /// Local branches whose name starts with `prefix`, sorted by name
    fn list_branches(&self, prefix: &str) -> Result<Vec<String>>;

    /// Whether a local branch exists
    fn branch_exists(&self, name: &str) -> Result<bool>;

    /// Switch the working tree to `branch`
    fn checkout(&self, branch: &str) -> Result<()>;

    /// Create `name` from the tip of `base` and check it out
    fn create_branch(&self, name: &str, base: &str) -> Result<()>;

    /// Delete a local branch
    fn delete_branch(&self, name: &str) -> Result<()>;

    /// Whether the working tree has modified, staged or untracked files
    fn has_uncommitted_changes(&self) -> Result<bool>;

    /// Merge `branch` into the checked-out branch
    ///
    /// With `no_fast_forward` a merge commit is always created unless the
    /// branch is already contained in HEAD.
    fn merge(&self, branch: &str, no_fast_forward: bool) -> Result<()>;

    /// Create an annotated tag on HEAD
    fn create_tag(&self, name: &str, message: &str) -> Result<()>;

    /// All tag names, sorted
    fn list_tags(&self) -> Result<Vec<String>>;

    /// Nearest tag reachable from HEAD, or an empty string if there is none
    fn latest_tag(&self) -> Result<String>;

    /// Push `branches` and their annotated tags to `remote`
    fn push_with_tags(&self, remote: &str, branches: &[&str]) -> Result<()>;

    /// Tag name for `version`, following the `v` convention of existing tags
    fn format_tag(&self, version: &str) -> Result<String> {
        let tags = self.list_tags()?;
        Ok(tag::format_tag(version, &tags))
    }

    /// First existing branch among [MAIN_CANDIDATES]
    fn main_branch(&self) -> Result<String> {
        self.first_existing("main", MAIN_CANDIDATES)
    }

    /// First existing branch among [DEVELOP_CANDIDATES]
    fn develop_branch(&self) -> Result<String> {
        self.first_existing("develop", DEVELOP_CANDIDATES)
    }

    #[doc(hidden)]
    fn first_existing(&self, role: &'static str, candidates: &[&'static str]) -> Result<String> {
        for name in candidates {
            if self.branch_exists(name)? {
                return Ok(name.to_string());
            }
        }
        Err(FlowrelError::BranchNotFound {
            role,
            tried: candidates.to_vec(),
        })
    }
}
