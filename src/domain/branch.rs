use super::scheme::Bump;
use std::fmt;

/// The two kinds of flow a repository can have in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowKind {
    Release,
    Hotfix,
}

impl FlowKind {
    /// Branch name prefix that marks a flow of this kind as in progress
    pub fn prefix(&self) -> &'static str {
        match self {
            FlowKind::Release => "release/",
            FlowKind::Hotfix => "hotfix/",
        }
    }

    /// Bump intent used when starting this kind of flow
    pub fn bump(&self) -> Bump {
        match self {
            FlowKind::Release => Bump::Minor,
            FlowKind::Hotfix => Bump::Hotfix,
        }
    }

    /// Title used in tag messages and summaries
    pub fn title(&self) -> &'static str {
        match self {
            FlowKind::Release => "Release",
            FlowKind::Hotfix => "Hotfix",
        }
    }

    pub fn plural(&self) -> &'static str {
        match self {
            FlowKind::Release => "releases",
            FlowKind::Hotfix => "hotfixes",
        }
    }

    /// Branch name for a version, e.g. `release/1.2.0`
    pub fn branch_name(&self, version: &str) -> String {
        format!("{}{}", self.prefix(), version)
    }

    /// Version carried by a branch of this kind, if the prefix matches
    pub fn version_of<'a>(&self, branch: &'a str) -> Option<&'a str> {
        branch.strip_prefix(self.prefix())
    }

    /// Annotated tag message for a finished version
    pub fn tag_message(&self, version: &str) -> String {
        format!("{} {}", self.title(), version)
    }
}

impl fmt::Display for FlowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowKind::Release => write!(f, "release"),
            FlowKind::Hotfix => write!(f, "hotfix"),
        }
    }
}
