use derive_new::new;
use regex::Regex;
use std::fmt;
use std::path::{Path, PathBuf};

/// `wkid#wkname#wkpath`, the format requested from `getworkspacefrompath`
pub const WORKSPACE_INFO_REGEX: &str = r"^(?P<id>[^#]+)#(?P<name>[^#]*)#(?P<path>.+)$";

/// Stable identifier of a workspace, independent of the folder it was reached from
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WorkspaceId(String);

impl WorkspaceId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for WorkspaceId {
    fn from(id: &str) -> Self {
        WorkspaceId(id.to_string())
    }
}

impl fmt::Display for WorkspaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct WorkspaceIdentity {
    id: WorkspaceId,
    name: String,
    root: PathBuf,
}

impl WorkspaceIdentity {
    pub fn id(&self) -> &WorkspaceId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Canonical root directory of the workspace
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Parses the first line of `getworkspacefrompath` output
    pub fn try_parse(line: &str) -> Option<Self> {
        let pattern = Regex::new(WORKSPACE_INFO_REGEX).ok()?;
        let captures = pattern.captures(line.trim())?;

        let id = captures["id"].trim();
        let root = captures["path"].trim();
        if id.is_empty() || root.is_empty() {
            return None;
        }

        Some(WorkspaceIdentity::new(
            WorkspaceId::from(id),
            captures["name"].trim().to_string(),
            PathBuf::from(root),
        ))
    }
}

impl fmt::Display for WorkspaceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) at {}", self.name, self.id, self.root.display())
    }
}
