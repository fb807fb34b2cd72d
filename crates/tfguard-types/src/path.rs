use camino::{Utf8Path, Utf8PathBuf};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical repo-relative path of a Terraform file, as it appears in findings.
///
/// Normalization:
/// - always forward slashes (`/`)
/// - no leading `./`
/// - the module root itself is `.`
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct RepoPath(String);

impl Default for RepoPath {
    fn default() -> Self {
        RepoPath::new(".")
    }
}

impl RepoPath {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        let mut v = s.as_ref().replace('\\', "/");
        while let Some(rest) = v.strip_prefix("./") {
            v = rest.to_string();
        }
        if v.is_empty() {
            v = ".".to_string();
        }
        Self(v)
    }

    /// Express `abs` relative to `root`. Paths outside `root` are kept as given.
    pub fn relative_to(root: &Utf8Path, abs: &Utf8Path) -> Self {
        RepoPath::new(abs.strip_prefix(root).unwrap_or(abs).as_str())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    pub fn to_utf8_pathbuf(&self) -> Utf8PathBuf {
        Utf8PathBuf::from(self.0.clone())
    }
}

impl fmt::Display for RepoPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&Utf8Path> for RepoPath {
    fn from(value: &Utf8Path) -> Self {
        RepoPath::new(value.as_str())
    }
}

impl From<Utf8PathBuf> for RepoPath {
    fn from(value: Utf8PathBuf) -> Self {
        RepoPath::new(value.as_str())
    }
}
