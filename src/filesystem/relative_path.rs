use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use derive_more::Display;

/// A path below a scanned root.
///
/// Ordering is lexicographic over path components, so an ancestor always sorts
/// before each of its descendants regardless of the characters in the names.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display("{}", _0.display())]
pub struct RelativePath(PathBuf);

impl RelativePath {
    /// Strips `root` from `path`. Returns `None` for paths outside of `root`
    /// and for `root` itself.
    pub fn from_root(root: &Path, path: &Path) -> Option<Self> {
        let relative = path.strip_prefix(root).ok()?;
        if relative.as_os_str().is_empty() {
            return None;
        }
        Some(Self(relative.to_path_buf()))
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Resolves this path against a root directory.
    pub fn under(&self, root: &Path) -> PathBuf {
        root.join(self.as_path())
    }

    /// All proper ancestors, nearest first. `a/b/c` yields `a/b` then `a`.
    pub fn ancestors(&self) -> impl Iterator<Item = RelativePath> + '_ {
        self.0
            .ancestors()
            .skip(1)
            .filter(|ancestor| !ancestor.as_os_str().is_empty())
            .map(|ancestor| RelativePath(ancestor.to_path_buf()))
    }
}

impl AsRef<Path> for RelativePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl AsRef<OsStr> for RelativePath {
    fn as_ref(&self) -> &OsStr {
        self.0.as_os_str()
    }
}

impl From<&str> for RelativePath {
    fn from(path: &str) -> Self {
        Self(PathBuf::from(path))
    }
}
