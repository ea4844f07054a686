use std::cmp::Ordering;

use derive_more::Display;

use crate::filesystem::RelativePath;

/// The five elementary operations. The display form is the label shown by the
/// logging backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ChangeKind {
    #[display("MKDIR")]
    CreateDir,
    #[display("ADD")]
    AddFile,
    #[display("MOD")]
    ModifyFile,
    #[display("DEL")]
    RemoveFile,
    #[display("RMDIR")]
    RemoveDir,
}

impl ChangeKind {
    pub fn is_directory_removal(self) -> bool {
        matches!(self, ChangeKind::RemoveDir)
    }

    /// Tie-break for operations on the same path. A file being replaced by a
    /// directory has to be removed before the directory is created.
    fn same_path_rank(self) -> u8 {
        match self {
            ChangeKind::RemoveFile => 0,
            ChangeKind::CreateDir => 1,
            ChangeKind::AddFile => 2,
            ChangeKind::ModifyFile => 3,
            ChangeKind::RemoveDir => 4,
        }
    }
}

/// One operation on one path.
///
/// Changes are totally ordered: everything except directory removals comes
/// first in ascending path order, then directory removals in descending path
/// order so that children are removed before their parents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
#[display("{kind} {path}")]
pub struct Change {
    path: RelativePath,
    kind: ChangeKind,
}

impl Change {
    pub fn new(path: RelativePath, kind: ChangeKind) -> Self {
        Self { path, kind }
    }

    pub fn path(&self) -> &RelativePath {
        &self.path
    }

    pub fn kind(&self) -> ChangeKind {
        self.kind
    }
}

impl Ord for Change {
    fn cmp(&self, other: &Self) -> Ordering {
        match (
            self.kind.is_directory_removal(),
            other.kind.is_directory_removal(),
        ) {
            (false, true) => Ordering::Less,
            (true, false) => Ordering::Greater,
            (true, true) => other.path.cmp(&self.path),
            (false, false) => self
                .path
                .cmp(&other.path)
                .then_with(|| self.kind.same_path_rank().cmp(&other.kind.same_path_rank())),
        }
    }
}

impl PartialOrd for Change {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
