use tracing::debug;

use crate::changes::{Change, ChangeKind};
use crate::filesystem::TreeInventory;

/// The ordered list of changes for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    changes: Vec<Change>,
}

impl ChangeSet {
    /// Derives the changes that make `destination` match `source`.
    ///
    /// Every file present in both trees is scheduled as a modification; no
    /// content comparison happens here.
    pub fn compute(source: &TreeInventory, destination: &TreeInventory) -> Self {
        let created = source
            .directories()
            .difference(destination.directories())
            .map(|dir| Change::new(dir.clone(), ChangeKind::CreateDir));
        let added = source
            .files()
            .difference(destination.files())
            .map(|file| Change::new(file.clone(), ChangeKind::AddFile));
        let modified = source
            .files()
            .intersection(destination.files())
            .map(|file| Change::new(file.clone(), ChangeKind::ModifyFile));
        let removed = destination
            .files()
            .difference(source.files())
            .map(|file| Change::new(file.clone(), ChangeKind::RemoveFile));
        let removed_dirs = destination
            .directories()
            .difference(source.directories())
            .map(|dir| Change::new(dir.clone(), ChangeKind::RemoveDir));

        let changes = created
            .chain(added)
            .chain(modified)
            .chain(removed)
            .chain(removed_dirs)
            .collect::<Vec<_>>();

        let change_set = Self::from_unordered(changes);
        debug!(
            "Computed {} changes: {} mkdir, {} add, {} mod, {} del, {} rmdir",
            change_set.len(),
            change_set.count_of(ChangeKind::CreateDir),
            change_set.count_of(ChangeKind::AddFile),
            change_set.count_of(ChangeKind::ModifyFile),
            change_set.count_of(ChangeKind::RemoveFile),
            change_set.count_of(ChangeKind::RemoveDir),
        );
        change_set
    }

    fn from_unordered(mut changes: Vec<Change>) -> Self {
        changes.sort();
        Self { changes }
    }

    /// Returns a change set without the changes rejected by `keep`.
    pub fn filtered(self, mut keep: impl FnMut(&Change) -> bool) -> Self {
        Self {
            changes: self.changes.into_iter().filter(|c| keep(c)).collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Change> {
        self.changes.iter()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn count_of(&self, kind: ChangeKind) -> usize {
        self.changes.iter().filter(|c| c.kind() == kind).count()
    }
}

impl<'a> IntoIterator for &'a ChangeSet {
    type Item = &'a Change;
    type IntoIter = std::slice::Iter<'a, Change>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.iter()
    }
}
