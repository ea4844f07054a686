use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};

use snafu::{OptionExt, ResultExt, Snafu};
use tracing::debug;
use walkdir::WalkDir;

use crate::commands::{GIT_MARKER_DIR, SVN_MARKER_DIR};
use crate::ext::BestEffortPathExt;
use crate::filesystem::RelativePath;

/// Metadata directories of the supported version control systems. They are
/// skipped when found directly below a scanned root.
pub const VCS_MARKER_DIRS: [&str; 2] = [SVN_MARKER_DIR, GIT_MARKER_DIR];

/// The directories and files found below a root, as paths relative to it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeInventory {
    directories: BTreeSet<RelativePath>,
    files: BTreeSet<RelativePath>,
    ignored_empty_directories: BTreeSet<RelativePath>,
}

impl TreeInventory {
    /// Walks the whole tree below `root`.
    ///
    /// Symbolic links are not followed; anything that is not a directory is
    /// recorded as a file. With `exclude_empty_dirs`, directories that have no
    /// file anywhere below them are dropped from the directory set and kept in
    /// [`TreeInventory::ignored_empty_directories`] instead.
    pub fn scan(root: &Path, exclude_empty_dirs: bool) -> Result<Self, ScanError> {
        debug!("Scanning tree {}", root.display());
        let excludes = VCS_MARKER_DIRS
            .iter()
            .map(|name| root.join(name))
            .collect::<Vec<PathBuf>>();

        let walker = WalkDir::new(root)
            .min_depth(1)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| {
                !(entry.file_type().is_dir() && excludes.iter().any(|e| e == entry.path()))
            });

        let mut inventory = Self::default();
        for entry in walker {
            let entry = entry.context(WalkSnafu {
                root: root.to_path_buf(),
            })?;
            let relative =
                RelativePath::from_root(root, entry.path()).context(OutsideRootSnafu {
                    root: root.to_path_buf(),
                    path: entry.path().to_path_buf(),
                })?;

            if entry.file_type().is_dir() {
                inventory.directories.insert(relative);
            } else {
                inventory.files.insert(relative);
            }
        }

        if exclude_empty_dirs {
            inventory.prune_empty_directories();
        }

        debug!(
            "Found {} directories and {} files below {}",
            inventory.directories.len(),
            inventory.files.len(),
            root.display()
        );
        Ok(inventory)
    }

    pub fn directories(&self) -> &BTreeSet<RelativePath> {
        &self.directories
    }

    pub fn files(&self) -> &BTreeSet<RelativePath> {
        &self.files
    }

    /// Directories removed by the empty directory filter, in path order.
    pub fn ignored_empty_directories(&self) -> &BTreeSet<RelativePath> {
        &self.ignored_empty_directories
    }

    fn prune_empty_directories(&mut self) {
        let non_empty = self
            .files
            .iter()
            .flat_map(|file| file.ancestors())
            .collect::<HashSet<_>>();

        let (kept, empty): (BTreeSet<_>, BTreeSet<_>) = std::mem::take(&mut self.directories)
            .into_iter()
            .partition(|dir| non_empty.contains(dir));

        for dir in &empty {
            debug!("Ignoring empty source directory {}", dir);
        }
        self.directories = kept;
        self.ignored_empty_directories = empty;
    }
}

#[derive(Debug, Snafu)]
pub enum ScanError {
    #[snafu(display("Failed to walk directory tree {}", root.best_effort_path_display()))]
    WalkError {
        root: PathBuf,
        source: walkdir::Error,
    },
    #[snafu(display(
        "Walker returned {} which is not below {}",
        path.display(),
        root.display()
    ))]
    OutsideRootError { root: PathBuf, path: PathBuf },
}
