use std::io;
use std::path::{Path, PathBuf};

use compio::fs;
use filetime::FileTime;
use snafu::ResultExt;

use crate::commands::{
    CommandError, CopyNewSnafu, CopyReplaceSnafu, CreateDirSnafu, ExternalCommand, ProcessSnafu,
};
use crate::filesystem::RelativePath;

/// The pair of roots a version control backend works between. Commands run
/// with the destination root as their working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkingCopy {
    source_root: PathBuf,
    destination_root: PathBuf,
}

impl WorkingCopy {
    pub fn new(source_root: impl Into<PathBuf>, destination_root: impl Into<PathBuf>) -> Self {
        Self {
            source_root: source_root.into(),
            destination_root: destination_root.into(),
        }
    }

    pub fn destination_root(&self) -> &Path {
        &self.destination_root
    }

    pub async fn run(&self, command: ExternalCommand) -> Result<(), CommandError> {
        command
            .run(&self.destination_root)
            .await
            .context(ProcessSnafu)
    }

    /// Copies a file that does not exist in the destination yet.
    pub fn copy_new(&self, path: &RelativePath) -> Result<(), CommandError> {
        let from = path.under(&self.source_root);
        let to = path.under(&self.destination_root);
        copy_with_attributes(&from, &to, false).context(CopyNewSnafu { from, to })
    }

    /// Copies a file over its existing destination counterpart.
    pub fn copy_replace(&self, path: &RelativePath) -> Result<(), CommandError> {
        let from = path.under(&self.source_root);
        let to = path.under(&self.destination_root);
        copy_with_attributes(&from, &to, true).context(CopyReplaceSnafu { from, to })
    }

    /// Creates a single plain directory; its parent must already exist.
    pub async fn create_dir(&self, path: &RelativePath) -> Result<(), CommandError> {
        let dir = path.under(&self.destination_root);
        fs::create_dir(&dir).await.context(CreateDirSnafu { path: dir })
    }
}

/// Copies content and permissions, then carries over the modification time.
fn copy_with_attributes(from: &Path, to: &Path, overwrite: bool) -> io::Result<()> {
    match to.symlink_metadata() {
        Ok(_) if !overwrite => {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                "destination file already exists",
            ));
        }
        Ok(metadata) if !metadata.is_dir() => std::fs::remove_file(to)?,
        _ => {}
    }

    std::fs::copy(from, to)?;
    let metadata = std::fs::metadata(from)?;
    filetime::set_file_mtime(to, FileTime::from_last_modification_time(&metadata))
}
