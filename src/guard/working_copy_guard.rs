use std::path::{Path, PathBuf};

use snafu::{OptionExt, ResultExt, Snafu, ensure};
use tracing::{debug, info};

use crate::commands::{ProcessError, VersionControl};
use crate::ext::BestEffortPathExt;

/// Preconditions of a run against a version controlled destination.
pub struct WorkingCopyGuard;

impl WorkingCopyGuard {
    /// Checks that the destination belongs to a working copy of `vcs` and that
    /// the working copy has no local modifications. Nothing is written.
    pub async fn verify(vcs: &impl VersionControl) -> Result<(), GuardError> {
        let destination = vcs.working_copy().destination_root();
        let marker = vcs.marker_dir_name();

        let root = find_working_copy_root(destination, marker).context(
            NotUnderVersionControlSnafu {
                destination: destination.to_path_buf(),
                vcs: vcs.name(),
            },
        )?;
        debug!("Found {} working copy at {}", vcs.name(), root.display());

        let status = vcs
            .status_command()
            .read_output(destination)
            .await
            .context(StatusQuerySnafu)?;
        ensure!(
            status.trim().is_empty(),
            NotCleanSnafu {
                destination: destination.to_path_buf(),
                status,
            }
        );

        info!("{} working copy {} is clean", vcs.name(), destination.display());
        Ok(())
    }
}

/// Returns the nearest directory, starting at `dir` and walking up to the
/// filesystem root, that contains the `marker` subdirectory.
pub fn find_working_copy_root(dir: &Path, marker: &str) -> Option<PathBuf> {
    dir.ancestors()
        .find(|ancestor| ancestor.join(marker).is_dir())
        .map(Path::to_path_buf)
}

#[derive(Debug, Snafu)]
pub enum GuardError {
    #[snafu(display(
        "Destination directory {} is not under {} version control",
        destination.best_effort_path_display(),
        vcs
    ))]
    NotUnderVersionControlError {
        destination: PathBuf,
        vcs: &'static str,
    },
    #[snafu(display(
        "Working copy {} is not clean! Please commit or revert changes first:\n{}",
        destination.best_effort_path_display(),
        status.trim_end()
    ))]
    NotCleanError { destination: PathBuf, status: String },
    #[snafu(display("Failed to query working copy status"))]
    StatusQueryError { source: ProcessError },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{GitCommand, SvnCommand, WorkingCopy};
    use crate::test_support::{commit_all, git_available, init_repository};
    use tempfile::TempDir;

    #[test]
    fn working_copy_root_is_found_in_ancestors() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        std::fs::create_dir_all(temp_dir.path().join(".svn")).unwrap();
        let nested = temp_dir.path().join("trunk/docs");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(
            find_working_copy_root(&nested, ".svn"),
            Some(temp_dir.path().to_path_buf())
        );
        assert_eq!(find_working_copy_root(&nested, ".hg"), None);
    }

    #[test]
    fn marker_file_does_not_count() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        std::fs::write(temp_dir.path().join(".svn"), "").unwrap();

        assert_eq!(find_working_copy_root(temp_dir.path(), ".svn"), None);
    }

    #[compio::test]
    async fn unversioned_destination_is_rejected_before_any_query() {
        let destination = TempDir::new().unwrap();
        let svn = SvnCommand::new(WorkingCopy::new("/src", destination.path()));

        let result = WorkingCopyGuard::verify(&svn).await;

        assert!(matches!(
            result,
            Err(GuardError::NotUnderVersionControlError { vcs: "SVN", .. })
        ));
    }

    #[compio::test]
    async fn broken_working_copy_fails_status_query() {
        let destination = TempDir::new().unwrap();
        std::fs::create_dir(destination.path().join(".svn")).unwrap();
        let svn = SvnCommand::new(WorkingCopy::new("/src", destination.path()));

        let result = WorkingCopyGuard::verify(&svn).await;

        assert!(matches!(result, Err(GuardError::StatusQueryError { .. })));
    }

    #[compio::test]
    async fn clean_git_working_copy_passes() {
        if !git_available() {
            return;
        }
        let destination = TempDir::new().unwrap();
        init_repository(destination.path());
        std::fs::write(destination.path().join("tracked.txt"), "tracked").unwrap();
        commit_all(destination.path());
        let git = GitCommand::new(WorkingCopy::new("/src", destination.path()));

        WorkingCopyGuard::verify(&git).await.unwrap();
    }

    #[compio::test]
    async fn dirty_git_working_copy_is_rejected() {
        if !git_available() {
            return;
        }
        let destination = TempDir::new().unwrap();
        init_repository(destination.path());
        std::fs::write(destination.path().join("pending.txt"), "pending").unwrap();
        let git = GitCommand::new(WorkingCopy::new("/src", destination.path()));

        let result = WorkingCopyGuard::verify(&git).await;

        match result {
            Err(GuardError::NotCleanError { status, .. }) => {
                assert!(status.contains("pending.txt"))
            }
            other => panic!("Expected NotCleanError, got {other:?}"),
        }
    }
}
