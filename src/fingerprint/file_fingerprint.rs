use std::collections::HashSet;
use std::hash::Hasher;
use std::path::{Path, PathBuf};

use compio::fs;
use metrohash::MetroHash128;
use snafu::{ResultExt, Snafu, ensure};
use tracing::debug;

use crate::changes::{ChangeKind, ChangeSet};
use crate::ext::BestEffortPathExt;

/// Length and content digest of a regular file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileFingerprint {
    len: u64,
    digest: (u64, u64),
}

impl FileFingerprint {
    pub async fn of(path: &Path) -> Result<Self, FingerprintError> {
        let metadata = path.metadata().context(PathSnafu {
            path: path.to_path_buf(),
        })?;
        ensure!(
            !metadata.is_dir(),
            DirectorySnafu {
                path: path.to_path_buf(),
            }
        );

        let bytes = fs::read(path).await.context(PathSnafu {
            path: path.to_path_buf(),
        })?;

        let mut hasher = MetroHash128::default();
        hasher.write(&bytes);

        Ok(Self {
            len: bytes.len() as u64,
            digest: hasher.finish128(),
        })
    }
}

/// Removes modifications of files whose content is identical in both trees.
pub async fn drop_unchanged_modifications(
    change_set: ChangeSet,
    source_root: &Path,
    destination_root: &Path,
) -> Result<ChangeSet, FingerprintError> {
    let mut unchanged = HashSet::new();

    for change in change_set
        .iter()
        .filter(|c| c.kind() == ChangeKind::ModifyFile)
    {
        let source = change.path().under(source_root);
        let destination = change.path().under(destination_root);

        let same_len = source.metadata().map(|m| m.len()).ok()
            == destination.metadata().map(|m| m.len()).ok();
        if same_len
            && FileFingerprint::of(&source).await? == FileFingerprint::of(&destination).await?
        {
            debug!("Skipping unchanged file {}", change.path());
            unchanged.insert(change.path().clone());
        }
    }

    Ok(change_set
        .filtered(|c| !(c.kind() == ChangeKind::ModifyFile && unchanged.contains(c.path()))))
}

#[derive(Debug, Snafu)]
pub enum FingerprintError {
    #[snafu(display("Failed to fingerprint {}", path.best_effort_path_display()))]
    PathError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Cannot fingerprint {}: it is a directory", path.best_effort_path_display()))]
    DirectoryError { path: PathBuf },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::changes::Change;
    use crate::filesystem::{RelativePath, TreeInventory};
    use rstest::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[compio::test]
    async fn fingerprint_of_directory_is_rejected() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");

        let result = FileFingerprint::of(temp_dir.path()).await;

        match result.unwrap_err() {
            FingerprintError::DirectoryError { path } => assert_eq!(path, temp_dir.path()),
            other => panic!("Expected DirectoryError, got {other:?}"),
        }
    }

    #[compio::test]
    async fn fingerprint_of_missing_file_is_path_error() {
        let missing = Path::new("/this/path/does/not/exist.txt");

        let result = FileFingerprint::of(missing).await;

        assert!(matches!(result, Err(FingerprintError::PathError { .. })));
    }

    #[rstest]
    #[case("hello world", "hello world", true)]
    #[case("", "", true)]
    #[case("special chars: äöü🚀", "special chars: äöü🚀", true)]
    #[case("hello world", "hello World", false)]
    #[case("short", "longer content", false)]
    #[compio::test]
    async fn fingerprints_match_only_for_identical_content(
        #[case] first: &str,
        #[case] second: &str,
        #[case] expected: bool,
    ) {
        let mut file1 = NamedTempFile::new().expect("Failed to create temp file 1");
        let mut file2 = NamedTempFile::new().expect("Failed to create temp file 2");
        write!(file1, "{first}").unwrap();
        write!(file2, "{second}").unwrap();

        let fingerprint1 = FileFingerprint::of(file1.path()).await.unwrap();
        let fingerprint2 = FileFingerprint::of(file2.path()).await.unwrap();

        assert_eq!(fingerprint1 == fingerprint2, expected);
    }

    #[compio::test]
    async fn unchanged_modifications_are_dropped() {
        let source = TempDir::new().unwrap();
        let destination = TempDir::new().unwrap();
        for (name, src, dst) in [("same", "equal", "equal"), ("changed", "new", "old")] {
            std::fs::write(source.path().join(name), src).unwrap();
            std::fs::write(destination.path().join(name), dst).unwrap();
        }
        std::fs::write(source.path().join("added"), "x").unwrap();
        let change_set = ChangeSet::compute(
            &TreeInventory::scan(source.path(), true).unwrap(),
            &TreeInventory::scan(destination.path(), false).unwrap(),
        );

        let result = drop_unchanged_modifications(change_set, source.path(), destination.path())
            .await
            .unwrap();

        assert_eq!(
            result.iter().cloned().collect::<Vec<_>>(),
            vec![
                Change::new(RelativePath::from("added"), ChangeKind::AddFile),
                Change::new(RelativePath::from("changed"), ChangeKind::ModifyFile),
            ]
        );
    }
}
