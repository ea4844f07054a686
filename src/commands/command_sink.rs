use std::path::PathBuf;

use snafu::Snafu;

use crate::changes::{Change, ChangeKind};
use crate::commands::{
    ExternalCommand, GitCommand, LogCommand, ProcessError, SvnCommand, WorkingCopy,
};
use crate::ext::BestEffortPathExt;
use crate::filesystem::RelativePath;

/// The five operations every backend knows how to perform.
pub trait CommandSink {
    /// Adds a directory present in the source but not in the destination.
    async fn add_dir(&self, path: &RelativePath) -> Result<(), CommandError>;
    /// Adds a file present in the source but not in the destination.
    async fn add_file(&self, path: &RelativePath) -> Result<(), CommandError>;
    /// Updates a file present in both trees.
    async fn modify_file(&self, path: &RelativePath) -> Result<(), CommandError>;
    /// Removes a file present in the destination but not in the source.
    async fn remove_file(&self, path: &RelativePath) -> Result<(), CommandError>;
    /// Removes a directory present in the destination but not in the source.
    async fn remove_dir(&self, path: &RelativePath) -> Result<(), CommandError>;

    async fn apply(&self, change: &Change) -> Result<(), CommandError> {
        let path = change.path();
        match change.kind() {
            ChangeKind::CreateDir => self.add_dir(path).await,
            ChangeKind::AddFile => self.add_file(path).await,
            ChangeKind::ModifyFile => self.modify_file(path).await,
            ChangeKind::RemoveFile => self.remove_file(path).await,
            ChangeKind::RemoveDir => self.remove_dir(path).await,
        }
    }
}

/// A version control system a destination tree can be tracked by.
pub trait VersionControl {
    /// Display name used in messages.
    fn name(&self) -> &'static str;
    /// Metadata directory marking a working copy, e.g. `.git`.
    fn marker_dir_name(&self) -> &'static str;
    /// Query whose empty output means the working copy has no local changes.
    fn status_command(&self) -> ExternalCommand;
    fn working_copy(&self) -> &WorkingCopy;
}

/// The backends a run can dispatch to.
#[derive(Debug, Clone)]
pub enum Backend {
    Log(LogCommand),
    Svn(SvnCommand),
    Git(GitCommand),
}

impl Backend {
    pub fn name(&self) -> &'static str {
        match self {
            Backend::Log(_) => "log",
            Backend::Svn(svn) => svn.name(),
            Backend::Git(git) => git.name(),
        }
    }
}

impl CommandSink for Backend {
    async fn add_dir(&self, path: &RelativePath) -> Result<(), CommandError> {
        match self {
            Backend::Log(log) => log.add_dir(path).await,
            Backend::Svn(svn) => svn.add_dir(path).await,
            Backend::Git(git) => git.add_dir(path).await,
        }
    }

    async fn add_file(&self, path: &RelativePath) -> Result<(), CommandError> {
        match self {
            Backend::Log(log) => log.add_file(path).await,
            Backend::Svn(svn) => svn.add_file(path).await,
            Backend::Git(git) => git.add_file(path).await,
        }
    }

    async fn modify_file(&self, path: &RelativePath) -> Result<(), CommandError> {
        match self {
            Backend::Log(log) => log.modify_file(path).await,
            Backend::Svn(svn) => svn.modify_file(path).await,
            Backend::Git(git) => git.modify_file(path).await,
        }
    }

    async fn remove_file(&self, path: &RelativePath) -> Result<(), CommandError> {
        match self {
            Backend::Log(log) => log.remove_file(path).await,
            Backend::Svn(svn) => svn.remove_file(path).await,
            Backend::Git(git) => git.remove_file(path).await,
        }
    }

    async fn remove_dir(&self, path: &RelativePath) -> Result<(), CommandError> {
        match self {
            Backend::Log(log) => log.remove_dir(path).await,
            Backend::Svn(svn) => svn.remove_dir(path).await,
            Backend::Git(git) => git.remove_dir(path).await,
        }
    }
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum CommandError {
    #[snafu(display(
        "Failed to copy new file {} to {}",
        from.best_effort_path_display(),
        to.best_effort_path_display()
    ))]
    CopyNewError {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display(
        "Failed to copy changed file {} over {}",
        from.best_effort_path_display(),
        to.best_effort_path_display()
    ))]
    CopyReplaceError {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Failed to create directory {}", path.best_effort_path_display()))]
    CreateDirError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Version control command failed"))]
    ProcessError { source: ProcessError },
}
