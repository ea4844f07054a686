use tracing::debug;

use crate::commands::{CommandError, CommandSink, ExternalCommand, VersionControl, WorkingCopy};
use crate::filesystem::RelativePath;

const GIT: &str = "git";
pub const GIT_MARKER_DIR: &str = ".git";

/// Git backend. Directories are not tracked by git, so they are created on
/// disk only and vanish by themselves once their last file is removed.
#[derive(Debug, Clone)]
pub struct GitCommand {
    working_copy: WorkingCopy,
}

impl GitCommand {
    pub fn new(working_copy: WorkingCopy) -> Self {
        Self { working_copy }
    }

    fn subcommand(&self, subcommand: &str, path: &RelativePath) -> ExternalCommand {
        ExternalCommand::new(GIT).args([subcommand, "--"]).arg(path)
    }
}

impl VersionControl for GitCommand {
    fn name(&self) -> &'static str {
        "GIT"
    }

    fn marker_dir_name(&self) -> &'static str {
        GIT_MARKER_DIR
    }

    fn status_command(&self) -> ExternalCommand {
        ExternalCommand::new(GIT).args(["status", "--porcelain"])
    }

    fn working_copy(&self) -> &WorkingCopy {
        &self.working_copy
    }
}

impl CommandSink for GitCommand {
    async fn add_dir(&self, path: &RelativePath) -> Result<(), CommandError> {
        self.working_copy.create_dir(path).await
    }

    async fn add_file(&self, path: &RelativePath) -> Result<(), CommandError> {
        self.working_copy.copy_new(path)?;
        self.working_copy.run(self.subcommand("add", path)).await
    }

    async fn modify_file(&self, path: &RelativePath) -> Result<(), CommandError> {
        self.working_copy.copy_replace(path)?;
        self.working_copy.run(self.subcommand("add", path)).await
    }

    async fn remove_file(&self, path: &RelativePath) -> Result<(), CommandError> {
        self.working_copy.run(self.subcommand("rm", path)).await
    }

    async fn remove_dir(&self, path: &RelativePath) -> Result<(), CommandError> {
        debug!("Leaving removal of directory {} to git", path);
        Ok(())
    }
}
