use std::ffi::OsString;

use crate::commands::{CommandError, CommandSink, ExternalCommand, VersionControl, WorkingCopy};
use crate::filesystem::RelativePath;

const SVN: &str = "svn";
pub const SVN_MARKER_DIR: &str = ".svn";

/// Subversion backend. Every structural change goes through an `svn`
/// command; modified files are only copied, `svn commit` picks them up.
#[derive(Debug, Clone)]
pub struct SvnCommand {
    working_copy: WorkingCopy,
}

impl SvnCommand {
    pub fn new(working_copy: WorkingCopy) -> Self {
        Self { working_copy }
    }

    fn subcommand(&self, subcommand: &str, path: &RelativePath) -> ExternalCommand {
        ExternalCommand::new(SVN)
            .args([subcommand, "--"])
            .arg(path_argument(path))
    }
}

/// svn reads everything after the last `@` as a peg revision, so a path
/// containing `@` gets an empty one appended.
fn path_argument(path: &RelativePath) -> OsString {
    let mut argument = path.as_path().as_os_str().to_os_string();
    if argument.as_encoded_bytes().contains(&b'@') {
        argument.push("@");
    }
    argument
}

impl VersionControl for SvnCommand {
    fn name(&self) -> &'static str {
        "SVN"
    }

    fn marker_dir_name(&self) -> &'static str {
        SVN_MARKER_DIR
    }

    fn status_command(&self) -> ExternalCommand {
        ExternalCommand::new(SVN).arg("status")
    }

    fn working_copy(&self) -> &WorkingCopy {
        &self.working_copy
    }
}

impl CommandSink for SvnCommand {
    async fn add_dir(&self, path: &RelativePath) -> Result<(), CommandError> {
        self.working_copy
            .run(self.subcommand("mkdir", path))
            .await
    }

    async fn add_file(&self, path: &RelativePath) -> Result<(), CommandError> {
        self.working_copy.copy_new(path)?;
        self.working_copy.run(self.subcommand("add", path)).await
    }

    async fn modify_file(&self, path: &RelativePath) -> Result<(), CommandError> {
        self.working_copy.copy_replace(path)
    }

    async fn remove_file(&self, path: &RelativePath) -> Result<(), CommandError> {
        self.working_copy
            .run(self.subcommand("remove", path))
            .await
    }

    async fn remove_dir(&self, path: &RelativePath) -> Result<(), CommandError> {
        self.working_copy
            .run(self.subcommand("remove", path))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    fn svn() -> SvnCommand {
        SvnCommand::new(WorkingCopy::new("/src", "/dst"))
    }

    #[rstest]
    #[case("mkdir", "a/b", "svn mkdir -- a/b")]
    #[case("add", "a/b/testfile", "svn add -- a/b/testfile")]
    #[case("remove", "-dashed", "svn remove -- -dashed")]
    #[case("add", "img/logo@2x.png", "svn add -- img/logo@2x.png@")]
    #[case("mkdir", "v@1", "svn mkdir -- v@1@")]
    #[case("remove", "@", "svn remove -- @@")]
    fn subcommands_separate_paths_from_options(
        #[case] subcommand: &str,
        #[case] path: &str,
        #[case] expected: &str,
    ) {
        let command = svn().subcommand(subcommand, &RelativePath::from(path));
        assert_eq!(command.command_line(), expected);
    }

    #[test]
    fn status_query_and_marker() {
        assert_eq!(svn().status_command().command_line(), "svn status");
        assert_eq!(svn().marker_dir_name(), ".svn");
    }

    #[compio::test]
    async fn modify_file_only_copies() {
        let source = TempDir::new().unwrap();
        let destination = TempDir::new().unwrap();
        std::fs::write(source.path().join("page"), "new").unwrap();
        std::fs::write(destination.path().join("page"), "old").unwrap();
        let svn = SvnCommand::new(WorkingCopy::new(source.path(), destination.path()));

        svn.modify_file(&RelativePath::from("page")).await.unwrap();

        assert_eq!(
            std::fs::read_to_string(destination.path().join("page")).unwrap(),
            "new"
        );
    }
}
