use crate::changes::ChangeKind;
use crate::commands::{CommandError, CommandSink};
use crate::console;
use crate::filesystem::RelativePath;

/// Prints each operation instead of performing it.
#[derive(Debug, Clone, Default)]
pub struct LogCommand;

impl LogCommand {
    fn log(&self, kind: ChangeKind, path: &RelativePath) -> Result<(), CommandError> {
        println!("{}", console::change_record(kind, path));
        Ok(())
    }
}

impl CommandSink for LogCommand {
    async fn add_dir(&self, path: &RelativePath) -> Result<(), CommandError> {
        self.log(ChangeKind::CreateDir, path)
    }

    async fn add_file(&self, path: &RelativePath) -> Result<(), CommandError> {
        self.log(ChangeKind::AddFile, path)
    }

    async fn modify_file(&self, path: &RelativePath) -> Result<(), CommandError> {
        self.log(ChangeKind::ModifyFile, path)
    }

    async fn remove_file(&self, path: &RelativePath) -> Result<(), CommandError> {
        self.log(ChangeKind::RemoveFile, path)
    }

    async fn remove_dir(&self, path: &RelativePath) -> Result<(), CommandError> {
        self.log(ChangeKind::RemoveDir, path)
    }
}
