use std::path::PathBuf;

use snafu::Snafu;
use snafu::prelude::*;
use tracing::{debug, info};

use crate::application::data::{ErrorKind, Mode};
use crate::application::{InvocationError, RuntimeConfig};
use crate::changes::{Change, ChangeSet};
use crate::cli::Cli;
use crate::commands::{
    Backend, CommandError, CommandSink, GitCommand, LogCommand, ProcessError, SvnCommand,
    WorkingCopy,
};
use crate::console;
use crate::filesystem::{ScanError, TreeInventory};
use crate::fingerprint::{FingerprintError, drop_unchanged_modifications};
use crate::guard::{GuardError, WorkingCopyGuard};

pub struct Application;

impl Application {
    pub async fn run(cli: Cli) -> Result<ChangeSet, ApplicationError> {
        let config = RuntimeConfig::try_from(cli).context(InvocationSnafu)?;
        debug!("Resolved runtime config: {:?}", config);
        Self::execute(&config).await
    }

    /// Checks the destination, computes the changes and applies them to every
    /// backend in order. Stops at the first failure; changes already applied
    /// stay in place.
    pub async fn execute(config: &RuntimeConfig) -> Result<ChangeSet, ApplicationError> {
        let backends = Self::create_backends(config).await?;

        console::print_run_header(config.mode, &config.source, &config.destination);

        let source = TreeInventory::scan(&config.source, true).context(ScanSnafu {
            root: config.source.clone(),
        })?;
        for dir in source.ignored_empty_directories() {
            console::print_ignored_empty_directory(dir);
        }
        let destination = TreeInventory::scan(&config.destination, false).context(ScanSnafu {
            root: config.destination.clone(),
        })?;

        let mut change_set = ChangeSet::compute(&source, &destination);
        if config.skip_unchanged {
            change_set =
                drop_unchanged_modifications(change_set, &config.source, &config.destination)
                    .await
                    .context(FingerprintSnafu)?;
        }

        info!(
            "Applying {} changes to {} backends",
            change_set.len(),
            backends.len()
        );
        for change in &change_set {
            for backend in &backends {
                backend.apply(change).await.context(ApplySnafu {
                    change: change.clone(),
                    backend: backend.name(),
                })?;
            }
        }

        Ok(change_set)
    }

    /// The logging backend always comes first, followed by the version
    /// control backend of the selected mode once its working copy checks out.
    async fn create_backends(config: &RuntimeConfig) -> Result<Vec<Backend>, ApplicationError> {
        let working_copy = WorkingCopy::new(&config.source, &config.destination);
        let mut backends = vec![Backend::Log(LogCommand)];

        match config.mode {
            Mode::DryRun => {}
            Mode::Svn => {
                let svn = SvnCommand::new(working_copy);
                WorkingCopyGuard::verify(&svn)
                    .await
                    .context(WorkingCopySnafu)?;
                backends.push(Backend::Svn(svn));
            }
            Mode::Git => {
                let git = GitCommand::new(working_copy);
                WorkingCopyGuard::verify(&git)
                    .await
                    .context(WorkingCopySnafu)?;
                backends.push(Backend::Git(git));
            }
        }

        Ok(backends)
    }
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Invalid invocation"))]
    InvocationError { source: InvocationError },
    #[snafu(display("Destination failed the working copy checks"))]
    WorkingCopyError { source: GuardError },
    #[snafu(display("Failed to scan {}", root.display()))]
    ScanError { root: PathBuf, source: ScanError },
    #[snafu(display("Failed to compare file contents"))]
    FingerprintError { source: FingerprintError },
    #[snafu(display("Backend '{}' failed to apply {}", backend, change))]
    ApplyError {
        change: Change,
        backend: &'static str,
        source: CommandError,
    },
}

impl ApplicationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApplicationError::InvocationError { .. } => ErrorKind::InvalidInvocation,
            ApplicationError::WorkingCopyError { source } => match source {
                GuardError::StatusQueryError { .. } => ErrorKind::ExternalCommand,
                _ => ErrorKind::Precondition,
            },
            ApplicationError::ScanError { .. } | ApplicationError::FingerprintError { .. } => {
                ErrorKind::Io
            }
            ApplicationError::ApplyError { source, .. } => match source {
                CommandError::ProcessError { .. } => ErrorKind::ExternalCommand,
                _ => ErrorKind::Io,
            },
        }
    }

    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            ApplicationError::InvocationError { source } => match source {
                InvocationError::InvalidSourceError { .. } => 2,
                InvocationError::InvalidDestinationError { .. } => 3,
            },
            ApplicationError::WorkingCopyError { source } => match source {
                GuardError::NotUnderVersionControlError { .. } => 24,
                GuardError::NotCleanError { .. } => 25,
                GuardError::StatusQueryError { source } => match source {
                    ProcessError::SpawnError { .. } | ProcessError::WaitError { .. } => 14,
                    _ => process_exit_code(source),
                },
            },
            ApplicationError::ScanError { .. } => 29,
            ApplicationError::FingerprintError { .. } => 30,
            ApplicationError::ApplyError { source, .. } => match source {
                CommandError::CopyNewError { .. } => 21,
                CommandError::CopyReplaceError { .. } => 22,
                CommandError::CreateDirError { .. } => 23,
                CommandError::ProcessError { source } => process_exit_code(source),
            },
        }
    }
}

fn process_exit_code(error: &ProcessError) -> u8 {
    match error {
        ProcessError::SpawnError { .. } | ProcessError::WaitError { .. } => 11,
        ProcessError::UnsuccessfulExecution { .. } => 12,
        ProcessError::UnsuccessfulQuery { .. } => 13,
    }
}
