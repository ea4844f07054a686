use std::ffi::{OsStr, OsString};
use std::path::Path;
use std::process::Stdio;

use compio::process::Command;
use snafu::{ResultExt, Snafu, ensure};
use tracing::debug;

/// An external program with its argument vector. Arguments are passed to the
/// program as-is, no shell is involved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalCommand {
    program: &'static str,
    args: Vec<OsString>,
}

impl ExternalCommand {
    pub fn new(program: &'static str) -> Self {
        Self {
            program,
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|arg| arg.as_ref().to_os_string()));
        self
    }

    /// The command line as shown in messages, e.g. `git add -- docs/index.html`.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.to_string())
            .chain(self.args.iter().map(|arg| arg.to_string_lossy().into_owned()))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Runs a mutating command in `working_dir`, passing its output through
    /// to the console.
    pub async fn run(&self, working_dir: &Path) -> Result<(), ProcessError> {
        let mut cmd = self.create_command(working_dir);
        let _ = cmd.stdout(Stdio::inherit());
        let _ = cmd.stderr(Stdio::inherit());

        debug!("Running '{}' in {}", self.command_line(), working_dir.display());
        let handle = cmd.spawn().context(SpawnSnafu {
            command_line: self.command_line(),
        })?;
        let status = handle.wait().await.context(WaitSnafu {
            command_line: self.command_line(),
        })?;

        ensure!(
            status.success(),
            UnsuccessfulExecutionSnafu {
                command_line: self.command_line(),
                status: status.code().unwrap_or(-1),
            }
        );
        Ok(())
    }

    /// Runs a query in `working_dir` and returns what it printed to stdout.
    /// Its stderr is passed through to the console.
    pub async fn read_output(&self, working_dir: &Path) -> Result<String, ProcessError> {
        let mut cmd = self.create_command(working_dir);
        let _ = cmd.stdin(Stdio::null());
        let _ = cmd.stdout(Stdio::piped());
        let _ = cmd.stderr(Stdio::inherit());

        debug!("Querying '{}' in {}", self.command_line(), working_dir.display());
        let handle = cmd.spawn().context(SpawnSnafu {
            command_line: self.command_line(),
        })?;
        let output = handle.wait_with_output().await.context(WaitSnafu {
            command_line: self.command_line(),
        })?;

        ensure!(
            output.status.success(),
            UnsuccessfulQuerySnafu {
                command_line: self.command_line(),
                status: output.status.code().unwrap_or(-1),
            }
        );
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn create_command(&self, working_dir: &Path) -> Command {
        let mut cmd = Command::new(self.program);
        cmd.args(&self.args);
        cmd.current_dir(working_dir);
        cmd
    }
}

#[derive(Debug, Snafu)]
pub enum ProcessError {
    #[snafu(display("Failed to spawn command '{}'", command_line))]
    SpawnError {
        command_line: String,
        source: std::io::Error,
    },
    #[snafu(display("Failed to wait for command '{}'", command_line))]
    WaitError {
        command_line: String,
        source: std::io::Error,
    },
    #[snafu(display("Error code {} returned by system command '{}'", status, command_line))]
    UnsuccessfulExecution { command_line: String, status: i32 },
    #[snafu(display("Error code {} returned by status query '{}'", status, command_line))]
    UnsuccessfulQuery { command_line: String, status: i32 },
}
