//! Backends that carry out changes: a logger and one backend per supported
//! version control system, all behind the same five-operation contract.

mod command_sink;
mod git_command;
mod log_command;
mod process;
mod svn_command;
mod working_copy;

pub use command_sink::{Backend, CommandError, CommandSink, VersionControl};
pub(crate) use command_sink::{CopyNewSnafu, CopyReplaceSnafu, CreateDirSnafu, ProcessSnafu};
pub use git_command::{GIT_MARKER_DIR, GitCommand};
pub use log_command::LogCommand;
pub use process::{ExternalCommand, ProcessError};
pub use svn_command::{SVN_MARKER_DIR, SvnCommand};
pub use working_copy::WorkingCopy;
