use std::path::PathBuf;

use clap::{ArgGroup, Parser};

use crate::application::data::{LogLevel, Mode};

/// Replicate the state of a source directory tree to a target directory which
/// is under version control.
#[derive(Parser, Debug, Clone)]
#[command(version)]
#[command(group(ArgGroup::new("mode").required(true).args(["dry_run", "svn", "git"])))]
pub struct Cli {
    /// Dry run, perform no action, just show info
    #[clap(long, short)]
    pub dry_run: bool,

    /// Run SVN commands
    #[clap(long, short)]
    pub svn: bool,

    /// Run GIT commands
    #[clap(long, short)]
    pub git: bool,

    /// Do not copy files whose content is already identical in the destination
    #[clap(long)]
    pub skip_unchanged: bool,

    #[clap(long, short, default_value = "warn", value_enum)]
    pub log_level: LogLevel,

    /// Shorthand for `--log-level debug`
    #[clap(long, short)]
    pub verbose: bool,

    /// New content
    pub source: PathBuf,

    /// Existing VCS working copy
    pub destination: PathBuf,
}

impl Cli {
    pub fn mode(&self) -> Mode {
        if self.svn {
            Mode::Svn
        } else if self.git {
            Mode::Git
        } else {
            Mode::DryRun
        }
    }

    pub fn effective_log_level(&self) -> LogLevel {
        if self.verbose {
            LogLevel::Debug
        } else {
            self.log_level
        }
    }
}
