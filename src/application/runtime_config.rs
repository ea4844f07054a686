use std::path::{Path, PathBuf};

use snafu::{OptionExt, Snafu};

use crate::application::data::Mode;
use crate::cli::Cli;
use crate::ext::absolute_normalized;

/// Everything a run needs, with both roots resolved to absolute, normalized
/// directory paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub mode: Mode,
    pub source: PathBuf,
    pub destination: PathBuf,
    pub skip_unchanged: bool,
}

impl RuntimeConfig {
    pub fn new(mode: Mode, source: &Path, destination: &Path) -> Result<Self, InvocationError> {
        let source = resolve_dir(source).context(InvalidSourceSnafu { path: source })?;
        let destination =
            resolve_dir(destination).context(InvalidDestinationSnafu { path: destination })?;
        Ok(Self {
            mode,
            source,
            destination,
            skip_unchanged: false,
        })
    }

    pub fn with_skip_unchanged(mut self, skip_unchanged: bool) -> Self {
        self.skip_unchanged = skip_unchanged;
        self
    }
}

impl TryFrom<Cli> for RuntimeConfig {
    type Error = InvocationError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        Ok(Self::new(cli.mode(), &cli.source, &cli.destination)?
            .with_skip_unchanged(cli.skip_unchanged))
    }
}

fn resolve_dir(path: &Path) -> Option<PathBuf> {
    absolute_normalized(path).ok().filter(|dir| dir.is_dir())
}

#[derive(Debug, Snafu)]
pub enum InvocationError {
    #[snafu(display("Source directory {} is invalid!", path.display()))]
    InvalidSourceError { path: PathBuf },
    #[snafu(display("Destination directory {} is invalid!", path.display()))]
    InvalidDestinationError { path: PathBuf },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    #[test]
    fn roots_are_resolved_and_normalized() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        std::fs::create_dir_all(temp_dir.path().join("src")).unwrap();
        std::fs::create_dir_all(temp_dir.path().join("dst")).unwrap();

        let config = RuntimeConfig::new(
            Mode::DryRun,
            &temp_dir.path().join("dst/../src/."),
            &temp_dir.path().join("dst"),
        )
        .unwrap();

        assert_eq!(config.source, temp_dir.path().join("src"));
        assert_eq!(config.destination, temp_dir.path().join("dst"));
        assert!(!config.skip_unchanged);
    }

    #[test]
    fn missing_source_is_reported_first() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");

        let result = RuntimeConfig::new(
            Mode::Git,
            &temp_dir.path().join("missing-src"),
            &temp_dir.path().join("missing-dst"),
        );

        assert!(matches!(
            result,
            Err(InvocationError::InvalidSourceError { .. })
        ));
    }

    #[test]
    fn file_as_destination_is_rejected() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let file = temp_dir.path().join("file.txt");
        std::fs::write(&file, "").unwrap();

        let result = RuntimeConfig::new(Mode::Svn, temp_dir.path(), &file);

        assert!(matches!(
            result,
            Err(InvocationError::InvalidDestinationError { .. })
        ));
    }

    #[test]
    fn cli_arguments_are_carried_over() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path().to_str().unwrap();
        let cli = Cli::parse_from(["wcsync", "--git", "--skip-unchanged", root, root]);

        let config = RuntimeConfig::try_from(cli).unwrap();

        assert_eq!(config.mode, Mode::Git);
        assert!(config.skip_unchanged);
    }
}
