use derive_more::Display;

/// What a run does with the computed changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Mode {
    /// Only print the changes.
    #[display("DRY-RUN")]
    DryRun,
    /// Apply the changes to a Subversion working copy.
    #[display("RUN SVN")]
    Svn,
    /// Apply the changes to a Git working copy.
    #[display("RUN GIT")]
    Git,
}
