/// Broad categories of fatal errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad options or paths, detected before anything is scanned.
    InvalidInvocation,
    /// The destination is not a clean working copy.
    Precondition,
    /// Reading a tree or copying a file failed.
    Io,
    /// A version control command could not run or returned non-zero.
    ExternalCommand,
}
