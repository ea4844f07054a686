//! Filesystem inventories of the source and destination trees.
//!
//! A scan turns a root directory into two ordered sets of paths relative to
//! that root, one for directories and one for everything else. Those sets are
//! the join keys the change computation works on.

mod relative_path;
mod tree;

pub use relative_path::RelativePath;
pub use tree::{ScanError, TreeInventory};
