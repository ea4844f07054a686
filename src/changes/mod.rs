//! Elementary operations that turn a destination tree into a copy of the
//! source tree, and the order in which they can be applied safely.

mod change;
mod change_set;

pub use change::{Change, ChangeKind};
pub use change_set::ChangeSet;
