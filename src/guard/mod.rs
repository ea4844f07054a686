mod working_copy_guard;

pub use working_copy_guard::{GuardError, WorkingCopyGuard};
