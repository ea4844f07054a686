mod file_fingerprint;

pub use file_fingerprint::{FingerprintError, drop_unchanged_modifications};
