mod error_kind;
mod log_level;
mod mode;

pub use error_kind::ErrorKind;
pub use log_level::LogLevel;
pub use mode::Mode;
