//! Logging bootstrap (env_logger-backed).

mod init;

pub use init::{LoggingConfig, init_logging};
