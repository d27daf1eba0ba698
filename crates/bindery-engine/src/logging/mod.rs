//! Logging setup.
//!
//! The library only emits through the `log` facade. Binaries call
//! [`init_logging`] once to install `env_logger` as the backend.
//!
//! Target conventions:
//! - `trace`: every raw device call issued by the soft device
//! - `debug`: resource allocation and release
//! - `warn`: legal but suspicious usage (duplicate attribute names, dropping a
//!   capturing transform feedback)

mod init;

pub use init::{init_logging, LoggingConfig};
