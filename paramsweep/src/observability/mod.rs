//! Logging setup for sweep runs.
//!
//! The library logs through `tracing`; binaries call [`init_logging`] once
//! to install a subscriber.

mod logging;

pub use logging::{env_filter, init_logging, level_for_verbosity, LogFormat};
