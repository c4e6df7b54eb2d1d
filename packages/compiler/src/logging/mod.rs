//! Logging
//!
//! Minimal leveled logging, passed around as `&dyn Logger`.

mod console_logger;
mod logger;

pub use console_logger::ConsoleLogger;
pub use logger::{LogLevel, Logger, NullLogger};
