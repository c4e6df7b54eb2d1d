//! Version
//!
//! Version information for the CLI.

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn version_string() -> String {
    format!("descmap v{}", VERSION)
}
