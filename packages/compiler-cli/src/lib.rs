#![deny(clippy::all)]

/**
 * descmap CLI
 *
 * Turns `.desc` mapping descriptions into source map files.
 */
pub use descmap_compiler as compiler;

pub mod compile;
pub mod config;
pub mod perform_generate;
pub mod version;
