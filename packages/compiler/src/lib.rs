#![deny(clippy::all)]

/**
 * descmap compiler
 *
 * Builds version 3 source maps from 1-indexed mapping records.
 */
pub mod desc;
pub mod error;
pub mod logging;
pub mod output;

pub use desc::{parse_desc, serialize_desc, DescDocument, DescMapping};
pub use error::{DescParseError, GeneratorError, MappingError};
pub use output::{encode_mappings, NameTable, Record, Segment, SourceMap, SourcePosition};
