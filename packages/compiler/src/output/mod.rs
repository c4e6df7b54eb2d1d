//! Output Module
//!
//! Source map encoding: VLQ digits, the name table, the delta-state mapping
//! encoder and the document it feeds.

pub mod mapping_encoder;
pub mod name_table;
pub mod source_map;
pub mod vlq;

pub use mapping_encoder::{encode_mappings, EncoderState, Record, Segment, SourcePosition};
pub use name_table::NameTable;
pub use source_map::{SourceMap, SourceMapGenerator};
pub use vlq::{decode_vlq, decode_vlq_segment, encode_vlq, encode_vlq_into};
