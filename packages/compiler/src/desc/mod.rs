//! `.desc` Format
//!
//! A hand-editable description of a source map: inputs, the output file and
//! one line per mapping with 1-indexed absolute positions.

mod parser;
mod serializer;

pub use parser::parse_desc;
pub use serializer::serialize_desc;

use crate::error::MappingError;
use crate::output::mapping_encoder::Record;
use crate::output::name_table::NameTable;
use crate::output::source_map::SourceMap;

/// A mapping line together with its trailing `-- comment`, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescMapping {
    pub record: Record,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DescDocument {
    /// Input files in order of first appearance; mapping source indices are
    /// 1-based positions in this list.
    pub sources: Vec<String>,
    pub output_file: Option<String>,
    /// Generated code listed under `OUTPUT:`, without its indentation.
    pub output_content: Option<String>,
    /// `--` comments from the header.
    pub comments: Vec<String>,
    pub mappings: Vec<DescMapping>,
}

impl DescDocument {
    pub fn records(&self) -> Vec<Record> {
        self.mappings.iter().map(|m| m.record.clone()).collect()
    }

    /// Every name referenced by a mapping, sorted.
    pub fn names(&self) -> NameTable {
        NameTable::from_names(self.mappings.iter().filter_map(|m| match &m.record {
            Record::Segment(segment) => segment.name.as_deref(),
            Record::LineBreak => None,
        }))
    }

    pub fn to_source_map(&self) -> Result<SourceMap, MappingError> {
        SourceMap::from_records(
            self.output_file.clone(),
            self.sources.clone(),
            self.names().into_vec(),
            &self.records(),
        )
    }
}
