//! Source Map Module
//!
//! The version 3 source map document and a generator that builds one from
//! mappings added in output order.

use super::mapping_encoder::{encode_mappings, Record, Segment, SourcePosition};
use super::name_table::NameTable;
use crate::error::{GeneratorError, MappingError};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

// https://docs.google.com/document/d/1U1RGAehQwRypUTovF1KRlpiOFze0b-_2gc6fAH0KY0k/edit
pub const VERSION: u32 = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceMap {
    pub version: u32,
    pub file: String,
    #[serde(rename = "sourceRoot")]
    pub source_root: String,
    pub sources: Vec<String>,
    pub names: Vec<String>,
    pub mappings: String,
}

impl SourceMap {
    /// Assembles a document. A missing output filename becomes `""`.
    pub fn new(file: Option<String>, sources: Vec<String>, names: NameTable, mappings: String) -> Self {
        SourceMap {
            version: VERSION,
            file: file.unwrap_or_default(),
            source_root: String::new(),
            sources,
            names: names.into_vec(),
            mappings,
        }
    }

    /// Encodes `records` against a name table built from `names` and
    /// assembles the document.
    pub fn from_records<I, S>(
        file: Option<String>,
        sources: Vec<String>,
        names: I,
        records: &[Record],
    ) -> Result<Self, MappingError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names = NameTable::from_names(names);
        let mappings = encode_mappings(records, &names)?;
        Ok(SourceMap::new(file, sources, names, mappings))
    }

    /// Serializes the document; `pretty` uses a 2-space indent.
    pub fn to_json_string(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}

pub struct SourceMapGenerator {
    file: Option<String>,
    sources: IndexSet<String>,
    names: IndexSet<String>,
    records: Vec<Record>,
    has_line: bool,
    last_col: i64,
}

impl SourceMapGenerator {
    pub fn new(file: Option<String>) -> Self {
        SourceMapGenerator {
            file,
            sources: IndexSet::new(),
            names: IndexSet::new(),
            records: Vec::new(),
            has_line: false,
            last_col: 0,
        }
    }

    /// Registering the same url twice keeps its first position.
    pub fn add_source(&mut self, url: impl Into<String>) -> &mut Self {
        self.sources.insert(url.into());
        self
    }

    pub fn add_line(&mut self) -> &mut Self {
        if self.has_line {
            self.records.push(Record::LineBreak);
        }
        self.has_line = true;
        self.last_col = 0;
        self
    }

    /// Adds a mapping at the 1-indexed `col` of the current line.
    ///
    /// `source` is `(url, line, column)` with 1-indexed line and column.
    pub fn add_mapping(
        &mut self,
        col: i64,
        source: Option<(&str, i64, i64)>,
        name: Option<&str>,
    ) -> Result<&mut Self, GeneratorError> {
        if !self.has_line {
            return Err(GeneratorError::NoLine);
        }

        if col < self.last_col {
            return Err(GeneratorError::OutOfOrder);
        }

        let segment = match (source, name) {
            (None, Some(_)) => return Err(GeneratorError::NameWithoutSource),
            (None, None) => Segment::generated(col),
            (Some((url, line, column)), name) => {
                let index = self
                    .sources
                    .get_index_of(url)
                    .ok_or_else(|| GeneratorError::UnknownSource(url.to_string()))?;
                let position = SourcePosition::new(index as i64 + 1, line, column);
                match name {
                    Some(name) => {
                        self.names.insert(name.to_string());
                        Segment::named(col, position, name)
                    }
                    None => Segment::mapped(col, position),
                }
            }
        };

        self.last_col = col;
        self.records.push(segment.into());
        Ok(self)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn to_source_map(&self) -> Result<SourceMap, MappingError> {
        SourceMap::from_records(
            self.file.clone(),
            self.sources.iter().cloned().collect(),
            self.names.iter().cloned(),
            &self.records,
        )
    }
}
