//! Mapping Encoder
//!
//! Turns an ordered stream of absolute, 1-indexed mapping records into the
//! relative, 0-indexed Base64 VLQ string stored in a source map's `mappings`
//! field.
//!
//! Each generated line is a comma-separated list of segments and lines are
//! separated by `;`. Every segment field is a delta against the previous
//! value of the same field. The generated column restarts at 0 on every line;
//! the source index, source line, source column and name index run across the
//! whole document.

use super::name_table::NameTable;
use super::vlq::encode_vlq_into;
use crate::error::{MappingError, Result};
use smallvec::SmallVec;

/// A position in one of the original sources, all fields 1-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourcePosition {
    pub source_index: i64,
    pub line: i64,
    pub column: i64,
}

impl SourcePosition {
    pub fn new(source_index: i64, line: i64, column: i64) -> Self {
        SourcePosition {
            source_index,
            line,
            column,
        }
    }
}

/// One mapped position on the current generated line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// 1-indexed column in the generated file.
    pub generated_column: i64,
    pub source: Option<SourcePosition>,
    /// Only valid together with `source`.
    pub name: Option<String>,
}

impl Segment {
    /// A generated-only segment with no originating source.
    pub fn generated(generated_column: i64) -> Self {
        Segment {
            generated_column,
            source: None,
            name: None,
        }
    }

    pub fn mapped(generated_column: i64, source: SourcePosition) -> Self {
        Segment {
            generated_column,
            source: Some(source),
            name: None,
        }
    }

    pub fn named(generated_column: i64, source: SourcePosition, name: impl Into<String>) -> Self {
        Segment {
            generated_column,
            source: Some(source),
            name: Some(name.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    /// End of the current generated line.
    LineBreak,
    Segment(Segment),
}

impl From<Segment> for Record {
    fn from(segment: Segment) -> Self {
        Record::Segment(segment)
    }
}

/// Previous absolute (0-indexed) value of every segment field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncoderState {
    pub generated_column: i64,
    pub source_index: i64,
    pub source_line: i64,
    pub source_column: i64,
    pub name_index: i64,
}

impl EncoderState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only the generated column is line-relative.
    pub fn start_line(&mut self) {
        self.generated_column = 0;
    }

    /// Computes the field deltas for `segment` and advances the state.
    ///
    /// The state is left untouched when an error is returned.
    pub fn advance(&mut self, segment: &Segment, names: &NameTable) -> Result<SmallVec<[i64; 5]>> {
        let overflow = || MappingError::PositionOverflow {
            generated_column: segment.generated_column,
        };
        let delta = |value: i64, prev: i64| {
            let value = value.checked_sub(1).ok_or_else(overflow)?;
            let delta = value.checked_sub(prev).ok_or_else(overflow)?;
            Ok::<_, MappingError>((value, delta))
        };

        let mut fields = SmallVec::new();
        let mut next = *self;

        let (generated_column, generated_delta) =
            delta(segment.generated_column, self.generated_column)?;
        fields.push(generated_delta);
        next.generated_column = generated_column;

        let Some(source) = segment.source else {
            if segment.name.is_some() {
                return Err(MappingError::NameWithoutSource {
                    generated_column: segment.generated_column,
                });
            }
            *self = next;
            return Ok(fields);
        };

        let (source_index, index_delta) = delta(source.source_index, self.source_index)?;
        let (source_line, line_delta) = delta(source.line, self.source_line)?;
        let (source_column, column_delta) = delta(source.column, self.source_column)?;
        fields.extend([index_delta, line_delta, column_delta]);
        next.source_index = source_index;
        next.source_line = source_line;
        next.source_column = source_column;

        if let Some(name) = &segment.name {
            let name_index = names
                .index_of(name)
                .ok_or_else(|| MappingError::UnresolvedName(name.clone()))?
                as i64;
            fields.push(name_index - self.name_index);
            next.name_index = name_index;
        }

        *self = next;
        Ok(fields)
    }
}

/// Encodes `records` into a `mappings` string.
///
/// A line with no segments still occupies its slot, so consecutive line
/// breaks produce `;;`. On error nothing is returned.
pub fn encode_mappings(records: &[Record], names: &NameTable) -> Result<String> {
    let mut state = EncoderState::new();
    let mut lines: Vec<String> = Vec::new();
    let mut segments: Vec<String> = Vec::new();

    for record in records {
        match record {
            Record::LineBreak => {
                lines.push(segments.join(","));
                segments.clear();
                state.start_line();
            }
            Record::Segment(segment) => {
                let fields = state.advance(segment, names)?;
                let mut encoded = String::with_capacity(fields.len() * 2);
                for delta in fields {
                    encode_vlq_into(&mut encoded, delta);
                }
                segments.push(encoded);
            }
        }
    }

    if !segments.is_empty() {
        lines.push(segments.join(","));
    }

    Ok(lines.join(";"))
}
