//! `.desc` Parser
//!
//! Reads the line-oriented mapping description format:
//!
//! ```text
//! -- header comment
//! INPUT: a.js
//! OUTPUT: out.js
//!
//!   generated code, kept as the output content
//!
//! # notes
//! [1,1,1,1,foo] -- optional comment
//! [5,1,1,5]
//! [9]
//! [-]
//! ```
//!
//! Every number is 1-indexed. `[-]` ends a generated line. `--` comments and
//! `INPUT:`/`OUTPUT:` lines are only read in the header, before the output
//! content. Lines matching none of the forms above are skipped.

use super::{DescDocument, DescMapping};
use crate::error::{DescParseError, DescParseErrorKind};
use crate::logging::Logger;
use crate::output::mapping_encoder::{Record, Segment, SourcePosition};
use indexmap::IndexSet;
use once_cell::sync::Lazy;
use regex::Regex;

static MAPPING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[(?P<body>[^\]]*)\](?P<rest>.*)$").unwrap());

const INPUT_PREFIX: &str = "INPUT:";
const OUTPUT_PREFIX: &str = "OUTPUT:";
const COMMENT_PREFIX: &str = "--";
const NOTE_PREFIX: &str = "#";
const LINE_BREAK: &str = "-";
pub(super) const CONTENT_INDENT: &str = "  ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Header,
    /// Everything after `OUTPUT:` up to the first note or mapping.
    Content,
    Mappings,
}

pub fn parse_desc(content: &str, logger: &dyn Logger) -> Result<DescDocument, DescParseError> {
    let mut sources: IndexSet<String> = IndexSet::new();
    let mut output_file = None;
    let mut output_lines: Vec<&str> = Vec::new();
    let mut comments = Vec::new();
    let mut mappings = Vec::new();
    let mut section = Section::Header;

    for (index, raw) in content.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();

        if section == Section::Content {
            if line.starts_with('[') || line.starts_with(NOTE_PREFIX) {
                section = Section::Mappings;
            } else {
                let raw = raw.trim_end();
                output_lines.push(raw.strip_prefix(CONTENT_INDENT).unwrap_or(raw));
                continue;
            }
        }

        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') {
            section = Section::Mappings;
            if let Some(mapping) = parse_mapping_line(line, line_no, logger)? {
                mappings.push(mapping);
            }
            continue;
        }

        match section {
            Section::Header => {
                if let Some(input) = line.strip_prefix(INPUT_PREFIX) {
                    let input = input.trim();
                    if !sources.insert(input.to_string()) {
                        logger.warn(&format!("line {}: duplicate input '{}' ignored", line_no, input));
                    }
                } else if let Some(output) = line.strip_prefix(OUTPUT_PREFIX) {
                    output_file = Some(output.trim().to_string());
                    section = Section::Content;
                } else if let Some(comment) = line.strip_prefix(COMMENT_PREFIX) {
                    comments.push(comment.trim().to_string());
                } else {
                    logger.debug(&format!("line {}: skipped '{}'", line_no, line));
                }
            }
            _ => logger.debug(&format!("line {}: skipped '{}'", line_no, line)),
        }
    }

    Ok(DescDocument {
        sources: sources.into_iter().collect(),
        output_file,
        output_content: join_content(&output_lines),
        comments,
        mappings,
    })
}

/// Joins the content lines without their leading and trailing blank lines.
fn join_content(lines: &[&str]) -> Option<String> {
    let first = lines.iter().position(|l| !l.trim().is_empty())?;
    let last = lines.iter().rposition(|l| !l.trim().is_empty())?;
    Some(lines[first..=last].join("\n"))
}

fn parse_mapping_line(
    line: &str,
    line_no: usize,
    logger: &dyn Logger,
) -> Result<Option<DescMapping>, DescParseError> {
    let error = |kind: DescParseErrorKind| DescParseError {
        line: line_no,
        text: line.to_string(),
        kind,
    };

    let captures = MAPPING_RE
        .captures(line)
        .ok_or_else(|| error(DescParseErrorKind::UnclosedBracket))?;
    let body = captures.name("body").map_or("", |m| m.as_str()).trim();
    let comment = captures
        .name("rest")
        .map(|m| m.as_str().trim())
        .and_then(|rest| rest.strip_prefix(COMMENT_PREFIX))
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty());

    if body.is_empty() {
        logger.warn(&format!("line {}: empty mapping ignored", line_no));
        return Ok(None);
    }

    if body == LINE_BREAK {
        return Ok(Some(DescMapping {
            record: Record::LineBreak,
            comment,
        }));
    }

    let fields: Vec<&str> = body.split(',').map(str::trim).collect();

    let segment = match fields.as_slice() {
        &[col] => Segment::generated(parse_number(col).map_err(error)?),
        &[col, src, src_line, src_col, ref rest @ ..] if rest.len() <= 1 => {
            let col = parse_number(col).map_err(error)?;
            let position = parse_position(src, src_line, src_col).map_err(error)?;
            match rest.first().copied() {
                None => Segment::mapped(col, position),
                Some("") => return Err(error(DescParseErrorKind::EmptyName)),
                Some(name) if name.parse::<i64>().is_ok() => {
                    return Err(error(DescParseErrorKind::NumericName(name.to_string())))
                }
                Some(name) => Segment::named(col, position, name),
            }
        }
        _ => return Err(error(DescParseErrorKind::FieldCount(fields.len()))),
    };

    Ok(Some(DescMapping {
        record: Record::Segment(segment),
        comment,
    }))
}

fn parse_number(field: &str) -> Result<i64, DescParseErrorKind> {
    field
        .parse::<i64>()
        .map_err(|_| DescParseErrorKind::InvalidNumber(field.to_string()))
}

fn parse_position(src: &str, line: &str, column: &str) -> Result<SourcePosition, DescParseErrorKind> {
    Ok(SourcePosition::new(
        parse_number(src)?,
        parse_number(line)?,
        parse_number(column)?,
    ))
}
