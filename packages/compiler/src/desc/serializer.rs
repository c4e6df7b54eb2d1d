//! `.desc` Serializer
//!
//! Writes a [`DescDocument`] back in the grammar [`super::parse_desc`] reads.

use super::parser::CONTENT_INDENT;
use super::DescDocument;
use crate::output::mapping_encoder::{Record, Segment};

pub fn serialize_desc(doc: &DescDocument) -> String {
    let mut lines: Vec<String> = Vec::new();

    if !doc.comments.is_empty() {
        for comment in &doc.comments {
            lines.push(format!("-- {}", comment));
        }
        lines.push(String::new());
    }

    for input in &doc.sources {
        lines.push(format!("INPUT: {}", input));
    }
    if let Some(output) = &doc.output_file {
        lines.push(format!("OUTPUT: {}", output));
    }
    lines.push(String::new());

    // Content only has a place to live under an `OUTPUT:` line.
    if let (Some(_), Some(content)) = (&doc.output_file, &doc.output_content) {
        for line in content.lines() {
            if line.is_empty() {
                lines.push(String::new());
            } else {
                lines.push(format!("{}{}", CONTENT_INDENT, line));
            }
        }
        lines.push(String::new());
    }

    for mapping in &doc.mappings {
        let mut line = match &mapping.record {
            Record::LineBreak => "[-]".to_string(),
            Record::Segment(segment) => format!("[{}]", segment_fields(segment)),
        };
        if let Some(comment) = &mapping.comment {
            line.push_str(" -- ");
            line.push_str(comment);
        }
        lines.push(line);
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn segment_fields(segment: &Segment) -> String {
    let mut parts = vec![segment.generated_column.to_string()];
    if let Some(source) = segment.source {
        parts.push(source.source_index.to_string());
        parts.push(source.line.to_string());
        parts.push(source.column.to_string());
        if let Some(name) = &segment.name {
            parts.push(name.clone());
        }
    }
    parts.join(",")
}
