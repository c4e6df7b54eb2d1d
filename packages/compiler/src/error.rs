//! Error types
//!
//! Errors raised by the VLQ codec, the mapping encoder, the programmatic
//! generator and the `.desc` parser.

use thiserror::Error;

/// Why a VLQ sequence could not be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VlqErrorReason {
    /// Input ended while the continuation bit was still set.
    UnexpectedEnd,
    /// Character outside the Base64 alphabet.
    InvalidDigit(char),
    /// Decoded magnitude does not fit in an `i64`.
    Overflow,
}

impl std::fmt::Display for VlqErrorReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VlqErrorReason::UnexpectedEnd => write!(f, "unexpected end of input"),
            VlqErrorReason::InvalidDigit(c) => write!(f, "invalid base64 digit '{}'", c),
            VlqErrorReason::Overflow => write!(f, "value overflows 64 bits"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    #[error("malformed VLQ \"{input}\": {reason}")]
    MalformedVlq {
        input: String,
        reason: VlqErrorReason,
    },

    /// The name table was not built from the names the records reference.
    #[error("name \"{0}\" is not in the name table")]
    UnresolvedName(String),

    #[error("segment at generated column {generated_column} has a name but no source position")]
    NameWithoutSource { generated_column: i64 },

    /// A position or its delta against the previous segment does not fit in
    /// an `i64`.
    #[error("segment at generated column {generated_column} has a position outside the encodable range")]
    PositionOverflow { generated_column: i64 },
}

/// Misuse of [`crate::output::source_map::SourceMapGenerator`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeneratorError {
    #[error("A line must be added before mappings can be added")]
    NoLine,

    #[error("Unknown source file \"{0}\"")]
    UnknownSource(String),

    #[error("Mapping should be added in output order")]
    OutOfOrder,

    #[error("A name requires a source location")]
    NameWithoutSource,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DescParseErrorKind {
    /// A `[` without its closing `]`.
    UnclosedBracket,
    /// Field count other than 1, 4 or 5.
    FieldCount(usize),
    /// A position field that is not an integer.
    InvalidNumber(String),
    /// The fifth field parsed as a number where a name was expected.
    NumericName(String),
    /// The fifth field was present but empty.
    EmptyName,
}

impl std::fmt::Display for DescParseErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DescParseErrorKind::UnclosedBracket => write!(f, "missing closing ']'"),
            DescParseErrorKind::FieldCount(n) => {
                write!(f, "expected 1, 4 or 5 fields, found {}", n)
            }
            DescParseErrorKind::InvalidNumber(s) => write!(f, "invalid number '{}'", s),
            DescParseErrorKind::NumericName(s) => {
                write!(f, "fifth field must be a name, found number '{}'", s)
            }
            DescParseErrorKind::EmptyName => write!(f, "fifth field is an empty name"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {kind} in mapping: {text}")]
pub struct DescParseError {
    /// 1-based line number in the `.desc` input.
    pub line: usize,
    pub text: String,
    pub kind: DescParseErrorKind,
}

pub type Result<T> = std::result::Result<T, MappingError>;
