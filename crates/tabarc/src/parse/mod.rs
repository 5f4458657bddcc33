//! Decoding one archive entry into a [`TableFragment`].
//!
//! The merge pipeline only sees the [`FragmentParser`] trait. The delimited
//! and JSON parsers here cover the common cases; callers with their own
//! decoder can pass any `Fn(&[u8]) -> Result<TableFragment, ParseError>`.

mod delimited;
mod json;

pub use delimited::DelimitedParser;
pub use json::JsonParser;

use crate::table::TableFragment;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("content is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    #[error("record {record} has {found} fields but the header has {expected}")]
    FieldCount {
        record:   usize,
        expected: usize,
        found:    usize,
    },

    #[error("quoted field opened on line {line} is never closed")]
    UnterminatedQuote { line: usize },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected {expected}, found {found}")]
    Shape {
        expected: &'static str,
        found:    &'static str,
    },

    #[error("{0}")]
    Custom(String),
}

pub trait FragmentParser {
    fn parse(&self, content: &[u8]) -> Result<TableFragment, ParseError>;
}

impl<F> FragmentParser for F
where
    F: Fn(&[u8]) -> Result<TableFragment, ParseError>,
{
    fn parse(&self, content: &[u8]) -> Result<TableFragment, ParseError> { self(content) }
}

/// Decode `content` as UTF-8, dropping a leading byte order mark.
pub(crate) fn decode_text(content: &[u8]) -> Result<&str, ParseError> {
    let text = std::str::from_utf8(content)?;
    Ok(text.strip_prefix('\u{feff}').unwrap_or(text))
}
