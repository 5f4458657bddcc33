use serde_json::Value;

use super::{FragmentParser, ParseError};
use crate::table::TableFragment;

/// A JSON array of objects, one object per row.
///
/// Strings are taken verbatim, `null` becomes an empty cell and anything
/// else keeps its JSON text.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonParser;

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn cell(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

impl FragmentParser for JsonParser {
    fn parse(&self, content: &[u8]) -> Result<TableFragment, ParseError> {
        let items = match serde_json::from_slice::<Value>(content)? {
            Value::Array(items) => items,
            other => {
                return Err(ParseError::Shape {
                    expected: "an array of objects",
                    found:    kind(&other),
                });
            }
        };

        let mut fragment = TableFragment::new();
        for item in items {
            let Value::Object(object) = item else {
                return Err(ParseError::Shape {
                    expected: "an object",
                    found:    kind(&item),
                });
            };
            fragment.push_record(object.into_iter().map(|(name, value)| (name, cell(value))));
        }
        Ok(fragment)
    }
}
