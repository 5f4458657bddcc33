use std::mem;

use super::{FragmentParser, ParseError, decode_text};
use crate::table::TableFragment;

/// Delimiter-separated text with RFC 4180 quoting.
///
/// With a header, the first record names the columns and a later record
/// with more fields than the header is an error; shorter records leave the
/// trailing columns out. Without a header, columns are numbered from 1.
/// Blank lines are skipped.
#[derive(Clone, Copy, Debug)]
pub struct DelimitedParser {
    delimiter: char,
    header:    bool,
}

impl Default for DelimitedParser {
    fn default() -> Self { Self::csv() }
}

impl DelimitedParser {
    pub fn csv() -> Self {
        Self {
            delimiter: ',',
            header:    true,
        }
    }

    pub fn tsv() -> Self { Self::csv().delimiter('\t') }

    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }

    fn records(&self, text: &str) -> Result<Vec<Vec<String>>, ParseError> {
        let mut records = Vec::new();
        let mut record = Vec::new();
        let mut field = String::new();
        // Whether the current record holds anything, so blank lines vanish.
        let mut dirty = false;
        let mut quoted = false;
        let mut line = 1;
        let mut quote_line = 0;

        let mut chars = text.chars().peekable();
        while let Some(c) = chars.next() {
            if quoted {
                match c {
                    '"' if chars.peek() == Some(&'"') => {
                        chars.next();
                        field.push('"');
                    }
                    '"' => quoted = false,
                    '\n' => {
                        line += 1;
                        field.push(c);
                    }
                    _ => field.push(c),
                }
                continue;
            }

            match c {
                '"' if field.is_empty() => {
                    quoted = true;
                    quote_line = line;
                    dirty = true;
                }
                c if c == self.delimiter => {
                    record.push(mem::take(&mut field));
                    dirty = true;
                }
                '\r' if chars.peek() == Some(&'\n') => {}
                '\n' | '\r' => {
                    line += 1;
                    if dirty {
                        record.push(mem::take(&mut field));
                        records.push(mem::take(&mut record));
                        dirty = false;
                    }
                }
                _ => {
                    field.push(c);
                    dirty = true;
                }
            }
        }

        if quoted {
            return Err(ParseError::UnterminatedQuote { line: quote_line });
        }
        if dirty {
            record.push(field);
            records.push(record);
        }
        Ok(records)
    }
}

impl FragmentParser for DelimitedParser {
    fn parse(&self, content: &[u8]) -> Result<TableFragment, ParseError> {
        let mut records = self.records(decode_text(content)?)?.into_iter();

        if !self.header {
            let mut fragment = TableFragment::new();
            for record in records {
                fragment.push_record(
                    record
                        .into_iter()
                        .enumerate()
                        .map(|(i, value)| ((i + 1).to_string(), value)),
                );
            }
            return Ok(fragment);
        }

        let Some(header) = records.next() else {
            return Ok(TableFragment::new());
        };
        let mut fragment = TableFragment::with_columns(header.iter().cloned());

        for (index, record) in records.enumerate() {
            if record.len() > header.len() {
                return Err(ParseError::FieldCount {
                    record:   index + 1,
                    expected: header.len(),
                    found:    record.len(),
                });
            }
            fragment.push_record(header.iter().cloned().zip(record));
        }
        Ok(fragment)
    }
}
