use std::collections::HashSet;

use crate::table::{Column, MergedTable, PROVENANCE_COLUMN, TableFragment};

/// Appends fragments into one column-major table.
///
/// Rows keep the order they are pushed in. A column first seen in a later
/// fragment is backfilled with empty values for the rows before it, and a
/// column a fragment lacks is filled with empty values for that fragment's
/// rows, so every column always has one value per row.
#[derive(Debug, Default)]
pub struct ResultMerger {
    columns:    Vec<Column>,
    seen:       HashSet<String>,
    provenance: Vec<String>,
}

impl ResultMerger {
    pub fn new() -> Self { Self::default() }

    pub fn push(&mut self, path: &str, fragment: TableFragment) {
        let (names, rows) = fragment.into_parts();
        for name in names {
            if name != PROVENANCE_COLUMN {
                self.declare(name);
            }
        }

        for mut row in rows {
            for column in &mut self.columns {
                column
                    .values
                    .push(row.remove(&column.name).unwrap_or_default());
            }
            self.provenance.push(path.to_string());
        }
    }

    pub fn row_count(&self) -> usize { self.provenance.len() }

    pub fn finish(self) -> MergedTable {
        let mut columns = self.columns;
        columns.push(Column {
            name:   PROVENANCE_COLUMN.to_string(),
            values: self.provenance,
        });
        MergedTable::from_columns(columns)
    }

    fn declare(&mut self, name: String) {
        if !self.seen.insert(name.clone()) {
            return;
        }
        self.columns.push(Column {
            name,
            values: vec![String::new(); self.provenance.len()],
        });
    }
}

/// Merge `(entry path, fragment)` pairs in the order given.
pub fn merge<I, P>(fragments: I) -> MergedTable
where
    I: IntoIterator<Item = (P, TableFragment)>,
    P: AsRef<str>,
{
    let mut merger = ResultMerger::new();
    for (path, fragment) in fragments {
        merger.push(path.as_ref(), fragment);
    }
    merger.finish()
}
