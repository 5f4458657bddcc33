use std::collections::HashMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Synthetic column naming the archive entry each merged row came from.
pub const PROVENANCE_COLUMN: &str = "__archived_file";

pub type Row = HashMap<String, String>;

/// Table decoded from a single archive entry.
///
/// Every key of every row is one of `columns`; a row may leave some columns
/// out.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TableFragment {
    columns: Vec<String>,
    rows:    Vec<Row>,
}

impl TableFragment {
    pub fn new() -> Self { Self::default() }

    pub fn with_columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut fragment = Self::new();
        for column in columns {
            fragment.add_column(column);
        }
        fragment
    }

    /// Declare a column; names already declared keep their position.
    pub fn add_column(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.columns.contains(&name) {
            self.columns.push(name);
        }
    }

    /// Append a row given as name/value pairs. Unknown names become new
    /// columns, in the order they are first met.
    pub fn push_record<I, K, V>(&mut self, cells: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut row = Row::new();
        for (name, value) in cells {
            let name = name.into();
            self.add_column(name.clone());
            row.insert(name, value.into());
        }
        self.rows.push(row);
    }

    pub fn columns(&self) -> &[String] { &self.columns }

    pub fn rows(&self) -> &[Row] { &self.rows }

    pub fn len(&self) -> usize { self.rows.len() }

    pub fn is_empty(&self) -> bool { self.rows.is_empty() }

    pub(crate) fn into_parts(self) -> (Vec<String>, Vec<Row>) { (self.columns, self.rows) }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Column {
    pub name:   String,
    pub values: Vec<String>,
}

/// Column-major table merged from every matched entry.
///
/// All columns have the same length; the last column is always
/// [`PROVENANCE_COLUMN`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MergedTable {
    columns: Vec<Column>,
}

impl MergedTable {
    pub(crate) fn from_columns(columns: Vec<Column>) -> Self { Self { columns } }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn columns(&self) -> &[Column] { &self.columns }

    pub fn column(&self, name: &str) -> Option<&[String]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
    }

    /// Source entry path of every row.
    pub fn provenance(&self) -> &[String] { self.column(PROVENANCE_COLUMN).unwrap_or_default() }

    pub fn row_count(&self) -> usize { self.columns.first().map_or(0, |c| c.values.len()) }

    /// Cells of row `index` as (column, value) pairs in column order.
    pub fn row(&self, index: usize) -> Option<Vec<(&str, &str)>> {
        if index >= self.row_count() {
            return None;
        }
        Some(
            self.columns
                .iter()
                .map(|c| (c.name.as_str(), c.values[index].as_str()))
                .collect(),
        )
    }

    pub fn into_columns(self) -> Vec<Column> { self.columns }
}

impl Serialize for MergedTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for column in &self.columns {
            map.serialize_entry(&column.name, &column.values)?;
        }
        map.end()
    }
}
