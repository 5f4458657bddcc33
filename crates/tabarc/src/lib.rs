//! Tabular data pulled out of zip, rar and tar archives.
//!
//! [`invoke`] opens an in-memory archive, selects entries with a wildcard
//! pattern and depth limit, decodes each through a [`FragmentParser`] and
//! merges the fragments into one [`MergedTable`] whose last column,
//! `__archived_file`, names the entry every row came from.
//!
//! ```no_run
//! use tabarc::{ArchiveArgs, DelimitedParser, invoke};
//!
//! # fn main() -> tabarc::Result<()> {
//! let bytes = std::fs::read("reports.zip").unwrap_or_default();
//! let args = ArchiveArgs::new().pattern("*.csv").depth(1);
//! let table = invoke(&bytes, &args, "reports.zip", &DelimitedParser::csv())?;
//! println!("{} rows", table.row_count());
//! # Ok(())
//! # }
//! ```
//!
//! Failures carry a symbolic [`ErrorRecord`] (`could-not-read`,
//! `could-not-extract`, ...) for rendering by the caller.

pub use args::{ArchiveArgs, DEPTH_KEY, FORMAT_KEY, MATCH_ALL, PATH_KEY};
pub use error::{Error, ErrorRecord, Result};
pub use invoke::{invoke, invoke_with_bag, resolve_format};
pub use merge::{ResultMerger, merge};
pub use parse::{DelimitedParser, FragmentParser, JsonParser, ParseError};
pub use table::{Column, MergedTable, PROVENANCE_COLUMN, Row, TableFragment};
pub use tabarc_archive::{ArchiveFormat, PathMatcher, TarCompress};

pub mod error;
pub mod parse;

mod args;
mod invoke;
mod merge;
mod table;
