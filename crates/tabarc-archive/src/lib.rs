//! In-memory archive reading with wildcard and depth entry matching.
//!
//! # Architecture
//!
//! - `format.rs` - Format resolution by extension, name and magic bytes
//! - `matcher.rs` - Path patterns with `*` and a depth limit
//! - `reader/` - One [`ArchiveReader`] per format behind the [`open`] factory
//! - `extract.rs` - Matched-entry extraction in discovery order
//!
//! # Features
//!
//! - `zip` (default) - zip archives
//! - `tar` (default) - tar and tar-based phar, plain or gzip/bzip2 compressed
//! - `rar` - rar archives through the unrar library

pub use entry::{ArchiveEntry, normalize_path};
pub use error::{Error, Result};
pub use extract::extract_matching;
pub use format::{ArchiveFormat, ParseFormatError, TarCompress, detect_format};
pub use matcher::{PathMatcher, depth_of};
pub use reader::{ArchiveReader, Visitor, open};

mod entry;
mod error;
mod extract;
mod format;
mod matcher;
pub mod reader;
