//! Format-specific archive readers behind one [`ArchiveReader`] contract.
//!
//! A reader is opened over a borrowed byte buffer, validated and indexed up
//! front, and dropped at the end of the call that opened it. Nothing is
//! written outside the reader except the scratch file the rar backend needs.

use std::ops::ControlFlow;

use tracing::debug;

use crate::entry::ArchiveEntry;
use crate::error::{Error, Result};
use crate::format::ArchiveFormat;
use crate::matcher::PathMatcher;

#[cfg(feature = "rar")]
mod rar;
#[cfg(feature = "tar")]
mod tar;
#[cfg(feature = "zip")]
mod zip;

#[cfg(feature = "rar")]
pub use self::rar::RarReader;
#[cfg(feature = "tar")]
pub use self::tar::TarReader;
#[cfg(feature = "zip")]
pub use self::zip::ZipReader;

/// Callback handed each matched entry; `Break` stops the walk early.
pub type Visitor<'v> = dyn FnMut(ArchiveEntry) -> ControlFlow<()> + 'v;

pub trait ArchiveReader {
    fn format(&self) -> ArchiveFormat;

    /// Regular-file entry paths in the archive's own order.
    fn list(&self) -> Box<dyn Iterator<Item = &str> + '_>;

    /// Read the content of the entry stored under `path`.
    fn extract(&mut self, path: &str) -> Result<Vec<u8>>;

    /// Visit every entry accepted by `matcher`, in listing order, extracting
    /// one entry at a time. Returns the number of entries visited.
    fn for_each_matching(&mut self, matcher: &PathMatcher, visit: &mut Visitor<'_>) -> Result<usize> {
        let paths = self
            .list()
            .filter(|path| matcher.matches(path))
            .map(str::to_owned)
            .collect::<Vec<_>>();

        let mut visited = 0;
        for path in paths {
            let content = self.extract(&path)?;
            visited += 1;
            if visit(ArchiveEntry::new(path, content)).is_break() {
                break;
            }
        }
        Ok(visited)
    }

    fn entry_count(&self) -> usize { self.list().count() }
}

/// Open `bytes` as an archive of the given format.
///
/// Formats whose reader is not compiled in fail with
/// [`Error::UnsupportedFormat`] before any byte is inspected.
pub fn open<'a>(bytes: &'a [u8], format: ArchiveFormat) -> Result<Box<dyn ArchiveReader + 'a>> {
    let reader: Box<dyn ArchiveReader + 'a> = match format {
        #[cfg(feature = "zip")]
        ArchiveFormat::Zip => Box::new(ZipReader::open(bytes)?),
        #[cfg(feature = "tar")]
        ArchiveFormat::Tar(compress) => Box::new(TarReader::open(bytes, compress)?),
        #[cfg(feature = "rar")]
        ArchiveFormat::Rar => Box::new(RarReader::open(bytes)?),
        #[allow(unreachable_patterns)]
        _ => {
            debug!(%format, "no reader compiled in");
            return Err(Error::UnsupportedFormat { format });
        }
    };
    debug!(%format, entries = reader.entry_count(), "archive opened");
    Ok(reader)
}
