use std::io::{Cursor, Read};

use ::zip::ZipArchive;
use tracing::trace;

use super::{ArchiveReader, Visitor};
use crate::entry::{ArchiveEntry, capacity_hint, normalize_path};
use crate::error::{Error, Result};
use crate::format::ArchiveFormat;
use crate::matcher::PathMatcher;

const FORMAT: ArchiveFormat = ArchiveFormat::Zip;

/// Zip reader driven by the central directory.
pub struct ZipReader<'a> {
    archive: ZipArchive<Cursor<&'a [u8]>>,
    /// Normalized path and central-directory index of each file entry.
    files:   Vec<(String, usize)>,
}

impl<'a> ZipReader<'a> {
    pub fn open(bytes: &'a [u8]) -> Result<Self> {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).map_err(|e| Error::unreadable(FORMAT, e))?;

        let mut files = Vec::with_capacity(archive.len());
        for index in 0..archive.len() {
            let file = archive
                .by_index_raw(index)
                .map_err(|e| Error::unreadable(FORMAT, e))?;
            if file.is_dir() {
                continue;
            }
            files.push((normalize_path(file.name()), index));
        }

        Ok(Self { archive, files })
    }
}

fn read_index(archive: &mut ZipArchive<Cursor<&[u8]>>, index: usize) -> Result<Vec<u8>> {
    let mut file = archive
        .by_index(index)
        .map_err(|e| Error::unreadable(FORMAT, e))?;
    let mut content = Vec::with_capacity(capacity_hint(file.size()));
    file.read_to_end(&mut content)
        .map_err(|e| Error::unreadable(FORMAT, e))?;
    Ok(content)
}

impl ArchiveReader for ZipReader<'_> {
    fn format(&self) -> ArchiveFormat { FORMAT }

    fn list(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(self.files.iter().map(|(path, _)| path.as_str()))
    }

    /// Entries sharing a normalized name resolve to the first stored copy.
    fn extract(&mut self, path: &str) -> Result<Vec<u8>> {
        let index = self
            .files
            .iter()
            .find(|(name, _)| name == path)
            .map(|&(_, index)| index)
            .ok_or_else(|| Error::EntryNotFound {
                format: FORMAT,
                path: path.to_string(),
            })?;

        let content = read_index(&mut self.archive, index)?;
        trace!(path, bytes = content.len(), "zip entry extracted");
        Ok(content)
    }

    /// Reads each matched entry straight from its central-directory index.
    fn for_each_matching(&mut self, matcher: &PathMatcher, visit: &mut Visitor<'_>) -> Result<usize> {
        let mut visited = 0;
        for (path, index) in &self.files {
            if !matcher.matches(path) {
                continue;
            }
            let content = read_index(&mut self.archive, *index)?;
            trace!(%path, bytes = content.len(), "zip entry extracted");
            visited += 1;
            if visit(ArchiveEntry::new(path.clone(), content)).is_break() {
                break;
            }
        }
        Ok(visited)
    }

    fn entry_count(&self) -> usize { self.files.len() }
}
