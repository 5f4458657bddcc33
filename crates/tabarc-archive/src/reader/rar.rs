use std::fmt::Display;
use std::io::{self, Write};

use tempfile::NamedTempFile;
use tracing::trace;

use super::{ArchiveReader, Visitor};
use crate::entry::{ArchiveEntry, normalize_path};
use crate::error::{Error, Result};
use crate::format::ArchiveFormat;
use crate::matcher::PathMatcher;

const FORMAT: ArchiveFormat = ArchiveFormat::Rar;

/// Rar reader backed by the unrar library.
///
/// unrar only opens archives from disk, so the buffer is spilled to a
/// scratch file that lives exactly as long as the reader.
pub struct RarReader {
    file:  NamedTempFile,
    paths: Vec<String>,
}

fn unreadable(err: impl Display) -> Error {
    Error::unreadable(FORMAT, io::Error::new(io::ErrorKind::InvalidData, err.to_string()))
}

impl RarReader {
    pub fn open(bytes: &[u8]) -> Result<Self> {
        let mut file = tempfile::Builder::new()
            .prefix("tabarc-")
            .suffix(".rar")
            .tempfile()
            .map_err(|e| Error::unreadable(FORMAT, e))?;
        file.write_all(bytes)
            .and_then(|()| file.flush())
            .map_err(|e| Error::unreadable(FORMAT, e))?;

        let listing = unrar::Archive::new(file.path())
            .open_for_listing()
            .map_err(unreadable)?;
        let mut paths = Vec::new();
        for header in listing {
            let header = header.map_err(unreadable)?;
            if header.is_file() {
                paths.push(normalize_path(&header.filename.to_string_lossy()));
            }
        }

        Ok(Self { file, paths })
    }
}

impl ArchiveReader for RarReader {
    fn format(&self) -> ArchiveFormat { FORMAT }

    fn list(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(self.paths.iter().map(String::as_str))
    }

    fn extract(&mut self, path: &str) -> Result<Vec<u8>> {
        let mut archive = unrar::Archive::new(self.file.path())
            .open_for_processing()
            .map_err(unreadable)?;

        while let Some(header) = archive.read_header().map_err(unreadable)? {
            let entry = header.entry();
            let name = normalize_path(&entry.filename.to_string_lossy());
            archive = if entry.is_file() && name == path {
                let (content, _) = header.read().map_err(unreadable)?;
                return Ok(content);
            } else {
                header.skip().map_err(unreadable)?
            };
        }

        Err(Error::EntryNotFound {
            format: FORMAT,
            path: path.to_string(),
        })
    }

    fn for_each_matching(&mut self, matcher: &PathMatcher, visit: &mut Visitor<'_>) -> Result<usize> {
        let mut archive = unrar::Archive::new(self.file.path())
            .open_for_processing()
            .map_err(unreadable)?;

        let mut visited = 0;
        while let Some(header) = archive.read_header().map_err(unreadable)? {
            let entry = header.entry();
            let path = normalize_path(&entry.filename.to_string_lossy());
            archive = if entry.is_file() && matcher.matches(&path) {
                let (content, rest) = header.read().map_err(unreadable)?;
                trace!(%path, bytes = content.len(), "rar entry extracted");
                visited += 1;
                if visit(ArchiveEntry::new(path, content)).is_break() {
                    break;
                }
                rest
            } else {
                header.skip().map_err(unreadable)?
            };
        }
        Ok(visited)
    }

    fn entry_count(&self) -> usize { self.paths.len() }
}
