use std::io::{self, Read};

use tracing::trace;

use super::{ArchiveReader, Visitor};
use crate::entry::{ArchiveEntry, capacity_hint, normalize_path};
use crate::error::{Error, Result};
use crate::format::{ArchiveFormat, Decoder, TarCompress};
use crate::matcher::PathMatcher;

/// Tar (and tar-based phar) reader over an optionally compressed stream.
///
/// The stream cannot be seeked once compressed, so every pass decodes from
/// the start. `open` makes one pass to validate the archive and index the
/// file entries; a matching walk makes one more and reads only the entries
/// it hands out.
pub struct TarReader<'a> {
    bytes:    &'a [u8],
    compress: TarCompress,
    paths:    Vec<String>,
}

impl<'a> TarReader<'a> {
    pub fn open(bytes: &'a [u8], compress: TarCompress) -> Result<Self> {
        let mut reader = Self {
            bytes,
            compress,
            paths: Vec::new(),
        };

        let mut paths = Vec::new();
        let headers = reader.walk(|_, path| {
            paths.push(path);
            Ok(Step::Skip)
        })?;
        // An empty or all-zero stream parses as a finished archive.
        if headers == 0 {
            return Err(Error::unreadable(
                reader.format(),
                io::Error::new(io::ErrorKind::InvalidData, "no tar header found"),
            ));
        }
        reader.paths = paths;

        Ok(reader)
    }

    fn archive(&self) -> ::tar::Archive<Decoder<&'a [u8]>> {
        ::tar::Archive::new(self.compress.decoder(self.bytes))
    }

    /// Walk the regular-file entries in stream order. The callback decides
    /// whether each entry's content is read and handed back. Returns the
    /// number of headers of any type passed before the walk ended.
    fn walk<F>(&self, mut on_entry: F) -> Result<usize>
    where
        F: FnMut(Option<Vec<u8>>, String) -> Result<Step>,
    {
        let format = self.format();
        let mut archive = self.archive();
        let entries = archive
            .entries()
            .map_err(|e| Error::unreadable(format, e))?;

        let mut headers = 0;
        for entry in entries {
            let mut entry = entry.map_err(|e| Error::unreadable(format, e))?;
            headers += 1;
            if !entry.header().entry_type().is_file() {
                continue;
            }
            let path = normalize_path(&String::from_utf8_lossy(&entry.path_bytes()));

            let mut step = on_entry(None, path.clone())?;
            if let Step::Read = step {
                let mut content = Vec::with_capacity(capacity_hint(entry.size()));
                entry
                    .read_to_end(&mut content)
                    .map_err(|e| Error::unreadable(format, e))?;
                step = on_entry(Some(content), path)?;
            }
            if let Step::Stop = step {
                break;
            }
        }
        Ok(headers)
    }
}

/// What the walk does after offering an entry.
enum Step {
    Skip,
    Read,
    Stop,
}

impl ArchiveReader for TarReader<'_> {
    fn format(&self) -> ArchiveFormat { ArchiveFormat::Tar(self.compress) }

    fn list(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(self.paths.iter().map(String::as_str))
    }

    fn extract(&mut self, path: &str) -> Result<Vec<u8>> {
        let mut found = None;
        self.walk(|content, name| {
            Ok(match content {
                None if name == path => Step::Read,
                None => Step::Skip,
                Some(content) => {
                    found = Some(content);
                    Step::Stop
                }
            })
        })?;

        found.ok_or_else(|| Error::EntryNotFound {
            format: self.format(),
            path: path.to_string(),
        })
    }

    /// Single decoding pass regardless of how many entries match.
    fn for_each_matching(&mut self, matcher: &PathMatcher, visit: &mut Visitor<'_>) -> Result<usize> {
        let mut visited = 0;
        self.walk(|content, path| {
            Ok(match content {
                None if matcher.matches(&path) => Step::Read,
                None => Step::Skip,
                Some(content) => {
                    trace!(%path, bytes = content.len(), "tar entry extracted");
                    visited += 1;
                    if visit(ArchiveEntry::new(path, content)).is_break() {
                        Step::Stop
                    } else {
                        Step::Skip
                    }
                }
            })
        })?;
        Ok(visited)
    }

    fn entry_count(&self) -> usize { self.paths.len() }
}
