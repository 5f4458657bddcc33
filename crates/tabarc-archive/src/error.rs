use std::io;

use crate::format::ArchiveFormat;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{format} archives are not supported by this build")]
    UnsupportedFormat { format: ArchiveFormat },

    #[error("could not read {format} archive: {source}")]
    Unreadable {
        format: ArchiveFormat,
        source: io::Error,
    },

    #[error("entry '{path}' not found in {format} archive")]
    EntryNotFound { format: ArchiveFormat, path: String },

    #[error("invalid archive path pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },
}

impl Error {
    pub(crate) fn unreadable(format: ArchiveFormat, source: impl Into<io::Error>) -> Self {
        Self::Unreadable {
            format,
            source: source.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
