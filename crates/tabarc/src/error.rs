use serde::Serialize;
use tabarc_archive::ArchiveFormat;

use crate::parse::ParseError;

pub const COULD_NOT_READ: &str = "could-not-read";
pub const COULD_NOT_EXTRACT: &str = "could-not-extract";
pub const UNSUPPORTED_FORMAT: &str = "unsupported-format";
pub const UNKNOWN_FORMAT: &str = "unknown-format";
pub const COULD_NOT_PARSE: &str = "could-not-parse";
pub const INVALID_ARGUMENT: &str = "invalid-argument";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("could not read '{path}' as a {format} archive")]
    Read {
        format: ArchiveFormat,
        path:   String,
        source: tabarc_archive::Error,
    },

    #[error("nothing in the {format} archive matches '{target}'")]
    Extract {
        format: ArchiveFormat,
        target: String,
    },

    #[error("{format} archives are not supported by this build ('{path}')")]
    UnsupportedFormat { format: ArchiveFormat, path: String },

    #[error("cannot tell the archive format of '{path}'")]
    UnknownFormat { path: String },

    #[error("could not parse archived file '{entry}': {source}")]
    Parse { entry: String, source: ParseError },

    #[error("invalid value '{value}' for '{name}'")]
    InvalidArgument { name: &'static str, value: String },
}

/// Symbolic form of an [`Error`] for localized rendering by the caller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ErrorRecord {
    pub code:   &'static str,
    pub params: Vec<String>,
}

impl Error {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Read { .. } => COULD_NOT_READ,
            Self::Extract { .. } => COULD_NOT_EXTRACT,
            Self::UnsupportedFormat { .. } => UNSUPPORTED_FORMAT,
            Self::UnknownFormat { .. } => UNKNOWN_FORMAT,
            Self::Parse { .. } => COULD_NOT_PARSE,
            Self::InvalidArgument { .. } => INVALID_ARGUMENT,
        }
    }

    pub fn record(&self) -> ErrorRecord {
        let params = match self {
            Self::Read { format, path, .. } => vec![format.to_string(), path.clone()],
            Self::Extract { format, target } => vec![format.to_string(), target.clone()],
            Self::UnsupportedFormat { format, path } => vec![format.to_string(), path.clone()],
            Self::UnknownFormat { path } => vec![path.clone()],
            Self::Parse { entry, source } => vec![entry.clone(), source.to_string()],
            Self::InvalidArgument { name, value } => vec![name.to_string(), value.clone()],
        };
        ErrorRecord {
            code: self.code(),
            params,
        }
    }

    /// Attach call context to an archive-layer error.
    pub(crate) fn from_archive(err: tabarc_archive::Error, path: &str) -> Self {
        match err {
            tabarc_archive::Error::UnsupportedFormat { format } => Self::UnsupportedFormat {
                format,
                path: path.to_string(),
            },
            tabarc_archive::Error::EntryNotFound { format, path: entry } => Self::Extract {
                format,
                target: entry,
            },
            tabarc_archive::Error::InvalidPattern { ref pattern, .. } => Self::InvalidArgument {
                name:  crate::args::PATH_KEY,
                value: pattern.clone(),
            },
            err @ tabarc_archive::Error::Unreadable { format, .. } => Self::Read {
                format,
                path: path.to_string(),
                source: err,
            },
        }
    }
}

impl From<&Error> for ErrorRecord {
    fn from(err: &Error) -> Self { err.record() }
}

pub type Result<T> = std::result::Result<T, Error>;
