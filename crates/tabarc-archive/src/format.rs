use std::fmt;
#[cfg(feature = "tar")]
use std::io::Read;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArchiveFormat {
    Zip,
    Rar,
    /// Tar, including tar-based phar, with an optional outer compression stream.
    Tar(TarCompress),
}

/// Outer compression wrapped around a tar stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TarCompress {
    None,
    Gzip,
    Bzip2,
}

/// Known extensions, matched against the end of the lowercased path.
const SUFFIXES: &[(&str, ArchiveFormat)] = &[
    (".tar.gzip", ArchiveFormat::Tar(TarCompress::Gzip)),
    (".tar.bz2", ArchiveFormat::Tar(TarCompress::Bzip2)),
    (".phar.bz2", ArchiveFormat::Tar(TarCompress::Bzip2)),
    (".tar.gz", ArchiveFormat::Tar(TarCompress::Gzip)),
    (".phar.gz", ArchiveFormat::Tar(TarCompress::Gzip)),
    (".tbz2", ArchiveFormat::Tar(TarCompress::Bzip2)),
    (".phar", ArchiveFormat::Tar(TarCompress::None)),
    (".tgz", ArchiveFormat::Tar(TarCompress::Gzip)),
    (".tbz", ArchiveFormat::Tar(TarCompress::Bzip2)),
    (".tar", ArchiveFormat::Tar(TarCompress::None)),
    (".zip", ArchiveFormat::Zip),
    (".rar", ArchiveFormat::Rar),
];

impl ArchiveFormat {
    /// Resolve the format from the extension of a file path or URL.
    ///
    /// Query strings and fragments are ignored, and the comparison is
    /// case-insensitive.
    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or(path);
        let path = path.to_ascii_lowercase();
        SUFFIXES
            .iter()
            .find(|(suffix, _)| path.ends_with(suffix))
            .map(|&(_, format)| format)
    }

    /// Whether a reader for this format was compiled into the crate.
    pub fn is_supported(self) -> bool {
        match self {
            Self::Zip => cfg!(feature = "zip"),
            Self::Rar => cfg!(feature = "rar"),
            Self::Tar(_) => cfg!(feature = "tar"),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Zip => "zip",
            Self::Rar => "rar",
            Self::Tar(TarCompress::None) => "tar",
            Self::Tar(TarCompress::Gzip) => "tar.gz",
            Self::Tar(TarCompress::Bzip2) => "tar.bz2",
        }
    }
}

impl fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.name()) }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown archive format: {0}")]
pub struct ParseFormatError(pub String);

impl FromStr for ArchiveFormat {
    type Err = ParseFormatError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().trim_start_matches('.').to_ascii_lowercase().as_str() {
            "zip" => Ok(Self::Zip),
            "rar" => Ok(Self::Rar),
            "tar" | "phar" => Ok(Self::Tar(TarCompress::None)),
            "tar.gz" | "tgz" | "tar.gzip" | "phar.gz" => Ok(Self::Tar(TarCompress::Gzip)),
            "tar.bz2" | "tbz2" | "tbz" | "phar.bz2" => Ok(Self::Tar(TarCompress::Bzip2)),
            _ => Err(ParseFormatError(s.to_string())),
        }
    }
}

#[cfg(feature = "tar")]
impl TarCompress {
    /// Wrap `reader` in the decoder for this compression.
    pub fn decoder<R: Read>(self, reader: R) -> Decoder<R> {
        match self {
            Self::None => Decoder::Passthrough(reader),
            Self::Gzip => Decoder::Gzip(Box::new(flate2::read::GzDecoder::new(reader))),
            Self::Bzip2 => Decoder::Bzip2(Box::new(bzip2::read::BzDecoder::new(reader))),
        }
    }
}

/// Decoder wrapper for the outer tar compression.
#[cfg(feature = "tar")]
pub enum Decoder<R> {
    Passthrough(R),
    Gzip(Box<flate2::read::GzDecoder<R>>),
    Bzip2(Box<bzip2::read::BzDecoder<R>>),
}

#[cfg(feature = "tar")]
impl<R> fmt::Debug for Decoder<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Passthrough(_) => "Passthrough",
            Self::Gzip(_) => "Gzip",
            Self::Bzip2(_) => "Bzip2",
        })
    }
}

#[cfg(feature = "tar")]
impl<R: Read> Read for Decoder<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match self {
            Self::Passthrough(r) => r.read(buf),
            Self::Gzip(d) => d.read(buf),
            Self::Bzip2(d) => d.read(buf),
        }
    }
}

/// Guess the format from leading magic bytes.
pub fn detect_format(data: &[u8]) -> Option<ArchiveFormat> {
    match data {
        [0x50, 0x4B, 0x03, 0x04, ..] | [0x50, 0x4B, 0x05, 0x06, ..] => Some(ArchiveFormat::Zip),
        [0x52, 0x61, 0x72, 0x21, 0x1A, 0x07, ..] => Some(ArchiveFormat::Rar),
        [0x1F, 0x8B, ..] => Some(ArchiveFormat::Tar(TarCompress::Gzip)),
        [b'B', b'Z', b'h', ..] => Some(ArchiveFormat::Tar(TarCompress::Bzip2)),
        _ if is_tar_header(data) => Some(ArchiveFormat::Tar(TarCompress::None)),
        _ => None,
    }
}

fn is_tar_header(data: &[u8]) -> bool { data.len() >= 512 && data[257..262] == *b"ustar" }
