use tabarc_archive::ArchiveFormat;

use crate::error::{Error, Result};

pub const PATH_KEY: &str = "archive path";
pub const DEPTH_KEY: &str = "archive depth";
pub const FORMAT_KEY: &str = "archive format";

/// Pattern used when no `archive path` is given.
pub const MATCH_ALL: &str = "*";

/// Typed form of the archive argument bag.
///
/// `None` everywhere means: every entry, any depth, format taken from the
/// diagnostic path.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ArchiveArgs {
    pub pattern: Option<String>,
    pub depth:   Option<usize>,
    pub format:  Option<ArchiveFormat>,
}

impl ArchiveArgs {
    pub fn new() -> Self { Self::default() }

    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn depth(mut self, depth: usize) -> Self {
        self.depth = Some(depth);
        self
    }

    pub fn format(mut self, format: ArchiveFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn pattern_or_all(&self) -> &str { self.pattern.as_deref().unwrap_or(MATCH_ALL) }

    /// Translate a string key/value bag.
    ///
    /// Keys compare case-insensitively with `_` standing in for a space, so
    /// `Archive_Depth` selects the depth. Empty values are treated as absent
    /// and unrecognised keys are ignored.
    pub fn from_bag<I, K, V>(bag: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut args = Self::new();
        for (key, value) in bag {
            let value = value.as_ref().trim();
            if value.is_empty() {
                continue;
            }
            match normalize_key(key.as_ref()).as_str() {
                PATH_KEY => args.pattern = Some(value.to_string()),
                DEPTH_KEY => {
                    let depth = value.parse().map_err(|_| invalid(DEPTH_KEY, value))?;
                    args.depth = Some(depth);
                }
                FORMAT_KEY => {
                    let format = value.parse().map_err(|_| invalid(FORMAT_KEY, value))?;
                    args.format = Some(format);
                }
                _ => {}
            }
        }
        Ok(args)
    }
}

fn normalize_key(key: &str) -> String {
    key.trim()
        .split(|c: char| c == '_' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .to_ascii_lowercase()
}

fn invalid(name: &'static str, value: &str) -> Error {
    Error::InvalidArgument {
        name,
        value: value.to_string(),
    }
}
