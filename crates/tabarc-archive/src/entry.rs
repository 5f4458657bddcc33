/// A file read out of an archive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub path:    String,
    pub content: Vec<u8>,
}

impl ArchiveEntry {
    pub fn new(path: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            path: path.into(),
            content,
        }
    }

    pub fn len(&self) -> usize { self.content.len() }

    pub fn is_empty(&self) -> bool { self.content.is_empty() }
}

/// Normalize a stored entry name to `/` separators relative to the archive root.
pub fn normalize_path(raw: &str) -> String {
    let path = raw.replace('\\', "/");
    let mut path = path.as_str();
    while let Some(rest) = path.strip_prefix("./") {
        path = rest;
    }
    path.to_string()
}

/// Most bytes reserved up front for an entry, whatever its header declares.
const PREALLOC_LIMIT: u64 = 1 << 20;

/// Initial buffer capacity for an entry whose header claims `declared` bytes.
/// Larger entries grow the buffer as their content is actually read.
pub(crate) fn capacity_hint(declared: u64) -> usize { declared.min(PREALLOC_LIMIT) as usize }
