use std::ops::ControlFlow;

use tracing::debug;

use crate::entry::ArchiveEntry;
use crate::error::Result;
use crate::matcher::PathMatcher;
use crate::reader::ArchiveReader;

/// Collect every entry accepted by `matcher`, in the archive's listing order.
///
/// Prefer [`ArchiveReader::for_each_matching`] when each entry can be
/// processed and dropped before the next one is read.
pub fn extract_matching(
    reader: &mut dyn ArchiveReader,
    matcher: &PathMatcher,
) -> Result<Vec<ArchiveEntry>> {
    let mut entries = Vec::new();
    reader.for_each_matching(matcher, &mut |entry| {
        entries.push(entry);
        ControlFlow::Continue(())
    })?;

    debug!(
        format = %reader.format(),
        pattern = matcher.pattern(),
        matched = entries.len(),
        "entries extracted"
    );
    Ok(entries)
}
