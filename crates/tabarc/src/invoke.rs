use std::ops::ControlFlow;

use tabarc_archive::{ArchiveFormat, PathMatcher, detect_format};
use tracing::{debug, debug_span, trace};

use crate::args::{ArchiveArgs, PATH_KEY};
use crate::error::{Error, Result};
use crate::merge::ResultMerger;
use crate::parse::FragmentParser;
use crate::table::MergedTable;

/// Pick the archive format: explicit choice, then the extension of
/// `diagnostic_path`, then the leading bytes.
pub fn resolve_format(bytes: &[u8], args: &ArchiveArgs, diagnostic_path: &str) -> Result<ArchiveFormat> {
    args.format
        .or_else(|| ArchiveFormat::from_path(diagnostic_path))
        .or_else(|| detect_format(bytes))
        .ok_or_else(|| Error::UnknownFormat {
            path: diagnostic_path.to_string(),
        })
}

/// Extract every entry selected by `args`, decode each with `parser` and
/// merge the results into one table tagged with the source entry path.
///
/// `diagnostic_path` is only used to choose the format and to fill error
/// parameters. The first entry `parser` rejects aborts the whole call.
pub fn invoke(
    bytes: &[u8],
    args: &ArchiveArgs,
    diagnostic_path: &str,
    parser: &dyn FragmentParser,
) -> Result<MergedTable> {
    let format = resolve_format(bytes, args, diagnostic_path)?;
    let span = debug_span!("invoke", path = diagnostic_path, %format);
    let _enter = span.enter();

    let mut reader =
        tabarc_archive::open(bytes, format).map_err(|err| fail(Error::from_archive(err, diagnostic_path)))?;

    let matcher = PathMatcher::compile(args.pattern_or_all(), args.depth).map_err(|_| {
        fail(Error::InvalidArgument {
            name:  PATH_KEY,
            value: args.pattern_or_all().to_string(),
        })
    })?;

    let mut merger = ResultMerger::new();
    let mut rejected = None;
    let matched = reader
        .for_each_matching(&matcher, &mut |entry| match parser.parse(&entry.content) {
            Ok(fragment) => {
                trace!(entry = %entry.path, rows = fragment.len(), "entry decoded");
                merger.push(&entry.path, fragment);
                ControlFlow::Continue(())
            }
            Err(source) => {
                rejected = Some(Error::Parse {
                    entry: entry.path,
                    source,
                });
                ControlFlow::Break(())
            }
        })
        .map_err(|err| fail(Error::from_archive(err, diagnostic_path)))?;
    drop(reader);

    if let Some(err) = rejected {
        return Err(fail(err));
    }
    if matched == 0 {
        return Err(fail(Error::Extract {
            format,
            target: matcher.pattern().to_string(),
        }));
    }

    let table = merger.finish();
    debug!(entries = matched, rows = table.row_count(), "archive merged");
    Ok(table)
}

/// [`invoke`] driven by the raw string argument bag.
pub fn invoke_with_bag<I, K, V>(
    bytes: &[u8],
    bag: I,
    diagnostic_path: &str,
    parser: &dyn FragmentParser,
) -> Result<MergedTable>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let args = ArchiveArgs::from_bag(bag)?;
    invoke(bytes, &args, diagnostic_path, parser)
}

fn fail(err: Error) -> Error {
    debug!(code = err.code(), error = %err, "invoke failed");
    err
}
