mod common;

use common::{ENTRY_ORDER, archive, formats, sample_entries};
use tabarc::{
    ArchiveArgs, ArchiveFormat, DelimitedParser, Error, JsonParser, MergedTable, PROVENANCE_COLUMN,
    TarCompress, invoke, invoke_with_bag,
};

fn run(bytes: &[u8], args: &ArchiveArgs, path: &str) -> tabarc::Result<MergedTable> {
    invoke(bytes, args, path, &DelimitedParser::csv())
}

/// Provenance values collapsed to one entry per run of equal paths.
fn entry_sequence(table: &MergedTable) -> Vec<&str> {
    let mut sequence: Vec<&str> = Vec::new();
    for path in table.provenance() {
        if sequence.last() != Some(&path.as_str()) {
            sequence.push(path);
        }
    }
    sequence
}

#[test]
fn literal_pattern_selects_one_entry() {
    for (format, name) in formats() {
        let bytes = archive(format, &sample_entries());
        let table = run(&bytes, &ArchiveArgs::new().pattern("1.csv"), name).unwrap();

        assert_eq!(table.row_count(), 3, "{format}");
        assert!(table.provenance().iter().all(|p| p == "1.csv"), "{format}");
        assert_eq!(
            table.column("col1").unwrap(),
            ["1.csv-1-a", "1.csv-2-a", "1.csv-3-a"],
            "{format}"
        );
    }
}

#[test]
fn wildcard_keeps_archive_order() {
    for (format, name) in formats() {
        let bytes = archive(format, &sample_entries());
        let table = run(&bytes, &ArchiveArgs::new().pattern("*"), name).unwrap();

        assert_eq!(table.row_count(), 12, "{format}");
        assert_eq!(entry_sequence(&table), ENTRY_ORDER, "{format}");
        assert_eq!(
            table.column_names().collect::<Vec<_>>(),
            ["col1", "col2", PROVENANCE_COLUMN],
            "{format}"
        );
        assert_eq!(table.column("col2").unwrap()[11], "folder/subfolder/4.csv-3-b");
    }
}

#[test]
fn default_args_match_everything() {
    let bytes = archive(ArchiveFormat::Zip, &sample_entries());
    let table = run(&bytes, &ArchiveArgs::new(), "sample.zip").unwrap();
    assert_eq!(table.row_count(), 12);
}

#[test]
fn depth_limit_excludes_deeper_entries() {
    for (format, name) in formats() {
        let bytes = archive(format, &sample_entries());
        let table = run(&bytes, &ArchiveArgs::new().pattern("*").depth(1), name).unwrap();

        assert_eq!(table.row_count(), 9, "{format}");
        assert_eq!(entry_sequence(&table), ENTRY_ORDER[..3], "{format}");
    }
}

#[test]
fn depth_zero_keeps_top_level() {
    let bytes = archive(ArchiveFormat::Zip, &sample_entries());
    let table = run(&bytes, &ArchiveArgs::new().depth(0), "sample.zip").unwrap();
    assert_eq!(entry_sequence(&table), ["1.csv", "2.csv"]);
}

#[test]
fn extension_wildcard_matches_same_set() {
    for (format, name) in formats() {
        let bytes = archive(format, &sample_entries());
        let all = run(&bytes, &ArchiveArgs::new().pattern("*"), name).unwrap();
        let csv = run(&bytes, &ArchiveArgs::new().pattern("*.csv"), name).unwrap();
        assert_eq!(all, csv, "{format}");
    }
}

#[test]
fn folder_pattern() {
    let bytes = archive(ArchiveFormat::Tar(TarCompress::Gzip), &sample_entries());
    let table = run(&bytes, &ArchiveArgs::new().pattern("folder/*"), "sample.tgz").unwrap();
    assert_eq!(entry_sequence(&table), ["folder/3.csv", "folder/subfolder/4.csv"]);
}

#[test]
fn absent_entry_is_could_not_extract() {
    for (format, name) in formats() {
        let bytes = archive(format, &sample_entries());
        let err = run(&bytes, &ArchiveArgs::new().pattern("absent.csv"), name).unwrap_err();

        assert!(matches!(err, Error::Extract { .. }), "{format}: {err:?}");
        let record = err.record();
        assert_eq!(record.code, "could-not-extract");
        assert_eq!(record.params, [format.to_string(), "absent.csv".to_string()]);
    }
}

#[test]
fn garbage_is_could_not_read() {
    let garbage = b"definitely not an archive, just some bytes".repeat(20);
    for (format, name) in formats() {
        let err = run(&garbage, &ArchiveArgs::new(), name).unwrap_err();

        let record = err.record();
        assert_eq!(record.code, "could-not-read", "{format}: {err:?}");
        assert_eq!(record.params, [format.to_string(), name.to_string()]);
    }
}

#[test]
fn empty_input_is_could_not_read() {
    for (format, name) in formats() {
        let err = run(b"", &ArchiveArgs::new(), name).unwrap_err();
        let record = err.record();
        assert_eq!(record.code, "could-not-read", "{format}: {err:?}");
        assert_eq!(record.params, [format.to_string(), name.to_string()]);
    }

    let err = run(&[0u8; 1024], &ArchiveArgs::new(), "zeros.tar").unwrap_err();
    assert_eq!(err.record().params, ["tar", "zeros.tar"]);
    assert_eq!(err.code(), "could-not-read");
}

#[test]
fn truncated_archive_is_could_not_read() {
    for (format, name) in formats() {
        let bytes = archive(format, &sample_entries());
        let truncated = &bytes[..bytes.len() / 3];
        let err = run(truncated, &ArchiveArgs::new(), name).unwrap_err();
        assert_eq!(err.code(), "could-not-read", "{format}: {err:?}");
    }
}

#[test]
fn wrong_compression_is_could_not_read() {
    let bytes = archive(ArchiveFormat::Tar(TarCompress::None), &sample_entries());
    let err = run(&bytes, &ArchiveArgs::new(), "mislabelled.tar.bz2").unwrap_err();
    assert_eq!(err.record().params, ["tar.bz2", "mislabelled.tar.bz2"]);
}

#[test]
fn repeated_calls_are_identical() {
    for (format, name) in formats() {
        let bytes = archive(format, &sample_entries());
        let args = ArchiveArgs::new().pattern("*");
        let first = serde_json::to_vec(&run(&bytes, &args, name).unwrap()).unwrap();
        let second = serde_json::to_vec(&run(&bytes, &args, name).unwrap()).unwrap();
        assert_eq!(first, second, "{format}");
    }
}

#[test]
fn first_rejected_entry_fails_the_call() {
    let mut entries = sample_entries();
    entries[1].1 = b"col1,col2\n1,2,3\n".to_vec();
    let bytes = archive(ArchiveFormat::Zip, &entries);

    let err = run(&bytes, &ArchiveArgs::new(), "sample.zip").unwrap_err();
    let record = err.record();
    assert_eq!(record.code, "could-not-parse");
    assert_eq!(record.params[0], "2.csv");
}

#[test]
fn explicit_format_overrides_extension() {
    let bytes = archive(ArchiveFormat::Tar(TarCompress::Bzip2), &sample_entries());
    let args = ArchiveArgs::new().format(ArchiveFormat::Tar(TarCompress::Bzip2));
    let table = run(&bytes, &args, "https://host/export?id=7").unwrap();
    assert_eq!(table.row_count(), 12);
}

#[test]
fn url_extension_selects_format() {
    let bytes = archive(ArchiveFormat::Zip, &sample_entries());
    let table = run(&bytes, &ArchiveArgs::new(), "https://host/data.ZIP?token=abc#top").unwrap();
    assert_eq!(table.row_count(), 12);
}

#[test]
fn magic_bytes_when_extension_is_silent() {
    for (format, _) in formats() {
        let bytes = archive(format, &sample_entries());
        let table = run(&bytes, &ArchiveArgs::new(), "download").unwrap();
        assert_eq!(table.row_count(), 12, "{format}");
    }
}

#[test]
fn unrecognised_bytes_without_extension() {
    let err = run(b"col1,col2\n1,2\n", &ArchiveArgs::new(), "download").unwrap_err();
    assert_eq!(err.record().code, "unknown-format");
    assert_eq!(err.record().params, ["download"]);
}

#[cfg(not(feature = "rar"))]
#[test]
fn rar_without_backend_is_unsupported() {
    let err = run(b"Rar!\x1a\x07\x01\x00", &ArchiveArgs::new(), "sample.rar").unwrap_err();
    let record = err.record();
    assert_eq!(record.code, "unsupported-format");
    assert_eq!(record.params, ["rar", "sample.rar"]);
}

#[cfg(feature = "rar")]
#[test]
fn rar_entries_are_merged() {
    let table = run(common::RAR_SAMPLE, &ArchiveArgs::new(), "sample.rar").unwrap();
    assert_eq!(table.column("v").unwrap(), ["1", "2", "3"]);
    assert_eq!(table.provenance(), ["b.csv", "folder/a.csv", "c.csv"]);

    let err = run(common::RAR_SAMPLE, &ArchiveArgs::new().pattern("absent.csv"), "sample.rar").unwrap_err();
    assert_eq!(err.record().params, ["rar", "absent.csv"]);

    let err = run(b"Rar!\x1a\x07\x00 and then noise", &ArchiveArgs::new(), "sample.rar").unwrap_err();
    assert_eq!(err.record().params, ["rar", "sample.rar"]);
    assert_eq!(err.code(), "could-not-read");
}

#[test]
fn argument_bag_drives_the_call() {
    let bytes = archive(ArchiveFormat::Zip, &sample_entries());
    let table = invoke_with_bag(
        &bytes,
        [("archive path", "folder/*"), ("archive depth", "1"), ("sheet", "ignored")],
        "sample.zip",
        &DelimitedParser::csv(),
    )
    .unwrap();
    assert_eq!(entry_sequence(&table), ["folder/3.csv"]);

    let err = invoke_with_bag(
        &bytes,
        [("archive depth", "deep")],
        "sample.zip",
        &DelimitedParser::csv(),
    )
    .unwrap_err();
    assert_eq!(err.record().code, "invalid-argument");
}

#[test]
fn heterogeneous_fragments_are_unioned() {
    let entries = vec![
        ("a.json".to_string(), br#"[{"id":"1","name":"x"}]"#.to_vec()),
        ("b.json".to_string(), br#"[{"id":"2","score":9}]"#.to_vec()),
    ];
    let bytes = archive(ArchiveFormat::Zip, &entries);
    let table = invoke(&bytes, &ArchiveArgs::new(), "mixed.zip", &JsonParser).unwrap();

    assert_eq!(
        table.column_names().collect::<Vec<_>>(),
        ["id", "name", "score", PROVENANCE_COLUMN]
    );
    assert_eq!(table.column("name").unwrap(), ["x", ""]);
    assert_eq!(table.column("score").unwrap(), ["", "9"]);
    assert_eq!(table.provenance(), ["a.json", "b.json"]);
}

#[test]
fn json_columns_keep_document_order() {
    let entries = vec![("rows.json".to_string(), br#"[{"zeta":"1","alpha":"2"}]"#.to_vec())];
    let bytes = archive(ArchiveFormat::Zip, &entries);
    let table = invoke(&bytes, &ArchiveArgs::new(), "rows.zip", &JsonParser).unwrap();

    assert_eq!(
        table.column_names().collect::<Vec<_>>(),
        ["zeta", "alpha", PROVENANCE_COLUMN]
    );
}
