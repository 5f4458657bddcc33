#![allow(dead_code)]

use std::io::{Cursor, Write};

use bzip2::write::BzEncoder;
use flate2::write::GzEncoder;
use tabarc::{ArchiveFormat, TarCompress};
use zip::write::SimpleFileOptions;

pub const ENTRY_ORDER: [&str; 4] = ["1.csv", "2.csv", "folder/3.csv", "folder/subfolder/4.csv"];

/// Three `col1,col2` rows whose values name the file they come from.
pub fn csv_for(path: &str) -> String {
    let mut text = String::from("col1,col2\n");
    for row in 1..=3 {
        text.push_str(&format!("{path}-{row}-a,{path}-{row}-b\n"));
    }
    text
}

pub fn sample_entries() -> Vec<(String, Vec<u8>)> {
    ENTRY_ORDER
        .iter()
        .map(|path| (path.to_string(), csv_for(path).into_bytes()))
        .collect()
}

pub fn zip_archive(entries: &[(String, Vec<u8>)]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .add_directory("folder/", SimpleFileOptions::default())
        .expect("add directory");
    for (path, content) in entries {
        writer
            .start_file(path.as_str(), SimpleFileOptions::default())
            .expect("start file");
        writer.write_all(content).expect("write entry");
    }
    writer.finish().expect("finish zip").into_inner()
}

pub fn tar_archive(entries: &[(String, Vec<u8>)]) -> Vec<u8> {
    let mut builder = tar::Builder::new(Vec::new());
    let mut dir = tar::Header::new_gnu();
    dir.set_entry_type(tar::EntryType::Directory);
    dir.set_size(0);
    dir.set_mode(0o755);
    builder
        .append_data(&mut dir, "folder/", std::io::empty())
        .expect("append directory");
    for (path, content) in entries {
        let mut header = tar::Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        builder
            .append_data(&mut header, path, content.as_slice())
            .expect("append entry");
    }
    builder.into_inner().expect("finish tar")
}

pub fn archive(format: ArchiveFormat, entries: &[(String, Vec<u8>)]) -> Vec<u8> {
    match format {
        ArchiveFormat::Zip => zip_archive(entries),
        ArchiveFormat::Tar(TarCompress::None) => tar_archive(entries),
        ArchiveFormat::Tar(TarCompress::Gzip) => {
            let mut encoder = GzEncoder::new(Vec::new(), flate2::Compression::default());
            encoder.write_all(&tar_archive(entries)).expect("gzip");
            encoder.finish().expect("finish gzip")
        }
        ArchiveFormat::Tar(TarCompress::Bzip2) => {
            let mut encoder = BzEncoder::new(Vec::new(), bzip2::Compression::default());
            encoder.write_all(&tar_archive(entries)).expect("bzip2");
            encoder.finish().expect("finish bzip2")
        }
        ArchiveFormat::Rar => panic!("rar archives cannot be written in tests"),
    }
}

/// Every writable format with a file name that resolves to it.
pub fn formats() -> [(ArchiveFormat, &'static str); 4] {
    [
        (ArchiveFormat::Zip, "sample.zip"),
        (ArchiveFormat::Tar(TarCompress::None), "sample.tar"),
        (ArchiveFormat::Tar(TarCompress::Gzip), "sample.tar.gz"),
        (ArchiveFormat::Tar(TarCompress::Bzip2), "sample.tar.bz2"),
    ]
}

/// Stored RAR 4 archive: `b.csv`, directory `folder`, `folder\a.csv` and
/// `.\c.csv`, each a one-column `v` table with a single row.
#[cfg(feature = "rar")]
pub const RAR_SAMPLE: &[u8] = b"\x52\x61\x72\x21\x1a\x07\x00\xcf\x90\x73\x00\x00\x0d\x00\x00\x00\x00\x00\x00\x00\
    \x15\x75\x74\x00\x80\x25\x00\x04\x00\x00\x00\x04\x00\x00\x00\x02\x26\x4b\x0f\x44\
    \x00\x00\x21\x58\x14\x30\x05\x00\x20\x00\x00\x00\x62\x2e\x63\x73\x76\x76\x0a\x31\
    \x0a\xad\x13\x74\xe0\x80\x26\x00\x00\x00\x00\x00\x00\x00\x00\x00\x02\x00\x00\x00\
    \x00\x00\x00\x21\x58\x14\x30\x06\x00\x10\x00\x00\x00\x66\x6f\x6c\x64\x65\x72\xec\
    \x6a\x74\x00\x80\x2c\x00\x04\x00\x00\x00\x04\x00\x00\x00\x02\xe5\x18\x22\x6f\x00\
    \x00\x21\x58\x14\x30\x0c\x00\x20\x00\x00\x00\x66\x6f\x6c\x64\x65\x72\x5c\x61\x2e\
    \x63\x73\x76\x76\x0a\x32\x0a\xe3\x4f\x74\x00\x80\x27\x00\x04\x00\x00\x00\x04\x00\
    \x00\x00\x02\xa4\x29\x39\x76\x00\x00\x21\x58\x14\x30\x07\x00\x20\x00\x00\x00\x2e\
    \x5c\x63\x2e\x63\x73\x76\x76\x0a\x33\x0a\xc4\x3d\x7b\x00\x40\x07\x00";
