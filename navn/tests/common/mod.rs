//! Shared helpers for running the `navn` binary against generated fonts.

use std::{
    path::{Path, PathBuf},
    process::{Command, Output},
};

use write_fonts::{
    read::{FontRef, TableProvider},
    tables::{
        head::Head,
        maxp::Maxp,
        name::{Name, NameRecord},
    },
    types::NameId,
    FontBuilder, OffsetMarker,
};

/// Writes a TrueType font with Windows English records to `dir`.
pub fn write_font(dir: &Path, file_name: &str, records: &[(u16, &str)]) -> PathBuf {
    let mut name = Name::default();
    name.name_record = records
        .iter()
        .map(|(id, text)| {
            NameRecord::new(3, 1, 0x409, NameId::new(*id), OffsetMarker::new(text.to_string()))
        })
        .collect();
    name.name_record.sort();

    let mut builder = FontBuilder::new();
    builder
        .add_table(&Head {
            units_per_em: 1000,
            ..Default::default()
        })
        .unwrap();
    builder
        .add_table(&Maxp {
            num_glyphs: 1,
            ..Default::default()
        })
        .unwrap();
    builder.add_table(&name).unwrap();
    let path = dir.join(file_name);
    std::fs::write(&path, builder.build()).unwrap();
    path
}

/// `(platform, language, name ID, text)` for every record in the font.
pub fn records(path: &Path) -> Vec<(u16, u16, u16, String)> {
    let data = std::fs::read(path).unwrap();
    let font = FontRef::new(&data).unwrap();
    let name = font.name().unwrap();
    name.name_record()
        .iter()
        .map(|record| {
            (
                record.platform_id(),
                record.language_id(),
                record.name_id().to_u16(),
                record
                    .string(name.string_data())
                    .unwrap()
                    .chars()
                    .collect(),
            )
        })
        .collect()
}

pub fn navn(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_navn"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// `head.modified`, in seconds since 1904.
pub fn modified(path: &Path) -> i64 {
    let data = std::fs::read(path).unwrap();
    FontRef::new(&data).unwrap().head().unwrap().modified().as_secs()
}

/// The checksum of the whole file, which must come out to 0xB1B0AFBA.
pub fn file_checksum(path: &Path) -> u32 {
    write_fonts::read::tables::compute_checksum(&std::fs::read(path).unwrap())
}
