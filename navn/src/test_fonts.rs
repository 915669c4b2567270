//! Small synthetic fonts for tests.

use write_fonts::{
    tables::{
        head::Head,
        maxp::Maxp,
        name::{Name, NameRecord},
    },
    types::{LongDateTime, NameId, Tag},
    FontBuilder, OffsetMarker,
};

use crate::cff::test_data;

/// `head.modified` in every test font.
pub const MODIFIED: i64 = 3_600_000_000;

/// A name table with Windows English records.
pub fn name_table(records: &[(u16, &str)]) -> Name {
    let mut name = Name::default();
    name.name_record = records
        .iter()
        .map(|(name_id, text)| {
            NameRecord::new(
                3,
                1,
                0x409,
                NameId::new(*name_id),
                OffsetMarker::new(text.to_string()),
            )
        })
        .collect();
    name.name_record.sort();
    name
}

fn builder() -> FontBuilder<'static> {
    let mut builder = FontBuilder::new();
    let head = Head {
        units_per_em: 1000,
        modified: LongDateTime::new(MODIFIED),
        ..Default::default()
    };
    builder.add_table(&head).unwrap();
    let maxp = Maxp {
        num_glyphs: 1,
        ..Default::default()
    };
    builder.add_table(&maxp).unwrap();
    builder
}

pub fn truetype(records: &[(u16, &str)]) -> Vec<u8> {
    let mut builder = builder();
    builder.add_table(&name_table(records)).unwrap();
    builder.build()
}

pub fn without_name() -> Vec<u8> {
    builder().build()
}

/// A CFF-flavoured font with FullName "Sample Regular" and FamilyName
/// "Sample".
pub fn cff(font_name: &str) -> Vec<u8> {
    let mut builder = builder();
    builder.add_table(&name_table(&[(1, "Sample"), (6, font_name)])).unwrap();
    builder.add_raw(
        Tag::new(b"CFF "),
        test_data::simple(font_name, "Sample Regular", "Sample"),
    );
    let mut data = builder.build();
    data[..4].copy_from_slice(b"OTTO");
    data
}
