//! Loading, editing and saving a font file.

use std::{collections::BTreeMap, path::Path};

use chrono::{NaiveDate, Utc};
use write_fonts::{
    from_obj::ToOwnedTable,
    read::{
        tables::{compute_checksum, name as read_name},
        FontData, FontRead, FontRef, ReadError, TableProvider,
    },
    tables::{head::Head, name::Name},
    types::{LongDateTime, Tag},
    FontBuilder,
};

use crate::{cff::CffTable, name, Error};

const CFF: Tag = Tag::new(b"CFF ");
const HEAD: Tag = Tag::new(b"head");
const NAME: Tag = Tag::new(b"name");

/// The value the checksum of a whole font must sum to.
const CHECKSUM_MAGIC: u32 = 0xB1B0AFBA;
/// Offset of `checksumAdjustment` in the head table.
const CHECKSUM_ADJUSTMENT_OFFSET: usize = 8;

/// A font file loaded for editing.
///
/// Tables are decoded only when first asked for. Anything not edited is
/// written back byte for byte.
#[derive(Clone, Debug)]
pub struct Font {
    data: Vec<u8>,
    recalc_timestamp: bool,
    name: Option<Name>,
    cff: Option<CffTable>,
    replaced: BTreeMap<Tag, Vec<u8>>,
}

impl Font {
    pub fn open(path: impl AsRef<Path>, recalc_timestamp: bool) -> Result<Font, Error> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|e| Error::io(path, e))?;
        Font::from_bytes(data, recalc_timestamp)
    }

    pub fn from_bytes(data: Vec<u8>, recalc_timestamp: bool) -> Result<Font, Error> {
        if data.starts_with(b"ttcf") {
            return Err(Error::Collection);
        }
        FontRef::new(&data)?;
        Ok(Font {
            data,
            recalc_timestamp,
            name: None,
            cff: None,
            replaced: BTreeMap::new(),
        })
    }

    /// The editable name table. A font without one starts out empty.
    pub fn name_table_mut(&mut self) -> Result<&mut Name, Error> {
        if self.name.is_none() {
            let name = match self.raw_table(NAME) {
                Some(data) => name::to_editable(&read_name::Name::read(FontData::new(data))?)?,
                None => Name::default(),
            };
            self.name = Some(name);
        }
        Ok(self.name.get_or_insert_with(Name::default))
    }

    pub fn has_cff(&self) -> bool {
        self.raw_table(CFF).is_some()
    }

    pub fn cff_mut(&mut self) -> Result<&mut CffTable, Error> {
        if self.cff.is_none() {
            let data = self.raw_table(CFF).ok_or(Error::NotCff)?;
            self.cff = Some(CffTable::parse(data)?);
        }
        self.cff.as_mut().ok_or(Error::NotCff)
    }

    /// Replaces a table with raw bytes, dropping any pending edits to it.
    pub fn replace_table_data(&mut self, tag: Tag, data: Vec<u8>) {
        match tag {
            NAME => self.name = None,
            CFF => self.cff = None,
            _ => (),
        }
        self.replaced.insert(tag, data);
    }

    /// The current bytes of a table, before any pending edits.
    pub fn raw_table(&self, tag: Tag) -> Option<&[u8]> {
        if let Some(data) = self.replaced.get(&tag) {
            return Some(data.as_slice());
        }
        FontRef::new(&self.data)
            .ok()?
            .table_data(tag)
            .map(|data| data.as_bytes())
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        let path = path.as_ref();
        let data = self.to_bytes()?;
        std::fs::write(path, data).map_err(|e| Error::io(path, e))?;
        log::info!("wrote {}", path.display());
        Ok(())
    }

    /// Compiles the font with all edits applied.
    pub fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        let font = FontRef::new(&self.data)?;
        let mut head: Head = match self.replaced.get(&HEAD) {
            Some(data) => write_fonts::read::tables::head::Head::read(FontData::new(data))?
                .to_owned_table(),
            None => font.head()?.to_owned_table(),
        };
        head.checksum_adjustment = 0;
        if self.recalc_timestamp {
            head.modified = LongDateTime::new(now_since_mac_epoch());
        }

        let mut builder = FontBuilder::new();
        builder.add_table(&head)?;
        if let Some(name) = &self.name {
            builder.add_table(name)?;
        }
        if let Some(cff) = self.cff.as_ref().filter(|cff| cff.is_modified()) {
            builder.add_raw(CFF, cff.compile()?);
        }
        for (tag, data) in &self.replaced {
            if !builder.contains(*tag) {
                builder.add_raw(*tag, data.as_slice());
            }
        }
        builder.copy_missing_tables(font);

        let mut data = builder.build();
        // the builder always writes a TrueType version tag
        data[..4].copy_from_slice(&self.data[..4]);
        set_checksum_adjustment(&mut data)?;
        Ok(data)
    }
}

/// Recomputes `head.checksumAdjustment` over the final file bytes.
///
/// `FontBuilder` already fills it in, but the version tag may since have
/// changed, so the field is zeroed and summed again.
fn set_checksum_adjustment(data: &mut [u8]) -> Result<(), Error> {
    let head_offset = FontRef::new(data)?
        .table_directory()
        .table_records()
        .iter()
        .find(|record| record.tag() == HEAD)
        .map(|record| record.offset() as usize)
        .ok_or(Error::MissingTable(HEAD))?;
    let start = head_offset + CHECKSUM_ADJUSTMENT_OFFSET;
    let field = data.get_mut(start..start + 4).ok_or(ReadError::OutOfBounds)?;
    field.fill(0);
    let adjustment = CHECKSUM_MAGIC.wrapping_sub(compute_checksum(data));
    data[start..start + 4].copy_from_slice(&adjustment.to_be_bytes());
    Ok(())
}

/// Seconds since 1904-01-01, the epoch of `LONGDATETIME`.
fn now_since_mac_epoch() -> i64 {
    NaiveDate::from_ymd_opt(1904, 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|epoch| (Utc::now().naive_utc() - epoch).num_seconds())
        .unwrap_or_default()
}
