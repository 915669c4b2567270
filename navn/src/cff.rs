//! The naming keys of the [CFF](https://learn.microsoft.com/en-us/typography/opentype/spec/cff) table.
//!
//! The table is read with `read-fonts`. It has no CFF writer, so edits are
//! applied by rebuilding the structures that hold names (the Name INDEX, Top
//! DICT INDEX and String INDEX) and copying everything after them verbatim.
//! Offsets in the Top DICT are moved by however much those structures grew
//! or shrank.

mod dict;
mod index;

use std::{fmt, ops::Range};

use thiserror::Error;
use write_fonts::read::{
    tables::{
        cff::{Cff, CffHeader},
        postscript::{
            dict::Entry, Error as PostScriptError, Index1, Latin1String, StringId,
            STANDARD_STRINGS,
        },
    },
    FontData, FontRead, ReadError,
};

use dict::{Dict, Operator};
use index::write_index;

#[derive(Debug, Error)]
pub enum CffError {
    #[error("{0}")]
    Read(#[from] ReadError),
    #[error("{0}")]
    PostScript(PostScriptError),
    #[error("Unsupported CFF major version {0}")]
    UnsupportedVersion(u8),
    #[error("Expected a single font, found {0}")]
    FontSet(usize),
    #[error("Unexpected end of data")]
    Truncated,
    #[error("Offset out of range after rewriting")]
    OffsetOverflow,
    #[error("Too much data for an INDEX")]
    IndexOverflow,
    #[error("'{0}' cannot be encoded as Latin-1")]
    NotLatin1(String),
    #[error("The font name must not be empty")]
    EmptyFontName,
}

// not a `std::error::Error`, so no `#[from]`
impl From<PostScriptError> for CffError {
    fn from(error: PostScriptError) -> Self {
        CffError::PostScript(error)
    }
}

/// A naming key of the Top DICT.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CffField {
    FullName,
    FamilyName,
    Weight,
    Copyright,
    Notice,
}

impl CffField {
    pub const ALL: [CffField; 5] = [
        CffField::FullName,
        CffField::FamilyName,
        CffField::Weight,
        CffField::Copyright,
        CffField::Notice,
    ];

    fn operator(self) -> Operator {
        match self {
            CffField::FullName => Operator::FULL_NAME,
            CffField::FamilyName => Operator::FAMILY_NAME,
            CffField::Weight => Operator::WEIGHT,
            CffField::Copyright => Operator::COPYRIGHT,
            CffField::Notice => Operator::NOTICE,
        }
    }

    fn string_id(self, entry: &Entry) -> Option<StringId> {
        match (self, entry) {
            (CffField::FullName, Entry::FullName(sid))
            | (CffField::FamilyName, Entry::FamilyName(sid))
            | (CffField::Weight, Entry::Weight(sid))
            | (CffField::Copyright, Entry::Copyright(sid))
            | (CffField::Notice, Entry::Notice(sid)) => Some(*sid),
            _ => None,
        }
    }

    /// The name of the key in a Top DICT.
    pub fn key(self) -> &'static str {
        match self {
            CffField::FullName => "FullName",
            CffField::FamilyName => "FamilyName",
            CffField::Weight => "Weight",
            CffField::Copyright => "Copyright",
            CffField::Notice => "Notice",
        }
    }
}

impl fmt::Display for CffField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// New values for the naming keys. `None` leaves a key unchanged.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CffNames {
    pub font_name: Option<String>,
    pub full_name: Option<String>,
    pub family_name: Option<String>,
    pub weight: Option<String>,
    pub copyright: Option<String>,
    pub notice: Option<String>,
}

impl CffNames {
    pub fn field(&self, field: CffField) -> Option<&str> {
        match field {
            CffField::FullName => self.full_name.as_deref(),
            CffField::FamilyName => self.family_name.as_deref(),
            CffField::Weight => self.weight.as_deref(),
            CffField::Copyright => self.copyright.as_deref(),
            CffField::Notice => self.notice.as_deref(),
        }
    }
}

/// An editable `CFF ` table.
#[derive(Clone, Debug)]
pub struct CffTable {
    data: Vec<u8>,
    header_size: usize,
    font_name: Vec<u8>,
    top_dict: Dict,
    strings: Vec<Vec<u8>>,
    /// Where the Global Subr INDEX sits in `data`. Everything after it is
    /// copied unchanged.
    global_subrs: Range<usize>,
    modified: bool,
}

impl CffTable {
    pub fn parse(bytes: &[u8]) -> Result<CffTable, CffError> {
        let data = FontData::new(bytes);
        let header = CffHeader::read(data)?;
        if header.major() != 1 {
            return Err(CffError::UnsupportedVersion(header.major()));
        }
        let cff = Cff::read(data)?;
        let (names, top_dicts, strings) = (cff.names(), cff.top_dicts(), cff.strings());
        for index in [&names, &top_dicts] {
            if index.count() != 1 {
                return Err(CffError::FontSet(index.count() as usize));
            }
        }

        let header_size = header.hdr_size() as usize;
        let global_subrs_start = header_size
            + names.size_in_bytes()?
            + top_dicts.size_in_bytes()?
            + strings.size_in_bytes()?;
        let global_subrs_end = global_subrs_start + cff.global_subrs().size_in_bytes()?;
        Ok(CffTable {
            data: bytes.to_vec(),
            header_size,
            font_name: names.get(0)?.to_vec(),
            top_dict: Dict::parse(top_dicts.get(0)?)?,
            strings: index_items(&strings)?,
            global_subrs: global_subrs_start..global_subrs_end,
            modified: false,
        })
    }

    /// The PostScript name from the Name INDEX.
    pub fn font_name(&self) -> String {
        Latin1String::new(&self.font_name).to_string()
    }

    pub fn field(&self, field: CffField) -> Option<String> {
        let sid = self
            .top_dict
            .entries()
            .ok()?
            .iter()
            .find_map(|entry| field.string_id(entry))?;
        self.string(sid)
    }

    /// Returns `true` if the name changed.
    pub fn set_font_name(&mut self, name: &str) -> Result<bool, CffError> {
        if name.is_empty() {
            return Err(CffError::EmptyFontName);
        }
        let bytes = string_to_latin1(name)?;
        if bytes == self.font_name {
            return Ok(false);
        }
        log::debug!("CFF FontName: '{}' -> '{name}'", self.font_name());
        self.font_name = bytes;
        self.modified = true;
        Ok(true)
    }

    /// Returns `true` if the value changed.
    pub fn set_field(&mut self, field: CffField, value: &str) -> Result<bool, CffError> {
        let current = self.field(field);
        if current.as_deref() == Some(value) {
            return Ok(false);
        }
        let sid = self.string_id(string_to_latin1(value)?)?;
        log::debug!(
            "CFF {field}: '{}' -> '{value}'",
            current.unwrap_or_default()
        );
        self.top_dict.set(field.operator(), &[sid]);
        self.modified = true;
        Ok(true)
    }

    /// Applies every value present in `names`, returning how many changed.
    pub fn set_names(&mut self, names: &CffNames) -> Result<usize, CffError> {
        let mut changed = 0;
        if let Some(font_name) = &names.font_name {
            changed += self.set_font_name(font_name)? as usize;
        }
        for field in CffField::ALL {
            if let Some(value) = names.field(field) {
                changed += self.set_field(field, value)? as usize;
            }
        }
        Ok(changed)
    }

    /// Replaces `old` with `new` in the font name and every naming key,
    /// returning how many changed.
    ///
    /// Spaces are dropped from `new` in the font name.
    pub fn find_replace(&mut self, old: &str, new: &str) -> Result<usize, CffError> {
        if old.is_empty() {
            return Ok(0);
        }
        let mut changed = 0;
        let font_name = self.font_name();
        if font_name.contains(old) {
            let replaced = font_name.replace(old, &new.replace(' ', ""));
            changed += self.set_font_name(&replaced)? as usize;
        }
        for field in CffField::ALL {
            if let Some(text) = self.field(field).filter(|text| text.contains(old)) {
                changed += self.set_field(field, &text.replace(old, new))? as usize;
            }
        }
        Ok(changed)
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Serializes the table, returning the original bytes if nothing was
    /// edited.
    pub fn compile(&self) -> Result<Vec<u8>, CffError> {
        if !self.modified {
            return Ok(self.data.clone());
        }
        let tail = &self.data[self.global_subrs.end..];
        // offsets are written in fixed-width form, so the prefix length does
        // not depend on their values
        let prefix_len = self.compile_prefix(&self.shifted_top_dict(0)?.0)?.len();
        let delta = prefix_len as i64 - self.global_subrs.end as i64;

        let (mut top_dict, fd_array_offset) = self.shifted_top_dict(delta)?;
        let mut fd_array = Vec::new();
        if let Some(offset) = fd_array_offset.filter(|_| delta != 0) {
            self.compile_fd_array(offset, delta, &mut fd_array)?;
            let new_offset =
                i32::try_from(prefix_len + tail.len()).map_err(|_| CffError::OffsetOverflow)?;
            top_dict.set(Operator::FD_ARRAY, &[new_offset]);
        }

        let mut out = self.compile_prefix(&top_dict)?;
        debug_assert_eq!(out.len(), prefix_len);
        out.extend_from_slice(tail);
        out.extend(fd_array);
        Ok(out)
    }

    /// The Top DICT with every offset moved by `delta`, and the FDArray
    /// offset if the font is CID-keyed.
    fn shifted_top_dict(&self, delta: i64) -> Result<(Dict, Option<usize>), CffError> {
        let mut top_dict = self.top_dict.clone();
        let mut fd_array = None;
        let mut cid_keyed = false;
        for entry in self.top_dict.entries()? {
            match entry {
                // charsets 0 to 2 and encodings 0 and 1 are predefined
                Entry::Charset(offset) if offset > 2 => {
                    top_dict.set(Operator::CHARSET, &[shift(offset, delta)?])
                }
                Entry::Encoding(offset) if offset > 1 => {
                    top_dict.set(Operator::ENCODING, &[shift(offset, delta)?])
                }
                Entry::CharstringsOffset(offset) => {
                    top_dict.set(Operator::CHAR_STRINGS, &[shift(offset, delta)?])
                }
                Entry::PrivateDictRange(range) => {
                    top_dict.set(Operator::PRIVATE, &private_operands(range, delta)?)
                }
                Entry::FdSelectOffset(offset) => {
                    top_dict.set(Operator::FD_SELECT, &[shift(offset, delta)?])
                }
                Entry::FdArrayOffset(offset) => {
                    top_dict.set(Operator::FD_ARRAY, &[shift(offset, delta)?]);
                    fd_array = Some(offset);
                }
                Entry::Ros { .. } => cid_keyed = true,
                _ => (),
            }
        }
        Ok((top_dict, fd_array.filter(|_| cid_keyed)))
    }

    fn compile_prefix(&self, top_dict: &Dict) -> Result<Vec<u8>, CffError> {
        let mut out = self.data[..self.header_size].to_vec();
        write_index(&[&self.font_name], &mut out)?;
        write_index(&[top_dict.compile()], &mut out)?;
        write_index(&self.strings, &mut out)?;
        out.extend_from_slice(&self.data[self.global_subrs.clone()]);
        Ok(out)
    }

    /// Rewrites the FDArray at `offset` with each Private offset moved by
    /// `delta`.
    fn compile_fd_array(
        &self,
        offset: usize,
        delta: i64,
        out: &mut Vec<u8>,
    ) -> Result<(), CffError> {
        let data = FontData::new(&self.data)
            .split_off(offset)
            .ok_or(ReadError::OutOfBounds)?;
        let font_dicts = index_items(&Index1::read(data)?)?
            .iter()
            .map(|data| -> Result<_, CffError> {
                let mut font_dict = Dict::parse(data)?;
                for entry in font_dict.entries()? {
                    if let Entry::PrivateDictRange(range) = entry {
                        font_dict.set(Operator::PRIVATE, &private_operands(range, delta)?);
                    }
                }
                Ok(font_dict.compile())
            })
            .collect::<Result<Vec<_>, _>>()?;
        write_index(&font_dicts, out)
    }

    fn string(&self, sid: StringId) -> Option<String> {
        match sid.standard_string() {
            Ok(string) => Some(string.to_string()),
            Err(index) => self
                .strings
                .get(index)
                .map(|s| Latin1String::new(s).to_string()),
        }
    }

    /// The SID for `bytes`, reusing an identical custom string if there is
    /// one.
    fn string_id(&mut self, bytes: Vec<u8>) -> Result<i32, CffError> {
        let index = match self.strings.iter().position(|s| *s == bytes) {
            Some(index) => index,
            None => {
                self.strings.push(bytes);
                self.strings.len() - 1
            }
        };
        let sid = STANDARD_STRINGS.len() + index;
        if sid > u16::MAX as usize {
            return Err(CffError::IndexOverflow);
        }
        Ok(sid as i32)
    }
}

fn index_items(index: &Index1) -> Result<Vec<Vec<u8>>, CffError> {
    (0..index.count() as usize)
        .map(|i| index.get(i).map(<[u8]>::to_vec).map_err(CffError::from))
        .collect()
}

fn shift(offset: usize, delta: i64) -> Result<i32, CffError> {
    i32::try_from(offset as i64 + delta)
        .ok()
        .filter(|offset| *offset >= 0)
        .ok_or(CffError::OffsetOverflow)
}

/// The Private operator's size and moved offset.
fn private_operands(range: Range<usize>, delta: i64) -> Result<[i32; 2], CffError> {
    let size = i32::try_from(range.len()).map_err(|_| CffError::OffsetOverflow)?;
    Ok([size, shift(range.start, delta)?])
}

fn string_to_latin1(text: &str) -> Result<Vec<u8>, CffError> {
    text.chars()
        .map(|c| u8::try_from(c).map_err(|_| CffError::NotLatin1(text.to_owned())))
        .collect()
}

#[cfg(test)]
pub(crate) mod test_data {
    //! Small hand-assembled CFF tables.

    use super::{dict::Dict, index::write_index, Operator};

    /// A Private DICT holding `defaultWidthX 500`.
    pub const PRIVATE: &[u8] = &[0xF8, 0x88, 20];

    /// One glyph, `endchar`.
    pub fn char_strings() -> Vec<u8> {
        let mut out = Vec::new();
        write_index(&[[14u8]], &mut out).unwrap();
        out
    }

    fn private(offset: usize) -> [i32; 2] {
        [PRIVATE.len() as i32, offset as i32]
    }

    fn assemble(font_name: &str, strings: &[&str], top_dict: &Dict) -> Vec<u8> {
        let mut out = vec![1, 0, 4, 4];
        write_index(&[font_name.as_bytes()], &mut out).unwrap();
        write_index(&[top_dict.compile()], &mut out).unwrap();
        write_index(strings, &mut out).unwrap();
        write_index::<&[u8]>(&[], &mut out).unwrap();
        out
    }

    /// A name-keyed font with FullName and FamilyName as custom strings and
    /// Weight as the standard string "Regular".
    pub fn simple(font_name: &str, full_name: &str, family_name: &str) -> Vec<u8> {
        let strings = [full_name, family_name];
        let top_dict = |char_strings: usize, private_start: usize| {
            let mut dict = Dict::default();
            dict.set(Operator::FULL_NAME, &[391]);
            dict.set(Operator::FAMILY_NAME, &[392]);
            dict.set(Operator::WEIGHT, &[388]);
            dict.set(Operator::CHAR_STRINGS, &[char_strings as i32]);
            dict.set(Operator::PRIVATE, &private(private_start));
            dict
        };
        let start = assemble(font_name, &strings, &top_dict(0, 0)).len();
        let char_strings = char_strings();
        let mut out = assemble(
            font_name,
            &strings,
            &top_dict(start, start + char_strings.len()),
        );
        out.extend(char_strings);
        out.extend(PRIVATE);
        out
    }

    /// A CID-keyed font with one Font DICT in its FDArray.
    pub fn cid_keyed(font_name: &str, full_name: &str) -> Vec<u8> {
        let strings = [full_name, "Adobe", "Identity"];
        let fd_select: &[u8] = &[0, 0];
        let font_dict = |private_start: usize| {
            let mut dict = Dict::default();
            dict.set(Operator::PRIVATE, &private(private_start));
            dict.compile()
        };
        let top_dict = |char_strings: usize, fd_select: usize, fd_array: usize| {
            let mut dict = Dict::default();
            dict.set(Operator::ROS, &[392, 393, 0]);
            dict.set(Operator::FULL_NAME, &[391]);
            dict.set(Operator::CHAR_STRINGS, &[char_strings as i32]);
            dict.set(Operator::FD_SELECT, &[fd_select as i32]);
            dict.set(Operator::FD_ARRAY, &[fd_array as i32]);
            dict
        };
        let char_strings = char_strings();
        let start = assemble(font_name, &strings, &top_dict(0, 0, 0)).len();
        let fd_select_start = start + char_strings.len();
        let private_start = fd_select_start + fd_select.len();
        let fd_array_start = private_start + PRIVATE.len();

        let mut out = assemble(
            font_name,
            &strings,
            &top_dict(start, fd_select_start, fd_array_start),
        );
        out.extend(char_strings);
        out.extend(fd_select);
        out.extend(PRIVATE);
        write_index(&[font_dict(private_start)], &mut out).unwrap();
        out
    }
}
