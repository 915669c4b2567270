//! Editing the records of the name table.
//!
//! All operations work on an owned [`Name`] from `write-fonts`, and leave
//! its records sorted so that the table can be compiled again.

use std::{collections::BTreeMap, str::FromStr};

use write_fonts::{
    from_obj::ToOwnedTable,
    read::tables::name::{self as read_name, Encoding, MacRomanMapping},
    tables::name::{Name, NameRecord},
    types::NameId,
    OffsetMarker,
};

use crate::{
    language::{self, MAC_SCRIPT_ROMAN},
    Error, MAX_NAME_ID,
};

/// The platform ID for Macintosh records.
pub const MAC_PLATFORM_ID: u16 = 1;
/// The platform ID for Windows records.
pub const WINDOWS_PLATFORM_ID: u16 = 3;
/// The Macintosh Roman encoding ID.
pub const MAC_ROMAN_ENCODING_ID: u16 = 0;
/// The Windows Unicode BMP encoding ID.
pub const WINDOWS_UNICODE_BMP_ENCODING_ID: u16 = 1;

/// Name IDs below this are reserved for predefined names.
const FIRST_FONT_SPECIFIC_NAME_ID: u16 = 256;

/// One of the two platforms whose records we write.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Platform {
    Windows,
    Mac,
}

impl Platform {
    pub const fn platform_id(self) -> u16 {
        match self {
            Platform::Windows => WINDOWS_PLATFORM_ID,
            Platform::Mac => MAC_PLATFORM_ID,
        }
    }

    /// The encoding used for records written on this platform.
    pub const fn encoding_id(self) -> u16 {
        match self {
            Platform::Windows => WINDOWS_UNICODE_BMP_ENCODING_ID,
            Platform::Mac => MAC_ROMAN_ENCODING_ID,
        }
    }

    /// The language ID for `tag` on this platform.
    ///
    /// For the Mac this is only returned for languages written in the Roman
    /// script.
    pub fn language_id(self, tag: &str) -> Option<u16> {
        match self {
            Platform::Windows => language::windows_language_id(tag),
            Platform::Mac => language::mac_language_id(tag)
                .filter(|id| language::mac_script(*id) == Some(MAC_SCRIPT_ROMAN)),
        }
    }

    /// The tag for one of this platform's language IDs.
    pub fn language_tag(self, language_id: u16) -> Option<&'static str> {
        match self {
            Platform::Windows => language::windows_language_tag(language_id),
            Platform::Mac => language::mac_language_tag(language_id),
        }
    }
}

/// Selects records by platform. The default selects every platform.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlatformFilter(Option<Platform>);

impl PlatformFilter {
    pub const ALL: PlatformFilter = PlatformFilter(None);

    pub const fn only(platform: Platform) -> Self {
        PlatformFilter(Some(platform))
    }

    pub fn includes(self, platform_id: u16) -> bool {
        self.0.is_none_or(|platform| platform.platform_id() == platform_id)
    }

    pub fn windows(self) -> bool {
        self.0 != Some(Platform::Mac)
    }

    pub fn mac(self) -> bool {
        self.0 != Some(Platform::Windows)
    }
}

impl From<Option<Platform>> for PlatformFilter {
    fn from(src: Option<Platform>) -> Self {
        PlatformFilter(src)
    }
}

/// Selects records by language.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LanguageFilter {
    All,
    Tag(String),
}

impl FromStr for LanguageFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s.eq_ignore_ascii_case("all") {
            LanguageFilter::All
        } else {
            LanguageFilter::Tag(s.to_owned())
        })
    }
}

/// Converts a parsed name table into an editable one.
///
/// Fails if any record uses an encoding that could not be written back, so
/// that such records are never dropped silently.
pub fn to_editable(table: &read_name::Name) -> Result<Name, Error> {
    for record in table.name_record() {
        if matches!(
            Encoding::new(record.platform_id(), record.encoding_id()),
            Encoding::Unknown
        ) {
            return Err(Error::UnsupportedEncoding {
                platform_id: record.platform_id(),
                encoding_id: record.encoding_id(),
            });
        }
    }
    let mut name: Name = table.to_owned_table();
    sort(&mut name);
    Ok(name)
}

/// Writes `string` under `name_id` in the given language, on each selected
/// platform, and returns the name ID used.
///
/// Existing records are overwritten. Without a `name_id`, the first unused
/// font-specific ID is taken.
pub fn set_multilingual_name(
    name: &mut Name,
    name_id: Option<NameId>,
    language: &str,
    string: &str,
    platforms: PlatformFilter,
) -> Result<NameId, Error> {
    if language::windows_language_id(language).is_none()
        && language::mac_language_id(language).is_none()
    {
        return Err(Error::UnknownLanguage(language.to_owned()));
    }
    let name_id = match name_id {
        Some(id) => id,
        None => first_unused_name_id(name)?,
    };

    let mut write_mac = platforms.mac();
    let mut written = 0;
    if platforms.windows() {
        match Platform::Windows.language_id(language) {
            Some(language_id) => {
                upsert(name, Platform::Windows, language_id, name_id, string);
                written += 1;
            }
            None => {
                log::warn!("no Windows language ID for '{language}', writing a Mac record instead");
                write_mac = true;
            }
        }
    }
    if write_mac {
        match Platform::Mac.language_id(language) {
            Some(_) if !is_mac_roman(string) => {
                log::warn!("'{string}' is not representable in MacRoman, skipping Mac record")
            }
            Some(language_id) => {
                upsert(name, Platform::Mac, language_id, name_id, string);
                written += 1;
            }
            None => log::warn!("no Mac Roman language ID for '{language}', skipping Mac record"),
        }
    }

    if written == 0 {
        return Err(Error::NothingWritten(language.to_owned()));
    }
    sort(name);
    Ok(name_id)
}

/// Removes the records for `name_id` in the given language on the selected
/// platforms, returning how many were removed.
pub fn del_name_record(
    name: &mut Name,
    name_id: NameId,
    language: &LanguageFilter,
    platforms: PlatformFilter,
) -> Result<usize, Error> {
    let (windows_language, mac_language) = match language {
        LanguageFilter::All => (None, None),
        LanguageFilter::Tag(tag) => {
            let ids = (
                language::windows_language_id(tag),
                language::mac_language_id(tag),
            );
            if ids == (None, None) {
                return Err(Error::UnknownLanguage(tag.clone()));
            }
            ids
        }
    };
    let any_language = matches!(language, LanguageFilter::All);
    let matches = |record: &NameRecord| {
        if record.name_id != name_id {
            return false;
        }
        match record.platform_id {
            WINDOWS_PLATFORM_ID => {
                platforms.windows()
                    && (any_language || windows_language == Some(record.language_id))
            }
            MAC_PLATFORM_ID => {
                platforms.mac() && (any_language || mac_language == Some(record.language_id))
            }
            _ => false,
        }
    };
    Ok(remove_where(name, matches))
}

/// Removes every record, returning how many there were.
pub fn clear(name: &mut Name) -> usize {
    let count = name.name_record.len();
    name.name_record.clear();
    count
}

/// Copies each Windows record to the Macintosh platform.
///
/// Records whose language has no Mac Roman equivalent, or whose text is not
/// representable in MacRoman, are skipped. When several Windows encodings
/// hold the same language and name ID, the first in table order is copied.
pub fn win_to_mac(name: &mut Name) -> usize {
    let mut copies = BTreeMap::new();
    for (mac_language_id, name_id, text) in name
        .name_record
        .iter()
        .filter(|record| record.platform_id == WINDOWS_PLATFORM_ID)
        .filter_map(|record| {
            let text = text(record);
            let Some(mac_language_id) = language::windows_language_tag(record.language_id)
                .and_then(|tag| Platform::Mac.language_id(tag))
            else {
                log::warn!(
                    "no Mac language for Windows language 0x{:04X}, skipping name ID {}",
                    record.language_id,
                    record.name_id
                );
                return None;
            };
            if !is_mac_roman(text) {
                log::warn!("name ID {} is not representable in MacRoman", record.name_id);
                return None;
            }
            Some((mac_language_id, record.name_id, text.to_owned()))
        })
    {
        copies.entry((mac_language_id, name_id)).or_insert(text);
    }

    for ((language_id, name_id), text) in &copies {
        upsert(name, Platform::Mac, *language_id, *name_id, text);
    }
    sort(name);
    copies.len()
}

/// Removes every Macintosh record whose name ID is not in `exclude`.
pub fn del_mac_names(name: &mut Name, exclude: &[NameId]) -> usize {
    remove_where(name, |record| {
        record.platform_id == MAC_PLATFORM_ID && !exclude.contains(&record.name_id)
    })
}

/// Replaces each occurrence of `old` with `new`, returning the number of
/// records changed.
///
/// An ID in `exclude` is skipped even if it is also `name_id`.
pub fn find_replace(
    name: &mut Name,
    old: &str,
    new: &str,
    name_id: Option<NameId>,
    platforms: PlatformFilter,
    exclude: &[NameId],
) -> Result<usize, Error> {
    if old.is_empty() {
        return Err(Error::EmptySearch);
    }
    let selected = |record: &NameRecord| {
        !exclude.contains(&record.name_id)
            && name_id.is_none_or(|id| id == record.name_id)
            && text(record).contains(old)
    };
    rewrite_records(name, platforms, selected, |text| text.replace(old, new))
}

/// Prepends `prefix` and a space to the selected records.
pub fn add_prefix(
    name: &mut Name,
    prefix: &str,
    name_ids: &[NameId],
    platforms: PlatformFilter,
) -> Result<usize, Error> {
    rewrite_records(
        name,
        platforms,
        |record| name_ids.contains(&record.name_id),
        |text| format!("{prefix} {text}"),
    )
}

/// Appends a space and `suffix` to the selected records.
pub fn add_suffix(
    name: &mut Name,
    suffix: &str,
    name_ids: &[NameId],
    platforms: PlatformFilter,
) -> Result<usize, Error> {
    rewrite_records(
        name,
        platforms,
        |record| name_ids.contains(&record.name_id),
        |text| format!("{text} {suffix}"),
    )
}

/// The string of a record.
pub fn text(record: &NameRecord) -> &str {
    record.string.as_str()
}

/// Looks up a record by its full key.
#[cfg(test)]
pub(crate) fn find_record(
    name: &Name,
    platform_id: u16,
    encoding_id: u16,
    language_id: u16,
    name_id: NameId,
) -> Option<&NameRecord> {
    name.name_record.iter().find(|record| {
        (
            record.platform_id,
            record.encoding_id,
            record.language_id,
            record.name_id,
        ) == (platform_id, encoding_id, language_id, name_id)
    })
}

fn rewrite_records(
    name: &mut Name,
    platforms: PlatformFilter,
    selected: impl Fn(&NameRecord) -> bool,
    rewrite: impl Fn(&str) -> String,
) -> Result<usize, Error> {
    let mut changed = 0;
    for record in name
        .name_record
        .iter_mut()
        .filter(|record| platforms.includes(record.platform_id))
    {
        if !selected(record) {
            continue;
        }
        let new_text = rewrite(text(record));
        if new_text == text(record) {
            continue;
        }
        if record.platform_id == MAC_PLATFORM_ID && !is_mac_roman(&new_text) {
            return Err(Error::NotMacRoman(new_text));
        }
        log::debug!(
            "name ID {} ({}, {}, 0x{:04X}): '{}' -> '{new_text}'",
            record.name_id,
            record.platform_id,
            record.encoding_id,
            record.language_id,
            text(record),
        );
        record.string = OffsetMarker::new(new_text);
        changed += 1;
    }
    sort(name);
    Ok(changed)
}

fn upsert(name: &mut Name, platform: Platform, language_id: u16, name_id: NameId, text: &str) {
    let (platform_id, encoding_id) = (platform.platform_id(), platform.encoding_id());
    log::debug!(
        "{platform:?} name ID {name_id} ({}): '{text}'",
        platform.language_tag(language_id).unwrap_or("unknown language")
    );
    let existing = name.name_record.iter_mut().find(|record| {
        (
            record.platform_id,
            record.encoding_id,
            record.language_id,
            record.name_id,
        ) == (platform_id, encoding_id, language_id, name_id)
    });
    match existing {
        Some(record) => record.string = OffsetMarker::new(text.to_owned()),
        None => name.name_record.push(NameRecord::new(
            platform_id,
            encoding_id,
            language_id,
            name_id,
            OffsetMarker::new(text.to_owned()),
        )),
    }
}

fn remove_where(name: &mut Name, remove: impl Fn(&NameRecord) -> bool) -> usize {
    let before = name.name_record.len();
    name.name_record.retain(|record| !remove(record));
    before - name.name_record.len()
}

fn first_unused_name_id(name: &Name) -> Result<NameId, Error> {
    let next = name
        .name_record
        .iter()
        .map(|record| record.name_id.to_u16() as u32 + 1)
        .max()
        .unwrap_or_default()
        .max(FIRST_FONT_SPECIFIC_NAME_ID as u32);
    if next > MAX_NAME_ID as u32 {
        return Err(Error::NameIdOutOfRange(next));
    }
    Ok(NameId::new(next as u16))
}

fn is_mac_roman(text: &str) -> bool {
    text.chars().all(|c| MacRomanMapping.encode(c).is_some())
}

// the name_record array must be sorted for the table to compile
fn sort(name: &mut Name) {
    name.name_record.sort();
}
