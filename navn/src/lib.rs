//! Editing the naming data of font files.
//!
//! This covers the records of the [`name`] table and the naming keys stored
//! in the Top DICT of a [`CFF `] table. Fonts are opened with [`Font::open`],
//! edited in memory and written back out with [`Font::save`]. The
//! [`commands`] module runs these edits over batches of files.
//!
//! [`name`]: https://learn.microsoft.com/en-us/typography/opentype/spec/name
//! [`CFF `]: https://learn.microsoft.com/en-us/typography/opentype/spec/cff

pub mod cff;
pub mod commands;
pub mod files;
mod font;
pub mod language;
pub mod name;

#[cfg(test)]
pub(crate) mod test_fonts;

use std::path::PathBuf;

use thiserror::Error;
use write_fonts::{
    read::ReadError,
    types::Tag,
    BuilderError,
};

pub use cff::{CffError, CffField, CffNames, CffTable};
pub use font::Font;
pub use name::{LanguageFilter, Platform, PlatformFilter};

/// The largest name ID a record may use.
pub const MAX_NAME_ID: u16 = 32767;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Error reading font data: {0}")]
    ReadError(#[from] ReadError),

    #[error("{0}")]
    Build(#[from] BuilderError),

    #[error("CFF table: {0}")]
    Cff(#[from] CffError),

    #[error("Font collections are not supported")]
    Collection,

    #[error("Not a CFF font")]
    NotCff,

    #[error("Font has no '{0}' table")]
    MissingTable(Tag),

    #[error("Name record ({platform_id}, {encoding_id}) uses an encoding that cannot be rewritten")]
    UnsupportedEncoding { platform_id: u16, encoding_id: u16 },

    #[error("'{0}' cannot be encoded as MacRoman")]
    NotMacRoman(String),

    #[error("Unknown language '{0}'")]
    UnknownLanguage(String),

    #[error("No name record could be written for language '{0}'")]
    NothingWritten(String),

    #[error("Name ID {0} is outside 0..=32767")]
    NameIdOutOfRange(u32),

    #[error("The string to find must not be empty")]
    EmptySearch,

    #[error("No font files found in {}", .0.display())]
    NoFonts(PathBuf),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_errors_convert() {
        let err = Font::from_bytes(vec![0, 1, 0, 0], false).unwrap_err();
        assert!(matches!(err, Error::ReadError(_)));
        let err: Error = ReadError::OutOfBounds.into();
        assert!(err.to_string().starts_with("Error reading font data"));
    }
}
