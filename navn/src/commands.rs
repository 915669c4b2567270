//! Batch operations behind each `navn` subcommand.
//!
//! Every command runs over the fonts found at its input path. A failure in
//! one file is recorded in that file's [`FileReport`] and the batch goes on.

use std::path::{Path, PathBuf};

use write_fonts::types::{NameId, Tag};

use crate::{
    cff::CffNames,
    files, language,
    name::{self, LanguageFilter, Platform},
    Error, Font,
};

const NAME: Tag = Tag::new(b"name");

/// Where and how edited fonts are written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputOptions {
    /// Defaults to the directory of each input file.
    pub output_dir: Option<PathBuf>,
    /// Set `head.modified` to the current time.
    pub recalc_timestamp: bool,
    /// Replace existing files instead of picking a numbered name.
    pub overwrite: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        OutputOptions {
            output_dir: None,
            recalc_timestamp: false,
            overwrite: true,
        }
    }
}

#[derive(Debug)]
pub enum Status {
    Saved(PathBuf),
    Unchanged,
}

/// The outcome for one input file.
#[derive(Debug)]
pub struct FileReport {
    pub input: PathBuf,
    pub status: Result<Status, Error>,
}

/// Which record `set-name` and `name-from-txt` write.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NameArgs {
    /// The first free ID is used if unset.
    pub name_id: Option<NameId>,
    pub platform: Option<Platform>,
    pub language: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FindReplace {
    pub old: String,
    pub new: String,
    pub name_id: Option<NameId>,
    pub platform: Option<Platform>,
    /// Also replace in the naming keys of the CFF table.
    pub fix_cff: bool,
    pub exclude: Vec<NameId>,
}

pub fn set_name(
    input: &Path,
    args: &NameArgs,
    string: &str,
    opts: &OutputOptions,
) -> Result<Vec<FileReport>, Error> {
    for_each_font(input, opts, |font| {
        let name_id = name::set_multilingual_name(
            font.name_table_mut()?,
            args.name_id,
            &args.language,
            string,
            args.platform.into(),
        )?;
        log::info!("set name ID {name_id}");
        Ok(true)
    })
}

/// Like [`set_name`], with the string read from a UTF-8 text file.
pub fn name_from_txt(
    input: &Path,
    args: &NameArgs,
    text_file: &Path,
    opts: &OutputOptions,
) -> Result<Vec<FileReport>, Error> {
    let text = std::fs::read_to_string(text_file).map_err(|e| Error::io(text_file, e))?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(&text);
    set_name(input, args, text, opts)
}

pub fn del_name(
    input: &Path,
    name_id: NameId,
    platform: Option<Platform>,
    language: &LanguageFilter,
    opts: &OutputOptions,
) -> Result<Vec<FileReport>, Error> {
    for_each_font(input, opts, |font| {
        let removed =
            name::del_name_record(font.name_table_mut()?, name_id, language, platform.into())?;
        log::info!("removed {removed} records with name ID {name_id}");
        Ok(true)
    })
}

pub fn set_cff_name(
    input: &Path,
    names: &CffNames,
    opts: &OutputOptions,
) -> Result<Vec<FileReport>, Error> {
    for_each_font(input, opts, |font| {
        if !font.has_cff() {
            return Err(Error::NotCff);
        }
        Ok(font.cff_mut()?.set_names(names)? > 0)
    })
}

pub fn find_replace(
    input: &Path,
    args: &FindReplace,
    opts: &OutputOptions,
) -> Result<Vec<FileReport>, Error> {
    if args.old.is_empty() {
        return Err(Error::EmptySearch);
    }
    for_each_font(input, opts, |font| {
        let mut changed = name::find_replace(
            font.name_table_mut()?,
            &args.old,
            &args.new,
            args.name_id,
            args.platform.into(),
            &args.exclude,
        )?;
        if args.fix_cff {
            if font.has_cff() {
                changed += font.cff_mut()?.find_replace(&args.old, &args.new)?;
            } else {
                log::debug!("no CFF table to fix");
            }
        }
        log::info!("{changed} names changed");
        Ok(changed > 0)
    })
}

pub fn win_2_mac(input: &Path, opts: &OutputOptions) -> Result<Vec<FileReport>, Error> {
    for_each_font(input, opts, |font| {
        let copied = name::win_to_mac(font.name_table_mut()?);
        log::info!("copied {copied} records to the Macintosh platform");
        Ok(true)
    })
}

pub fn del_mac_names(
    input: &Path,
    exclude: &[NameId],
    opts: &OutputOptions,
) -> Result<Vec<FileReport>, Error> {
    for_each_font(input, opts, |font| {
        let removed = name::del_mac_names(font.name_table_mut()?, exclude);
        log::info!("removed {removed} Macintosh records");
        Ok(true)
    })
}

pub fn clean_nametable(input: &Path, opts: &OutputOptions) -> Result<Vec<FileReport>, Error> {
    for_each_font(input, opts, |font| {
        let removed = name::clear(font.name_table_mut()?);
        log::info!("removed {removed} records");
        Ok(true)
    })
}

/// Replaces the name table of `dest` with the one from `source`.
pub fn copy_names(source: &Path, dest: &Path, opts: &OutputOptions) -> FileReport {
    let status = Font::open(source, false).and_then(|source| {
        let name = source
            .raw_table(NAME)
            .ok_or(Error::MissingTable(NAME))?
            .to_vec();
        edit_file(dest, opts, |font| {
            font.replace_table_data(NAME, name);
            Ok(true)
        })
    });
    FileReport {
        input: dest.to_owned(),
        status,
    }
}

pub fn add_prefix(
    input: &Path,
    prefix: &str,
    name_ids: &[NameId],
    platform: Option<Platform>,
    opts: &OutputOptions,
) -> Result<Vec<FileReport>, Error> {
    for_each_font(input, opts, |font| {
        name::add_prefix(font.name_table_mut()?, prefix, name_ids, platform.into())?;
        Ok(true)
    })
}

pub fn add_suffix(
    input: &Path,
    suffix: &str,
    name_ids: &[NameId],
    platform: Option<Platform>,
    opts: &OutputOptions,
) -> Result<Vec<FileReport>, Error> {
    for_each_font(input, opts, |font| {
        name::add_suffix(font.name_table_mut()?, suffix, name_ids, platform.into())?;
        Ok(true)
    })
}

/// The language tags accepted by `set-name` and `del-name`.
pub fn lang_help() -> String {
    format!(
        "[WINDOWS LANGUAGES]\n{}\n\n[MAC LANGUAGES]\n{}\n",
        language::windows_languages().join(", "),
        language::mac_languages().join(", "),
    )
}

/// Runs `edit` on each font at `input`; fonts are saved when it returns
/// `true`.
fn for_each_font(
    input: &Path,
    opts: &OutputOptions,
    mut edit: impl FnMut(&mut Font) -> Result<bool, Error>,
) -> Result<Vec<FileReport>, Error> {
    let fonts = files::fonts_in(input)?;
    if fonts.is_empty() {
        return Err(Error::NoFonts(input.to_owned()));
    }
    Ok(fonts
        .into_iter()
        .map(|path| {
            let status = edit_file(&path, opts, &mut edit);
            FileReport {
                input: path,
                status,
            }
        })
        .collect())
}

fn edit_file(
    path: &Path,
    opts: &OutputOptions,
    edit: impl FnOnce(&mut Font) -> Result<bool, Error>,
) -> Result<Status, Error> {
    log::info!("processing {}", path.display());
    let mut font = Font::open(path, opts.recalc_timestamp)?;
    if !edit(&mut font)? {
        return Ok(Status::Unchanged);
    }
    let output = files::output_path(path, opts.output_dir.as_deref(), opts.overwrite)?;
    font.save(&output)?;
    Ok(Status::Saved(output))
}
