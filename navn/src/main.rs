//! Command line tool for editing font naming data
//!
//! Each subcommand takes a font file or a directory of fonts, edits the
//! `name` table (or the names in the `CFF ` table) and writes the result.

use std::path::{Path, PathBuf};

use clap::Parser;
use navn::{
    commands::{self, FileReport, FindReplace, NameArgs, OutputOptions, Status},
    CffNames, Error, LanguageFilter, Platform,
};
use nu_ansi_term::Color;
use write_fonts::types::NameId;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::ValueEnum, Copy, Clone, Debug)]
enum PlatformArg {
    /// Windows (platform 3)
    Win,
    /// Macintosh (platform 1)
    Mac,
}

impl From<PlatformArg> for Platform {
    fn from(src: PlatformArg) -> Platform {
        match src {
            PlatformArg::Win => Platform::Windows,
            PlatformArg::Mac => Platform::Mac,
        }
    }
}

#[derive(clap::Args, Debug)]
struct OutputArgs {
    /// Directory for the output files, created if missing. Defaults to the
    /// directory of each input file.
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Set head.modified to the current time
    #[arg(long, overrides_with = "no_recalc_timestamp")]
    recalc_timestamp: bool,

    /// Keep the original head.modified timestamp [default]
    #[arg(long, overrides_with = "recalc_timestamp")]
    no_recalc_timestamp: bool,

    /// Overwrite existing output files [default]
    #[arg(long, overrides_with = "no_overwrite")]
    overwrite: bool,

    /// Save to a new file (Font#1.ttf, Font#2.ttf, ...) instead of
    /// overwriting
    #[arg(long, overrides_with = "overwrite")]
    no_overwrite: bool,
}

impl From<OutputArgs> for OutputOptions {
    fn from(src: OutputArgs) -> OutputOptions {
        OutputOptions {
            output_dir: src.output_dir,
            recalc_timestamp: src.recalc_timestamp,
            overwrite: !src.no_overwrite,
        }
    }
}

#[derive(clap::Args, Debug)]
struct RecordArgs {
    /// The name ID. If omitted, the first free ID from 256 up is used
    #[arg(short, long, value_parser = name_id_parser())]
    name_id: Option<u16>,

    /// Only write the record on this platform. Both are written by default
    #[arg(short, long)]
    platform: Option<PlatformArg>,

    /// The language of the record, see `lang-help`
    #[arg(short, long, default_value = "en")]
    language: String,
}

impl From<RecordArgs> for NameArgs {
    fn from(src: RecordArgs) -> NameArgs {
        NameArgs {
            name_id: src.name_id.map(NameId::new),
            platform: src.platform.map(Into::into),
            language: src.language,
        }
    }
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Write a name record, creating it if needed
    SetName {
        input: PathBuf,
        #[command(flatten)]
        record: RecordArgs,
        /// The text of the record
        #[arg(short, long)]
        string: String,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Write a name record with the contents of a text file
    NameFromTxt {
        input: PathBuf,
        #[command(flatten)]
        record: RecordArgs,
        /// The UTF-8 text file to read
        #[arg(short, long)]
        input_file: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Delete a name record
    DelName {
        input: PathBuf,
        /// The name ID to delete
        #[arg(short, long, value_parser = name_id_parser())]
        name_id: u16,
        /// Only delete on this platform. Both are used by default
        #[arg(short, long)]
        platform: Option<PlatformArg>,
        /// The language to delete (for example 'de'), or 'ALL' for every
        /// language
        #[arg(short, long, default_value = "en")]
        language: LanguageFilter,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Set the names stored in the CFF table
    SetCffName {
        input: PathBuf,
        /// The PostScript font name
        #[arg(long)]
        font_name: Option<String>,
        #[arg(long)]
        full_name: Option<String>,
        #[arg(long)]
        family_name: Option<String>,
        #[arg(long)]
        weight: Option<String>,
        #[arg(long)]
        copyright: Option<String>,
        #[arg(long)]
        notice: Option<String>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Replace text in the name table
    ///
    /// An ID given with --exclude-namerecord is left alone even if it is
    /// also given with --name-id. Use an empty new string to remove text.
    FindReplace {
        input: PathBuf,
        #[arg(long, visible_alias = "os")]
        old_string: String,
        #[arg(long, visible_alias = "ns")]
        new_string: String,
        /// Only replace in this name ID
        #[arg(short, long, value_parser = name_id_parser())]
        name_id: Option<u16>,
        /// Only replace on this platform. Both are used by default
        #[arg(short, long)]
        platform: Option<PlatformArg>,
        /// Also replace in the CFF table names
        #[arg(long, visible_alias = "cff")]
        fix_cff: bool,
        /// Name IDs to leave alone (repeatable)
        #[arg(short = 'x', long, visible_alias = "ex", value_parser = name_id_parser())]
        exclude_namerecord: Vec<u16>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Copy every Windows record to the Macintosh platform
    #[command(name = "win-2-mac")]
    Win2Mac {
        input: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Delete all Macintosh records
    DelMacNames {
        input: PathBuf,
        /// Name IDs to keep (repeatable)
        #[arg(short = 'x', long, visible_alias = "ex", value_parser = name_id_parser())]
        exclude_namerecord: Vec<u16>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// List the language tags accepted by set-name and del-name
    LangHelp,
    /// Delete every record from the name table
    CleanNametable {
        input: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Copy the name table from one font to another
    CopyNames {
        /// The font to copy from
        #[arg(short, long)]
        source_font: PathBuf,
        /// The font to copy into
        #[arg(short, long)]
        dest_font: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Add a prefix, followed by a space, to name records
    AddPrefix {
        input: PathBuf,
        #[arg(long)]
        prefix: String,
        /// The name IDs to change (repeatable)
        #[arg(short = 'n', long, required = true, value_parser = name_id_parser())]
        name_ids: Vec<u16>,
        /// Only change this platform. Both are used by default
        #[arg(short, long)]
        platform: Option<PlatformArg>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Add a space followed by a suffix to name records
    AddSuffix {
        input: PathBuf,
        #[arg(long)]
        suffix: String,
        /// The name IDs to change (repeatable)
        #[arg(short = 'n', long, required = true, value_parser = name_id_parser())]
        name_ids: Vec<u16>,
        /// Only change this platform. Both are used by default
        #[arg(short, long)]
        platform: Option<PlatformArg>,
        #[command(flatten)]
        output: OutputArgs,
    },
}

fn name_id_parser() -> impl clap::builder::TypedValueParser<Value = u16> {
    clap::value_parser!(u16).range(0..=navn::MAX_NAME_ID as i64)
}

fn name_ids(ids: &[u16]) -> Vec<NameId> {
    ids.iter().copied().map(NameId::new).collect()
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    match run(args.command) {
        Ok(reports) => {
            if !print_reports(&reports) {
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("{}", Color::Red.paint(format!("ERROR: {e}")));
            std::process::exit(1);
        }
    }
}

fn run(command: Command) -> Result<Vec<FileReport>, Error> {
    match command {
        Command::SetName {
            input,
            record,
            string,
            output,
        } => commands::set_name(&input, &record.into(), &string, &output.into()),
        Command::NameFromTxt {
            input,
            record,
            input_file,
            output,
        } => commands::name_from_txt(&input, &record.into(), &input_file, &output.into()),
        Command::DelName {
            input,
            name_id,
            platform,
            language,
            output,
        } => commands::del_name(
            &input,
            NameId::new(name_id),
            platform.map(Into::into),
            &language,
            &output.into(),
        ),
        Command::SetCffName {
            input,
            font_name,
            full_name,
            family_name,
            weight,
            copyright,
            notice,
            output,
        } => {
            let names = CffNames {
                font_name,
                full_name,
                family_name,
                weight,
                copyright,
                notice,
            };
            commands::set_cff_name(&input, &names, &output.into())
        }
        Command::FindReplace {
            input,
            old_string,
            new_string,
            name_id,
            platform,
            fix_cff,
            exclude_namerecord,
            output,
        } => {
            let args = FindReplace {
                old: old_string,
                new: new_string,
                name_id: name_id.map(NameId::new),
                platform: platform.map(Into::into),
                fix_cff,
                exclude: name_ids(&exclude_namerecord),
            };
            commands::find_replace(&input, &args, &output.into())
        }
        Command::Win2Mac { input, output } => commands::win_2_mac(&input, &output.into()),
        Command::DelMacNames {
            input,
            exclude_namerecord,
            output,
        } => commands::del_mac_names(&input, &name_ids(&exclude_namerecord), &output.into()),
        Command::LangHelp => {
            println!("{}", commands::lang_help());
            Ok(Vec::new())
        }
        Command::CleanNametable { input, output } => {
            commands::clean_nametable(&input, &output.into())
        }
        Command::CopyNames {
            source_font,
            dest_font,
            output,
        } => Ok(vec![commands::copy_names(
            &source_font,
            &dest_font,
            &output.into(),
        )]),
        Command::AddPrefix {
            input,
            prefix,
            name_ids: ids,
            platform,
            output,
        } => commands::add_prefix(
            &input,
            &prefix,
            &name_ids(&ids),
            platform.map(Into::into),
            &output.into(),
        ),
        Command::AddSuffix {
            input,
            suffix,
            name_ids: ids,
            platform,
            output,
        } => commands::add_suffix(
            &input,
            &suffix,
            &name_ids(&ids),
            platform.map(Into::into),
            &output.into(),
        ),
    }
}

/// Prints one line per file, returning `false` if any file failed.
fn print_reports(reports: &[FileReport]) -> bool {
    let mut ok = true;
    for report in reports {
        match &report.status {
            Ok(Status::Saved(path)) => {
                println!("{}", Color::Green.paint(format!("{} --> saved", file_name(path))))
            }
            Ok(Status::Unchanged) => println!(
                "{}",
                Color::Yellow.paint(format!("{} --> no changes made", file_name(&report.input)))
            ),
            Err(e) => {
                ok = false;
                println!(
                    "{}",
                    Color::Red.paint(format!("ERROR: {}: {e}", file_name(&report.input)))
                );
            }
        }
    }
    ok
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .into_owned()
}
