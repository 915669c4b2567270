//! Finding input fonts and choosing where to write them.

use std::{
    fs::File,
    io::Read,
    path::{Path, PathBuf},
};

use crate::Error;

const SFNT_SIGNATURES: [[u8; 4]; 3] = [[0, 1, 0, 0], *b"OTTO", *b"true"];

/// The fonts at `path`: the file itself, or the fonts directly inside a
/// directory, sorted by path.
pub fn fonts_in(path: impl AsRef<Path>) -> Result<Vec<PathBuf>, Error> {
    let path = path.as_ref();
    let metadata = std::fs::metadata(path).map_err(|e| Error::io(path, e))?;
    if !metadata.is_dir() {
        return Ok(if is_font(path)? {
            vec![path.to_owned()]
        } else {
            Vec::new()
        });
    }
    let mut fonts = Vec::new();
    for entry in std::fs::read_dir(path).map_err(|e| Error::io(path, e))? {
        let entry = entry.map_err(|e| Error::io(path, e))?;
        let file = entry.path();
        if file.is_file() && is_font(&file)? {
            fonts.push(file);
        }
    }
    fonts.sort();
    Ok(fonts)
}

fn is_font(path: &Path) -> Result<bool, Error> {
    let mut signature = [0u8; 4];
    let mut file = File::open(path).map_err(|e| Error::io(path, e))?;
    match file.read_exact(&mut signature) {
        Ok(()) => Ok(SFNT_SIGNATURES.contains(&signature)),
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => Ok(false),
        Err(e) => Err(Error::io(path, e)),
    }
}

/// Where to write the edited copy of `input`.
///
/// The file keeps its name and goes into `output_dir` (created if needed) or
/// next to the input. Unless `overwrite` is set, an existing file is never
/// replaced: `#1`, `#2`, ... is added to the stem until the name is free.
pub fn output_path(
    input: &Path,
    output_dir: Option<&Path>,
    overwrite: bool,
) -> Result<PathBuf, Error> {
    let dir = match output_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
            dir.to_owned()
        }
        None => input.parent().map(Path::to_owned).unwrap_or_default(),
    };
    let file_name = input.file_name().unwrap_or(input.as_os_str());
    let path = dir.join(file_name);
    if overwrite || !path.exists() {
        return Ok(path);
    }

    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = input
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();
    let mut counter = 1;
    loop {
        let candidate = dir.join(format!("{stem}#{counter}{extension}"));
        if !candidate.exists() {
            return Ok(candidate);
        }
        counter += 1;
    }
}
