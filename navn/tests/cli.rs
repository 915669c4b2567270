mod common;

use common::{file_checksum, modified, navn, records, stdout, write_font};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn path_arg(path: &std::path::Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn set_name_writes_both_platforms() {
    let dir = TempDir::new().unwrap();
    let font = write_font(dir.path(), "Sample.ttf", &[(1, "Sample")]);
    let output = navn(&["set-name", path_arg(&font), "-n", "1", "-s", "Renamed"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Sample.ttf --> saved"));
    assert_eq!(
        records(&font),
        vec![
            (1, 0, 1, "Renamed".to_string()),
            (3, 0x409, 1, "Renamed".to_string()),
        ]
    );
}

#[test]
fn recalc_timestamp() {
    let dir = TempDir::new().unwrap();
    let font = write_font(dir.path(), "Sample.ttf", &[(1, "Sample")]);
    assert_eq!(modified(&font), 0);

    assert!(navn(&["set-name", path_arg(&font), "-n", "1", "-s", "Kept"])
        .status
        .success());
    assert_eq!(modified(&font), 0);
    assert_eq!(file_checksum(&font), 0xB1B0AFBA);

    let output = navn(&[
        "set-name",
        path_arg(&font),
        "-n",
        "1",
        "-s",
        "Touched",
        "--recalc-timestamp",
    ]);
    assert!(output.status.success());
    // later than 2020-01-01
    assert!(modified(&font) > 3_660_681_600);
    assert_eq!(file_checksum(&font), 0xB1B0AFBA);
}

#[test]
fn no_overwrite_into_output_dir() {
    let dir = TempDir::new().unwrap();
    let font = write_font(dir.path(), "Sample.ttf", &[(1, "Sample"), (2, "Black")]);
    let out = dir.path().join("out");
    for _ in 0..2 {
        let output = navn(&[
            "find-replace",
            path_arg(&font),
            "--os",
            "Black",
            "--ns",
            "Heavy",
            "-o",
            path_arg(&out),
            "--no-overwrite",
        ]);
        assert!(output.status.success());
    }
    assert_eq!(records(&out.join("Sample.ttf"))[1].3, "Heavy");
    assert_eq!(records(&out.join("Sample#1.ttf"))[1].3, "Heavy");
    // the input is left alone
    assert_eq!(records(&font)[1].3, "Black");
}

#[test]
fn find_replace_without_match_is_unchanged() {
    let dir = TempDir::new().unwrap();
    let font = write_font(dir.path(), "Sample.ttf", &[(1, "Sample")]);
    let output = navn(&[
        "find-replace",
        path_arg(&font),
        "--old-string",
        "Nothing",
        "--new-string",
        "Else",
    ]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Sample.ttf --> no changes made"));
}

#[test]
fn exclusions_and_prefixes() {
    let dir = TempDir::new().unwrap();
    let font = write_font(dir.path(), "Sample.ttf", &[(1, "Sample"), (4, "Sample Bold")]);
    assert!(navn(&["win-2-mac", path_arg(&font)]).status.success());
    assert!(navn(&["del-mac-names", path_arg(&font), "-x", "4"])
        .status
        .success());
    assert!(navn(&["add-prefix", path_arg(&font), "--prefix", "My", "-n", "1", "-n", "4", "-p", "win"])
        .status
        .success());
    assert_eq!(
        records(&font),
        vec![
            (1, 0, 4, "Sample Bold".to_string()),
            (3, 0x409, 1, "My Sample".to_string()),
            (3, 0x409, 4, "My Sample Bold".to_string()),
        ]
    );
}

#[test]
fn delete_all_languages() {
    let dir = TempDir::new().unwrap();
    let font = write_font(dir.path(), "Sample.ttf", &[(1, "Sample"), (2, "Regular")]);
    assert!(navn(&["set-name", path_arg(&font), "-n", "2", "-l", "de", "-s", "Standard"])
        .status
        .success());
    assert!(navn(&["del-name", path_arg(&font), "-n", "2", "-l", "ALL"])
        .status
        .success());
    assert_eq!(records(&font), vec![(3, 0x409, 1, "Sample".to_string())]);
}

#[test]
fn failures_set_exit_code() {
    let dir = TempDir::new().unwrap();
    let font = write_font(dir.path(), "Sample.ttf", &[(1, "Sample")]);
    let output = navn(&["set-cff-name", path_arg(&font), "--weight", "Bold"]);
    assert!(!output.status.success());
    assert!(stdout(&output).contains("ERROR: Sample.ttf: Not a CFF font"));

    let output = navn(&["set-name", path_arg(&font), "-n", "40000", "-s", "x"]);
    assert!(!output.status.success());

    let empty = TempDir::new().unwrap();
    let output = navn(&["clean-nametable", path_arg(empty.path())]);
    assert!(!output.status.success());
}

#[test]
fn copy_and_clean() {
    let dir = TempDir::new().unwrap();
    let source = write_font(dir.path(), "Source.ttf", &[(1, "Source")]);
    let dest = write_font(dir.path(), "Dest.ttf", &[(1, "Dest"), (2, "Bold")]);
    let output = navn(&["copy-names", "-s", path_arg(&source), "-d", path_arg(&dest)]);
    assert!(output.status.success());
    assert_eq!(records(&dest), vec![(3, 0x409, 1, "Source".to_string())]);

    assert!(navn(&["clean-nametable", path_arg(&dest)]).status.success());
    assert!(records(&dest).is_empty());
}

#[test]
fn lang_help_lists_tags() {
    let output = navn(&["lang-help"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("[WINDOWS LANGUAGES]"));
    assert!(text.contains("[MAC LANGUAGES]"));
}
