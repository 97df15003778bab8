//! Integration tests for `magtext render` and `magtext inspect`.
//!
//! Each test builds a throwaway glyph library with `tempfile` and points
//! the binary at it with `--library`. An empty `--config` file keeps the
//! user's own configuration out of the way.

#![allow(deprecated)] // cargo_bin deprecation, replacement not yet stable

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn magtext() -> Command {
    Command::cargo_bin("magtext").expect("binary 'magtext' should be built")
}

/// Library with `A` (bbox right 800), `B` (layer only) and the `?` fallback.
fn library() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let glyph = |name: &str, body: &str| {
        fs::write(dir.path().join(format!("{name}.mag")), body).unwrap();
    };
    glyph(
        "font_41",
        "magic\ntech sky130A\ntimestamp 1616445645\n<< metal1 >>\nrect 0 0 700 1400\n<< properties >>\nstring FIXED_BBOX 0 0 800 1600\n<< end >>\n",
    );
    glyph("font_42", "magic\n<< metal1 >>\nrect 0 0 650 1400\n<< end >>\n");
    glyph(
        "font_3F",
        "magic\n<< properties >>\nstring FIXED_BBOX 0 0 600 1600\n<< end >>\n",
    );
    fs::write(dir.path().join("config.toml"), "").unwrap();
    dir
}

fn render(lib: &Path) -> Command {
    let mut cmd = magtext();
    cmd.arg("--config")
        .arg(lib.join("config.toml"))
        .arg("--library")
        .arg(lib)
        .arg("render");
    cmd
}

#[test]
fn renders_single_glyph_script() {
    let lib = library();
    let expected = format!(
        "path .:{}\n\nselect top cell\nsnap int\nbox position 0 0\n\n\
         # A\npushbox\ngetcell font_41 child 0 0\npopbox\nbox move r 1600\n\n\
         \ngds write gds/demo.gds\nquit\n",
        lib.path().display()
    );

    render(lib.path())
        .args(["-c", "demo"])
        .write_stdin("A")
        .assert()
        .success()
        .stdout(predicate::str::diff(expected));
}

#[test]
fn line_break_moves_down_one_baseline() {
    let lib = library();
    render(lib.path())
        .args(["--cellname", "two"])
        .write_stdin("A\nB\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "box move r 1600\n\nbox position 0 -400\n\n# B\n",
        ))
        .stdout(predicate::str::contains("box move r 1300\n\nbox position 0 -800\n"));
}

#[test]
fn crlf_counts_as_one_line_break() {
    let lib = library();
    render(lib.path())
        .args(["-c", "crlf"])
        .write_stdin("A\r\nB")
        .assert()
        .success()
        .stdout(predicate::str::contains("box position 0 -400"))
        .stdout(predicate::str::contains("box position 0 -800").not())
        .stdout(predicate::str::contains("# \r").not());
}

#[test]
fn missing_glyph_keeps_its_label() {
    let lib = library();
    render(lib.path())
        .args(["-c", "euro"])
        .write_stdin("€")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "# €\npushbox\ngetcell font_3F child 0 0\npopbox\nbox move r 1200\n",
        ));
}

#[test]
fn missing_fallback_fails_without_output() {
    let lib = library();
    fs::remove_file(lib.path().join("font_3F.mag")).unwrap();

    render(lib.path())
        .args(["-c", "demo"])
        .write_stdin("AZ")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("'Z'"));
}

#[test]
fn malformed_document_fails() {
    let lib = library();
    fs::write(
        lib.path().join("font_42.mag"),
        "<< metal1 >>\nrect 0 0 wide 1400\n",
    )
    .unwrap();

    render(lib.path())
        .args(["-c", "demo"])
        .write_stdin("B")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("expected integer"));
}

#[test]
fn empty_cellname_is_configuration_error() {
    let lib = library();
    render(lib.path())
        .args(["-c", ""])
        .write_stdin("A")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("cell name required"));
}

#[test]
fn writes_script_to_output_file() {
    let lib = library();
    let out = lib.path().join("demo.tcl");

    render(lib.path())
        .args(["-c", "demo", "--output"])
        .arg(&out)
        .write_stdin("AB")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let script = fs::read_to_string(&out).unwrap();
    assert!(script.contains("getcell font_42 child 0 0"));
    assert!(script.ends_with("gds write gds/demo.gds\nquit\n"));
}

#[test]
fn reads_message_from_input_file() {
    let lib = library();
    let input = lib.path().join("message.txt");
    fs::write(&input, "B").unwrap();

    render(lib.path())
        .args(["-c", "demo", "--input"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("# B\n"));
}

#[test]
fn config_file_sets_fallback_and_skip() {
    let lib = library();
    fs::write(
        lib.path().join("config.toml"),
        "fallback = \"A\"\nbaseline_skip = 500\n",
    )
    .unwrap();

    render(lib.path())
        .args(["-c", "cfg"])
        .write_stdin("x\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("# x\npushbox\ngetcell font_41 child 0 0"))
        .stdout(predicate::str::contains("box position 0 -500"));
}

#[test]
fn inspect_prints_metrics_json() {
    let lib = library();
    magtext()
        .arg("--config")
        .arg(lib.path().join("config.toml"))
        .arg("--library")
        .arg(lib.path())
        .args(["inspect", "AB€"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"cell\": \"font_41\""))
        .stdout(predicate::str::contains("\"technology\": \"sky130A\""))
        .stdout(predicate::str::contains("\"advance\": 1300"))
        .stdout(predicate::str::contains("\"resolved\": \"?\""));
}
