//! CLI tests for `zplm explain` and `zplm init`.

mod common;

use std::fs;

use common::{stdout_json, write_temp, zplm};

#[test]
fn explain_known_code_json_returns_explanation() {
    let output = zplm()
        .args(["explain", "ZPLM2001", "--output", "json"])
        .output()
        .expect("run explain");

    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["id"], "ZPLM2001");
    assert!(json["explanation"].is_string());
}

#[test]
fn explain_unknown_code_json_returns_null_explanation() {
    let output = zplm()
        .args(["explain", "ZPLM9999", "--output", "json"])
        .output()
        .expect("run explain");

    assert!(output.status.success());
    assert!(stdout_json(&output)["explanation"].is_null());
}

#[test]
fn explain_pretty_shows_human_readable_text() {
    let output = zplm()
        .args(["explain", "ZPLM1001", "--output", "pretty"])
        .output()
        .expect("run explain");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ZPLM1001"), "unexpected output: {stdout}");
    assert!(stdout.contains("well-formed"), "unexpected output: {stdout}");
}

#[test]
fn init_writes_template_that_translates() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("saved_xml.txt");

    let output = zplm()
        .arg("init")
        .arg(&path)
        .args(["--output", "json"])
        .output()
        .expect("run init");
    assert!(output.status.success());
    assert_eq!(stdout_json(&output)["status"], "created");
    assert!(path.exists());

    let output = zplm()
        .arg("translate")
        .arg(&path)
        .args(["--output", "json"])
        .output()
        .expect("run translate");
    assert!(output.status.success());
    let zpl = stdout_json(&output)["zpl"]
        .as_str()
        .expect("zpl string")
        .to_string();
    assert!(zpl.starts_with("^XA\n"));
    assert!(zpl.ends_with("\n^XZ"));
    assert_eq!(zpl.lines().count(), 5);
}

#[test]
fn init_leaves_existing_markup_alone() {
    let (_dir, path) = write_temp("saved_xml.txt", "<LABEL/>");

    let output = zplm()
        .args(["init", &path, "--output", "json"])
        .output()
        .expect("run init");
    assert!(output.status.success());
    assert_eq!(stdout_json(&output)["status"], "exists");
    assert_eq!(fs::read_to_string(&path).expect("read"), "<LABEL/>");
}

#[test]
fn default_file_is_saved_xml_in_working_dir() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(
        dir.path().join("saved_xml.txt"),
        r#"<LABEL><TEXT>Hi</TEXT></LABEL>"#,
    )
    .expect("write markup");

    let output = zplm()
        .current_dir(dir.path())
        .args(["translate", "--output", "json"])
        .output()
        .expect("run translate");
    assert!(output.status.success());
    assert_eq!(
        stdout_json(&output)["zpl"],
        "^XA\n^FO0,0^AA,N,1,1^FDHi^FS\n^XZ"
    );
}
