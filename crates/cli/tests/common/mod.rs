#![allow(dead_code, unreachable_pub)]

use std::fs;
use std::process::Command;

use assert_cmd::cargo;

pub const HELLO: &str = r#"<LABEL><TEXT originX="10" originY="20">Hello</TEXT></LABEL>"#;
pub const HELLO_ZPL: &str = "^XA\n^FO10,20^AA,N,1,1^FDHello^FS\n^XZ";

pub fn zplm() -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("zplm"));
    cmd.env_remove("RUST_LOG").env_remove("ZPLM_RASTER_URL");
    for proxy in ["HTTP_PROXY", "http_proxy", "ALL_PROXY", "all_proxy"] {
        cmd.env_remove(proxy);
    }
    cmd
}

/// Write `content` to `name` inside a fresh temp dir.
pub fn write_temp(name: &str, content: &str) -> (tempfile::TempDir, String) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join(name);
    fs::write(&path, content).expect("write temp markup");
    (dir, path.to_string_lossy().to_string())
}

pub fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).unwrap_or_else(|e| panic!("invalid json ({e}): {stdout}"))
}
