//! Persistence for raw markup, independent of translation.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// File used when no markup path is given.
pub(crate) const DEFAULT_PATH: &str = "saved_xml.txt";

/// Starter markup written by `zplm init`.
pub(crate) const TEMPLATE: &str = r#"<LABEL>
  <TEXT originX="50" originY="50" font="0" heightmagnification="40" widthmagnification="40">Hello</TEXT>
  <TEXT originX="50" originY="110" name="1"/>
  <BARCODE originX="50" originY="170" barcodetype="BC-CODE128" barcodewidth="2" name="2"/>
</LABEL>
"#;

/// A markup document on disk.
#[derive(Debug, Clone)]
pub(crate) struct MarkupStore {
    path: PathBuf,
}

impl MarkupStore {
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// The stored markup, or `None` if nothing has been saved yet.
    pub(crate) fn load(&self) -> io::Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Replace the stored markup.
    pub(crate) fn save(&self, markup: &str) -> io::Result<()> {
        fs::write(&self.path, markup)
    }
}

/// Read markup from `file`, or from stdin when `file` is `-`.
pub(crate) fn read_markup(file: &str) -> anyhow::Result<String> {
    use anyhow::Context;

    if file == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("failed to read markup from stdin")?;
        return Ok(text);
    }
    MarkupStore::new(file)
        .load()
        .with_context(|| format!("failed to read {file}"))?
        .with_context(|| format!("{file} does not exist; create it with `zplm init {file}`"))
}
