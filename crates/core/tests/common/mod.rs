//! Shared test helpers for `zpl_markup_core` integration tests.

#![allow(unreachable_pub)]

use zpl_markup_core::{Diagnostic, Translation, Translator};

/// Wrap children in a `<LABEL>` root.
#[allow(dead_code)]
pub fn label(children: &str) -> String {
    format!("<LABEL>{children}</LABEL>")
}

/// Translate with default (lenient) options, panicking on error.
#[allow(dead_code)]
pub fn zpl(markup: &str) -> String {
    translation(markup).zpl
}

/// Translate with default options, panicking on error.
#[allow(dead_code)]
pub fn translation(markup: &str) -> Translation {
    Translator::default()
        .translate(markup)
        .unwrap_or_else(|e| panic!("translation failed for {markup:?}: {e}"))
}

/// The statements between `^XA` and `^XZ`.
#[allow(dead_code)]
pub fn statements(zpl: &str) -> Vec<&str> {
    let lines: Vec<&str> = zpl.split('\n').collect();
    assert_eq!(lines.first(), Some(&"^XA"), "missing start marker: {zpl:?}");
    assert_eq!(lines.last(), Some(&"^XZ"), "missing end marker: {zpl:?}");
    lines[1..lines.len() - 1].to_vec()
}

/// Compile a single child element and return its statement.
#[allow(dead_code)]
pub fn single(child: &str) -> String {
    let out = zpl(&label(child));
    let stmts = statements(&out);
    assert_eq!(stmts.len(), 1, "expected one statement: {out:?}");
    stmts[0].to_string()
}

/// Collect diagnostic codes.
#[allow(dead_code)]
pub fn diag_codes(diagnostics: &[Diagnostic]) -> Vec<String> {
    diagnostics.iter().map(|d| d.id.to_string()).collect()
}
