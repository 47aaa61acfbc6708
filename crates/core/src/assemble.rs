//! Document assembler.

/// Marker that opens a label format.
pub const LABEL_START: &str = "^XA";
/// Marker that closes a label format.
pub const LABEL_END: &str = "^XZ";

/// Wrap compiled statements in [`LABEL_START`] / [`LABEL_END`], one per line.
///
/// Statement order is preserved exactly. The result has no trailing newline,
/// so an empty statement list yields `"^XA\n^XZ"`.
pub fn assemble<I, S>(statements: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::from(LABEL_START);
    for statement in statements {
        out.push('\n');
        out.push_str(statement.as_ref());
    }
    out.push('\n');
    out.push_str(LABEL_END);
    out
}
