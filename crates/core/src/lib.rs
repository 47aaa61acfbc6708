//! zpl-markup core library.
//!
//! Translates a label markup document (a root element holding `TEXT` and
//! `BARCODE` children) into a ZPL II command stream. The pipeline has three
//! stages: [`parse`] builds an ordered [`Document`], a [`CompilerRegistry`]
//! turns each [`Element`] into one statement, and [`assemble`] wraps the
//! statements in `^XA` / `^XZ`. [`Translator`] runs all three.

#![warn(missing_docs)]

/// Document-start / document-end wrapping of compiled statements.
pub mod assemble;
/// Per-element-kind compilers and the tag-keyed registry.
pub mod compile;
/// Markup data model and parser.
pub mod markup;
/// End-to-end translation facade and its error type.
pub mod translate;

// ── Convenience re-exports ──────────────────────────────────────────────

pub use assemble::{LABEL_END, LABEL_START, assemble};
pub use compile::{AttrDefault, Attributes, CompilerRegistry, ElementCompiler};
pub use markup::document::{Document, Element, ElementKind};
pub use markup::parser::{MalformedMarkupError, ParseResult, parse, parse_with_diagnostics};
pub use translate::{
    Strictness, TranslateError, TranslateOptions, Translation, Translator, translate,
};

pub use zpl_markup_diagnostics::{Diagnostic, Severity, Span, codes};
