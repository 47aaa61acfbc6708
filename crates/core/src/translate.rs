//! End-to-end translation: parse, compile every element, assemble.

use std::collections::BTreeMap;

use serde::Serialize;
use zpl_markup_diagnostics::{Diagnostic, Span, codes};

use crate::assemble::assemble;
use crate::compile::{CompilerRegistry, ElementCompiler};
use crate::markup::document::{Document, Element};
use crate::markup::parser::{MalformedMarkupError, parse_with_diagnostics};

/// How unrecognized elements and suspicious attributes are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Strictness {
    /// Skip unrecognized elements with an info diagnostic.
    #[default]
    Lenient,
    /// Reject unrecognized elements; warn on unknown attributes and
    /// undefined rotation codes.
    Strict,
}

/// Translator configuration.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TranslateOptions {
    /// Validation policy.
    pub strictness: Strictness,
}

impl TranslateOptions {
    /// Options with [`Strictness::Strict`].
    pub fn strict() -> Self {
        Self {
            strictness: Strictness::Strict,
        }
    }
}

/// Reasons a translation produced no output.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranslateError {
    /// The markup could not be parsed.
    #[error(transparent)]
    Malformed(#[from] MalformedMarkupError),

    /// Strict mode met an element with no registered compiler.
    #[error("unrecognized element <{tag}>")]
    UnrecognizedElement {
        /// The element's tag name.
        tag: String,
        /// Byte span of the element.
        span: Span,
    },
}

impl TranslateError {
    /// Express this error as an error diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            TranslateError::Malformed(e) => e.to_diagnostic(),
            TranslateError::UnrecognizedElement { tag, span } => Diagnostic::error(
                codes::UNRECOGNIZED_ELEMENT,
                self.to_string(),
                Some(*span),
            )
            .with_context(BTreeMap::from([("tag".into(), tag.clone())])),
        }
    }
}

/// Output of a successful translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Translation {
    /// The assembled command stream.
    pub zpl: String,
    /// Non-fatal diagnostics, in source order.
    pub diagnostics: Vec<Diagnostic>,
}

/// Parses markup and compiles it to ZPL with a configurable registry.
///
/// Holds no per-call state; one instance can serve many threads.
#[derive(Debug, Default)]
pub struct Translator {
    options: TranslateOptions,
    registry: CompilerRegistry,
}

impl Translator {
    /// A translator with the standard compilers and the given options.
    pub fn new(options: TranslateOptions) -> Self {
        Self {
            options,
            registry: CompilerRegistry::standard(),
        }
    }

    /// Add or replace an element compiler (builder pattern).
    pub fn with_compiler(mut self, compiler: Box<dyn ElementCompiler>) -> Self {
        self.registry.register(compiler);
        self
    }

    /// Translate markup text to a ZPL command stream.
    pub fn translate(&self, markup: &str) -> Result<Translation, TranslateError> {
        let parsed = parse_with_diagnostics(markup)?;
        let mut diagnostics = parsed.diagnostics;
        let statements = self.compile_document(&parsed.document, &mut diagnostics)?;
        Ok(Translation {
            zpl: assemble(&statements),
            diagnostics,
        })
    }

    /// Compile every element of `document` in order, skipping (or, in strict
    /// mode, rejecting) elements with no registered compiler.
    pub fn compile_document(
        &self,
        document: &Document,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<Vec<String>, TranslateError> {
        let strict = self.options.strictness == Strictness::Strict;
        let mut statements = Vec::with_capacity(document.elements.len());

        for element in &document.elements {
            let Some(compiler) = self.registry.get(element.tag()) else {
                if strict {
                    return Err(TranslateError::UnrecognizedElement {
                        tag: element.tag().to_string(),
                        span: element.span,
                    });
                }
                tracing::debug!(tag = element.tag(), "skipping unrecognized element");
                diagnostics.push(skipped(element));
                continue;
            };

            if strict {
                diagnostics.extend(compiler.check(element));
            }
            let statement = compiler.compile(element);
            tracing::trace!(tag = element.tag(), %statement, "compiled element");
            statements.push(statement);
        }

        Ok(statements)
    }
}

fn skipped(element: &Element) -> Diagnostic {
    Diagnostic::info(
        codes::UNRECOGNIZED_ELEMENT,
        format!("skipped unrecognized element <{}>", element.tag()),
        Some(element.span),
    )
    .with_context(BTreeMap::from([("tag".into(), element.tag().to_string())]))
}

/// Translate markup with the standard compilers and lenient options.
pub fn translate(markup: &str) -> Result<String, TranslateError> {
    Translator::default().translate(markup).map(|t| t.zpl)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translator_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Translator>();
    }

    #[test]
    fn lenient_skip_is_reported_as_info() {
        let t = Translator::default()
            .translate("<L><LOGO/></L>")
            .unwrap();
        assert_eq!(t.zpl, "^XA\n^XZ");
        assert_eq!(t.diagnostics.len(), 1);
        assert_eq!(t.diagnostics[0].id, codes::UNRECOGNIZED_ELEMENT);
        assert!(!t.diagnostics[0].is_error());
    }

    #[test]
    fn strict_rejects_unrecognized() {
        let err = Translator::new(TranslateOptions::strict())
            .translate("<L><TEXT/><LOGO/></L>")
            .unwrap_err();
        assert!(matches!(err, TranslateError::UnrecognizedElement { ref tag, .. } if tag == "LOGO"));
        assert!(err.to_diagnostic().is_error());
    }

    #[test]
    fn strict_warnings_do_not_change_output() {
        let markup = r#"<L><TEXT colour="red" rotation="Q">x</TEXT></L>"#;
        let lenient = Translator::default().translate(markup).unwrap();
        let strict = Translator::new(TranslateOptions::strict())
            .translate(markup)
            .unwrap();
        assert_eq!(lenient.zpl, strict.zpl);
        assert!(lenient.diagnostics.is_empty());
        assert_eq!(strict.diagnostics.len(), 2);
    }
}
