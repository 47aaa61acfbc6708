//! Markup parser built on `roxmltree`.
//!
//! Only the direct children of the root element become [`Element`]s; text,
//! comments, and processing instructions between them are ignored, and
//! grandchildren are never descended into.

use std::collections::BTreeMap;

use roxmltree::{ExpandedName, Node, ParsingOptions};
use zpl_markup_diagnostics::{Diagnostic, LineIndex, Span, codes};

use super::document::{Document, Element, ElementKind};

/// The markup is not well-formed, so nothing can be translated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct MalformedMarkupError {
    /// The XML parser's message, unmodified.
    pub message: String,
    /// Zero-width span at the position the XML parser reported.
    pub span: Span,
}

impl MalformedMarkupError {
    fn from_xml(source: &str, err: &roxmltree::Error) -> Self {
        let pos = err.pos();
        let offset =
            LineIndex::new(source).offset_of(source, pos.row as usize, pos.col as usize);
        Self {
            message: err.to_string(),
            span: Span::empty(offset),
        }
    }

    /// Express this error as a `ZPLM1001` diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(
            codes::MALFORMED_MARKUP,
            format!("malformed markup: {}", self.message),
            Some(self.span),
        )
    }
}

/// A parsed document together with the parser's non-fatal diagnostics.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ParseResult {
    /// The parsed document.
    pub document: Document,
    /// Informational diagnostics (e.g. nested elements that were ignored).
    pub diagnostics: Vec<Diagnostic>,
}

/// Parse markup text into a [`Document`].
pub fn parse(markup: &str) -> Result<Document, MalformedMarkupError> {
    parse_with_diagnostics(markup).map(|res| res.document)
}

/// Parse markup text, keeping informational diagnostics.
pub fn parse_with_diagnostics(markup: &str) -> Result<ParseResult, MalformedMarkupError> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let xml = roxmltree::Document::parse_with_options(markup, options)
        .map_err(|e| MalformedMarkupError::from_xml(markup, &e))?;
    let root = xml.root_element();

    let mut elements = Vec::new();
    let mut diagnostics = Vec::new();
    for node in root.children().filter(Node::is_element) {
        let element = element_from_node(node);
        for nested in node.children().filter(Node::is_element) {
            let tag = qualified_name(nested.tag_name());
            diagnostics.push(
                Diagnostic::info(
                    codes::NESTED_ELEMENT_IGNORED,
                    format!("<{tag}> inside <{}> is ignored", element.tag()),
                    Some(nested.range().into()),
                )
                .with_context(BTreeMap::from([
                    ("parent".into(), element.tag().to_string()),
                    ("tag".into(), tag),
                ])),
            );
        }
        elements.push(element);
    }

    Ok(ParseResult {
        document: Document::new(qualified_name(root.tag_name()), elements),
        diagnostics,
    })
}

fn element_from_node(node: Node<'_, '_>) -> Element {
    let attributes = node
        .attributes()
        .map(|attr| {
            let name = match attr.namespace() {
                Some(ns) => format!("{{{ns}}}{}", attr.name()),
                None => attr.name().to_string(),
            };
            (name, attr.value().to_string())
        })
        .collect();

    Element {
        kind: ElementKind::from_tag(&qualified_name(node.tag_name())),
        attributes,
        body: leading_text(node),
        span: node.range().into(),
    }
}

/// Character data before the first child element. Comments and processing
/// instructions are dropped and the text around them joined.
fn leading_text(node: Node<'_, '_>) -> Option<String> {
    let mut body = String::new();
    for child in node.children() {
        if child.is_element() {
            break;
        }
        if child.is_text() {
            body.push_str(child.text().unwrap_or_default());
        }
    }
    (!body.is_empty()).then_some(body)
}

fn qualified_name(name: ExpandedName<'_, '_>) -> String {
    match name.namespace() {
        Some(ns) => format!("{{{ns}}}{}", name.name()),
        None => name.name().to_string(),
    }
}
