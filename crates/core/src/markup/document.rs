use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use zpl_markup_diagnostics::Span;

/// Tag name of a text field element.
pub const TEXT_TAG: &str = "TEXT";
/// Tag name of a barcode element.
pub const BARCODE_TAG: &str = "BARCODE";

/// A parsed markup document: the direct children of the root, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Tag name of the root element (informational, e.g. `"LABEL"`).
    pub root: String,
    /// Label elements in source order. Emission order follows this order.
    pub elements: Vec<Element>,
}

impl Document {
    /// Create a document with the given root tag and elements.
    pub fn new(root: impl Into<String>, elements: Vec<Element>) -> Self {
        Self {
            root: root.into(),
            elements,
        }
    }
}

/// Kind of a label element, determined solely by its tag name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ElementKind {
    /// `TEXT`: a text field.
    Text,
    /// `BARCODE`: a barcode field.
    Barcode,
    /// Any other tag, kept verbatim. Namespaced tags use `{namespace}name`.
    Other(String),
}

impl ElementKind {
    /// Classify a tag name. Matching is case-sensitive.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            TEXT_TAG => ElementKind::Text,
            BARCODE_TAG => ElementKind::Barcode,
            other => ElementKind::Other(other.to_string()),
        }
    }

    /// The tag name this kind was parsed from.
    pub fn tag(&self) -> &str {
        match self {
            ElementKind::Text => TEXT_TAG,
            ElementKind::Barcode => BARCODE_TAG,
            ElementKind::Other(tag) => tag,
        }
    }
}

impl From<String> for ElementKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            TEXT_TAG => ElementKind::Text,
            BARCODE_TAG => ElementKind::Barcode,
            _ => ElementKind::Other(tag),
        }
    }
}

impl From<ElementKind> for String {
    fn from(kind: ElementKind) -> Self {
        match kind {
            ElementKind::Other(tag) => tag,
            known => known.tag().to_string(),
        }
    }
}

impl std::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// One direct child of the document root.
///
/// Attribute values are always strings here; interpretation happens in the
/// element compilers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    /// Element kind (from the tag name).
    pub kind: ElementKind,
    /// Attributes exactly as written in the markup.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    /// Inline text content, if any. Never `Some("")`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Byte span of the element in the markup source.
    #[serde(default)]
    pub span: Span,
}

impl Element {
    /// Create an element with no attributes, body, or source span.
    pub fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            attributes: BTreeMap::new(),
            body: None,
            span: Span::default(),
        }
    }

    /// Set an attribute (builder pattern).
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Set the inline body (builder pattern). An empty body counts as absent.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        let body = body.into();
        self.body = (!body.is_empty()).then_some(body);
        self
    }

    /// Tag name of this element.
    pub fn tag(&self) -> &str {
        self.kind.tag()
    }

    /// Raw attribute lookup with no default.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_is_case_sensitive() {
        assert_eq!(ElementKind::from_tag("TEXT"), ElementKind::Text);
        assert_eq!(ElementKind::from_tag("BARCODE"), ElementKind::Barcode);
        assert_eq!(
            ElementKind::from_tag("text"),
            ElementKind::Other("text".into())
        );
    }

    #[test]
    fn empty_body_is_absent() {
        assert_eq!(Element::new(ElementKind::Text).with_body("").body, None);
        assert_eq!(
            Element::new(ElementKind::Text).with_body(" ").body.as_deref(),
            Some(" ")
        );
    }

    #[test]
    fn kind_serializes_as_tag() {
        let el = Element::new(ElementKind::Barcode).with_attr("name", "3");
        let json = serde_json::to_value(&el).unwrap();
        assert_eq!(json["kind"], "BARCODE");
        let back: Element = serde_json::from_value(json).unwrap();
        assert_eq!(back, el);
    }
}
