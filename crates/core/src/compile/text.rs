//! `TEXT` element compiler.

use std::borrow::Cow;

use super::ElementCompiler;
use super::attrs::{AttrDefault, Attributes, NAME, ORIGIN_X, ORIGIN_Y, ROTATION};
use crate::markup::document::{Element, TEXT_TAG};

/// Font name for `^A`.
pub const FONT: AttrDefault = AttrDefault::new("font", "A");
/// Character height multiplier.
pub const HEIGHT: AttrDefault = AttrDefault::new("heightmagnification", "1");
/// Character width multiplier.
pub const WIDTH: AttrDefault = AttrDefault::new("widthmagnification", "1");

/// Every attribute a `TEXT` element understands, with its default.
pub const DEFAULTS: &[AttrDefault] = &[ORIGIN_X, ORIGIN_Y, FONT, ROTATION, HEIGHT, WIDTH, NAME];

/// Emits `^FO{x},{y}^A{font},{rotation},{h},{w}^FD{text}^FS`.
///
/// The field data is the element body when present; otherwise a `^FN{name}`
/// reference so the printer fills in a stored variable field.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextCompiler;

impl ElementCompiler for TextCompiler {
    fn tag(&self) -> &str {
        TEXT_TAG
    }

    fn defaults(&self) -> &'static [AttrDefault] {
        DEFAULTS
    }

    fn compile(&self, element: &Element) -> String {
        let attrs = Attributes::of(element);
        let data = match element.body.as_deref() {
            Some(body) => Cow::Borrowed(body),
            None => Cow::Owned(format!("^FN{}", attrs.get(&NAME))),
        };
        format!(
            "^FO{},{}^A{},{},{},{}^FD{}^FS",
            attrs.get(&ORIGIN_X),
            attrs.get(&ORIGIN_Y),
            attrs.get(&FONT),
            attrs.get(&ROTATION),
            attrs.get(&HEIGHT),
            attrs.get(&WIDTH),
            data,
        )
    }
}
