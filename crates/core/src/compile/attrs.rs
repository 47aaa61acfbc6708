//! Lenient attribute access.
//!
//! Every attribute a compiler reads is described by an [`AttrDefault`], and
//! every read goes through [`Attributes::get`], so the default tables in
//! [`text::DEFAULTS`](super::text::DEFAULTS) and
//! [`barcode::DEFAULTS`](super::barcode::DEFAULTS) are the complete record
//! of what each element kind understands.

use crate::markup::document::Element;

/// An attribute name paired with the value used when the markup omits it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttrDefault {
    /// Attribute name, case-sensitive.
    pub name: &'static str,
    /// Value substituted when the attribute is missing.
    pub default: &'static str,
}

impl AttrDefault {
    /// Create a default-table entry.
    pub const fn new(name: &'static str, default: &'static str) -> Self {
        Self { name, default }
    }
}

/// Field origin, x axis.
pub const ORIGIN_X: AttrDefault = AttrDefault::new("originX", "0");
/// Field origin, y axis.
pub const ORIGIN_Y: AttrDefault = AttrDefault::new("originY", "0");
/// Field orientation: `N`, `R`, `I`, or `B`.
pub const ROTATION: AttrDefault = AttrDefault::new("rotation", "N");
/// Field number used for `^FN` references.
pub const NAME: AttrDefault = AttrDefault::new("name", "0");

/// Orientation codes the printer understands: normal, 90, 180, 270 degrees.
pub const ROTATIONS: [&str; 4] = ["N", "R", "I", "B"];

/// Read-only view of an element's attributes with default fallback.
#[derive(Debug, Clone, Copy)]
pub struct Attributes<'a> {
    element: &'a Element,
}

impl<'a> Attributes<'a> {
    /// Wrap an element.
    pub fn of(element: &'a Element) -> Self {
        Self { element }
    }

    /// The attribute's value, or its documented default when absent.
    pub fn get(&self, attr: &AttrDefault) -> &'a str {
        self.element.attr(attr.name).unwrap_or(attr.default)
    }

    /// Attributes present on the element that `table` does not mention.
    pub fn unknown<'t>(
        &self,
        table: &'t [AttrDefault],
    ) -> impl Iterator<Item = (&'a str, &'a str)> + use<'a, 't> {
        self.element
            .attributes
            .iter()
            .filter(move |(name, _)| !table.iter().any(|a| a.name == name.as_str()))
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}
