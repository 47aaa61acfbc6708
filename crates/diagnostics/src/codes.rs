//! Diagnostic ID constants.
//!
//! Use these instead of string literals so typos fail at compile time.
//! `1xxx` codes come from the document parser, `2xxx` from the element
//! compiler, `3xxx` from collaborators such as the rasterization service.

/// The markup is not well-formed and cannot be translated.
pub const MALFORMED_MARKUP: &str = "ZPLM1001";

/// A child of the document root has no registered element compiler.
pub const UNRECOGNIZED_ELEMENT: &str = "ZPLM2001";

/// An attribute is not part of the element's default table.
pub const UNKNOWN_ATTRIBUTE: &str = "ZPLM2002";

/// A label element contains child elements, which are never descended into.
pub const NESTED_ELEMENT_IGNORED: &str = "ZPLM2003";

/// A rotation attribute is outside `N`, `R`, `I`, `B`.
pub const INVALID_ROTATION: &str = "ZPLM2004";

/// The rasterization service rejected or failed to render the command stream.
pub const RASTER_FAILED: &str = "ZPLM3001";

/// Every code defined in this module, in numeric order.
pub const ALL: &[&str] = &[
    MALFORMED_MARKUP,
    UNRECOGNIZED_ELEMENT,
    UNKNOWN_ATTRIBUTE,
    NESTED_ELEMENT_IGNORED,
    INVALID_ROTATION,
    RASTER_FAILED,
];
