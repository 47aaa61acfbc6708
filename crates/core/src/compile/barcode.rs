//! `BARCODE` element compiler.

use super::ElementCompiler;
use super::attrs::{AttrDefault, Attributes, NAME, ORIGIN_X, ORIGIN_Y, ROTATION};
use crate::markup::document::{BARCODE_TAG, Element};

/// Symbology, optionally prefixed with `BC-`.
pub const BARCODE_TYPE: AttrDefault = AttrDefault::new("barcodetype", "BC-CODE39");
/// Narrow bar width for `^BY`.
pub const BAR_WIDTH: AttrDefault = AttrDefault::new("barcodewidth", "1");
/// Wide-to-narrow bar ratio for `^BY`.
pub const BAR_RATIO: AttrDefault = AttrDefault::new("barcoderatio", "1");
/// Bar height.
pub const HEIGHT: AttrDefault = AttrDefault::new("heightmagnification", "50");
/// Mod-43 check digit flag, `Y` or `N`.
pub const CHECK_DIGIT: AttrDefault = AttrDefault::new("addcheckdigit", "N");

/// Every attribute a `BARCODE` element understands, with its default.
pub const DEFAULTS: &[AttrDefault] = &[
    ORIGIN_X,
    ORIGIN_Y,
    BARCODE_TYPE,
    BAR_WIDTH,
    BAR_RATIO,
    HEIGHT,
    CHECK_DIGIT,
    ROTATION,
    NAME,
];

const TYPE_PREFIX: &str = "BC-";

/// Strip every leading `BC-` from a symbology name, so `BC-BC-X` becomes
/// `X`. A `BC-` later in the name is kept. No validation.
pub fn normalize_symbology(mut raw: &str) -> &str {
    while let Some(rest) = raw.strip_prefix(TYPE_PREFIX) {
        raw = rest;
    }
    raw
}

/// Emits `^FO{x},{y}^BY{w},{r}^B{type}{rotation},{h},{check}^FN{name}^FS`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BarcodeCompiler;

impl ElementCompiler for BarcodeCompiler {
    fn tag(&self) -> &str {
        BARCODE_TAG
    }

    fn defaults(&self) -> &'static [AttrDefault] {
        DEFAULTS
    }

    fn compile(&self, element: &Element) -> String {
        let attrs = Attributes::of(element);
        format!(
            "^FO{},{}^BY{},{}^B{}{},{},{}^FN{}^FS",
            attrs.get(&ORIGIN_X),
            attrs.get(&ORIGIN_Y),
            attrs.get(&BAR_WIDTH),
            attrs.get(&BAR_RATIO),
            normalize_symbology(attrs.get(&BARCODE_TYPE)),
            attrs.get(&ROTATION),
            attrs.get(&HEIGHT),
            attrs.get(&CHECK_DIGIT),
            attrs.get(&NAME),
        )
    }
}
