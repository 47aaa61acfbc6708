//! Element compiler.
//!
//! Each element kind has one [`ElementCompiler`], registered in a
//! [`CompilerRegistry`] under its tag name. Adding a kind means writing a
//! compiler and registering it; nothing else dispatches on tags.

/// Default tables and the lenient attribute accessor.
pub mod attrs;
/// `BARCODE` compiler.
pub mod barcode;
/// `TEXT` compiler.
pub mod text;

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use zpl_markup_diagnostics::{Diagnostic, codes};

pub use attrs::{AttrDefault, Attributes};
pub use barcode::BarcodeCompiler;
pub use text::TextCompiler;

use crate::markup::document::Element;

/// Shorthand for building a diagnostic context map.
macro_rules! ctx {
    ($($k:expr => $v:expr),+ $(,)?) => {
        BTreeMap::from([$(($k.into(), $v.into())),+])
    };
}

/// Turns one element of a given kind into one ZPL statement.
///
/// Compilation never fails: every attribute has a default, so sparse or
/// odd elements still produce a statement.
pub trait ElementCompiler: Send + Sync {
    /// Tag name this compiler handles (e.g. `"TEXT"`).
    fn tag(&self) -> &str;

    /// The attributes this compiler reads, with their defaults.
    fn defaults(&self) -> &'static [AttrDefault];

    /// Emit the statement for `element`.
    fn compile(&self, element: &Element) -> String;

    /// Strict-mode checks. Never affects [`compile`](Self::compile) output.
    ///
    /// The default flags attributes missing from [`defaults`](Self::defaults)
    /// and rotation values the printer does not define.
    fn check(&self, element: &Element) -> Vec<Diagnostic> {
        let table = self.defaults();
        let attrs = Attributes::of(element);
        let mut out: Vec<Diagnostic> = attrs
            .unknown(table)
            .map(|(name, _)| {
                Diagnostic::warn(
                    codes::UNKNOWN_ATTRIBUTE,
                    format!("<{}> ignores attribute `{name}`", self.tag()),
                    Some(element.span),
                )
                .with_context(ctx!("tag" => self.tag(), "attribute" => name))
            })
            .collect();

        if table.contains(&attrs::ROTATION) {
            let rotation = attrs.get(&attrs::ROTATION);
            if !attrs::ROTATIONS.contains(&rotation) {
                out.push(
                    Diagnostic::warn(
                        codes::INVALID_ROTATION,
                        format!("rotation `{rotation}` is not one of N, R, I, B"),
                        Some(element.span),
                    )
                    .with_context(ctx!("tag" => self.tag(), "value" => rotation)),
                );
            }
        }
        out
    }
}

/// Tag-keyed set of element compilers.
pub struct CompilerRegistry {
    compilers: HashMap<String, Box<dyn ElementCompiler>>,
}

impl CompilerRegistry {
    /// A registry with no compilers; every element is unrecognized.
    pub fn empty() -> Self {
        Self {
            compilers: HashMap::new(),
        }
    }

    /// A registry with the `TEXT` and `BARCODE` compilers.
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(TextCompiler));
        registry.register(Box::new(BarcodeCompiler));
        registry
    }

    /// Register `compiler` under its tag, returning any compiler it replaced.
    pub fn register(
        &mut self,
        compiler: Box<dyn ElementCompiler>,
    ) -> Option<Box<dyn ElementCompiler>> {
        self.compilers.insert(compiler.tag().to_string(), compiler)
    }

    /// Look up the compiler for a tag.
    pub fn get(&self, tag: &str) -> Option<&dyn ElementCompiler> {
        self.compilers.get(tag).map(Box::as_ref)
    }

    /// Registered tag names, sorted.
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.compilers.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }

    /// Compile one element, or `None` when its tag has no compiler.
    pub fn compile(&self, element: &Element) -> Option<String> {
        self.get(element.tag()).map(|c| c.compile(element))
    }
}

impl Default for CompilerRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for CompilerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompilerRegistry")
            .field("tags", &self.tags())
            .finish()
    }
}
