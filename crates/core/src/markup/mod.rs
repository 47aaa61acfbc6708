/// Document and element types.
pub mod document;
/// Markup text to [`Document`](document::Document) parser.
pub mod parser;
