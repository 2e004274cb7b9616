pub mod document;
pub mod keywords;
pub mod persona;
pub mod stopwords;
pub mod text;

pub use document::{BoundingBox, Page, ParsedDocument, Section, Subsection, TextFragment};
