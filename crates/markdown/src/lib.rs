//! Markdown backend for slide conversion.
//!
//! The reader side splits document text into fenced-code and markdown
//! blocks, then segments the markdown at blank-line runs into
//! slide-typed blocks; the writer side is its inverse.

pub mod annotator;
pub mod serializer;
pub mod splitter;

pub use annotator::{SlideAnnotator, SKIP_MARKER};
pub use serializer::{CellRenderer, MarkdownRenderer, MarkdownSerializer};
pub use splitter::{BlockSource, BlockSplitter};
