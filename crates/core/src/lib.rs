//! Core domain types, cell model, and error taxonomy for converting
//! between slide-annotated markdown and notebook containers.

pub mod cell;
pub mod error;
pub mod types;

pub use cell::{Cell, CellMetadata, SlideshowMetadata};
pub use error::{Error, Result};
pub use types::{
    AnnotatedBlock, BlockKind, CodeAttributes, DocumentFormat, RawBlock, SlideType,
};
