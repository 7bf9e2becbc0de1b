//! Notebook container backend for slide conversion.
//!
//! Reads and writes the v4 JSON container and builds cells from
//! annotated markdown blocks.

pub mod builder;
pub mod model;

pub use builder::{notebook_from_blocks, CellBuilder};
pub use model::Notebook;
