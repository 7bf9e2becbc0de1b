//! Building notebook cells from annotated blocks.

use slidedown_core::{
    AnnotatedBlock, BlockKind, Cell, CellMetadata, SlideType, SlideshowMetadata,
};

use crate::model::Notebook;

/// Maps annotated blocks to notebook cells.
#[derive(Debug, Clone, Default)]
pub struct CellBuilder;

impl CellBuilder {
    /// Create a new cell builder.
    pub fn new() -> Self {
        Self
    }

    /// Build one cell from an annotated block.
    pub fn build(&self, block: AnnotatedBlock) -> Cell {
        match block.kind {
            BlockKind::Markdown => Cell::markdown(block.content, block.slide_type),
            BlockKind::Code => {
                // Code is always a subslide; fence attributes ride
                // along in the metadata so the writer can re-fence.
                let attributes = block.attributes.filter(|a| !a.is_empty());
                Cell::Code {
                    metadata: CellMetadata {
                        slideshow: Some(SlideshowMetadata {
                            slide_type: SlideType::Subslide.as_str().to_string(),
                        }),
                        attributes,
                        extra: serde_json::Map::new(),
                    },
                    execution_count: block.execution_count,
                    source: block.content,
                    outputs: Vec::new(),
                }
            }
            BlockKind::Raw => Cell::raw(block.content),
        }
    }
}

/// Build a whole notebook from annotated blocks.
pub fn notebook_from_blocks(blocks: Vec<AnnotatedBlock>) -> Notebook {
    let builder = CellBuilder::new();
    let cells = blocks.into_iter().map(|b| builder.build(b)).collect();
    Notebook::new(cells)
}
