//! Serializing cells back to slide-annotated markdown.
//!
//! The inverse of the annotator: each cell's slide type is turned back
//! into the blank-line run (or `-skip-` wrapping) that produced it,
//! and the result handed to a generic cell-to-text renderer.

use slidedown_core::{Cell, CodeAttributes, SlideType};

use crate::annotator::SKIP_MARKER;

/// Renders a sequence of cells to document text.
pub trait CellRenderer {
    fn render(&self, cells: &[Cell]) -> String;
}

/// Default renderer: joins cell sources with one blank line and
/// re-fences code cells from their preserved attributes.
///
/// The `"\n\n"` joiner is the constant the serializer's slide-type
/// prefixes are calibrated against.
#[derive(Debug, Clone, Default)]
pub struct MarkdownRenderer;

impl MarkdownRenderer {
    /// Create a new renderer.
    pub fn new() -> Self {
        Self
    }
}

impl CellRenderer for MarkdownRenderer {
    fn render(&self, cells: &[Cell]) -> String {
        cells
            .iter()
            .map(render_cell)
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

fn render_cell(cell: &Cell) -> String {
    match cell {
        Cell::Code {
            metadata, source, ..
        } => {
            let info = fence_info(metadata.attributes.as_ref());
            format!("```{}\n{}\n```", info, source)
        }
        _ => cell.source().to_string(),
    }
}

/// Rebuild a fence info string from preserved attributes. A single
/// bare class renders as the plain language form; anything richer uses
/// the braced form.
fn fence_info(attrs: Option<&CodeAttributes>) -> String {
    let attrs = match attrs {
        Some(attrs) if !attrs.is_empty() => attrs,
        _ => return String::new(),
    };

    if attrs.id.is_none() && attrs.kvs.is_empty() && attrs.classes.len() == 1 {
        return attrs.classes[0].clone();
    }

    let mut parts = Vec::new();
    if let Some(id) = &attrs.id {
        parts.push(format!("#{}", id));
    }
    parts.extend(attrs.classes.iter().map(|c| format!(".{}", c)));
    parts.extend(attrs.kvs.iter().map(|(k, v)| format!("{}={}", k, v)));
    format!("{{{}}}", parts.join(" "))
}

/// Serializes cells to slide-annotated markdown.
///
/// The first cell always passes through verbatim (the reader treats
/// the initial segment as already correctly delimited). Every
/// subsequent cell is trimmed and prefixed according to its slide
/// type; cells with no slideshow metadata, or an unrecognized slide
/// type, pass through unmodified.
#[derive(Debug, Clone, Default)]
pub struct MarkdownSerializer<R = MarkdownRenderer> {
    renderer: R,
}

impl MarkdownSerializer<MarkdownRenderer> {
    /// Serializer over the default renderer.
    pub fn new() -> Self {
        Self {
            renderer: MarkdownRenderer::new(),
        }
    }
}

impl<R: CellRenderer> MarkdownSerializer<R> {
    /// Serializer over a custom renderer.
    pub fn with_renderer(renderer: R) -> Self {
        Self { renderer }
    }

    /// Serialize cells to document text.
    pub fn writes(&self, cells: &[Cell]) -> String {
        let transformed: Vec<Cell> = cells
            .iter()
            .enumerate()
            .map(|(index, cell)| {
                if index == 0 {
                    cell.clone()
                } else {
                    transform(cell)
                }
            })
            .collect();

        self.renderer.render(&transformed)
    }
}

/// Apply the slide-type transformation to one cell's source.
///
/// The renderer already inserts one blank line between cells, so a
/// subslide needs one extra newline and a slide two.
fn transform(cell: &Cell) -> Cell {
    let slide_type = cell.slide_type().and_then(SlideType::parse);
    match slide_type {
        Some(SlideType::Slide) => cell.with_source(format!("\n\n{}", cell.source().trim())),
        Some(SlideType::Subslide) => cell.with_source(format!("\n{}", cell.source().trim())),
        Some(SlideType::Fragment) => cell.with_source(cell.source().trim()),
        Some(SlideType::Skip) => cell.with_source(format!(
            "{marker}\n{}\n{marker}",
            cell.source().trim(),
            marker = SKIP_MARKER
        )),
        Some(SlideType::Notes) | None => {
            if let Some(unknown) = cell.slide_type() {
                if SlideType::parse(unknown).is_none() {
                    log::warn!("Unknown slide type {:?}, passing cell through", unknown);
                }
            }
            cell.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotator::SlideAnnotator;
    use slidedown_core::{CellMetadata, SlideType};

    fn markdown_cell(source: &str, slide_type: SlideType) -> Cell {
        Cell::markdown(source, Some(slide_type))
    }

    #[test]
    fn test_first_cell_is_verbatim() {
        let cells = vec![markdown_cell("  # Title\n", SlideType::Slide)];
        assert_eq!(MarkdownSerializer::new().writes(&cells), "  # Title\n");
    }

    #[test]
    fn test_slide_gets_two_blank_lines() {
        let cells = vec![
            markdown_cell("A", SlideType::Slide),
            markdown_cell("B", SlideType::Slide),
        ];
        assert_eq!(MarkdownSerializer::new().writes(&cells), "A\n\n\n\nB");
    }

    #[test]
    fn test_subslide_gets_one_blank_line() {
        let cells = vec![
            markdown_cell("A", SlideType::Slide),
            markdown_cell("B", SlideType::Subslide),
        ];
        assert_eq!(MarkdownSerializer::new().writes(&cells), "A\n\n\nB");
    }

    #[test]
    fn test_fragment_gets_no_extra_newlines() {
        let cells = vec![
            markdown_cell("A", SlideType::Slide),
            markdown_cell("B", SlideType::Fragment),
        ];
        assert_eq!(MarkdownSerializer::new().writes(&cells), "A\n\nB");
    }

    #[test]
    fn test_skip_is_wrapped_in_markers() {
        let cells = vec![
            markdown_cell("A", SlideType::Slide),
            markdown_cell("hidden\ntext", SlideType::Skip),
        ];
        assert_eq!(
            MarkdownSerializer::new().writes(&cells),
            "A\n\n-skip-\nhidden\ntext\n-skip-"
        );
    }

    #[test]
    fn test_untagged_cell_passes_through() {
        let cells = vec![
            markdown_cell("A", SlideType::Slide),
            Cell::markdown("  B  ", None),
        ];
        assert_eq!(MarkdownSerializer::new().writes(&cells), "A\n\n  B  ");
    }

    #[test]
    fn test_unknown_slide_type_passes_through() {
        let cells = vec![
            markdown_cell("A", SlideType::Slide),
            Cell::Markdown {
                metadata: CellMetadata {
                    slideshow: Some(slidedown_core::SlideshowMetadata {
                        slide_type: "mystery".to_string(),
                    }),
                    ..CellMetadata::default()
                },
                source: "  B  ".to_string(),
            },
        ];
        assert_eq!(MarkdownSerializer::new().writes(&cells), "A\n\n  B  ");
    }

    #[test]
    fn test_code_cell_is_refenced() {
        let cells = vec![
            markdown_cell("A", SlideType::Slide),
            Cell::Code {
                metadata: CellMetadata {
                    slideshow: Some(slidedown_core::SlideshowMetadata {
                        slide_type: "subslide".to_string(),
                    }),
                    attributes: Some(CodeAttributes {
                        id: None,
                        classes: vec!["python".to_string()],
                        kvs: Vec::new(),
                    }),
                    ..CellMetadata::default()
                },
                execution_count: None,
                source: "print(1)".to_string(),
                outputs: Vec::new(),
            },
        ];
        assert_eq!(
            MarkdownSerializer::new().writes(&cells),
            "A\n\n```python\n\nprint(1)\n```"
        );
    }

    #[test]
    fn test_fence_info_forms() {
        assert_eq!(fence_info(None), "");
        assert_eq!(
            fence_info(Some(&CodeAttributes {
                id: None,
                classes: vec!["rust".to_string()],
                kvs: Vec::new(),
            })),
            "rust"
        );
        assert_eq!(
            fence_info(Some(&CodeAttributes {
                id: Some("example".to_string()),
                classes: vec!["python".to_string(), "input".to_string()],
                kvs: vec![("n".to_string(), "1".to_string())],
            })),
            "{#example .python .input n=1}"
        );
    }

    #[test]
    fn test_prose_round_trip() {
        let text = "# Title\nIntro paragraph\n\nA fragment\n\n\nA subslide\n\n\n\nA new slide";
        let cells: Vec<Cell> = SlideAnnotator::new()
            .read(text)
            .unwrap()
            .into_iter()
            .map(|b| Cell::markdown(b.content, b.slide_type))
            .collect();

        assert_eq!(MarkdownSerializer::new().writes(&cells), text);
    }

    #[test]
    fn test_round_trip_normalizes_only_after_first_segment() {
        // The first segment keeps its exact original formatting; later
        // segments are re-emitted trimmed with canonical separators.
        let text = "  spaced first  \n\nsecond";
        let cells: Vec<Cell> = SlideAnnotator::new()
            .read(text)
            .unwrap()
            .into_iter()
            .map(|b| Cell::markdown(b.content, b.slide_type))
            .collect();

        assert_eq!(MarkdownSerializer::new().writes(&cells), text);
    }
}
