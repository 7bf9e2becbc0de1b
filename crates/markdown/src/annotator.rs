//! Slide segmentation of raw blocks.
//!
//! Markdown blocks are cut at blank-line runs and each segment tagged
//! with a slide transition type inferred from the run length; `-skip-`
//! spans are extracted verbatim and exempted from segmentation.

use slidedown_core::{AnnotatedBlock, BlockKind, Error, RawBlock, Result, SlideType};

use crate::splitter::{BlockSource, BlockSplitter};

/// The literal line token delimiting a skip span.
///
/// Matched case-sensitively. No escape is defined for a literal
/// occurrence of this token in ordinary prose: any line-bounded
/// occurrence is a marker.
pub const SKIP_MARKER: &str = "-skip-";

/// Annotates raw blocks with slide transition metadata.
///
/// Markdown blocks may split into many segments; code blocks are
/// trimmed and always tagged `subslide`; raw blocks pass through
/// untouched and untagged.
///
/// Skip markers pair greedily: the first opening marker pairs with the
/// next marker occurrence, so nested spans are syntactically
/// indistinguishable from a span followed by prose. An opening marker
/// with no closing marker is a fatal [`Error::MalformedSkipSpan`].
#[derive(Debug, Clone, Default)]
pub struct SlideAnnotator<S = BlockSplitter> {
    source: S,
}

impl SlideAnnotator<BlockSplitter> {
    /// Annotator over the default fence-based splitter.
    pub fn new() -> Self {
        Self {
            source: BlockSplitter::new(),
        }
    }
}

impl<S: BlockSource> SlideAnnotator<S> {
    /// Annotator over a custom block source.
    pub fn with_source(source: S) -> Self {
        Self { source }
    }

    /// Split `text` into raw blocks and annotate them.
    pub fn read(&self, text: &str) -> Result<Vec<AnnotatedBlock>> {
        self.annotate(self.source.produce(text))
    }

    /// Annotate an ordered sequence of raw blocks.
    ///
    /// Emitted blocks preserve source order. On error no blocks are
    /// returned: the conversion of the whole document aborts.
    pub fn annotate(&self, blocks: Vec<RawBlock>) -> Result<Vec<AnnotatedBlock>> {
        let mut out = Vec::with_capacity(blocks.len());

        for block in blocks {
            match block.kind {
                BlockKind::Markdown => segment_markdown(&block.content, &mut out)?,
                BlockKind::Code => {
                    // The splitter leaves a stray leading newline on
                    // fenced bodies written by the serializer; trimming
                    // keeps the round trip stable.
                    let execution_count = parse_execution_count(&block)?;
                    out.push(AnnotatedBlock {
                        kind: BlockKind::Code,
                        content: block.content.trim().to_string(),
                        slide_type: Some(SlideType::Subslide),
                        attributes: block.attributes,
                        execution_count,
                    });
                }
                BlockKind::Raw => out.push(AnnotatedBlock {
                    kind: BlockKind::Raw,
                    content: block.content,
                    slide_type: None,
                    attributes: None,
                    execution_count: None,
                }),
            }
        }

        log::debug!("Annotated into {} blocks", out.len());
        Ok(out)
    }
}

/// Execution count from a non-empty `n` fence attribute.
fn parse_execution_count(block: &RawBlock) -> Result<Option<i64>> {
    match block.attributes.as_ref().and_then(|a| a.get("n")) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<i64>()
            .map(Some)
            .map_err(|_| Error::InvalidExecutionCount(value.to_string())),
    }
}

/// Segment one markdown chunk by blank-line runs and skip spans.
///
/// A single forward pass over the chunk, threading a `(cursor,
/// pending)` state pair: `cursor` is the offset of the first
/// not-yet-emitted character, `pending` the slide type the segment
/// currently being accumulated will carry.
fn segment_markdown(content: &str, out: &mut Vec<AnnotatedBlock>) -> Result<()> {
    let mut pending = SlideType::Slide;
    let mut cursor = 0usize;
    let mut search = 0usize;
    // Cached position of the next opening marker; recomputed only
    // after a span resolves.
    let mut next_marker = content.find(SKIP_MARKER);

    while let Some(offset) = content[search..].find('\n') {
        let newline = search + offset;

        // An unresolved opening marker before this newline has
        // priority over blank-line classification.
        if let Some(open) = next_marker.filter(|&o| o < newline) {
            // Text accumulated before the marker keeps the pending
            // type; the newline bounding the marker line is not part
            // of it. The skip span itself bypasses `pending` entirely.
            let head = &content[cursor..open];
            let head = head.strip_suffix('\n').unwrap_or(head);
            if !head.is_empty() {
                out.push(AnnotatedBlock::markdown(head, pending));
            }

            let body_start = open + SKIP_MARKER.len();
            let close = content[body_start..]
                .find(SKIP_MARKER)
                .map(|i| i + body_start)
                .ok_or(Error::MalformedSkipSpan { offset: open })?;
            out.push(AnnotatedBlock {
                kind: BlockKind::Markdown,
                content: content[body_start..close].trim().to_string(),
                slide_type: Some(SlideType::Skip),
                attributes: None,
                execution_count: None,
            });

            cursor = close + SKIP_MARKER.len();
            if content[cursor..].starts_with('\n') {
                cursor += 1;
            }
            search = cursor;
            next_marker = content[cursor..].find(SKIP_MARKER).map(|i| i + cursor);
            continue;
        }

        let run = content[newline..].bytes().take_while(|&b| b == b'\n').count();
        if run == 1 {
            search = newline + 1;
            continue;
        }

        // 2 newlines = one blank line; runs past four still read as a
        // slide boundary, with the extra newlines left to the next
        // segment.
        let boundary = match run {
            2 => SlideType::Fragment,
            3 => SlideType::Subslide,
            _ => SlideType::Slide,
        };
        let segment = &content[cursor..newline];
        // Interior empty segments vanish; only the trailing segment
        // below is emitted unconditionally.
        if !segment.is_empty() {
            out.push(AnnotatedBlock::markdown(segment, pending));
        }
        pending = boundary;
        cursor = newline + run.min(4);
        search = cursor;
    }

    out.push(AnnotatedBlock::markdown(&content[cursor..], pending));
    Ok(())
}
