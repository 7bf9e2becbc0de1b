//! The notebook cell model.
//!
//! Cells are the interchange unit between the markdown serializer and
//! the notebook container: nbformat-v4 shaped, with slide metadata
//! under `metadata.slideshow.slide_type` and fence attributes under
//! `metadata.attributes`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{BlockKind, CodeAttributes, SlideType};

/// Slideshow metadata attached to a cell.
///
/// The slide type is kept as a plain string so that unknown values in
/// foreign notebooks survive a round trip instead of failing to parse;
/// the serializer treats anything outside [`SlideType`] as a
/// pass-through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideshowMetadata {
    /// One of `slide`, `subslide`, `fragment`, `skip`, `notes` — or an
    /// unknown string from a foreign tool.
    pub slide_type: String,
}

/// Cell metadata. Unrecognized keys are carried opaquely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CellMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slideshow: Option<SlideshowMetadata>,

    /// Fence attributes preserved from the markdown source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<CodeAttributes>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl CellMetadata {
    /// Metadata carrying only a slide type.
    pub fn with_slide_type(slide_type: SlideType) -> Self {
        Self {
            slideshow: Some(SlideshowMetadata {
                slide_type: slide_type.as_str().to_string(),
            }),
            ..Self::default()
        }
    }
}

/// A single notebook cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cell_type", rename_all = "lowercase")]
pub enum Cell {
    Markdown {
        #[serde(default)]
        metadata: CellMetadata,
        #[serde(with = "multiline_source")]
        source: String,
    },
    Code {
        #[serde(default)]
        metadata: CellMetadata,
        /// Present (possibly null) on every code cell per nbformat.
        #[serde(default)]
        execution_count: Option<i64>,
        #[serde(with = "multiline_source")]
        source: String,
        /// Execution outputs, carried opaquely.
        #[serde(default)]
        outputs: Vec<Value>,
    },
    Raw {
        #[serde(default)]
        metadata: CellMetadata,
        #[serde(with = "multiline_source")]
        source: String,
    },
}

impl Cell {
    /// Create a markdown cell, optionally tagged with a slide type.
    pub fn markdown(source: impl Into<String>, slide_type: Option<SlideType>) -> Self {
        Cell::Markdown {
            metadata: match slide_type {
                Some(ty) => CellMetadata::with_slide_type(ty),
                None => CellMetadata::default(),
            },
            source: source.into(),
        }
    }

    /// Create a raw cell.
    pub fn raw(source: impl Into<String>) -> Self {
        Cell::Raw {
            metadata: CellMetadata::default(),
            source: source.into(),
        }
    }

    /// The kind of block this cell corresponds to.
    pub fn kind(&self) -> BlockKind {
        match self {
            Cell::Markdown { .. } => BlockKind::Markdown,
            Cell::Code { .. } => BlockKind::Code,
            Cell::Raw { .. } => BlockKind::Raw,
        }
    }

    /// The cell's source text.
    pub fn source(&self) -> &str {
        match self {
            Cell::Markdown { source, .. }
            | Cell::Code { source, .. }
            | Cell::Raw { source, .. } => source,
        }
    }

    /// The cell's metadata.
    pub fn metadata(&self) -> &CellMetadata {
        match self {
            Cell::Markdown { metadata, .. }
            | Cell::Code { metadata, .. }
            | Cell::Raw { metadata, .. } => metadata,
        }
    }

    /// The raw slide type string from the slideshow metadata, if any.
    pub fn slide_type(&self) -> Option<&str> {
        self.metadata()
            .slideshow
            .as_ref()
            .map(|s| s.slide_type.as_str())
    }

    /// Copy of this cell with its source replaced.
    pub fn with_source(&self, source: impl Into<String>) -> Self {
        let mut cell = self.clone();
        match &mut cell {
            Cell::Markdown { source: s, .. }
            | Cell::Code { source: s, .. }
            | Cell::Raw { source: s, .. } => *s = source.into(),
        }
        cell
    }
}

/// nbformat allows `source` to be either a single string or a list of
/// line strings. We accept both on input and always write the single
/// string form.
mod multiline_source {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(source: &str, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(source)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Source {
            Text(String),
            Lines(Vec<String>),
        }

        Ok(match Source::deserialize(deserializer)? {
            Source::Text(text) => text,
            Source::Lines(lines) => lines.concat(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_cell_json_shape() {
        let cell = Cell::markdown("# Title", Some(SlideType::Slide));
        let json = serde_json::to_value(&cell).unwrap();

        assert_eq!(json["cell_type"], "markdown");
        assert_eq!(json["source"], "# Title");
        assert_eq!(json["metadata"]["slideshow"]["slide_type"], "slide");
    }

    #[test]
    fn test_code_cell_keeps_execution_count_key() {
        let cell = Cell::Code {
            metadata: CellMetadata::with_slide_type(SlideType::Subslide),
            execution_count: None,
            source: "int i;".to_string(),
            outputs: Vec::new(),
        };
        let json = serde_json::to_value(&cell).unwrap();

        assert_eq!(json["cell_type"], "code");
        assert!(json["execution_count"].is_null());
        assert_eq!(json["outputs"], serde_json::json!([]));
    }

    #[test]
    fn test_source_accepts_list_of_lines() {
        let json = r#"{
            "cell_type": "markdown",
            "metadata": {},
            "source": ["line one\n", "line two"]
        }"#;
        let cell: Cell = serde_json::from_str(json).unwrap();
        assert_eq!(cell.source(), "line one\nline two");
    }

    #[test]
    fn test_unknown_slide_type_survives() {
        let json = r#"{
            "cell_type": "markdown",
            "metadata": {"slideshow": {"slide_type": "mystery"}},
            "source": "x"
        }"#;
        let cell: Cell = serde_json::from_str(json).unwrap();
        assert_eq!(cell.slide_type(), Some("mystery"));
        assert_eq!(SlideType::parse(cell.slide_type().unwrap()), None);
    }

    #[test]
    fn test_extra_metadata_round_trips() {
        let json = r#"{
            "cell_type": "raw",
            "metadata": {"collapsed": true},
            "source": "raw text"
        }"#;
        let cell: Cell = serde_json::from_str(json).unwrap();
        assert_eq!(cell.metadata().extra["collapsed"], true);

        let back = serde_json::to_value(&cell).unwrap();
        assert_eq!(back["metadata"]["collapsed"], true);
    }

    #[test]
    fn test_with_source_preserves_metadata() {
        let cell = Cell::markdown("old", Some(SlideType::Fragment));
        let updated = cell.with_source("new");
        assert_eq!(updated.source(), "new");
        assert_eq!(updated.slide_type(), Some("fragment"));
    }
}
