//! Domain types for the markdown side of slide conversion.

use serde::{Deserialize, Serialize};

/// The kind of a raw block produced by the splitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    /// Prose between code fences; subject to slide segmentation.
    Markdown,
    /// The body of a fenced code block.
    Code,
    /// Opaque content carried over from a notebook raw cell.
    Raw,
}

/// Fence attributes parsed from a code block's info string.
///
/// Covers both the plain form (`python`) and the braced form
/// (`{.python .input n=1 #example}`). Key-value pairs keep their
/// source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeAttributes {
    /// Identifier from a `#id` token, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Classes from `.class` tokens; a plain language name becomes the
    /// first class.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,

    /// `key=value` tokens in source order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub kvs: Vec<(String, String)>,
}

impl CodeAttributes {
    /// True when no id, classes, or key-value pairs were parsed.
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.classes.is_empty() && self.kvs.is_empty()
    }

    /// The fence language, taken to be the first class.
    pub fn language(&self) -> Option<&str> {
        self.classes.first().map(|s| s.as_str())
    }

    /// Look up a key-value attribute by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.kvs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// A raw block produced by the splitter. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBlock {
    /// What kind of content this block holds.
    pub kind: BlockKind,

    /// The block's text. For code blocks, the fenced body without the
    /// fence lines.
    pub content: String,

    /// Fence attributes; only ever present on code blocks.
    pub attributes: Option<CodeAttributes>,
}

impl RawBlock {
    /// Create a markdown block.
    pub fn markdown(content: impl Into<String>) -> Self {
        Self {
            kind: BlockKind::Markdown,
            content: content.into(),
            attributes: None,
        }
    }

    /// Create a code block with optional fence attributes.
    pub fn code(content: impl Into<String>, attributes: Option<CodeAttributes>) -> Self {
        Self {
            kind: BlockKind::Code,
            content: content.into(),
            attributes,
        }
    }

    /// Create a raw block.
    pub fn raw(content: impl Into<String>) -> Self {
        Self {
            kind: BlockKind::Raw,
            content: content.into(),
            attributes: None,
        }
    }
}

/// Slide transition type attached to a block or cell.
///
/// Matches the slide type vocabulary of reveal-style slideshows. The
/// set is closed; `Notes` is reserved and currently never produced by
/// the annotator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlideType {
    /// A new top-level slide.
    Slide,
    /// A vertical sub-slide under the current slide.
    Subslide,
    /// Content revealed in place on the current slide.
    Fragment,
    /// Content excluded from the presentation.
    Skip,
    /// Speaker notes (reserved).
    Notes,
}

impl SlideType {
    /// The wire string used in slideshow metadata.
    pub fn as_str(&self) -> &'static str {
        match self {
            SlideType::Slide => "slide",
            SlideType::Subslide => "subslide",
            SlideType::Fragment => "fragment",
            SlideType::Skip => "skip",
            SlideType::Notes => "notes",
        }
    }

    /// Parse a wire string; `None` for anything outside the closed set.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "slide" => Some(SlideType::Slide),
            "subslide" => Some(SlideType::Subslide),
            "fragment" => Some(SlideType::Fragment),
            "skip" => Some(SlideType::Skip),
            "notes" => Some(SlideType::Notes),
            _ => None,
        }
    }
}

impl std::fmt::Display for SlideType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raw block plus the slide metadata the annotator attached to it.
///
/// Produced by the annotator, consumed by the cell builder; never
/// mutated after emission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedBlock {
    /// What kind of content this block holds.
    pub kind: BlockKind,

    /// The block's text after any normalization the annotator applies.
    pub content: String,

    /// Slide transition type; `None` for raw blocks.
    pub slide_type: Option<SlideType>,

    /// Fence attributes carried over from the raw block.
    pub attributes: Option<CodeAttributes>,

    /// Execution count from the `n` fence attribute, code blocks only.
    pub execution_count: Option<i64>,
}

impl AnnotatedBlock {
    /// Create a markdown segment with a slide type.
    pub fn markdown(content: impl Into<String>, slide_type: SlideType) -> Self {
        Self {
            kind: BlockKind::Markdown,
            content: content.into(),
            slide_type: Some(slide_type),
            attributes: None,
            execution_count: None,
        }
    }
}

/// The format of a source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentFormat {
    /// Slide-annotated markdown text.
    Markdown,
    /// Notebook JSON container.
    Notebook,
}

impl DocumentFormat {
    /// Detect format from a file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "md" | "markdown" => Some(Self::Markdown),
            "ipynb" => Some(Self::Notebook),
            _ => None,
        }
    }

    /// Detect format from document content.
    ///
    /// A notebook is a JSON object, so a leading `{` is decisive;
    /// anything else is treated as markdown only if it looks like
    /// text at all (non-empty).
    pub fn from_content(content: &str) -> Option<Self> {
        let trimmed = content.trim_start();
        if trimmed.starts_with('{') {
            Some(Self::Notebook)
        } else if !trimmed.is_empty() {
            Some(Self::Markdown)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slide_type_round_trip() {
        for ty in [
            SlideType::Slide,
            SlideType::Subslide,
            SlideType::Fragment,
            SlideType::Skip,
            SlideType::Notes,
        ] {
            assert_eq!(SlideType::parse(ty.as_str()), Some(ty));
        }
        assert_eq!(SlideType::parse("Slide"), None);
        assert_eq!(SlideType::parse("speakernotes"), None);
    }

    #[test]
    fn test_code_attributes_lookup() {
        let attrs = CodeAttributes {
            id: None,
            classes: vec!["python".to_string(), "input".to_string()],
            kvs: vec![("n".to_string(), "3".to_string())],
        };
        assert_eq!(attrs.language(), Some("python"));
        assert_eq!(attrs.get("n"), Some("3"));
        assert_eq!(attrs.get("m"), None);
        assert!(!attrs.is_empty());
        assert!(CodeAttributes::default().is_empty());
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            DocumentFormat::from_extension("md"),
            Some(DocumentFormat::Markdown)
        );
        assert_eq!(
            DocumentFormat::from_extension("IPYNB"),
            Some(DocumentFormat::Notebook)
        );
        assert_eq!(DocumentFormat::from_extension("txt"), None);
    }

    #[test]
    fn test_format_from_content() {
        assert_eq!(
            DocumentFormat::from_content("{\"cells\": []}"),
            Some(DocumentFormat::Notebook)
        );
        assert_eq!(
            DocumentFormat::from_content("# Title"),
            Some(DocumentFormat::Markdown)
        );
        assert_eq!(DocumentFormat::from_content("   \n"), None);
    }
}
