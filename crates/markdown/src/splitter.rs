//! Splitting raw document text into markdown and fenced-code blocks.

use regex::Regex;
use slidedown_core::{CodeAttributes, RawBlock};
use std::sync::LazyLock;

/// Regex matching the opening line of a fenced code block, capturing
/// the fence itself and the info string.
static FENCE_OPEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(`{3,}|~{3,})[ \t]*(.*)$").unwrap());

/// Source of raw blocks the annotator composes over.
pub trait BlockSource {
    /// Split raw document text into an ordered sequence of blocks.
    fn produce(&self, text: &str) -> Vec<RawBlock>;
}

/// Fence-based block splitter.
///
/// Everything between fenced code blocks becomes a markdown block,
/// trailing newlines included; fenced bodies become code blocks with
/// attributes parsed from the info string. An opening fence with no
/// matching closing fence is treated as ordinary markdown.
#[derive(Debug, Clone, Default)]
pub struct BlockSplitter;

impl BlockSplitter {
    /// Create a new splitter.
    pub fn new() -> Self {
        Self
    }

    /// Split document text into raw blocks.
    pub fn split(&self, text: &str) -> Vec<RawBlock> {
        let lines: Vec<&str> = text.split('\n').collect();
        let mut blocks = Vec::new();
        let mut chunk_start = 0;
        let mut i = 0;

        while i < lines.len() {
            let caps = match FENCE_OPEN_REGEX.captures(lines[i]) {
                Some(caps) => caps,
                None => {
                    i += 1;
                    continue;
                }
            };
            let fence = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
            let close = match find_closing_fence(&lines, i + 1, fence) {
                Some(close) => close,
                None => {
                    log::warn!("Unclosed code fence at line {}, treating as markdown", i + 1);
                    i += 1;
                    continue;
                }
            };

            if i > chunk_start {
                // The chunk keeps the newline that terminated its last
                // line, which bounds the fence line.
                let chunk = format!("{}\n", lines[chunk_start..i].join("\n"));
                blocks.push(RawBlock::markdown(chunk));
            }

            let info = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
            let body = lines[i + 1..close].join("\n");
            blocks.push(RawBlock::code(body, parse_attributes(info)));

            i = close + 1;
            chunk_start = i;
        }

        if chunk_start < lines.len() {
            let chunk = lines[chunk_start..].join("\n");
            // A fence-free document is always one markdown block, even
            // when empty; only a trailing chunk after a fence may be
            // elided.
            if !chunk.is_empty() || blocks.is_empty() {
                blocks.push(RawBlock::markdown(chunk));
            }
        }

        log::debug!("Split document into {} raw blocks", blocks.len());
        blocks
    }
}

impl BlockSource for BlockSplitter {
    fn produce(&self, text: &str) -> Vec<RawBlock> {
        self.split(text)
    }
}

/// Find the line closing the fence opened with `fence`: same fence
/// character, at least as long, nothing else on the line.
fn find_closing_fence(lines: &[&str], from: usize, fence: &str) -> Option<usize> {
    let fence_char = fence.chars().next()?;
    lines[from..].iter().position(|line| {
        let trimmed = line.trim_end();
        trimmed.len() >= fence.len() && trimmed.chars().all(|c| c == fence_char)
    })
    .map(|offset| from + offset)
}

/// Parse a fence info string into code attributes.
///
/// Accepts the plain form (`python`) and the braced form
/// (`{.python .input n=1 #example}`). Tokens starting with `.` are
/// classes, `#` sets the id, `key=value` pairs keep source order, and
/// a bare token is a class (the first class doubles as the language).
fn parse_attributes(info: &str) -> Option<CodeAttributes> {
    let info = info.trim();
    if info.is_empty() {
        return None;
    }

    let inner = if info.starts_with('{') && info.ends_with('}') {
        &info[1..info.len() - 1]
    } else {
        info
    };

    let mut attrs = CodeAttributes::default();
    for token in inner.split_whitespace() {
        if let Some(class) = token.strip_prefix('.') {
            attrs.classes.push(class.to_string());
        } else if let Some(id) = token.strip_prefix('#') {
            if attrs.id.is_none() {
                attrs.id = Some(id.to_string());
            }
        } else if let Some((key, value)) = token.split_once('=') {
            attrs
                .kvs
                .push((key.to_string(), value.trim_matches('"').to_string()));
        } else {
            attrs.classes.push(token.to_string());
        }
    }

    if attrs.is_empty() {
        None
    } else {
        Some(attrs)
    }
}
