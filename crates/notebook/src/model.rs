//! The notebook document envelope.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use slidedown_core::{Cell, Error, Result};

/// A notebook document in the v4 container format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notebook {
    pub cells: Vec<Cell>,

    /// Document-level metadata, carried opaquely.
    #[serde(default)]
    pub metadata: serde_json::Map<String, Value>,

    pub nbformat: u32,
    pub nbformat_minor: u32,
}

impl Notebook {
    /// Create a new v4.5 notebook holding the given cells.
    pub fn new(cells: Vec<Cell>) -> Self {
        Self {
            cells,
            metadata: serde_json::Map::new(),
            nbformat: 4,
            nbformat_minor: 5,
        }
    }

    /// Parse a notebook from its JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        let notebook: Self =
            serde_json::from_str(text).map_err(|e| Error::NotebookJson(e.to_string()))?;
        log::debug!("Parsed notebook with {} cells", notebook.cells.len());
        Ok(notebook)
    }

    /// Serialize the notebook to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::NotebookJson(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slidedown_core::SlideType;

    #[test]
    fn test_envelope_fields() {
        let nb = Notebook::new(vec![Cell::markdown("# Hi", Some(SlideType::Slide))]);
        let json = serde_json::to_value(&nb).unwrap();

        assert_eq!(json["nbformat"], 4);
        assert_eq!(json["nbformat_minor"], 5);
        assert_eq!(json["metadata"], serde_json::json!({}));
        assert_eq!(json["cells"][0]["cell_type"], "markdown");
    }

    #[test]
    fn test_json_round_trip() {
        let nb = Notebook::new(vec![
            Cell::markdown("# Hi", Some(SlideType::Slide)),
            Cell::raw("verbatim"),
        ]);
        let text = nb.to_json().unwrap();
        let back = Notebook::from_json(&text).unwrap();

        assert_eq!(back, nb);
    }

    #[test]
    fn test_invalid_json_is_a_notebook_error() {
        let err = Notebook::from_json("{not json").unwrap_err();
        assert!(matches!(err, Error::NotebookJson(_)));
    }

    #[test]
    fn test_document_metadata_is_preserved() {
        let text = r#"{
            "cells": [],
            "metadata": {"kernelspec": {"name": "python3"}},
            "nbformat": 4,
            "nbformat_minor": 2
        }"#;
        let nb = Notebook::from_json(text).unwrap();
        assert_eq!(nb.nbformat_minor, 2);
        assert_eq!(nb.metadata["kernelspec"]["name"], "python3");
    }
}
