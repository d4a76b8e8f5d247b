//! Converter for serialized source documents.

use crate::error::Result;
use crate::model::SourceDocument;
use std::path::Path;

use super::{convert, ConvertOptions, ConvertResult, DocumentConverter};

/// Converts source documents stored as JSON (the block list produced by
/// document extraction).
#[derive(Debug, Clone, Default)]
pub struct SourceConverter {
    _private: (),
}

impl SourceConverter {
    /// Create a new source converter.
    pub fn new() -> Self {
        Self { _private: () }
    }

    fn load(&self, bytes: &[u8], name: Option<&str>) -> Result<SourceDocument> {
        let mut source: SourceDocument = serde_json::from_slice(bytes)?;
        if source.name.is_none() {
            source.name = name.map(str::to_string);
        }
        Ok(source)
    }
}

impl DocumentConverter for SourceConverter {
    fn supported_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn name(&self) -> &str {
        "source"
    }

    fn convert(&self, path: &Path, options: &ConvertOptions) -> Result<ConvertResult> {
        let bytes = std::fs::read(path)?;
        let name = path.file_stem().and_then(|s| s.to_str());
        convert(self.load(&bytes, name)?, options)
    }

    fn convert_bytes(&self, bytes: &[u8], options: &ConvertOptions) -> Result<ConvertResult> {
        convert(self.load(bytes, None)?, options)
    }
}
