//! End-to-end conversion: parse a source document, enrich it and render it.
//!
//! Input formats are handled by [`DocumentConverter`] implementations kept in
//! a [`ConverterRegistry`] and dispatched on file extension. Batches are
//! converted in parallel, and each document's failure stays with that
//! document.
//!
//! # Example
//!
//! ```no_run
//! use judgment_parser::convert::{ConverterRegistry, ConvertOptions};
//! use std::path::Path;
//!
//! fn main() -> judgment_parser::Result<()> {
//!     let registry = ConverterRegistry::with_defaults();
//!     let options = ConvertOptions::new().with_family("uksc");
//!
//!     let result = registry.convert(Path::new("judgment.json"), &options)?;
//!     println!("{}", result.content);
//!     Ok(())
//! }
//! ```

mod source;

pub use source::SourceConverter;

use crate::error::{Error, Result};
use crate::model::{Metadata, SourceDocument};
use crate::parser::{JudgmentParser, ParseOptions};
use crate::render::{to_akn_with_stats, to_json, JsonFormat, ParseStats, RenderOptions};
use rayon::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Options for judgment conversion.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Document family name (see [`crate::parser::FamilyRegistry`])
    pub family: String,

    /// Parsing options
    pub parse: ParseOptions,

    /// Rendering options
    pub render: RenderOptions,

    /// Whether to collect statistics during conversion
    pub collect_stats: bool,

    /// Output format
    pub output_format: OutputFormat,
}

impl ConvertOptions {
    /// Create new conversion options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the document family.
    pub fn with_family(mut self, family: impl Into<String>) -> Self {
        self.family = family.into();
        self
    }

    /// Set parsing options.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse = options;
        self
    }

    /// Set rendering options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render = options;
        self
    }

    /// Enable statistics collection.
    pub fn with_stats(mut self, collect: bool) -> Self {
        self.collect_stats = collect;
        self
    }

    /// Set output format.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            family: "ew".to_string(),
            parse: ParseOptions::default(),
            render: RenderOptions::default(),
            collect_stats: false,
            output_format: OutputFormat::default(),
        }
    }
}

/// Output format for conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Akoma Ntoso XML
    #[default]
    Xml,

    /// The parsed judgment as JSON
    Json,
}

/// Result of judgment conversion.
#[derive(Debug, Clone)]
pub struct ConvertResult {
    /// Converted content
    pub content: String,

    /// Judgment metadata
    pub metadata: Metadata,

    /// Structure statistics (if collected)
    pub stats: Option<ParseStats>,

    /// MIME type of the output
    pub mime_type: &'static str,
}

impl ConvertResult {
    /// Create a new conversion result.
    pub fn new(content: String, metadata: Metadata) -> Self {
        Self {
            content,
            metadata,
            stats: None,
            mime_type: "application/akn+xml",
        }
    }

    /// Set structure statistics.
    pub fn with_stats(mut self, stats: ParseStats) -> Self {
        self.stats = Some(stats);
        self
    }

    /// Set MIME type.
    pub fn with_mime_type(mut self, mime_type: &'static str) -> Self {
        self.mime_type = mime_type;
        self
    }

    /// Get content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }
}

/// Convert one source document.
pub fn convert(source: SourceDocument, options: &ConvertOptions) -> Result<ConvertResult> {
    let parser = JudgmentParser::for_family(&options.family)?.with_options(options.parse.clone());
    let judgment = parser.parse(source)?;

    let result = match options.output_format {
        OutputFormat::Xml => {
            let rendered = to_akn_with_stats(&judgment, &options.render)?;
            let result = ConvertResult::new(rendered.content, rendered.metadata);
            if options.collect_stats || options.render.collect_stats {
                result.with_stats(rendered.stats)
            } else {
                result
            }
        }
        OutputFormat::Json => {
            let content = to_json(&judgment, JsonFormat::Pretty)?;
            ConvertResult::new(content, judgment.metadata).with_mime_type("application/json")
        }
    };

    log::info!(
        "Converted {} ({} bytes)",
        result.metadata.name.as_deref().unwrap_or("<unnamed>"),
        result.content_len()
    );
    Ok(result)
}

/// Convert many source documents in parallel.
///
/// Returns one result per document, in input order.
pub fn convert_batch(sources: Vec<SourceDocument>, options: &ConvertOptions) -> Vec<Result<ConvertResult>> {
    sources
        .into_par_iter()
        .map(|source| {
            let name = source.name.clone();
            convert(source, options).map_err(|e| {
                log::warn!("Failed to convert {}: {}", name.as_deref().unwrap_or("<unnamed>"), e);
                e
            })
        })
        .collect()
}

/// Convert a file, choosing the converter by extension.
pub fn convert_file(path: impl AsRef<Path>, options: &ConvertOptions) -> Result<ConvertResult> {
    ConverterRegistry::with_defaults().convert(path.as_ref(), options)
}

/// Convert many files in parallel, one result per file.
pub fn convert_files(paths: &[PathBuf], options: &ConvertOptions) -> Vec<Result<ConvertResult>> {
    let registry = ConverterRegistry::with_defaults();
    paths
        .par_iter()
        .map(|path| registry.convert(path, options))
        .collect()
}

/// Trait for input-format converters.
///
/// Implement this trait to accept a new serialized source format.
pub trait DocumentConverter: Send + Sync {
    /// Get the supported file extensions for this converter.
    ///
    /// Extensions should be lowercase without the leading dot (e.g., `["json"]`).
    fn supported_extensions(&self) -> &[&str];

    /// Get the name of this converter.
    fn name(&self) -> &str;

    /// Convert a file at the given path.
    fn convert(&self, path: &Path, options: &ConvertOptions) -> Result<ConvertResult>;

    /// Convert from bytes.
    fn convert_bytes(&self, bytes: &[u8], options: &ConvertOptions) -> Result<ConvertResult>;

    /// Check if this converter supports the given extension.
    fn supports_extension(&self, ext: &str) -> bool {
        let ext_lower = ext.to_lowercase();
        self.supported_extensions().iter().any(|e| *e == ext_lower)
    }
}

/// Registry mapping file extensions to converters.
pub struct ConverterRegistry {
    converters: HashMap<String, Arc<dyn DocumentConverter>>,
}

impl ConverterRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            converters: HashMap::new(),
        }
    }

    /// Create a registry with the default converters.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(SourceConverter::new()));
        registry
    }

    /// Register a converter for all its supported extensions.
    pub fn register(&mut self, converter: Arc<dyn DocumentConverter>) {
        for ext in converter.supported_extensions() {
            self.converters.insert(ext.to_lowercase(), converter.clone());
        }
    }

    /// Get a converter by file extension.
    pub fn get_by_extension(&self, ext: &str) -> Option<Arc<dyn DocumentConverter>> {
        self.converters.get(&ext.to_lowercase()).cloned()
    }

    /// Check if an extension is supported.
    pub fn supports(&self, ext: &str) -> bool {
        self.converters.contains_key(&ext.to_lowercase())
    }

    /// Convert a file using the appropriate converter.
    pub fn convert(&self, path: &Path, options: &ConvertOptions) -> Result<ConvertResult> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| Error::Other(format!("File has no extension: {}", path.display())))?;

        let converter = self
            .get_by_extension(ext)
            .ok_or_else(|| Error::Other(format!("No converter for extension: {}", ext)))?;

        converter.convert(path, options)
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Block;

    fn source(name: &str, lines: &[&str]) -> SourceDocument {
        SourceDocument::from_blocks(lines.iter().map(|l| Block::line(*l))).with_name(name)
    }

    #[test]
    fn test_convert_options_builder() {
        let options = ConvertOptions::new()
            .with_family("tribunal")
            .with_stats(true)
            .with_format(OutputFormat::Json);

        assert_eq!(options.family, "tribunal");
        assert!(options.collect_stats);
        assert_eq!(options.output_format, OutputFormat::Json);
    }

    #[test]
    fn test_convert_with_stats() {
        let options = ConvertOptions::new().with_stats(true);
        let result = convert(source("a", &["JUDGMENT", "1.\tOne.", "2.\tTwo."]), &options).unwrap();
        let stats = result.stats.unwrap();
        assert_eq!(stats.paragraph_count, 2);
        assert_eq!(result.mime_type, "application/akn+xml");
    }

    #[test]
    fn test_convert_json() {
        let options = ConvertOptions::new().with_format(OutputFormat::Json);
        let result = convert(source("a", &["JUDGMENT", "1.\tOne."]), &options).unwrap();
        assert_eq!(result.mime_type, "application/json");
        assert!(result.content.contains("\"metadata\""));
        assert!(result.stats.is_none());
    }

    #[test]
    fn test_unknown_family() {
        let options = ConvertOptions::new().with_family("nope");
        let result = convert(source("a", &["1.\tOne."]), &options);
        assert!(matches!(result, Err(Error::UnknownFamily(_))));
    }

    #[test]
    fn test_batch_isolates_failures() {
        let good = source("good", &["JUDGMENT", "1.\tOne."]);
        let mut bad = SourceDocument::from_blocks(vec![Block::line("JUDGMENT")]).with_name("bad");
        bad.body.push(crate::model::SourceBlock::new(Block::Mod(crate::model::Mod {
            contents: vec![Block::line("x")],
        })));
        let results = convert_batch(vec![good.clone(), bad, good], &ConvertOptions::default());
        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(Error::UnexpectedBlock { .. })));
        assert!(results[2].is_ok());
    }

    #[test]
    fn test_registry_with_defaults() {
        let registry = ConverterRegistry::with_defaults();
        assert!(registry.supports("json"));
        assert!(registry.supports("JSON"));
        assert!(!registry.supports("docx"));
        assert_eq!(registry.get_by_extension("json").unwrap().name(), "source");
    }

    #[test]
    fn test_convert_file_without_extension() {
        let result = convert_file("judgment", &ConvertOptions::default());
        assert!(matches!(result, Err(Error::Other(_))));
    }
}
