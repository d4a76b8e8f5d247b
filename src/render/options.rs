//! Rendering options and configuration.

/// Options for rendering judgments.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Indent block-level XML elements
    pub pretty: bool,

    /// Stamp a content hash into the proprietary metadata
    pub include_hash: bool,

    /// Parser version recorded in the proprietary metadata
    pub parser_version: String,

    /// Collect statistics during rendering
    pub collect_stats: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable indentation.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Enable or disable the content hash.
    pub fn with_hash(mut self, include: bool) -> Self {
        self.include_hash = include;
        self
    }

    /// Set the parser version stamp.
    pub fn with_parser_version(mut self, version: impl Into<String>) -> Self {
        self.parser_version = version.into();
        self
    }

    /// Enable statistics collection during rendering.
    pub fn with_stats(mut self, collect: bool) -> Self {
        self.collect_stats = collect;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            include_hash: true,
            parser_version: env!("CARGO_PKG_VERSION").to_string(),
            collect_stats: false,
        }
    }
}
