//! JSON rendering of parsed judgments.

use crate::error::{Error, Result};
use crate::model::Judgment;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a judgment to JSON.
pub fn to_json(judgment: &Judgment, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(judgment),
        JsonFormat::Compact => serde_json::to_string(judgment),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}
