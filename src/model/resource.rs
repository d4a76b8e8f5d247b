//! Resources carried alongside the document (images, attachments).

use serde::{Deserialize, Serialize};

/// An image referenced from the document's inline content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    /// Name used by `Inline::Image::src`
    pub name: String,

    /// MIME type (e.g., "image/png")
    pub content_type: String,

    /// Raw binary data
    #[serde(default, skip_serializing)]
    pub data: Vec<u8>,
}

impl Image {
    /// Create a new image.
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            data,
        }
    }

    /// Create a PNG image.
    pub fn png(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self::new(name, "image/png", data)
    }

    /// Create a JPEG image.
    pub fn jpeg(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self::new(name, "image/jpeg", data)
    }

    /// Get the data size in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// A document attached to the judgment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Display name
    pub name: String,

    /// Link to the attached document
    pub href: String,

    /// Whether the attachment lives outside the source document
    #[serde(default)]
    pub external: bool,
}

impl Attachment {
    /// Create an attachment stored outside the source document.
    pub fn external(name: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            href: href.into(),
            external: true,
        }
    }

    /// Create an attachment embedded in the source document.
    pub fn internal(name: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            href: href.into(),
            external: false,
        }
    }
}
