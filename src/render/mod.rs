//! Rendering module for converting judgments to output formats.
//!
//! The primary output is Akoma Ntoso XML: [`build_akn`] produces an element
//! tree, [`to_xml`] serializes it. JSON output of the judgment model is
//! available through [`to_json`].

mod builder;
mod json;
mod options;
mod result;
mod tables;
mod tree;
mod xml;

pub use builder::{build_akn, content_hash, slug, AKN_NAMESPACE, UK_NAMESPACE};
pub use json::{to_json, JsonFormat};
pub use options::RenderOptions;
pub use result::{ParseStats, RenderResult};
pub use tables::{repair_merges, RepairedCell, RepairedRow};
pub use tree::{Element, Node};
pub use xml::to_xml;

use crate::error::Result;
use crate::model::Judgment;

/// Render a judgment as Akoma Ntoso XML.
pub fn to_akn(judgment: &Judgment, options: &RenderOptions) -> Result<String> {
    let (root, _) = build_akn(judgment, options);
    Ok(to_xml(&root, options.pretty))
}

/// Render a judgment as Akoma Ntoso XML, with metadata and statistics.
pub fn to_akn_with_stats(judgment: &Judgment, options: &RenderOptions) -> Result<RenderResult> {
    let (root, stats) = build_akn(judgment, options);
    let content = to_xml(&root, options.pretty);
    log::debug!(
        "Rendered {} bytes: {} paragraph(s), {} table(s), {} footnote(s)",
        content.len(),
        stats.paragraph_count,
        stats.table_count,
        stats.footnote_count
    );
    Ok(RenderResult::new(content, judgment.metadata.clone(), stats))
}
