//! Cover-page and header detection.

use super::family::DocumentFamily;
use crate::model::Block;

/// A way of finding where the header ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderStrategy {
    /// The header ends with a line reading exactly one of these phrases
    /// (case-insensitive, trailing colon ignored). The last such line
    /// before the first numbered line wins.
    Phrase(&'static [&'static str]),

    /// The header ends at the first page break preceding any numbered line.
    PageBreak,

    /// The header ends after the last line styled "Title" preceding any
    /// numbered line.
    TitleStyle,
}

impl HeaderStrategy {
    /// Find the index of the first body block, scanning `blocks[start..stop]`.
    ///
    /// The header never extends past the first numbered line.
    fn find_end(&self, blocks: &[Block], breaks: &[bool], start: usize, stop: usize) -> Option<usize> {
        let stop = first_numbered(blocks, start, stop);
        match self {
            HeaderStrategy::Phrase(phrases) => (start..stop)
                .rev()
                .find(|&i| {
                    blocks[i]
                        .as_line()
                        .map(|line| {
                            let text = line.normalized_text().to_lowercase();
                            let text = text.trim_end_matches(':').trim_end();
                            phrases.iter().any(|p| *p == text)
                        })
                        .unwrap_or(false)
                })
                .map(|i| i + 1),
            HeaderStrategy::PageBreak => (start + 1..stop).find(|&i| breaks.get(i).copied().unwrap_or(false)),
            HeaderStrategy::TitleStyle => (start..stop)
                .rev()
                .find(|&i| match &blocks[i] {
                    Block::Line(line) => line
                        .style
                        .as_deref()
                        .map(|s| s.eq_ignore_ascii_case("title"))
                        .unwrap_or(false),
                    _ => false,
                })
                .map(|i| i + 1),
        }
    }
}

/// Where the cover page and header end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeaderSplit {
    /// Index of the first block after the cover page
    pub cover_end: usize,
    /// Index of the first body block
    pub header_end: usize,
}

/// Index of the first numbered line in `blocks[start..stop]`, or `stop`.
fn first_numbered(blocks: &[Block], start: usize, stop: usize) -> usize {
    (start..stop)
        .find(|&i| matches!(blocks[i], Block::NumberedLine(_)))
        .unwrap_or(stop)
}

/// Split the leading blocks into cover page, header and body.
///
/// `breaks[i]` tells whether a page break precedes `blocks[i]`. At most
/// `limit` blocks are scanned.
pub fn split_header(
    blocks: &[Block],
    breaks: &[bool],
    family: &dyn DocumentFamily,
    limit: usize,
) -> HeaderSplit {
    let stop = blocks.len().min(limit);

    let cover_end = if family.has_cover_page() {
        HeaderStrategy::PageBreak
            .find_end(blocks, breaks, 0, stop)
            .unwrap_or(0)
    } else {
        0
    };

    for strategy in family.header_strategies() {
        if let Some(end) = strategy.find_end(blocks, breaks, cover_end, stop) {
            log::debug!("Header ends at block {} ({:?})", end, strategy);
            return HeaderSplit {
                cover_end,
                header_end: end,
            };
        }
    }

    log::warn!("No header strategy matched for family {}", family.name());
    HeaderSplit {
        cover_end,
        header_end: cover_end,
    }
}
