//! Conversion of decoded records into graph nodes.

use crate::types::{LineRange, RawVerse, Verse, VerseSegment};

/// Converts raw records into verses with empty correspondence lists.
///
/// The output has the same length and order as the input.
pub fn hydrate(raw: Vec<RawVerse>) -> Vec<Verse> {
    raw.into_iter().map(hydrate_one).collect()
}

/// Converts a single raw record into a verse.
pub fn hydrate_one(raw: RawVerse) -> Verse {
    Verse {
        book: raw.book,
        line_range: raw.line_range,
        paragraphs: raw.paragraphs,
        id: raw.id,
        corresponding_ids: raw.corresponding_ids,
        corresponding: Vec::new(),
    }
}

/// Converts id-less segments into verses, assigning ids `<prefix><position>`.
///
/// The resulting verses declare no cross-references; links are expected to
/// come from overlap matching.
pub fn hydrate_segments(segments: Vec<VerseSegment>, id_prefix: &str) -> Vec<Verse> {
    segments
        .into_iter()
        .enumerate()
        .map(|(position, segment)| Verse {
            book: segment.book,
            line_range: segment.line_range,
            paragraphs: segment.paragraphs,
            id: format!("{id_prefix}{position}"),
            corresponding_ids: Vec::new(),
            corresponding: Vec::new(),
        })
        .collect()
}

/// One element of a flattened edition text: a card milestone starting a new
/// verse at a line number, a paragraph break, or a line of verse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentToken {
    Card(u32),
    Para,
    Line(String),
}

/// Splits a token stream of one book into verse segments.
///
/// Each `Card(n)` closes the open segment at line `n - 1` and opens a new one
/// at `n`. Lines before the first card start a segment at line 1. The last
/// segment ends at the line before the running line counter. `Para` starts a
/// new paragraph unless the current one is still empty; empty paragraphs are
/// dropped, and a segment without text keeps a single empty paragraph.
pub fn segment_tokens(tokens: &[SegmentToken], book: u32) -> Vec<VerseSegment> {
    let mut segments = Vec::new();
    let mut start: Option<u32> = None;
    let mut next_line: u32 = 0;
    let mut paragraphs: Vec<Vec<String>> = Vec::new();

    for token in tokens {
        match token {
            SegmentToken::Card(n) => {
                if let Some(open) = start.take() {
                    let end = n.saturating_sub(1);
                    segments.push(close_segment(book, open, end, &mut paragraphs));
                }
                start = Some(*n);
                next_line = *n;
                paragraphs = vec![Vec::new()];
            }
            SegmentToken::Para => {
                if paragraphs.last().map_or(true, |last| !last.is_empty()) {
                    paragraphs.push(Vec::new());
                }
            }
            SegmentToken::Line(text) => {
                if start.is_none() {
                    start = Some(1);
                    next_line = 1;
                    paragraphs = vec![Vec::new()];
                }
                if paragraphs.is_empty() {
                    paragraphs.push(Vec::new());
                }
                if let Some(last) = paragraphs.last_mut() {
                    last.push(text.clone());
                }
                next_line += 1;
            }
        }
    }

    if let Some(open) = start {
        let end = next_line.saturating_sub(1);
        segments.push(close_segment(book, open, end, &mut paragraphs));
    }

    segments
}

fn close_segment(
    book: u32,
    start: u32,
    end: u32,
    paragraphs: &mut Vec<Vec<String>>,
) -> VerseSegment {
    let mut kept: Vec<Vec<String>> = std::mem::take(paragraphs)
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect();
    if kept.is_empty() {
        kept.push(Vec::new());
    }
    VerseSegment {
        book,
        line_range: LineRange::new(start, end),
        paragraphs: kept,
    }
}
