use serde::Serialize;

use crate::types::{LineRange, Side, Verse};
use crate::verse_graph::VerseGraph;

/// A verse together with the verses it is linked to, ready for display.
#[derive(Debug, Clone, Serialize)]
pub struct VerseView {
    pub collection: String,
    pub verse: VerseText,
    pub corresponding_collection: String,
    pub corresponding: Vec<VerseText>,
}

/// The displayable fields of a single verse.
#[derive(Debug, Clone, Serialize)]
pub struct VerseText {
    pub id: String,
    pub book: u32,
    pub line_numbers: LineRange,
    pub paragraphs: Vec<Vec<String>>,
}

impl From<&Verse> for VerseText {
    fn from(verse: &Verse) -> Self {
        Self {
            id: verse.id.clone(),
            book: verse.book,
            line_numbers: verse.line_range,
            paragraphs: verse.paragraphs.clone(),
        }
    }
}

/// Builds the view for the verse at `position` on `side`.
pub fn build_verse_view(graph: &VerseGraph, side: Side, position: usize) -> Option<VerseView> {
    let verse = graph.verse(side, position)?;
    Some(VerseView {
        collection: graph.collection(side).name.clone(),
        verse: VerseText::from(verse),
        corresponding_collection: graph.collection(side.opposite()).name.clone(),
        corresponding: graph
            .corresponding(side, position)
            .map(VerseText::from)
            .collect(),
    })
}

/// Formats a `VerseView` as Markdown: the verse text followed by each
/// linked verse of the other edition.
pub fn format_verse_as_markdown(view: &VerseView) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "## {} {}\n",
        view.collection,
        heading(&view.verse)
    ));
    push_paragraphs(&mut out, &view.verse.paragraphs);

    out.push_str(&format!("### {}\n", view.corresponding_collection));
    if view.corresponding.is_empty() {
        out.push_str("_No corresponding verses._\n");
        return out;
    }

    for other in &view.corresponding {
        out.push_str(&format!("#### {}\n", heading(other)));
        push_paragraphs(&mut out, &other.paragraphs);
    }

    out
}

/// Formats a `VerseView` as pretty-printed JSON.
pub fn format_verse_as_json(view: &VerseView) -> String {
    serde_json::to_string_pretty(view).unwrap_or_default()
}

fn heading(text: &VerseText) -> String {
    format!(
        "{} (book {}, lines {}-{})",
        text.id, text.book, text.line_numbers.start, text.line_numbers.end
    )
}

fn push_paragraphs(out: &mut String, paragraphs: &[Vec<String>]) {
    for paragraph in paragraphs.iter().filter(|p| !p.is_empty()) {
        for line in paragraph {
            out.push_str(line);
            out.push('\n');
        }
        out.push('\n');
    }
}
