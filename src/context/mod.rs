/// Formats a verse and its counterparts as Markdown or JSON.
pub mod formatter;

pub use formatter::{build_verse_view, format_verse_as_json, format_verse_as_markdown, VerseView};
