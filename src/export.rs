use std::path::{Path, PathBuf};

use tracing::info;

use crate::errors::Result;
use crate::sources::write_json_atomic;
use crate::types::{RawVerse, Side};
use crate::verse_graph::VerseGraph;

/// How ids are written when a linked collection is exported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdScheme {
    /// Keep each verse's existing id.
    Keep,
    /// Replace ids with `<prefix><position>`, using the A and B prefixes.
    Sequential { a_prefix: String, b_prefix: String },
}

impl IdScheme {
    fn id_for(&self, graph: &VerseGraph, side: Side, position: usize) -> String {
        match self {
            IdScheme::Keep => graph
                .verse(side, position)
                .map(|v| v.id.clone())
                .unwrap_or_default(),
            IdScheme::Sequential { a_prefix, b_prefix } => {
                let prefix = match side {
                    Side::A => a_prefix,
                    Side::B => b_prefix,
                };
                format!("{prefix}{position}")
            }
        }
    }
}

/// Serializes one side of a linked graph back into raw records.
///
/// `correspondingIds` is rebuilt from the resolved links, so ids that did
/// not resolve are dropped and ids declared only by the other side appear.
pub fn to_raw_records(graph: &VerseGraph, side: Side, scheme: &IdScheme) -> Vec<RawVerse> {
    let other = side.opposite();
    graph
        .collection(side)
        .verses
        .iter()
        .enumerate()
        .map(|(position, verse)| RawVerse {
            book: verse.book,
            line_range: verse.line_range,
            paragraphs: verse.paragraphs.clone(),
            id: scheme.id_for(graph, side, position),
            corresponding_ids: verse
                .corresponding()
                .iter()
                .map(|&linked| scheme.id_for(graph, other, linked))
                .collect(),
        })
        .collect()
}

/// Writes a record array to `path` as pretty JSON.
pub fn save_verses_json(path: &Path, records: &[RawVerse]) -> Result<()> {
    write_json_atomic(path, records)?;
    info!(path = %path.display(), records = records.len(), "wrote verse records");
    Ok(())
}

/// Places a collection's configured record file inside `out_dir`.
///
/// Only the file name of `configured` is kept, so absolute or nested
/// configured paths still land in `out_dir`.
pub fn output_path(out_dir: &Path, configured: &str) -> PathBuf {
    let configured = Path::new(configured);
    match configured.file_name() {
        Some(name) => out_dir.join(name),
        None => out_dir.join(configured),
    }
}
