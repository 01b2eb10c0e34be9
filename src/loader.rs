//! Loading both editions and producing a linked graph.
//!
//! Retrieval of the two raw collections runs concurrently; hydration,
//! indexing and linking then run synchronously in a fixed order. Every call
//! builds a fresh graph.

use std::future::Future;
use std::path::Path;
use std::time::Instant;

use tracing::{info, warn};

use crate::config::VerseLinkConfig;
use crate::errors::{Result, VerseLinkError};
use crate::sources::read_verses_json;
use crate::types::{RawVerse, Side};
use crate::verse_graph::VerseGraph;

/// Names of the two collections being linked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionNames {
    pub a: String,
    pub b: String,
}

impl CollectionNames {
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
        }
    }
}

impl From<&VerseLinkConfig> for CollectionNames {
    fn from(config: &VerseLinkConfig) -> Self {
        Self::new(config.a.name.clone(), config.b.name.clone())
    }
}

/// Awaits both record suppliers concurrently, then hydrates, indexes and
/// links the results.
///
/// If either supplier fails the whole load fails; no partial graph is
/// returned.
pub async fn load_verse_collections<FA, FB>(
    names: CollectionNames,
    fetch_a: FA,
    fetch_b: FB,
) -> Result<VerseGraph>
where
    FA: Future<Output = Result<Vec<RawVerse>>>,
    FB: Future<Output = Result<Vec<RawVerse>>>,
{
    let (a_raw, b_raw) = tokio::try_join!(fetch_a, fetch_b)?;
    Ok(link_collections(names, a_raw, b_raw))
}

/// Hydrates, indexes and links two decoded record sets.
///
/// Order: hydrate A, hydrate B, index A, index B, link A→B, link B→A.
pub fn link_collections(
    names: CollectionNames,
    a_raw: Vec<RawVerse>,
    b_raw: Vec<RawVerse>,
) -> VerseGraph {
    let start = Instant::now();
    let mut graph = VerseGraph::from_raw(names.a, a_raw, names.b, b_raw);
    graph.link();

    let duration_ms = start.elapsed().as_millis() as u64;
    let a = graph.collection(Side::A);
    let b = graph.collection(Side::B);
    info!(
        a = %a.name,
        a_verses = a.len(),
        b = %b.name,
        b_verses = b.len(),
        duration_ms,
        "verse graph ready"
    );
    graph
}

/// Reads the two record files named by `config` and links them.
///
/// Each file is read on its own task.
pub async fn load_verse_files(config: &VerseLinkConfig, project_root: &Path) -> Result<VerseGraph> {
    let a_path = config.collection_path(project_root, Side::A);
    let b_path = config.collection_path(project_root, Side::B);

    let a_task = tokio::spawn(async move { read_verses_json(&a_path).await });
    let b_task = tokio::spawn(async move { read_verses_json(&b_path).await });

    let graph = load_verse_collections(
        CollectionNames::from(config),
        join_task(a_task),
        join_task(b_task),
    )
    .await?;

    if config.warn_on_duplicate_ids {
        for side in [Side::A, Side::B] {
            let collection = &graph.collection(side).name;
            for duplicate in graph.index(side).duplicates() {
                warn!(
                    collection = %collection,
                    id = %duplicate.id,
                    replaced = duplicate.replaced,
                    kept = duplicate.kept,
                    "duplicate verse id; later record wins"
                );
            }
        }
    }

    Ok(graph)
}

async fn join_task(
    task: tokio::task::JoinHandle<Result<Vec<RawVerse>>>,
) -> Result<Vec<RawVerse>> {
    task.await.map_err(|e| VerseLinkError::Task {
        message: format!("record retrieval did not complete: {}", e),
    })?
}
