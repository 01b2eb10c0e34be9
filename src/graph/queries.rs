use tracing::warn;

use crate::types::*;
use crate::verse_graph::VerseGraph;

/// Computes aggregate statistics for a linked graph.
///
/// `edge_count` counts each symmetric edge once (from the A side).
pub fn graph_stats(graph: &VerseGraph) -> GraphStats {
    let a = graph.collection(Side::A);
    let b = graph.collection(Side::B);
    let edge_count = a.verses.iter().map(|v| v.corresponding().len()).sum();

    GraphStats {
        a_name: a.name.clone(),
        b_name: b.name.clone(),
        a_verses: a.len(),
        b_verses: b.len(),
        edge_count,
        a_orphans: find_orphans(graph, Side::A).len(),
        b_orphans: find_orphans(graph, Side::B).len(),
        unresolved_count: graph.link_report().unresolved.len(),
        duplicate_id_count: graph.index(Side::A).duplicates().len()
            + graph.index(Side::B).duplicates().len(),
    }
}

/// Returns the positions of verses on `side` that link to nothing.
pub fn find_orphans(graph: &VerseGraph, side: Side) -> Vec<usize> {
    graph
        .collection(side)
        .verses
        .iter()
        .enumerate()
        .filter(|(_, verse)| verse.corresponding().is_empty())
        .map(|(position, _)| position)
        .collect()
}

/// Finds links present on one side only.
///
/// Each entry is `(side, owner, linked)`: the verse at `owner` on `side`
/// lists `linked` but the opposite verse does not list it back. Empty after
/// a full link.
pub fn asymmetric_edges(graph: &VerseGraph) -> Vec<(Side, usize, usize)> {
    let mut result = Vec::new();
    for side in [Side::A, Side::B] {
        let other = graph.collection(side.opposite());
        for (owner, verse) in graph.collection(side).verses.iter().enumerate() {
            for &linked in verse.corresponding() {
                let reciprocated = other
                    .verses
                    .get(linked)
                    .is_some_and(|o| o.corresponds_to(owner));
                if !reciprocated {
                    result.push((side, owner, linked));
                }
            }
        }
    }
    result
}

/// Checks that every link joins verses of the same book whose line ranges
/// overlap.
///
/// Links are inspected from the A side; symmetric edges are reported once.
pub fn verify_correspondence(graph: &VerseGraph) -> Vec<CorrespondenceIssue> {
    let b = graph.collection(Side::B);
    let mut issues = Vec::new();

    for a_verse in &graph.collection(Side::A).verses {
        for &linked in a_verse.corresponding() {
            let Some(b_verse) = b.verses.get(linked) else {
                continue;
            };
            let reason = if a_verse.book != b_verse.book {
                IssueReason::BookMismatch
            } else if !a_verse.line_range.overlaps(&b_verse.line_range) {
                IssueReason::DisjointLines
            } else {
                continue;
            };

            warn!(
                a = %a_verse.id,
                b = %b_verse.id,
                reason = reason.as_str(),
                "inconsistent correspondence"
            );
            issues.push(CorrespondenceIssue {
                a_id: a_verse.id.clone(),
                b_id: b_verse.id.clone(),
                reason,
            });
        }
    }

    issues
}
