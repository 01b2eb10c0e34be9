use std::collections::HashSet;

use tracing::debug;

use super::index::IdIndex;
use crate::types::{LinkReport, UnresolvedId, Verse};

/// Links every verse in `source` to the `target` verses named by its
/// `corresponding_ids`, appending the reverse edge on the target as well.
///
/// Ids missing from `target_index` are skipped and reported. An edge is
/// never appended twice to the same list, so running a pass again over an
/// already linked pair adds nothing.
///
/// Append order on `source` follows each verse's declared id order. Append
/// order on `target` follows the traversal order of `source`.
///
/// One call only discovers edges declared from the `source` side; full
/// linking calls this once per direction.
pub fn attach_corresponding(
    source: &mut [Verse],
    target: &mut [Verse],
    target_index: &IdIndex,
) -> LinkReport {
    // (owner, linked) pairs already present in each side's lists.
    let mut forward: HashSet<(usize, usize)> = existing_links(source);
    let mut backward: HashSet<(usize, usize)> = existing_links(target);

    let mut report = LinkReport::default();

    for (position, verse) in source.iter_mut().enumerate() {
        for cid in &verse.corresponding_ids {
            let Some(other_position) = target_index.get(cid) else {
                debug!(source = %verse.id, missing = %cid, "unresolved cross-reference");
                report.unresolved.push(UnresolvedId {
                    source_position: position,
                    source_id: verse.id.clone(),
                    missing_id: cid.clone(),
                });
                continue;
            };
            let Some(other) = target.get_mut(other_position) else {
                continue;
            };

            if forward.insert((position, other_position)) {
                verse.corresponding.push(other_position);
                report.edges_added += 1;
            }
            if backward.insert((other_position, position)) {
                other.corresponding.push(position);
            }
        }
    }

    debug!(
        edges_added = report.edges_added,
        unresolved = report.unresolved.len(),
        "linking pass complete"
    );
    report
}

fn existing_links(verses: &[Verse]) -> HashSet<(usize, usize)> {
    verses
        .iter()
        .enumerate()
        .flat_map(|(owner, verse)| verse.corresponding.iter().map(move |&linked| (owner, linked)))
        .collect()
}
