use std::collections::{HashSet, VecDeque};

use crate::types::{CorrespondenceGroup, Side};
use crate::verse_graph::VerseGraph;

/// Collects the connected component containing the verse at `position` on
/// `side`, walking links breadth-first in both directions.
///
/// Positions in the returned group are sorted. Returns an empty group when
/// the position is out of range.
pub fn correspondence_group(graph: &VerseGraph, side: Side, position: usize) -> CorrespondenceGroup {
    let mut visited: HashSet<(Side, usize)> = HashSet::new();
    collect_group(graph, side, position, &mut visited)
}

/// Partitions both collections into connected components.
///
/// Groups are ordered by their first member, scanning A then B; verses
/// without links form singleton groups.
pub fn correspondence_groups(graph: &VerseGraph) -> Vec<CorrespondenceGroup> {
    let mut visited: HashSet<(Side, usize)> = HashSet::new();
    let mut groups = Vec::new();

    for side in [Side::A, Side::B] {
        for position in 0..graph.collection(side).len() {
            if visited.contains(&(side, position)) {
                continue;
            }
            groups.push(collect_group(graph, side, position, &mut visited));
        }
    }

    groups
}

fn collect_group(
    graph: &VerseGraph,
    side: Side,
    position: usize,
    visited: &mut HashSet<(Side, usize)>,
) -> CorrespondenceGroup {
    let mut group = CorrespondenceGroup::default();
    if graph.verse(side, position).is_none() {
        return group;
    }

    let mut queue: VecDeque<(Side, usize)> = VecDeque::new();
    visited.insert((side, position));
    queue.push_back((side, position));

    while let Some((current_side, current)) = queue.pop_front() {
        match current_side {
            Side::A => group.a.push(current),
            Side::B => group.b.push(current),
        }

        let Some(verse) = graph.verse(current_side, current) else {
            continue;
        };
        let neighbor_side = current_side.opposite();
        for &linked in verse.corresponding() {
            if visited.insert((neighbor_side, linked)) {
                queue.push_back((neighbor_side, linked));
            }
        }
    }

    group.a.sort_unstable();
    group.b.sort_unstable();
    group
}
