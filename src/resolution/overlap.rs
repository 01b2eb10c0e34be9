use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::types::Verse;

/// Links verses of `a` and `b` that belong to the same book and whose line
/// ranges overlap.
///
/// Edges are symmetric and deduplicated against links already present, so
/// this can be combined with id-based linking. Returns the number of new
/// edges.
pub fn match_by_overlap(a: &mut [Verse], b: &mut [Verse]) -> usize {
    let mut b_by_book: HashMap<u32, Vec<usize>> = HashMap::new();
    for (position, verse) in b.iter().enumerate() {
        b_by_book.entry(verse.book).or_default().push(position);
    }

    let mut a_links: HashSet<(usize, usize)> = HashSet::new();
    for (owner, verse) in a.iter().enumerate() {
        a_links.extend(verse.corresponding.iter().map(|&linked| (owner, linked)));
    }
    let mut b_links: HashSet<(usize, usize)> = HashSet::new();
    for (owner, verse) in b.iter().enumerate() {
        b_links.extend(verse.corresponding.iter().map(|&linked| (owner, linked)));
    }

    let mut added = 0;
    for (a_position, a_verse) in a.iter_mut().enumerate() {
        let Some(candidates) = b_by_book.get(&a_verse.book) else {
            continue;
        };
        for &b_position in candidates {
            let b_verse = &mut b[b_position];
            if !a_verse.line_range.overlaps(&b_verse.line_range) {
                continue;
            }
            if a_links.insert((a_position, b_position)) {
                a_verse.corresponding.push(b_position);
                added += 1;
            }
            if b_links.insert((b_position, a_position)) {
                b_verse.corresponding.push(a_position);
            }
        }
    }

    debug!(edges_added = added, "overlap matching complete");
    added
}
