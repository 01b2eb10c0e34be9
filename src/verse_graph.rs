use tracing::info;

use crate::hydration::hydrate;
use crate::resolution::{attach_corresponding, index_by_id, match_by_overlap, IdIndex};
use crate::types::*;

/// Two linked collections and their id indices.
///
/// Each collection owns its verses; a verse's `corresponding` entries are
/// positions into the other collection.
pub struct VerseGraph {
    a: Collection,
    b: Collection,
    a_index: IdIndex,
    b_index: IdIndex,
    report: LinkReport,
}

// ---------------------------------------------------------------------------
// Construction and linking
// ---------------------------------------------------------------------------

impl VerseGraph {
    /// Hydrates and indexes both record sets without linking them.
    pub fn from_raw(
        a_name: impl Into<String>,
        a_raw: Vec<RawVerse>,
        b_name: impl Into<String>,
        b_raw: Vec<RawVerse>,
    ) -> Self {
        let a = Collection::new(a_name, hydrate(a_raw));
        let b = Collection::new(b_name, hydrate(b_raw));
        Self::from_collections(a, b)
    }

    /// Indexes two already hydrated collections without linking them.
    pub fn from_collections(a: Collection, b: Collection) -> Self {
        let a_index = index_by_id(&a.verses);
        let b_index = index_by_id(&b.verses);
        Self {
            a,
            b,
            a_index,
            b_index,
            report: LinkReport::default(),
        }
    }

    /// Runs both id-linking passes: A→B, then B→A.
    ///
    /// Safe to call repeatedly; a second run adds no edges.
    pub fn link(&mut self) -> &LinkReport {
        let forward = attach_corresponding(&mut self.a.verses, &mut self.b.verses, &self.b_index);
        let backward = attach_corresponding(&mut self.b.verses, &mut self.a.verses, &self.a_index);

        let mut report = forward;
        report.merge(backward);
        info!(
            a = %self.a.name,
            b = %self.b.name,
            edges_added = report.edges_added,
            unresolved = report.unresolved.len(),
            "linked collections"
        );
        self.report = report;
        &self.report
    }

    /// Re-runs the two linking passes on an already linked graph.
    pub fn relink(&mut self) -> &LinkReport {
        self.link()
    }

    /// Adds links between same-book verses with overlapping line ranges.
    pub fn link_by_overlap(&mut self) -> usize {
        let added = match_by_overlap(&mut self.a.verses, &mut self.b.verses);
        info!(
            a = %self.a.name,
            b = %self.b.name,
            edges_added = added,
            "linked collections by line overlap"
        );
        added
    }
}

// ---------------------------------------------------------------------------
// Accessors
// ---------------------------------------------------------------------------

impl VerseGraph {
    /// Returns the collection on the given side.
    pub fn collection(&self, side: Side) -> &Collection {
        match side {
            Side::A => &self.a,
            Side::B => &self.b,
        }
    }

    /// Returns the id index of the given side.
    pub fn index(&self, side: Side) -> &IdIndex {
        match side {
            Side::A => &self.a_index,
            Side::B => &self.b_index,
        }
    }

    /// Returns the verse at `position` on `side`.
    pub fn verse(&self, side: Side, position: usize) -> Option<&Verse> {
        self.collection(side).verses.get(position)
    }

    /// Looks a verse up by id on `side`, returning its position and the verse.
    pub fn find(&self, side: Side, id: &str) -> Option<(usize, &Verse)> {
        let position = self.index(side).get(id)?;
        self.verse(side, position).map(|verse| (position, verse))
    }

    /// Looks a verse up by id on either side, trying A first.
    pub fn find_any(&self, id: &str) -> Option<(Side, usize, &Verse)> {
        [Side::A, Side::B]
            .into_iter()
            .find_map(|side| self.find(side, id).map(|(position, verse)| (side, position, verse)))
    }

    /// Iterates the verses linked to the verse at `position` on `side`.
    pub fn corresponding(&self, side: Side, position: usize) -> impl Iterator<Item = &Verse> + '_ {
        let other = self.collection(side.opposite());
        self.verse(side, position)
            .map(|verse| verse.corresponding())
            .unwrap_or_default()
            .iter()
            .filter_map(move |&linked| other.verses.get(linked))
    }

    /// Report of the most recent id-linking run.
    pub fn link_report(&self) -> &LinkReport {
        &self.report
    }

    /// Consumes the graph, returning both collections.
    pub fn into_parts(self) -> (Collection, Collection) {
        (self.a, self.b)
    }
}
