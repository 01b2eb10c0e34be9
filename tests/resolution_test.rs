use verselink::hydration::hydrate;
use verselink::resolution::*;
use verselink::types::*;

fn make_raw(id: &str, links: &[&str]) -> RawVerse {
    make_raw_at(id, 1, 1, 1, links)
}

fn make_raw_at(id: &str, book: u32, start: u32, end: u32, links: &[&str]) -> RawVerse {
    RawVerse {
        book,
        line_range: LineRange::new(start, end),
        paragraphs: vec![vec![id.to_string()]],
        id: id.to_string(),
        corresponding_ids: links.iter().map(|s| s.to_string()).collect(),
    }
}

/// Runs both passes the way the loader does and returns both sides.
fn link_both(a_raw: Vec<RawVerse>, b_raw: Vec<RawVerse>) -> (Vec<Verse>, Vec<Verse>) {
    let mut a = hydrate(a_raw);
    let mut b = hydrate(b_raw);
    let a_index = index_by_id(&a);
    let b_index = index_by_id(&b);
    attach_corresponding(&mut a, &mut b, &b_index);
    attach_corresponding(&mut b, &mut a, &a_index);
    (a, b)
}

#[test]
fn test_index_by_id_lookup() {
    let verses = hydrate(vec![make_raw("a1", &[]), make_raw("a2", &[])]);
    let index = index_by_id(&verses);
    assert_eq!(index.len(), 2);
    assert_eq!(index.get("a1"), Some(0));
    assert_eq!(index.get("a2"), Some(1));
    assert_eq!(index.get("a3"), None);
    assert!(index.duplicates().is_empty());
}

#[test]
fn test_index_by_id_last_write_wins() {
    let verses = hydrate(vec![
        make_raw("a1", &[]),
        make_raw("a2", &[]),
        make_raw("a1", &[]),
    ]);
    let index = index_by_id(&verses);
    assert_eq!(index.len(), 2);
    assert_eq!(index.get("a1"), Some(2));
    assert_eq!(
        index.duplicates(),
        &[DuplicateId {
            id: "a1".to_string(),
            replaced: 0,
            kept: 2,
        }]
    );
}

#[test]
fn test_single_link_scenario() {
    let (a, b) = link_both(vec![make_raw("a1", &["b1"])], vec![make_raw("b1", &[])]);
    assert_eq!(a[0].corresponding(), &[0]);
    assert_eq!(b[0].corresponding(), &[0]);
}

#[test]
fn test_unknown_id_scenario() {
    let mut a = hydrate(vec![make_raw("a1", &["bX"])]);
    let mut b = hydrate(vec![make_raw("b1", &[])]);
    let b_index = index_by_id(&b);

    let report = attach_corresponding(&mut a, &mut b, &b_index);

    assert!(a[0].corresponding().is_empty());
    assert!(b[0].corresponding().is_empty());
    assert_eq!(report.edges_added, 0);
    assert_eq!(
        report.unresolved,
        vec![UnresolvedId {
            source_position: 0,
            source_id: "a1".to_string(),
            missing_id: "bX".to_string(),
        }]
    );
}

#[test]
fn test_repeated_id_scenario() {
    let (a, b) = link_both(vec![make_raw("a1", &["b1", "b1"])], vec![make_raw("b1", &[])]);
    assert_eq!(a[0].corresponding().len(), 1);
    assert_eq!(b[0].corresponding().len(), 1);
}

#[test]
fn test_link_declared_on_both_sides_is_single_edge() {
    let (a, b) = link_both(vec![make_raw("a1", &["b1"])], vec![make_raw("b1", &["a1"])]);
    assert_eq!(a[0].corresponding(), &[0]);
    assert_eq!(b[0].corresponding(), &[0]);
}

#[test]
fn test_link_declared_only_on_b_side() {
    let (a, b) = link_both(
        vec![make_raw("a1", &[]), make_raw("a2", &[])],
        vec![make_raw("b1", &["a2"])],
    );
    assert!(a[0].corresponding().is_empty());
    assert_eq!(a[1].corresponding(), &[0]);
    assert_eq!(b[0].corresponding(), &[1]);
}

#[test]
fn test_links_are_symmetric() {
    let (a, b) = link_both(
        vec![
            make_raw("a1", &["b1", "b2"]),
            make_raw("a2", &["b2", "missing"]),
            make_raw("a3", &[]),
        ],
        vec![
            make_raw("b1", &["a3"]),
            make_raw("b2", &["a1"]),
            make_raw("b3", &["a2", "a2"]),
        ],
    );

    for (x, verse) in a.iter().enumerate() {
        for &y in verse.corresponding() {
            assert!(b[y].corresponds_to(x), "a{x} -> b{y} not reciprocated");
        }
    }
    for (y, verse) in b.iter().enumerate() {
        for &x in verse.corresponding() {
            assert!(a[x].corresponds_to(y), "b{y} -> a{x} not reciprocated");
        }
    }
    for verse in a.iter().chain(b.iter()) {
        let mut seen = verse.corresponding().to_vec();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), verse.corresponding().len());
    }
}

#[test]
fn test_append_order_follows_driving_side() {
    // b1 declares a2 before a1, but A drives first: a1 is processed before a2.
    let (_a, b) = link_both(
        vec![make_raw("a1", &["b1"]), make_raw("a2", &["b1"])],
        vec![make_raw("b1", &["a2", "a1"])],
    );
    assert_eq!(b[0].corresponding(), &[0, 1]);
}

#[test]
fn test_forward_order_follows_declaration() {
    let (a, _b) = link_both(
        vec![make_raw("a1", &["b3", "b1", "b2"])],
        vec![make_raw("b1", &[]), make_raw("b2", &[]), make_raw("b3", &[])],
    );
    assert_eq!(a[0].corresponding(), &[2, 0, 1]);
}

#[test]
fn test_relinking_is_a_no_op() {
    let (mut a, mut b) = link_both(
        vec![make_raw("a1", &["b1", "b2"]), make_raw("a2", &["b2"])],
        vec![make_raw("b1", &["a2"]), make_raw("b2", &[])],
    );
    let before_a: Vec<Vec<usize>> = a.iter().map(|v| v.corresponding().to_vec()).collect();
    let before_b: Vec<Vec<usize>> = b.iter().map(|v| v.corresponding().to_vec()).collect();

    let a_index = index_by_id(&a);
    let b_index = index_by_id(&b);
    let forward = attach_corresponding(&mut a, &mut b, &b_index);
    let backward = attach_corresponding(&mut b, &mut a, &a_index);

    assert_eq!(forward.edges_added + backward.edges_added, 0);
    let after_a: Vec<Vec<usize>> = a.iter().map(|v| v.corresponding().to_vec()).collect();
    let after_b: Vec<Vec<usize>> = b.iter().map(|v| v.corresponding().to_vec()).collect();
    assert_eq!(before_a, after_a);
    assert_eq!(before_b, after_b);
}

#[test]
fn test_duplicate_target_id_links_later_record() {
    let (a, b) = link_both(
        vec![make_raw("a1", &["b1"])],
        vec![make_raw("b1", &[]), make_raw("b1", &[])],
    );
    assert_eq!(a[0].corresponding(), &[1]);
    assert!(b[0].corresponding().is_empty());
    assert_eq!(b[1].corresponding(), &[0]);
}

#[test]
fn test_same_id_on_both_sides_links_across() {
    let (a, b) = link_both(vec![make_raw("x", &["x"])], vec![make_raw("x", &[])]);
    assert_eq!(a[0].corresponding(), &[0]);
    assert_eq!(b[0].corresponding(), &[0]);
}

#[test]
fn test_match_by_overlap_same_book_only() {
    let mut a = hydrate(vec![
        make_raw_at("L0", 1, 1, 10, &[]),
        make_raw_at("L1", 1, 11, 20, &[]),
        make_raw_at("L2", 2, 1, 10, &[]),
    ]);
    let mut b = hydrate(vec![
        make_raw_at("E0", 1, 1, 12, &[]),
        make_raw_at("E1", 1, 13, 20, &[]),
        make_raw_at("E2", 3, 1, 10, &[]),
    ]);

    let added = match_by_overlap(&mut a, &mut b);

    assert_eq!(added, 3);
    assert_eq!(a[0].corresponding(), &[0]);
    assert_eq!(a[1].corresponding(), &[0, 1]);
    assert!(a[2].corresponding().is_empty());
    assert_eq!(b[0].corresponding(), &[0, 1]);
    assert_eq!(b[1].corresponding(), &[1]);
    assert!(b[2].corresponding().is_empty());

    assert_eq!(match_by_overlap(&mut a, &mut b), 0);
}

#[test]
fn test_match_by_overlap_respects_existing_links() {
    let mut a = hydrate(vec![make_raw_at("L0", 1, 1, 5, &["E0"])]);
    let mut b = hydrate(vec![make_raw_at("E0", 1, 4, 8, &[])]);
    let b_index = index_by_id(&b);
    attach_corresponding(&mut a, &mut b, &b_index);

    assert_eq!(match_by_overlap(&mut a, &mut b), 0);
    assert_eq!(a[0].corresponding(), &[0]);
    assert_eq!(b[0].corresponding(), &[0]);
}
