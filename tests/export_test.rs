use tempfile::TempDir;
use verselink::export::*;
use verselink::hydration::hydrate_segments;
use verselink::loader::{link_collections, CollectionNames};
use verselink::sources::{parse_json_array, read_verses_json};
use verselink::types::*;
use verselink::verse_graph::VerseGraph;

fn make_raw(id: &str, links: &[&str]) -> RawVerse {
    RawVerse {
        book: 1,
        line_range: LineRange::new(1, 3),
        paragraphs: vec![vec![format!("{id} text")]],
        id: id.to_string(),
        corresponding_ids: links.iter().map(|s| s.to_string()).collect(),
    }
}

fn segment(book: u32, start: u32, end: u32) -> VerseSegment {
    VerseSegment {
        book,
        line_range: LineRange::new(start, end),
        paragraphs: vec![vec![format!("lines {start}-{end}")]],
    }
}

#[test]
fn test_export_keeps_ids_and_rebuilds_links() {
    let graph = link_collections(
        CollectionNames::new("latin", "english"),
        vec![make_raw("a1", &["b1", "gone"]), make_raw("a2", &[])],
        vec![make_raw("b1", &[]), make_raw("b2", &["a2"])],
    );

    let a = to_raw_records(&graph, Side::A, &IdScheme::Keep);
    let b = to_raw_records(&graph, Side::B, &IdScheme::Keep);

    assert_eq!(a[0].id, "a1");
    assert_eq!(a[0].corresponding_ids, vec!["b1"]);
    assert_eq!(a[1].corresponding_ids, vec!["b2"]);
    assert_eq!(b[0].corresponding_ids, vec!["a1"]);
    assert_eq!(b[1].corresponding_ids, vec!["a2"]);
}

#[test]
fn test_export_sequential_ids() {
    let graph = link_collections(
        CollectionNames::new("latin", "english"),
        vec![make_raw("x", &["y"])],
        vec![make_raw("z", &[]), make_raw("y", &[])],
    );
    let scheme = IdScheme::Sequential {
        a_prefix: "L".to_string(),
        b_prefix: "E".to_string(),
    };

    let a = to_raw_records(&graph, Side::A, &scheme);
    let b = to_raw_records(&graph, Side::B, &scheme);

    assert_eq!(a[0].id, "L0");
    assert_eq!(a[0].corresponding_ids, vec!["E1"]);
    assert_eq!(b[0].id, "E0");
    assert!(b[0].corresponding_ids.is_empty());
    assert_eq!(b[1].corresponding_ids, vec!["L0"]);
}

#[tokio::test]
async fn test_build_pipeline_round_trips_through_loader() {
    let dir = TempDir::new().unwrap();
    let a = Collection::new(
        "latin",
        hydrate_segments(vec![segment(1, 1, 7), segment(1, 8, 15)], "L"),
    );
    let b = Collection::new("english", hydrate_segments(vec![segment(1, 1, 10)], "E"));
    let mut graph = VerseGraph::from_collections(a, b);
    graph.link_by_overlap();

    let scheme = IdScheme::Sequential {
        a_prefix: "L".to_string(),
        b_prefix: "E".to_string(),
    };
    let a_path = dir.path().join("out").join("latin_verses.json");
    let b_path = dir.path().join("out").join("english_verses.json");
    save_verses_json(&a_path, &to_raw_records(&graph, Side::A, &scheme)).unwrap();
    save_verses_json(&b_path, &to_raw_records(&graph, Side::B, &scheme)).unwrap();

    let a_raw = read_verses_json(&a_path).await.unwrap();
    let b_raw = read_verses_json(&b_path).await.unwrap();
    assert_eq!(b_raw[0].corresponding_ids, vec!["L0", "L1"]);

    let reloaded = link_collections(CollectionNames::new("latin", "english"), a_raw, b_raw);
    assert_eq!(reloaded.link_report().edges_added, 2);
    assert!(reloaded.link_report().unresolved.is_empty());
    let (_, e0) = reloaded.find(Side::B, "E0").unwrap();
    assert_eq!(e0.corresponding(), &[0, 1]);
}

#[test]
fn test_parse_error_reports_path_and_line() {
    let result: verselink::errors::Result<Vec<RawVerse>> =
        parse_json_array("[\n{\"book\": 1,\n oops}]", std::path::Path::new("broken.json"));
    match result {
        Err(verselink::errors::VerseLinkError::Parse { path, line, .. }) => {
            assert_eq!(path, "broken.json");
            assert_eq!(line, Some(3));
        }
        other => panic!("expected parse error, got {:?}", other.map(|v| v.len())),
    }
}

#[test]
fn test_output_path_keeps_only_file_name() {
    let out_dir = std::path::Path::new("/tmp/build-out");
    assert_eq!(
        output_path(out_dir, "latin_verses.json"),
        out_dir.join("latin_verses.json")
    );
    assert_eq!(
        output_path(out_dir, "/srv/data/english_verses.json"),
        out_dir.join("english_verses.json")
    );
    assert_eq!(
        output_path(out_dir, "nested/dir/english.json"),
        out_dir.join("english.json")
    );
}
