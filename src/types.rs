use serde::{Deserialize, Serialize};

use crate::errors::{Result, VerseLinkError};

/// Which of the two linked collections a verse belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

#[allow(clippy::should_implement_trait)]
impl Side {
    /// Returns the other collection's side.
    pub fn opposite(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }

    /// Returns the string representation of this side.
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::A => "a",
            Side::B => "b",
        }
    }

    /// Parses a string into a `Side`, returning `None` for unrecognized values.
    pub fn from_str(s: &str) -> Option<Side> {
        match s {
            "a" | "A" => Some(Side::A),
            "b" | "B" => Some(Side::B),
            _ => None,
        }
    }

    /// Parses a user-supplied side, rejecting anything other than `a` or `b`.
    pub fn parse(s: &str) -> Result<Side> {
        Side::from_str(s).ok_or_else(|| VerseLinkError::InvalidArgument {
            message: format!("unknown side '{s}' (expected 'a' or 'b')"),
        })
    }
}

/// Inclusive range of source line numbers covered by a verse.
///
/// Serialized as a two-element array `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(u32, u32)", into = "(u32, u32)")]
pub struct LineRange {
    pub start: u32,
    pub end: u32,
}

impl LineRange {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Returns `true` if the two inclusive ranges share at least one line.
    pub fn overlaps(&self, other: &LineRange) -> bool {
        !(self.end < other.start || other.end < self.start)
    }

    /// Number of lines covered; zero for an inverted range.
    pub fn len(&self) -> u32 {
        if self.end < self.start {
            0
        } else {
            self.end - self.start + 1
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<(u32, u32)> for LineRange {
    fn from((start, end): (u32, u32)) -> Self {
        Self { start, end }
    }
}

impl From<LineRange> for (u32, u32) {
    fn from(range: LineRange) -> Self {
        (range.start, range.end)
    }
}

/// A verse record as decoded from a collection file, before linking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawVerse {
    pub book: u32,
    #[serde(rename = "line_numbers")]
    pub line_range: LineRange,
    pub paragraphs: Vec<Vec<String>>,
    pub id: String,
    #[serde(rename = "correspondingIds", default)]
    pub corresponding_ids: Vec<String>,
}

/// A verse without an id or cross-references, as produced by a text
/// segmenter. Input to overlap matching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerseSegment {
    pub book: u32,
    #[serde(rename = "line_numbers")]
    pub line_range: LineRange,
    pub paragraphs: Vec<Vec<String>>,
}

/// A node of the cross-reference graph.
///
/// `corresponding` holds positions into the *opposite* collection. It is
/// appended to only while linking and is read-only through the public API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Verse {
    pub book: u32,
    pub line_range: LineRange,
    pub paragraphs: Vec<Vec<String>>,
    pub id: String,
    pub corresponding_ids: Vec<String>,
    pub(crate) corresponding: Vec<usize>,
}

impl Verse {
    /// Positions of the linked verses in the opposite collection, in link order.
    pub fn corresponding(&self) -> &[usize] {
        &self.corresponding
    }

    /// Returns `true` if this verse links to the given opposite-side position.
    pub fn corresponds_to(&self, position: usize) -> bool {
        self.corresponding.contains(&position)
    }

    /// Total number of text lines across all paragraphs.
    pub fn line_count(&self) -> usize {
        self.paragraphs.iter().map(Vec::len).sum()
    }
}

/// One language edition: a name plus the verses it owns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Collection {
    pub name: String,
    pub verses: Vec<Verse>,
}

impl Collection {
    pub fn new(name: impl Into<String>, verses: Vec<Verse>) -> Self {
        Self {
            name: name.into(),
            verses,
        }
    }

    pub fn len(&self) -> usize {
        self.verses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verses.is_empty()
    }
}

/// An id that was overwritten in an id index by a later record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateId {
    pub id: String,
    /// Position of the record that lost the index slot.
    pub replaced: usize,
    /// Position of the record now reachable through the id.
    pub kept: usize,
}

/// A declared cross-reference whose target id does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnresolvedId {
    pub source_position: usize,
    pub source_id: String,
    pub missing_id: String,
}

/// Outcome of a single linking pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkReport {
    /// Number of new symmetric edges created by the pass.
    pub edges_added: usize,
    pub unresolved: Vec<UnresolvedId>,
}

impl LinkReport {
    /// Folds another pass's report into this one.
    pub fn merge(&mut self, other: LinkReport) {
        self.edges_added += other.edges_added;
        self.unresolved.extend(other.unresolved);
    }
}

/// Statistics about a linked verse graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphStats {
    pub a_name: String,
    pub b_name: String,
    pub a_verses: usize,
    pub b_verses: usize,
    pub edge_count: usize,
    pub a_orphans: usize,
    pub b_orphans: usize,
    pub unresolved_count: usize,
    pub duplicate_id_count: usize,
}

/// A link that fails the book/line-range consistency check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrespondenceIssue {
    pub a_id: String,
    pub b_id: String,
    pub reason: IssueReason,
}

/// Why a link was flagged by verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IssueReason {
    BookMismatch,
    DisjointLines,
}

impl IssueReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueReason::BookMismatch => "book_mismatch",
            IssueReason::DisjointLines => "disjoint_lines",
        }
    }
}

/// A connected set of verses across both collections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrespondenceGroup {
    pub a: Vec<usize>,
    pub b: Vec<usize>,
}

impl CorrespondenceGroup {
    pub fn len(&self) -> usize {
        self.a.len() + self.b.len()
    }

    pub fn is_empty(&self) -> bool {
        self.a.is_empty() && self.b.is_empty()
    }
}

/// Output format for CLI results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Markdown,
    Json,
}
