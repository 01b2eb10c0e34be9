/// Cross-reference resolution.
///
/// Turns the foreign ids declared on each verse into symmetric edges between
/// the two collections, either by id lookup or by line-range overlap.
mod index;
mod linker;
mod overlap;

pub use index::{index_by_id, IdIndex};
pub use linker::attach_corresponding;
pub use overlap::match_by_overlap;
