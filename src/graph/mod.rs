/// Query and verification operations over a linked verse graph.
pub mod queries;

/// Traversal of the cross-reference graph.
pub mod traversal;

pub use queries::{asymmetric_edges, find_orphans, graph_stats, verify_correspondence};
pub use traversal::{correspondence_group, correspondence_groups};
