pub mod config;
pub mod context;
pub mod errors;
pub mod export;
pub mod graph;
pub mod hydration;
pub mod loader;
pub mod resolution;
pub mod sources;
pub mod types;
pub mod verse_graph;
