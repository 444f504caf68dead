//! Directed related-video graph
//!
//! [`GraphBuilder`] turns a record set into a [`VideoGraph`]: nodes are video
//! ids, an edge `u -> v` means "video u lists video v as related". The graph
//! is simple (re-adding an edge is a no-op) and permits self-loops. Building
//! is the only mutable stage; the finished graph is an immutable view, which
//! is what lets the degree and PageRank passes run read-only and in parallel.

pub mod build;
pub mod export;

pub use build::{GraphBuilder, VideoGraph};
pub use export::{save_gexf, write_gexf};
