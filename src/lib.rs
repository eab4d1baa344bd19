//! In-memory undirected multigraph with stable vertex and edge
//! identities.
//!
//! The container is single-threaded: it performs no internal
//! synchronization and relies on Rust's `&`/`&mut` discipline for
//! exclusive access. Handles returned by queries borrow the graph, so a
//! handle can neither outlive the graph nor be used across a mutation.

pub mod core;
pub mod graph;
pub mod infra;
pub mod storage;

pub use graph::Graph;

pub mod prelude {
    #[doc(hidden)]
    pub use crate::{
        core::id::{EdgeId, VertexId},
        graph::{EdgeRef, Graph, VertexRef},
    };
}
