//! The user-facing graph encapsulation.
//!
//! [`Graph`] wraps the [storage](crate::storage) and adds attribute
//! handles ([`VertexRef`], [`EdgeRef`]) that carry a borrowed reference to
//! the graph they come from, so that adjacency and endpoint queries can be
//! answered directly on the handle.

mod generic;

pub use generic::{EdgeRef, Edges, EndpointsIter, Graph, IncidentEdges, VertexRef, Vertices};
