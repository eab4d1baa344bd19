use thiserror::Error;

use super::id::{EdgeId, VertexId};

/// An operation referenced a vertex id that is not present in the graph.
///
/// This covers ids whose vertex has been removed as well as ids issued by
/// a different graph instance.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
#[error("vertex {0:?} does not exist")]
pub struct UnknownVertex(pub VertexId);

/// An operation referenced an edge id that is not present in the graph.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
#[error("edge {0:?} does not exist")]
pub struct UnknownEdge(pub EdgeId);

/// An endpoint-relative query was asked about a vertex that is not an
/// endpoint of the edge.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
#[error("vertex {vertex:?} is not an endpoint of edge {edge:?}")]
pub struct NotIncident {
    pub edge: EdgeId,
    pub vertex: VertexId,
}

/// Error returned when adding an edge fails.
///
/// The attribute that could not be stored is handed back to the caller in
/// [`attr`](AddEdgeError::attr).
#[derive(Debug, Error, PartialEq, Eq)]
#[error("adding edge failed: {kind}")]
pub struct AddEdgeError<E> {
    pub attr: E,
    pub kind: UnknownVertex,
}

impl<E> AddEdgeError<E> {
    pub fn new(attr: E, kind: UnknownVertex) -> Self {
        Self { attr, kind }
    }
}
