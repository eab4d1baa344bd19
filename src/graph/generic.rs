use std::{fmt, ops::Index};

use crate::{
    core::{
        error::{AddEdgeError, NotIncident, UnknownEdge, UnknownVertex},
        id::{EdgeId, VertexId},
    },
    storage::{adj_map, AdjMap},
};

/// An undirected multigraph with stable vertex and edge identities.
///
/// Vertices and edges carry caller-supplied attributes and are addressed
/// by opaque ids that are issued on insertion and never reused. Parallel
/// edges and self-loops are supported.
///
/// Handles ([`VertexRef`], [`EdgeRef`]) returned by the query methods
/// borrow the graph. The borrow checker therefore guarantees that a handle
/// can neither outlive the graph nor observe it mid-mutation: as long as
/// any handle is alive, the graph cannot be mutated or dropped.
///
/// # Examples
///
/// ```
/// use weft::Graph;
///
/// let mut graph = Graph::new();
///
/// let amsterdam = graph.add_vertex("Amsterdam");
/// let berlin = graph.add_vertex("Berlin");
/// let prague = graph.add_vertex("Prague");
///
/// graph.add_edge(amsterdam, berlin, 649);
/// let route = graph.add_edge(berlin, prague, 280);
///
/// let berlin = graph.vertex(berlin).unwrap();
/// assert!(berlin.is_adjacent_to(amsterdam));
/// assert!(!graph.vertex(amsterdam).unwrap().is_adjacent_to(prague));
///
/// let route = graph.edge(route).unwrap();
/// assert_eq!(*route.attr(), 280);
/// assert_eq!(route.opposite(prague).unwrap().id(), berlin.id());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph<V, E> {
    storage: AdjMap<V, E>,
}

impl<V, E> Graph<V, E> {
    pub fn new() -> Self {
        Self {
            storage: AdjMap::new(),
        }
    }

    pub fn with_capacity(vertex_count: usize, edge_count: usize) -> Self {
        Self {
            storage: AdjMap::with_capacity(vertex_count, edge_count),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.storage.vertex_count()
    }

    pub fn edge_count(&self) -> usize {
        self.storage.edge_count()
    }

    pub fn contains_vertex(&self, id: VertexId) -> bool {
        self.storage.contains_vertex(id)
    }

    pub fn contains_edge(&self, id: EdgeId) -> bool {
        self.storage.contains_edge(id)
    }

    /// Returns a handle to the vertex, or `None` if the id is not live in
    /// this graph.
    pub fn vertex(&self, id: VertexId) -> Option<VertexRef<'_, V, E>> {
        self.storage
            .vertex(id)
            .map(|attr| VertexRef {
                graph: self,
                id,
                attr,
            })
    }

    /// Returns a handle to the edge, or `None` if the id is not live in
    /// this graph.
    pub fn edge(&self, id: EdgeId) -> Option<EdgeRef<'_, V, E>> {
        let attr = self.storage.edge(id)?;
        let (from, to) = self.storage.endpoints(id)?;

        Some(EdgeRef {
            graph: self,
            id,
            attr,
            from,
            to,
        })
    }

    /// Returns the endpoints of the edge in their storage order. The order
    /// carries no meaning, the graph is undirected.
    pub fn endpoints(&self, id: EdgeId) -> Option<(VertexId, VertexId)> {
        self.storage.endpoints(id)
    }

    pub fn vertex_ids(&self) -> adj_map::VertexIds<'_, V> {
        self.storage.vertex_ids()
    }

    pub fn edge_ids(&self) -> adj_map::EdgeIds<'_, E> {
        self.storage.edge_ids()
    }

    /// Iterates over all vertices in unspecified order. The iterator is
    /// lazy and restartable (`Clone`).
    pub fn vertices(&self) -> Vertices<'_, V, E> {
        Vertices {
            graph: self,
            inner: self.storage.vertices(),
        }
    }

    /// Iterates over all edges in unspecified order. The iterator is lazy
    /// and restartable (`Clone`).
    pub fn edges(&self) -> Edges<'_, V, E> {
        Edges {
            graph: self,
            inner: self.storage.edges(),
        }
    }

    /// Iterates over the neighbors of `from`, yielding `(neighbor, edge)`
    /// id pairs. A self-loop is yielded once.
    ///
    /// # Panics
    ///
    /// Panics if `from` does not exist.
    pub fn neighbors(&self, from: VertexId) -> adj_map::NeighborsIter<'_, E> {
        self.storage.neighbors(from)
    }

    /// Number of edge endpoints attached to the vertex. A self-loop
    /// contributes 2.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not exist.
    pub fn degree(&self, id: VertexId) -> usize {
        self.storage.degree(id)
    }

    /// Iterates over all edges between `from` and `to`, in either
    /// orientation.
    pub fn edge_id(&self, from: VertexId, to: VertexId) -> adj_map::EdgeIdIter<'_, E> {
        self.storage.edge_id(from, to)
    }

    pub fn edge_id_any(&self, from: VertexId, to: VertexId) -> Option<EdgeId> {
        self.storage.edge_id_any(from, to)
    }

    pub fn contains_edge_between(&self, from: VertexId, to: VertexId) -> bool {
        self.storage.contains_edge_between(from, to)
    }

    pub fn add_vertex(&mut self, attr: V) -> VertexId {
        self.storage.add_vertex(attr)
    }

    pub fn try_add_edge(
        &mut self,
        from: VertexId,
        to: VertexId,
        attr: E,
    ) -> Result<EdgeId, AddEdgeError<E>> {
        self.storage.try_add_edge(from, to, attr)
    }

    /// Convenience variant of [`try_add_edge`](Graph::try_add_edge).
    ///
    /// # Panics
    ///
    /// Panics if `from` or `to` does not exist.
    pub fn add_edge(&mut self, from: VertexId, to: VertexId, attr: E) -> EdgeId {
        self.storage.add_edge(from, to, attr)
    }

    /// Removes the vertex and every edge incident on it, returning the
    /// vertex attribute.
    pub fn remove_vertex(&mut self, id: VertexId) -> Result<V, UnknownVertex> {
        self.storage.remove_vertex(id).ok_or(UnknownVertex(id))
    }

    /// Removes the edge from the edge set and from the incidence lists of
    /// both its endpoints, returning the edge attribute.
    pub fn remove_edge(&mut self, id: EdgeId) -> Result<E, UnknownEdge> {
        self.storage.remove_edge(id).ok_or(UnknownEdge(id))
    }

    /// Removes some edge between `from` and `to`, if there is one.
    pub fn remove_edge_between(&mut self, from: VertexId, to: VertexId) -> Option<E> {
        self.storage.remove_edge_between(from, to)
    }

    /// Removes all vertices and edges. Ids are not reused afterwards.
    pub fn clear(&mut self) {
        self.storage.clear()
    }

    /// Removes all edges, keeping the vertices.
    pub fn clear_edges(&mut self) {
        self.storage.clear_edges()
    }
}

impl<V, E> Default for Graph<V, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, E> Index<VertexId> for Graph<V, E> {
    type Output = V;

    fn index(&self, id: VertexId) -> &V {
        self.storage.vertex(id).expect("vertex does not exist")
    }
}

impl<V, E> Index<EdgeId> for Graph<V, E> {
    type Output = E;

    fn index(&self, id: EdgeId) -> &E {
        self.storage.edge(id).expect("edge does not exist")
    }
}

/// A non-owning, read-only view of a vertex, bound to the graph it comes
/// from by a borrow.
pub struct VertexRef<'a, V, E> {
    graph: &'a Graph<V, E>,
    id: VertexId,
    attr: &'a V,
}

impl<'a, V, E> VertexRef<'a, V, E> {
    pub fn id(&self) -> VertexId {
        self.id
    }

    pub fn attr(&self) -> &'a V {
        self.attr
    }

    /// Number of edge endpoints attached to this vertex. A self-loop
    /// contributes 2.
    pub fn degree(&self) -> usize {
        self.graph.storage.degree(self.id)
    }

    /// Returns `true` iff some live edge connects this vertex and `other`,
    /// in either orientation.
    pub fn is_adjacent_to(&self, other: VertexId) -> bool {
        self.graph.storage.contains_edge_between(self.id, other)
    }

    /// Iterates over the live edges incident on this vertex, in
    /// incidence-list (insertion) order. A self-loop is yielded once. The
    /// iterator is lazy and restartable (`Clone`).
    pub fn incident_edges(&self) -> IncidentEdges<'a, V, E> {
        IncidentEdges {
            graph: self.graph,
            inner: self.graph.storage.neighbors(self.id),
        }
    }
}

impl<V, E> Clone for VertexRef<'_, V, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V, E> Copy for VertexRef<'_, V, E> {}

impl<V: fmt::Debug, E> fmt::Debug for VertexRef<'_, V, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VertexRef")
            .field("id", &self.id)
            .field("attr", &self.attr)
            .finish()
    }
}

/// A non-owning, read-only view of an edge, bound to the graph it comes
/// from by a borrow.
pub struct EdgeRef<'a, V, E> {
    graph: &'a Graph<V, E>,
    id: EdgeId,
    attr: &'a E,
    from: VertexId,
    to: VertexId,
}

impl<'a, V, E> EdgeRef<'a, V, E> {
    pub fn id(&self) -> EdgeId {
        self.id
    }

    pub fn attr(&self) -> &'a E {
        self.attr
    }

    /// The endpoint stored in the first slot. The slot assignment carries
    /// no meaning, the graph is undirected.
    pub fn from(&self) -> VertexId {
        self.from
    }

    /// The endpoint stored in the second slot.
    pub fn to(&self) -> VertexId {
        self.to
    }

    /// Iterates over the distinct endpoints of this edge: two vertices, or
    /// one for a self-loop.
    pub fn endpoints(&self) -> EndpointsIter<'a, V, E> {
        let len = if self.from == self.to { 1 } else { 2 };

        EndpointsIter {
            graph: self.graph,
            ids: [self.from, self.to],
            pos: 0,
            len,
        }
    }

    pub fn is_incident_on(&self, v: VertexId) -> bool {
        self.from == v || self.to == v
    }

    /// Given one endpoint, returns the other. For a self-loop the opposite
    /// of the endpoint is the endpoint itself.
    pub fn opposite(&self, v: VertexId) -> Result<VertexRef<'a, V, E>, NotIncident> {
        let other = if v == self.from {
            self.to
        } else if v == self.to {
            self.from
        } else {
            return Err(NotIncident {
                edge: self.id,
                vertex: v,
            });
        };

        Ok(self.graph.vertex(other).expect("vertex does not exist"))
    }
}

impl<V, E> Clone for EdgeRef<'_, V, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V, E> Copy for EdgeRef<'_, V, E> {}

impl<V, E: fmt::Debug> fmt::Debug for EdgeRef<'_, V, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EdgeRef")
            .field("id", &self.id)
            .field("attr", &self.attr)
            .field("from", &self.from)
            .field("to", &self.to)
            .finish()
    }
}

pub struct Vertices<'a, V, E> {
    graph: &'a Graph<V, E>,
    inner: adj_map::VerticesIter<'a, V>,
}

impl<'a, V, E> Iterator for Vertices<'a, V, E> {
    type Item = VertexRef<'a, V, E>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(id, attr)| VertexRef {
            graph: self.graph,
            id,
            attr,
        })
    }
}

impl<V, E> Clone for Vertices<'_, V, E> {
    fn clone(&self) -> Self {
        Self {
            graph: self.graph,
            inner: self.inner.clone(),
        }
    }
}

pub struct Edges<'a, V, E> {
    graph: &'a Graph<V, E>,
    inner: adj_map::EdgesIter<'a, E>,
}

impl<'a, V, E> Iterator for Edges<'a, V, E> {
    type Item = EdgeRef<'a, V, E>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(id, attr, from, to)| EdgeRef {
            graph: self.graph,
            id,
            attr,
            from,
            to,
        })
    }
}

impl<V, E> Clone for Edges<'_, V, E> {
    fn clone(&self) -> Self {
        Self {
            graph: self.graph,
            inner: self.inner.clone(),
        }
    }
}

pub struct IncidentEdges<'a, V, E> {
    graph: &'a Graph<V, E>,
    inner: adj_map::NeighborsIter<'a, E>,
}

impl<'a, V, E> Iterator for IncidentEdges<'a, V, E> {
    type Item = EdgeRef<'a, V, E>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(_, edge)| self.graph.edge(edge).expect("edge does not exist"))
    }
}

impl<V, E> Clone for IncidentEdges<'_, V, E> {
    fn clone(&self) -> Self {
        Self {
            graph: self.graph,
            inner: self.inner.clone(),
        }
    }
}

pub struct EndpointsIter<'a, V, E> {
    graph: &'a Graph<V, E>,
    ids: [VertexId; 2],
    pos: usize,
    len: usize,
}

impl<'a, V, E> Iterator for EndpointsIter<'a, V, E> {
    type Item = VertexRef<'a, V, E>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos == self.len {
            return None;
        }

        let id = self.ids[self.pos];
        self.pos += 1;

        Some(self.graph.vertex(id).expect("vertex does not exist"))
    }
}

impl<V, E> Clone for EndpointsIter<'_, V, E> {
    fn clone(&self) -> Self {
        Self {
            graph: self.graph,
            ids: self.ids,
            pos: self.pos,
            len: self.len,
        }
    }
}
