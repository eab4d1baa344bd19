use std::collections::hash_map;

use rustc_hash::FxHashMap;

use crate::core::{
    error::{AddEdgeError, UnknownVertex},
    id::{EdgeId, VertexId},
};

#[derive(Debug, Clone, PartialEq, Eq)]
struct AdjVertex<V> {
    attr: V,
    edges: Vec<EdgeId>,
}

impl<V> AdjVertex<V> {
    fn new(attr: V) -> Self {
        Self {
            attr,
            edges: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AdjEdge<E> {
    attr: E,
    endpoints: [VertexId; 2],
}

/// Undirected multigraph storage with stable ids.
///
/// Vertices and edges are held in hash maps keyed by their id, and every
/// vertex additionally holds the list of its incident edge ids in
/// insertion order. Ids are allocated from counters that start at 1 and
/// never decrease, so an id is never reused, not even after the element is
/// removed or the graph is [cleared](AdjMap::clear).
///
/// Parallel edges between the same pair of vertices are permitted, as are
/// self-loops. A self-loop occupies a single entry in the edge map but two
/// entries in its vertex's incidence list, one for each endpoint slot, so
/// it contributes 2 to the [degree](AdjMap::degree) while iterators report
/// it once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjMap<V, E> {
    vertices: FxHashMap<VertexId, AdjVertex<V>>,
    edges: FxHashMap<EdgeId, AdjEdge<E>>,
    next_vertex: u64,
    next_edge: u64,
}

impl<V, E> AdjMap<V, E> {
    pub fn new() -> Self {
        Self {
            vertices: FxHashMap::default(),
            edges: FxHashMap::default(),
            next_vertex: 1,
            next_edge: 1,
        }
    }

    pub fn with_capacity(vertex_count: usize, edge_count: usize) -> Self {
        Self {
            vertices: FxHashMap::with_capacity_and_hasher(vertex_count, Default::default()),
            edges: FxHashMap::with_capacity_and_hasher(edge_count, Default::default()),
            next_vertex: 1,
            next_edge: 1,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Exclusive upper bound on the vertex ids issued so far. All live
    /// vertex ids are strictly below it.
    pub fn vertex_bound(&self) -> u64 {
        self.next_vertex
    }

    /// Exclusive upper bound on the edge ids issued so far.
    pub fn edge_bound(&self) -> u64 {
        self.next_edge
    }

    pub fn contains_vertex(&self, id: VertexId) -> bool {
        self.vertices.contains_key(&id)
    }

    pub fn contains_edge(&self, id: EdgeId) -> bool {
        self.edges.contains_key(&id)
    }

    pub fn vertex(&self, id: VertexId) -> Option<&V> {
        self.vertices.get(&id).map(|vertex| &vertex.attr)
    }

    pub fn edge(&self, id: EdgeId) -> Option<&E> {
        self.edges.get(&id).map(|edge| &edge.attr)
    }

    /// Returns the endpoints of the edge in their storage order. The order
    /// carries no meaning, the graph is undirected.
    pub fn endpoints(&self, id: EdgeId) -> Option<(VertexId, VertexId)> {
        self.edges
            .get(&id)
            .map(|edge| (edge.endpoints[0], edge.endpoints[1]))
    }

    pub fn add_vertex(&mut self, attr: V) -> VertexId {
        let id = VertexId::from_bits(self.next_vertex);
        self.next_vertex += 1;

        self.vertices.insert(id, AdjVertex::new(attr));
        id
    }

    /// Adds an edge between `from` and `to`. Both endpoint incidence lists
    /// get an entry, even when `from == to`.
    ///
    /// No id is allocated and no state is changed when either endpoint is
    /// absent; the attribute travels back to the caller in the error.
    pub fn try_add_edge(
        &mut self,
        from: VertexId,
        to: VertexId,
        attr: E,
    ) -> Result<EdgeId, AddEdgeError<E>> {
        if !self.vertices.contains_key(&from) {
            return Err(AddEdgeError::new(attr, UnknownVertex(from)));
        }

        if !self.vertices.contains_key(&to) {
            return Err(AddEdgeError::new(attr, UnknownVertex(to)));
        }

        let id = EdgeId::from_bits(self.next_edge);
        self.next_edge += 1;

        self.edges.insert(
            id,
            AdjEdge {
                attr,
                endpoints: [from, to],
            },
        );

        for endpoint in [from, to] {
            self.vertices
                .get_mut(&endpoint)
                .expect("vertex does not exist")
                .edges
                .push(id);
        }

        Ok(id)
    }

    /// Convenience variant of [`try_add_edge`](AdjMap::try_add_edge).
    ///
    /// # Panics
    ///
    /// Panics if `from` or `to` does not exist.
    pub fn add_edge(&mut self, from: VertexId, to: VertexId, attr: E) -> EdgeId {
        match self.try_add_edge(from, to, attr) {
            Ok(id) => id,
            Err(error) => panic!("{error}"),
        }
    }

    /// Removes the vertex and every edge incident on it. The incident
    /// edges are removed from the incidence lists of their other endpoints
    /// as well.
    pub fn remove_vertex(&mut self, id: VertexId) -> Option<V> {
        let vertex = self.vertices.remove(&id)?;

        for edge_id in vertex.edges {
            // A self-loop occurs twice in the list; the second occurrence
            // finds the edge already removed.
            self.remove_edge_inner(edge_id, Some(id));
        }

        Some(vertex.attr)
    }

    pub fn remove_edge(&mut self, id: EdgeId) -> Option<E> {
        self.remove_edge_inner(id, None)
    }

    /// Removes some edge between `from` and `to`, if there is one.
    pub fn remove_edge_between(&mut self, from: VertexId, to: VertexId) -> Option<E> {
        let id = self.edge_id_any(from, to)?;
        self.remove_edge(id)
    }

    fn remove_edge_inner(&mut self, id: EdgeId, cause: Option<VertexId>) -> Option<E> {
        let edge = self.edges.remove(&id)?;
        let [from, to] = edge.endpoints;

        for endpoint in [from, to] {
            // If this endpoint is the vertex causing this removal, its
            // incidence list is already gone and there is nothing to
            // disconnect.
            if Some(endpoint) == cause {
                continue;
            }

            let vertex = self
                .vertices
                .get_mut(&endpoint)
                .expect("vertex does not exist");
            Self::disconnect(&mut vertex.edges, id);

            // For a self-loop the first pass removes both occurrences.
            if from == to {
                break;
            }
        }

        Some(edge.attr)
    }

    // Removes every occurrence of the id, keeping the rest of the list in
    // its insertion order.
    fn disconnect(edges: &mut Vec<EdgeId>, id: EdgeId) {
        edges.retain(|&edge| edge != id);
    }

    /// Removes all vertices and edges. Id counters are not reset: ids are
    /// never reused, not even across `clear`.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.edges.clear();
    }

    /// Removes all edges, keeping the vertices. Every incidence list is
    /// emptied in place.
    pub fn clear_edges(&mut self) {
        self.edges.clear();

        for vertex in self.vertices.values_mut() {
            vertex.edges.clear();
        }
    }

    pub fn vertex_ids(&self) -> VertexIds<'_, V> {
        VertexIds {
            inner: self.vertices.keys(),
        }
    }

    pub fn edge_ids(&self) -> EdgeIds<'_, E> {
        EdgeIds {
            inner: self.edges.keys(),
        }
    }

    pub fn vertices(&self) -> VerticesIter<'_, V> {
        VerticesIter {
            inner: self.vertices.iter(),
        }
    }

    pub fn edges(&self) -> EdgesIter<'_, E> {
        EdgesIter {
            inner: self.edges.iter(),
        }
    }

    /// Iterates over the neighbors of `from` in incidence-list order,
    /// yielding `(neighbor, edge)` pairs. A self-loop is yielded once.
    ///
    /// # Panics
    ///
    /// Panics if `from` does not exist.
    pub fn neighbors(&self, from: VertexId) -> NeighborsIter<'_, E> {
        let vertex = self.vertices.get(&from).expect("vertex does not exist");

        NeighborsIter {
            from,
            edges: &vertex.edges,
            edge_map: &self.edges,
        }
    }

    /// Number of edge endpoints attached to the vertex. A self-loop
    /// contributes 2.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not exist.
    pub fn degree(&self, id: VertexId) -> usize {
        self.vertices
            .get(&id)
            .expect("vertex does not exist")
            .edges
            .len()
    }

    /// Iterates over all edges between `from` and `to`, in either
    /// orientation. Yields nothing when either vertex is absent.
    pub fn edge_id(&self, from: VertexId, to: VertexId) -> EdgeIdIter<'_, E> {
        let edges = self
            .vertices
            .get(&from)
            .map(|vertex| vertex.edges.as_slice())
            .unwrap_or(&[]);

        EdgeIdIter {
            from,
            to,
            edges,
            edge_map: &self.edges,
        }
    }

    pub fn edge_id_any(&self, from: VertexId, to: VertexId) -> Option<EdgeId> {
        self.edge_id(from, to).next()
    }

    pub fn contains_edge_between(&self, from: VertexId, to: VertexId) -> bool {
        self.edge_id_any(from, to).is_some()
    }

    pub(crate) fn incident_slice(&self, id: VertexId) -> Option<&[EdgeId]> {
        self.vertices.get(&id).map(|vertex| vertex.edges.as_slice())
    }
}

impl<V, E> Default for AdjMap<V, E> {
    fn default() -> Self {
        Self::new()
    }
}

// The iterators implement `Clone` manually so that they are restartable
// regardless of whether the attribute types are cloneable.
pub struct VertexIds<'a, V> {
    inner: hash_map::Keys<'a, VertexId, AdjVertex<V>>,
}

impl<V> Clone for VertexIds<'_, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<V> Iterator for VertexIds<'_, V> {
    type Item = VertexId;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().copied()
    }
}

pub struct EdgeIds<'a, E> {
    inner: hash_map::Keys<'a, EdgeId, AdjEdge<E>>,
}

impl<E> Clone for EdgeIds<'_, E> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<E> Iterator for EdgeIds<'_, E> {
    type Item = EdgeId;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().copied()
    }
}

pub struct VerticesIter<'a, V> {
    inner: hash_map::Iter<'a, VertexId, AdjVertex<V>>,
}

impl<V> Clone for VerticesIter<'_, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, V> Iterator for VerticesIter<'a, V> {
    type Item = (VertexId, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(id, vertex)| (*id, &vertex.attr))
    }
}

pub struct EdgesIter<'a, E> {
    inner: hash_map::Iter<'a, EdgeId, AdjEdge<E>>,
}

impl<E> Clone for EdgesIter<'_, E> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, E> Iterator for EdgesIter<'a, E> {
    type Item = (EdgeId, &'a E, VertexId, VertexId);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(id, edge)| {
            (*id, &edge.attr, edge.endpoints[0], edge.endpoints[1])
        })
    }
}

pub struct NeighborsIter<'a, E> {
    from: VertexId,
    edges: &'a [EdgeId],
    edge_map: &'a FxHashMap<EdgeId, AdjEdge<E>>,
}

impl<E> Clone for NeighborsIter<'_, E> {
    fn clone(&self) -> Self {
        Self {
            from: self.from,
            edges: self.edges,
            edge_map: self.edge_map,
        }
    }
}

impl<E> Iterator for NeighborsIter<'_, E> {
    type Item = (VertexId, EdgeId);

    fn next(&mut self) -> Option<Self::Item> {
        let (&edge, tail) = self.edges.split_first()?;
        self.edges = tail;

        let endpoints = self.edge_map.get(&edge).expect("edge does not exist").endpoints;

        let neighbor = if endpoints[0] != self.from {
            endpoints[0]
        } else {
            endpoints[1]
        };

        if neighbor == self.from {
            // Skip self-loop edge duplication. The two occurrences are
            // always adjacent in the list.
            let (head, tail) = self.edges.split_at(1);
            self.edges = tail;

            debug_assert_eq!(head[0], edge);
        }

        Some((neighbor, edge))
    }
}

pub struct EdgeIdIter<'a, E> {
    from: VertexId,
    to: VertexId,
    edges: &'a [EdgeId],
    edge_map: &'a FxHashMap<EdgeId, AdjEdge<E>>,
}

impl<E> Clone for EdgeIdIter<'_, E> {
    fn clone(&self) -> Self {
        Self {
            from: self.from,
            to: self.to,
            edges: self.edges,
            edge_map: self.edge_map,
        }
    }
}

impl<E> Iterator for EdgeIdIter<'_, E> {
    type Item = EdgeId;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (&edge, tail) = self.edges.split_first()?;
            self.edges = tail;

            let endpoints = self.edge_map.get(&edge).expect("edge does not exist").endpoints;

            let connects = (endpoints[0] == self.from && endpoints[1] == self.to)
                || (endpoints[0] == self.to && endpoints[1] == self.from);

            if connects {
                if self.from == self.to {
                    // Skip self-loop edge duplication.
                    let (head, tail) = self.edges.split_at(1);
                    self.edges = tail;

                    debug_assert_eq!(head[0], edge);
                }

                return Some(edge);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::infra::testing::check_consistency;

    #[test]
    fn basic() {
        let mut graph = AdjMap::new();

        let v0 = graph.add_vertex(());
        let v1 = graph.add_vertex(());
        let v2 = graph.add_vertex(());
        let v3 = graph.add_vertex(());

        graph.add_edge(v0, v1, ());
        graph.add_edge(v0, v2, ());
        let e = graph.add_edge(v0, v3, ());
        graph.add_edge(v2, v1, ());
        graph.add_edge(v2, v3, ());

        assert_eq!(graph.remove_edge(e), Some(()));
        assert_eq!(graph.remove_vertex(v1), Some(()));

        assert_eq!(graph.vertex_count(), 3);
        assert_eq!(graph.vertex_ids().count(), graph.vertex_count());
        assert_eq!(graph.vertices().count(), graph.vertex_count());

        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.edge_ids().count(), graph.edge_count());
        assert_eq!(graph.edges().count(), graph.edge_count());

        let valid_edge_ids = graph.edge_ids().all(|edge_id| {
            let (from, to) = graph.endpoints(edge_id).unwrap();
            graph.edge_id(from, to).any(|e| e == edge_id)
        });
        assert!(valid_edge_ids);

        let mut deg = graph
            .vertex_ids()
            .map(|id| graph.degree(id))
            .collect::<Vec<_>>();
        deg.sort_unstable();

        assert_eq!(deg, vec![1, 1, 2]);

        check_consistency(&graph).unwrap();
    }

    #[test]
    fn self_loop_bookkeeping() {
        let mut graph = AdjMap::<_, ()>::new();

        let v = graph.add_vertex(());
        let e = graph.add_edge(v, v, ());

        // Recorded twice in the incidence list, reported once by the
        // iterators.
        assert_eq!(graph.degree(v), 2);
        assert_eq!(graph.incident_slice(v), Some([e, e].as_slice()));
        assert_eq!(graph.neighbors(v).count(), 1);
        assert_eq!(graph.neighbors(v).next(), Some((v, e)));
        assert_eq!(graph.edge_id(v, v).collect::<Vec<_>>(), vec![e]);

        check_consistency(&graph).unwrap();
    }

    #[test]
    fn remove_self_loop() {
        let mut graph = AdjMap::<_, i32>::new();

        let v = graph.add_vertex(());
        let e = graph.add_edge(v, v, 3);

        assert_eq!(graph.remove_edge(e), Some(3));

        assert_eq!(graph.degree(v), 0);
        assert_eq!(graph.incident_slice(v), Some([].as_slice()));
        assert_eq!(graph.edge_count(), 0);

        check_consistency(&graph).unwrap();
    }

    #[test]
    fn remove_edge_updates_both_endpoints() {
        let mut graph = AdjMap::new();

        let a = graph.add_vertex("a");
        let b = graph.add_vertex("b");
        let e = graph.add_edge(a, b, "e");

        assert_eq!(graph.remove_edge(e), Some("e"));

        assert!(!graph.contains_edge(e));
        assert!(!graph.contains_edge_between(a, b));
        assert_eq!(graph.degree(a), 0);
        assert_eq!(graph.degree(b), 0);

        check_consistency(&graph).unwrap();
    }

    #[test]
    fn remove_vertex_cascades_to_other_endpoints() {
        let mut graph = AdjMap::new();

        let v = graph.add_vertex("v");
        let w1 = graph.add_vertex("w1");
        let w2 = graph.add_vertex("w2");

        let e1 = graph.add_edge(v, w1, ());
        let e2 = graph.add_edge(v, w2, ());
        let loop_ = graph.add_edge(v, v, ());
        let survivor = graph.add_edge(w1, w2, ());

        assert_eq!(graph.remove_vertex(v), Some("v"));

        assert!(!graph.contains_vertex(v));
        assert_eq!(graph.incident_slice(v), None);

        for e in [e1, e2, loop_] {
            assert!(!graph.contains_edge(e));
        }

        // The incidence lists of the surviving endpoints no longer refer
        // to the removed edges.
        assert_eq!(graph.incident_slice(w1), Some([survivor].as_slice()));
        assert_eq!(graph.incident_slice(w2), Some([survivor].as_slice()));

        check_consistency(&graph).unwrap();
    }

    #[test]
    fn parallel_edges() {
        let mut graph = AdjMap::new();

        let v0 = graph.add_vertex(());
        let v1 = graph.add_vertex(());
        let v2 = graph.add_vertex(());

        let e0 = graph.add_edge(v0, v1, 0);
        graph.add_edge(v0, v2, 1);
        let e2 = graph.add_edge(v1, v0, 2);

        let mut e01 = graph
            .edge_id(v0, v1)
            .map(|e| graph.edge(e))
            .collect::<Vec<_>>();
        e01.sort();

        assert_eq!(e01, vec![Some(&0), Some(&2)]);
        assert_ne!(e0, e2);

        let e02 = graph
            .edge_id(v0, v2)
            .map(|e| graph.edge(e))
            .collect::<Vec<_>>();

        assert_eq!(e02, vec![Some(&1)]);
    }

    #[test]
    fn incidence_order_preserved() {
        let mut graph = AdjMap::new();

        let v = graph.add_vertex(());
        let w = graph.add_vertex(());

        let e1 = graph.add_edge(v, w, 1);
        let e2 = graph.add_edge(v, w, 2);
        let e3 = graph.add_edge(v, w, 3);

        graph.remove_edge(e2);

        assert_eq!(graph.incident_slice(v), Some([e1, e3].as_slice()));
        assert_eq!(graph.incident_slice(w), Some([e1, e3].as_slice()));
    }

    #[test]
    fn add_edge_unknown_vertex_changes_nothing() {
        let mut graph = AdjMap::new();

        let v = graph.add_vertex(());
        let ghost = graph.add_vertex(());
        graph.remove_vertex(ghost).unwrap();

        let edge_bound = graph.edge_bound();

        let error = graph.try_add_edge(v, ghost, "attr").unwrap_err();
        assert_eq!(error.attr, "attr");
        assert_matches!(error.kind, UnknownVertex(id) if id == ghost);

        let error = graph.try_add_edge(ghost, v, "attr").unwrap_err();
        assert_matches!(error.kind, UnknownVertex(id) if id == ghost);

        // No id was consumed and no state was touched.
        assert_eq!(graph.edge_bound(), edge_bound);
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.degree(v), 0);

        check_consistency(&graph).unwrap();
    }

    #[test]
    fn ids_not_reused() {
        let mut graph = AdjMap::new();

        let v0 = graph.add_vertex(());
        let v1 = graph.add_vertex(());
        let e0 = graph.add_edge(v0, v1, ());

        graph.remove_edge(e0);
        graph.remove_vertex(v1);

        let v2 = graph.add_vertex(());
        let e1 = graph.add_edge(v0, v2, ());

        assert_ne!(v2, v1);
        assert_ne!(e1, e0);
        assert!(!graph.contains_vertex(v1));
        assert!(!graph.contains_edge(e0));

        check_consistency(&graph).unwrap();
    }

    #[test]
    fn clear_keeps_counters() {
        let mut graph = AdjMap::new();

        let v0 = graph.add_vertex(());
        let v1 = graph.add_vertex(());
        graph.add_edge(v0, v1, ());

        let vertex_bound = graph.vertex_bound();
        let edge_bound = graph.edge_bound();

        graph.clear();

        assert_eq!(graph.vertex_count(), 0);
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.vertex_bound(), vertex_bound);
        assert_eq!(graph.edge_bound(), edge_bound);

        let v2 = graph.add_vertex(());
        assert_ne!(v2, v0);
        assert_ne!(v2, v1);
    }

    #[test]
    fn clear_edges_empties_incidence_lists() {
        let mut graph = AdjMap::new();

        let v0 = graph.add_vertex(());
        let v1 = graph.add_vertex(());

        graph.add_edge(v0, v1, ());
        graph.add_edge(v0, v0, ());

        graph.clear_edges();

        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.vertex_count(), 2);
        assert_eq!(graph.degree(v0), 0);
        assert_eq!(graph.degree(v1), 0);

        check_consistency(&graph).unwrap();
    }

    #[test]
    fn remove_between_after_clear_edges() {
        let mut graph = AdjMap::new();

        let v = graph.add_vertex(0);
        graph.add_edge(v, v, -68);
        graph.clear_edges();

        assert_eq!(graph.remove_edge_between(v, v), None);

        check_consistency(&graph).unwrap();
    }

    #[test]
    fn random_ops_consistency() {
        let mut rng = fastrand::Rng::with_seed(0xef6f79ed30ba75a);
        let mut graph = AdjMap::new();
        let mut vertices = Vec::new();
        let mut edges = Vec::new();

        for _ in 0..1000 {
            match rng.u8(0..10) {
                0..=3 => {
                    vertices.push(graph.add_vertex(rng.u32(..)));
                }
                4..=6 if !vertices.is_empty() => {
                    let from = vertices[rng.usize(..vertices.len())];
                    let to = vertices[rng.usize(..vertices.len())];
                    edges.push(graph.add_edge(from, to, rng.u32(..)));
                }
                7 if !vertices.is_empty() => {
                    let v = vertices.swap_remove(rng.usize(..vertices.len()));
                    graph.remove_vertex(v).unwrap();
                    edges.retain(|&e| graph.contains_edge(e));
                }
                8 if !edges.is_empty() => {
                    let e = edges.swap_remove(rng.usize(..edges.len()));
                    graph.remove_edge(e).unwrap();
                }
                _ => {}
            }

            check_consistency(&graph)
                .as_ref()
                .map_err(ToString::to_string)
                .unwrap();
        }
    }
}
