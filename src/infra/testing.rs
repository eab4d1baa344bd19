use thiserror::Error;

use crate::{
    core::id::{EdgeId, VertexId},
    storage::AdjMap,
};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConsistencyCheckError {
    #[error("vertex ids iterator count ({0}) is not equal to vertex count ({1})")]
    VertexIdsVertexCountMismatch(usize, usize),
    #[error("edge ids iterator count ({0}) is not equal to edge count ({1})")]
    EdgeIdsEdgeCountMismatch(usize, usize),
    #[error("vertex id {0:?} is not below the allocator bound ({1})")]
    VertexIdAboveBound(VertexId, u64),
    #[error("edge id {0:?} is not below the allocator bound ({1})")]
    EdgeIdAboveBound(EdgeId, u64),
    #[error("endpoint {1:?} of edge {0:?} does not exist")]
    EndpointMissing(EdgeId, VertexId),
    #[error("edge {0:?} occurs {2} times in the incidence list of {1:?}, expected {3}")]
    IncidenceCountMismatch(EdgeId, VertexId, usize, usize),
    #[error("incidence list of {0:?} refers to edge {1:?} which does not exist")]
    IncidenceStale(VertexId, EdgeId),
    #[error("incidence list of {0:?} contains edge {1:?} which is not incident on it")]
    IncidenceForeign(VertexId, EdgeId),
    #[error("sum of degrees ({0}) is not equal to doubled edge count ({1})")]
    HandshakingLemma(usize, usize),
}

/// Checks the internal invariants of the storage: the edge set and the
/// per-vertex incidence lists must reference each other exactly, and ids
/// must stay below the allocator cursors.
pub fn check_consistency<V, E>(graph: &AdjMap<V, E>) -> Result<(), ConsistencyCheckError> {
    use ConsistencyCheckError::*;

    let vertex_count = graph.vertex_count();
    let vertex_ids_count = graph.vertex_ids().count();
    if vertex_ids_count != vertex_count {
        return Err(VertexIdsVertexCountMismatch(vertex_ids_count, vertex_count));
    }

    let edge_count = graph.edge_count();
    let edge_ids_count = graph.edge_ids().count();
    if edge_ids_count != edge_count {
        return Err(EdgeIdsEdgeCountMismatch(edge_ids_count, edge_count));
    }

    for id in graph.vertex_ids() {
        if id.as_bits() >= graph.vertex_bound() {
            return Err(VertexIdAboveBound(id, graph.vertex_bound()));
        }
    }

    for id in graph.edge_ids() {
        if id.as_bits() >= graph.edge_bound() {
            return Err(EdgeIdAboveBound(id, graph.edge_bound()));
        }
    }

    // Every edge is cross-referenced by the incidence lists of its
    // endpoints: once in each list, or twice in the single list of a
    // self-loop.
    for edge in graph.edge_ids() {
        let (from, to) = graph.endpoints(edge).expect("edge does not exist");

        for endpoint in [from, to] {
            let incidence = graph
                .incident_slice(endpoint)
                .ok_or(EndpointMissing(edge, endpoint))?;

            let expected = if from == to { 2 } else { 1 };
            let occurrences = incidence.iter().filter(|&&e| e == edge).count();

            if occurrences != expected {
                return Err(IncidenceCountMismatch(edge, endpoint, occurrences, expected));
            }

            if from == to {
                break;
            }
        }
    }

    // Every incidence entry refers to a live edge that has the vertex as
    // an endpoint.
    for vertex in graph.vertex_ids() {
        let incidence = graph.incident_slice(vertex).expect("vertex does not exist");

        for &edge in incidence {
            match graph.endpoints(edge) {
                None => return Err(IncidenceStale(vertex, edge)),
                Some((from, to)) if from != vertex && to != vertex => {
                    return Err(IncidenceForeign(vertex, edge))
                }
                _ => {}
            }
        }
    }

    // https://en.wikipedia.org/wiki/Handshaking_lemma
    let deg_sum = graph
        .vertex_ids()
        .map(|id| graph.degree(id))
        .sum::<usize>();

    if deg_sum != 2 * edge_count {
        return Err(HandshakingLemma(deg_sum, 2 * edge_count));
    }

    Ok(())
}
