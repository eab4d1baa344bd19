use std::fmt;

use arbitrary::Arbitrary;

use crate::{
    core::id::{EdgeId, VertexId},
    storage::AdjMap,
};

/// Index into the set of live vertices or edges, reduced modulo the set
/// size when applied.
#[derive(Debug, Arbitrary, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Index(pub usize);

impl Index {
    pub fn get(&self, m: usize) -> Option<usize> {
        if m > 0 {
            Some(self.0 % m)
        } else {
            None
        }
    }
}

/// A single mutation of the graph. Operations that need an existing
/// element address it by [`Index`] into the live set and degrade to a
/// no-op when the set is empty.
#[derive(Debug, Arbitrary, Clone)]
pub enum MutOp<V, E> {
    AddVertex(V),
    RemoveVertex(Index),
    Clear,
    AddEdge(Index, Index, E),
    RemoveEdge(Index),
    ClearEdges,
}

impl<V, E> MutOp<V, E> {
    pub fn apply(self, graph: &mut AdjMap<V, E>) {
        match self {
            MutOp::AddVertex(attr) => {
                graph.add_vertex(attr);
            }
            MutOp::RemoveVertex(index) => {
                if let Some(id) = nth_vertex(graph, index) {
                    graph.remove_vertex(id);
                }
            }
            MutOp::Clear => graph.clear(),
            MutOp::AddEdge(from, to, attr) => {
                if let (Some(from), Some(to)) = (nth_vertex(graph, from), nth_vertex(graph, to)) {
                    graph.add_edge(from, to, attr);
                }
            }
            MutOp::RemoveEdge(index) => {
                if let Some(id) = nth_edge(graph, index) {
                    graph.remove_edge(id);
                }
            }
            MutOp::ClearEdges => graph.clear_edges(),
        }
    }
}

// The live ids are sorted before indexing so that a sequence of operations
// is deterministic regardless of the map iteration order.
fn nth_vertex<V, E>(graph: &AdjMap<V, E>, index: Index) -> Option<VertexId> {
    let mut ids = graph.vertex_ids().collect::<Vec<_>>();
    ids.sort_unstable();

    index.get(ids.len()).map(|i| ids[i])
}

fn nth_edge<V, E>(graph: &AdjMap<V, E>, index: Index) -> Option<EdgeId> {
    let mut ids = graph.edge_ids().collect::<Vec<_>>();
    ids.sort_unstable();

    index.get(ids.len()).map(|i| ids[i])
}

#[derive(Arbitrary)]
pub struct MutOpsSeq<V, E>(pub Vec<MutOp<V, E>>);

impl<V, E> IntoIterator for MutOpsSeq<V, E> {
    type Item = MutOp<V, E>;
    type IntoIter = std::vec::IntoIter<MutOp<V, E>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<V, E> MutOpsSeq<V, E> {
    pub fn replay(self, graph: &mut AdjMap<V, E>)
    where
        V: fmt::Debug,
        E: fmt::Debug,
    {
        println!("let mut graph = AdjMap::new();");
        println!();

        for op in self {
            match &op {
                MutOp::AddVertex(attr) => println!("graph.add_vertex({attr:?});"),
                MutOp::RemoveVertex(index) => println!("graph.remove_vertex({index:?});"),
                MutOp::Clear => println!("graph.clear();"),
                MutOp::AddEdge(from, to, attr) => {
                    println!("graph.add_edge({from:?}, {to:?}, {attr:?});")
                }
                MutOp::RemoveEdge(index) => println!("graph.remove_edge({index:?});"),
                MutOp::ClearEdges => println!("graph.clear_edges();"),
            }

            op.apply(graph);
        }

        println!();
        println!("check_consistency(&graph).unwrap();");
    }
}

impl<V: fmt::Debug, E: fmt::Debug> fmt::Debug for MutOpsSeq<V, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "MutOpsSeq(vec![")?;

        for op in self.0.iter() {
            writeln!(f, "    MutOp::{:?},", op)?;
        }

        writeln!(f, "])")?;
        writeln!(f, ".replay(&mut graph);")?;
        writeln!(f)?;
        writeln!(f, "// use `cargo test fuzz_replay_mut_ops_seq`")
    }
}

#[cfg(test)]
mod tests {
    use arbitrary::Unstructured;
    use fastrand::Rng;

    use super::*;
    use crate::infra::testing::check_consistency;

    #[test]
    fn mut_ops_seq_keeps_consistency() {
        for seed in [0, 3, 7, 13, 23, 42, 69, 123, 666, 1024] {
            let mut rng = Rng::with_seed(seed);
            let mut raw = vec![0; 4096];
            rng.fill(&mut raw);

            let mut u = Unstructured::new(&raw);
            let seq: MutOpsSeq<i8, i8> = u.arbitrary().unwrap();

            let mut graph = AdjMap::new();

            for op in seq {
                op.apply(&mut graph);
                check_consistency(&graph)
                    .as_ref()
                    .map_err(ToString::to_string)
                    .unwrap();
            }
        }
    }

    #[test]
    #[ignore = "placeholder for fuzz findings"]
    fn fuzz_replay_mut_ops_seq() {
        let mut graph = AdjMap::<i8, i8>::new();

        MutOpsSeq(vec![
            MutOp::AddVertex(0),
            MutOp::AddEdge(Index(0), Index(0), -68),
            MutOp::ClearEdges,
            MutOp::RemoveEdge(Index(0)),
        ])
        .replay(&mut graph);

        check_consistency(&graph).unwrap();
    }
}
