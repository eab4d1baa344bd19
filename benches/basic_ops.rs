mod common;

use common::{RandomEdges, RANDOM_SEED};
use fastrand::Rng;
use petgraph::stable_graph::StableGraph;
use petgraph::Undirected;

fn main() {
    divan::main();
}

#[divan::bench(consts = [100, 1000], args = [0.05, 0.5, 0.95])]
fn weft_add_remove<const N: usize>(density: f32) {
    let mut rng = Rng::with_seed(RANDOM_SEED);

    let mut graph = weft::Graph::new();
    let mut vertices = Vec::with_capacity(N);

    for _ in 0..N {
        vertices.push(graph.add_vertex(rng.u32(0..100)));
    }

    let mut edges = RandomEdges::new(N, density);

    while let Some((u, v)) = edges.next_edge(&mut rng) {
        graph.add_edge(vertices[u], vertices[v], rng.f32());
    }

    for _ in 0..(N / 4) {
        let v = vertices.swap_remove(rng.usize(..vertices.len()));
        graph.remove_vertex(v).unwrap();
    }

    let mut edges = RandomEdges::new(vertices.len(), density);

    while let Some((u, v)) = edges.next_edge(&mut rng) {
        if let Some(e) = graph.edge_id_any(vertices[u], vertices[v]) {
            graph.remove_edge(e).unwrap();
        }
    }

    let mut edges = RandomEdges::new(vertices.len(), density);

    while let Some((u, v)) = edges.next_edge(&mut rng) {
        graph.add_edge(vertices[u], vertices[v], rng.f32());
    }
}

#[divan::bench(consts = [100, 1000], args = [0.05, 0.5, 0.95])]
fn petgraph_stable_add_remove<const N: usize>(density: f32) {
    let mut rng = Rng::with_seed(RANDOM_SEED);

    let mut graph = StableGraph::<u32, f32, Undirected>::with_capacity(N, 0);
    let mut vertices = Vec::with_capacity(N);

    for _ in 0..N {
        vertices.push(graph.add_node(rng.u32(0..100)));
    }

    let mut edges = RandomEdges::new(N, density);

    while let Some((u, v)) = edges.next_edge(&mut rng) {
        graph.add_edge(vertices[u], vertices[v], rng.f32());
    }

    for _ in 0..(N / 4) {
        let v = vertices.swap_remove(rng.usize(..vertices.len()));
        graph.remove_node(v).unwrap();
    }

    let mut edges = RandomEdges::new(vertices.len(), density);

    while let Some((u, v)) = edges.next_edge(&mut rng) {
        if let Some(e) = graph.find_edge(vertices[u], vertices[v]) {
            graph.remove_edge(e).unwrap();
        }
    }

    let mut edges = RandomEdges::new(vertices.len(), density);

    while let Some((u, v)) = edges.next_edge(&mut rng) {
        graph.add_edge(vertices[u], vertices[v], rng.f32());
    }
}
