#![allow(dead_code)]
use parttree::{Tree, UndirectedGraph};
use std::collections::BTreeSet;

/// Builds the 4-adjacency graph of a `height` x `width` grid: for each
/// vertex in raster order, an edge to its right neighbour then to the one
/// below. This matches the edge ordering the reference labelling fixtures
/// were generated with.
pub fn grid_4_adjacency(height: usize, width: usize) -> UndirectedGraph {
    let mut graph = UndirectedGraph::new(height * width);
    for y in 0..height {
        for x in 0..width {
            let vertex = y * width + x;
            if x + 1 < width {
                graph.add_edge(vertex, vertex + 1);
            }
            if y + 1 < height {
                graph.add_edge(vertex, vertex + width);
            }
        }
    }
    graph
}

/// The 4x4 gradient used by the watershed regression oracle.
pub fn grid_weights() -> Vec<f64> {
    vec![
        1.0, 2.0, 5.0, 5.0, 5.0, 8.0, 1.0, 4.0, 3.0, 4.0, 4.0, 1.0, 5.0, 2.0, 6.0, 3.0, 5.0,
        4.0, 0.0, 7.0, 0.0, 3.0, 4.0, 0.0,
    ]
}

/// The set of descendant leaves of every node.
pub fn leaf_sets(tree: &Tree) -> Vec<BTreeSet<usize>> {
    let mut sets: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); tree.num_nodes()];
    for leaf in tree.leaves() {
        sets[leaf].insert(leaf);
    }
    for node in 0..tree.num_nodes() - 1 {
        let descendants = sets[node].clone();
        sets[tree.parent(node)].extend(descendants);
    }
    sets
}
