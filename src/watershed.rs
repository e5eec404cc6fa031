use crate::canonical::bpt_canonical;
use crate::union_find::UnionFind;
use crate::{HierarchyError, UndirectedGraph};
use num_traits::Float;

/// Computes the watershed-cut labelling of an edge-weighted graph: one basin
/// per regional minimum, separated along the edges where waters from two
/// minima would meet.
///
/// The labelling is derived from the canonical binary partition tree. An
/// internal node is a regional minimum when no internal node below it sits
/// at a strictly lower altitude and its parent's altitude is strictly
/// greater (or it is the root). The MST edge behind an internal node is a
/// watershed edge exactly when both merged regions already contain a
/// minimum; dropping those edges from the MST leaves one connected
/// component per basin. Labels are dense, starting at 1 in vertex-scan
/// order.
pub fn labelisation_watershed<T: Float>(
    graph: &UndirectedGraph,
    edge_weights: &[T],
) -> Result<Vec<usize>, HierarchyError> {
    let bpt = bpt_canonical(graph, edge_weights)?;
    let tree = &bpt.tree;
    let altitudes = &bpt.altitudes;
    let num_leaves = tree.num_leaves();
    let num_nodes = tree.num_nodes();
    let root = tree.root();

    // Lowest internal altitude within each subtree.
    let mut min_descendant = vec![T::zero(); num_nodes];
    for node in tree.internal_nodes() {
        let mut lowest = altitudes[node];
        for &child in tree.children(node) {
            if !tree.is_leaf(child) {
                lowest = lowest.min(min_descendant[child]);
            }
        }
        min_descendant[node] = lowest;
    }

    let mut is_minimum = vec![false; num_nodes];
    let mut has_minimum = vec![false; num_nodes];
    for node in tree.internal_nodes() {
        let contains_lower = tree
            .children(node)
            .iter()
            .any(|&child| !tree.is_leaf(child) && min_descendant[child] < altitudes[node]);
        let maximal = node == root || altitudes[tree.parent(node)] > altitudes[node];
        is_minimum[node] = !contains_lower && maximal;
        has_minimum[node] = is_minimum[node]
            || tree
                .children(node)
                .iter()
                .any(|&child| !tree.is_leaf(child) && has_minimum[child]);
    }

    // MST edge k corresponds to internal node num_leaves + k. Keep every
    // edge that merges at most one minimum-bearing region; the remaining
    // components are the catchment basins.
    let mut basins = UnionFind::new(num_leaves);
    for k in 0..bpt.mst.num_edges() {
        let node = num_leaves + k;
        let watershed_edge = tree
            .children(node)
            .iter()
            .all(|&child| !tree.is_leaf(child) && has_minimum[child]);
        if !watershed_edge {
            let (source, target) = bpt.mst.edge(k);
            basins.union(source, target);
        }
    }

    let mut labels = vec![0_usize; num_leaves];
    let mut next_label = 0_usize;
    let mut label_of_rep = vec![0_usize; num_leaves];
    for vertex in 0..num_leaves {
        let rep = basins.find(vertex);
        if label_of_rep[rep] == 0 {
            next_label += 1;
            label_of_rep[rep] = next_label;
        }
        labels[vertex] = label_of_rep[rep];
    }
    Ok(labels)
}
