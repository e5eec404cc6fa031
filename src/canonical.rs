use crate::union_find::UnionFind;
use crate::validation::{check_edge_data, check_non_empty};
use crate::{HierarchyError, Tree, UndirectedGraph};
use num_traits::Float;
use std::cmp::Ordering;

/// The result of canonical binary partition tree construction: the tree, one
/// altitude per tree node, and the minimum spanning tree retained during
/// construction.
///
/// `mst` is a graph over the same vertex set holding exactly one edge per
/// internal tree node, in merge order; `mst_edge_map[k]` is the index of the
/// `k`th MST edge in the original graph.
pub struct CanonicalBpt<T> {
    pub tree: Tree,
    pub altitudes: Vec<T>,
    pub mst: UndirectedGraph,
    pub mst_edge_map: Vec<usize>,
}

/// Computes the canonical binary partition tree of an edge-weighted graph:
/// the hierarchy obtained by merging regions in minimum spanning tree order.
///
/// Edge indices are sorted by weight ascending with a stable sort, so ties
/// are broken by original edge index and the resulting tree is reproducible
/// across runs. Leaves sit at altitude zero; each internal node's altitude is
/// the weight of the MST edge that created it. For a connected graph with
/// `n` vertices the tree has exactly `2n - 1` nodes and the MST `n - 1`
/// edges; a graph without a spanning tree is rejected with
/// [`HierarchyError::DisconnectedGraph`].
///
/// # Examples
/// ```
/// use parttree::{bpt_canonical, UndirectedGraph};
///
/// let mut graph = UndirectedGraph::new(4);
/// graph.add_edge(0, 1);
/// graph.add_edge(1, 2);
/// graph.add_edge(2, 3);
/// let weights = vec![2.0, 1.0, 3.0];
///
/// let bpt = bpt_canonical(&graph, &weights).unwrap();
/// assert_eq!(7, bpt.tree.num_nodes());
/// assert_eq!(vec![0.0, 0.0, 0.0, 0.0, 1.0, 2.0, 3.0], bpt.altitudes);
/// assert_eq!(3, bpt.mst.num_edges());
/// ```
pub fn bpt_canonical<T: Float>(
    graph: &UndirectedGraph,
    edge_weights: &[T],
) -> Result<CanonicalBpt<T>, HierarchyError> {
    check_non_empty(graph)?;
    check_edge_data(graph, edge_weights, "edge_weights")?;

    let num_vertices = graph.num_vertices();
    let mut order: Vec<usize> = (0..graph.num_edges()).collect();
    // Stable sort: equal weights keep original edge order.
    order.sort_by(|&a, &b| {
        edge_weights[a]
            .partial_cmp(&edge_weights[b])
            .unwrap_or(Ordering::Equal)
    });

    let mut union_find = UnionFind::new(num_vertices);
    // Maps a set representative to the top tree node of that set's region.
    let mut set_node: Vec<usize> = (0..num_vertices).collect();
    let mut parents: Vec<usize> = (0..num_vertices).collect();
    let mut altitudes = vec![T::zero(); num_vertices];
    let mut mst = UndirectedGraph::new(num_vertices);
    let mut mst_edge_map = Vec::with_capacity(num_vertices.saturating_sub(1));

    for edge_index in order {
        let (source, target) = graph.edge(edge_index);
        let rep_a = union_find.find(source);
        let rep_b = union_find.find(target);
        if rep_a == rep_b {
            // The edge closes a cycle; it is not part of the MST.
            continue;
        }
        let new_node = parents.len();
        parents[set_node[rep_a]] = new_node;
        parents[set_node[rep_b]] = new_node;
        parents.push(new_node);
        altitudes.push(edge_weights[edge_index]);
        let merged = union_find.union(rep_a, rep_b);
        set_node[merged] = new_node;
        mst.add_edge(source, target);
        mst_edge_map.push(edge_index);
        if mst_edge_map.len() == num_vertices - 1 {
            break;
        }
    }

    if mst_edge_map.len() != num_vertices.saturating_sub(1) {
        return Err(HierarchyError::DisconnectedGraph(format!(
            "only {} of the {} merges required for a spanning tree were possible",
            mst_edge_map.len(),
            num_vertices - 1
        )));
    }

    let tree = Tree::from_parents(parents)?;
    Ok(CanonicalBpt {
        tree,
        altitudes,
        mst,
        mst_edge_map,
    })
}
