use crate::validation::check_node_data_len;
use crate::{HierarchyError, Tree, UndirectedGraph};
use num_traits::Float;

/// Computes the saliency value of each edge of interest: the altitude of the
/// lowest common ancestor of the edge's endpoint leaves, given as a
/// precomputed `lca_map` from edge index to tree node.
pub fn saliency<T: Float>(altitudes: &[T], lca_map: &[usize]) -> Result<Vec<T>, HierarchyError> {
    for (index, &node) in lca_map.iter().enumerate() {
        if node >= altitudes.len() {
            return Err(HierarchyError::InvalidInput(format!(
                "lca_map[{index}] = {node} is out of range for {} altitudes",
                altitudes.len()
            )));
        }
    }
    Ok(lca_map.iter().map(|&node| altitudes[node]).collect())
}

/// Computes the saliency map of a hierarchy over `graph`: one value per
/// graph edge, the altitude of the LCA of the edge's endpoints in `tree`.
///
/// # Examples
/// ```
/// use parttree::{bpt_canonical, saliency_map, UndirectedGraph};
///
/// let mut graph = UndirectedGraph::new(3);
/// graph.add_edge(0, 1);
/// graph.add_edge(1, 2);
/// graph.add_edge(0, 2);
/// let weights = vec![1.0, 2.0, 5.0];
///
/// let bpt = bpt_canonical(&graph, &weights).unwrap();
/// // The direct 0-2 edge is salient only up to the 1-2 merge level.
/// assert_eq!(
///     vec![1.0, 2.0, 2.0],
///     saliency_map(&bpt.tree, &bpt.altitudes, &graph).unwrap()
/// );
/// ```
pub fn saliency_map<T: Float>(
    tree: &Tree,
    altitudes: &[T],
    graph: &UndirectedGraph,
) -> Result<Vec<T>, HierarchyError> {
    check_node_data_len(tree, altitudes, "altitudes")?;
    if graph.num_vertices() != tree.num_leaves() {
        return Err(HierarchyError::InvalidInput(format!(
            "the graph has {} vertices but the tree has {} leaves",
            graph.num_vertices(),
            tree.num_leaves()
        )));
    }
    let pairs: Vec<(usize, usize)> = graph.edges().collect();
    let lca_map = tree.lca_map(&pairs)?;
    saliency(altitudes, &lca_map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saliency_is_altitude_at_the_lca() {
        let altitudes = vec![0.0, 0.0, 0.0, 1.0, 2.0];
        assert_eq!(
            vec![1.0, 2.0, 0.0],
            saliency(&altitudes, &[3, 4, 1]).unwrap()
        );
    }

    #[test]
    fn out_of_range_lca_is_rejected() {
        let altitudes = vec![0.0, 1.0];
        let result = saliency(&altitudes, &[2]);
        assert!(matches!(result, Err(HierarchyError::InvalidInput(..))));
    }

    #[test]
    fn vertex_count_mismatch_is_rejected() {
        let tree = Tree::from_parents(vec![2, 2, 2]).unwrap();
        let graph = UndirectedGraph::new(3);
        let result = saliency_map(&tree, &[0.0, 0.0, 1.0], &graph);
        assert!(matches!(result, Err(HierarchyError::InvalidInput(..))));
    }
}
