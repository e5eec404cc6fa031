use crate::accumulate::{accumulate_and_combine_sequential, accumulate_parallel, Accumulator};
use crate::validation::check_node_data_len;
use crate::{HierarchyError, Tree};
use num_traits::Float;

fn check_non_decreasing<T: Float>(
    tree: &Tree,
    data: &[T],
    name: &str,
) -> Result<(), HierarchyError> {
    for node in 0..tree.root() {
        if data[node] > data[tree.parent(node)] {
            return Err(HierarchyError::NonMonotonicAttribute(format!(
                "{name}[{node}] exceeds the value at its parent"
            )));
        }
    }
    Ok(())
}

/// Computes the extinction value of each node of a canonical binary
/// partition tree: the level of `attribute` at which the node's
/// quasi-flat zone disappears.
///
/// Nodes whose altitude equals their parent's (root excluded) do not open a
/// distinct zone and contribute zero; the remaining attribute values are
/// max-accumulated from the leaves upward, seeded with the leaf-level
/// attribute. `attribute` must be non-decreasing towards the root, which is
/// checked up front.
pub fn extinction_values<T: Float>(
    tree: &Tree,
    altitudes: &[T],
    attribute: &[T],
) -> Result<Vec<T>, HierarchyError> {
    check_node_data_len(tree, altitudes, "altitudes")?;
    check_node_data_len(tree, attribute, "attribute")?;
    check_non_decreasing(tree, attribute, "attribute")?;

    let mut masked = attribute.to_vec();
    for node in 0..tree.root() {
        if altitudes[node] == altitudes[tree.parent(node)] {
            masked[node] = T::zero();
        }
    }
    accumulate_and_combine_sequential(
        tree,
        &masked,
        &attribute[..tree.num_leaves()],
        Accumulator::Max,
        |a, b| a.max(b),
    )
}

/// Computes, for each node of a canonical binary partition tree, the level
/// at which its region disappears according to `attribute`: the minimum
/// extinction value over its children, with leaves forced to zero. This is
/// the persistence used to rank region stability in watershed hierarchies
/// by attribute.
pub fn merge_persistence<T: Float + Send + Sync>(
    tree: &Tree,
    altitudes: &[T],
    attribute: &[T],
) -> Result<Vec<T>, HierarchyError> {
    let extinction = extinction_values(tree, altitudes, attribute)?;
    let mut persistence = accumulate_parallel(tree, &extinction, Accumulator::Min)?;
    for leaf in tree.leaves() {
        persistence[leaf] = T::zero();
    }
    Ok(persistence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accumulate::accumulate_sequential;

    fn fixture() -> (Tree, Vec<f64>, Vec<f64>) {
        let tree = Tree::from_parents(vec![7, 5, 5, 6, 6, 7, 8, 8, 8]).unwrap();
        let altitudes = vec![0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 2.0, 3.0];
        let area = accumulate_sequential(&tree, &[1.0; 5], Accumulator::Sum).unwrap();
        (tree, altitudes, area)
    }

    #[test]
    fn extinction_without_flat_zones() {
        let (tree, altitudes, area) = fixture();
        let extinction = extinction_values(&tree, &altitudes, &area).unwrap();
        assert_eq!(vec![1.0, 1.0, 1.0, 1.0, 1.0, 2.0, 2.0, 3.0, 5.0], extinction);
    }

    #[test]
    fn persistence_is_min_over_children_extinction() {
        let (tree, altitudes, area) = fixture();
        let persistence = merge_persistence(&tree, &altitudes, &area).unwrap();
        assert_eq!(vec![0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 2.0], persistence);
    }

    #[test]
    fn quasi_flat_zone_nodes_contribute_nothing() {
        // Both internal merges happen at altitude 1, so the lower one is not
        // a distinct zone and its area must not feed the extinction pass.
        let tree = Tree::from_parents(vec![3, 3, 4, 4, 4]).unwrap();
        let altitudes = vec![0.0, 0.0, 0.0, 1.0, 1.0];
        let area = vec![1.0, 1.0, 1.0, 2.0, 3.0];
        let extinction = extinction_values(&tree, &altitudes, &area).unwrap();
        assert_eq!(vec![1.0, 1.0, 1.0, 1.0, 3.0], extinction);
        let persistence = merge_persistence(&tree, &altitudes, &area).unwrap();
        assert_eq!(vec![0.0, 0.0, 0.0, 1.0, 1.0], persistence);
    }

    #[test]
    fn non_monotonic_attribute_is_rejected() {
        let (tree, altitudes, mut area) = fixture();
        area[5] = 0.5;
        let result = extinction_values(&tree, &altitudes, &area);
        assert!(matches!(
            result,
            Err(HierarchyError::NonMonotonicAttribute(..))
        ));
    }

    #[test]
    fn length_mismatch_is_rejected() {
        let (tree, altitudes, _) = fixture();
        let result = extinction_values(&tree, &altitudes, &[1.0; 8]);
        assert!(matches!(result, Err(HierarchyError::InvalidInput(..))));
    }
}
