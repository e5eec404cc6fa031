use crate::{HierarchyError, Tree, UndirectedGraph};
use num_traits::Float;

pub(crate) fn check_non_empty(graph: &UndirectedGraph) -> Result<(), HierarchyError> {
    if graph.num_vertices() == 0 {
        return Err(HierarchyError::InvalidInput(String::from(
            "the graph has no vertices",
        )));
    }
    Ok(())
}

/// Checks that an edge-indexed array lines up with the graph and contains
/// only finite values. The builders rely on this so that weight comparisons
/// never see a NaN.
pub(crate) fn check_edge_data<T: Float>(
    graph: &UndirectedGraph,
    data: &[T],
    name: &str,
) -> Result<(), HierarchyError> {
    if data.len() != graph.num_edges() {
        return Err(HierarchyError::InvalidInput(format!(
            "{name} has {} entries but the graph has {} edges",
            data.len(),
            graph.num_edges()
        )));
    }
    for (index, value) in data.iter().enumerate() {
        if !value.is_finite() {
            return Err(HierarchyError::InvalidInput(format!(
                "{name}[{index}] is not finite"
            )));
        }
    }
    Ok(())
}

pub(crate) fn check_node_data_len<T>(
    tree: &Tree,
    data: &[T],
    name: &str,
) -> Result<(), HierarchyError> {
    if data.len() != tree.num_nodes() {
        return Err(HierarchyError::InvalidInput(format!(
            "{name} has {} entries but the tree has {} nodes",
            data.len(),
            tree.num_nodes()
        )));
    }
    Ok(())
}
