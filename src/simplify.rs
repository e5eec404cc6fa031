use crate::{HierarchyError, Tree};

/// A simplified tree together with the map back to the source tree:
/// `node_map[i]` is the index in the source tree of the simplified tree's
/// node `i`. The map is owned by the result and read-only after creation.
pub struct SimplifiedTree {
    pub tree: Tree,
    pub node_map: Vec<usize>,
}

/// Builds a copy of `tree` with the nodes marked in `deleted` elided: the
/// children of a deleted node are reattached to its nearest kept ancestor,
/// and the kept nodes are renumbered densely preserving their relative
/// order. The source tree is never mutated.
///
/// Leaves and the root are not deletable; a mask that marks either, or whose
/// length disagrees with the tree's node count, is rejected with
/// [`HierarchyError::InvalidDeletionMask`].
///
/// # Examples
/// ```
/// use parttree::{simplify_tree, Tree};
///
/// let tree = Tree::from_parents(vec![5, 5, 6, 6, 6, 7, 7, 7]).unwrap();
/// let mut deleted = vec![false; 8];
/// deleted[6] = true;
///
/// let simplified = simplify_tree(&tree, &deleted).unwrap();
/// assert_eq!(&[5, 5, 6, 6, 6, 6, 6], simplified.tree.parents());
/// assert_eq!(vec![0, 1, 2, 3, 4, 5, 7], simplified.node_map);
/// ```
pub fn simplify_tree(tree: &Tree, deleted: &[bool]) -> Result<SimplifiedTree, HierarchyError> {
    let num_nodes = tree.num_nodes();
    if deleted.len() != num_nodes {
        return Err(HierarchyError::InvalidDeletionMask(format!(
            "mask has {} entries but the tree has {num_nodes} nodes",
            deleted.len()
        )));
    }
    if let Some(leaf) = tree.leaves().find(|&leaf| deleted[leaf]) {
        return Err(HierarchyError::InvalidDeletionMask(format!(
            "leaf {leaf} cannot be deleted"
        )));
    }
    if deleted[tree.root()] {
        return Err(HierarchyError::InvalidDeletionMask(String::from(
            "deleting the root would leave no unique root",
        )));
    }

    let mut new_index = vec![usize::MAX; num_nodes];
    let mut node_map = Vec::new();
    for node in 0..num_nodes {
        if !deleted[node] {
            new_index[node] = node_map.len();
            node_map.push(node);
        }
    }

    let mut parents = vec![0_usize; node_map.len()];
    for (new_node, &old_node) in node_map.iter().enumerate() {
        if old_node == tree.root() {
            parents[new_node] = new_node;
            continue;
        }
        // Splice over deleted ancestors; the root is kept, so this stops.
        let mut ancestor = tree.parent(old_node);
        while deleted[ancestor] {
            ancestor = tree.parent(ancestor);
        }
        parents[new_node] = new_index[ancestor];
    }

    let tree = Tree::from_parents(parents)?;
    Ok(SimplifiedTree { tree, node_map })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> Tree {
        Tree::from_parents(vec![5, 5, 6, 6, 6, 7, 7, 7]).unwrap()
    }

    #[test]
    fn empty_mask_is_identity() {
        let tree = fixture();
        let simplified = simplify_tree(&tree, &[false; 8]).unwrap();
        assert_eq!(tree.parents(), simplified.tree.parents());
        assert_eq!((0..8).collect::<Vec<_>>(), simplified.node_map);
    }

    #[test]
    fn deleting_a_chain_of_internal_nodes() {
        let tree = Tree::from_parents(vec![4, 4, 5, 6, 5, 6, 7, 7]).unwrap();
        let mut deleted = vec![false; 8];
        deleted[5] = true;
        deleted[6] = true;
        let simplified = simplify_tree(&tree, &deleted).unwrap();
        // 4 keeps its children; 2, 3 and 4 all reattach to the old root.
        assert_eq!(&[4, 4, 5, 5, 5, 5], simplified.tree.parents());
        assert_eq!(vec![0, 1, 2, 3, 4, 7], simplified.node_map);
    }

    #[test]
    fn mask_length_mismatch_is_rejected() {
        let tree = fixture();
        let result = simplify_tree(&tree, &[false; 7]);
        assert!(matches!(
            result,
            Err(HierarchyError::InvalidDeletionMask(..))
        ));
    }

    #[test]
    fn deleting_a_leaf_is_rejected() {
        let tree = fixture();
        let mut deleted = vec![false; 8];
        deleted[2] = true;
        let result = simplify_tree(&tree, &deleted);
        assert!(matches!(
            result,
            Err(HierarchyError::InvalidDeletionMask(..))
        ));
    }

    #[test]
    fn deleting_the_root_is_rejected() {
        let tree = fixture();
        let mut deleted = vec![false; 8];
        deleted[7] = true;
        let result = simplify_tree(&tree, &deleted);
        assert!(matches!(
            result,
            Err(HierarchyError::InvalidDeletionMask(..))
        ));
    }
}
