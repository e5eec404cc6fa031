use crate::HierarchyError;

/// A hierarchy over `num_leaves` graph vertices.
///
/// Leaves occupy indices `0..num_leaves`, internal nodes follow, and every
/// node's parent index is strictly greater than its own except for the root,
/// which is the last node and its own parent. Index order is therefore a
/// topological order: children always precede parents, which the sequential
/// accumulation pass relies on for a single linear sweep.
///
/// Trees are immutable once constructed. Children lists are derived from the
/// parent array at construction and cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    num_leaves: usize,
    parents: Vec<usize>,
    child_starts: Vec<usize>,
    children: Vec<usize>,
}

impl Tree {
    /// Builds a tree from a parent array, validating the structural
    /// invariants: the last node is the root and its own parent, every other
    /// node points to a strictly greater index, and the childless nodes (the
    /// leaves) form the index prefix.
    pub fn from_parents(parents: Vec<usize>) -> Result<Self, HierarchyError> {
        let num_nodes = parents.len();
        if num_nodes == 0 {
            return Err(HierarchyError::InvalidInput(String::from(
                "parent array is empty",
            )));
        }
        let root = num_nodes - 1;
        if parents[root] != root {
            return Err(HierarchyError::InvalidInput(format!(
                "root node {root} must be its own parent, found {}",
                parents[root]
            )));
        }
        for (node, &parent) in parents.iter().enumerate().take(root) {
            if parent <= node || parent >= num_nodes {
                return Err(HierarchyError::InvalidInput(format!(
                    "node {node} has parent {parent}; parents must be strictly \
                     increasing and in range"
                )));
            }
        }

        let mut child_counts = vec![0_usize; num_nodes];
        for &parent in parents.iter().take(root) {
            child_counts[parent] += 1;
        }
        let num_leaves = child_counts.iter().take_while(|&&c| c == 0).count();
        if child_counts[num_leaves..].iter().any(|&c| c == 0) {
            return Err(HierarchyError::InvalidInput(String::from(
                "leaves must form the index prefix of the node array",
            )));
        }

        let mut child_starts = vec![0_usize; num_nodes + 1];
        for (node, &count) in child_counts.iter().enumerate() {
            child_starts[node + 1] = child_starts[node] + count;
        }
        let mut cursor = child_starts.clone();
        let mut children = vec![0_usize; child_starts[num_nodes]];
        for (node, &parent) in parents.iter().enumerate().take(root) {
            children[cursor[parent]] = node;
            cursor[parent] += 1;
        }

        Ok(Tree {
            num_leaves,
            parents,
            child_starts,
            children,
        })
    }

    pub fn num_nodes(&self) -> usize {
        self.parents.len()
    }

    pub fn num_leaves(&self) -> usize {
        self.num_leaves
    }

    pub fn root(&self) -> usize {
        self.parents.len() - 1
    }

    pub fn parent(&self, node: usize) -> usize {
        self.parents[node]
    }

    pub fn parents(&self) -> &[usize] {
        &self.parents
    }

    pub fn is_leaf(&self, node: usize) -> bool {
        node < self.num_leaves
    }

    /// The children of `node`, in increasing index order.
    pub fn children(&self, node: usize) -> &[usize] {
        &self.children[self.child_starts[node]..self.child_starts[node + 1]]
    }

    /// Leaf indices, `0..num_leaves`.
    pub fn leaves(&self) -> std::ops::Range<usize> {
        0..self.num_leaves
    }

    /// Internal node indices in topological (increasing) order.
    pub fn internal_nodes(&self) -> std::ops::Range<usize> {
        self.num_leaves..self.parents.len()
    }

    /// Iterates over `node` and its ancestors up to and including the root.
    pub fn ancestors(&self, node: usize) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            current: Some(node),
        }
    }

    /// The lowest common ancestor of two nodes.
    ///
    /// Walks the two ancestor chains in lockstep, always advancing the node
    /// with the smaller index; since parent indices are strictly greater than
    /// child indices, the chains meet exactly at the LCA.
    pub fn lowest_common_ancestor(&self, mut a: usize, mut b: usize) -> usize {
        while a != b {
            if a < b {
                a = self.parents[a];
            } else {
                b = self.parents[b];
            }
        }
        a
    }

    /// Computes the LCA node index for each `(a, b)` pair. Fails if any pair
    /// references a node out of range.
    pub fn lca_map(&self, pairs: &[(usize, usize)]) -> Result<Vec<usize>, HierarchyError> {
        let num_nodes = self.num_nodes();
        for &(a, b) in pairs {
            if a >= num_nodes || b >= num_nodes {
                return Err(HierarchyError::InvalidInput(format!(
                    "LCA pair ({a}, {b}) out of range for {num_nodes} nodes"
                )));
            }
        }
        Ok(pairs
            .iter()
            .map(|&(a, b)| self.lowest_common_ancestor(a, b))
            .collect())
    }
}

/// Iterator over a node and its ancestor chain, root included.
pub struct Ancestors<'a> {
    tree: &'a Tree,
    current: Option<usize>,
}

impl Iterator for Ancestors<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let node = self.current?;
        let parent = self.tree.parents[node];
        self.current = if parent == node { None } else { Some(parent) };
        Some(node)
    }
}
