use crate::validation::check_node_data_len;
use crate::{HierarchyError, Tree};
use num_traits::Float;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Reduction rules used when combining the values of a node's children.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Accumulator {
    Min,
    Max,
    Sum,
    Prod,
    Mean,
    Counter,
}

impl Accumulator {
    /// The result of accumulating an empty set of values: the reduction's
    /// identity (`Mean` and `Counter` give zero).
    fn empty<T: Float>(self) -> T {
        match self {
            Accumulator::Min => T::infinity(),
            Accumulator::Max => T::neg_infinity(),
            Accumulator::Sum | Accumulator::Mean | Accumulator::Counter => T::zero(),
            Accumulator::Prod => T::one(),
        }
    }

    fn fold<T: Float>(self, acc: T, value: T) -> T {
        match self {
            Accumulator::Min => acc.min(value),
            Accumulator::Max => acc.max(value),
            Accumulator::Sum | Accumulator::Mean => acc + value,
            Accumulator::Prod => acc * value,
            Accumulator::Counter => acc,
        }
    }

    fn finalise<T: Float>(self, acc: T, count: usize) -> T {
        match self {
            Accumulator::Mean if count > 0 => acc / T::from(count).unwrap_or(T::one()),
            Accumulator::Mean => T::zero(),
            Accumulator::Counter => T::from(count).unwrap_or(T::zero()),
            _ => acc,
        }
    }

    fn over<T: Float>(self, values: impl Iterator<Item = T>) -> T {
        let mut acc = self.empty();
        let mut count = 0_usize;
        for value in values {
            acc = self.fold(acc, value);
            count += 1;
        }
        self.finalise(acc, count)
    }
}

/// Accumulates values from the leaves to the root: each leaf takes its entry
/// of `leaf_data`, and each internal node, visited in increasing index
/// order, accumulates the already-computed values of its children.
///
/// The single linear pass is valid because builders guarantee that children
/// always have smaller indices than their parent.
///
/// # Examples
/// ```
/// use parttree::{accumulate_sequential, Accumulator, Tree};
///
/// let tree = Tree::from_parents(vec![5, 5, 6, 6, 6, 7, 7, 7]).unwrap();
/// let out = accumulate_sequential(&tree, &[1.0; 5], Accumulator::Sum).unwrap();
/// assert_eq!(vec![1.0, 1.0, 1.0, 1.0, 1.0, 2.0, 3.0, 5.0], out);
/// ```
pub fn accumulate_sequential<T: Float>(
    tree: &Tree,
    leaf_data: &[T],
    accumulator: Accumulator,
) -> Result<Vec<T>, HierarchyError> {
    if leaf_data.len() != tree.num_leaves() {
        return Err(HierarchyError::InvalidInput(format!(
            "leaf_data has {} entries but the tree has {} leaves",
            leaf_data.len(),
            tree.num_leaves()
        )));
    }
    let mut out = Vec::with_capacity(tree.num_nodes());
    out.extend_from_slice(leaf_data);
    for node in tree.internal_nodes() {
        let value = accumulator.over(tree.children(node).iter().map(|&child| out[child]));
        out.push(value);
    }
    Ok(out)
}

/// Accumulates, for every node independently, the `input` values of its
/// children. Leaves have no children and receive the accumulator's
/// empty-set value. With the `parallel` feature enabled the node loop runs
/// on the rayon thread pool; children values are read-only, so nodes are
/// independent.
pub fn accumulate_parallel<T: Float + Send + Sync>(
    tree: &Tree,
    input: &[T],
    accumulator: Accumulator,
) -> Result<Vec<T>, HierarchyError> {
    check_node_data_len(tree, input, "input")?;
    let node_value = |node: usize| {
        accumulator.over(tree.children(node).iter().map(|&child| input[child]))
    };
    #[cfg(feature = "parallel")]
    let out = (0..tree.num_nodes()).into_par_iter().map(node_value).collect();
    #[cfg(not(feature = "parallel"))]
    let out = (0..tree.num_nodes()).map(node_value).collect();
    Ok(out)
}

/// Leaf-to-root accumulation where each internal node's result is
/// `combine(input[node], accumulated children)`. This is the original
/// accumulate-and-combine family (`combine` = max, min, add, multiply);
/// extinction computation uses it with max.
pub fn accumulate_and_combine_sequential<T, F>(
    tree: &Tree,
    input: &[T],
    leaf_data: &[T],
    accumulator: Accumulator,
    combine: F,
) -> Result<Vec<T>, HierarchyError>
where
    T: Float,
    F: Fn(T, T) -> T,
{
    check_node_data_len(tree, input, "input")?;
    if leaf_data.len() != tree.num_leaves() {
        return Err(HierarchyError::InvalidInput(format!(
            "leaf_data has {} entries but the tree has {} leaves",
            leaf_data.len(),
            tree.num_leaves()
        )));
    }
    let mut out = Vec::with_capacity(tree.num_nodes());
    out.extend_from_slice(leaf_data);
    for node in tree.internal_nodes() {
        let accumulated =
            accumulator.over(tree.children(node).iter().map(|&child| out[child]));
        out.push(combine(input[node], accumulated));
    }
    Ok(out)
}

/// Conditionally propagates parent values down the tree, one level at a
/// time: `out[i] = input[parent(i)]` where `condition[i]` holds, else
/// `input[i]`. The root is its own parent, so a flagged root keeps its
/// input value.
pub fn propagate_parallel<T: Float>(
    tree: &Tree,
    input: &[T],
    condition: &[bool],
) -> Result<Vec<T>, HierarchyError> {
    check_node_data_len(tree, input, "input")?;
    check_node_data_len(tree, condition, "condition")?;
    Ok((0..tree.num_nodes())
        .map(|node| {
            if condition[node] {
                input[tree.parent(node)]
            } else {
                input[node]
            }
        })
        .collect())
}

/// Conditionally propagates values from the root towards the leaves:
/// processing nodes in decreasing index order, `out[i] =
/// out[parent(i)]` where `condition[i]` holds, else `input[i]`. Unlike
/// [`propagate_parallel`], a chain of flagged nodes inherits from the first
/// unflagged ancestor.
pub fn propagate_sequential<T: Float>(
    tree: &Tree,
    input: &[T],
    condition: &[bool],
) -> Result<Vec<T>, HierarchyError> {
    check_node_data_len(tree, input, "input")?;
    check_node_data_len(tree, condition, "condition")?;
    let mut out = input.to_vec();
    for node in (0..tree.num_nodes()).rev() {
        if condition[node] {
            out[node] = out[tree.parent(node)];
        }
    }
    Ok(out)
}
