use crate::union_find::UnionFind;
use crate::validation::{check_edge_data, check_non_empty};
use crate::{HierarchyError, Tree, UndirectedGraph};
use num_traits::Float;
use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap};

/// A tree and its altitudes, as produced by the agglomerative builders.
pub struct BinaryPartitionTree<T> {
    pub tree: Tree,
    pub altitudes: Vec<T>,
}

/// Cached statistics describing all graph edges crossing between two live
/// regions, sufficient to produce the region-pair distance and to combine
/// with another pair's statistics after a merge.
trait LinkageStats<T>: Copy {
    fn distance(&self) -> T;
    fn combine(self, other: Self) -> Self;
}

#[derive(Copy, Clone)]
struct CompleteStats<T> {
    max_weight: T,
}

impl<T: Float> LinkageStats<T> for CompleteStats<T> {
    fn distance(&self) -> T {
        self.max_weight
    }

    fn combine(self, other: Self) -> Self {
        CompleteStats {
            max_weight: self.max_weight.max(other.max_weight),
        }
    }
}

#[derive(Copy, Clone)]
struct AverageStats<T> {
    weighted_sum: T,
    weight_sum: T,
}

impl<T: Float> LinkageStats<T> for AverageStats<T> {
    fn distance(&self) -> T {
        self.weighted_sum / self.weight_sum
    }

    fn combine(self, other: Self) -> Self {
        AverageStats {
            weighted_sum: self.weighted_sum + other.weighted_sum,
            weight_sum: self.weight_sum + other.weight_sum,
        }
    }
}

/// A candidate region pair in the merge queue. Ordered by distance, ties
/// broken by the lower then the higher region id so that pop order is a
/// fixed total order and repeated runs produce identical trees.
struct Candidate<T> {
    distance: T,
    lower: usize,
    higher: usize,
}

impl<T: Float> PartialEq for Candidate<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T: Float> Eq for Candidate<T> {}

impl<T: Float> PartialOrd for Candidate<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Float> Ord for Candidate<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Distances are validated finite before they reach the queue.
        self.distance
            .partial_cmp(&other.distance)
            .unwrap_or(Ordering::Equal)
            .then(self.lower.cmp(&other.lower))
            .then(self.higher.cmp(&other.higher))
    }
}

/// Computes a binary partition tree with complete linkage: the distance
/// between two regions is the maximum weight over all graph edges with one
/// endpoint in each.
///
/// # Examples
/// ```
/// use parttree::{binary_partition_tree_complete_linkage, UndirectedGraph};
///
/// let mut graph = UndirectedGraph::new(3);
/// graph.add_edge(0, 1);
/// graph.add_edge(1, 2);
/// graph.add_edge(0, 2);
/// let weights = vec![1.0, 4.0, 6.0];
///
/// let bpt = binary_partition_tree_complete_linkage(&graph, &weights).unwrap();
/// assert_eq!(&[3, 3, 4, 4, 4], bpt.tree.parents());
/// assert_eq!(vec![0.0, 0.0, 0.0, 1.0, 6.0], bpt.altitudes);
/// ```
pub fn binary_partition_tree_complete_linkage<T: Float>(
    graph: &UndirectedGraph,
    edge_weights: &[T],
) -> Result<BinaryPartitionTree<T>, HierarchyError> {
    check_non_empty(graph)?;
    check_edge_data(graph, edge_weights, "edge_weights")?;
    agglomerate(graph, |edge_index| CompleteStats {
        max_weight: edge_weights[edge_index],
    })
}

/// Computes a binary partition tree with average linkage: the distance
/// between two regions is the mean of the crossing edges' values, weighted
/// by the crossing edges' weights. Each region pair carries running
/// numerator and denominator sums so the distance is recomputed after a
/// merge without rescanning leaves.
///
/// Weights must be strictly positive so that every candidate distance has a
/// non-zero denominator.
pub fn binary_partition_tree_average_linkage<T: Float>(
    graph: &UndirectedGraph,
    edge_values: &[T],
    edge_weights: &[T],
) -> Result<BinaryPartitionTree<T>, HierarchyError> {
    check_non_empty(graph)?;
    check_edge_data(graph, edge_values, "edge_values")?;
    check_edge_data(graph, edge_weights, "edge_weights")?;
    if let Some(index) = edge_weights.iter().position(|w| *w <= T::zero()) {
        return Err(HierarchyError::InvalidInput(format!(
            "edge_weights[{index}] must be strictly positive for average linkage"
        )));
    }
    agglomerate(graph, |edge_index| AverageStats {
        weighted_sum: edge_values[edge_index] * edge_weights[edge_index],
        weight_sum: edge_weights[edge_index],
    })
}

/// Shared agglomerative merge loop. Regions are identified by their tree
/// node index; each live region owns a map from neighbouring region id to
/// the cached pair statistics. The queue is never purged eagerly: a popped
/// candidate is acted on only if both of its regions are still the top node
/// of their union-find set.
fn agglomerate<T, S, F>(
    graph: &UndirectedGraph,
    edge_stats: F,
) -> Result<BinaryPartitionTree<T>, HierarchyError>
where
    T: Float,
    S: LinkageStats<T>,
    F: Fn(usize) -> S,
{
    let num_vertices = graph.num_vertices();
    let num_nodes = 2 * num_vertices - 1;

    let mut neighbours: Vec<HashMap<usize, S>> = vec![HashMap::new(); num_nodes];
    for edge_index in 0..graph.num_edges() {
        let (source, target) = graph.edge(edge_index);
        if source == target {
            continue;
        }
        let stats = edge_stats(edge_index);
        // Parallel edges between the same vertices fold into one statistic.
        merge_entry(&mut neighbours[source], target, stats);
        merge_entry(&mut neighbours[target], source, stats);
    }

    let mut queue = BinaryHeap::new();
    for region in 0..num_vertices {
        for (&neighbour, stats) in &neighbours[region] {
            if region < neighbour {
                queue.push(Reverse(Candidate {
                    distance: stats.distance(),
                    lower: region,
                    higher: neighbour,
                }));
            }
        }
    }

    let mut union_find = UnionFind::new(num_nodes);
    // Maps a set representative to the top tree node of that set's region; a
    // region id is live exactly when it is its own set's top node.
    let mut set_node: Vec<usize> = (0..num_nodes).collect();
    let mut parents: Vec<usize> = (0..num_vertices).collect();
    let mut altitudes = vec![T::zero(); num_vertices];

    for new_node in num_vertices..num_nodes {
        let (distance, region_a, region_b) = loop {
            let Some(Reverse(candidate)) = queue.pop() else {
                return Err(HierarchyError::DisconnectedGraph(format!(
                    "merging stalled with {} regions remaining",
                    num_nodes - new_node + 1
                )));
            };
            let (a, b) = (candidate.lower, candidate.higher);
            let live_a = set_node[union_find.find(a)] == a;
            let live_b = set_node[union_find.find(b)] == b;
            if live_a && live_b {
                break (candidate.distance, a, b);
            }
            // Stale entry: at least one region has since been merged away.
        };

        parents[region_a] = new_node;
        parents[region_b] = new_node;
        parents.push(new_node);
        altitudes.push(distance);
        let rep = union_find.union(region_a, region_b);
        let rep = union_find.union(rep, new_node);
        set_node[rep] = new_node;

        // Fold the two neighbour maps, smaller into larger, dropping the
        // entries that referred to the pair just merged.
        let map_a = std::mem::take(&mut neighbours[region_a]);
        let map_b = std::mem::take(&mut neighbours[region_b]);
        let (mut merged, other) = if map_a.len() >= map_b.len() {
            (map_a, map_b)
        } else {
            (map_b, map_a)
        };
        merged.remove(&region_a);
        merged.remove(&region_b);
        for (neighbour, stats) in other {
            if neighbour == region_a || neighbour == region_b {
                continue;
            }
            merge_entry(&mut merged, neighbour, stats);
        }

        for (&neighbour, stats) in &merged {
            let map = &mut neighbours[neighbour];
            map.remove(&region_a);
            map.remove(&region_b);
            map.insert(new_node, *stats);
            queue.push(Reverse(Candidate {
                distance: stats.distance(),
                lower: neighbour.min(new_node),
                higher: neighbour.max(new_node),
            }));
        }
        neighbours[new_node] = merged;
    }

    let tree = Tree::from_parents(parents)?;
    Ok(BinaryPartitionTree { tree, altitudes })
}

fn merge_entry<T, S: LinkageStats<T>>(map: &mut HashMap<usize, S>, key: usize, stats: S) {
    match map.get(&key) {
        Some(existing) => {
            let combined = existing.combine(stats);
            map.insert(key, combined);
        }
        None => {
            map.insert(key, stats);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture_graph() -> (UndirectedGraph, Vec<f64>) {
        let mut graph = UndirectedGraph::new(5);
        graph.add_edge(0, 1);
        graph.add_edge(0, 2);
        graph.add_edge(1, 2);
        graph.add_edge(2, 3);
        graph.add_edge(3, 4);
        graph.add_edge(1, 4);
        (graph, vec![1.0, 7.0, 2.0, 3.0, 1.0, 9.0])
    }

    #[test]
    fn complete_linkage() {
        let (graph, weights) = fixture_graph();
        let bpt = binary_partition_tree_complete_linkage(&graph, &weights).unwrap();
        assert_eq!(&[5, 5, 7, 6, 6, 8, 7, 8, 8], bpt.tree.parents());
        assert_eq!(
            vec![0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 3.0, 9.0],
            bpt.altitudes
        );
    }

    #[test]
    fn average_linkage() {
        let (graph, weights) = fixture_graph();
        // Values equal to weights: the final merge averages the crossing
        // edges (0,2), (1,2) and (1,4): (49 + 4 + 81) / (7 + 2 + 9).
        let bpt = binary_partition_tree_average_linkage(&graph, &weights, &weights).unwrap();
        assert_eq!(&[5, 5, 7, 6, 6, 8, 7, 8, 8], bpt.tree.parents());
        assert_eq!(
            vec![0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 3.0],
            bpt.altitudes[..8].to_vec()
        );
        assert!((bpt.altitudes[8] - 134.0 / 18.0).abs() < 1e-12);
    }

    #[test]
    fn average_linkage_rejects_non_positive_weights() {
        let (graph, weights) = fixture_graph();
        let mut bad = weights.clone();
        bad[3] = 0.0;
        let result = binary_partition_tree_average_linkage(&graph, &weights, &bad);
        assert!(matches!(result, Err(HierarchyError::InvalidInput(..))));
    }

    #[test]
    fn disconnected_graph_is_rejected() {
        let mut graph = UndirectedGraph::new(4);
        graph.add_edge(0, 1);
        graph.add_edge(2, 3);
        let result = binary_partition_tree_complete_linkage(&graph, &[1.0, 2.0]);
        assert!(matches!(result, Err(HierarchyError::DisconnectedGraph(..))));
    }

    #[test]
    fn single_vertex_graph() {
        let graph = UndirectedGraph::new(1);
        let bpt = binary_partition_tree_complete_linkage::<f64>(&graph, &[]).unwrap();
        assert_eq!(1, bpt.tree.num_nodes());
    }

    #[test]
    fn parallel_edges_fold_into_one_statistic() {
        let mut graph = UndirectedGraph::new(2);
        graph.add_edge(0, 1);
        graph.add_edge(0, 1);
        let bpt = binary_partition_tree_complete_linkage(&graph, &[2.0, 5.0]).unwrap();
        assert_eq!(vec![0.0, 0.0, 5.0], bpt.altitudes);
    }
}
