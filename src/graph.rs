/// An undirected graph over vertices `0..num_vertices`, stored as an
/// index-addressable edge list.
///
/// This is the minimal read contract the hierarchy builders depend on: a
/// vertex count and a stable, index-addressable iteration over `(source,
/// target)` pairs. Edge weights and values are never stored on the graph;
/// they travel alongside it as plain arrays aligned with the edge indices.
/// The graph is treated as immutable for the duration of a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndirectedGraph {
    num_vertices: usize,
    edges: Vec<(usize, usize)>,
}

impl UndirectedGraph {
    /// Creates a graph with `num_vertices` vertices and no edges.
    pub fn new(num_vertices: usize) -> Self {
        UndirectedGraph {
            num_vertices,
            edges: Vec::new(),
        }
    }

    /// Adds an undirected edge between `source` and `target` and returns its
    /// index. Parallel edges and self loops are permitted; the builders fold
    /// or skip them as appropriate.
    ///
    /// # Panics
    /// Panics if either endpoint is out of range.
    pub fn add_edge(&mut self, source: usize, target: usize) -> usize {
        assert!(
            source < self.num_vertices && target < self.num_vertices,
            "edge ({source}, {target}) out of range for {} vertices",
            self.num_vertices
        );
        self.edges.push((source, target));
        self.edges.len() - 1
    }

    pub fn num_vertices(&self) -> usize {
        self.num_vertices
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// The `(source, target)` pair of the edge at `index`.
    pub fn edge(&self, index: usize) -> (usize, usize) {
        self.edges[index]
    }

    /// Iterates over edges as `(source, target)` pairs in index order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.edges.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_indices_are_stable() {
        let mut g = UndirectedGraph::new(3);
        assert_eq!(0, g.add_edge(0, 1));
        assert_eq!(1, g.add_edge(1, 2));
        assert_eq!(2, g.add_edge(0, 2));
        assert_eq!(3, g.num_edges());
        assert_eq!((1, 2), g.edge(1));
        let collected: Vec<_> = g.edges().collect();
        assert_eq!(vec![(0, 1), (1, 2), (0, 2)], collected);
    }

    #[test]
    #[should_panic]
    fn out_of_range_edge_panics() {
        let mut g = UndirectedGraph::new(2);
        g.add_edge(0, 2);
    }
}
