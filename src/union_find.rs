/// Disjoint-set forest with path compression and union by size.
///
/// Indices out of range are an internal-consistency error and panic; callers
/// are expected to validate element indices before touching the forest.
pub struct UnionFind {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl UnionFind {
    /// Initialises `n` singleton sets, one per element `0..n`.
    pub fn new(n: usize) -> Self {
        UnionFind {
            parent: (0..n).collect(),
            size: vec![1; n],
        }
    }

    /// Returns the representative of the set containing `x`, compressing the
    /// path from `x` to the root as a side effect.
    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut current = x;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }
        root
    }

    /// Merges the sets containing `x` and `y` and returns the representative
    /// of the merged set. After this call, `find` on any element of either
    /// original set returns that representative.
    pub fn union(&mut self, x: usize, y: usize) -> usize {
        let mut a = self.find(x);
        let mut b = self.find(y);
        if a == b {
            return a;
        }
        if self.size[a] < self.size[b] {
            std::mem::swap(&mut a, &mut b);
        }
        self.parent[b] = a;
        self.size[a] += self.size[b];
        a
    }

    /// The number of elements in the set whose representative is `x`.
    pub fn size_of(&self, x: usize) -> usize {
        self.size[x]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_merges_and_find_agrees() {
        let mut uf = UnionFind::new(5);
        let r = uf.union(0, 1);
        assert_eq!(r, uf.find(0));
        assert_eq!(r, uf.find(1));
        assert_eq!(2, uf.size_of(r));

        let r2 = uf.union(1, 2);
        assert_eq!(r2, uf.find(0));
        assert_eq!(r2, uf.find(2));
        assert_eq!(3, uf.size_of(r2));
        assert_ne!(uf.find(3), uf.find(4));
    }

    #[test]
    fn union_of_same_set_is_a_no_op() {
        let mut uf = UnionFind::new(3);
        let r = uf.union(0, 1);
        assert_eq!(r, uf.union(0, 1));
        assert_eq!(2, uf.size_of(r));
    }

    #[test]
    #[should_panic]
    fn out_of_range_find_panics() {
        let mut uf = UnionFind::new(2);
        uf.find(2);
    }
}
