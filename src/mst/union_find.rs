//! Disjoint-set forest over `0..n`.

/// Union-find with path compression and union by size.
///
/// # Examples
///
/// ```
/// use u_itinerary::mst::DisjointSet;
///
/// let mut set = DisjointSet::new(4);
/// assert!(set.union(0, 1));
/// assert!(set.union(2, 3));
/// assert!(!set.union(1, 0));
/// assert_eq!(set.components(), 2);
/// assert!(set.connected(0, 1));
/// assert!(!set.connected(1, 2));
/// ```
#[derive(Debug, Clone)]
pub struct DisjointSet {
    parent: Vec<usize>,
    size: Vec<usize>,
    components: usize,
}

impl DisjointSet {
    /// Creates `n` singleton sets.
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
            components: n,
        }
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Representative of `x`'s set. Compresses the path on the way.
    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut node = x;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }
        root
    }

    /// Merges the sets of `a` and `b`. Returns `false` if they were
    /// already joined.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let (mut ra, mut rb) = (self.find(a), self.find(b));
        if ra == rb {
            return false;
        }
        if self.size[ra] < self.size[rb] {
            std::mem::swap(&mut ra, &mut rb);
        }
        self.parent[rb] = ra;
        self.size[ra] += self.size[rb];
        self.components -= 1;
        true
    }

    pub fn connected(&mut self, a: usize, b: usize) -> bool {
        self.find(a) == self.find(b)
    }

    /// Number of disjoint sets.
    pub fn components(&self) -> usize {
        self.components
    }

    /// Size of the set containing `x`.
    pub fn set_size(&mut self, x: usize) -> usize {
        let root = self.find(x);
        self.size[root]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_singletons() {
        let mut set = DisjointSet::new(3);
        assert_eq!(set.components(), 3);
        for i in 0..3 {
            assert_eq!(set.find(i), i);
            assert_eq!(set.set_size(i), 1);
        }
    }

    #[test]
    fn test_chain_compresses() {
        let mut set = DisjointSet::new(6);
        for i in 0..5 {
            assert!(set.union(i, i + 1));
        }
        assert_eq!(set.components(), 1);
        assert_eq!(set.set_size(3), 6);
        let root = set.find(5);
        assert!((0..6).all(|i| set.find(i) == root));
        assert!((0..6).all(|i| set.parent[i] == root));
    }

    #[test]
    fn test_union_by_size_keeps_larger_root() {
        let mut set = DisjointSet::new(4);
        set.union(0, 1);
        set.union(0, 2);
        let big = set.find(0);
        set.union(3, 0);
        assert_eq!(set.find(3), big);
    }

    #[test]
    fn test_empty() {
        let set = DisjointSet::new(0);
        assert!(set.is_empty());
        assert_eq!(set.components(), 0);
    }
}
