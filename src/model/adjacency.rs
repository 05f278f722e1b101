//! Canonical adjacency representation.
//!
//! Every network is reduced to the same shape before curvature runs: a
//! symmetric 0/1 matrix over contiguous indices assigned by sorting the node
//! labels, plus the sorted list of unique (i < j) edge pairs. `build()` is the
//! only constructor, so the symmetric/zero-diagonal invariant holds for every
//! instance that exists.

use hashbrown::{HashMap, HashSet};
use smallvec::SmallVec;

// ============================================================================
// EdgePair
// ============================================================================

/// Canonical (i < j) index representation of an undirected edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgePair {
    pub i: usize,
    pub j: usize,
}

impl EdgePair {
    /// Canonicalize an index pair. Self-pairs have no canonical form.
    pub fn new(a: usize, b: usize) -> Option<EdgePair> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(EdgePair { i: a, j: b }),
            std::cmp::Ordering::Equal => None,
            std::cmp::Ordering::Greater => Some(EdgePair { i: b, j: a }),
        }
    }
}

// ============================================================================
// Adjacency
// ============================================================================

/// Symmetric binary adjacency matrix with a deterministic node ordering.
///
/// Built fresh per network and discarded after use. Node index `k` refers to
/// the `k`-th label in sorted order; `edge_pairs()` is sorted ascending and
/// deduplicated, so `edge_count()` is invariant under duplicate, reversed, or
/// self-loop rows in the raw edge list.
#[derive(Debug, Clone, PartialEq)]
pub struct Adjacency {
    n: usize,
    matrix: Vec<u8>,
    nodes: Vec<String>,
    edge_pairs: Vec<EdgePair>,
}

impl Adjacency {
    /// Build the canonical matrix from a node set and the raw edge sequence.
    ///
    /// Edges referring to labels outside `nodes` are ignored; self-pairs are
    /// discarded; duplicates collapse to one pair.
    pub fn build<'a, I>(nodes: &HashSet<String>, edges: I) -> Adjacency
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut node_list: Vec<String> = nodes.iter().cloned().collect();
        node_list.sort_unstable();

        let index: HashMap<&str, usize> = node_list
            .iter()
            .enumerate()
            .map(|(i, label)| (label.as_str(), i))
            .collect();

        let n = node_list.len();
        let mut matrix = vec![0u8; n * n];
        let mut seen: HashSet<EdgePair> = HashSet::new();

        for (u, v) in edges {
            let (Some(&i), Some(&j)) = (index.get(u), index.get(v)) else {
                continue;
            };
            let Some(pair) = EdgePair::new(i, j) else {
                continue; // self-loop
            };
            if seen.insert(pair) {
                matrix[pair.i * n + pair.j] = 1;
                matrix[pair.j * n + pair.i] = 1;
            }
        }

        drop(index);

        let mut edge_pairs: Vec<EdgePair> = seen.into_iter().collect();
        edge_pairs.sort_unstable();

        Adjacency { n, matrix, nodes: node_list, edge_pairs }
    }

    pub fn node_count(&self) -> usize {
        self.n
    }

    pub fn edge_count(&self) -> usize {
        self.edge_pairs.len()
    }

    /// Node labels in canonical (sorted) order; index `k` ↔ `nodes()[k]`.
    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    /// Unique edge pairs, sorted ascending.
    pub fn edge_pairs(&self) -> &[EdgePair] {
        &self.edge_pairs
    }

    pub fn has_edge(&self, i: usize, j: usize) -> bool {
        i < self.n && j < self.n && self.matrix[i * self.n + j] != 0
    }

    /// Raw matrix entry, 0 or 1.
    pub fn get(&self, i: usize, j: usize) -> u8 {
        self.matrix[i * self.n + j]
    }

    pub fn degree(&self, i: usize) -> usize {
        self.row(i).iter().map(|&b| b as usize).sum()
    }

    /// Neighbor indices of node `i`, ascending.
    pub fn neighbors(&self, i: usize) -> SmallVec<[usize; 8]> {
        self.row(i)
            .iter()
            .enumerate()
            .filter(|&(_, &b)| b != 0)
            .map(|(j, _)| j)
            .collect()
    }

    /// Invariant check: `A[i][j] == A[j][i]` and zero diagonal.
    pub fn is_symmetric(&self) -> bool {
        for i in 0..self.n {
            if self.matrix[i * self.n + i] != 0 {
                return false;
            }
            for j in (i + 1)..self.n {
                if self.matrix[i * self.n + j] != self.matrix[j * self.n + i] {
                    return false;
                }
            }
        }
        true
    }

    fn row(&self, i: usize) -> &[u8] {
        &self.matrix[i * self.n..(i + 1) * self.n]
    }
}

// ============================================================================
// Tests
// ============================================================================
