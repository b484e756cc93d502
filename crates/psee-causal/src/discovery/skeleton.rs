//! PC-stable adjacency search.

use std::collections::HashMap;

use psee_core::Dataset;
use tracing::debug;

use crate::independence::IndependenceOracle;

/// Undirected skeleton plus the separating set found for every removed pair.
#[derive(Debug, Clone)]
pub struct Skeleton {
    adjacency: Vec<Vec<bool>>,
    sepsets: HashMap<(usize, usize), Vec<usize>>,
}

impl Skeleton {
    /// Complete undirected graph over `n` variables.
    pub fn complete(n: usize) -> Self {
        let adjacency = (0..n)
            .map(|i| (0..n).map(|j| i != j).collect())
            .collect();
        Self {
            adjacency,
            sepsets: HashMap::new(),
        }
    }

    pub fn n_vars(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_adjacent(&self, i: usize, j: usize) -> bool {
        self.adjacency[i][j]
    }

    /// Neighbours of `i` in ascending order.
    pub fn neighbours(&self, i: usize) -> Vec<usize> {
        (0..self.n_vars()).filter(|&j| self.adjacency[i][j]).collect()
    }

    /// Separating set recorded when `i` and `j` were disconnected.
    pub fn sepset(&self, i: usize, j: usize) -> Option<&[usize]> {
        self.sepsets.get(&pair_key(i, j)).map(Vec::as_slice)
    }

    /// Unordered adjacent pairs `(i, j)` with `i < j`.
    pub fn pairs(&self) -> Vec<(usize, usize)> {
        let n = self.n_vars();
        (0..n)
            .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
            .filter(|&(i, j)| self.adjacency[i][j])
            .collect()
    }

    pub(crate) fn remove(&mut self, i: usize, j: usize, sepset: Vec<usize>) {
        self.adjacency[i][j] = false;
        self.adjacency[j][i] = false;
        self.sepsets.insert(pair_key(i, j), sepset);
    }
}

fn pair_key(i: usize, j: usize) -> (usize, usize) {
    (i.min(j), i.max(j))
}

/// Learn the skeleton with the order-independent (stable) PC search.
///
/// Neighbour sets are frozen at the start of every conditioning depth, so
/// the result does not depend on the order pairs are visited. An edge is
/// removed when some conditioning subset gives `p >= alpha`. `alpha <= 0`
/// removes every edge and `alpha >= 1` keeps every edge.
pub fn learn_skeleton(data: &Dataset, alpha: f64, oracle: &IndependenceOracle) -> Skeleton {
    let n = data.n_vars();
    let mut skeleton = Skeleton::complete(n);

    if alpha >= 1.0 {
        return skeleton;
    }
    if alpha <= 0.0 {
        for (i, j) in skeleton.pairs() {
            skeleton.remove(i, j, Vec::new());
        }
        return skeleton;
    }

    let mut depth = 0;
    loop {
        let frozen: Vec<Vec<usize>> = (0..n).map(|i| skeleton.neighbours(i)).collect();
        if frozen.iter().all(|adj| adj.len() <= depth) {
            break;
        }

        for i in 0..n {
            for &j in &frozen[i] {
                if !skeleton.is_adjacent(i, j) {
                    continue;
                }
                let candidates: Vec<usize> =
                    frozen[i].iter().copied().filter(|&k| k != j).collect();
                if candidates.len() < depth {
                    continue;
                }
                for subset in combinations(&candidates, depth) {
                    let p = oracle.test_indices(data, i, j, &subset);
                    if p >= alpha {
                        debug!(
                            x = %data.labels()[i],
                            y = %data.labels()[j],
                            depth,
                            p_value = p,
                            "removing edge"
                        );
                        skeleton.remove(i, j, subset);
                        break;
                    }
                }
            }
        }
        depth += 1;
    }

    skeleton
}

/// All `k`-element subsets of `items`, in lexicographic order.
pub(crate) fn combinations(items: &[usize], k: usize) -> Vec<Vec<usize>> {
    if k == 0 {
        return vec![Vec::new()];
    }
    if items.len() < k {
        return Vec::new();
    }
    let mut out = Vec::new();
    for (pos, &head) in items.iter().enumerate() {
        for mut tail in combinations(&items[pos + 1..], k - 1) {
            tail.insert(0, head);
            out.push(tail);
        }
    }
    out
}
