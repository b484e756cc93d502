//! Pattern orientation: unshielded colliders, Meek rules R1–R3 and the
//! Dor–Tarsi extension to a DAG.

use tracing::debug;

use crate::graph::Orientation;

use super::skeleton::Skeleton;

/// Partially directed graph over variable positions.
///
/// An adjacent pair is either undirected or directed one way; orienting a
/// pair that is already directed the other way is refused.
#[derive(Debug, Clone)]
pub struct Pdag {
    adjacency: Vec<Vec<bool>>,
    marks: Vec<Vec<Option<Orientation>>>,
}

impl Pdag {
    /// Fully undirected pattern over the skeleton's edges.
    pub fn from_skeleton(skeleton: &Skeleton) -> Self {
        let n = skeleton.n_vars();
        let adjacency = (0..n)
            .map(|i| (0..n).map(|j| skeleton.is_adjacent(i, j)).collect())
            .collect();
        Self {
            adjacency,
            marks: vec![vec![None; n]; n],
        }
    }

    pub fn n_vars(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_adjacent(&self, i: usize, j: usize) -> bool {
        self.adjacency[i][j]
    }

    /// `i → j` is oriented.
    pub fn is_directed(&self, i: usize, j: usize) -> bool {
        self.marks[i][j].is_some()
    }

    /// `i — j` is adjacent and not yet oriented.
    pub fn is_undirected(&self, i: usize, j: usize) -> bool {
        self.adjacency[i][j] && !self.is_directed(i, j) && !self.is_directed(j, i)
    }

    /// Orient `i → j`. Returns whether the pattern changed.
    pub fn orient(&mut self, i: usize, j: usize, how: Orientation) -> bool {
        if !self.is_undirected(i, j) {
            return false;
        }
        self.marks[i][j] = Some(how);
        true
    }

    /// Every oriented edge `(i, j, how)` in row-major order.
    pub fn directed_edges(&self) -> Vec<(usize, usize, Orientation)> {
        let n = self.n_vars();
        (0..n)
            .flat_map(|i| (0..n).map(move |j| (i, j)))
            .filter_map(|(i, j)| self.marks[i][j].map(|how| (i, j, how)))
            .collect()
    }

    /// Whether any pair is still undirected.
    pub fn has_undirected(&self) -> bool {
        let n = self.n_vars();
        (0..n).any(|i| ((i + 1)..n).any(|j| self.is_undirected(i, j)))
    }
}

/// Orient every unshielded triple `i — k — j` with `k` outside sepset(i, j)
/// as `i → k ← j`. Orientations that contradict an earlier collider are
/// skipped.
pub fn orient_colliders(pdag: &mut Pdag, skeleton: &Skeleton) {
    let n = pdag.n_vars();
    for i in 0..n {
        for j in (i + 1)..n {
            if pdag.is_adjacent(i, j) {
                continue;
            }
            let sepset = skeleton.sepset(i, j).unwrap_or(&[]);
            for k in 0..n {
                if k == i || k == j || !pdag.is_adjacent(i, k) || !pdag.is_adjacent(j, k) {
                    continue;
                }
                if sepset.contains(&k) {
                    continue;
                }
                let left = pdag.orient(i, k, Orientation::Collider);
                let right = pdag.orient(j, k, Orientation::Collider);
                debug!(i, k, j, left, right, "collider");
            }
        }
    }
}

/// Apply Meek rules R1–R3 until no rule fires.
pub fn apply_meek_rules(pdag: &mut Pdag) {
    let n = pdag.n_vars();
    let mut changed = true;
    while changed {
        changed = false;
        for a in 0..n {
            for b in 0..n {
                if a == b || !pdag.is_undirected(a, b) {
                    continue;
                }
                if rule_one(pdag, a, b) || rule_two(pdag, a, b) || rule_three(pdag, a, b) {
                    changed |= pdag.orient(a, b, Orientation::MeekRule);
                }
            }
        }
    }
}

/// R1: `c → a — b` with `c`, `b` non-adjacent forces `a → b`.
fn rule_one(pdag: &Pdag, a: usize, b: usize) -> bool {
    (0..pdag.n_vars())
        .any(|c| c != b && pdag.is_directed(c, a) && !pdag.is_adjacent(c, b))
}

/// R2: `a → c → b` with `a — b` forces `a → b`.
fn rule_two(pdag: &Pdag, a: usize, b: usize) -> bool {
    (0..pdag.n_vars()).any(|c| pdag.is_directed(a, c) && pdag.is_directed(c, b))
}

/// R3: `a — c → b`, `a — d → b`, `c`, `d` non-adjacent forces `a → b`.
fn rule_three(pdag: &Pdag, a: usize, b: usize) -> bool {
    let n = pdag.n_vars();
    let feeders: Vec<usize> = (0..n)
        .filter(|&c| c != b && pdag.is_undirected(a, c) && pdag.is_directed(c, b))
        .collect();
    feeders.iter().enumerate().any(|(pos, &c)| {
        feeders[pos + 1..]
            .iter()
            .any(|&d| !pdag.is_adjacent(c, d))
    })
}

/// Orient the remaining undirected edges without new colliders or cycles.
///
/// Dor–Tarsi: repeatedly pick the lowest-index node that has no outgoing
/// oriented edge among the remaining nodes and whose undirected neighbours
/// are adjacent to all its other neighbours; orient its undirected edges
/// into it and drop it. Returns `false` when no such node exists, leaving
/// the pattern partly extended.
pub fn extend_to_dag(pdag: &mut Pdag) -> bool {
    let n = pdag.n_vars();
    let mut remaining: Vec<bool> = vec![true; n];

    for _ in 0..n {
        let pick = (0..n).find(|&x| remaining[x] && is_removable_sink(pdag, &remaining, x));
        let Some(x) = pick else {
            return !pdag.has_undirected();
        };
        for y in 0..n {
            if remaining[y] && pdag.is_undirected(y, x) {
                pdag.orient(y, x, Orientation::Extension);
            }
        }
        remaining[x] = false;
    }
    true
}

fn is_removable_sink(pdag: &Pdag, remaining: &[bool], x: usize) -> bool {
    let n = pdag.n_vars();
    let live = |y: usize| y != x && remaining[y];

    if (0..n).any(|y| live(y) && pdag.is_directed(x, y)) {
        return false;
    }
    let neighbours: Vec<usize> = (0..n).filter(|&y| live(y) && pdag.is_adjacent(x, y)).collect();
    neighbours
        .iter()
        .filter(|&&y| pdag.is_undirected(x, y))
        .all(|&y| {
            neighbours
                .iter()
                .all(|&z| z == y || pdag.is_adjacent(y, z))
        })
}

/// Orient whatever is still undirected from the lower to the higher
/// position.
pub fn orient_by_position(pdag: &mut Pdag) {
    let n = pdag.n_vars();
    for i in 0..n {
        for j in (i + 1)..n {
            pdag.orient(i, j, Orientation::Extension);
        }
    }
}
