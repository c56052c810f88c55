/*
 * SPDX-FileCopyrightText: 2026 Dense Top Sort Contributors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use rand::{rngs::SmallRng, seq::SliceRandom, Rng, SeedableRng};

use super::dense_graph::DenseGraph;

/// Random directed acyclic graphs with a hidden topological order.
///
/// The generator draws a random permutation π of the nodes and then includes
/// each arc π\[_i_\] → π\[_j_\], with _i_ < _j_, independently with
/// probability `p`. The resulting graph is acyclic, and π is one of its
/// topological orders. Since π is random, nodes with small indices are not
/// favored as sources.
///
/// The same seed always yields the same graph.
#[derive(Debug, Clone)]
pub struct RandomDag {
    n: usize,
    p: f64,
    seed: u64,
}

impl RandomDag {
    /// Creates a new random DAG, given the number of nodes, the probability
    /// of an arc between any two nodes compatible with the hidden order, and a
    /// seed for the [pseudorandom number generator](SmallRng).
    pub fn new(n: usize, p: f64, seed: u64) -> Self {
        assert!((0.0..=1.0).contains(&p), "p must be in [0..1]");
        Self { n, p, seed }
    }

    /// Returns the hidden topological order.
    pub fn hidden_order(&self) -> Box<[usize]> {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        self.permutation(&mut rng)
    }

    /// Builds the graph.
    pub fn graph(&self) -> DenseGraph {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let perm = self.permutation(&mut rng);
        let mut g = DenseGraph::empty(self.n);
        for i in 0..self.n {
            for j in i + 1..self.n {
                if rng.random_bool(self.p) {
                    g.add_arc(perm[i], perm[j]);
                }
            }
        }
        g
    }

    fn permutation(&self, rng: &mut SmallRng) -> Box<[usize]> {
        let mut perm: Box<[usize]> = (0..self.n).collect();
        perm.shuffle(rng);
        perm
    }
}
