/*
 * SPDX-FileCopyrightText: 2026 Dense Top Sort Contributors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

Random access to a graph represented by a square adjacency matrix.

An [`AdjacencyMatrix`] exposes, for each ordered pair of nodes `(src, dst)`,
the number of arcs from `src` to `dst` (their _multiplicity_). Nodes are
numbered from zero to [`num_nodes`](AdjacencyMatrix::num_nodes) (excluded).
The diagonal is not part of the arc set: implementations must return zero
for `multiplicity(x, x)`, and algorithms never read it.

*/

use impl_tools::autoimpl;

/// A graph given by a dense square matrix of arc multiplicities.
#[autoimpl(for<S: trait + ?Sized> &S, &mut S)]
pub trait AdjacencyMatrix {
    /// Returns the number of nodes, that is, the side of the matrix.
    fn num_nodes(&self) -> usize;

    /// Returns the number of arcs from `src` to `dst`.
    ///
    /// # Panics
    ///
    /// Implementations may panic if either node is out of range.
    fn multiplicity(&self, src: usize, dst: usize) -> usize;

    /// Returns whether there is at least one arc from `src` to `dst`.
    #[inline(always)]
    fn has_arc(&self, src: usize, dst: usize) -> bool {
        src != dst && self.multiplicity(src, dst) != 0
    }

    /// Returns the number of arcs entering `node`, counted with multiplicity,
    /// or [`None`] if the count overflows a [`usize`].
    fn checked_indegree(&self, node: usize) -> Option<usize> {
        (0..self.num_nodes())
            .filter(|&src| src != node)
            .try_fold(0_usize, |acc, src| acc.checked_add(self.multiplicity(src, node)))
    }

    /// Returns the number of arcs leaving `node`, counted with multiplicity,
    /// or [`None`] if the count overflows a [`usize`].
    fn checked_outdegree(&self, node: usize) -> Option<usize> {
        (0..self.num_nodes())
            .filter(|&dst| dst != node)
            .try_fold(0_usize, |acc, dst| acc.checked_add(self.multiplicity(node, dst)))
    }

    /// Returns the number of arcs entering `node`, counted with multiplicity.
    ///
    /// # Panics
    ///
    /// This method will panic if the count overflows a [`usize`].
    fn indegree(&self, node: usize) -> usize {
        self.checked_indegree(node)
            .unwrap_or_else(|| panic!("The in-degree of node {node} overflows"))
    }

    /// Returns the number of arcs leaving `node`, counted with multiplicity.
    ///
    /// # Panics
    ///
    /// This method will panic if the count overflows a [`usize`].
    fn outdegree(&self, node: usize) -> usize {
        self.checked_outdegree(node)
            .unwrap_or_else(|| panic!("The out-degree of node {node} overflows"))
    }
}
