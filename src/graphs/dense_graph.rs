/*
 * SPDX-FileCopyrightText: 2026 Dense Top Sort Contributors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::traits::AdjacencyMatrix;
use crate::utils::{Matrix, ShapeError};

/// A mutable [`AdjacencyMatrix`] implementation based on a dense square
/// [`Matrix`] of arc multiplicities.
///
/// The diagonal of the matrix is always zero: self-loops cannot be
/// represented. Memory usage is quadratic in the number of nodes, so this
/// structure is suitable only for small or very dense graphs.
///
/// By setting the feature `serde`, this struct can be serialized using
/// [serde](https://crates.io/crates/serde). The serialized form is the
/// underlying [`Matrix`], and deserialization goes through the same checks
/// as the conversion from a `Matrix<usize>`.
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Matrix<usize>", into = "Matrix<usize>")
)]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DenseGraph {
    /// The number of arcs in the graph, counted with multiplicity.
    num_arcs: u64,
    /// The matrix of multiplicities; `matrix[(u, v)]` is the number of arcs
    /// from `u` to `v`.
    matrix: Matrix<usize>,
}

impl core::default::Default for DenseGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl DenseGraph {
    /// Creates a new empty graph.
    pub fn new() -> Self {
        Self::empty(0)
    }

    /// Creates a new graph with `n` nodes and no arcs.
    pub fn empty(n: usize) -> Self {
        Self {
            num_arcs: 0,
            matrix: Matrix::new(n, n),
        }
    }

    /// Creates a new graph from an [`IntoIterator`] of arcs.
    ///
    /// The number of nodes is one plus the largest endpoint. Repeated arcs
    /// increase the multiplicity.
    ///
    /// # Panics
    ///
    /// This method will panic if one of the arcs is a self-loop.
    pub fn from_arcs(arcs: impl IntoIterator<Item = (usize, usize)>) -> Self {
        let arcs: Vec<_> = arcs.into_iter().collect();
        let n = arcs.iter().map(|&(u, v)| u.max(v) + 1).max().unwrap_or(0);
        let mut g = Self::empty(n);
        for (u, v) in arcs {
            g.add_arc(u, v);
        }
        g
    }

    /// Creates a new graph from the rows of an adjacency matrix.
    ///
    /// The entry in row `u` and column `v` is the number of arcs from `u` to
    /// `v`. Diagonal entries are ignored.
    ///
    /// # Errors
    ///
    /// Returns a [`ShapeError`] if the rows do not form a square matrix, if
    /// an off-diagonal entry is negative, or if the in-degree of a node or
    /// the number of arcs overflows.
    pub fn from_rows<R: AsRef<[i64]>>(
        rows: impl IntoIterator<Item = R>,
    ) -> Result<Self, ShapeError> {
        Self::try_from(Matrix::<i64>::from_rows(rows)?)
    }

    /// Returns the number of nodes.
    #[inline(always)]
    pub fn num_nodes(&self) -> usize {
        self.matrix.num_rows()
    }

    /// Returns the number of arcs, counted with multiplicity.
    #[inline(always)]
    pub fn num_arcs(&self) -> u64 {
        self.num_arcs
    }

    /// Returns the number of arcs from `u` to `v`.
    #[inline(always)]
    pub fn multiplicity(&self, u: usize, v: usize) -> usize {
        self.matrix[(u, v)]
    }

    /// Adds an arc to the graph, increasing its multiplicity by one.
    ///
    /// # Panics
    ///
    /// This method will panic:
    /// - if one of the given nodes is greater or equal than the number of nodes
    ///   in the graph;
    /// - if the arc is a self-loop.
    pub fn add_arc(&mut self, u: usize, v: usize) {
        let max = u.max(v);
        if max >= self.num_nodes() {
            panic!(
                "Node {} does not exist (the graph has {} nodes)",
                max,
                self.num_nodes(),
            );
        }
        if u == v {
            panic!("Error adding arc ({u}, {v}): self-loops cannot be represented");
        }
        self.matrix[(u, v)] += 1;
        self.num_arcs += 1;
    }

    /// Removes one arc from `u` to `v`, returning whether such an arc existed.
    ///
    /// # Panics
    ///
    /// This method will panic if one of the given nodes is greater or equal
    /// than the number of nodes in the graph.
    pub fn remove_arc(&mut self, u: usize, v: usize) -> bool {
        let max = u.max(v);
        if max >= self.num_nodes() {
            panic!(
                "Node {} does not exist (the graph has {} nodes)",
                max,
                self.num_nodes(),
            );
        }
        let m = &mut self.matrix[(u, v)];
        if *m == 0 {
            return false;
        }
        *m -= 1;
        self.num_arcs -= 1;
        true
    }

    /// Returns the successors of `u` in increasing order, each repeated
    /// according to its multiplicity.
    pub fn successors(&self, u: usize) -> impl Iterator<Item = usize> + '_ {
        self.matrix
            .row(u)
            .iter()
            .enumerate()
            .flat_map(|(v, &m)| std::iter::repeat_n(v, m))
    }

    /// Returns the predecessors of `v` in increasing order, each repeated
    /// according to its multiplicity.
    pub fn predecessors(&self, v: usize) -> impl Iterator<Item = usize> + '_ {
        (0..self.num_nodes())
            .flat_map(move |u| std::iter::repeat_n(u, self.matrix[(u, v)]))
    }

    /// Returns the arcs of the graph in lexicographical order, each repeated
    /// according to its multiplicity.
    pub fn arcs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.num_nodes()).flat_map(move |u| self.successors(u).map(move |v| (u, v)))
    }

    /// Returns a reference to the underlying matrix.
    pub fn as_matrix(&self) -> &Matrix<usize> {
        &self.matrix
    }

    /// Consumes the graph and returns the underlying matrix.
    pub fn into_matrix(self) -> Matrix<usize> {
        self.matrix
    }

    /// Returns a signed copy of the matrix that can be used as scratch space by
    /// [`top_sort_in_place`](crate::algo::top_sort_in_place).
    ///
    /// # Panics
    ///
    /// This method will panic if a multiplicity does not fit in an [`i64`].
    pub fn to_scratch_matrix(&self) -> Matrix<i64> {
        let n = self.num_nodes();
        let mut scratch = Matrix::new(n, n);
        for u in 0..n {
            for (v, &m) in self.matrix.row(u).iter().enumerate() {
                scratch[(u, v)] = i64::try_from(m).expect("multiplicity overflows i64");
            }
        }
        scratch
    }
}

impl TryFrom<Matrix<i64>> for DenseGraph {
    type Error = ShapeError;

    fn try_from(signed: Matrix<i64>) -> Result<Self, Self::Error> {
        let n = signed.side()?;
        let mut matrix = Matrix::new(n, n);
        for u in 0..n {
            for (v, &value) in signed.row(u).iter().enumerate() {
                if u == v {
                    continue;
                }
                if value < 0 {
                    return Err(ShapeError::NegativeEntry {
                        row: u,
                        col: v,
                        value,
                    });
                }
                matrix[(u, v)] =
                    usize::try_from(value).map_err(|_| ShapeError::Overflow { col: v })?;
            }
        }
        Self::try_from(matrix)
    }
}

/// Zeroes the diagonal and checks that every in-degree fits in a [`usize`]
/// and that the number of arcs fits in a [`u64`].
impl TryFrom<Matrix<usize>> for DenseGraph {
    type Error = ShapeError;

    fn try_from(mut matrix: Matrix<usize>) -> Result<Self, Self::Error> {
        let n = matrix.side()?;
        for x in 0..n {
            matrix[(x, x)] = 0;
        }
        let mut num_arcs = 0_u64;
        for v in 0..n {
            num_arcs = (0..n)
                .try_fold(0_usize, |acc, u| acc.checked_add(matrix[(u, v)]))
                .and_then(|indegree| u64::try_from(indegree).ok())
                .and_then(|indegree| num_arcs.checked_add(indegree))
                .ok_or(ShapeError::Overflow { col: v })?;
        }
        Ok(Self { num_arcs, matrix })
    }
}

impl From<DenseGraph> for Matrix<usize> {
    fn from(graph: DenseGraph) -> Self {
        graph.matrix
    }
}

impl AdjacencyMatrix for DenseGraph {
    #[inline(always)]
    fn num_nodes(&self) -> usize {
        self.num_nodes()
    }

    #[inline(always)]
    fn multiplicity(&self, src: usize, dst: usize) -> usize {
        self.matrix[(src, dst)]
    }
}
