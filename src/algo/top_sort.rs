/*
 * SPDX-FileCopyrightText: 2026 Dense Top Sort Contributors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::traits::AdjacencyMatrix;
use crate::utils::{Matrix, ShapeError};
use dsi_progress_logger::ProgressLog;
use std::sync::atomic::{AtomicBool, Ordering};
use sux::prelude::BitVec;
use thiserror::Error;

/// The value marking removed nodes on the diagonal of the scratch matrix of
/// [`top_sort_in_place`].
pub const REMOVED: i64 = -1;

/// Errors that can occur while computing a topological sort.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TopSortError {
    /// The input is not a valid adjacency matrix.
    #[error("Invalid adjacency matrix: {0}")]
    InvalidShape(#[from] ShapeError),

    /// A full sweep found no node with zero indegree.
    #[error("The graph is not acyclic: {remaining} of {num_nodes} nodes cannot be sorted")]
    CycleDetected { remaining: usize, num_nodes: usize },

    /// The sort was interrupted by the caller.
    #[error("The topological sort was interrupted")]
    Interrupted,
}

/// Returns the nodes of the graph in topological-sort order using Kahn's
/// algorithm.
///
/// Nodes are extracted by sweeps: each sweep scans the nodes in increasing
/// order and emits every node that has no arcs coming from nodes not emitted
/// yet, immediately discounting its outgoing arcs. Thus, a node whose last
/// incoming arc comes from a smaller node is emitted in the same sweep, whereas
/// a node whose last incoming arc comes from a larger node waits for the next
/// sweep. The resulting order is fully determined by the graph.
///
/// The input is not modified: indegrees are kept in an auxiliary vector, and
/// emitted nodes are recorded in a bit vector.
///
/// # Errors
///
/// Returns [`TopSortError::CycleDetected`] if the graph contains a cycle, and
/// [`TopSortError::InvalidShape`] with [`ShapeError::Overflow`] if the
/// in-degree of a node does not fit in a [`usize`].
///
/// # Examples
///
/// ```
/// use dense_top_sort::prelude::*;
/// use dsi_progress_logger::no_logging;
///
/// let graph = DenseGraph::from_rows([[0, 0, 0], [1, 0, 1], [1, 0, 0]])?;
/// assert_eq!(top_sort(&graph, no_logging![])?.as_ref(), &[1, 2, 0]);
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn top_sort(
    graph: impl AdjacencyMatrix,
    pl: &mut impl ProgressLog,
) -> Result<Box<[usize]>, TopSortError> {
    sweep(graph, pl, || false)
}

/// Like [`top_sort`], but checks `interrupted` before each sweep and returns
/// [`TopSortError::Interrupted`] as soon as it is set.
pub fn top_sort_with_interrupt(
    graph: impl AdjacencyMatrix,
    pl: &mut impl ProgressLog,
    interrupted: &AtomicBool,
) -> Result<Box<[usize]>, TopSortError> {
    sweep(graph, pl, || interrupted.load(Ordering::Relaxed))
}

fn sweep(
    graph: impl AdjacencyMatrix,
    pl: &mut impl ProgressLog,
    mut interrupted: impl FnMut() -> bool,
) -> Result<Box<[usize]>, TopSortError> {
    let num_nodes = graph.num_nodes();
    pl.item_name("node");
    pl.expected_updates(Some(num_nodes));
    pl.start("Computing topological sort");

    let mut indegree = Vec::with_capacity(num_nodes);
    for node in 0..num_nodes {
        match graph.checked_indegree(node) {
            Some(d) => indegree.push(d),
            None => {
                pl.done();
                return Err(ShapeError::Overflow { col: node }.into());
            }
        }
    }
    let mut removed = BitVec::new(num_nodes);
    let mut top_sort = Vec::with_capacity(num_nodes);
    let mut sweeps = 0_usize;

    while top_sort.len() < num_nodes {
        if interrupted() {
            pl.done();
            return Err(TopSortError::Interrupted);
        }
        sweeps += 1;
        let emitted = top_sort.len();

        for node in 0..num_nodes {
            if indegree[node] != 0 || removed[node] {
                continue;
            }
            top_sort.push(node);
            removed.set(node, true);
            for succ in 0..num_nodes {
                if succ != node {
                    // A live node cannot point to a removed node
                    indegree[succ] -= graph.multiplicity(node, succ);
                }
            }
            pl.light_update();
        }

        if top_sort.len() == emitted {
            pl.done();
            let remaining = num_nodes - emitted;
            log::info!("No source among {remaining} remaining nodes after {sweeps} sweeps");
            return Err(TopSortError::CycleDetected {
                remaining,
                num_nodes,
            });
        }
    }

    pl.done();
    log::debug!("Topological sort of {num_nodes} nodes completed in {sweeps} sweeps");
    Ok(top_sort.into_boxed_slice())
}

/// Returns the nodes of the graph represented by `adj` in topological-sort
/// order, using the diagonal of `adj` as scratch space.
///
/// Row `u` and column `v` of `adj` contain the number of arcs from `u` to `v`;
/// diagonal entries are ignored. The nodes are emitted in exactly the same
/// order as [`top_sort`], but no auxiliary memory is allocated beyond the
/// result: during the computation the diagonal entry of each node contains its
/// current indegree, or [`REMOVED`] if the node has already been emitted, and
/// the row of an emitted node is cleared.
///
/// After a successful call every diagonal entry of `adj` is [`REMOVED`] and
/// every other entry is zero. Callers needing the original matrix must pass a
/// copy (e.g., obtained with
/// [`DenseGraph::to_scratch_matrix`](crate::graphs::dense_graph::DenseGraph::to_scratch_matrix)).
///
/// # Errors
///
/// Returns [`TopSortError::InvalidShape`] if `adj` is not square, contains
/// a negative off-diagonal entry, or has a column whose off-diagonal sum
/// overflows an [`i64`]; in this case `adj` is left untouched.
/// Returns [`TopSortError::CycleDetected`] if the graph contains a cycle; in
/// this case the content of `adj` is unspecified.
pub fn top_sort_in_place(
    adj: &mut Matrix<i64>,
    pl: &mut impl ProgressLog,
) -> Result<Box<[usize]>, TopSortError> {
    let num_nodes = check_scratch(adj)?;
    pl.item_name("node");
    pl.expected_updates(Some(num_nodes));
    pl.start("Computing topological sort in place");

    // Column sums have been checked for overflow
    for node in 0..num_nodes {
        let indegree: i64 = (0..num_nodes)
            .filter(|&pred| pred != node)
            .map(|pred| adj[(pred, node)])
            .sum();
        adj[(node, node)] = indegree;
    }

    let mut top_sort = Vec::with_capacity(num_nodes);
    while top_sort.len() < num_nodes {
        let emitted = top_sort.len();

        for node in 0..num_nodes {
            if adj[(node, node)] != 0 {
                continue;
            }
            top_sort.push(node);
            for succ in 0..num_nodes {
                if succ != node {
                    let arcs = adj[(node, succ)];
                    adj[(succ, succ)] -= arcs;
                }
            }
            adj.row_mut(node).fill(0);
            adj[(node, node)] = REMOVED;
            pl.light_update();
        }

        if top_sort.len() == emitted {
            pl.done();
            let remaining = num_nodes - emitted;
            log::info!("No source among {remaining} remaining nodes");
            return Err(TopSortError::CycleDetected {
                remaining,
                num_nodes,
            });
        }
    }

    pl.done();
    Ok(top_sort.into_boxed_slice())
}

/// Returns the side of `adj`, checking that it is square, that all
/// off-diagonal entries are nonnegative, and that the off-diagonal sum of
/// every column fits in an [`i64`].
fn check_scratch(adj: &Matrix<i64>) -> Result<usize, ShapeError> {
    let n = adj.side()?;
    for (row, values) in adj.iter_rows().enumerate() {
        for (col, &value) in values.iter().enumerate() {
            if row != col && value < 0 {
                return Err(ShapeError::NegativeEntry { row, col, value });
            }
        }
    }
    for col in 0..n {
        (0..n)
            .filter(|&row| row != col)
            .try_fold(0_i64, |acc, row| acc.checked_add(adj[(row, col)]))
            .ok_or(ShapeError::Overflow { col })?;
    }
    Ok(n)
}

/// Returns whether `order` is a topological sort of `graph`, that is, a
/// permutation of the nodes in which the source of every arc precedes its
/// target.
pub fn is_top_sort(graph: impl AdjacencyMatrix, order: &[usize]) -> bool {
    let num_nodes = graph.num_nodes();
    if order.len() != num_nodes {
        return false;
    }

    let mut pos = vec![usize::MAX; num_nodes];
    for (i, &node) in order.iter().enumerate() {
        if node >= num_nodes || pos[node] != usize::MAX {
            return false;
        }
        pos[node] = i;
    }

    (0..num_nodes).all(|src| {
        (0..num_nodes).all(|dst| !graph.has_arc(src, dst) || pos[src] < pos[dst])
    })
}
