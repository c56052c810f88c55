/*
 * SPDX-FileCopyrightText: 2026 Dense Top Sort Contributors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use anyhow::Result;
use dense_top_sort::prelude::*;
use dsi_progress_logger::{no_logging, ProgressLogger};
use std::cell::Cell;
use std::sync::atomic::{AtomicBool, Ordering};

#[test]
fn test_empty_graph() -> Result<()> {
    assert!(top_sort(DenseGraph::new(), no_logging![])?.is_empty());
    let graph = DenseGraph::from_rows(Vec::<Vec<i64>>::new())?;
    assert!(top_sort(&graph, no_logging![])?.is_empty());
    Ok(())
}

#[test]
fn test_single_node() -> Result<()> {
    let graph = DenseGraph::from_rows([[0]])?;
    assert_eq!(top_sort(&graph, no_logging![])?.as_ref(), &[0]);
    Ok(())
}

#[test]
fn test_single_arc() -> Result<()> {
    let graph = DenseGraph::from_rows([[0, 1], [0, 0]])?;
    assert_eq!(top_sort(&graph, no_logging![])?.as_ref(), &[0, 1]);

    let graph = DenseGraph::from_rows([[0, 0], [1, 0]])?;
    assert_eq!(top_sort(&graph, no_logging![])?.as_ref(), &[1, 0]);
    Ok(())
}

#[test]
fn test_fan_in() -> Result<()> {
    // 1 → 0, 1 → 2, 2 → 0
    let graph = DenseGraph::from_rows([[0, 0, 0], [1, 0, 1], [1, 0, 0]])?;
    assert_eq!(top_sort(&graph, no_logging![])?.as_ref(), &[1, 2, 0]);
    Ok(())
}

#[test]
fn test_sweep_order() -> Result<()> {
    // Node 2 is emitted before node 0 even though 0 becomes a source first:
    // when 1 is emitted the current sweep is already past 0.
    let mut graph = DenseGraph::empty(3);
    graph.add_arc(1, 0);
    assert_eq!(top_sort(&graph, no_logging![])?.as_ref(), &[1, 2, 0]);

    let graph = DenseGraph::from_arcs([(2, 0), (0, 1), (3, 1)]);
    assert_eq!(top_sort(&graph, no_logging![])?.as_ref(), &[2, 3, 0, 1]);
    Ok(())
}

#[test]
fn test_chains() -> Result<()> {
    let forward = DenseGraph::from_arcs([(0, 1), (1, 2), (2, 3)]);
    assert_eq!(top_sort(&forward, no_logging![])?.as_ref(), &[0, 1, 2, 3]);

    let backward = DenseGraph::from_arcs([(3, 2), (2, 1), (1, 0)]);
    assert_eq!(top_sort(&backward, no_logging![])?.as_ref(), &[3, 2, 1, 0]);
    Ok(())
}

#[test]
fn test_no_arcs() -> Result<()> {
    let graph = DenseGraph::empty(5);
    assert_eq!(top_sort(&graph, no_logging![])?.as_ref(), &[0, 1, 2, 3, 4]);
    Ok(())
}

#[test]
fn test_multiple_arcs() -> Result<()> {
    let graph = DenseGraph::from_arcs([(0, 1), (0, 1), (2, 1)]);
    assert_eq!(top_sort(&graph, no_logging![])?.as_ref(), &[0, 2, 1]);

    let graph = DenseGraph::from_rows([[0, 3, 0], [0, 0, 0], [0, 2, 0]])?;
    assert_eq!(top_sort(&graph, no_logging![])?.as_ref(), &[0, 2, 1]);
    Ok(())
}

#[test]
fn test_diagonal_is_ignored() -> Result<()> {
    let graph = DenseGraph::from_rows([[5, 1], [0, 7]])?;
    assert_eq!(graph.num_arcs(), 1);
    assert_eq!(top_sort(&graph, no_logging![])?.as_ref(), &[0, 1]);
    Ok(())
}

#[test]
fn test_diamond() -> Result<()> {
    let graph = DenseGraph::from_arcs([(0, 1), (0, 2), (1, 3), (2, 3)]);
    let ts = top_sort(&graph, no_logging![])?;
    assert_eq!(ts.as_ref(), &[0, 1, 2, 3]);
    let pos: std::collections::HashMap<usize, usize> =
        ts.iter().enumerate().map(|(i, &n)| (n, i)).collect();
    assert!(pos[&0] < pos[&1]);
    assert!(pos[&0] < pos[&2]);
    assert!(pos[&1] < pos[&3]);
    assert!(pos[&2] < pos[&3]);
    Ok(())
}

#[test]
fn test_cycle() {
    let graph = DenseGraph::from_arcs([(0, 1), (1, 2), (2, 0)]);
    assert_eq!(
        top_sort(&graph, no_logging![]),
        Err(TopSortError::CycleDetected {
            remaining: 3,
            num_nodes: 3
        })
    );

    // 0 and 3 can be emitted before the sweep stalls on 1 ⇄ 2
    let graph = DenseGraph::from_arcs([(0, 1), (1, 2), (2, 1), (0, 3)]);
    assert_eq!(
        top_sort(&graph, no_logging![]),
        Err(TopSortError::CycleDetected {
            remaining: 2,
            num_nodes: 4
        })
    );
}

#[test]
fn test_acyclicity() {
    assert!(is_acyclic(DenseGraph::new(), no_logging![]));
    assert!(is_acyclic(
        DenseGraph::from_arcs([(0, 1), (0, 2), (1, 3), (2, 3), (3, 4)]),
        no_logging![]
    ));
    assert!(!is_acyclic(
        DenseGraph::from_arcs([(0, 1), (1, 0)]),
        no_logging![]
    ));
    assert!(!is_acyclic(
        DenseGraph::from_arcs([(0, 1), (1, 2), (2, 3), (3, 1)]),
        no_logging![]
    ));
}

#[test]
fn test_input_is_preserved() -> Result<()> {
    let graph = RandomDag::new(30, 0.2, 7).graph();
    let copy = graph.clone();
    top_sort(&graph, no_logging![])?;
    assert_eq!(graph, copy);
    Ok(())
}

#[test]
fn test_interrupt() -> Result<()> {
    let graph = DenseGraph::from_arcs([(3, 2), (2, 1), (1, 0)]);

    let interrupted = AtomicBool::new(true);
    assert_eq!(
        top_sort_with_interrupt(&graph, no_logging![], &interrupted),
        Err(TopSortError::Interrupted)
    );

    let interrupted = AtomicBool::new(false);
    assert_eq!(
        top_sort_with_interrupt(&graph, no_logging![], &interrupted)?,
        top_sort(&graph, no_logging![])?
    );
    Ok(())
}

/// Sets a flag as soon as the sweeps start reading arcs, that is, right
/// after the initial in-degrees have been computed.
struct RaiseOnSweep<'a> {
    graph: &'a DenseGraph,
    reads: Cell<usize>,
    flag: &'a AtomicBool,
}

impl<'a> RaiseOnSweep<'a> {
    fn new(graph: &'a DenseGraph, flag: &'a AtomicBool) -> Self {
        Self {
            graph,
            reads: Cell::new(0),
            flag,
        }
    }
}

impl AdjacencyMatrix for RaiseOnSweep<'_> {
    fn num_nodes(&self) -> usize {
        self.graph.num_nodes()
    }

    fn multiplicity(&self, src: usize, dst: usize) -> usize {
        let n = self.graph.num_nodes();
        self.reads.set(self.reads.get() + 1);
        if self.reads.get() > n * (n - 1) {
            self.flag.store(true, Ordering::Relaxed);
        }
        self.graph.multiplicity(src, dst)
    }
}

#[test]
fn test_interrupt_between_sweeps() -> Result<()> {
    // Needs four sweeps: the flag raised during the first one stops the sort
    let graph = DenseGraph::from_arcs([(3, 2), (2, 1), (1, 0)]);
    let interrupted = AtomicBool::new(false);
    let raising = RaiseOnSweep::new(&graph, &interrupted);
    assert_eq!(
        top_sort_with_interrupt(&raising, no_logging![], &interrupted),
        Err(TopSortError::Interrupted)
    );
    assert!(interrupted.load(Ordering::Relaxed));

    // A single sweep completes even if the flag is raised during it
    let graph = DenseGraph::from_arcs([(0, 1), (1, 2), (2, 3)]);
    let interrupted = AtomicBool::new(false);
    let raising = RaiseOnSweep::new(&graph, &interrupted);
    assert_eq!(
        top_sort_with_interrupt(&raising, no_logging![], &interrupted)?.as_ref(),
        &[0, 1, 2, 3]
    );
    assert!(interrupted.load(Ordering::Relaxed));
    Ok(())
}

/// Three nodes; nodes 0 and 1 both have `usize::MAX` arcs to node 2.
struct Saturated;

impl AdjacencyMatrix for Saturated {
    fn num_nodes(&self) -> usize {
        3
    }

    fn multiplicity(&self, src: usize, dst: usize) -> usize {
        if dst == 2 && src != 2 {
            usize::MAX
        } else {
            0
        }
    }
}

#[test]
fn test_indegree_overflow() {
    assert_eq!(Saturated.checked_indegree(2), None);
    assert_eq!(Saturated.checked_indegree(1), Some(0));
    assert_eq!(Saturated.checked_outdegree(0), Some(usize::MAX));
    assert_eq!(
        top_sort(Saturated, no_logging![]),
        Err(TopSortError::InvalidShape(ShapeError::Overflow { col: 2 }))
    );
    assert!(!is_acyclic(Saturated, no_logging![]));
}

#[test]
#[should_panic(expected = "The in-degree of node 2 overflows")]
fn test_indegree_overflow_panics() {
    Saturated.indegree(2);
}

#[test]
fn test_is_top_sort() {
    let graph = DenseGraph::from_arcs([(0, 1), (0, 2), (2, 3)]);
    assert!(is_top_sort(&graph, &[0, 1, 2, 3]));
    assert!(is_top_sort(&graph, &[0, 2, 3, 1]));
    // Wrong length
    assert!(!is_top_sort(&graph, &[0, 1, 2]));
    // Not a permutation
    assert!(!is_top_sort(&graph, &[0, 1, 2, 2]));
    assert!(!is_top_sort(&graph, &[0, 1, 2, 4]));
    // Arc 2 → 3 goes backwards
    assert!(!is_top_sort(&graph, &[0, 3, 1, 2]));
}

#[test]
fn test_random_dags() -> Result<()> {
    for seed in 0..20 {
        let dag = RandomDag::new(50, 0.1, seed);
        let graph = dag.graph();
        assert!(is_top_sort(&graph, &dag.hidden_order()));

        let ts = top_sort(&graph, no_logging![])?;
        assert!(is_top_sort(&graph, &ts), "seed {seed}");
        // Same input, same output
        assert_eq!(ts, top_sort(&graph, no_logging![])?);
    }
    Ok(())
}

#[test]
fn test_random_dag_with_back_arc() -> Result<()> {
    let dag = RandomDag::new(20, 0.3, 1);
    let order = dag.hidden_order();
    let mut graph = dag.graph();
    // Close a cycle through the whole hidden order
    for w in order.windows(2) {
        if graph.multiplicity(w[0], w[1]) == 0 {
            graph.add_arc(w[0], w[1]);
        }
    }
    graph.add_arc(order[order.len() - 1], order[0]);
    assert!(matches!(
        top_sort(&graph, no_logging![]),
        Err(TopSortError::CycleDetected { remaining: 20, .. })
    ));
    Ok(())
}

#[test]
fn test_logging() -> Result<()> {
    env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Info)
        .try_init()?;
    let graph = RandomDag::new(100, 0.05, 0).graph();
    let mut pl = ProgressLogger::default();
    let ts = top_sort(&graph, &mut pl)?;
    assert!(is_top_sort(&graph, &ts));
    Ok(())
}

#[cfg_attr(feature = "slow_tests", test)]
#[cfg_attr(not(feature = "slow_tests"), allow(dead_code))]
fn test_large_random_dags() -> Result<()> {
    for (n, p) in [(500, 0.01), (500, 0.5), (1000, 0.002)] {
        let dag = RandomDag::new(n, p, n as u64);
        let graph = dag.graph();
        let ts = top_sort(&graph, no_logging![])?;
        assert!(is_top_sort(&graph, &ts));
        let mut scratch = graph.to_scratch_matrix();
        assert_eq!(top_sort_in_place(&mut scratch, no_logging![])?, ts);
    }
    Ok(())
}
