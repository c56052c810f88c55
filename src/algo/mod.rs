/*
 * SPDX-FileCopyrightText: 2026 Dense Top Sort Contributors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Topological sorting and acyclicity on dense graphs.
//!
//! The main entry point is [`top_sort`], which implements Kahn's algorithm on
//! any [`AdjacencyMatrix`](crate::traits::AdjacencyMatrix) without modifying
//! it. [`top_sort_in_place`] computes the same order on a signed
//! [`Matrix`](crate::utils::Matrix), using its diagonal as scratch space.
//!
//! On cyclic graphs both functions return
//! [`CycleDetected`](TopSortError::CycleDetected) instead of an order.
//!
//! # Examples
//! ```
//! use dsi_progress_logger::no_logging;
//! use dense_top_sort::prelude::*;
//!
//! let graph = DenseGraph::from_arcs([(2, 0), (0, 1), (3, 1)]);
//! let order = top_sort(&graph, no_logging![])?;
//! assert_eq!(order.as_ref(), &[2, 3, 0, 1]);
//! assert!(is_top_sort(&graph, &order));
//!
//! let mut scratch = graph.to_scratch_matrix();
//! assert_eq!(top_sort_in_place(&mut scratch, no_logging![])?, order);
//!
//! let cyclic = DenseGraph::from_arcs([(0, 1), (1, 0)]);
//! assert!(!is_acyclic(&cyclic, no_logging![]));
//! # Ok::<(), anyhow::Error>(())
//! ```

mod top_sort;
pub use top_sort::*;

mod acyclicity;
pub use acyclicity::*;
