/*
 * SPDX-FileCopyrightText: 2026 Dense Top Sort Contributors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::top_sort;
use crate::traits::AdjacencyMatrix;
use dsi_progress_logger::ProgressLog;

/// Returns whether the graph is acyclic.
///
/// This method runs [Kahn's algorithm](top_sort) and checks whether every
/// node is emitted.
pub fn is_acyclic(graph: impl AdjacencyMatrix, pl: &mut impl ProgressLog) -> bool {
    top_sort(graph, pl).is_ok()
}
