/*
 * SPDX-FileCopyrightText: 2026 Dense Top Sort Contributors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Implementations of graphs.

pub mod dense_graph;
pub mod random;

pub mod prelude {
    pub use super::dense_graph::DenseGraph;
    pub use super::random::RandomDag;
}
