/*
 * SPDX-FileCopyrightText: 2026 Dense Top Sort Contributors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use std::ops::{Index, IndexMut};
use thiserror::Error;

/// Errors that can occur when a matrix does not have the expected shape or
/// content.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    /// A row has a different length than the first row.
    #[error("Row {row} has length {len}, but the first row has length {expected}")]
    RaggedRow {
        row: usize,
        len: usize,
        expected: usize,
    },

    /// The matrix is not square.
    #[error("The matrix is not square: {rows} rows != {cols} columns")]
    NotSquare { rows: usize, cols: usize },

    /// An off-diagonal entry is negative.
    #[error("Negative entry at ({row}, {col}): {value}")]
    NegativeEntry { row: usize, col: usize, value: i64 },

    /// The multiplicities do not fit the integer type used to count arcs:
    /// either the sum of column `col` or the running total of all entries
    /// up to column `col` overflows.
    #[error("Arc multiplicities overflow at column {col}")]
    Overflow { col: usize },

    /// The data does not contain exactly `rows` × `cols` elements.
    #[error("Expected {rows} × {cols} elements, found {len}")]
    DataLength { len: usize, rows: usize, cols: usize },
}

/// A generic dense matrix stored as a flat [`Vec`] in row-major order.
///
/// Elements are accessed by indexing with a `(row, col)` pair.
///
/// When deserialized, the length of the data is checked against the number
/// of rows and columns.
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawMatrix<T>")
)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

/// The unchecked serialized form of a [`Matrix`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawMatrix<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

#[cfg(feature = "serde")]
impl<T> TryFrom<RawMatrix<T>> for Matrix<T> {
    type Error = ShapeError;

    fn try_from(raw: RawMatrix<T>) -> Result<Self, Self::Error> {
        let RawMatrix { data, rows, cols } = raw;
        if rows.checked_mul(cols) != Some(data.len()) {
            return Err(ShapeError::DataLength {
                len: data.len(),
                rows,
                cols,
            });
        }
        Ok(Matrix { data, rows, cols })
    }
}

impl<T: Clone + Default> Matrix<T> {
    /// Creates a new `rows` × `cols` matrix with all elements set to
    /// `T::default()`.
    ///
    /// The elements are guaranteed to be contiguous in memory.
    pub fn new(rows: usize, cols: usize) -> Self {
        let data = vec![T::default(); rows * cols];
        Matrix { data, rows, cols }
    }
}

impl<T: Clone> Matrix<T> {
    /// Creates a matrix from an iterator over its rows.
    ///
    /// All rows must have the same length; an empty iterator yields a 0 × 0
    /// matrix.
    pub fn from_rows<R: AsRef<[T]>>(
        rows: impl IntoIterator<Item = R>,
    ) -> Result<Self, ShapeError> {
        let mut data = Vec::new();
        let mut num_rows = 0;
        let mut cols = None;
        for (row, values) in rows.into_iter().enumerate() {
            let values = values.as_ref();
            let expected = *cols.get_or_insert(values.len());
            if values.len() != expected {
                return Err(ShapeError::RaggedRow {
                    row,
                    len: values.len(),
                    expected,
                });
            }
            data.extend_from_slice(values);
            num_rows += 1;
        }
        Ok(Matrix {
            data,
            rows: num_rows,
            cols: cols.unwrap_or(0),
        })
    }
}

impl<T> Matrix<T> {
    /// Returns the number of rows.
    #[inline(always)]
    pub fn num_rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    #[inline(always)]
    pub fn num_cols(&self) -> usize {
        self.cols
    }

    /// Returns whether the number of rows equals the number of columns.
    #[inline(always)]
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Returns the side of the matrix, or a [`ShapeError::NotSquare`] if the
    /// matrix is not square.
    pub fn side(&self) -> Result<usize, ShapeError> {
        if self.is_square() {
            Ok(self.rows)
        } else {
            Err(ShapeError::NotSquare {
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    /// Returns the given row as a slice.
    #[inline(always)]
    pub fn row(&self, row: usize) -> &[T] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    /// Returns the given row as a mutable slice.
    #[inline(always)]
    pub fn row_mut(&mut self, row: usize) -> &mut [T] {
        &mut self.data[row * self.cols..(row + 1) * self.cols]
    }

    /// Returns an iterator over the rows of the matrix.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        (0..self.rows).map(move |row| self.row(row))
    }

    /// Returns the underlying row-major data.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    #[inline(always)]
    fn index(&self, index: (usize, usize)) -> &Self::Output {
        let (row, col) = index;
        debug_assert!(col < self.cols);
        &self.data[row * self.cols + col]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    #[inline(always)]
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        let (row, col) = index;
        debug_assert!(col < self.cols);
        &mut self.data[row * self.cols + col]
    }
}
