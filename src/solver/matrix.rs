//! Dense, bounds-checked matrix storage.

use std::fmt;

use crate::error::{Result, SimError};

use super::Scalar;

/// A dense `rows x cols` matrix with zero-based indices.
///
/// Each row is its own allocation so that [`Matrix::swap_rows`] exchanges row
/// handles instead of copying elements, which keeps pivoting cheap.
/// Cloning performs a deep copy.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T: Scalar> {
    rows: usize,
    cols: usize,
    data: Vec<Vec<T>>,
}

impl<T: Scalar> Default for Matrix<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: Scalar> Matrix<T> {
    /// Create a zero-filled matrix. Both dimensions must be at least 1.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(SimError::invalid_dimensions(
                rows,
                cols,
                "both dimensions must be greater than 0",
            ));
        }
        Ok(Self {
            rows,
            cols,
            data: vec![vec![T::zero(); cols]; rows],
        })
    }

    /// The 0x0 placeholder for a slot that has not been built yet.
    pub fn empty() -> Self {
        Self {
            rows: 0,
            cols: 0,
            data: Vec::new(),
        }
    }

    /// Create an `n x n` identity matrix.
    pub fn identity(n: usize) -> Result<Self> {
        let mut m = Self::new(n, n)?;
        for (i, row) in m.data.iter_mut().enumerate() {
            row[i] = T::one();
        }
        Ok(m)
    }

    /// Build a matrix from row vectors, which must all have the same non-zero length.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        if n_rows == 0 || n_cols == 0 {
            return Err(SimError::invalid_dimensions(
                n_rows,
                n_cols,
                "both dimensions must be greater than 0",
            ));
        }
        if let Some(bad) = rows.iter().find(|r| r.len() != n_cols) {
            return Err(SimError::invalid_dimensions(
                n_rows,
                bad.len(),
                format!("all rows must have {n_cols} columns"),
            ));
        }
        Ok(Self {
            rows: n_rows,
            cols: n_cols,
            data: rows,
        })
    }

    /// Build an `n x 1` column vector.
    pub fn column(values: &[T]) -> Result<Self> {
        Self::from_rows(values.iter().map(|&v| vec![v]).collect())
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// True for the 0x0 placeholder.
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    fn check(&self, row: usize, col: usize) -> Result<()> {
        if row >= self.rows || col >= self.cols {
            return Err(SimError::OutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }

    /// Read the element at (row, col).
    pub fn get(&self, row: usize, col: usize) -> Result<T> {
        self.check(row, col)?;
        Ok(self.data[row][col])
    }

    /// Overwrite the element at (row, col).
    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        self.check(row, col)?;
        self.data[row][col] = value;
        Ok(())
    }

    /// Add to the element at (row, col). This is how stamps accumulate.
    pub fn add(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        self.check(row, col)?;
        self.data[row][col] += value;
        Ok(())
    }

    /// Zero every element.
    pub fn clear(&mut self) {
        for row in &mut self.data {
            row.fill(T::zero());
        }
    }

    /// Exchange two full rows.
    pub fn swap_rows(&mut self, r1: usize, r2: usize) -> Result<()> {
        self.check(r1, 0)?;
        self.check(r2, 0)?;
        self.data.swap(r1, r2);
        Ok(())
    }

    /// Exchange two single elements.
    pub fn swap_values(&mut self, r1: usize, c1: usize, r2: usize, c2: usize) -> Result<()> {
        self.check(r1, c1)?;
        self.check(r2, c2)?;
        if r1 == r2 {
            self.data[r1].swap(c1, c2);
        } else {
            let tmp = self.data[r1][c1];
            self.data[r1][c1] = self.data[r2][c2];
            self.data[r2][c2] = tmp;
        }
        Ok(())
    }

    /// Matrix product `self * other`.
    pub fn multiply(&self, other: &Matrix<T>) -> Result<Matrix<T>> {
        if self.cols != other.rows {
            return Err(SimError::invalid_dimensions(
                other.rows,
                other.cols,
                format!("cannot multiply a {}x{} matrix by it", self.rows, self.cols),
            ));
        }
        let mut out = Matrix::new(self.rows, other.cols)?;
        for (i, out_row) in out.data.iter_mut().enumerate() {
            for (k, &a) in self.data[i].iter().enumerate() {
                for (o, &b) in out_row.iter_mut().zip(&other.data[k]) {
                    *o += a * b;
                }
            }
        }
        Ok(out)
    }

    /// Copy out the first column, e.g. the values of an `n x 1` vector.
    pub fn column_values(&self) -> Vec<T> {
        self.data.iter().map(|row| row[0]).collect()
    }

    pub(crate) fn row(&self, row: usize) -> &[T] {
        &self.data[row]
    }

    pub(crate) fn row_mut(&mut self, row: usize) -> &mut [T] {
        &mut self.data[row]
    }
}

/// Row-major, tab-separated dump, one row per line.
impl<T: Scalar> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.data {
            for (j, value) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, "\t")?;
                }
                write!(f, "{value}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
