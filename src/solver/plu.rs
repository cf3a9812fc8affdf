//! Full-pivoting LU factorization `P * A * Q = L * U`.

use crate::error::{Result, SimError};

use super::{Matrix, Scalar, PIVOT_EPSILON};

/// LU factorization with row and column pivoting.
///
/// Built once from a square matrix and read-only afterwards; [`Plu::solve`]
/// can be called any number of times with different right-hand sides.
///
/// Permutations are stored as index vectors: row `i` of `P * A` is row
/// `p[i]` of `A`, and column `j` of `A * Q` is column `q[j]` of `A`.
#[derive(Debug, Clone)]
pub struct Plu<T: Scalar> {
    l: Matrix<T>,
    u: Matrix<T>,
    p: Vec<usize>,
    q: Vec<usize>,
}

impl<T: Scalar> Plu<T> {
    /// Factor `a`, which must be square and at least 1x1.
    ///
    /// A trailing submatrix that is entirely zero is not an error: no swap
    /// happens and `U[k][k]` stays 0. [`Plu::solve`] resolves such rows to 0.
    pub fn new(a: &Matrix<T>) -> Result<Self> {
        if a.is_empty() || !a.is_square() {
            return Err(SimError::invalid_dimensions(
                a.rows(),
                a.cols(),
                "factorization needs a non-empty square matrix",
            ));
        }

        let n = a.rows();
        let mut l = Matrix::identity(n)?;
        let mut u = a.clone();
        let mut p: Vec<usize> = (0..n).collect();
        let mut q: Vec<usize> = (0..n).collect();

        for k in 0..n {
            // Find the pivot (first strictly largest magnitude) in U[k..n][k..n]
            let mut max_val = 0.0;
            let mut max_row = k;
            let mut max_col = k;
            for i in k..n {
                for (j, value) in u.row(i).iter().enumerate().skip(k) {
                    let mag = value.magnitude();
                    if mag > max_val {
                        max_val = mag;
                        max_row = i;
                        max_col = j;
                    }
                }
            }

            if max_row != k {
                u.swap_rows(k, max_row)?;
                p.swap(k, max_row);
                // Keep the computed part of L in step with the row swap
                for j in 0..k {
                    l.swap_values(k, j, max_row, j)?;
                }
            }

            if max_col != k {
                for i in 0..n {
                    u.row_mut(i).swap(k, max_col);
                }
                q.swap(k, max_col);
            }

            if max_val == 0.0 {
                // Everything left is zero, so the multipliers are too
                continue;
            }

            let pivot_row = u.row(k).to_vec();
            let pivot = pivot_row[k];
            for i in (k + 1)..n {
                let row = u.row_mut(i);
                let factor = row[k] / pivot;
                for j in (k + 1)..n {
                    row[j] -= factor * pivot_row[j];
                }
                row[k] = T::zero();
                l.set(i, k, factor)?;
            }
        }

        Ok(Self { l, u, p, q })
    }

    /// Dimension `n` of the factored matrix.
    pub fn dim(&self) -> usize {
        self.p.len()
    }

    /// Unit lower-triangular factor.
    pub fn l(&self) -> &Matrix<T> {
        &self.l
    }

    /// Upper-triangular factor.
    pub fn u(&self) -> &Matrix<T> {
        &self.u
    }

    /// Row permutation.
    pub fn p(&self) -> &[usize] {
        &self.p
    }

    /// Column permutation.
    pub fn q(&self) -> &[usize] {
        &self.q
    }

    /// Solve `A * x = b` for an `n x 1` right-hand side.
    ///
    /// A diagonal entry of `U` with magnitude at or below [`PIVOT_EPSILON`]
    /// yields 0 for that unknown. In a nodal system this is the row made
    /// redundant by the reference node.
    pub fn solve(&self, b: &Matrix<T>) -> Result<Matrix<T>> {
        let n = self.dim();
        if b.rows() != n || b.cols() != 1 {
            return Err(SimError::invalid_dimensions(
                b.rows(),
                b.cols(),
                format!("right-hand side must be {n}x1"),
            ));
        }

        // Forward substitution on the permuted right-hand side: L * y = P * b
        let mut y = vec![T::zero(); n];
        for i in 0..n {
            let mut sum = b.row(self.p[i])[0];
            for (l_ij, y_j) in self.l.row(i)[..i].iter().zip(&y) {
                sum -= *l_ij * *y_j;
            }
            y[i] = sum;
        }

        // Backward substitution: U * x = y
        let mut x = vec![T::zero(); n];
        for i in (0..n).rev() {
            let u_row = self.u.row(i);
            let mut sum = y[i];
            for j in (i + 1)..n {
                sum -= u_row[j] * x[j];
            }
            let diag = u_row[i];
            x[i] = if diag.magnitude() > PIVOT_EPSILON {
                sum / diag
            } else {
                T::zero()
            };
        }

        // Undo the column permutation
        let mut solution = Matrix::new(n, 1)?;
        for (i, &value) in x.iter().enumerate() {
            solution.set(self.q[i], 0, value)?;
        }
        Ok(solution)
    }
}
