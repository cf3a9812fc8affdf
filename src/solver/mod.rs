//! Dense linear-algebra engine.
//!
//! This module provides the numerical core used by the circuit orchestrator:
//!
//! - [`Matrix`] - dense, bounds-checked storage generic over [`Scalar`]
//! - [`Plu`] - LU factorization with full (row and column) pivoting
//!
//! ## Factorization
//!
//! The system matrix is factored once as
//! ```text
//! P * A * Q = L * U
//! ```
//! and every time step only performs the two triangular solves:
//! ```text
//! L * y = P * b        (forward substitution)
//! U * z = y            (backward substitution)
//! x = Q * z            (undo the column permutation)
//! ```
//!
//! A nodal conductance matrix that still contains the reference node's
//! equation is singular by exactly one rank. Full pivoting pushes that
//! deficiency to a zero diagonal of `U`, and the solve defines the matching
//! unknown as 0. The orchestrator then shifts the whole solution so the
//! reference node reads 0.

mod matrix;
mod plu;
mod scalar;

pub use matrix::Matrix;
pub use plu::Plu;
pub use scalar::Scalar;

/// Diagonal entries of `U` at or below this magnitude are treated as zero
/// during backward substitution.
pub const PIVOT_EPSILON: f64 = 1e-9;
