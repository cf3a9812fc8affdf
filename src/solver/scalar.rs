//! Numeric element types accepted by [`Matrix`](super::Matrix) and
//! [`Plu`](super::Plu).

use std::fmt;
use std::ops::Neg;

use num_complex::Complex;
use num_traits::NumAssign;

/// A real or complex number usable as a matrix element.
///
/// Pivot selection and the zero-pivot test only need a magnitude, so that is
/// the one thing the factorization asks of the type beyond field arithmetic.
pub trait Scalar:
    NumAssign + Neg<Output = Self> + Copy + fmt::Debug + fmt::Display + Send + Sync + 'static
{
    /// Absolute value (real) or modulus (complex).
    fn magnitude(&self) -> f64;
}

impl Scalar for f32 {
    fn magnitude(&self) -> f64 {
        f64::from(self.abs())
    }
}

impl Scalar for f64 {
    fn magnitude(&self) -> f64 {
        self.abs()
    }
}

impl Scalar for Complex<f32> {
    fn magnitude(&self) -> f64 {
        f64::from(self.norm())
    }
}

impl Scalar for Complex<f64> {
    fn magnitude(&self) -> f64 {
        self.norm()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_magnitudes() {
        assert_eq!((-2.5_f64).magnitude(), 2.5);
        assert_eq!((-2.0_f32).magnitude(), 2.0);
        assert!((Complex::new(3.0_f64, -4.0).magnitude() - 5.0).abs() < 1e-12);
        assert!((Complex::new(0.0_f32, 2.0).magnitude() - 2.0).abs() < 1e-6);
    }
}
