//! 2x2 linear transforms over 16.16 fixed-point entries.

use crate::fixed::Fixed;
use crate::vector::Vector;
use thiserror::Error;

/// A 2x2 matrix applied to a [`Vector`] as `v' = M * v`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Matrix {
    pub xx: Fixed,
    pub xy: Fixed,
    pub yx: Fixed,
    pub yy: Fixed,
}

/// Failure modes for matrix operations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MatrixError {
    /// `matrix_invert` was asked to invert a singular matrix.
    #[error("matrix is singular (determinant is zero)")]
    Singular,
}

impl Matrix {
    /// The identity transform.
    pub const IDENTITY: Matrix = Matrix {
        xx: Fixed::ONE,
        xy: Fixed::ZERO,
        yx: Fixed::ZERO,
        yy: Fixed::ONE,
    };

    /// Apply this matrix to a vector.
    pub fn apply(&self, v: Vector) -> Vector {
        // Vector carries 26.6 subpixel coordinates; matrix entries are
        // 16.16. Promote through f64-free fixed math by scaling each
        // component and summing.
        use crate::fixed::F26Dot6;
        let x = F26Dot6::from_raw(
            (v.x.scale_by(self.xx).raw() as i64 + v.y.scale_by(self.xy).raw() as i64) as i32,
        );
        let y = F26Dot6::from_raw(
            (v.x.scale_by(self.yx).raw() as i64 + v.y.scale_by(self.yy).raw() as i64) as i32,
        );
        Vector::new(x, y)
    }

    /// Determinant, as a 16.16 fixed value computed at `i64` precision to
    /// avoid overflow before the final shift.
    pub fn determinant(&self) -> Fixed {
        let a = self.xx.raw() as i64 * self.yy.raw() as i64;
        let b = self.xy.raw() as i64 * self.yx.raw() as i64;
        Fixed::from_raw(((a - b) >> Fixed::FRAC_BITS) as i32)
    }

    /// Invert this matrix. Fails iff the determinant is exactly zero.
    pub fn invert(&self) -> Result<Matrix, MatrixError> {
        let det = self.determinant();
        if det.raw() == 0 {
            return Err(MatrixError::Singular);
        }
        let one_over_det = Fixed::ONE.div(det).ok_or(MatrixError::Singular)?;
        Ok(Matrix {
            xx: self.yy.mul(one_over_det),
            xy: -self.xy.mul(one_over_det),
            yx: -self.yx.mul(one_over_det),
            yy: self.xx.mul(one_over_det),
        })
    }

    /// Compose two matrices: `(self * rhs).apply(v) == self.apply(rhs.apply(v))`.
    pub fn compose(&self, rhs: &Matrix) -> Matrix {
        Matrix {
            xx: self.xx.mul(rhs.xx) + self.xy.mul(rhs.yx),
            xy: self.xx.mul(rhs.xy) + self.xy.mul(rhs.yy),
            yx: self.yx.mul(rhs.xx) + self.yy.mul(rhs.yx),
            yy: self.yx.mul(rhs.xy) + self.yy.mul(rhs.yy),
        }
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Matrix::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_inverts_to_identity() {
        let inv = Matrix::IDENTITY.invert().unwrap();
        assert_eq!(inv, Matrix::IDENTITY);
    }

    #[test]
    fn singular_matrix_fails_to_invert() {
        let singular = Matrix {
            xx: Fixed::from_int(1),
            xy: Fixed::from_int(2),
            yx: Fixed::from_int(2),
            yy: Fixed::from_int(4),
        };
        assert_eq!(singular.determinant(), Fixed::ZERO);
        assert_eq!(singular.invert(), Err(MatrixError::Singular));
    }

    #[test]
    fn matrix_times_inverse_is_identity_within_tolerance() {
        let m = Matrix {
            xx: Fixed::from_f64(1.5),
            xy: Fixed::from_f64(0.25),
            yx: Fixed::from_f64(-0.5),
            yy: Fixed::from_f64(2.0),
        };
        let inv = m.invert().expect("non-singular");
        let product = m.compose(&inv);
        // |det(M * Minv) - 1.0| <= 2^-14 in 16.16 representation.
        let tolerance = 1i32 << 2; // 2^-14 in 16.16 raw units == 4 raw units
        assert!((product.xx.raw() - Fixed::ONE.raw()).abs() <= tolerance);
        assert!(product.xy.raw().abs() <= tolerance);
        assert!(product.yx.raw().abs() <= tolerance);
        assert!((product.yy.raw() - Fixed::ONE.raw()).abs() <= tolerance);
    }

    #[test]
    fn apply_identity_is_noop() {
        use crate::fixed::F26Dot6;
        let v = Vector::new(F26Dot6::from_int(7), F26Dot6::from_int(-3));
        assert_eq!(Matrix::IDENTITY.apply(v), v);
    }
}
