//! Dense linear-algebra kernels over [`ArrayValue`].
//!
//! Shape compatibility is the caller's responsibility; every function
//! here debug-asserts it and otherwise assumes well-formed inputs.
//! Singularity during inversion is the one runtime failure.

use crate::error::{EvalError, EvalResult};
use crate::value::ArrayValue;

/// Pivots smaller than this are treated as zero during elimination.
const PIVOT_EPS: f64 = 1e-12;

pub fn identity(n: usize) -> ArrayValue {
    let mut data = vec![0.0; n * n];
    for i in 0..n {
        data[i * n + i] = 1.0;
    }
    ArrayValue::from_parts(vec![n, n], data)
}

/// Inner product of two equal-length vectors.
pub fn dot(a: &ArrayValue, b: &ArrayValue) -> f64 {
    debug_assert_eq!(a.shape(), b.shape());
    debug_assert!(a.is_vector());
    a.data()
        .iter()
        .zip(b.data())
        .map(|(x, y)| x * y)
        .sum()
}

/// Matrix product of an (m, k) matrix with a (k, n) matrix.
pub fn matmul(a: &ArrayValue, b: &ArrayValue) -> ArrayValue {
    debug_assert!(a.is_matrix() && b.is_matrix());
    debug_assert_eq!(a.cols(), b.rows());
    let (m, k, n) = (a.rows(), a.cols(), b.cols());
    let mut data = vec![0.0; m * n];
    for i in 0..m {
        for p in 0..k {
            let aip = a.data()[i * k + p];
            for j in 0..n {
                data[i * n + j] += aip * b.data()[p * n + j];
            }
        }
    }
    ArrayValue::from_parts(vec![m, n], data)
}

/// (m, k) matrix times length-k vector, yielding a length-m vector.
pub fn matvec(a: &ArrayValue, v: &ArrayValue) -> ArrayValue {
    debug_assert!(a.is_matrix() && v.is_vector());
    debug_assert_eq!(a.cols(), v.len());
    let (m, k) = (a.rows(), a.cols());
    let data = (0..m)
        .map(|i| (0..k).map(|p| a.data()[i * k + p] * v.data()[p]).sum())
        .collect();
    ArrayValue::from_parts(vec![m], data)
}

/// Length-m vector times (m, n) matrix, yielding a length-n vector.
pub fn vecmat(v: &ArrayValue, a: &ArrayValue) -> ArrayValue {
    debug_assert!(v.is_vector() && a.is_matrix());
    debug_assert_eq!(v.len(), a.rows());
    let (m, n) = (a.rows(), a.cols());
    let data = (0..n)
        .map(|j| (0..m).map(|i| v.data()[i] * a.data()[i * n + j]).sum())
        .collect();
    ArrayValue::from_parts(vec![n], data)
}

/// Invert a square matrix by Gauss-Jordan elimination with partial
/// pivoting. A vanishing pivot means the matrix is singular.
pub fn inverse(a: &ArrayValue) -> EvalResult<ArrayValue> {
    debug_assert!(a.is_square());
    let n = a.rows();
    let mut aug = a.data().to_vec();
    let mut inv = identity(n).data().to_vec();

    for col in 0..n {
        // pick the largest remaining pivot in this column
        let pivot_row = (col..n)
            .max_by(|&i, &j| {
                aug[i * n + col]
                    .abs()
                    .total_cmp(&aug[j * n + col].abs())
            })
            .ok_or_else(|| EvalError::internal("empty pivot search"))?;
        if aug[pivot_row * n + col].abs() < PIVOT_EPS {
            return Err(EvalError::SingularMatrix);
        }
        if pivot_row != col {
            for j in 0..n {
                aug.swap(col * n + j, pivot_row * n + j);
                inv.swap(col * n + j, pivot_row * n + j);
            }
        }

        let pivot = aug[col * n + col];
        for j in 0..n {
            aug[col * n + j] /= pivot;
            inv[col * n + j] /= pivot;
        }
        for row in 0..n {
            if row == col {
                continue;
            }
            let factor = aug[row * n + col];
            if factor == 0.0 {
                continue;
            }
            for j in 0..n {
                aug[row * n + j] -= factor * aug[col * n + j];
                inv[row * n + j] -= factor * inv[col * n + j];
            }
        }
    }
    Ok(ArrayValue::from_parts(vec![n, n], inv))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mat(rows: &[&[f64]]) -> ArrayValue {
        let shape = vec![rows.len(), rows[0].len()];
        let data = rows.iter().flat_map(|r| r.iter().copied()).collect();
        ArrayValue::from_parts(shape, data)
    }

    fn vec_(data: &[f64]) -> ArrayValue {
        ArrayValue::from_parts(vec![data.len()], data.to_vec())
    }

    #[test]
    fn dot_product() {
        assert_eq!(dot(&vec_(&[1.0, 2.0, 3.0]), &vec_(&[4.0, 5.0, 6.0])), 32.0);
    }

    #[test]
    fn matmul_rectangular() {
        let a = mat(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]);
        let b = mat(&[&[7.0, 8.0], &[9.0, 10.0], &[11.0, 12.0]]);
        let c = matmul(&a, &b);
        assert_eq!(c.shape(), &[2, 2]);
        assert_eq!(c.data(), &[58.0, 64.0, 139.0, 154.0]);
    }

    #[test]
    fn matvec_and_vecmat() {
        let a = mat(&[&[1.0, 2.0], &[3.0, 4.0]]);
        assert_eq!(matvec(&a, &vec_(&[1.0, 1.0])).data(), &[3.0, 7.0]);
        assert_eq!(vecmat(&vec_(&[1.0, 1.0]), &a).data(), &[4.0, 6.0]);
    }

    #[test]
    fn inverse_round_trip() {
        let a = mat(&[&[4.0, 7.0], &[2.0, 6.0]]);
        let inv = inverse(&a).unwrap();
        let prod = matmul(&a, &inv);
        let id = identity(2);
        for (x, y) in prod.data().iter().zip(id.data()) {
            assert!((x - y).abs() < 1e-12);
        }
    }

    #[test]
    fn inverse_needs_pivoting() {
        // leading zero forces a row swap
        let a = mat(&[&[0.0, 1.0], &[1.0, 0.0]]);
        let inv = inverse(&a).unwrap();
        assert_eq!(inv.data(), &[0.0, 1.0, 1.0, 0.0]);
    }

    #[test]
    fn singular_matrix_rejected() {
        let a = mat(&[&[1.0, 2.0], &[2.0, 4.0]]);
        assert_eq!(inverse(&a), Err(EvalError::SingularMatrix));
    }
}
