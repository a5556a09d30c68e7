use nalgebra::{DMatrix, DVector};
use ordered_float::OrderedFloat;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError {
    #[error("matrix is not square: {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    #[error("right hand side has length {got}, expected {expected}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("singular matrix: zero pivot in column {column}")]
    Singular { column: usize },

    #[error("non-finite solution")]
    NonFinite,
}

/// Solve `a * x = b` by Gaussian elimination with partial pivoting.
///
/// At each column the row at or below the diagonal with the largest absolute entry
/// is swapped into the pivot position before eliminating, which keeps the
/// indefinite kriging matrix stable when samples are close together. `a` and `b`
/// are consumed as scratch space.
pub fn solve(mut a: DMatrix<f64>, mut b: DVector<f64>) -> Result<DVector<f64>, SolveError> {
    let n = a.nrows();
    if a.ncols() != n {
        return Err(SolveError::NotSquare {
            rows: n,
            cols: a.ncols(),
        });
    }
    if b.len() != n {
        return Err(SolveError::DimensionMismatch {
            expected: n,
            got: b.len(),
        });
    }

    // forward elimination
    for col in 0..n {
        // reversed so the first row wins ties
        let pivot_row = (col..n)
            .rev()
            .max_by_key(|&r| OrderedFloat(a[(r, col)].abs()))
            .unwrap_or(col);

        if pivot_row != col {
            a.swap_rows(col, pivot_row);
            b.swap_rows(col, pivot_row);
        }

        let pivot = a[(col, col)];
        if pivot == 0.0 || !pivot.is_finite() {
            return Err(SolveError::Singular { column: col });
        }

        for row in col + 1..n {
            let factor = a[(row, col)] / pivot;
            if factor == 0.0 {
                continue;
            }
            for k in col..n {
                a[(row, k)] -= factor * a[(col, k)];
            }
            b[row] -= factor * b[col];
        }
    }

    // back substitution
    let mut x = DVector::zeros(n);
    for row in (0..n).rev() {
        let tail = (row + 1..n).map(|k| a[(row, k)] * x[k]).sum::<f64>();
        x[row] = (b[row] - tail) / a[(row, row)];
    }

    if x.iter().any(|v| !v.is_finite()) {
        return Err(SolveError::NonFinite);
    }

    Ok(x)
}
